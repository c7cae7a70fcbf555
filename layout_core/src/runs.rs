// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run algebra: flattening multiple overlapping run sets into one contiguous partition.
//!
//! Each pipeline source (the caller's style runs, the font-substitution adapter, the script
//! itemizer, the bidi resolver) produces its own [`RunSet`] over the same string coordinate
//! space. [`flatten`] overlays them: the output is sorted, non-overlapping and contiguous over
//! `[0, len)`, and adjacent segments with equal attributes are merged. Later sources in the
//! input slice win on any attribute field both set.
//!
//! Collects every source run's endpoints into a sorted, deduplicated boundary list, then for
//! each resulting segment folds every covering source's attributes in source order.

use alloc::vec::Vec;
use core::ops::Range;

use crate::attributes::{Attributes, Brush};

/// A single contiguous span of attributes over the string.
#[derive(Clone, Debug, PartialEq)]
pub struct Run<B: Brush, I = ()> {
    /// Byte range of this run in the source string.
    pub range: Range<usize>,
    /// Attributes active over this range.
    pub attributes: Attributes<B, I>,
}

/// A run set: an ordered list of [`Run`]s from one source.
///
/// A well-formed run set is sorted, non-overlapping and need not be contiguous (a source may
/// only cover part of the string; uncovered gaps contribute nothing to the overlay).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSet<B: Brush, I = ()> {
    /// The runs, in ascending, non-overlapping order.
    pub runs: Vec<Run<B, I>>,
}

impl<B: Brush, I> RunSet<B, I> {
    /// An empty run set.
    pub const fn new() -> Self {
        Self { runs: Vec::new() }
    }

    /// A run set covering `[0, len)` with a single uniform set of attributes.
    pub fn uniform(len: usize, attributes: Attributes<B, I>) -> Self {
        Self { runs: alloc::vec![Run { range: 0..len, attributes }] }
    }
}

/// Flattens multiple run-set sources into one contiguous, non-overlapping partition of `[0, len)`.
///
/// `sources` are applied in order: for any segment, a later source's populated attribute fields
/// override an earlier source's (see [`Attributes::overlay`]). Segments left untouched by every
/// source get [`Attributes::default`]. Adjacent output runs with equal attributes are merged.
pub fn flatten<B: Brush, I: Clone + PartialEq>(len: usize, sources: &[RunSet<B, I>]) -> RunSet<B, I> {
    if len == 0 {
        return RunSet::new();
    }

    let mut boundaries: Vec<usize> = Vec::with_capacity(2 + sources.iter().map(|s| s.runs.len() * 2).sum::<usize>());
    boundaries.push(0);
    boundaries.push(len);
    for source in sources {
        for run in &source.runs {
            boundaries.push(run.range.start.min(len));
            boundaries.push(run.range.end.min(len));
        }
    }
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut flattened = Vec::with_capacity(boundaries.len().saturating_sub(1));
    for window in boundaries.windows(2) {
        let (start, end) = (window[0], window[1]);
        if start >= end {
            continue;
        }
        let mut attributes = Attributes::default();
        for source in sources {
            for run in &source.runs {
                if run.range.start <= start && end <= run.range.end {
                    attributes.overlay(&run.attributes);
                }
            }
        }
        flattened.push(Run { range: start..end, attributes });
    }

    merge_adjacent(flattened)
}

fn merge_adjacent<B: Brush, I: Clone + PartialEq>(runs: Vec<Run<B, I>>) -> RunSet<B, I> {
    let mut merged: Vec<Run<B, I>> = Vec::with_capacity(runs.len());
    for run in runs {
        if let Some(last) = merged.last_mut() {
            if last.range.end == run.range.start && last.attributes == run.attributes {
                last.range.end = run.range.end;
                continue;
            }
        }
        merged.push(run);
    }
    RunSet { runs: merged }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font_size_only(size: f32) -> Attributes<[u8; 4]> {
        let mut attrs = Attributes::default();
        attrs.font_size = Some(size);
        attrs
    }

    #[test]
    fn flatten_empty_string_yields_empty_set() {
        let flattened = flatten::<[u8; 4], ()>(0, &[]);
        assert!(flattened.runs.is_empty());
    }

    #[test]
    fn flatten_with_no_sources_covers_whole_string_with_defaults() {
        let flattened = flatten::<[u8; 4], ()>(5, &[]);
        assert_eq!(flattened.runs.len(), 1);
        assert_eq!(flattened.runs[0].range, 0..5);
    }

    #[test]
    fn flatten_overlays_later_source_over_earlier() {
        let style = RunSet { runs: alloc::vec![Run { range: 0..5, attributes: font_size_only(12.0) }] };
        let substitution = RunSet { runs: alloc::vec![Run { range: 2..5, attributes: font_size_only(24.0) }] };
        let flattened = flatten(5, &[style, substitution]);
        assert_eq!(flattened.runs.len(), 2);
        assert_eq!(flattened.runs[0].range, 0..2);
        assert_eq!(flattened.runs[0].attributes.font_size, Some(12.0));
        assert_eq!(flattened.runs[1].range, 2..5);
        assert_eq!(flattened.runs[1].attributes.font_size, Some(24.0));
    }

    #[test]
    fn flatten_merges_adjacent_equal_runs() {
        let a = RunSet { runs: alloc::vec![Run { range: 0..3, attributes: font_size_only(10.0) }] };
        let b = RunSet { runs: alloc::vec![Run { range: 3..6, attributes: font_size_only(10.0) }] };
        let flattened = flatten(6, &[a, b]);
        assert_eq!(flattened.runs.len(), 1);
        assert_eq!(flattened.runs[0].range, 0..6);
    }

    #[test]
    fn flatten_partitions_exactly_with_no_gaps_or_overlaps() {
        let a = RunSet { runs: alloc::vec![Run { range: 1..4, attributes: font_size_only(10.0) }] };
        let b = RunSet { runs: alloc::vec![Run { range: 3..8, attributes: font_size_only(20.0) }] };
        let flattened = flatten(10, &[a, b]);
        let mut cursor = 0;
        for run in &flattened.runs {
            assert_eq!(run.range.start, cursor);
            cursor = run.range.end;
        }
        assert_eq!(cursor, 10);
    }
}
