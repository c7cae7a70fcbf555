// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The truncation engine: elides part of a truncated paragraph's last line and splices in the
//! dominant font's ellipsis glyph.
//!
//! Invoked only on the last line of a paragraph the line breaker flagged as truncated
//! (`max_lines` reached, or the typesetter ran out of container space). The elided glyph
//! subrange is chosen to minimize overflow of the line box: as many glyphs as fit alongside the
//! ellipsis are kept, per [`TruncationMode`].

use alloc::vec::Vec;

use crate::attributes::{Brush, ResolvedAttributes};
use crate::geometry::Position;
use crate::glyph::{GlyphRun, GlyphString};
use crate::metrics::GlyphRunMetrics;

pub use crate::attributes::TruncationMode;

/// Builds the one-glyph [`GlyphString`] carrying the ellipsis, using the dominant run's
/// attributes and metrics (the run truncation elides into loses per-run granularity at the
/// elision point; the ellipsis itself always renders in the line's dominant style).
fn ellipsis_string<B: Brush>(
    glyph_id: u16,
    advance: f32,
    attributes: ResolvedAttributes<B>,
    metrics: GlyphRunMetrics,
) -> GlyphString<B> {
    GlyphString {
        runs: alloc::vec![GlyphRun {
            range: 0..1,
            char_range: 0..1,
            attributes,
            metrics,
            glyphs: alloc::vec![glyph_id],
            positions: alloc::vec![Position { x_advance: advance, ..Position::default() }],
            string_indices: alloc::vec![0],
            glyph_indices: alloc::vec![0],
            is_space: alloc::vec![false],
        }],
    }
}

/// Per-glyph advance widths in document order, used to find elision boundaries without
/// re-walking run structure repeatedly.
fn per_glyph_advances<B: Brush>(line: &GlyphString<B>) -> Vec<f32> {
    line.runs.iter().flat_map(|r| r.positions.iter()).map(|p| p.x_advance).collect()
}

/// Truncates `line` to fit `available_width` (best-effort; a single oversized glyph plus the
/// ellipsis may still overflow), replacing the elided range with `ellipsis_glyph`.
///
/// Returns the new, truncated [`GlyphString`]. If `line` already fits alongside the ellipsis
/// with nothing elided, the ellipsis is still appended/prepended per `mode` — this is only
/// called when the caller has already determined the paragraph was truncated (more content
/// exists beyond this line), not based on this line's own width.
pub fn truncate_line<B: Brush>(
    line: &GlyphString<B>,
    mode: TruncationMode,
    available_width: f32,
    ellipsis_glyph: u16,
    ellipsis_advance: f32,
    ellipsis_attributes: ResolvedAttributes<B>,
    ellipsis_metrics: GlyphRunMetrics,
) -> GlyphString<B> {
    let n = line.length();
    if n == 0 {
        return ellipsis_string(ellipsis_glyph, ellipsis_advance, ellipsis_attributes, ellipsis_metrics);
    }
    let advances = per_glyph_advances(line);
    let budget = (available_width - ellipsis_advance).max(0.0);
    let ellipsis = ellipsis_string(ellipsis_glyph, ellipsis_advance, ellipsis_attributes, ellipsis_metrics);

    match mode {
        TruncationMode::Tail => {
            let mut keep = 0usize;
            let mut used = 0.0f32;
            while keep < n && used + advances[keep] <= budget {
                used += advances[keep];
                keep += 1;
            }
            GlyphString::concat([line.slice(0..keep), ellipsis])
        }
        TruncationMode::Head => {
            let mut keep = 0usize;
            let mut used = 0.0f32;
            while keep < n && used + advances[n - 1 - keep] <= budget {
                used += advances[n - 1 - keep];
                keep += 1;
            }
            GlyphString::concat([ellipsis, line.slice(n - keep..n)])
        }
        TruncationMode::Middle => {
            let mut head = 0usize;
            let mut tail = 0usize;
            let mut used = 0.0f32;
            while head + tail < n {
                let head_cost = advances[head];
                let tail_cost = advances[n - 1 - tail];
                if used + head_cost <= budget {
                    used += head_cost;
                    head += 1;
                } else if used + tail_cost <= budget {
                    used += tail_cost;
                    tail += 1;
                } else {
                    break;
                }
            }
            GlyphString::concat([line.slice(0..head), ellipsis, line.slice(n - tail..n)])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;

    fn uniform_line(widths: &[f32]) -> GlyphString<[u8; 4]> {
        let attrs = Attributes::<[u8; 4]>::default().resolve(None);
        let metrics = GlyphRunMetrics::default();
        let glyphs: Vec<u16> = (0..widths.len() as u16).collect();
        let positions: Vec<Position> =
            widths.iter().map(|&w| Position { x_advance: w, ..Position::default() }).collect();
        let string_indices: Vec<usize> = (0..widths.len()).collect();
        let glyph_indices: Vec<usize> = (0..widths.len()).collect();
        let is_space = alloc::vec![false; widths.len()];
        GlyphString {
            runs: alloc::vec![GlyphRun {
                range: 0..widths.len(),
                char_range: 0..widths.len(),
                attributes: attrs,
                metrics,
                glyphs,
                positions,
                string_indices,
                glyph_indices,
                is_space,
            }],
        }
    }

    fn stub_attrs() -> ResolvedAttributes<[u8; 4]> {
        Attributes::<[u8; 4]>::default().resolve(None)
    }

    #[test]
    fn tail_truncation_keeps_a_fitting_prefix_and_appends_ellipsis() {
        let line = uniform_line(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        let result = truncate_line(&line, TruncationMode::Tail, 25.0, 99, 5.0, stub_attrs(), GlyphRunMetrics::default());
        // budget = 25 - 5 = 20, so 2 glyphs of width 10 fit, then the ellipsis.
        assert_eq!(result.length(), 3);
        assert_eq!(*result.runs.last().unwrap().glyphs.last().unwrap(), 99);
    }

    #[test]
    fn head_truncation_keeps_a_fitting_suffix_and_prepends_ellipsis() {
        let line = uniform_line(&[10.0, 10.0, 10.0, 10.0]);
        let result = truncate_line(&line, TruncationMode::Head, 25.0, 99, 5.0, stub_attrs(), GlyphRunMetrics::default());
        assert_eq!(result.runs[0].glyphs[0], 99);
    }

    #[test]
    fn middle_truncation_elides_the_center() {
        let line = uniform_line(&[10.0, 10.0, 10.0, 10.0, 10.0, 10.0]);
        let result = truncate_line(&line, TruncationMode::Middle, 35.0, 99, 5.0, stub_attrs(), GlyphRunMetrics::default());
        // budget = 30: 3 glyphs (one from each side alternating, head-first) fit before the ellipsis.
        assert!(result.length() < line.length());
        let ids: Vec<u16> = result.runs.iter().flat_map(|r| r.glyphs.iter().copied()).collect();
        assert!(ids.contains(&99));
    }

    #[test]
    fn empty_line_yields_just_the_ellipsis() {
        let line = uniform_line(&[]);
        let result = truncate_line(&line, TruncationMode::Tail, 10.0, 99, 5.0, stub_attrs(), GlyphRunMetrics::default());
        assert_eq!(result.length(), 1);
    }
}
