// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The glyph generator: shapes each run, reconciles the character<->glyph index mapping, and
//! resolves attachment advances and baseline y-offsets.
//!
//! Shaping itself (`Font::layout`) is external; this module owns everything downstream of the
//! raw shaper output: contiguous glyph-index allocation across runs, the three-pass index
//! reconciliation that makes `glyph_indices` total and monotone even across ligatures and
//! decomposition, and the two small positional corrections (attachment width override, y-offset
//! shift) that the pipeline applies before line breaking ever sees the glyphs.

use alloc::vec::Vec;
use core::ops::Range;

use crate::attributes::{Brush, ResolvedAttributes};
use crate::external::Font;
use crate::geometry::Position;
use crate::metrics::GlyphRunMetrics;

/// U+FFFC OBJECT REPLACEMENT CHARACTER: the sentinel glyph an attachment occupies.
const OBJECT_REPLACEMENT_CHARACTER: char = '\u{FFFC}';

/// One run's shaped, reconciled, positioned glyphs.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun<B: Brush> {
    /// Glyph-space `[start, end)` of this run within its [`GlyphString`].
    pub range: Range<usize>,
    /// Character-space `[start, end)` of this run within its paragraph (the domain
    /// `string_indices`/`glyph_indices` are expressed relative to, offset by `char_range.start`).
    pub char_range: Range<usize>,
    /// Resolved attributes for this run.
    pub attributes: ResolvedAttributes<B>,
    /// Derived, font-size-scaled metrics.
    pub metrics: GlyphRunMetrics,
    /// Glyph ids, in visual order.
    pub glyphs: Vec<u16>,
    /// Per-glyph advance/offset, in layout units. Mutated in place by attachment, y-offset and
    /// justification resolution.
    pub positions: Vec<Position>,
    /// `string_indices[g]` is the character offset (within this run's substring) that produced
    /// glyph `g`. Monotone non-decreasing.
    pub string_indices: Vec<usize>,
    /// `glyph_indices[c]` is the glyph offset (within this run) for character `c`. Monotone
    /// non-decreasing and total (no gaps) after reconciliation.
    pub glyph_indices: Vec<usize>,
    /// `is_space[g]` is true iff every character mapping to glyph `g` (per `glyph_indices`) is
    /// an ASCII space. Used by line finalization to trim leading/trailing whitespace without
    /// re-deriving it from the source string.
    pub is_space: Vec<bool>,
}

/// An ordered sequence of [`GlyphRun`]s sharing one underlying string.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphString<B: Brush> {
    /// The runs, in document order, with contiguously-allocated glyph-space ranges.
    pub runs: Vec<GlyphRun<B>>,
}

impl<B: Brush> GlyphString<B> {
    /// Total glyph count across all runs.
    pub fn length(&self) -> usize {
        self.runs.last().map_or(0, |r| r.range.end)
    }

    /// Tallest run metrics' line height, used as the paragraph's line box height.
    pub fn height(&self) -> f32 {
        self.runs.iter().map(|r| r.metrics.line_height()).fold(0.0_f32, f32::max)
    }

    /// Sum of every glyph's `x_advance`, the line's pre-alignment advance width.
    pub fn advance_width(&self) -> f32 {
        self.runs.iter().flat_map(|r| r.positions.iter()).map(|p| p.x_advance).sum()
    }

    /// Maps a paragraph-relative character offset to the glyph-space offset of the first glyph
    /// produced at or after it (used to place line-breaker candidates and trim/hang boundaries).
    pub fn char_to_glyph(&self, char_offset: usize) -> usize {
        for run in &self.runs {
            if run.char_range.start == run.char_range.end {
                continue;
            }
            if char_offset < run.char_range.end {
                if char_offset <= run.char_range.start || run.glyph_indices.is_empty() {
                    return run.range.start;
                }
                let local_char =
                    (char_offset - run.char_range.start).min(run.glyph_indices.len() - 1);
                return run.range.start + run.glyph_indices[local_char];
            }
        }
        self.runs.last().map_or(0, |r| r.range.end)
    }

    /// Extracts the sub-[`GlyphString`] covering glyph-space `glyph_range`, splitting runs at
    /// the boundary and renumbering the result's run ranges to start at 0.
    ///
    /// `glyph_indices` of a split run are re-derived from the character subrange whose glyphs
    /// fall inside `glyph_range` (found via `glyph_indices`' own monotonicity), so the result
    /// stays total and monotone over its own, smaller, character domain.
    pub fn slice(&self, glyph_range: Range<usize>) -> Self {
        let mut out_runs = Vec::new();
        let mut next_start = 0usize;
        for run in &self.runs {
            let lo = glyph_range.start.max(run.range.start);
            let hi = glyph_range.end.min(run.range.end);
            if lo >= hi {
                continue;
            }
            let local_lo = lo - run.range.start;
            let local_hi = hi - run.range.start;

            let glyphs = run.glyphs[local_lo..local_hi].to_vec();
            let positions = run.positions[local_lo..local_hi].to_vec();
            let is_space = run.is_space[local_lo..local_hi].to_vec();
            let base_si = run.string_indices.get(local_lo).copied().unwrap_or(0);
            let string_indices: Vec<usize> =
                run.string_indices[local_lo..local_hi].iter().map(|&si| si - base_si).collect();

            let char_lo = run.glyph_indices.partition_point(|&g| g < local_lo);
            let char_hi = run.glyph_indices.partition_point(|&g| g < local_hi).max(char_lo);
            let glyph_indices: Vec<usize> =
                run.glyph_indices[char_lo..char_hi].iter().map(|&g| g.saturating_sub(local_lo)).collect();

            let len = glyphs.len();
            out_runs.push(GlyphRun {
                range: next_start..next_start + len,
                char_range: (run.char_range.start + char_lo)..(run.char_range.start + char_hi),
                attributes: run.attributes.clone(),
                metrics: run.metrics,
                glyphs,
                positions,
                string_indices,
                glyph_indices,
                is_space,
            });
            next_start += len;
        }
        Self { runs: out_runs }
    }

    /// Concatenates several [`GlyphString`]s (each already glyph-range `0..len`) into one,
    /// renumbering run ranges to stay contiguous across the join.
    pub fn concat(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut out_runs = Vec::new();
        let mut next_start = 0usize;
        for part in parts {
            for run in part.runs {
                let len = run.glyphs.len();
                out_runs.push(GlyphRun { range: next_start..next_start + len, ..run });
                next_start += len;
            }
        }
        Self { runs: out_runs }
    }
}

/// Reconciles a shaper's (possibly sparse, many-to-many) `string_indices` into a total,
/// monotone `glyph_indices` map of length `char_len`:
///
/// 1. For each character offset `i`, the nearest following glyph: `min { j : string_indices[j] >= i }`.
/// 2. Back-fill any undefined tail entries with the last defined value (right to left).
/// 3. Forward-fill any remaining undefined head entries with the first defined value (left to right).
pub fn reconcile_glyph_indices(string_indices: &[usize], char_len: usize) -> Vec<usize> {
    let mut glyph_indices: Vec<Option<usize>> = alloc::vec![None; char_len];

    for (i, slot) in glyph_indices.iter_mut().enumerate() {
        let j = string_indices.partition_point(|&x| x < i);
        if j < string_indices.len() {
            *slot = Some(j);
        }
    }

    let mut last_defined = None;
    for slot in glyph_indices.iter_mut().rev() {
        match slot {
            Some(value) => last_defined = Some(*value),
            None => *slot = last_defined,
        }
    }

    let mut first_defined = None;
    for slot in glyph_indices.iter_mut() {
        match slot {
            Some(value) => first_defined = Some(*value),
            None => *slot = first_defined,
        }
    }

    glyph_indices.into_iter().map(|v| v.unwrap_or(0)).collect()
}

/// Overwrites the `xAdvance` of every attachment-sentinel glyph in `positions` with
/// `attachment.width`, leaving all other glyphs untouched.
pub fn resolve_attachment(font: &dyn Font, attachment_width: f32, glyphs: &[u16], positions: &mut [Position]) {
    let Some(sentinel) = font.glyph_for_codepoint(OBJECT_REPLACEMENT_CHARACTER) else {
        return;
    };
    for (glyph, position) in glyphs.iter().zip(positions.iter_mut()) {
        if *glyph == sentinel {
            position.x_advance = attachment_width;
        }
    }
}

/// Adds `y_offset * units_per_em` to every glyph's vertical offset. Applied after attachment
/// resolution (Open Question (a)): an attachment glyph's offset may be shifted too.
pub fn resolve_y_offset(units_per_em: u16, y_offset_em: f32, positions: &mut [Position]) {
    if y_offset_em == 0.0 {
        return;
    }
    let shift = y_offset_em * units_per_em as f32;
    for position in positions {
        position.y_offset += shift;
    }
}

/// Scales every position in `positions` by `font_size / units_per_em`, converting shaper output
/// from font-design-unit space into layout-unit space.
pub fn scale_positions(units_per_em: u16, font_size: f32, positions: &mut [Position]) {
    let scale = font_size / units_per_em.max(1) as f32;
    for position in positions {
        position.x_advance *= scale;
        position.y_advance *= scale;
        position.x_offset *= scale;
        position.y_offset *= scale;
    }
}

/// Derives a per-glyph whitespace flag: `is_space[g]` is true iff every character `glyph_indices`
/// maps to glyph `g` is an ASCII space, and at least one character maps there.
fn compute_is_space(glyph_indices: &[usize], char_is_space: &[bool], glyph_count: usize) -> Vec<bool> {
    let mut is_space = alloc::vec![true; glyph_count];
    let mut touched = alloc::vec![false; glyph_count];
    for (c, &g) in glyph_indices.iter().enumerate() {
        if g >= glyph_count {
            continue;
        }
        touched[g] = true;
        if !char_is_space.get(c).copied().unwrap_or(false) {
            is_space[g] = false;
        }
    }
    for (g, t) in touched.iter().enumerate() {
        if !t {
            is_space[g] = false;
        }
    }
    is_space
}

/// Builds one [`GlyphRun`] from a shaper result, applying index reconciliation, attachment
/// resolution, y-offset resolution and unit scaling in that fixed order.
///
/// `attachment_width` comes from the run's source `Attributes::attachment` (not
/// `ResolvedAttributes`, which does not carry it) — pass `None` for runs with no attachment.
/// `char_is_space[i]` flags whether character `i` of the run's substring is an ASCII space,
/// used to derive [`GlyphRun::is_space`]. `char_start` is this run's offset within its paragraph.
#[expect(clippy::too_many_arguments, reason = "one argument per shaper output plus resolved attributes; the fields aren't a natural group")]
pub fn build_glyph_run<B: Brush>(
    glyph_start: usize,
    char_start: usize,
    char_is_space: &[bool],
    font: &dyn Font,
    attributes: ResolvedAttributes<B>,
    attachment_width: Option<f32>,
    glyphs: Vec<u16>,
    mut positions: Vec<Position>,
    string_indices: Vec<usize>,
) -> GlyphRun<B> {
    let char_len = char_is_space.len();
    let glyph_indices = reconcile_glyph_indices(&string_indices, char_len);
    let is_space = compute_is_space(&glyph_indices, char_is_space, glyphs.len());

    if let Some(width) = attachment_width {
        resolve_attachment(font, width, &glyphs, &mut positions);
    }
    resolve_y_offset(font.units_per_em(), attributes.y_offset, &mut positions);
    scale_positions(font.units_per_em(), attributes.font_size, &mut positions);

    let metrics = GlyphRunMetrics::from_font(font, attributes.font_size);
    let end = glyph_start + glyphs.len();
    GlyphRun {
        range: glyph_start..end,
        char_range: char_start..char_start + char_len,
        attributes,
        metrics,
        glyphs,
        positions,
        string_indices,
        glyph_indices,
        is_space,
    }
}
