// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The decoration engine: underline and strikethrough geometry for a finalized line.
//!
//! Grounded on `parley::layout::run::RunMetrics`'s `underline_offset`/`underline_size`/
//! `strikethrough_offset`/`strikethrough_size` fields, reused here (scaled, as
//! [`crate::metrics::GlyphRunMetrics`]) as the source of decoration geometry. Wavy/dashed/
//! dotted/double styles are recorded as data; their geometric expansion into actual stroke
//! paths is a renderer concern, so this module only ever emits one rectangle per decoration per
//! run.

use smallvec::SmallVec;

use crate::attributes::{Brush, DecorationStyle, ResolvedAttributes};
use crate::geometry::Rect;
use crate::glyph::GlyphRun;

/// A single decoration-line rectangle, ready for the renderer to stroke or fill.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorationLine<B: Brush> {
    /// The rectangle to draw, in the line's coordinate space.
    pub rect: Rect,
    /// Stroke/fill color.
    pub color: B,
    /// Line style (solid/double/dashed/dotted/wavy); geometric expansion is left to the renderer.
    pub style: DecorationStyle,
    /// Opacity multiplier, `0.0..=1.0`.
    pub opacity: f32,
}

/// Emits underline and strikethrough [`DecorationLine`]s for one run positioned at
/// `run_x..run_x + run_advance_width`, with the line's baseline at `baseline_y`.
///
/// A run carries at most an underline and a strikethrough, so the result lives on the stack in
/// the common case.
pub fn decorate_run<B: Brush>(
    run: &GlyphRun<B>,
    run_x: f32,
    run_advance_width: f32,
    baseline_y: f32,
) -> SmallVec<[DecorationLine<B>; 2]> {
    let mut lines = SmallVec::new();
    let attrs: &ResolvedAttributes<B> = &run.attributes;

    if attrs.underline_enabled {
        let thickness = run.metrics.underline_size.max(0.0);
        let y = baseline_y - run.metrics.underline_offset;
        lines.push(DecorationLine {
            rect: Rect::new(run_x, y, run_advance_width, thickness),
            color: attrs.underline_color.clone(),
            style: attrs.underline_style,
            opacity: 1.0,
        });
    }

    if attrs.strike_enabled {
        let thickness = run.metrics.strikethrough_size.max(0.0);
        let y = baseline_y - run.metrics.strikethrough_offset;
        lines.push(DecorationLine {
            rect: Rect::new(run_x, y, run_advance_width, thickness),
            color: attrs.strike_color.clone(),
            style: attrs.strike_style,
            opacity: 1.0,
        });
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;
    use crate::metrics::GlyphRunMetrics;

    fn run_with(underline: bool, strike: bool) -> GlyphRun<[u8; 4]> {
        let mut attrs = Attributes::<[u8; 4]>::default();
        attrs.underline = Some(crate::attributes::Decoration {
            enabled: underline,
            color: Some([1, 2, 3, 255]),
            style: DecorationStyle::Solid,
        });
        attrs.strike = Some(crate::attributes::Decoration {
            enabled: strike,
            color: Some([4, 5, 6, 255]),
            style: DecorationStyle::Wavy,
        });
        let resolved = attrs.resolve(None);
        GlyphRun {
            range: 0..0,
            char_range: 0..0,
            attributes: resolved,
            metrics: GlyphRunMetrics {
                underline_offset: -1.0,
                underline_size: 0.5,
                strikethrough_offset: 3.0,
                strikethrough_size: 0.5,
                ..Default::default()
            },
            glyphs: alloc::vec![],
            positions: alloc::vec![],
            string_indices: alloc::vec![],
            glyph_indices: alloc::vec![],
            is_space: alloc::vec![],
        }
    }

    #[test]
    fn no_decorations_when_disabled() {
        let run = run_with(false, false);
        assert!(decorate_run(&run, 0.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn underline_rect_sits_below_baseline_by_offset() {
        let run = run_with(true, false);
        let lines = decorate_run(&run, 2.0, 10.0, 20.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].rect, Rect::new(2.0, 21.0, 10.0, 0.5));
        assert_eq!(lines[0].color, [1, 2, 3, 255]);
    }

    #[test]
    fn strike_rect_uses_strikethrough_offset() {
        let run = run_with(false, true);
        let lines = decorate_run(&run, 0.0, 10.0, 20.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].rect.y, 17.0);
        assert_eq!(lines[0].style, DecorationStyle::Wavy);
    }
}
