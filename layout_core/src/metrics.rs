// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-run derived metrics, scaled from font-unit space into layout units.
//!
//! Computed once per [`crate::glyph::GlyphRun`] at shaping time; the decoration engine and
//! typesetter read these rather than re-deriving the `font_size / units_per_em` ratio.

use crate::external::Font;

/// Metrics for a single run, scaled to its `font_size`.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct GlyphRunMetrics {
    /// Ascent, in layout units.
    pub ascent: f32,
    /// Descent (positive, below baseline), in layout units.
    pub descent: f32,
    /// Recommended line gap, in layout units.
    pub leading: f32,
    /// Underline offset from baseline, in layout units.
    pub underline_offset: f32,
    /// Underline stroke thickness, in layout units.
    pub underline_size: f32,
    /// Strikethrough offset from baseline, in layout units.
    pub strikethrough_offset: f32,
    /// Strikethrough stroke thickness, in layout units.
    pub strikethrough_size: f32,
}

impl GlyphRunMetrics {
    /// Derives scaled metrics for `font` at `font_size`.
    pub fn from_font(font: &dyn Font, font_size: f32) -> Self {
        let upem = font.units_per_em().max(1) as f32;
        let scale = font_size / upem;
        Self {
            ascent: font.ascent() * scale,
            descent: font.descent() * scale,
            leading: font.leading() * scale,
            underline_offset: font.underline_position() * scale,
            underline_size: font.underline_thickness() * scale,
            strikethrough_offset: font.strikeout_position() * scale,
            strikethrough_size: font.strikeout_thickness() * scale,
        }
    }

    /// Total line box height: ascent + descent + leading.
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{Font, ShapedRun};
    use crate::attributes::{FontFeature, FontVariation};
    use text_primitives::Script;

    struct FixedFont;
    impl Font for FixedFont {
        fn layout(&self, _text: &str, _f: &[FontFeature], _v: &[FontVariation], _s: Script) -> ShapedRun {
            ShapedRun::default()
        }
        fn glyph_for_codepoint(&self, _c: char) -> Option<u16> {
            None
        }
        fn units_per_em(&self) -> u16 {
            1000
        }
        fn is_mark_glyph(&self, _id: u16) -> bool {
            false
        }
        fn ascent(&self) -> f32 {
            800.0
        }
        fn descent(&self) -> f32 {
            200.0
        }
        fn leading(&self) -> f32 {
            0.0
        }
        fn underline_position(&self) -> f32 {
            -100.0
        }
        fn underline_thickness(&self) -> f32 {
            50.0
        }
        fn strikeout_position(&self) -> f32 {
            300.0
        }
        fn strikeout_thickness(&self) -> f32 {
            50.0
        }
    }

    #[test]
    fn metrics_scale_by_font_size_over_units_per_em() {
        let metrics = GlyphRunMetrics::from_font(&FixedFont, 10.0);
        assert_eq!(metrics.ascent, 8.0);
        assert_eq!(metrics.descent, 2.0);
        assert_eq!(metrics.line_height(), 10.0);
    }
}
