// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the integration suite: a trivial monospace font plus the external
//! collaborator stubs (`FontResolver`, `ScriptItemizer`, `FontSubstitution`) every test builds
//! its `Engines` from.

use layout_core::attributes::{FontFeature, FontVariation};
use layout_core::engines::Engines;
use layout_core::external::{Font, FontResolver, FontSubstitution, ItemizedRun, ScriptItemizer, ShapedGlyph, ShapedRun};
use layout_core::geometry::Position;
use layout_core::hyphenate::{HyphenationEngine, NoHyphenation};
use text_primitives::Script;

/// One glyph per byte, fixed advance, no ligatures, `glyph_for_codepoint` is the identity cast.
pub struct MonospaceFont {
    pub advance: f32,
}

impl Font for MonospaceFont {
    fn layout(&self, text: &str, _features: &[FontFeature], _variations: &[FontVariation], _script: Script) -> ShapedRun {
        let glyphs = text
            .char_indices()
            .map(|(i, ch)| ShapedGlyph {
                glyph_id: ch as u16,
                position: Position { x_advance: self.advance, ..Position::default() },
                string_index: i,
            })
            .collect();
        ShapedRun { glyphs }
    }
    fn glyph_for_codepoint(&self, c: char) -> Option<u16> {
        Some(c as u16)
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

/// A `FontResolver` that always hands back the same font, regardless of the handle asked for.
pub struct SingleFont(pub MonospaceFont);

impl FontResolver for SingleFont {
    fn resolve(&self, _handle: u32) -> Option<&dyn Font> {
        Some(&self.0)
    }
}

/// A `ScriptItemizer` that calls the entire input Latin.
pub struct WholeStringLatin;

impl ScriptItemizer for WholeStringLatin {
    fn get_runs(&self, text: &str) -> Vec<ItemizedRun<Script>> {
        vec![ItemizedRun { range: 0..text.len(), value: Script::from_str_unchecked("Latn") }]
    }
}

/// A `FontSubstitution` that always picks font handle `0` for the whole input.
pub struct AlwaysFontZero;

impl FontSubstitution for AlwaysFontZero {
    fn get_runs(&self, text: &str, _existing: &[ItemizedRun<Script>]) -> Vec<ItemizedRun<u32>> {
        vec![ItemizedRun { range: 0..text.len(), value: 0 }]
    }
}

/// Splits a word exactly in half (rounding down), for testing the hyphenation-closure invariant
/// without depending on a real dictionary.
pub struct SplitInHalf;

impl HyphenationEngine for SplitInHalf {
    fn hyphenate_word<'a>(&self, token: &'a str) -> Vec<&'a str> {
        if token.len() < 2 {
            return vec![token];
        }
        let mut mid = token.len() / 2;
        while mid > 0 && !token.is_char_boundary(mid) {
            mid -= 1;
        }
        if mid == 0 || mid == token.len() {
            return vec![token];
        }
        vec![&token[..mid], &token[mid..]]
    }
}

/// An `Engines` record over a single 10-unit-wide monospace font, no hyphenation, whole-string
/// Latin itemization and constant font substitution — the default rig most tests build on.
pub fn test_engines() -> Engines<SingleFont, NoHyphenation, WholeStringLatin, AlwaysFontZero, [u8; 4]> {
    Engines::new(SingleFont(MonospaceFont { advance: 10.0 }), NoHyphenation, WholeStringLatin, AlwaysFontZero)
}
