// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! External collaborator interfaces.
//!
//! Font-file parsing and shaping, the bidi algorithm proper, script itemization and font
//! fallback are out of scope for this crate; it consumes them through these narrow traits.
//! Implementations live in the embedding application (backed by `skrifa`/`harfrust`/`icu_*` or
//! equivalents), not here.

use alloc::vec::Vec;
use core::ops::Range;

use text_primitives::Script;

use crate::attributes::{FontFeature, FontHandle, FontVariation};
use crate::geometry::Position;

/// One glyph returned from a shaping call, before index reconciliation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    /// The glyph id, meaningful only to the font that produced it.
    pub glyph_id: u16,
    /// Position of this glyph, in font units.
    pub position: Position,
    /// Byte offset into the shaped substring that produced this glyph (cluster start).
    pub string_index: usize,
}

/// The result of shaping one run's substring.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedRun {
    /// Glyphs in visual (shaping) order.
    pub glyphs: Vec<ShapedGlyph>,
}

/// A font, as seen by the layout engine: a shaping oracle plus the metrics needed for line
/// height, decoration geometry and attachment sizing.
pub trait Font {
    /// Shapes `text` with the given OpenType feature and variation settings, for `script`.
    fn layout(&self, text: &str, features: &[FontFeature], variations: &[FontVariation], script: Script) -> ShapedRun;

    /// Returns the glyph id for a single Unicode scalar value, if the font maps it directly
    /// (used to resolve the attachment object-replacement glyph and truncation's ellipsis glyph).
    fn glyph_for_codepoint(&self, codepoint: char) -> Option<u16>;

    /// The font's design-space units per em, used to scale font-unit quantities by `font_size`.
    fn units_per_em(&self) -> u16;

    /// Whether glyph `id` is a combining mark (used to zero its justification factor's
    /// leading edge so marks glue to their base glyph).
    fn is_mark_glyph(&self, id: u16) -> bool;

    /// Ascent, in font units.
    fn ascent(&self) -> f32;
    /// Descent (positive, below baseline), in font units.
    fn descent(&self) -> f32;
    /// Recommended line gap, in font units.
    fn leading(&self) -> f32;
    /// Underline offset from baseline, in font units (typically negative).
    fn underline_position(&self) -> f32;
    /// Underline stroke thickness, in font units.
    fn underline_thickness(&self) -> f32;
    /// Strikethrough offset from baseline, in font units.
    fn strikeout_position(&self) -> f32;
    /// Strikethrough stroke thickness, in font units.
    fn strikeout_thickness(&self) -> f32;

    /// Whether this font carries a bitmap color table (`sbix`).
    fn has_sbix(&self) -> bool {
        false
    }
    /// Whether this font carries a vector color table (`COLR`/`CPAL`).
    fn has_colr(&self) -> bool {
        false
    }
}

/// A run produced by an external itemizer: a byte range plus the single attribute it assigns.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemizedRun<T> {
    /// Byte range this run covers.
    pub range: Range<usize>,
    /// The attribute assigned to this range.
    pub value: T,
}

/// Partitions a string into script runs covering `[0, len)` exactly.
pub trait ScriptItemizer {
    /// Returns script runs covering the whole of `text`.
    fn get_runs(&self, text: &str) -> Vec<ItemizedRun<Script>>;
}

/// Chooses a concrete font per character subrange from a caller-specified cascade.
pub trait FontSubstitution {
    /// Returns font runs covering the whole of `text`, consistent with `existing` runs (e.g.
    /// script runs) that may further subdivide the cascade's choice.
    fn get_runs(&self, text: &str, existing: &[ItemizedRun<Script>]) -> Vec<ItemizedRun<u32>>;
}

/// Resolves the opaque [`FontHandle`]s carried by [`crate::attributes::Attributes`] to the
/// concrete [`Font`] oracle instances the font-substitution engine chose.
///
/// The engine borrows fonts, never owns them: resolved references must outlive the
/// [`crate::typeset::Block`] tree produced by the call that borrowed them.
pub trait FontResolver {
    /// Looks up `handle`, or `None` if it does not name a font this resolver knows about
    /// (surfaced by the caller as [`crate::LayoutError::MissingFont`]).
    fn resolve(&self, handle: FontHandle) -> Option<&dyn Font>;
}
