// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed, typed attribute record that replaces an open-ended style property bag.
//!
//! Every field a run can carry is named here; "unspecified" is represented per-field by
//! `Option::None` rather than by the absence of a key in a map. [`Attributes::resolve`]
//! implements the style defaulter (fills every field with the value inherited from a parent
//! run, or the hard-coded default if the field was never set anywhere).

use text_primitives::{Script, Setting};

/// A paint-like value used for glyph fills, strokes and decoration lines.
///
/// Kept generic so this crate stays agnostic to whatever color representation the embedding
/// renderer uses, the same way a shaping/layout library stays generic over its paint type.
pub trait Brush: Clone + PartialEq + core::fmt::Debug + Default {}

impl Brush for () {}
impl Brush for [u8; 4] {}
impl Brush for [u8; 3] {}

#[cfg(feature = "peniko")]
impl Brush for peniko::Color {}

/// An OpenType feature setting (tag + on/off or alternate index).
pub type FontFeature = Setting<u16>;
/// An OpenType variation-axis setting (tag + value).
pub type FontVariation = Setting<f32>;

/// Decoration line style.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum DecorationStyle {
    /// A single solid line.
    #[default]
    Solid,
    /// Two parallel solid lines.
    Double,
    /// A dashed line.
    Dashed,
    /// A dotted line.
    Dotted,
    /// A sinusoidal line.
    Wavy,
}

/// A line decoration (underline or strikethrough) over a run.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Decoration<B: Brush> {
    /// Whether the decoration is drawn.
    pub enabled: bool,
    /// Decoration color; falls back to the run's text color, then black, when unset.
    pub color: Option<B>,
    /// Decoration line style.
    pub style: DecorationStyle,
}

/// Horizontal alignment of a line within its container rect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum Align {
    /// Flush with the line rect's start edge.
    #[default]
    Left,
    /// Centered within the line rect.
    Center,
    /// Flush with the line rect's end edge.
    Right,
    /// Distribute slack across justifiable glyphs to fill the line rect exactly.
    Justify,
}

impl Align {
    /// The fraction of leftover width (`rect.width - advance_width`) added to `rect.x`.
    pub fn offset_factor(self) -> f32 {
        match self {
            Self::Left | Self::Justify => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// How the last line of a truncated paragraph is clipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum TruncationMode {
    /// Elide the start of the line.
    Head,
    /// Elide the middle of the line.
    Middle,
    /// Elide the end of the line.
    Tail,
}

/// An inline object (e.g. an image) replacing a single U+FFFC object-replacement character.
#[derive(Clone, Debug, PartialEq)]
pub struct Attachment<I> {
    /// Advance width reserved for the attachment, in font units.
    pub width: f32,
    /// Height of the attachment, in font units.
    pub height: f32,
    /// Caller-defined image handle.
    pub image: I,
    /// Horizontal offset from the glyph origin.
    pub x_offset: f32,
    /// Vertical offset from the glyph origin.
    pub y_offset: f32,
}

/// A font handle. Opaque to this crate; interpreted only by the injected [`crate::external::Font`]
/// oracle.
pub type FontHandle = u32;

/// The full set of per-character style properties a run can carry.
///
/// Every field is optional: `None` means "inherit from the base style, or use the hard default."
/// `resolve` (the style defaulter) turns a sparse `Attributes` into fully-populated values.
#[derive(Clone, Debug, PartialEq)]
pub struct Attributes<B: Brush, I = ()> {
    /// Text fill/decoration color.
    pub color: Option<B>,
    /// Background highlight color.
    pub background_color: Option<B>,
    /// Font to shape with.
    pub font: Option<FontHandle>,
    /// Font size in layout units. Defaults to 12.0.
    pub font_size: Option<f32>,
    /// Line height override. `None` derives it from font metrics.
    pub line_height: Option<f32>,
    /// Underline decoration.
    pub underline: Option<Decoration<B>>,
    /// Strikethrough decoration.
    pub strike: Option<Decoration<B>>,
    /// Hyperlink target, if this run is a link.
    pub link: Option<alloc::string::String>,
    /// Whether glyphs are filled. Defaults to `true`.
    pub fill: Option<bool>,
    /// Whether glyphs are stroked.
    pub stroke: Option<bool>,
    /// OpenType feature settings, applied in order.
    pub features: Option<alloc::vec::Vec<FontFeature>>,
    /// Extra space added after each word-separating glyph, in layout units.
    pub word_spacing: Option<f32>,
    /// Baseline shift, as a fraction of the em.
    pub y_offset: Option<f32>,
    /// Extra space added after every glyph, in layout units.
    pub character_spacing: Option<f32>,
    /// Inline attachment replacing a U+FFFC glyph in this run.
    pub attachment: Option<Attachment<I>>,
    /// Unicode script of this run, if known ahead of itemization.
    pub script: Option<Script>,
    /// Explicit bidi embedding level, if known ahead of the bidi pass.
    pub bidi_level: Option<u8>,
    /// Paragraph alignment (paragraph-level; repeated here for per-run overlay).
    pub align: Option<Align>,
    /// Alignment used for a paragraph's final line specifically.
    pub align_last_line: Option<Align>,
    /// Paragraph-only style, pulled out into [`ParagraphStyle`] from the paragraph's first run.
    pub margin_left: Option<f32>,
    /// See [`Self::margin_left`].
    pub margin_right: Option<f32>,
    /// First-line indent.
    pub indent: Option<f32>,
    /// Maximum number of lines before truncation.
    pub max_lines: Option<u32>,
    /// Extra space between lines within the paragraph.
    pub line_spacing: Option<f32>,
    /// Extra space after the paragraph.
    pub paragraph_spacing: Option<f32>,
    /// Whether hanging punctuation is enabled.
    pub hanging_punctuation: Option<bool>,
    /// How to elide overflow on a truncated last line.
    pub truncation_mode: Option<TruncationMode>,
    /// Multiplier applied to the computed justification gap before distribution.
    pub justification_factor: Option<f32>,
}

impl<B: Brush, I> Default for Attributes<B, I> {
    fn default() -> Self {
        Self {
            color: None,
            background_color: None,
            font: None,
            font_size: None,
            line_height: None,
            underline: None,
            strike: None,
            link: None,
            fill: None,
            stroke: None,
            features: None,
            word_spacing: None,
            y_offset: None,
            character_spacing: None,
            attachment: None,
            script: None,
            bidi_level: None,
            align: None,
            align_last_line: None,
            margin_left: None,
            margin_right: None,
            indent: None,
            max_lines: None,
            line_spacing: None,
            paragraph_spacing: None,
            hanging_punctuation: None,
            truncation_mode: None,
            justification_factor: None,
        }
    }
}

impl<B: Brush, I> Attributes<B, I> {
    /// Overlays `other`'s populated fields on top of `self`'s, as when a later run-set source
    /// overrides an earlier one (later source wins per populated field).
    pub fn overlay(&mut self, other: &Self) {
        macro_rules! take {
            ($field:ident) => {
                if other.$field.is_some() {
                    self.$field = other.$field.clone();
                }
            };
        }
        take!(color);
        take!(background_color);
        take!(font);
        take!(font_size);
        take!(line_height);
        take!(underline);
        take!(strike);
        take!(link);
        take!(fill);
        take!(stroke);
        take!(features);
        take!(word_spacing);
        take!(y_offset);
        take!(character_spacing);
        take!(script);
        take!(bidi_level);
        take!(align);
        take!(align_last_line);
        take!(margin_left);
        take!(margin_right);
        take!(indent);
        take!(max_lines);
        take!(line_spacing);
        take!(paragraph_spacing);
        take!(hanging_punctuation);
        take!(truncation_mode);
        take!(justification_factor);
        // `attachment` holds a non-`Clone` image handle placeholder; overlay by replacement only.
        if other.attachment.is_some() {
            self.attachment = other.attachment.clone();
        }
    }

    /// Fills every unset field with its hard default, optionally inheriting from `base` first.
    pub fn resolve(&self, base: Option<&Self>) -> ResolvedAttributes<B> {
        let color = self
            .color
            .clone()
            .or_else(|| base.and_then(|b| b.color.clone()))
            .unwrap_or_default();
        let underline_color = self
            .underline
            .as_ref()
            .and_then(|u| u.color.clone())
            .or_else(|| self.color.clone())
            .unwrap_or_else(|| color.clone());
        let strike_color = self
            .strike
            .as_ref()
            .and_then(|s| s.color.clone())
            .or_else(|| self.color.clone())
            .unwrap_or_else(|| color.clone());
        ResolvedAttributes {
            color: color.clone(),
            background_color: self
                .background_color
                .clone()
                .or_else(|| base.and_then(|b| b.background_color.clone())),
            font: self.font.or_else(|| base.and_then(|b| b.font)),
            font_size: self
                .font_size
                .or_else(|| base.and_then(|b| b.font_size))
                .unwrap_or(12.0),
            line_height: self.line_height.or_else(|| base.and_then(|b| b.line_height)),
            underline_enabled: self
                .underline
                .as_ref()
                .map(|u| u.enabled)
                .or_else(|| base.and_then(|b| b.underline.as_ref().map(|u| u.enabled)))
                .unwrap_or(false),
            underline_color,
            underline_style: self
                .underline
                .as_ref()
                .map(|u| u.style)
                .or_else(|| base.and_then(|b| b.underline.as_ref().map(|u| u.style)))
                .unwrap_or_default(),
            strike_enabled: self
                .strike
                .as_ref()
                .map(|s| s.enabled)
                .or_else(|| base.and_then(|b| b.strike.as_ref().map(|s| s.enabled)))
                .unwrap_or(false),
            strike_color,
            strike_style: self
                .strike
                .as_ref()
                .map(|s| s.style)
                .or_else(|| base.and_then(|b| b.strike.as_ref().map(|s| s.style)))
                .unwrap_or_default(),
            link: self.link.clone().or_else(|| base.and_then(|b| b.link.clone())),
            fill: self.fill.or_else(|| base.and_then(|b| b.fill)).unwrap_or(true),
            stroke: self.stroke.or_else(|| base.and_then(|b| b.stroke)).unwrap_or(false),
            word_spacing: self
                .word_spacing
                .or_else(|| base.and_then(|b| b.word_spacing))
                .unwrap_or(0.0),
            y_offset: self.y_offset.or_else(|| base.and_then(|b| b.y_offset)).unwrap_or(0.0),
            character_spacing: self
                .character_spacing
                .or_else(|| base.and_then(|b| b.character_spacing))
                .unwrap_or(0.0),
            script: self.script.or_else(|| base.and_then(|b| b.script)),
            bidi_level: self.bidi_level.or_else(|| base.and_then(|b| b.bidi_level)),
            align: self.align.or_else(|| base.and_then(|b| b.align)).unwrap_or_default(),
            align_last_line: self
                .align_last_line
                .or_else(|| base.and_then(|b| b.align_last_line))
                .unwrap_or_default(),
            margin_left: self.margin_left.or_else(|| base.and_then(|b| b.margin_left)).unwrap_or(0.0),
            margin_right: self.margin_right.or_else(|| base.and_then(|b| b.margin_right)).unwrap_or(0.0),
            indent: self.indent.or_else(|| base.and_then(|b| b.indent)).unwrap_or(0.0),
            max_lines: self.max_lines.or_else(|| base.and_then(|b| b.max_lines)),
            line_spacing: self.line_spacing.or_else(|| base.and_then(|b| b.line_spacing)).unwrap_or(0.0),
            paragraph_spacing: self
                .paragraph_spacing
                .or_else(|| base.and_then(|b| b.paragraph_spacing))
                .unwrap_or(0.0),
            hanging_punctuation: self
                .hanging_punctuation
                .or_else(|| base.and_then(|b| b.hanging_punctuation))
                .unwrap_or(false),
            truncation_mode: self.truncation_mode.or_else(|| base.and_then(|b| b.truncation_mode)),
            justification_factor: self
                .justification_factor
                .or_else(|| base.and_then(|b| b.justification_factor))
                .unwrap_or(1.0),
        }
    }
}

/// A fully-resolved, defaulted view of [`Attributes`]: every field that has a hard default is
/// populated; fields with no meaningful default (background color, font, link…) stay `Option`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedAttributes<B: Brush> {
    /// Text color.
    pub color: B,
    /// Background highlight color.
    pub background_color: Option<B>,
    /// Resolved font handle.
    pub font: Option<FontHandle>,
    /// Font size in layout units.
    pub font_size: f32,
    /// Explicit line height, if set.
    pub line_height: Option<f32>,
    /// Whether an underline is drawn.
    pub underline_enabled: bool,
    /// Underline color.
    pub underline_color: B,
    /// Underline style.
    pub underline_style: DecorationStyle,
    /// Whether a strikethrough is drawn.
    pub strike_enabled: bool,
    /// Strikethrough color.
    pub strike_color: B,
    /// Strikethrough style.
    pub strike_style: DecorationStyle,
    /// Hyperlink target.
    pub link: Option<alloc::string::String>,
    /// Whether glyphs are filled.
    pub fill: bool,
    /// Whether glyphs are stroked.
    pub stroke: bool,
    /// Extra space after word-separating glyphs.
    pub word_spacing: f32,
    /// Baseline shift, as a fraction of the em.
    pub y_offset: f32,
    /// Extra space after every glyph.
    pub character_spacing: f32,
    /// Run script, if known.
    pub script: Option<Script>,
    /// Explicit bidi level, if known.
    pub bidi_level: Option<u8>,
    /// Paragraph alignment.
    pub align: Align,
    /// Alignment for a paragraph's final line.
    pub align_last_line: Align,
    /// Left margin in layout units.
    pub margin_left: f32,
    /// Right margin in layout units.
    pub margin_right: f32,
    /// First-line indent in layout units.
    pub indent: f32,
    /// Maximum number of lines before truncation, or `None` for unbounded.
    pub max_lines: Option<u32>,
    /// Extra space between lines within the paragraph.
    pub line_spacing: f32,
    /// Extra space after the paragraph.
    pub paragraph_spacing: f32,
    /// Whether hanging punctuation is enabled.
    pub hanging_punctuation: bool,
    /// How to elide overflow on a truncated last line.
    pub truncation_mode: Option<TruncationMode>,
    /// Multiplier applied to the computed justification gap before distribution.
    pub justification_factor: f32,
}

/// Paragraph-level style, projected once per paragraph from its first run's attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    /// Left margin in layout units.
    pub margin_left: f32,
    /// Right margin in layout units.
    pub margin_right: f32,
    /// First-line indent in layout units.
    pub indent: f32,
    /// Maximum number of lines before truncation, or `None` for unbounded.
    pub max_lines: Option<u32>,
    /// Extra space between lines within the paragraph.
    pub line_spacing: f32,
    /// Extra space after the paragraph.
    pub paragraph_spacing: f32,
    /// Whether hanging punctuation is enabled.
    pub hanging_punctuation: bool,
    /// How to elide overflow on a truncated last line.
    pub truncation_mode: Option<TruncationMode>,
    /// Multiplier applied to the computed justification gap before distribution (1.0 = full).
    pub justification_factor: f32,
    /// Horizontal alignment for all lines but the last.
    pub align: Align,
    /// Horizontal alignment for the paragraph's final line.
    pub align_last_line: Align,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            margin_left: 0.0,
            margin_right: 0.0,
            indent: 0.0,
            max_lines: None,
            line_spacing: 0.0,
            paragraph_spacing: 0.0,
            hanging_punctuation: false,
            truncation_mode: None,
            justification_factor: 1.0,
            align: Align::Left,
            align_last_line: Align::Left,
        }
    }
}

impl ParagraphStyle {
    /// Projects a paragraph style from a run's resolved attributes, computed once from the
    /// paragraph's first run.
    pub fn from_resolved<B: Brush>(resolved: &ResolvedAttributes<B>) -> Self {
        Self {
            align: resolved.align,
            align_last_line: resolved.align_last_line,
            margin_left: resolved.margin_left,
            margin_right: resolved.margin_right,
            indent: resolved.indent,
            max_lines: resolved.max_lines,
            line_spacing: resolved.line_spacing,
            paragraph_spacing: resolved.paragraph_spacing,
            hanging_punctuation: resolved.hanging_punctuation,
            truncation_mode: resolved.truncation_mode,
            justification_factor: resolved.justification_factor,
        }
    }
}
