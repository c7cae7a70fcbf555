// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The typesetter: column derivation and the per-paragraph line-fill loop, and line
//! finalization — trim, hang, align, justify, decorate, in that fixed order.
//!
//! Grounded in `parley::layout::Layout`'s line-breaking driver loop, generalized from a
//! single-rect model to a multi-column `Container`. `Typesetter::layout` mirrors a
//! `LayoutContext::layout_into` entry point: one call shapes the whole document and mutates the
//! container's `blocks` in place.

use alloc::vec::Vec;

use text_primitives::Script;

use crate::attributes::{Align, Brush, ParagraphStyle};
use crate::builder::shape_document;
use crate::decorate::DecorationLine;
use crate::engines::{Decorator, Engines, Justifier, Truncator};
use crate::error::Result;
use crate::external::{FontResolver, FontSubstitution, ScriptItemizer};
use crate::geometry::{Position, Rect};
use crate::glyph::{GlyphRun, GlyphString};
use crate::hyphenate::HyphenationEngine;
use crate::justify::{letter_factor, mark_factor, whitespace_factor, GlyphFactor};
use crate::linebreak::break_lines;
use crate::runs::RunSet;

/// Punctuation that may hang past a line's leading edge when `hangingPunctuation` is enabled.
const HANGING_START: [char; 3] = ['(', '[', '\u{201C}'];
/// Punctuation that may hang past a line's trailing edge.
const HANGING_END: [char; 6] = ['.', ',', ';', ':', ')', '\u{201D}'];

/// A single positioned, finalized line within a [`Block`].
#[derive(Clone, Debug, PartialEq)]
pub struct LineFragment<B: Brush> {
    /// The line's box, after trim/hang/align adjustments.
    pub rect: Rect,
    /// The line's (possibly trimmed, possibly truncated) shaped glyphs.
    pub string: GlyphString<B>,
    /// Width trimmed/hung past the rect's leading edge (whitespace or hanging punctuation).
    pub overflow_left: f32,
    /// Width trimmed/hung past the rect's trailing edge.
    pub overflow_right: f32,
    /// Underline/strikethrough geometry for this line.
    pub decoration_lines: Vec<DecorationLine<B>>,
}

impl<B: Brush> LineFragment<B> {
    /// The line's glyph advance width (post-justification).
    pub fn advance_width(&self) -> f32 {
        self.string.advance_width()
    }
}

/// One paragraph's laid-out lines within a single column.
#[derive(Clone, Debug, PartialEq)]
pub struct Block<B: Brush> {
    /// The paragraph's finalized lines, in reading order.
    pub fragments: Vec<LineFragment<B>>,
    /// The paragraph style this block was laid out under.
    pub style: ParagraphStyle,
}

impl<B: Brush> Block<B> {
    /// The union of every fragment's rect, or `None` if the block has no fragments.
    pub fn bbox(&self) -> Option<Rect> {
        let mut bbox = crate::geometry::BBox::new();
        for fragment in &self.fragments {
            bbox.add_rect(fragment.rect);
        }
        bbox.to_rect()
    }

    /// Total vertical extent of the block's rect union.
    pub fn height(&self) -> f32 {
        self.bbox().map_or(0.0, |r| r.height)
    }
}

/// A multi-column flow region: paragraphs are drained into equal columns, left to right, top to
/// bottom within each column.
#[derive(Clone, Debug, PartialEq)]
pub struct Container<B: Brush> {
    /// The container's overall bounding box.
    pub bbox: Rect,
    /// Number of equal columns to split `bbox` into.
    pub columns: u32,
    /// Gap between adjacent columns.
    pub column_gap: f32,
    /// Laid-out blocks, appended in flow order by [`Typesetter::layout`].
    pub blocks: Vec<Block<B>>,
}

impl<B: Brush> Container<B> {
    /// A container with no blocks yet.
    pub fn new(bbox: Rect, columns: u32, column_gap: f32) -> Self {
        Self { bbox, columns: columns.max(1), column_gap, blocks: Vec::new() }
    }

    /// Splits `bbox` into `columns` equal-width rects separated by `column_gap`.
    fn column_rects(&self) -> Vec<Rect> {
        let n = self.columns.max(1);
        let width = ((self.bbox.width - self.column_gap * (n - 1) as f32) / n as f32).max(0.0);
        (0..n)
            .map(|i| Rect::new(self.bbox.x + i as f32 * (width + self.column_gap), self.bbox.y, width, self.bbox.height))
            .collect()
    }
}

/// Derives each glyph's justification factor: whitespace, mark-glued-to-base, or letter, with
/// the line's outer edges zeroed per `justify_line`'s contract.
fn build_glyph_factors<B: Brush>(fonts: &dyn FontResolver, string: &GlyphString<B>) -> Vec<GlyphFactor> {
    let mut factors = Vec::with_capacity(string.length());
    for run in &string.runs {
        let font = run.attributes.font.and_then(|handle| fonts.resolve(handle));
        for (i, &glyph) in run.glyphs.iter().enumerate() {
            let advance = run.positions[i].x_advance;
            let base = letter_factor(advance);
            let factor = if run.is_space[i] {
                whitespace_factor()
            } else if font.is_some_and(|f| f.is_mark_glyph(glyph)) {
                mark_factor(base)
            } else {
                base
            };
            factors.push(factor);
        }
    }
    if let Some(first) = factors.first_mut() {
        first.grow_before = 0.0;
        first.shrink_before = 0.0;
    }
    if let Some(last) = factors.last_mut() {
        last.grow_after = 0.0;
        last.shrink_after = 0.0;
    }
    factors
}

/// Whether `run`'s glyph `glyph_id` renders one of `codepoints`, per its resolved font.
fn is_hanging_glyph<B: Brush>(fonts: &dyn FontResolver, run: &GlyphRun<B>, glyph_id: u16, codepoints: &[char]) -> bool {
    let Some(font) = run.attributes.font.and_then(|handle| fonts.resolve(handle)) else {
        return false;
    };
    codepoints.iter().any(|&c| font.glyph_for_codepoint(c) == Some(glyph_id))
}

/// Trims leading/trailing whitespace glyphs from `string`, returning the trimmed string and the
/// advance width moved into `overflow_left`/`overflow_right` respectively.
fn trim_whitespace<B: Brush>(mut string: GlyphString<B>) -> (GlyphString<B>, f32, f32) {
    let mut overflow_left = 0.0f32;
    let mut overflow_right = 0.0f32;

    while string.length() > 0 {
        let first = &string.runs[0];
        if !first.is_space[0] {
            break;
        }
        overflow_left += first.positions[0].x_advance;
        string = string.slice(1..string.length());
    }
    while string.length() > 0 {
        let last_run = string.runs.last().expect("non-empty string has at least one run");
        let last = last_run.is_space.len() - 1;
        if !last_run.is_space[last] {
            break;
        }
        overflow_right += last_run.positions[last].x_advance;
        let end = string.length() - 1;
        string = string.slice(0..end);
    }

    (string, overflow_left, overflow_right)
}

/// Pushes hanging punctuation past the line's edges when `style.hanging_punctuation` and `align`
/// permit it on that edge.
fn hang_punctuation<B: Brush>(
    mut string: GlyphString<B>,
    fonts: &dyn FontResolver,
    align: Align,
    mut overflow_left: f32,
    mut overflow_right: f32,
) -> (GlyphString<B>, f32, f32) {
    if matches!(align, Align::Left | Align::Justify) && string.length() > 0 {
        let run = &string.runs[0];
        if is_hanging_glyph(fonts, run, run.glyphs[0], &HANGING_START) {
            overflow_left += run.positions[0].x_advance;
            string = string.slice(1..string.length());
        }
    }
    if matches!(align, Align::Right | Align::Justify) && string.length() > 0 {
        let run = string.runs.last().expect("non-empty string has at least one run");
        let idx = run.glyphs.len() - 1;
        if is_hanging_glyph(fonts, run, run.glyphs[idx], &HANGING_END) {
            overflow_right += run.positions[idx].x_advance;
            let end = string.length() - 1;
            string = string.slice(0..end);
        }
    }
    (string, overflow_left, overflow_right)
}

/// Shapes the ellipsis glyph (U+2026) with the line's dominant (first) run's font, or `None` if
/// that run has no resolvable font.
fn ellipsis_glyph_and_advance<B: Brush>(fonts: &dyn FontResolver, string: &GlyphString<B>) -> Option<(u16, f32)> {
    let run = string.runs.first()?;
    let font = run.attributes.font.and_then(|h| fonts.resolve(h))?;
    let glyph = font.glyph_for_codepoint('\u{2026}')?;
    let shaped = font.layout("\u{2026}", &[], &[], Script::UNKNOWN);
    let scale = run.attributes.font_size / font.units_per_em().max(1) as f32;
    let advance = shaped.glyphs.first().map_or(0.0, |g| g.position.x_advance * scale);
    Some((glyph, advance))
}

/// Finalizes one line in a fixed order: truncate, trim, hang, align, justify, decorate.
fn finalize_line<F, H, S, Sub, B, J, T, D>(
    engines: &Engines<F, H, S, Sub, B, J, T, D>,
    mut string: GlyphString<B>,
    style: &ParagraphStyle,
    rect: Rect,
    is_last_fragment: bool,
    is_truncated: bool,
) -> LineFragment<B>
where
    B: Brush,
    F: FontResolver,
    J: Justifier<B>,
    T: Truncator<B>,
    D: Decorator<B>,
{
    let align = if is_last_fragment && !is_truncated { style.align_last_line } else { style.align };

    if is_truncated {
        if let Some(mode) = style.truncation_mode {
            if let Some((glyph, advance)) = ellipsis_glyph_and_advance(&engines.fonts, &string) {
                let attrs = string.runs[0].attributes.clone();
                let metrics = string.runs[0].metrics;
                string = engines.truncator.truncate(&string, mode, rect.width, glyph, advance, attrs, metrics);
            }
        }
    }

    let (trimmed, overflow_left, overflow_right) = trim_whitespace(string);
    let (mut string, overflow_left, overflow_right) =
        if style.hanging_punctuation {
            hang_punctuation(trimmed, &engines.fonts, align, overflow_left, overflow_right)
        } else {
            (trimmed, overflow_left, overflow_right)
        };

    let mut rect = Rect::new(rect.x - overflow_left, rect.y, rect.width + overflow_left + overflow_right, rect.height);
    let advance_width = string.advance_width();
    rect.x += (rect.width - advance_width) * align.offset_factor();

    if align == Align::Justify || advance_width > rect.width {
        let gap = (rect.width - advance_width) * style.justification_factor;
        let factors = build_glyph_factors(&engines.fonts, &string);
        let mut offset = 0usize;
        for run in &mut string.runs {
            let n = run.positions.len();
            engines.justifier.justify(gap, &factors[offset..offset + n], &mut run.positions);
            offset += n;
        }
    }

    let baseline_y = rect.y + string.runs.iter().map(|r| r.metrics.ascent).fold(0.0f32, f32::max);
    let mut decoration_lines = Vec::new();
    let mut run_x = rect.x;
    for run in &string.runs {
        let run_advance: f32 = run.positions.iter().map(|p: &Position| p.x_advance).sum();
        decoration_lines.extend(engines.decorator.decorate(run, run_x, run_advance, baseline_y));
        run_x += run_advance;
    }

    LineFragment { rect, string, overflow_left, overflow_right, decoration_lines }
}

/// Top-level orchestrator: shapes a document and flows it into a [`Container`]'s columns.
pub struct Typesetter<'engines, F, H, S, Sub, B, J, T, D>
where
    B: Brush,
{
    engines: &'engines Engines<F, H, S, Sub, B, J, T, D>,
}

impl<'engines, F, H, S, Sub, B, J, T, D> Typesetter<'engines, F, H, S, Sub, B, J, T, D>
where
    B: Brush,
    F: FontResolver,
    H: HyphenationEngine,
    S: ScriptItemizer,
    Sub: FontSubstitution,
    J: Justifier<B>,
    T: Truncator<B>,
    D: Decorator<B>,
{
    /// Builds a typesetter over the given collaborators.
    pub fn new(engines: &'engines Engines<F, H, S, Sub, B, J, T, D>) -> Self {
        Self { engines }
    }

    /// Shapes `text` under `style_runs` and appends the resulting [`Block`]s to `container`.
    /// Paragraphs that run out of container space beyond the last column stop flowing; their
    /// remaining lines are dropped rather than growing the container.
    pub fn layout<I: Clone + PartialEq>(&self, text: &str, style_runs: &RunSet<B, I>, container: &mut Container<B>) -> Result<()> {
        let paragraphs = shape_document(text, style_runs, self.engines)?;
        let columns = container.column_rects();
        if columns.is_empty() {
            return Ok(());
        }

        let mut column_idx = 0usize;
        let mut cursor_y = columns[0].y;

        for paragraph in paragraphs {
            let style = paragraph.style.clone();
            let total = paragraph.glyphs.length();
            if total == 0 {
                continue;
            }
            if column_idx >= columns.len() {
                break;
            }

            let line_height = paragraph.glyphs.height();
            let available_width =
                (columns[column_idx].width - style.margin_left - style.margin_right - style.indent).max(0.0);
            let lines = break_lines(total, &paragraph.break_candidates, available_width, style.max_lines);

            let mut fragments: Vec<LineFragment<B>> = Vec::new();
            for (line_index, line) in lines.iter().enumerate() {
                while column_idx < columns.len() && cursor_y + line_height > columns[column_idx].max_y() {
                    if !fragments.is_empty() {
                        container.blocks.push(Block { fragments: core::mem::take(&mut fragments), style: style.clone() });
                    }
                    column_idx += 1;
                    cursor_y = columns.get(column_idx).map_or(cursor_y, |c| c.y);
                }
                if column_idx >= columns.len() {
                    break;
                }

                let column = columns[column_idx];
                let indent = if line_index == 0 { style.indent } else { 0.0 };
                let rect = Rect::new(
                    column.x + style.margin_left + indent,
                    cursor_y,
                    (column.width - style.margin_left - style.margin_right - indent).max(0.0),
                    line_height,
                );
                let is_last = line_index + 1 == lines.len();
                let is_truncated = is_last
                    && style.max_lines.is_some_and(|max| lines.len() as u32 >= max)
                    && line.advance_width > available_width;

                let line_string = paragraph.glyphs.slice(line.range.clone());
                let fragment = finalize_line(self.engines, line_string, &style, rect, is_last, is_truncated);
                cursor_y += rect.height + style.line_spacing;
                fragments.push(fragment);
            }

            if !fragments.is_empty() {
                container.blocks.push(Block { fragments, style: style.clone() });
            }
            cursor_y += style.paragraph_spacing;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;
    use crate::builder::AttributedStringBuilder;
    use crate::external::{Font, ItemizedRun, ShapedGlyph, ShapedRun};
    use crate::hyphenate::NoHyphenation;

    struct MonospaceFont {
        advance: f32,
    }

    impl Font for MonospaceFont {
        fn layout(&self, text: &str, _features: &[crate::attributes::FontFeature], _variations: &[crate::attributes::FontVariation], _script: Script) -> ShapedRun {
            let glyphs = text
                .char_indices()
                .map(|(i, ch)| ShapedGlyph { glyph_id: ch as u16, position: Position { x_advance: self.advance, ..Position::default() }, string_index: i })
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

    struct SingleFont(MonospaceFont);
    impl FontResolver for SingleFont {
        fn resolve(&self, _handle: u32) -> Option<&dyn Font> {
            Some(&self.0)
        }
    }
    struct WholeStringLatin;
    impl ScriptItemizer for WholeStringLatin {
        fn get_runs(&self, text: &str) -> Vec<ItemizedRun<Script>> {
            alloc::vec![ItemizedRun { range: 0..text.len(), value: Script::from_str_unchecked("Latn") }]
        }
    }
    struct AlwaysFontZero;
    impl FontSubstitution for AlwaysFontZero {
        fn get_runs(&self, text: &str, _existing: &[ItemizedRun<Script>]) -> Vec<ItemizedRun<u32>> {
            alloc::vec![ItemizedRun { range: 0..text.len(), value: 0 }]
        }
    }

    fn test_engines() -> Engines<SingleFont, NoHyphenation, WholeStringLatin, AlwaysFontZero, [u8; 4]> {
        Engines::new(SingleFont(MonospaceFont { advance: 10.0 }), NoHyphenation, WholeStringLatin, AlwaysFontZero)
    }

    #[test]
    fn column_rects_split_width_evenly_with_gaps() {
        let container = Container::<[u8; 4]>::new(Rect::new(0.0, 0.0, 210.0, 100.0), 2, 10.0);
        let columns = container.column_rects();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0], Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(columns[1], Rect::new(110.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn layout_places_a_single_short_paragraph_in_one_block() {
        let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
        builder.push("Lorem", Attributes::default());
        let (text, runs) = builder.build();
        let engines = test_engines();
        let typesetter = Typesetter::new(&engines);
        let mut container = Container::new(Rect::new(0.0, 0.0, 500.0, 500.0), 1, 0.0);
        typesetter.layout(&text, &runs, &mut container).unwrap();

        assert_eq!(container.blocks.len(), 1);
        let block = &container.blocks[0];
        assert_eq!(block.fragments.len(), 1);
        assert_eq!(block.fragments[0].string.length(), 5);
    }

    #[test]
    fn layout_wraps_across_lines_when_narrower_than_the_text() {
        let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
        builder.push("Lorem ipsum dolor", Attributes::default());
        let (text, runs) = builder.build();
        let engines = test_engines();
        let typesetter = Typesetter::new(&engines);
        // Each glyph is 10 wide; fit about one word per line.
        let mut container = Container::new(Rect::new(0.0, 0.0, 60.0, 500.0), 1, 0.0);
        typesetter.layout(&text, &runs, &mut container).unwrap();

        let block = &container.blocks[0];
        assert!(block.fragments.len() > 1);
    }

    #[test]
    fn trim_whitespace_moves_leading_and_trailing_space_into_overflow() {
        let attrs = Attributes::<[u8; 4]>::default().resolve(None);
        let metrics = crate::metrics::GlyphRunMetrics::default();
        let glyphs = alloc::vec![b' ' as u16, b'x' as u16, b' ' as u16];
        let positions = alloc::vec![
            Position { x_advance: 4.0, ..Position::default() },
            Position { x_advance: 10.0, ..Position::default() },
            Position { x_advance: 4.0, ..Position::default() },
        ];
        let string = GlyphString {
            runs: alloc::vec![GlyphRun {
                range: 0..3,
                char_range: 0..3,
                attributes: attrs,
                metrics,
                glyphs,
                positions,
                string_indices: alloc::vec![0, 1, 2],
                glyph_indices: alloc::vec![0, 1, 2],
                is_space: alloc::vec![true, false, true],
            }],
        };
        let (trimmed, overflow_left, overflow_right) = trim_whitespace(string);
        assert_eq!(trimmed.length(), 1);
        assert_eq!(overflow_left, 4.0);
        assert_eq!(overflow_right, 4.0);
    }

    #[test]
    fn block_bbox_unions_fragment_rects() {
        let block = Block::<[u8; 4]> {
            fragments: alloc::vec![
                LineFragment {
                    rect: Rect::new(0.0, 0.0, 50.0, 10.0),
                    string: GlyphString::default(),
                    overflow_left: 0.0,
                    overflow_right: 0.0,
                    decoration_lines: Vec::new(),
                },
                LineFragment {
                    rect: Rect::new(0.0, 10.0, 40.0, 10.0),
                    string: GlyphString::default(),
                    overflow_left: 0.0,
                    overflow_right: 0.0,
                    decoration_lines: Vec::new(),
                },
            ],
            style: ParagraphStyle::default(),
        };
        let bbox = block.bbox().unwrap();
        assert_eq!(bbox, Rect::new(0.0, 0.0, 50.0, 20.0));
        assert_eq!(block.height(), 20.0);
    }
}
