// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document assembly and the shaping pipeline: [`AttributedStringBuilder`] (fragment
//! concatenation) through [`shape_document`], which drives run flattening, paragraph splitting,
//! script/font-substitution overlay, tokenization/hyphenation and shaping plus index
//! reconciliation, in that fixed order. What comes out is, per paragraph, a fully shaped
//! [`crate::glyph::GlyphString`] plus the glyph-space break candidates the line breaker needs —
//! the typesetter takes it from there.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use text_primitives::Script;

use crate::attributes::{Attributes, Brush, ParagraphStyle};
use crate::engines::Engines;
use crate::error::{LayoutError, Result};
use crate::external::{FontResolver, FontSubstitution, ItemizedRun, ScriptItemizer};
use crate::glyph::{build_glyph_run, GlyphString};
use crate::hyphenate::{tokenize, HyphenationEngine};
use crate::linebreak::BreakCandidate;
use crate::paragraph::split_paragraphs;
use crate::runs::{flatten, Run, RunSet};

/// Badness contribution a hyphenation-syllable break carries, relative to a whitespace break's
/// zero penalty.
const HYPHEN_PENALTY: f32 = 5.0;

/// Appends styled text fragments and concatenates them into one `(String, RunSet)` pair,
/// offsetting each fragment's attribute range by the text appended before it: construction from
/// fragments concatenates strings and offsets ranges.
#[derive(Clone, Debug, Default)]
pub struct AttributedStringBuilder<B: Brush, I = ()> {
    text: String,
    runs: Vec<Run<B, I>>,
}

impl<B: Brush, I> AttributedStringBuilder<B, I> {
    /// An empty builder.
    pub fn new() -> Self {
        Self { text: String::new(), runs: Vec::new() }
    }

    /// Appends `text` with `attributes` applied to the whole fragment.
    pub fn push(&mut self, text: &str, attributes: Attributes<B, I>) -> &mut Self {
        let start = self.text.len();
        self.text.push_str(text);
        let end = self.text.len();
        self.runs.push(Run { range: start..end, attributes });
        self
    }

    /// Consumes the builder, returning the concatenated string and its run set.
    pub fn build(self) -> (String, RunSet<B, I>) {
        (self.text, RunSet { runs: self.runs })
    }
}

/// One paragraph's fully shaped content, ready for the typesetter's line-breaking pass.
#[derive(Clone, Debug)]
pub struct ShapedParagraph<B: Brush> {
    /// Byte range of this paragraph within the document string (includes its trailing `\n`, if
    /// any).
    pub range: Range<usize>,
    /// Paragraph style projected from the paragraph's first run.
    pub style: ParagraphStyle,
    /// The paragraph's shaped glyphs.
    pub glyphs: GlyphString<B>,
    /// Legal break points for the line breaker, sorted by `glyph_offset`, always ending in one
    /// `is_forced` candidate at the paragraph's end.
    pub break_candidates: Vec<BreakCandidate>,
}

fn itemized_to_attrs<B: Brush, I: Clone + PartialEq>(
    scripts: &[ItemizedRun<Script>],
    fonts: &[ItemizedRun<u32>],
) -> (RunSet<B, I>, RunSet<B, I>) {
    let script_runs = scripts
        .iter()
        .map(|r| {
            let mut attributes = Attributes::default();
            attributes.script = Some(r.value);
            Run { range: r.range.clone(), attributes }
        })
        .collect();
    let font_runs = fonts
        .iter()
        .map(|r| {
            let mut attributes = Attributes::default();
            attributes.font = Some(r.value);
            Run { range: r.range.clone(), attributes }
        })
        .collect();
    (RunSet { runs: script_runs }, RunSet { runs: font_runs })
}

/// Marks which bytes of `text` are an ASCII space, for [`crate::glyph::GlyphRun::is_space`].
fn space_mask(text: &str) -> Vec<bool> {
    let mut mask = alloc::vec![false; text.len()];
    for (i, ch) in text.char_indices() {
        if ch == ' ' {
            for b in mask.iter_mut().skip(i).take(ch.len_utf8()) {
                *b = true;
            }
        }
    }
    mask
}

/// Runs the full pipeline from a document string and its style runs through to per-paragraph
/// shaped glyphs and break candidates.
pub fn shape_document<B, I, F, H, S, Sub, J, T, D>(
    text: &str,
    style_runs: &RunSet<B, I>,
    engines: &Engines<F, H, S, Sub, B, J, T, D>,
) -> Result<Vec<ShapedParagraph<B>>>
where
    B: Brush,
    I: Clone + PartialEq,
    F: FontResolver,
    H: HyphenationEngine,
    S: ScriptItemizer,
    Sub: FontSubstitution,
{
    let script_runs = engines.script_itemizer.get_runs(text);
    let font_runs = engines.font_substitution.get_runs(text, &script_runs);
    let (script_attrs, font_attrs) = itemized_to_attrs::<B, I>(&script_runs, &font_runs);
    let flattened = flatten(text.len(), &[style_runs.clone(), script_attrs, font_attrs]);

    let mut paragraphs = Vec::new();
    for para_range in split_paragraphs(text) {
        paragraphs.push(shape_paragraph(text, &para_range, &flattened, engines)?);
    }
    Ok(paragraphs)
}

fn shape_paragraph<B, I, F, H, S, Sub, J, T, D>(
    text: &str,
    para_range: &Range<usize>,
    flattened: &RunSet<B, I>,
    engines: &Engines<F, H, S, Sub, B, J, T, D>,
) -> Result<ShapedParagraph<B>>
where
    B: Brush,
    F: FontResolver,
    H: HyphenationEngine,
    S: ScriptItemizer,
    Sub: FontSubstitution,
{
    let mut glyph_cursor = 0usize;
    let mut glyph_runs = Vec::new();
    // (paragraph-local byte offset, penalty, is_hyphen)
    let mut candidate_offsets: Vec<(usize, f32, bool)> = Vec::new();
    let mut first_resolved = None;

    for run in &flattened.runs {
        let lo = para_range.start.max(run.range.start);
        let hi = para_range.end.min(run.range.end);
        if lo >= hi {
            continue;
        }
        let substring = &text[lo..hi];
        let resolved = run.attributes.resolve(None);
        if first_resolved.is_none() {
            first_resolved = Some(resolved.clone());
        }

        let font_handle = resolved.font.ok_or(LayoutError::MissingFont { range: lo..hi })?;
        let font = engines.fonts.resolve(font_handle).ok_or(LayoutError::MissingFont { range: lo..hi })?;
        let script = resolved.script.unwrap_or(Script::UNKNOWN);
        let features = run.attributes.features.as_deref().unwrap_or(&[]);

        let shaped = font.layout(substring, features, &[], script);
        let mut glyphs = Vec::with_capacity(shaped.glyphs.len());
        let mut positions = Vec::with_capacity(shaped.glyphs.len());
        let mut string_indices = Vec::with_capacity(shaped.glyphs.len());
        for g in &shaped.glyphs {
            glyphs.push(g.glyph_id);
            positions.push(g.position);
            string_indices.push(g.string_index);
        }
        if string_indices.windows(2).any(|w| w[0] > w[1]) {
            return Err(LayoutError::ShapingFailed { range: lo..hi, reason: "string_indices not monotone" });
        }

        let char_is_space = space_mask(substring);
        let char_start = lo - para_range.start;
        let attachment_width = run.attributes.attachment.as_ref().map(|a| a.width);

        let glyph_run = build_glyph_run(
            glyph_cursor,
            char_start,
            &char_is_space,
            font,
            resolved,
            attachment_width,
            glyphs,
            positions,
            string_indices,
        );
        glyph_cursor = glyph_run.range.end;
        glyph_runs.push(glyph_run);

        for token in tokenize(substring) {
            let token_start = char_start + token.range.start;
            if token.is_space {
                candidate_offsets.push((char_start + token.range.end, 0.0, false));
            } else {
                let word = &substring[token.range.clone()];
                let syllables = engines.hyphenation.hyphenate_word(word);
                let mut offset = 0usize;
                let last = syllables.len().saturating_sub(1);
                for syllable in syllables.iter().take(last) {
                    offset += syllable.len();
                    candidate_offsets.push((token_start + offset, HYPHEN_PENALTY, true));
                }
            }
        }
    }

    let glyph_string = GlyphString { runs: glyph_runs };
    let total_glyphs = glyph_string.length();
    let mut prefix = alloc::vec![0.0f32; total_glyphs + 1];
    {
        let mut i = 0usize;
        for run in &glyph_string.runs {
            for position in &run.positions {
                i += 1;
                prefix[i] = prefix[i - 1] + position.x_advance;
            }
        }
    }

    let mut break_candidates: Vec<BreakCandidate> = candidate_offsets
        .into_iter()
        .map(|(char_off, penalty, is_hyphen)| {
            let glyph_offset = glyph_string.char_to_glyph(char_off).min(total_glyphs);
            BreakCandidate { glyph_offset, advance_at: prefix[glyph_offset], penalty, is_hyphen, is_forced: false }
        })
        .collect();
    break_candidates.push(BreakCandidate {
        glyph_offset: total_glyphs,
        advance_at: prefix[total_glyphs],
        penalty: 0.0,
        is_hyphen: false,
        is_forced: true,
    });
    break_candidates.sort_by_key(|c| c.glyph_offset);
    break_candidates.dedup_by_key(|c| c.glyph_offset);

    let style = first_resolved.map(|r| ParagraphStyle::from_resolved(&r)).unwrap_or_default();

    Ok(ShapedParagraph { range: para_range.clone(), style, glyphs: glyph_string, break_candidates })
}
