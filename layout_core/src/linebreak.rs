// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The line breaker: a best-fit state machine over whitespace, syllable and forced break
//! candidates.
//!
//! Grounded in `parley`'s greedy line breaker (`layout::line::greedy::BreakLines`), which tracks
//! the last legal break point and reverts to it on overflow. This breaker generalizes that
//! revert mechanism: instead of committing to the first legal break once the line overflows, it
//! scores every candidate seen since the last commit by badness (gap² plus a per-break penalty)
//! and commits at the best-scoring one.

use alloc::vec::Vec;
use core::ops::Range;

/// Why a line ended where it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum BreakReason {
    /// The paragraph ended before any break was needed.
    None,
    /// A whitespace boundary was chosen.
    Whitespace,
    /// A hyphenation syllable boundary was chosen.
    Hyphen,
    /// A `\n` forced the break.
    Forced,
    /// No legal break fit; the line is overfull (a single cluster wider than the column).
    Emergency,
}

/// A candidate point the breaker may end a line at.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakCandidate {
    /// Glyph-space offset of the candidate (the break occurs *before* this glyph).
    pub glyph_offset: usize,
    /// Cumulative line advance width if the line ends exactly here.
    pub advance_at: f32,
    /// Badness contribution for choosing this candidate irrespective of fit (hyphenation
    /// penalty; zero for whitespace, infinite-like for forced breaks so they're always taken).
    pub penalty: f32,
    /// Whether taking this candidate means the line ends mid-word via hyphenation.
    pub is_hyphen: bool,
    /// Whether this candidate is a mandatory (`\n`) break.
    pub is_forced: bool,
}

/// One emitted line: the glyph range it covers and why it ended there.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    /// Glyph-space `[start, end)` covered by this line.
    pub range: Range<usize>,
    /// Total advance width of the glyphs in this line, pre-justification.
    pub advance_width: f32,
    /// Why the line ended where it did.
    pub reason: BreakReason,
    /// Whether the line ends on a hyphenation syllable break (for the consecutive-hyphen
    /// penalty applied to the *next* line's scoring).
    pub ends_with_hyphen: bool,
}

/// Badness of committing a line of `advance` against `available_width`, combining normalized
/// gap² with the candidate's own penalty and an extra penalty for two consecutive hyphenated
/// lines.
fn badness(advance: f32, available_width: f32, candidate_penalty: f32, previous_was_hyphen: bool, is_hyphen: bool) -> f32 {
    let gap = available_width - advance;
    let normalized = if available_width > 0.0 { gap / available_width } else { gap };
    let consecutive_hyphen_penalty = if previous_was_hyphen && is_hyphen { 50.0 } else { 0.0 };
    normalized * normalized + candidate_penalty + consecutive_hyphen_penalty
}

/// Chooses line breaks for one paragraph's candidates against `available_width`.
///
/// `candidates` must be sorted by `glyph_offset` and include a final candidate at the
/// paragraph's end (forced, so the last line is always emitted). Returns lines whose
/// concatenation (by glyph range) is exactly `[0, total_glyphs)` — the line-union invariant.
pub fn break_lines(total_glyphs: usize, candidates: &[BreakCandidate], available_width: f32, max_lines: Option<u32>) -> Vec<Line> {
    if total_glyphs == 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut line_start_glyph = 0usize;
    let mut line_start_advance = 0.0f32;
    let mut previous_ended_hyphen = false;

    let mut i = 0usize;
    while i < candidates.len() {
        if let Some(max) = max_lines {
            if lines.len() as u32 + 1 >= max {
                // Last allowed line: take everything remaining in one shot (truncation, if
                // needed, happens downstream in the truncation pass).
                let last = candidates.last().copied().unwrap_or(BreakCandidate {
                    glyph_offset: total_glyphs,
                    advance_at: 0.0,
                    penalty: 0.0,
                    is_hyphen: false,
                    is_forced: true,
                });
                lines.push(Line {
                    range: line_start_glyph..total_glyphs,
                    advance_width: last.advance_at - line_start_advance,
                    reason: BreakReason::Forced,
                    ends_with_hyphen: false,
                });
                return lines;
            }
        }

        // Collect every candidate reachable (without overflowing) from the current line start;
        // stop at the first candidate that overflows or is a forced break, whichever comes
        // first — overflow is checked ahead of the forced flag, so a paragraph-ending break
        // that would itself overflow does not get taken in place of an earlier legal fit.
        let mut best: Option<(usize, f32)> = None; // (candidate index, badness)
        let mut j = i;
        while j < candidates.len() {
            let candidate = candidates[j];
            let advance = candidate.advance_at - line_start_advance;
            if advance > available_width {
                if best.is_none() && j == i {
                    // Not even the first candidate fits: emergency break here anyway, a single
                    // overfull cluster occupies its own line rather than vanishing.
                    best = Some((j, 0.0));
                }
                break;
            }
            if candidate.is_forced {
                best = Some((j, f32::NEG_INFINITY));
                break;
            }
            let score = badness(advance, available_width, candidate.penalty, previous_ended_hyphen, candidate.is_hyphen);
            if best.map(|(_, b)| score < b).unwrap_or(true) {
                best = Some((j, score));
            }
            j += 1;
        }

        let (chosen_index, _) = match best {
            Some(chosen) => chosen,
            None => {
                // No candidates left at all; the remainder becomes one final (possibly
                // overfull) line.
                lines.push(Line {
                    range: line_start_glyph..total_glyphs,
                    advance_width: 0.0,
                    reason: BreakReason::Emergency,
                    ends_with_hyphen: false,
                });
                return lines;
            }
        };
        let chosen = candidates[chosen_index];
        let chosen_advance = chosen.advance_at - line_start_advance;
        let reason = if chosen_advance > available_width {
            BreakReason::Emergency
        } else if chosen.is_forced {
            BreakReason::Forced
        } else if chosen.is_hyphen {
            BreakReason::Hyphen
        } else {
            BreakReason::Whitespace
        };
        lines.push(Line {
            range: line_start_glyph..chosen.glyph_offset,
            advance_width: chosen.advance_at - line_start_advance,
            reason,
            ends_with_hyphen: chosen.is_hyphen,
        });
        previous_ended_hyphen = chosen.is_hyphen;
        line_start_glyph = chosen.glyph_offset;
        line_start_advance = chosen.advance_at;
        i = chosen_index + 1;

        if line_start_glyph >= total_glyphs {
            break;
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitespace(glyph_offset: usize, advance_at: f32) -> BreakCandidate {
        BreakCandidate { glyph_offset, advance_at, penalty: 0.0, is_hyphen: false, is_forced: false }
    }

    fn forced(glyph_offset: usize, advance_at: f32) -> BreakCandidate {
        BreakCandidate { glyph_offset, advance_at, penalty: 0.0, is_hyphen: false, is_forced: true }
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(break_lines(0, &[], 100.0, None).is_empty());
    }

    #[test]
    fn single_paragraph_no_break_needed() {
        let candidates = alloc::vec![forced(5, 40.0)];
        let lines = break_lines(5, &candidates, 1000.0, None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].range, 0..5);
        assert_eq!(lines[0].reason, BreakReason::Forced);
    }

    #[test]
    fn wraps_at_whitespace_when_overflowing() {
        // Two words of 5 glyphs each separated by one whitespace glyph; width fits one word.
        let candidates = alloc::vec![whitespace(5, 50.0), forced(11, 110.0)];
        let lines = break_lines(11, &candidates, 60.0, None);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].range, 0..5);
        assert_eq!(lines[1].range, 5..11);
    }

    #[test]
    fn line_union_covers_whole_input() {
        let candidates = alloc::vec![whitespace(5, 50.0), whitespace(11, 110.0), forced(20, 200.0)];
        let lines = break_lines(20, &candidates, 60.0, None);
        let mut cursor = 0;
        for line in &lines {
            assert_eq!(line.range.start, cursor);
            cursor = line.range.end;
        }
        assert_eq!(cursor, 20);
    }

    #[test]
    fn overfull_single_word_gets_its_own_line() {
        // A single word wider than the column: one candidate only, at the paragraph end, whose
        // advance exceeds available width. It still must occupy a line rather than vanish.
        let candidates = alloc::vec![forced(8, 500.0)];
        let lines = break_lines(8, &candidates, 60.0, None);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].range, 0..8);
    }

    #[test]
    fn max_lines_forces_remaining_content_onto_last_line() {
        let candidates = alloc::vec![whitespace(5, 50.0), whitespace(11, 110.0), whitespace(17, 170.0), forced(23, 230.0)];
        let lines = break_lines(23, &candidates, 60.0, Some(2));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].range.end, 23);
    }
}
