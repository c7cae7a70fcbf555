// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The justification engine: a priority/factor model for distributing a line's horizontal
//! slack across its glyphs.
//!
//! No corpus precedent was found for this exact four-class priority model (see `DESIGN.md`).
//! The general "compute a gap, then distribute it in priority order" outer shape echoes the
//! ratio-based stretch/shrink justification found in `other_examples`'s typst inline-line code,
//! but the discrete KASHIDA/WHITESPACE/LETTER/NULL priority classes and the per-priority
//! scale-assignment loop below have no corpus analogue.

use core::cmp::Ordering;

use crate::geometry::Position;

/// Justification priority class, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[non_exhaustive]
pub enum Priority {
    /// Kashida (Arabic elongation) insertion points.
    Kashida,
    /// Inter-word whitespace.
    Whitespace,
    /// Inter-letter spacing.
    Letter,
    /// Not stretchable/shrinkable at all.
    Null,
}

/// Per-glyph stretch/shrink factor.
///
/// Grow and shrink amounts are tracked separately (and always non-negative) because they aren't
/// generally equal magnitudes — a letter's shrink budget is smaller than its grow budget, for
/// instance. [`justify_line`] picks whichever pair matches the line's distribution direction and
/// applies it with that direction's sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphFactor {
    /// How much this glyph's leading edge may grow, in layout units.
    pub grow_before: f32,
    /// How much this glyph's trailing edge may grow.
    pub grow_after: f32,
    /// How much this glyph's leading edge may shrink, in layout units (a magnitude, not signed).
    pub shrink_before: f32,
    /// How much this glyph's trailing edge may shrink.
    pub shrink_after: f32,
    /// Priority class this glyph participates in.
    pub priority: Priority,
    /// Whether this glyph may absorb unbounded extra slack once every priority is exhausted
    /// (e.g. the conventional "last-resort" whitespace glyph).
    pub unconstrained: bool,
}

impl Default for GlyphFactor {
    fn default() -> Self {
        Self {
            grow_before: 0.0,
            grow_after: 0.0,
            shrink_before: 0.0,
            shrink_after: 0.0,
            priority: Priority::Null,
            unconstrained: false,
        }
    }
}

/// Default per-glyph factor for a whitespace glyph: grows or shrinks by up to half its width on
/// each edge.
pub fn whitespace_factor() -> GlyphFactor {
    GlyphFactor {
        grow_before: 0.5,
        grow_after: 0.5,
        shrink_before: 0.5,
        shrink_after: 0.5,
        priority: Priority::Whitespace,
        unconstrained: false,
    }
}

/// Default per-glyph factor for a letter glyph: grows by `37/256` of its advance, shrinks by a
/// smaller `11/256`, split evenly across its two edges.
pub fn letter_factor(advance: f32) -> GlyphFactor {
    let grow = advance * 37.0 / 256.0 / 2.0;
    let shrink = advance * 11.0 / 256.0 / 2.0;
    GlyphFactor {
        grow_before: grow,
        grow_after: grow,
        shrink_before: shrink,
        shrink_after: shrink,
        priority: Priority::Letter,
        unconstrained: false,
    }
}

/// A mark glyph inherits `base`'s factor but glues to it: its own leading edge is zeroed (both
/// grow and shrink) so the mark never separates from the glyph before it.
pub fn mark_factor(base: GlyphFactor) -> GlyphFactor {
    GlyphFactor { grow_before: 0.0, shrink_before: 0.0, ..base }
}

/// Direction of the requested distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Grow,
    Shrink,
}

/// Distributes `gap = target_width - advance_width` across `positions` according to `factors`
/// (one entry per glyph, in line order), mutating `positions[k].x_advance` in place.
///
/// `factors[0]`'s leading edge and `factors[last]`'s trailing edge are expected to already be
/// zeroed by the caller (line-edge glyphs never grow/shrink on the side facing outside the
/// line).
pub fn justify_line(gap: f32, factors: &[GlyphFactor], positions: &mut [Position]) {
    debug_assert_eq!(factors.len(), positions.len());
    if gap == 0.0 || factors.is_empty() {
        return;
    }
    let direction = if gap > 0.0 { Direction::Grow } else { Direction::Shrink };
    let mut remaining = gap;

    let priorities = [Priority::Kashida, Priority::Whitespace, Priority::Letter, Priority::Null];
    let mut scale = [0.0f32; 4];
    let mut done = false;

    for (rank, &priority) in priorities.iter().enumerate() {
        if done {
            break;
        }
        let sum: f32 = factors
            .iter()
            .filter(|f| f.priority == priority)
            .map(|f| signed_span(f, direction))
            .sum();
        if sum == 0.0 {
            continue;
        }
        match remaining.abs().partial_cmp(&sum.abs()) {
            Some(Ordering::Less) | Some(Ordering::Equal) => {
                scale[rank] = remaining / sum;
                remaining = 0.0;
                done = true;
            }
            _ => {
                scale[rank] = 1.0;
                remaining -= sum;
                if let Some(unconstrained_sum) = unconstrained_span(factors, priority, direction) {
                    if unconstrained_sum != 0.0 {
                        // Absorb the rest into the unconstrained glyphs at this priority by
                        // overdriving their scale past 1.0.
                        let extra = remaining / unconstrained_sum;
                        scale[rank] += extra;
                        remaining = 0.0;
                        done = true;
                    }
                }
            }
        }
    }

    if !done && remaining != 0.0 {
        // Overdrive: every priority's budget is exhausted but slack remains. Apply the rest at
        // the highest priority that had any span at all, even though it violates that
        // priority's nominal factor.
        for (rank, &priority) in priorities.iter().enumerate().rev() {
            let sum: f32 = factors.iter().filter(|f| f.priority == priority).map(|f| signed_span(f, direction)).sum();
            if sum != 0.0 {
                scale[rank] += remaining / sum;
                break;
            }
        }
    }

    for i in 0..positions.len() {
        let mut delta = 0.0f32;
        let rank = priorities.iter().position(|&p| p == factors[i].priority).unwrap_or(3);
        delta += signed(after_magnitude(&factors[i], direction), direction) * scale[rank];
        if let Some(next) = factors.get(i + 1) {
            let next_rank = priorities.iter().position(|&p| p == next.priority).unwrap_or(3);
            delta += signed(before_magnitude(next, direction), direction) * scale[next_rank];
        }
        positions[i].x_advance += delta;
    }
}

/// The leading-edge magnitude to use for `direction` (always non-negative).
fn before_magnitude(factor: &GlyphFactor, direction: Direction) -> f32 {
    match direction {
        Direction::Grow => factor.grow_before,
        Direction::Shrink => factor.shrink_before,
    }
}

/// The trailing-edge magnitude to use for `direction` (always non-negative).
fn after_magnitude(factor: &GlyphFactor, direction: Direction) -> f32 {
    match direction {
        Direction::Grow => factor.grow_after,
        Direction::Shrink => factor.shrink_after,
    }
}

/// Applies `direction`'s sign to a non-negative magnitude.
fn signed(magnitude: f32, direction: Direction) -> f32 {
    match direction {
        Direction::Grow => magnitude,
        Direction::Shrink => -magnitude,
    }
}

fn signed_span(factor: &GlyphFactor, direction: Direction) -> f32 {
    signed(before_magnitude(factor, direction), direction) + signed(after_magnitude(factor, direction), direction)
}

fn unconstrained_span(factors: &[GlyphFactor], priority: Priority, direction: Direction) -> Option<f32> {
    let sum: f32 = factors
        .iter()
        .filter(|f| f.priority == priority && f.unconstrained)
        .map(|f| signed_span(f, direction))
        .sum();
    (sum != 0.0).then_some(sum)
}
