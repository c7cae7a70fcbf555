// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine injection: a caller-collaborators contract reified as a generic record instead of
//! `parley`'s constructor-parameter style (`LayoutContext::new(...)`) — the same idea (pass
//! collaborators in, don't reach for globals), but with the line breaker, justifier, truncator
//! and decorator as generic type parameters rather than trait objects, so the overridable
//! passes never need enum-keyed dynamic dispatch.
//!
//! A caller who never overrides anything gets [`DefaultJustifier`], [`DefaultTruncator`] and
//! [`DefaultDecorator`] for free via [`Engines::new`]; [`Engines::with_justifier`] (and friends)
//! swap in a caller-supplied implementation, filling exactly the slot it names.

use alloc::vec::Vec;
use core::marker::PhantomData;

use smallvec::SmallVec;

use crate::attributes::{Brush, ResolvedAttributes, TruncationMode};
use crate::decorate::{decorate_run, DecorationLine};
use crate::external::{FontResolver, FontSubstitution, ScriptItemizer};
use crate::geometry::Position;
use crate::glyph::{GlyphRun, GlyphString};
use crate::hyphenate::HyphenationEngine;
use crate::justify::{justify_line, GlyphFactor};
use crate::metrics::GlyphRunMetrics;
use crate::truncate::truncate_line;

/// The justification pass, injectable per caller override.
pub trait Justifier<B: Brush> {
    /// Distributes `gap` across `positions` per `factors` (see [`crate::justify::justify_line`]).
    fn justify(&self, gap: f32, factors: &[GlyphFactor], positions: &mut [Position]);
}

/// The default justifier: the priority/factor model in [`crate::justify`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultJustifier;

impl<B: Brush> Justifier<B> for DefaultJustifier {
    fn justify(&self, gap: f32, factors: &[GlyphFactor], positions: &mut [Position]) {
        justify_line(gap, factors, positions);
    }
}

/// The truncation pass, injectable per caller override.
pub trait Truncator<B: Brush> {
    /// Elides part of `line` to fit `available_width` alongside the ellipsis glyph, per `mode`.
    #[expect(clippy::too_many_arguments, reason = "one argument per ellipsis glyph property; grouping them would just move the arity into a throwaway struct")]
    fn truncate(
        &self,
        line: &GlyphString<B>,
        mode: TruncationMode,
        available_width: f32,
        ellipsis_glyph: u16,
        ellipsis_advance: f32,
        ellipsis_attributes: ResolvedAttributes<B>,
        ellipsis_metrics: GlyphRunMetrics,
    ) -> GlyphString<B>;
}

/// The default truncator: best-fit elision, see [`crate::truncate`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultTruncator;

impl<B: Brush> Truncator<B> for DefaultTruncator {
    fn truncate(
        &self,
        line: &GlyphString<B>,
        mode: TruncationMode,
        available_width: f32,
        ellipsis_glyph: u16,
        ellipsis_advance: f32,
        ellipsis_attributes: ResolvedAttributes<B>,
        ellipsis_metrics: GlyphRunMetrics,
    ) -> GlyphString<B> {
        truncate_line(line, mode, available_width, ellipsis_glyph, ellipsis_advance, ellipsis_attributes, ellipsis_metrics)
    }
}

/// The decoration pass, injectable per caller override.
pub trait Decorator<B: Brush> {
    /// Emits underline/strikethrough [`DecorationLine`]s for one run.
    fn decorate(&self, run: &GlyphRun<B>, run_x: f32, run_advance_width: f32, baseline_y: f32) -> SmallVec<[DecorationLine<B>; 2]>;
}

/// The default decorator: font-metrics-derived underline/strike geometry, see
/// [`crate::decorate`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultDecorator;

impl<B: Brush> Decorator<B> for DefaultDecorator {
    fn decorate(&self, run: &GlyphRun<B>, run_x: f32, run_advance_width: f32, baseline_y: f32) -> SmallVec<[DecorationLine<B>; 2]> {
        decorate_run(run, run_x, run_advance_width, baseline_y)
    }
}

/// The full set of collaborators a [`crate::typeset::Typesetter`] needs: the required external
/// oracles (font resolution, hyphenation, script itemization, font substitution) plus the
/// overridable justification/truncation/decoration passes, defaulted when not specified.
pub struct Engines<F, H, S, Sub, B, J = DefaultJustifier, T = DefaultTruncator, D = DefaultDecorator>
where
    B: Brush,
{
    /// Resolves the font handles chosen by `font_substitution` to shaping/metrics oracles.
    pub fonts: F,
    /// Hyphenation dictionary/oracle.
    pub hyphenation: H,
    /// Unicode script itemizer.
    pub script_itemizer: S,
    /// Font-substitution cascade.
    pub font_substitution: Sub,
    /// Justification pass.
    pub justifier: J,
    /// Truncation pass.
    pub truncator: T,
    /// Decoration pass.
    pub decorator: D,
    _brush: PhantomData<fn() -> B>,
}

impl<F, H, S, Sub, B> Engines<F, H, S, Sub, B, DefaultJustifier, DefaultTruncator, DefaultDecorator>
where
    B: Brush,
    F: FontResolver,
    H: HyphenationEngine,
    S: ScriptItemizer,
    Sub: FontSubstitution,
{
    /// Builds an `Engines` record with the default justifier/truncator/decorator; override
    /// individual passes with [`Self::with_justifier`], [`Self::with_truncator`] or
    /// [`Self::with_decorator`].
    pub fn new(fonts: F, hyphenation: H, script_itemizer: S, font_substitution: Sub) -> Self {
        Self {
            fonts,
            hyphenation,
            script_itemizer,
            font_substitution,
            justifier: DefaultJustifier,
            truncator: DefaultTruncator,
            decorator: DefaultDecorator,
            _brush: PhantomData,
        }
    }
}

impl<F, H, S, Sub, B, J, T, D> Engines<F, H, S, Sub, B, J, T, D>
where
    B: Brush,
{
    /// Replaces the justification pass.
    pub fn with_justifier<J2: Justifier<B>>(self, justifier: J2) -> Engines<F, H, S, Sub, B, J2, T, D> {
        Engines {
            fonts: self.fonts,
            hyphenation: self.hyphenation,
            script_itemizer: self.script_itemizer,
            font_substitution: self.font_substitution,
            justifier,
            truncator: self.truncator,
            decorator: self.decorator,
            _brush: PhantomData,
        }
    }

    /// Replaces the truncation pass.
    pub fn with_truncator<T2: Truncator<B>>(self, truncator: T2) -> Engines<F, H, S, Sub, B, J, T2, D> {
        Engines {
            fonts: self.fonts,
            hyphenation: self.hyphenation,
            script_itemizer: self.script_itemizer,
            font_substitution: self.font_substitution,
            justifier: self.justifier,
            truncator,
            decorator: self.decorator,
            _brush: PhantomData,
        }
    }

    /// Replaces the decoration pass.
    pub fn with_decorator<D2: Decorator<B>>(self, decorator: D2) -> Engines<F, H, S, Sub, B, J, T, D2> {
        Engines {
            fonts: self.fonts,
            hyphenation: self.hyphenation,
            script_itemizer: self.script_itemizer,
            font_substitution: self.font_substitution,
            justifier: self.justifier,
            truncator: self.truncator,
            decorator,
            _brush: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::{Font, ItemizedRun};
    use crate::attributes::Attributes;
    use text_primitives::Script;

    struct NoFonts;
    impl FontResolver for NoFonts {
        fn resolve(&self, _handle: u32) -> Option<&dyn Font> {
            None
        }
    }
    struct NoScripts;
    impl ScriptItemizer for NoScripts {
        fn get_runs(&self, text: &str) -> Vec<ItemizedRun<Script>> {
            alloc::vec![ItemizedRun { range: 0..text.len(), value: Script::UNKNOWN }]
        }
    }
    struct NoSubstitution;
    impl FontSubstitution for NoSubstitution {
        fn get_runs(&self, text: &str, _existing: &[ItemizedRun<Script>]) -> Vec<ItemizedRun<u32>> {
            alloc::vec![ItemizedRun { range: 0..text.len(), value: 0 }]
        }
    }

    #[derive(Clone, Copy, Debug, Default)]
    struct CountingJustifier;
    impl Justifier<[u8; 4]> for CountingJustifier {
        fn justify(&self, _gap: f32, _factors: &[GlyphFactor], positions: &mut [Position]) {
            for p in positions {
                p.x_advance += 1.0;
            }
        }
    }

    #[test]
    fn default_engines_use_default_passes() {
        let engines = Engines::<_, _, _, _, [u8; 4]>::new(
            NoFonts,
            crate::hyphenate::NoHyphenation,
            NoScripts,
            NoSubstitution,
        );
        let attrs = Attributes::<[u8; 4]>::default().resolve(None);
        let mut positions = alloc::vec![Position::default(); 1];
        engines.justifier.justify(0.0, &[GlyphFactor::default()], &mut positions);
        assert_eq!(positions[0].x_advance, 0.0);
        assert_eq!(attrs.font_size, 12.0);
    }

    #[test]
    fn with_justifier_swaps_only_that_slot() {
        let engines = Engines::<_, _, _, _, [u8; 4]>::new(
            NoFonts,
            crate::hyphenate::NoHyphenation,
            NoScripts,
            NoSubstitution,
        )
        .with_justifier(CountingJustifier);
        let mut positions = alloc::vec![Position::default(); 2];
        engines.justifier.justify(0.0, &[GlyphFactor::default(), GlyphFactor::default()], &mut positions);
        assert_eq!(positions[0].x_advance, 1.0);
        assert_eq!(positions[1].x_advance, 1.0);
    }
}
