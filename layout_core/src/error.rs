// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types surfaced by a [`crate::typeset::Typesetter::layout`] call.
//!
//! `UnfittableGlyph` and `Overflow` are deliberately not represented here: they are in-band
//! outcomes (a [`crate::linebreak::BreakReason`] or a truncated [`crate::typeset::Block`]), not
//! failures. Everything in this enum is fatal to the current call and leaves the caller's
//! containers in an unspecified partial state; there is no retry.

use core::fmt;
use core::ops::Range;

/// Result alias for fallible entry points in this crate.
pub type Result<T> = core::result::Result<T, LayoutError>;

/// A fatal error from the layout pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LayoutError {
    /// The input run set is not contiguous, overlaps itself, or extends past the string.
    InvalidInput {
        /// The offending byte range.
        range: Range<usize>,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// A run has no font after substitution.
    MissingFont {
        /// The byte range with no resolved font.
        range: Range<usize>,
    },
    /// The font oracle returned inconsistent glyph/cluster indices for a run.
    ShapingFailed {
        /// The byte range of the offending run.
        range: Range<usize>,
        /// Diagnostic detail from the shaping call.
        reason: &'static str,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput { range, reason } => {
                write!(f, "invalid input at {range:?}: {reason}")
            }
            Self::MissingFont { range } => write!(f, "no font resolved for range {range:?}"),
            Self::ShapingFailed { range, reason } => {
                write!(f, "shaping failed for range {range:?}: {reason}")
            }
        }
    }
}

impl core::error::Error for LayoutError {}
