// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rich-text layout engine core.
//!
//! This crate turns a styled character sequence (runs of [`attributes::Attributes`] over a
//! string) plus one or more [`typeset::Container`]s into positioned glyph geometry: [`typeset::Block`]s of
//! [`typeset::LineFragment`]s, each carrying shaped glyphs, decoration lines and overflow
//! bookkeeping ready for a renderer.
//!
//! The pipeline, leaves first:
//!
//! ```text
//! AttributedString -> default styles -> overlay substitution & script runs -> flatten
//!   -> split paragraphs -> tokenize + hyphenate -> shape -> resolve attachments & y-offsets
//!   -> per container, resolve columns -> per paragraph, suggest line breaks
//!   -> per line, finalize (trim, align, justify, decorate) -> emit Blocks
//! ```
//!
//! Font shaping, the bidi algorithm, hyphenation dictionaries, script itemization and
//! rendering are external collaborators, injected through the traits in [`external`] and
//! [`engines`]. This crate owns the run algebra, the glyph-index bookkeeping, line breaking,
//! justification, truncation, decoration geometry and column/paragraph flow; it does not parse
//! font files or rasterize anything.
//!
//! ## Example
//!
//! ```
//! use layout_core::attributes::Attributes;
//! use layout_core::paragraph::split_paragraphs;
//!
//! let paragraphs = split_paragraphs("Lorem\nipsum");
//! assert_eq!(paragraphs, vec![0..6, 6..11]);
//!
//! let attrs = Attributes::<()>::default();
//! assert_eq!(attrs.font_size, None);
//! ```
// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![no_std]

extern crate alloc;

pub mod attributes;
pub mod builder;
pub mod decorate;
pub mod engines;
pub mod error;
pub mod external;
pub mod geometry;
pub mod glyph;
pub mod hyphenate;
pub mod justify;
pub mod linebreak;
pub mod metrics;
pub mod paragraph;
pub mod runs;
pub mod truncate;
pub mod typeset;

pub use error::{LayoutError, Result};
