// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributed Text is a Rust crate for associating attributes with ranges of text.
//!
//! The central type is [`AttributedText`], which pairs a piece of text (anything implementing
//! [`TextStorage`]) with a list of attribute spans over byte ranges of that text. Spans may
//! overlap or leave gaps; [`attribute_segments`] turns an [`AttributedText`] into the
//! non-overlapping, contiguous segments a downstream consumer (a layout engine, a renderer)
//! actually wants, with a view of which spans are active over each segment.
//!
//! [`TextRange`] is a validated `Range<usize>` — checked once against a text's length and UTF-8
//! character boundaries — so that downstream APIs taking a `TextRange` don't need to re-validate.
//!
//! ## Features
//!
//! - `std` (enabled by default): This is currently unused and is provided for forward compatibility.
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

mod attribute_segments;
mod attributed_text;
mod error;
mod text_range;
mod text_storage;

pub use attribute_segments::{ActiveSpans, ActiveSpansIter, AttributeSegments, AttributeSegmentsWorkspace};
pub use attributed_text::{ApplyAttributeError, AttributedText};
pub use error::{BoundaryInfo, Endpoint, Error, ErrorKind};
pub use text_range::TextRange;
pub use text_storage::TextStorage;
