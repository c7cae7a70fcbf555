// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fundamental text property types.
//!
//! This crate is a lightweight, `no_std`-friendly vocabulary layer shared by the layout
//! core: small, typed representations of the "leaf" concepts that runs carry around
//! (ISO 15924 scripts, OpenType tags and settings).
//!
//! ## Features
//!
//! - `std` (enabled by default): currently unused, provided for forward compatibility.
//!
//! ## Example
//!
//! ```
//! use text_primitives::{Script, Tag};
//!
//! let tag = Tag::parse("wght").unwrap();
//! assert_eq!(tag.to_bytes(), *b"wght");
//!
//! let script = Script::parse("Latn").unwrap();
//! assert_eq!(script.as_str(), "Latn");
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
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

mod script;
mod tag;

pub use script::{ParseScriptError, Script};
pub use tag::{Setting, Tag};
