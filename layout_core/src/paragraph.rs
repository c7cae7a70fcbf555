// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph splitting.
//!
//! Paragraphs are the maximal half-open ranges ending at (and including) each `\n`, plus a
//! final range for any trailing unterminated characters. A standalone `\n` at position 0 is its
//! own one-character paragraph.

use alloc::vec::Vec;
use core::ops::Range;

/// Splits `text` into paragraph byte ranges, keeping each trailing `\n` attached to the
/// paragraph it terminates.
///
/// `split_paragraphs("Lorem\nipsum")` is `[0..6, 6..11]`: the first paragraph is `"Lorem\n"`.
pub fn split_paragraphs(text: &str) -> Vec<Range<usize>> {
    let mut paragraphs = Vec::new();
    let mut start = 0;
    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            paragraphs.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < text.len() {
        paragraphs.push(start..text.len());
    }
    paragraphs
}
