// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::Range;

use crate::{Endpoint, Error, TextStorage};

/// A validated byte range into a UTF-8 text buffer.
///
/// This is a convenience wrapper around `Range<usize>` that carries invariants useful for
/// attributed text APIs:
///
/// - `start <= end`
/// - `start` and `end` are within the text bounds
/// - `start` and `end` lie on UTF-8 codepoint boundaries
///
/// **Why `TextRange`?**
///
/// Many text APIs accept `Range<usize>` byte offsets. That is flexible, but it means every call
/// must re-check bounds and UTF-8 boundary alignment, and every caller has to decide how to handle
/// failures.
///
/// `TextRange` lets you validate once and then pass the range to APIs that can be infallible with
/// respect to range correctness.
///
/// ## Important
///
/// `TextRange` does not currently encode which specific text buffer it was validated against. It
/// is the caller's responsibility to only reuse a `TextRange` with the same underlying text
/// content it was validated for.
///
/// ## Example
///
/// ```
/// use attributed_text::{AttributedText, TextRange};
///
/// let mut text = AttributedText::new("Hello!");
/// let range = TextRange::new(text.text(), 0..5).unwrap();
/// text.apply_attribute(range, ());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    /// Returns a validated `TextRange` for the provided text.
    #[inline]
    pub fn new<T: TextStorage>(text: &T, range: Range<usize>) -> Result<Self, Error> {
        validate_range(text, &range)?;
        Ok(Self {
            start: range.start,
            end: range.end,
        })
    }

    /// Creates a `TextRange` without validation.
    ///
    /// This is intended for internal callers that already maintain range invariants.
    #[must_use]
    #[inline]
    pub const fn new_unchecked(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// The start byte offset.
    #[must_use]
    #[inline]
    pub const fn start(self) -> usize {
        self.start
    }

    /// The end byte offset (exclusive).
    #[must_use]
    #[inline]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Returns this range as a `Range<usize>`.
    #[must_use]
    #[inline]
    pub fn as_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<TextRange> for Range<usize> {
    #[inline]
    fn from(value: TextRange) -> Self {
        value.as_range()
    }
}

#[inline]
pub(crate) fn validate_range<T: TextStorage>(text: &T, range: &Range<usize>) -> Result<(), Error> {
    let text_len = text.len();
    if range.start > range.end {
        return Err(Error::invalid_range(range.start, range.end, text_len));
    }
    if range.start > text_len || range.end > text_len {
        return Err(Error::invalid_bounds(range.start, range.end, text_len));
    }
    if !text.is_char_boundary(range.start) {
        return Err(Error::not_on_char_boundary(
            text,
            range.start,
            range.end,
            text_len,
            Endpoint::Start,
            range.start,
        ));
    }
    if !text.is_char_boundary(range.end) {
        return Err(Error::not_on_char_boundary(
            text,
            range.start,
            range.end,
            text_len,
            Endpoint::End,
            range.end,
        ));
    }
    Ok(())
}
