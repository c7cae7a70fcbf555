// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokenization and the hyphenation adapter.
//!
//! Within a run's substring, runs of one-or-more spaces are their own tokens (spaces are
//! preserved, never dropped); everything else is split into maximal non-space tokens. Each
//! non-space token is then offered to a [`HyphenationEngine`], which returns the ordered
//! syllables the line breaker may split between. Hyphens are never written into the string
//! itself; they are break *opportunities* surfaced to [`crate::linebreak`].

use alloc::vec::Vec;
use core::ops::Range;

/// A lexical token within a run: either a maximal run of spaces or a maximal run of non-spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    /// Byte range of the token within the run's string.
    pub range: Range<usize>,
    /// Whether this token is a run of one or more space characters.
    pub is_space: bool,
}

/// Splits `text` into space-runs and non-space-runs, preserving every byte.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in text.char_indices() {
        let is_space = ch == ' ';
        match in_space {
            Some(current) if current == is_space => {}
            Some(_) => {
                tokens.push(Token { range: start..i, is_space: in_space.unwrap() });
                start = i;
                in_space = Some(is_space);
            }
            None => in_space = Some(is_space),
        }
    }
    if start < text.len() {
        tokens.push(Token { range: start..text.len(), is_space: in_space.unwrap_or(false) });
    }
    tokens
}

/// External hyphenation dictionary/oracle.
///
/// Implementations must uphold the concatenation invariant: the syllables returned for `token`
/// concatenate back to exactly `token`.
pub trait HyphenationEngine {
    /// Returns the ordered syllables `token` may be broken between.
    fn hyphenate_word<'a>(&self, token: &'a str) -> Vec<&'a str>;
}

/// A hyphenation engine that never finds a break opportunity; every token is a single syllable.
///
/// The default when no engine is injected (see [`crate::engines::Engines`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHyphenation;

impl HyphenationEngine for NoHyphenation {
    fn hyphenate_word<'a>(&self, token: &'a str) -> Vec<&'a str> {
        alloc::vec![token]
    }
}
