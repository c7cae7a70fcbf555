// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paragraph splitting and document assembly, end to end through [`shape_document`].

use layout_core::attributes::Attributes;
use layout_core::builder::{AttributedStringBuilder, shape_document};
use layout_core::runs::RunSet;

use crate::util::test_engines;

#[test]
fn single_paragraph_has_no_break() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem ipsum", Attributes::default());
    let (text, runs) = builder.build();
    let paragraphs = shape_document(&text, &runs, &test_engines()).unwrap();
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(paragraphs[0].range, 0..text.len());
}

#[test]
fn mid_document_newline_splits_into_two_paragraphs() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem\nipsum", Attributes::default());
    let (text, runs) = builder.build();
    let paragraphs = shape_document(&text, &runs, &test_engines()).unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].range, 0..6);
    assert_eq!(paragraphs[1].range, 6..11);
    assert_eq!(paragraphs[0].glyphs.length(), 6);
    assert_eq!(paragraphs[1].glyphs.length(), 5);
}

#[test]
fn leading_newline_is_its_own_one_glyph_paragraph() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("\nipsum", Attributes::default());
    let (text, runs) = builder.build();
    let paragraphs = shape_document(&text, &runs, &test_engines()).unwrap();
    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0].range, 0..1);
    assert_eq!(paragraphs[0].glyphs.length(), 1);
}

#[test]
fn double_newline_yields_an_empty_paragraph_between() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem\n\nipsum", Attributes::default());
    let (text, runs) = builder.build();
    let paragraphs = shape_document(&text, &runs, &test_engines()).unwrap();
    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[1].range, 6..7);
    assert_eq!(paragraphs[1].glyphs.length(), 1);
}

#[test]
fn empty_document_has_no_paragraphs() {
    let empty: RunSet<[u8; 4]> = RunSet::new();
    let paragraphs = shape_document("", &empty, &test_engines()).unwrap();
    assert!(paragraphs.is_empty());
}

#[test]
fn fragment_concatenation_preserves_attribute_boundaries() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    let mut bold = Attributes::<[u8; 4]>::default();
    bold.font_size = Some(20.0);
    builder.push("Lorem ", Attributes::default());
    builder.push("ipsum", bold);
    let (text, runs) = builder.build();
    assert_eq!(text, "Lorem ipsum");
    assert_eq!(runs.runs.len(), 2);
    assert_eq!(runs.runs[0].range, 0..6);
    assert_eq!(runs.runs[1].range, 6..11);
    assert_eq!(runs.runs[1].attributes.font_size, Some(20.0));
}
