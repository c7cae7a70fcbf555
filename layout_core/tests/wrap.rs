// Copyright 2026 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking and column flow, end to end through [`Typesetter::layout`].

use layout_core::attributes::Attributes;
use layout_core::builder::AttributedStringBuilder;
use layout_core::geometry::Rect;
use layout_core::typeset::{Container, Typesetter};

use crate::util::test_engines;

#[test]
fn short_paragraph_fits_on_one_line() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem", Attributes::default());
    let (text, runs) = builder.build();
    let engines = test_engines();
    let typesetter = Typesetter::new(&engines);
    let mut container = Container::new(Rect::new(0.0, 0.0, 500.0, 500.0), 1, 0.0);
    typesetter.layout(&text, &runs, &mut container).unwrap();

    assert_eq!(container.blocks.len(), 1);
    assert_eq!(container.blocks[0].fragments.len(), 1);
}

#[test]
fn narrow_container_wraps_one_word_per_line() {
    // Glyphs are 10 wide; "Lorem" (5) + space (1) fits under 60 but "Lorem ipsum" (11) doesn't.
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem ipsum dolor", Attributes::default());
    let (text, runs) = builder.build();
    let engines = test_engines();
    let typesetter = Typesetter::new(&engines);
    let mut container = Container::new(Rect::new(0.0, 0.0, 60.0, 500.0), 1, 0.0);
    typesetter.layout(&text, &runs, &mut container).unwrap();

    let block = &container.blocks[0];
    assert_eq!(block.fragments.len(), 3);
}

#[test]
fn an_overfull_single_word_still_gets_its_own_line() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Supercalifragilistic", Attributes::default());
    let (text, runs) = builder.build();
    let engines = test_engines();
    let typesetter = Typesetter::new(&engines);
    let mut container = Container::new(Rect::new(0.0, 0.0, 50.0, 500.0), 1, 0.0);
    typesetter.layout(&text, &runs, &mut container).unwrap();

    let block = &container.blocks[0];
    assert_eq!(block.fragments.len(), 1);
    assert_eq!(block.fragments[0].string.length(), 20);
}

#[test]
fn paragraphs_flow_into_separate_blocks() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem\nipsum", Attributes::default());
    let (text, runs) = builder.build();
    let engines = test_engines();
    let typesetter = Typesetter::new(&engines);
    let mut container = Container::new(Rect::new(0.0, 0.0, 500.0, 500.0), 1, 0.0);
    typesetter.layout(&text, &runs, &mut container).unwrap();

    assert_eq!(container.blocks.len(), 2);
}

#[test]
fn two_columns_each_receive_a_share_of_the_flow() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem ipsum dolor sit amet consectetur", Attributes::default());
    let (text, runs) = builder.build();
    let engines = test_engines();
    let typesetter = Typesetter::new(&engines);
    // Each column is narrow enough to force wrapping and each column is short enough to force a
    // second column to start receiving lines.
    let mut container = Container::new(Rect::new(0.0, 0.0, 130.0, 25.0), 2, 10.0);
    typesetter.layout(&text, &runs, &mut container).unwrap();

    assert!(container.blocks.len() >= 2);
}

#[test]
fn rect_union_of_fragments_matches_block_bbox() {
    let mut builder = AttributedStringBuilder::<[u8; 4]>::new();
    builder.push("Lorem ipsum dolor", Attributes::default());
    let (text, runs) = builder.build();
    let engines = test_engines();
    let typesetter = Typesetter::new(&engines);
    let mut container = Container::new(Rect::new(0.0, 0.0, 60.0, 500.0), 1, 0.0);
    typesetter.layout(&text, &runs, &mut container).unwrap();

    let block = &container.blocks[0];
    let bbox = block.bbox().unwrap();
    assert_eq!(bbox.height, block.height());
    for fragment in &block.fragments {
        assert!(fragment.rect.y >= bbox.y);
    }
}
