// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry queries on laid out paragraphs.

use peniko::kurbo::{Point, Rect};
use spanline::{
    Affinity, BoxHeightStyle, BoxWidthStyle, Paragraph, Placeholder, TextDirection, TextPosition,
};

use crate::test_name;
use crate::util::{ColorBrush, TestEnv};

fn rects(
    env: &mut TestEnv,
    paragraph: &Paragraph<ColorBrush>,
    range: (usize, usize),
    height_style: BoxHeightStyle,
    width_style: BoxWidthStyle,
) -> Vec<Rect> {
    paragraph
        .get_boxes_for_range(&mut env.mcx, range.0, range.1, height_style, width_style)
        .unwrap()
        .into_iter()
        .map(|b| b.rect)
        .collect()
}

fn tight(env: &mut TestEnv, paragraph: &Paragraph<ColorBrush>, start: usize, end: usize) -> Vec<Rect> {
    rects(
        env,
        paragraph,
        (start, end),
        BoxHeightStyle::Tight,
        BoxWidthStyle::Tight,
    )
}

fn position(env: &mut TestEnv, paragraph: &Paragraph<ColorBrush>, x: f64, y: f64) -> TextPosition {
    paragraph
        .get_position_for_offset(&mut env.mcx, Point::new(x, y))
        .unwrap()
}

#[test]
fn queries_boxes_within_a_line() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("Test Ahem", 400.0);

    assert_eq!(tight(&mut env, &paragraph, 1, 3), [Rect::new(10.0, 0.0, 30.0, 10.0)]);
    assert_eq!(tight(&mut env, &paragraph, 0, 9), [Rect::new(0.0, 0.0, 90.0, 10.0)]);
}

#[test]
fn queries_boxes_across_lines() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("Test Ahem", 50.0);

    assert_eq!(
        tight(&mut env, &paragraph, 2, 7),
        [
            Rect::new(20.0, 0.0, 50.0, 10.0),
            Rect::new(0.0, 10.0, 20.0, 20.0)
        ]
    );
}

#[test]
fn queries_boxes_for_empty_ranges() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("Test Ahem", 400.0);

    assert!(tight(&mut env, &paragraph, 3, 3).is_empty());
    assert!(tight(&mut env, &paragraph, 5, 2).is_empty());
    assert!(tight(&mut env, &paragraph, 20, 30).is_empty());
    // The end is clamped to the text.
    assert_eq!(tight(&mut env, &paragraph, 5, 100), [Rect::new(50.0, 0.0, 90.0, 10.0)]);
}

#[test]
fn queries_boxes_height_styles() {
    let mut env = TestEnv::new(test_name!());
    env.style.line_height = Some(2.0);
    let paragraph = env.laid_out("ab\ncd", 100.0);
    let line = |top: f64, bottom: f64| Rect::new(0.0, top, 20.0, bottom);

    let cases = [
        (BoxHeightStyle::Tight, [line(5.0, 15.0), line(25.0, 35.0)]),
        (BoxHeightStyle::Max, [line(5.0, 15.0), line(25.0, 35.0)]),
        (
            BoxHeightStyle::IncludeLineSpacingMiddle,
            [line(0.0, 20.0), line(20.0, 40.0)],
        ),
        (
            BoxHeightStyle::IncludeLineSpacingTop,
            [line(0.0, 15.0), line(15.0, 35.0)],
        ),
        (
            BoxHeightStyle::IncludeLineSpacingBottom,
            [line(5.0, 25.0), line(25.0, 40.0)],
        ),
    ];
    for (height_style, expected) in cases {
        assert_eq!(
            rects(&mut env, &paragraph, (0, 5), height_style, BoxWidthStyle::Tight),
            expected,
            "unexpected boxes for {height_style:?}"
        );
    }
}

#[test]
fn queries_boxes_max_height_covers_mixed_sizes() {
    let mut env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_text("a");
    builder.push_style([spanline::StyleProperty::FontSize(20.0)]);
    builder.add_text("b");
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 100.0);

    assert_eq!(tight(&mut env, &paragraph, 0, 1), [Rect::new(0.0, 8.0, 10.0, 18.0)]);
    assert_eq!(
        rects(
            &mut env,
            &paragraph,
            (0, 1),
            BoxHeightStyle::Max,
            BoxWidthStyle::Tight
        ),
        [Rect::new(0.0, 0.0, 10.0, 20.0)]
    );
}

#[test]
fn queries_boxes_max_width_extends_to_edge() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("ab\ncd", 100.0);

    assert_eq!(
        rects(
            &mut env,
            &paragraph,
            (0, 5),
            BoxHeightStyle::Tight,
            BoxWidthStyle::Max
        ),
        [
            Rect::new(0.0, 0.0, 20.0, 10.0),
            Rect::new(20.0, 0.0, 100.0, 10.0),
            Rect::new(0.0, 10.0, 20.0, 20.0),
        ]
    );
    // Without the tight variant the selection ends at the text.
    assert_eq!(tight(&mut env, &paragraph, 0, 5).len(), 2);
}

#[test]
fn queries_boxes_carry_direction() {
    let mut env = TestEnv::new(test_name!());
    env.style.text_direction = TextDirection::Rtl;
    let paragraph = env.laid_out("ab", 100.0);

    let boxes = paragraph
        .get_boxes_for_range(&mut env.mcx, 0, 1, BoxHeightStyle::Tight, BoxWidthStyle::Tight)
        .unwrap();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].direction, TextDirection::Rtl);
    // The first character is at the right edge.
    assert_eq!(boxes[0].rect, Rect::new(90.0, 0.0, 100.0, 10.0));
}

#[test]
fn queries_position_for_offset() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("Test Ahem", 50.0);

    let cases = [
        ((14.0, 5.0), TextPosition::new(1, Affinity::Downstream)),
        ((16.0, 5.0), TextPosition::new(2, Affinity::Upstream)),
        ((10.0, -20.0), TextPosition::new(1, Affinity::Downstream)),
        ((5.0, 15.0), TextPosition::new(5, Affinity::Downstream)),
        ((-10.0, 5.0), TextPosition::new(0, Affinity::Downstream)),
        // The end of a wrapped line sticks to that line.
        ((200.0, 5.0), TextPosition::new(5, Affinity::Upstream)),
        ((200.0, 100.0), TextPosition::new(9, Affinity::Downstream)),
    ];
    for ((x, y), expected) in cases {
        assert_eq!(
            position(&mut env, &paragraph, x, y),
            expected,
            "unexpected position for ({x}, {y})"
        );
    }
}

#[test]
fn queries_position_in_empty_paragraph() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("", 100.0);

    assert_eq!(position(&mut env, &paragraph, 30.0, 30.0), TextPosition::default());
}

#[test]
fn queries_position_on_placeholder() {
    let mut env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_text("a");
    builder.add_placeholder(Placeholder::new(40.0, 10.0));
    builder.add_text("b");
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 1000.0);

    assert_eq!(
        position(&mut env, &paragraph, 20.0, 5.0),
        TextPosition::new(1, Affinity::Downstream)
    );
    assert_eq!(
        position(&mut env, &paragraph, 40.0, 5.0),
        TextPosition::new(4, Affinity::Upstream)
    );
}

#[test]
fn queries_word_boundary() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("Hello world", 1000.0);

    assert_eq!(paragraph.get_word_boundary(1), 0..5);
    assert_eq!(paragraph.get_word_boundary(5), 5..6);
    assert_eq!(paragraph.get_word_boundary(8), 6..11);
}

#[test]
fn queries_line_boundary() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = env.laid_out("Test Ahem", 50.0);

    assert_eq!(paragraph.get_line_boundary(2), 0..5);
    assert_eq!(paragraph.get_line_boundary(5), 5..9);
    assert_eq!(paragraph.get_line_boundary(9), 5..9);
    assert_eq!(paragraph.get_line_boundary(100), 5..9);
    assert_eq!(paragraph.line_number_at(4), Some(0));
    assert_eq!(paragraph.line_number_at(9), Some(1));

    let paragraph = env.laid_out("ab\ncd", 100.0);
    // The hard break belongs to its line but is not part of the returned text.
    assert_eq!(paragraph.get_line_boundary(2), 0..2);
    assert_eq!(paragraph.get_line_boundary(3), 3..5);
}
