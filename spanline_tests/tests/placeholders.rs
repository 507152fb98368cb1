// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline placeholders.

use peniko::kurbo::Rect;
use spanline::{
    IDEOGRAPHIC_BASELINE_RATIO, PLACEHOLDER_CHAR, Paragraph, Placeholder, PlaceholderAlignment,
    RangeBox, Span, StyleProperty, TextBaseline,
};
use spanline_dev::AhemBackend;

use crate::test_name;
use crate::util::{ColorBrush, TestEnv, assert_approx};

/// Lays out `a` followed by `placeholder` on a wide line.
fn after_letter(env: &mut TestEnv, placeholder: Placeholder) -> Paragraph<ColorBrush> {
    let mut builder = env.builder();
    builder.add_text("a");
    builder.add_placeholder(placeholder);
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 1000.0);
    paragraph
}

#[test]
fn placeholders_are_counted() {
    let env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_placeholder(Placeholder::new(10.0, 10.0));
    builder.add_text("one");
    builder.add_placeholder(Placeholder::new(10.0, 10.0));
    builder.add_text("two");
    builder.add_placeholder(Placeholder::new(10.0, 10.0));
    assert_eq!(builder.placeholder_count(), 3);

    let paragraph = builder.build();
    assert_eq!(paragraph.placeholder_count(), 3);
    assert_eq!(paragraph.text().matches(PLACEHOLDER_CHAR).count(), 3);
    let indices: Vec<_> = paragraph
        .spans()
        .iter()
        .filter_map(|span| match span {
            Span::Placeholder(span) => Some(span.index),
            Span::Text(_) => None,
        })
        .collect();
    assert_eq!(indices, [0, 1, 2]);
}

#[test]
#[should_panic(expected = "placeholder dimensions must be non-negative")]
fn placeholders_reject_negative_size() {
    let env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_placeholder(Placeholder::new(-1.0, 10.0));
}

#[test]
fn placeholders_count_towards_widths() {
    let mut env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_text("ab");
    builder.add_placeholder(Placeholder::new(30.0, 10.0));
    builder.add_text("cd");
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 1000.0);

    assert_eq!(paragraph.max_intrinsic_width(), 70.0);
    // Lines may break on either side of a placeholder.
    assert_eq!(paragraph.min_intrinsic_width(), 30.0);
    assert_eq!(paragraph.longest_line(), 70.0);
}

#[test]
fn placeholders_wrap_like_words() {
    let mut env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_text("aaa");
    builder.add_placeholder(Placeholder::new(40.0, 10.0));
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 50.0);

    assert_eq!(paragraph.line_count(), 2);
    assert_eq!(paragraph.height(), 20.0);
    let second = &paragraph.line_metrics()[1];
    assert_eq!((second.start_index, second.end_index), (3, 6));
}

#[test]
fn placeholders_sit_on_the_baseline() {
    let mut env = TestEnv::new(test_name!());
    let paragraph = after_letter(&mut env, Placeholder::new(20.0, 30.0));

    let line = &paragraph.line_metrics()[0];
    assert_eq!((line.ascent, line.descent), (30.0, 2.0));
    assert_eq!(line.height, 32.0);
    assert_eq!(paragraph.alphabetic_baseline(), 30.0);
    let RangeBox::Placeholder(placeholder) = &line.boxes[1] else {
        panic!("expected a placeholder box, got {:?}", line.boxes[1]);
    };
    assert_eq!(placeholder.index, 0);
    assert_eq!(
        (placeholder.left, placeholder.right, placeholder.top, placeholder.bottom),
        (10.0, 30.0, 0.0, 30.0)
    );
    // The text keeps its own extent around the shared baseline.
    assert_eq!((line.boxes[0].top(), line.boxes[0].bottom()), (22.0, 32.0));
}

#[test]
fn placeholders_alignment() {
    let mut env = TestEnv::new(test_name!());
    let placeholder = Placeholder::new(10.0, 20.0);
    for (alignment, ascent, descent) in [
        (PlaceholderAlignment::Top, 8.0, 12.0),
        (PlaceholderAlignment::Bottom, 18.0, 2.0),
        (PlaceholderAlignment::Middle, 13.0, 7.0),
        (PlaceholderAlignment::AboveBaseline, 20.0, 2.0),
        (PlaceholderAlignment::BelowBaseline, 8.0, 20.0),
    ] {
        let paragraph = after_letter(&mut env, placeholder.with_alignment(alignment));
        let line = &paragraph.line_metrics()[0];
        assert_eq!(
            (line.ascent, line.descent),
            (ascent, descent),
            "unexpected line extent for {alignment:?}"
        );
        assert_eq!(paragraph.height(), ascent + descent);
    }

    let paragraph = after_letter(&mut env, placeholder.with_baseline_offset(15.0));
    let line = &paragraph.line_metrics()[0];
    assert_eq!((line.ascent, line.descent), (15.0, 5.0));
}

#[test]
fn placeholders_on_the_ideographic_baseline() {
    let mut env = TestEnv::with_backend(
        test_name!(),
        AhemBackend::new().with_ideographic_baseline(0.9),
    );
    let placeholder = Placeholder::new(10.0, 5.0);
    let rect_of = |env: &mut TestEnv, placeholder: Placeholder| {
        after_letter(env, placeholder).get_boxes_for_placeholders()[0].rect
    };

    let alphabetic = rect_of(&mut env, placeholder);
    assert_eq!(alphabetic, Rect::new(10.0, 3.0, 20.0, 8.0));

    // The ideographic baseline of the font is 1 below the alphabetic one.
    let ideographic = rect_of(&mut env, placeholder.with_baseline(TextBaseline::Ideographic));
    assert_approx(ideographic.y0 as f32, 4.0);
    assert_approx(ideographic.y1 as f32, 9.0);
    assert_eq!((ideographic.x0, ideographic.x1), (10.0, 20.0));
}

#[test]
fn placeholders_take_the_baseline_of_their_style() {
    let mut env = TestEnv::new(test_name!());
    let add = |env: &mut TestEnv, placeholder: Placeholder| {
        let mut builder = env.builder();
        builder.push_style([StyleProperty::TextBaseline(TextBaseline::Ideographic)]);
        builder.add_text("a");
        builder.add_placeholder(placeholder);
        let mut paragraph = builder.build();
        env.layout(&mut paragraph, 1000.0);
        let Span::Placeholder(span) = &paragraph.spans()[1] else {
            panic!("expected a placeholder span");
        };
        (span.baseline, paragraph.get_boxes_for_placeholders()[0].rect)
    };

    let (baseline, inherited) = add(&mut env, Placeholder::new(10.0, 5.0));
    assert_eq!(baseline, TextBaseline::Ideographic);
    // Without a backend value the drop comes from the fixed ratio.
    let drop = 8.0 * (IDEOGRAPHIC_BASELINE_RATIO - 1.0);
    assert_approx(inherited.y0 as f32, 3.0 + drop);

    let explicit = Placeholder::new(10.0, 5.0).with_baseline(TextBaseline::Alphabetic);
    let (baseline, rect) = add(&mut env, explicit);
    assert_eq!(baseline, TextBaseline::Alphabetic);
    assert_eq!(rect, Rect::new(10.0, 3.0, 20.0, 8.0));
}

#[test]
fn placeholders_alone_on_a_line() {
    let mut env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_placeholder(Placeholder::new(40.0, 30.0));
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 100.0);

    assert_eq!(paragraph.line_count(), 1);
    // Without text the line is only as tall as the placeholder.
    assert_eq!(paragraph.height(), 30.0);
    assert_eq!(paragraph.alphabetic_baseline(), 30.0);
    assert_eq!(paragraph.longest_line(), 40.0);
}

#[test]
fn placeholders_boxes() {
    let mut env = TestEnv::new(test_name!());
    let mut builder = env.builder();
    builder.add_text("a");
    builder.add_placeholder(Placeholder::new(20.0, 30.0));
    builder.add_text("b");
    builder.add_placeholder(Placeholder::new(10.0, 10.0));
    let mut paragraph = builder.build();
    env.layout(&mut paragraph, 1000.0);

    let rects: Vec<_> = paragraph
        .get_boxes_for_placeholders()
        .iter()
        .map(|b| b.rect)
        .collect();
    assert_eq!(
        rects,
        [
            Rect::new(10.0, 0.0, 30.0, 30.0),
            Rect::new(40.0, 20.0, 50.0, 30.0)
        ]
    );
}
