// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting laid out paragraphs.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::layout::{LayoutResult, RangeBox};
use crate::paragraph::ParagraphData;
use crate::style::{Brush, Decoration, DecorationStyle, TextStyle};

/// A drawing target for paragraphs.
///
/// Only [`fill_rect`](Self::fill_rect) and [`fill_text`](Self::fill_text) are
/// required. Paragraphs whose spans all use plain styles are painted with
/// those two calls alone; other paragraphs are handed to
/// [`fill_structured`](Self::fill_structured) as a whole.
pub trait Surface<B: Brush> {
    /// Fills `rect` with `brush`.
    fn fill_rect(&mut self, rect: Rect, brush: &B);

    /// Draws `text` in `style`, with the start of its baseline at `origin`.
    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle<B>);

    /// Draws a single decoration line covering `rect`.
    ///
    /// The default implementation fills `rect` with the decoration brush, so
    /// every [`DecorationStyle`] other than `Double` is drawn solid.
    fn draw_decoration(&mut self, rect: Rect, style: &TextStyle<B>) {
        let brush = style.decoration_brush.as_ref().unwrap_or(&style.brush);
        self.fill_rect(rect, brush);
    }

    /// Draws a structured paragraph with its top left corner at `origin`.
    fn fill_structured(&mut self, structure: &StructuredText<B>, origin: Point) {
        let offset = origin.to_vec2();
        for element in structure.elements() {
            match element {
                StructuredElement::Text {
                    text,
                    style_index,
                    rect,
                    baseline,
                    ..
                } => {
                    let style = structure.style(*style_index);
                    if let Some(background) = &style.background {
                        self.fill_rect(*rect + offset, background);
                    }
                    self.fill_text(text, Point::new(rect.x0, *baseline) + offset, style);
                    for line in decoration_rects(style, *rect, *baseline) {
                        self.draw_decoration(line + offset, style);
                    }
                }
                StructuredElement::Ellipsis {
                    text,
                    style_index,
                    rect,
                    baseline,
                } => {
                    let style = structure.style(*style_index);
                    self.fill_text(text, Point::new(rect.x0, *baseline) + offset, style);
                }
                StructuredElement::Placeholder { .. } | StructuredElement::LineBreak => {}
            }
        }
    }
}

/// Returns the rectangles of the decoration lines of text drawn in `style`
/// within `rect`, whose alphabetic baseline is at `baseline`.
///
/// `rect` is expected to span the font's em box vertically.
pub fn decoration_rects(style: &TextStyle<impl Brush>, rect: Rect, baseline: f64) -> SmallVec<[Rect; 6]> {
    let mut rects = SmallVec::new();
    if style.decoration.is_none() {
        return rects;
    }
    let thickness =
        f64::from((style.font_size / 16.0).max(1.0) * style.decoration_thickness.max(0.0));
    let ascent = baseline - rect.y0;
    let descent = rect.y1 - baseline;
    let mut push = |y: f64| {
        rects.push(Rect::new(rect.x0, y, rect.x1, y + thickness));
        if style.decoration_style == DecorationStyle::Double {
            let y = y + thickness * 2.0;
            rects.push(Rect::new(rect.x0, y, rect.x1, y + thickness));
        }
    };
    if style.decoration.contains(Decoration::UNDERLINE) {
        push(baseline + (descent - thickness).max(0.0) * 0.5);
    }
    if style.decoration.contains(Decoration::OVERLINE) {
        push(rect.y0);
    }
    if style.decoration.contains(Decoration::LINE_THROUGH) {
        push(baseline - ascent * 0.35 - thickness * 0.5);
    }
    rects
}

/// One element of a [`StructuredText`].
#[derive(Clone, PartialEq, Debug)]
pub enum StructuredElement {
    /// A run of text in one style, on one line.
    Text {
        /// The text.
        text: String,
        /// Index into [`StructuredText::styles`].
        style_index: usize,
        /// Where the text comes from in the paragraph.
        range: Range<usize>,
        /// Bounds of the run, spanning the font's em box vertically.
        rect: Rect,
        /// Alphabetic baseline.
        baseline: f64,
    },
    /// Space reserved for a placeholder.
    Placeholder {
        /// Index of the placeholder among the paragraph's placeholders.
        index: usize,
        /// Bounds of the placeholder.
        rect: Rect,
    },
    /// The end of a line.
    LineBreak,
    /// The ellipsis of a truncated line.
    Ellipsis {
        /// The ellipsis text.
        text: String,
        /// Index into [`StructuredText::styles`].
        style_index: usize,
        /// Bounds of the ellipsis.
        rect: Rect,
        /// Alphabetic baseline.
        baseline: f64,
    },
}

/// A laid out paragraph as a flat list of positioned elements.
///
/// This is the representation handed to surfaces that cannot draw styled text
/// with plain text calls, such as a document tree.
#[derive(Clone, PartialEq, Debug)]
pub struct StructuredText<B: Brush> {
    styles: Vec<TextStyle<B>>,
    elements: Vec<StructuredElement>,
}

impl<B: Brush> StructuredText<B> {
    /// Returns the elements in paint order.
    pub fn elements(&self) -> &[StructuredElement] {
        &self.elements
    }

    /// Returns the styles that elements refer to.
    pub fn styles(&self) -> &[TextStyle<B>] {
        &self.styles
    }

    /// Returns the style with the given index.
    pub fn style(&self, index: usize) -> &TextStyle<B> {
        &self.styles[index]
    }
}

fn rect(left: f32, top: f32, right: f32, bottom: f32) -> Rect {
    Rect::new(left.into(), top.into(), right.into(), bottom.into())
}

pub(crate) fn build_structure<B: Brush>(
    data: &ParagraphData<B>,
    result: &LayoutResult,
) -> StructuredText<B> {
    let mut elements = Vec::new();
    for (line_number, line) in result.lines().iter().enumerate() {
        if line_number > 0 {
            elements.push(StructuredElement::LineBreak);
        }
        let line_start = elements.len();
        for range_box in &line.boxes {
            match range_box {
                RangeBox::Span(span_box) => {
                    let text = &data.text[span_box.range.clone()];
                    let box_rect = rect(span_box.left, span_box.top, span_box.right, span_box.bottom);
                    // Adjacent boxes in one style form a single element.
                    if elements.len() > line_start {
                        if let Some(StructuredElement::Text {
                            text: prev_text,
                            style_index,
                            range,
                            rect: prev_rect,
                            ..
                        }) = elements.last_mut()
                        {
                            if *style_index == span_box.style_index && range.end == span_box.range.start {
                                prev_text.push_str(text);
                                range.end = span_box.range.end;
                                *prev_rect = prev_rect.union(box_rect);
                                continue;
                            }
                        }
                    }
                    elements.push(StructuredElement::Text {
                        text: text.into(),
                        style_index: span_box.style_index,
                        range: span_box.range.clone(),
                        rect: box_rect,
                        baseline: span_box.baseline.into(),
                    });
                }
                RangeBox::Placeholder(placeholder) => {
                    elements.push(StructuredElement::Placeholder {
                        index: placeholder.index,
                        rect: range_box.rect(),
                    });
                }
            }
        }
        if let (Some(text), Some(ellipsis)) = (&line.ellipsis, &line.ellipsis_box) {
            elements.push(StructuredElement::Ellipsis {
                text: text.clone(),
                style_index: ellipsis.style_index,
                rect: rect(
                    ellipsis.left,
                    line.baseline - line.content_ascent,
                    ellipsis.right,
                    line.baseline + line.content_descent,
                ),
                baseline: line.baseline.into(),
            });
        }
    }
    tracing::trace!(elements = elements.len(), "built structured text");
    StructuredText {
        styles: data.styles.clone(),
        elements,
    }
}

/// Paints a paragraph whose styles are all plain with one text call per box.
pub(crate) fn paint_fast<B: Brush>(
    data: &ParagraphData<B>,
    result: &LayoutResult,
    surface: &mut impl Surface<B>,
    origin: Point,
) {
    let offset = origin.to_vec2();
    for line in result.lines() {
        for range_box in &line.boxes {
            let RangeBox::Span(span_box) = range_box else {
                continue;
            };
            let style = &data.styles[span_box.style_index];
            if let Some(background) = &style.background {
                surface.fill_rect(range_box.rect() + offset, background);
            }
            surface.fill_text(
                &data.text[span_box.range.clone()],
                Point::new(span_box.left.into(), span_box.baseline.into()) + offset,
                style,
            );
        }
        if let (Some(text), Some(ellipsis)) = (&line.ellipsis, &line.ellipsis_box) {
            surface.fill_text(
                text,
                Point::new(ellipsis.left.into(), line.baseline.into()) + offset,
                &data.styles[ellipsis.style_index],
            );
        }
    }
}
