// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangles covering ranges of text.

use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::Rect;

use super::{
    BoxHeightStyle, BoxWidthStyle, LayoutResult, LineMetrics, RangeBox, TextBox, x_for_offset,
};
use crate::error::LayoutError;
use crate::measure::{MeasureBackend, MeasureContext};
use crate::paragraph::ParagraphData;
use crate::style::Brush;

fn rect(left: f32, top: f32, right: f32, bottom: f32) -> Rect {
    Rect::new(left.into(), top.into(), right.into(), bottom.into())
}

fn content_top(line: &LineMetrics) -> f32 {
    line.baseline - line.content_ascent
}

fn content_bottom(line: &LineMetrics) -> f32 {
    line.baseline + line.content_descent
}

/// Returns the vertical extent of `range_box` on line `index` for the given height style.
///
/// The line spacing styles cover the gap between the content of adjacent lines,
/// so boxes on consecutive lines touch.
fn vertical_extent(
    lines: &[LineMetrics],
    index: usize,
    range_box: &RangeBox,
    style: BoxHeightStyle,
) -> (f32, f32) {
    let line = &lines[index];
    let (top, bottom) = (content_top(line), content_bottom(line));
    match style {
        BoxHeightStyle::Tight => (range_box.top(), range_box.bottom()),
        BoxHeightStyle::Max => (top, bottom),
        BoxHeightStyle::IncludeLineSpacingMiddle => (line.top, line.bottom()),
        BoxHeightStyle::IncludeLineSpacingTop => {
            let above = match index.checked_sub(1) {
                Some(prev) => content_bottom(&lines[prev]),
                None => line.top,
            };
            (above, bottom)
        }
        BoxHeightStyle::IncludeLineSpacingBottom => {
            let below = lines.get(index + 1).map_or(line.bottom(), content_top);
            (top, below)
        }
    }
}

pub(crate) fn boxes_for_range<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    result: &LayoutResult,
    mcx: &mut MeasureContext<M>,
    range: Range<usize>,
    height_style: BoxHeightStyle,
    width_style: BoxWidthStyle,
) -> Result<Vec<TextBox>, LayoutError> {
    let direction = data.style.text_direction;
    let mut boxes = Vec::new();
    for (index, line) in result.lines.iter().enumerate() {
        if range.end <= line.start_index || range.start >= line.end_index {
            continue;
        }
        let first_on_line = boxes.len();
        for range_box in &line.boxes {
            let box_range = range_box.range();
            let start = range.start.max(box_range.start);
            let end = range.end.min(box_range.end);
            if start >= end {
                continue;
            }
            let (left, right) = match range_box {
                RangeBox::Span(span_box) if start != box_range.start || end != box_range.end => {
                    let a = x_for_offset(data, mcx, line, span_box, start)?;
                    let b = x_for_offset(data, mcx, line, span_box, end)?;
                    (a.min(b), a.max(b))
                }
                _ => (range_box.left(), range_box.right()),
            };
            let (top, bottom) = vertical_extent(&result.lines, index, range_box, height_style);
            boxes.push(TextBox {
                rect: rect(left, top, right, bottom),
                direction,
            });
        }

        if width_style == BoxWidthStyle::Max && boxes.len() > first_on_line {
            let line_boxes = &boxes[first_on_line..];
            let min_left = line_boxes.iter().map(|b| b.rect.x0).fold(f64::INFINITY, f64::min);
            let max_right = line_boxes
                .iter()
                .map(|b| b.rect.x1)
                .fold(f64::NEG_INFINITY, f64::max);
            let (y0, y1) = (line_boxes[0].rect.y0, line_boxes[0].rect.y1);
            let edge = f64::from(result.alignment_width());
            let extend_start = range.start <= line.start_index;
            let extend_end = range.end > line.end_index;
            let (extend_left, extend_right) = if direction.is_rtl() {
                (extend_end, extend_start)
            } else {
                (extend_start, extend_end)
            };
            if extend_left && min_left > 0.0 {
                boxes.push(TextBox {
                    rect: Rect::new(0.0, y0, min_left, y1),
                    direction,
                });
            }
            if extend_right && max_right < edge {
                boxes.push(TextBox {
                    rect: Rect::new(max_right, y0, edge, y1),
                    direction,
                });
            }
        }
    }
    Ok(boxes)
}

pub(crate) fn boxes_for_placeholders<B: Brush>(
    data: &ParagraphData<B>,
    result: &LayoutResult,
) -> Vec<TextBox> {
    result
        .lines
        .iter()
        .flat_map(|line| &line.boxes)
        .filter(|b| matches!(b, RangeBox::Placeholder(_)))
        .map(|b| TextBox {
            rect: b.rect(),
            direction: data.style.text_direction,
        })
        .collect()
}
