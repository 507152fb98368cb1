// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit testing and line boundaries.

use core::ops::Range;

use peniko::kurbo::Point;

use super::{
    Affinity, BreakReason, LayoutResult, LineMetrics, RangeBox, SpanBox, TextPosition,
    x_for_offset,
};
use crate::analysis::grapheme_boundaries;
use crate::error::LayoutError;
use crate::measure::{MeasureBackend, MeasureContext};
use crate::paragraph::ParagraphData;
use crate::style::Brush;

/// Returns the position at the end of `line`.
fn line_end(line: &LineMetrics) -> TextPosition {
    // A soft-wrapped line ends where the next one starts.
    let affinity = if line.break_reason == BreakReason::Regular {
        Affinity::Upstream
    } else {
        Affinity::Downstream
    };
    TextPosition::new(line.end_index, affinity)
}

fn line_start(line: &LineMetrics) -> TextPosition {
    TextPosition::new(line.start_index, Affinity::Downstream)
}

pub(crate) fn position_for_point<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    result: &LayoutResult,
    mcx: &mut MeasureContext<M>,
    point: Point,
) -> Result<TextPosition, LayoutError> {
    let Some(last_line) = result.lines.last() else {
        return Ok(TextPosition::default());
    };
    let (x, y) = (point.x as f32, point.y as f32);
    let line = result
        .lines
        .iter()
        .find(|line| y < line.bottom())
        .unwrap_or(last_line);
    if line.boxes.is_empty() {
        return Ok(line_start(line));
    }

    let is_rtl = data.is_rtl();
    let min_left = line.boxes.iter().map(RangeBox::left).fold(f32::INFINITY, f32::min);
    let max_right = line
        .boxes
        .iter()
        .map(RangeBox::right)
        .fold(f32::NEG_INFINITY, f32::max);
    if x <= min_left {
        return Ok(if is_rtl { line_end(line) } else { line_start(line) });
    }
    if x >= max_right {
        return Ok(if is_rtl { line_start(line) } else { line_end(line) });
    }

    let hit = line
        .boxes
        .iter()
        .find(|b| b.left() <= x && x < b.right())
        .or_else(|| {
            // Only zero width boxes leave gaps; take the nearest one.
            line.boxes.iter().min_by(|a, b| {
                let da = (a.left() - x).abs().min((a.right() - x).abs());
                let db = (b.left() - x).abs().min((b.right() - x).abs());
                da.total_cmp(&db)
            })
        });
    let Some(hit) = hit else {
        return Ok(line_start(line));
    };
    match hit {
        RangeBox::Placeholder(placeholder) => {
            let mid = (placeholder.left + placeholder.right) * 0.5;
            let before = if is_rtl { x > mid } else { x < mid };
            Ok(if before {
                TextPosition::new(placeholder.range.start, Affinity::Downstream)
            } else {
                TextPosition::new(placeholder.range.end, Affinity::Upstream)
            })
        }
        RangeBox::Span(span_box) => position_in_span(data, mcx, line, span_box, x),
    }
}

/// Finds the grapheme boundary within `span_box` closest to `x`.
fn position_in_span<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
    line: &LineMetrics,
    span_box: &SpanBox,
    x: f32,
) -> Result<TextPosition, LayoutError> {
    let is_rtl = data.is_rtl();
    // Distance travelled from the start edge of the box.
    let advance_of = |pos: f32| if is_rtl { span_box.right - pos } else { pos - span_box.left };
    let target = advance_of(x);

    let range = span_box.range.clone();
    let mut prev = (range.start, 0.0);
    for boundary in grapheme_boundaries(&data.text[range.clone()]).skip(1) {
        let offset = range.start + boundary;
        let advance = advance_of(x_for_offset(data, mcx, line, span_box, offset)?);
        if target < advance {
            return Ok(if target - prev.1 <= advance - target {
                TextPosition::new(prev.0, Affinity::Downstream)
            } else {
                TextPosition::new(offset, Affinity::Upstream)
            });
        }
        prev = (offset, advance);
    }
    Ok(TextPosition::new(range.end, Affinity::Upstream))
}

pub(crate) fn line_boundary(result: &LayoutResult, offset: usize) -> Range<usize> {
    match result.line_number_at(offset) {
        Some(index) => result.lines[index].text_range(),
        None => match result.lines.last() {
            Some(last) if offset >= last.end_index_including_newline => last.text_range(),
            _ => 0..0,
        },
    }
}
