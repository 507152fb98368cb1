// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::{BreakReason, LineMetrics};
use crate::style::TextAlign;

fn count_spaces(text: &str) -> usize {
    text.bytes().filter(|b| *b == b' ').count()
}

/// Positions lines horizontally within `alignment_width`.
///
/// Boxes come in laid out left to right from zero; afterwards they are in
/// paragraph coordinates. `alignment` must already be resolved against the
/// direction, i.e. not be `Start` or `End`.
pub(crate) fn align(
    lines: &mut [LineMetrics],
    text: &str,
    alignment_width: f32,
    alignment: TextAlign,
    is_rtl: bool,
) {
    for line in lines {
        // Overflowing lines stay at the start edge.
        let free_space = (alignment_width - line.width).max(0.0);
        let start_offset = if is_rtl { free_space } else { 0.0 };
        let offset = match alignment {
            TextAlign::Left => 0.0,
            TextAlign::Right => free_space,
            TextAlign::Center => free_space * 0.5,
            TextAlign::Justify => {
                let num_spaces = count_spaces(&text[line.start_index..line.visible_end]);
                // The last line and lines ended by a hard break are not justified.
                if line.break_reason != BreakReason::Regular || num_spaces == 0 || free_space <= 0.0
                {
                    start_offset
                } else {
                    justify(line, text, free_space / num_spaces as f32);
                    0.0
                }
            }
            TextAlign::Start | TextAlign::End => start_offset,
        };

        if is_rtl {
            // Boxes keep their logical order but run from the right edge.
            let width = line.width;
            for b in &mut line.boxes {
                let (left, right) = (width - b.right(), width - b.left());
                b.set_horizontal(left, right);
            }
            if let Some(ellipsis) = &mut line.ellipsis_box {
                (ellipsis.left, ellipsis.right) = (width - ellipsis.right, width - ellipsis.left);
            }
        }

        line.left = offset;
        for b in &mut line.boxes {
            b.shift(offset);
        }
        if let Some(ellipsis) = &mut line.ellipsis_box {
            ellipsis.left += offset;
            ellipsis.right += offset;
        }
    }
}

/// Widens every inner space of `line` by `extra`.
fn justify(line: &mut LineMetrics, text: &str, extra: f32) {
    let visible_end = line.visible_end;
    let mut shift = 0.0;
    for b in &mut line.boxes {
        let range = b.range();
        let inner_end = range.end.min(visible_end).max(range.start);
        let added = extra * count_spaces(&text[range.start..inner_end]) as f32;
        let (left, right) = (b.left() + shift, b.right() + shift + added);
        b.set_horizontal(left, right);
        shift += added;
    }
    line.width += shift;
    line.width_with_trailing_spaces += shift;
    line.justify_extra = extra;
}
