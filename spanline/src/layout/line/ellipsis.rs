// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Truncation of the last line to make room for an ellipsis.

use alloc::vec::Vec;

use super::greedy::{BrokenLine, Fragment, FragmentKind, exceeds, trimmed_width};
use crate::analysis::prev_grapheme_offset;
use crate::error::LayoutError;
use crate::layout::BreakReason;
use crate::measure::{MeasureBackend, MeasureContext};
use crate::paragraph::ParagraphData;
use crate::style::Brush;

/// An ellipsis that fits on the truncated line.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(super) struct FittedEllipsis {
    pub(super) style_index: usize,
    pub(super) width: f32,
}

/// Removes trailing graphemes and placeholders from `line` until `ellipsis`
/// fits after the remaining content.
///
/// Fragments after `line` are discarded. Returns `None`, leaving the line as
/// it is, if the ellipsis alone is wider than `max_width`.
pub(super) fn truncate_line<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
    fragments: &mut Vec<Fragment>,
    line: &mut BrokenLine,
    ellipsis: &str,
    max_width: f32,
) -> Result<Option<FittedEllipsis>, LayoutError> {
    // The ellipsis continues the last text on the line, or the nearest text before it.
    let style_index = fragments[..line.fragments.end]
        .iter()
        .rev()
        .find_map(Fragment::style_index)
        .unwrap_or(data.root_style);
    let width = mcx.measure_styled(&data.styles[style_index], ellipsis, 0..ellipsis.len())?;
    if exceeds(width, max_width) {
        tracing::debug!(
            ellipsis_width = width,
            max_width,
            "ellipsis does not fit on a line, omitting it"
        );
        return Ok(None);
    }

    let mut kept: Vec<Fragment> = fragments[line.fragments.clone()].to_vec();
    loop {
        while kept.last().is_some_and(Fragment::is_blank) {
            kept.pop();
        }
        let Some(last) = kept.last().copied() else {
            break;
        };
        if !exceeds(trimmed_width(&kept) + width, max_width) {
            break;
        }
        kept.pop();
        if let FragmentKind::Text { style_index } = last.kind {
            let visible = &data.text[last.start..last.visible_end];
            let cut = last.start + prev_grapheme_offset(visible, visible.len());
            if cut > last.start {
                kept.push(Fragment::text(
                    data,
                    mcx,
                    last.span,
                    style_index,
                    last.start..cut,
                    None,
                )?);
            }
        }
    }
    // Whitespace and line breaks before the ellipsis are dropped with the rest.
    if let Some(last) = kept.last_mut() {
        if let (FragmentKind::Text { style_index }, true) =
            (last.kind, last.visible_end < last.end)
        {
            *last = Fragment::text(
                data,
                mcx,
                last.span,
                style_index,
                last.start..last.visible_end,
                last.break_after,
            )?;
        }
    }

    fragments.truncate(line.fragments.start);
    fragments.extend(kept);
    line.fragments = line.fragments.start..fragments.len();
    line.reason = BreakReason::None;
    Ok(Some(FittedEllipsis { style_index, width }))
}
