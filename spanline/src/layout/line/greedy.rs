// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Greedy line breaking.

use alloc::vec::Vec;
use core::ops::Range;

use crate::analysis::{BreakKind, is_hard_break, is_trailing_space, line_breaks};
use crate::error::LayoutError;
use crate::layout::BreakReason;
use crate::measure::{MeasureBackend, MeasureContext};
use crate::paragraph::{ParagraphData, Span};
use crate::style::Brush;

/// Tolerance for comparing sums of rounded widths against the line width.
const WIDTH_EPSILON: f32 = 1e-3;

pub(super) fn exceeds(width: f32, max_width: f32) -> bool {
    width - max_width > WIDTH_EPSILON
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub(super) enum FragmentKind {
    Text { style_index: usize },
    Placeholder,
}

/// A piece of a span between two line-break opportunities.
#[derive(Copy, Clone, PartialEq, Debug)]
pub(super) struct Fragment {
    pub(super) span: usize,
    pub(super) kind: FragmentKind,
    pub(super) start: usize,
    /// End of the fragment, including hard line breaks.
    pub(super) end: usize,
    /// End of the fragment, excluding hard line breaks.
    pub(super) content_end: usize,
    /// End of the fragment, excluding trailing whitespace.
    pub(super) visible_end: usize,
    pub(super) width: f32,
    pub(super) visible_width: f32,
    pub(super) break_after: Option<BreakKind>,
}

impl Fragment {
    pub(super) fn text<B: Brush, M: MeasureBackend>(
        data: &ParagraphData<B>,
        mcx: &mut MeasureContext<M>,
        span: usize,
        style_index: usize,
        range: Range<usize>,
        break_after: Option<BreakKind>,
    ) -> Result<Self, LayoutError> {
        let text = &data.text[range.clone()];
        let content_end = range.start + text.trim_end_matches(is_hard_break).len();
        let visible_end =
            range.start + data.text[range.start..content_end].trim_end_matches(is_trailing_space).len();
        let style = &data.styles[style_index];
        let width = mcx.measure_styled(style, &data.text, range.start..content_end)?;
        let visible_width = if visible_end == content_end {
            width
        } else {
            mcx.measure_styled(style, &data.text, range.start..visible_end)?
        };
        Ok(Self {
            span,
            kind: FragmentKind::Text { style_index },
            start: range.start,
            end: range.end,
            content_end,
            visible_end,
            width,
            visible_width,
            break_after,
        })
    }

    pub(super) fn style_index(&self) -> Option<usize> {
        match self.kind {
            FragmentKind::Text { style_index } => Some(style_index),
            FragmentKind::Placeholder => None,
        }
    }

    /// Returns `true` for text fragments without visible content.
    pub(super) fn is_blank(&self) -> bool {
        self.kind != FragmentKind::Placeholder && self.visible_end == self.start
    }
}

/// Splits every span at the line-break opportunities of the paragraph's text
/// and measures the pieces.
pub(super) fn fragments<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
) -> Result<Vec<Fragment>, LayoutError> {
    let mut breaks = line_breaks(&data.text).peekable();
    let mut fragments = Vec::with_capacity(data.spans.len());
    for (span_index, span) in data.spans.iter().enumerate() {
        match span {
            Span::Text(span) => {
                let mut start = span.range.start;
                while start < span.range.end {
                    while breaks.next_if(|b| b.index <= start).is_some() {}
                    let (end, break_after) = match breaks.peek() {
                        Some(b) if b.index <= span.range.end => (b.index, Some(b.kind)),
                        _ => (span.range.end, None),
                    };
                    fragments.push(Fragment::text(
                        data,
                        mcx,
                        span_index,
                        span.style_index,
                        start..end,
                        break_after,
                    )?);
                    start = end;
                }
            }
            Span::Placeholder(span) => {
                while breaks.next_if(|b| b.index <= span.range.start).is_some() {}
                let break_after = breaks
                    .peek()
                    .filter(|b| b.index == span.range.end)
                    .map(|b| b.kind);
                let width = span.placeholder.width;
                fragments.push(Fragment {
                    span: span_index,
                    kind: FragmentKind::Placeholder,
                    start: span.range.start,
                    end: span.range.end,
                    content_end: span.range.end,
                    visible_end: span.range.end,
                    width,
                    visible_width: width,
                    break_after,
                });
            }
        }
    }
    Ok(fragments)
}

/// Returns the width of `fragments` with trailing whitespace hanging.
pub(super) fn trimmed_width(fragments: &[Fragment]) -> f32 {
    let Some(last_visible) = fragments.iter().rposition(|f| !f.is_blank()) else {
        return 0.0;
    };
    full_width(&fragments[..last_visible]) + fragments[last_visible].visible_width
}

/// Returns the width of `fragments` including trailing whitespace.
pub(super) fn full_width(fragments: &[Fragment]) -> f32 {
    fragments.iter().map(|f| f.width).sum()
}

/// A line as a range of fragments.
#[derive(Clone, PartialEq, Debug)]
pub(super) struct BrokenLine {
    pub(super) fragments: Range<usize>,
    /// Text offset where the line starts, kept even if truncation empties it.
    pub(super) text_start: usize,
    pub(super) reason: BreakReason,
}

impl BrokenLine {
    fn new(all_fragments: &[Fragment], fragments: Range<usize>, reason: BreakReason) -> Self {
        let text_start = match all_fragments.get(fragments.start) {
            Some(first) => first.start,
            None => all_fragments.last().map_or(0, |f| f.end),
        };
        Self {
            fragments,
            text_start,
            reason,
        }
    }
}

/// Returns the ranges of fragments between consecutive break opportunities.
fn units(fragments: &[Fragment]) -> impl Iterator<Item = (Range<usize>, BreakKind)> + '_ {
    let mut start = 0;
    fragments
        .iter()
        .enumerate()
        .filter_map(move |(i, fragment)| {
            let kind = fragment.break_after?;
            let unit = start..i + 1;
            start = i + 1;
            Some((unit, kind))
        })
}

/// Breaks `fragments` into lines no wider than `max_width`, where possible.
///
/// A unit that is wider than `max_width` on its own gets a line of its own.
pub(super) fn break_lines(fragments: &[Fragment], max_width: f32) -> Vec<BrokenLine> {
    let mut lines = Vec::new();
    let mut line_start = 0;
    let mut line_width = 0.0;
    let mut last_kind = None;
    for (unit, kind) in units(fragments) {
        let unit_visible = trimmed_width(&fragments[unit.clone()]);
        if unit.start > line_start && exceeds(line_width + unit_visible, max_width) {
            lines.push(BrokenLine::new(
                fragments,
                line_start..unit.start,
                BreakReason::Regular,
            ));
            line_start = unit.start;
            line_width = 0.0;
        }
        line_width += full_width(&fragments[unit.clone()]);
        if kind == BreakKind::Hard {
            lines.push(BrokenLine::new(
                fragments,
                line_start..unit.end,
                BreakReason::Explicit,
            ));
            line_start = unit.end;
            line_width = 0.0;
        }
        last_kind = Some(kind);
    }
    if line_start < fragments.len() || last_kind == Some(BreakKind::Hard) {
        // Either content that did not end in a hard break, or the empty line
        // after a final hard break.
        lines.push(BrokenLine::new(
            fragments,
            line_start..fragments.len(),
            BreakReason::None,
        ));
    }
    lines
}

/// Returns the minimum and maximum intrinsic widths.
pub(super) fn intrinsic_widths(fragments: &[Fragment]) -> (f32, f32) {
    let mut min_width = 0.0_f32;
    let mut max_width = 0.0_f32;
    let mut segment_start = 0;
    for (unit, kind) in units(fragments) {
        min_width = min_width.max(trimmed_width(&fragments[unit.clone()]));
        if kind != BreakKind::Soft {
            max_width = max_width.max(trimmed_width(&fragments[segment_start..unit.end]));
            segment_start = unit.end;
        }
    }
    (min_width, max_width)
}
