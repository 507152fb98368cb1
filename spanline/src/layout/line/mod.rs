// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line breaking and line geometry.

mod ellipsis;
mod greedy;

use alloc::string::String;
use alloc::vec::Vec;

use self::ellipsis::FittedEllipsis;
use self::greedy::{BrokenLine, Fragment, FragmentKind};
use super::alignment::align;
use super::{
    BreakReason, Constraints, EllipsisBox, IDEOGRAPHIC_BASELINE_RATIO, LayoutResult, LineMetrics,
    PlaceholderBox, RangeBox, SpanBox, style_metrics,
};
use crate::error::LayoutError;
use crate::measure::{FontMetrics, MeasureBackend, MeasureContext};
use crate::paragraph::{ParagraphData, Span};
use crate::style::{Brush, TextAlign, TextStyle};

/// Lays out the whole paragraph against normalized `constraints`.
pub(crate) fn compute_layout<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
    constraints: Constraints,
) -> Result<LayoutResult, LayoutError> {
    let max_width = constraints.width;
    let mut fragments = greedy::fragments(data, mcx)?;
    let (min_intrinsic_width, max_intrinsic_width) = greedy::intrinsic_widths(&fragments);
    let mut lines = greedy::break_lines(&fragments, max_width);

    let mut did_exceed_max_lines = false;
    let mut ellipsis = None;
    if let Some(max_lines) = data.style.max_lines {
        assert!(max_lines > 0, "max_lines must be at least 1");
        if lines.len() > max_lines {
            lines.truncate(max_lines);
            did_exceed_max_lines = true;
            if let Some(last) = lines.last_mut() {
                last.reason = BreakReason::None;
                if let Some(text) = data.style.ellipsis.as_deref().filter(|e| !e.is_empty()) {
                    ellipsis = ellipsis::truncate_line(
                        data,
                        mcx,
                        &mut fragments,
                        last,
                        text,
                        max_width,
                    )?
                    .map(|fitted| (String::from(text), fitted));
                }
            }
        }
    }

    let alignment = data.style.effective_align();
    let mut metrics_cache = Vec::new();
    let mut out: Vec<LineMetrics> = Vec::with_capacity(lines.len());
    let mut top = 0.0;
    for (line_number, line) in lines.iter().enumerate() {
        let is_last = line_number + 1 == lines.len();
        let mut builder = LineBuilder {
            data,
            mcx: &mut *mcx,
            metrics_cache: &mut metrics_cache,
        };
        let metrics = builder.build(
            &fragments,
            line,
            line_number,
            top,
            alignment == TextAlign::Justify && line.reason == BreakReason::Regular,
            if is_last { ellipsis.as_ref() } else { None },
        )?;
        top = metrics.bottom();
        out.push(metrics);
    }

    let longest_line = out.iter().map(|line| line.width).fold(0.0, f32::max);
    let alignment_width = if max_width.is_finite() {
        max_width
    } else {
        longest_line
    };
    align(&mut out, &data.text, alignment_width, alignment, data.is_rtl());

    let (alphabetic_baseline, ideographic_baseline) =
        baselines(data, mcx, &mut metrics_cache, &fragments, out.first())?;

    Ok(LayoutResult {
        constraints,
        height: out.last().map_or(0.0, LineMetrics::bottom),
        lines: out,
        width: max_width,
        min_intrinsic_width,
        max_intrinsic_width,
        longest_line,
        alphabetic_baseline,
        ideographic_baseline,
        did_exceed_max_lines,
    })
}

/// Returns how far below the alphabetic baseline a font's ideographic baseline lies.
fn ideographic_drop(metrics: FontMetrics) -> f32 {
    match metrics.ideographic_baseline {
        Some(offset) => offset - metrics.ascent,
        None => metrics.ascent * (IDEOGRAPHIC_BASELINE_RATIO - 1.0),
    }
}

/// Returns how far a line of `style` extends above and below its baseline,
/// with any extra line height split evenly between the two.
fn line_extents<B: Brush>(metrics: FontMetrics, style: &TextStyle<B>) -> (f32, f32) {
    match style.line_height {
        Some(line_height) => {
            let half_leading = (style.font_size * line_height - metrics.height()) * 0.5;
            (metrics.ascent + half_leading, metrics.descent + half_leading)
        }
        None => (metrics.ascent, metrics.descent),
    }
}

fn baselines<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
    metrics_cache: &mut Vec<Option<FontMetrics>>,
    fragments: &[Fragment],
    first_line: Option<&LineMetrics>,
) -> Result<(f32, f32), LayoutError> {
    let style_index = first_line
        .and_then(|line| {
            fragments
                .iter()
                .take_while(|f| f.start < line.end_index_including_newline)
                .find_map(Fragment::style_index)
        })
        .unwrap_or(data.root_style);
    let metrics = style_metrics(data, mcx, metrics_cache, style_index)?;
    let alphabetic = match first_line {
        Some(line) => line.baseline,
        None => line_extents(metrics, &data.styles[style_index]).0,
    };
    let ideographic = match metrics.ideographic_baseline {
        Some(offset) => alphabetic - metrics.ascent + offset,
        None => alphabetic * IDEOGRAPHIC_BASELINE_RATIO,
    };
    Ok((alphabetic, ideographic))
}

struct LineBuilder<'a, B: Brush, M: MeasureBackend> {
    data: &'a ParagraphData<B>,
    mcx: &'a mut MeasureContext<M>,
    metrics_cache: &'a mut Vec<Option<FontMetrics>>,
}

impl<B: Brush, M: MeasureBackend> LineBuilder<'_, B, M> {
    fn metrics(&mut self, style_index: usize) -> Result<FontMetrics, LayoutError> {
        style_metrics(self.data, self.mcx, self.metrics_cache, style_index)
    }

    /// Returns the style that an empty or placeholder-only line takes its
    /// metrics from: the last text before the end of the line.
    fn fallback_style(&self, fragments: &[Fragment], line: &BrokenLine) -> usize {
        fragments[..line.fragments.end]
            .iter()
            .rev()
            .find_map(Fragment::style_index)
            .unwrap_or(self.data.root_style)
    }

    fn build(
        &mut self,
        all_fragments: &[Fragment],
        line: &BrokenLine,
        line_number: usize,
        top: f32,
        box_per_fragment: bool,
        ellipsis: Option<&(String, FittedEllipsis)>,
    ) -> Result<LineMetrics, LayoutError> {
        let data = self.data;
        let fragments = &all_fragments[line.fragments.clone()];
        let start_index = line.text_start;
        let end_index = fragments.last().map_or(start_index, |f| f.content_end);
        let end_index_including_newline = fragments.last().map_or(start_index, |f| f.end);
        let visible_end = fragments
            .iter()
            .rev()
            .find(|f| !f.is_blank())
            .map_or(start_index, |f| f.visible_end);

        // Vertical metrics: the tallest text and placeholders share one baseline.
        let mut font_ascent = 0.0_f32;
        let mut font_descent = 0.0_f32;
        let mut font_drop = 0.0_f32;
        let mut ascent = 0.0_f32;
        let mut descent = 0.0_f32;
        let mut has_text = false;
        for fragment in fragments {
            if let Some(style_index) = fragment.style_index() {
                let metrics = self.metrics(style_index)?;
                let (above, below) = line_extents(metrics, &data.styles[style_index]);
                font_ascent = font_ascent.max(metrics.ascent);
                font_descent = font_descent.max(metrics.descent);
                font_drop = font_drop.max(ideographic_drop(metrics));
                ascent = ascent.max(above);
                descent = descent.max(below);
                has_text = true;
            }
        }
        let has_placeholders = fragments.iter().any(|f| f.kind == FragmentKind::Placeholder);
        if !has_text {
            let style_index = self.fallback_style(all_fragments, line);
            let metrics = self.metrics(style_index)?;
            font_ascent = metrics.ascent;
            font_descent = metrics.descent;
            font_drop = ideographic_drop(metrics);
            if !has_placeholders {
                (ascent, descent) = line_extents(metrics, &data.styles[style_index]);
            }
        }
        let (mut content_ascent, mut content_descent) = if has_text {
            (font_ascent, font_descent)
        } else {
            (0.0, 0.0)
        };
        for fragment in fragments {
            if let Span::Placeholder(span) = &data.spans[fragment.span] {
                let (above, below) = span.vertical_extent(font_ascent, font_descent, font_drop);
                content_ascent = content_ascent.max(above);
                content_descent = content_descent.max(below);
                ascent = ascent.max(above);
                descent = descent.max(below);
            }
        }
        let baseline = top + ascent;

        // Horizontal positions in logical order; alignment moves them later.
        let mut boxes: Vec<RangeBox> = Vec::new();
        let mut x = 0.0;
        for fragment in fragments {
            let left = x;
            x += fragment.width;
            match &data.spans[fragment.span] {
                Span::Text(span) => {
                    if fragment.start == fragment.content_end {
                        continue;
                    }
                    if !box_per_fragment {
                        if let Some(RangeBox::Span(last)) = boxes.last_mut() {
                            if last.span == fragment.span && last.range.end == fragment.start {
                                last.range.end = fragment.content_end;
                                last.right = x;
                                continue;
                            }
                        }
                    }
                    let metrics = self.metrics(span.style_index)?;
                    boxes.push(RangeBox::Span(SpanBox {
                        span: fragment.span,
                        style_index: span.style_index,
                        range: fragment.start..fragment.content_end,
                        left,
                        right: x,
                        top: baseline - metrics.ascent,
                        bottom: baseline + metrics.descent,
                        baseline,
                    }));
                }
                Span::Placeholder(span) => {
                    let (above, below) = span.vertical_extent(font_ascent, font_descent, font_drop);
                    boxes.push(RangeBox::Placeholder(PlaceholderBox {
                        span: fragment.span,
                        index: span.index,
                        range: span.range.clone(),
                        left,
                        right: x,
                        top: baseline - above,
                        bottom: baseline + below,
                    }));
                }
            }
        }

        let mut width = greedy::trimmed_width(fragments);
        let mut width_with_trailing_spaces = greedy::full_width(fragments);
        let (ellipsis, ellipsis_box) = match ellipsis {
            Some((text, fitted)) => {
                let ellipsis_box = EllipsisBox {
                    style_index: fitted.style_index,
                    left: width,
                    right: width + fitted.width,
                };
                width += fitted.width;
                width_with_trailing_spaces = width_with_trailing_spaces.max(width);
                (Some(text.clone()), Some(ellipsis_box))
            }
            None => (None, None),
        };

        Ok(LineMetrics {
            line_number,
            start_index,
            end_index,
            end_index_including_newline,
            break_reason: line.reason,
            width,
            width_with_trailing_spaces,
            left: 0.0,
            top,
            ascent,
            descent,
            height: ascent + descent,
            baseline,
            boxes,
            ellipsis,
            ellipsis_box,
            content_ascent,
            content_descent,
            visible_end,
            justify_extra: 0.0,
        })
    }
}
