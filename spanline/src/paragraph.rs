// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The flat span paragraph model.

use alloc::string::String;
use alloc::vec::Vec;
use core::cell::OnceCell;
use core::ops::Range;

use peniko::kurbo::Point;

use crate::analysis::{next_break_index, prev_break_index};
use crate::error::LayoutError;
use crate::layout::{
    self, BoxHeightStyle, BoxWidthStyle, Constraints, LayoutResult, LineMetrics, TextBox,
    TextPosition,
};
use crate::measure::{MeasureBackend, MeasureContext};
use crate::paint::{self, StructuredText, Surface};
use crate::placeholder::Placeholder;
use crate::style::{Brush, ParagraphStyle, TextBaseline, TextStyle};

/// A run of text in a single resolved style.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TextSpan {
    /// The covered part of the paragraph's text.
    pub range: Range<usize>,
    /// Index of the resolved style; see [`Paragraph::span_style`].
    pub style_index: usize,
}

/// A placeholder box embedded in the text.
#[derive(Clone, PartialEq, Debug)]
pub struct PlaceholderSpan {
    /// The placeholder character.
    pub range: Range<usize>,
    /// Index of the placeholder among the paragraph's placeholders.
    pub index: usize,
    /// Size and alignment of the box.
    pub placeholder: Placeholder,
    /// The baseline of the text that the box's baseline offset refers to.
    pub baseline: TextBaseline,
}

impl PlaceholderSpan {
    /// Computes how far the box extends above and below the alphabetic
    /// baseline of its line.
    pub(crate) fn vertical_extent(
        &self,
        ascent: f32,
        descent: f32,
        ideographic_drop: f32,
    ) -> (f32, f32) {
        self.placeholder
            .vertical_extent(self.baseline, ascent, descent, ideographic_drop)
    }
}

/// A piece of a paragraph.
///
/// Spans are ordered, do not overlap and together cover the paragraph's text.
#[derive(Clone, PartialEq, Debug)]
pub enum Span {
    /// Text.
    Text(TextSpan),
    /// A placeholder.
    Placeholder(PlaceholderSpan),
}

impl Span {
    /// Returns the covered part of the paragraph's text.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Text(span) => span.range.clone(),
            Self::Placeholder(span) => span.range.clone(),
        }
    }
}

/// Everything a paragraph was built from.
#[derive(Clone, Debug)]
pub(crate) struct ParagraphData<B: Brush> {
    pub(crate) text: String,
    pub(crate) spans: Vec<Span>,
    pub(crate) styles: Vec<TextStyle<B>>,
    pub(crate) root_style: usize,
    pub(crate) style: ParagraphStyle,
    pub(crate) placeholder_count: usize,
    pub(crate) can_draw_on_fast_path: bool,
}

impl<B: Brush> ParagraphData<B> {
    pub(crate) fn is_rtl(&self) -> bool {
        self.style.text_direction.is_rtl()
    }
}

#[derive(Clone, Debug, Default)]
enum LayoutState {
    #[default]
    None,
    LaidOut(LayoutResult),
}

/// A paragraph of styled text.
///
/// The content of a paragraph never changes after it is built. It can be laid
/// out any number of times; laying it out again with the constraints of the
/// last layout does nothing.
///
/// Geometry accessors return zero, and queries return nothing, until the
/// paragraph is laid out.
#[derive(Clone, Debug)]
pub struct Paragraph<B: Brush> {
    data: ParagraphData<B>,
    state: LayoutState,
    structure: OnceCell<StructuredText<B>>,
}

impl<B: Brush> Paragraph<B> {
    pub(crate) fn new(data: ParagraphData<B>) -> Self {
        Self {
            data,
            state: LayoutState::None,
            structure: OnceCell::new(),
        }
    }

    /// Returns the paragraph's text, with a [`PLACEHOLDER_CHAR`](crate::PLACEHOLDER_CHAR)
    /// for every placeholder.
    pub fn text(&self) -> &str {
        &self.data.text
    }

    /// Returns the spans.
    pub fn spans(&self) -> &[Span] {
        &self.data.spans
    }

    /// Returns the resolved style of a text span.
    pub fn span_style(&self, span: &TextSpan) -> &TextStyle<B> {
        &self.data.styles[span.style_index]
    }

    /// Returns the table of resolved styles that spans index into.
    pub fn styles(&self) -> &[TextStyle<B>] {
        &self.data.styles
    }

    /// Returns the paragraph-wide style.
    pub fn paragraph_style(&self) -> &ParagraphStyle {
        &self.data.style
    }

    /// Returns the number of placeholders.
    pub fn placeholder_count(&self) -> usize {
        self.data.placeholder_count
    }

    /// Returns `true` if no span needs decorations or font features, so that
    /// the paragraph can be painted with plain text drawing calls.
    pub fn can_draw_on_fast_path(&self) -> bool {
        self.data.can_draw_on_fast_path
    }

    /// Lays out the paragraph against `constraints`.
    ///
    /// The constraint width is floored to a whole unit first. If the floored
    /// constraints equal those of the current layout, nothing is recomputed.
    /// If measuring fails, the paragraph is left without a layout.
    ///
    /// # Panics
    ///
    /// Panics if the constraint width is NaN.
    pub fn layout<M: MeasureBackend>(
        &mut self,
        mcx: &mut MeasureContext<M>,
        constraints: Constraints,
    ) -> Result<(), LayoutError> {
        let constraints = constraints.normalized();
        let _span = tracing::trace_span!("layout", width = constraints.width).entered();
        if let LayoutState::LaidOut(result) = &self.state {
            if result.constraints == constraints {
                tracing::trace!("constraints unchanged, keeping layout");
                return Ok(());
            }
        }
        self.state = LayoutState::None;
        self.structure = OnceCell::new();
        let result = layout::compute_layout(&self.data, mcx, constraints)?;
        tracing::debug!(
            lines = result.lines.len(),
            height = result.height,
            did_exceed_max_lines = result.did_exceed_max_lines,
            "laid out paragraph"
        );
        self.state = LayoutState::LaidOut(result);
        Ok(())
    }

    /// Returns the current layout, if any.
    pub fn layout_result(&self) -> Option<&LayoutResult> {
        match &self.state {
            LayoutState::LaidOut(result) => Some(result),
            LayoutState::None => None,
        }
    }

    /// Returns `true` if the paragraph has a layout.
    pub fn is_laid_out(&self) -> bool {
        self.layout_result().is_some()
    }

    fn metric(&self, f: impl FnOnce(&LayoutResult) -> f32) -> f32 {
        self.layout_result().map_or(0.0, f)
    }

    /// Returns the width of the paragraph, which is the floored constraint width.
    pub fn width(&self) -> f32 {
        self.metric(LayoutResult::width)
    }

    /// Returns the total height of all lines.
    pub fn height(&self) -> f32 {
        self.metric(LayoutResult::height)
    }

    /// Returns the width of the widest line.
    pub fn longest_line(&self) -> f32 {
        self.metric(LayoutResult::longest_line)
    }

    /// Returns the width of the widest unbreakable piece of content.
    pub fn min_intrinsic_width(&self) -> f32 {
        self.metric(LayoutResult::min_intrinsic_width)
    }

    /// Returns the width the paragraph would take up without wrapping.
    pub fn max_intrinsic_width(&self) -> f32 {
        self.metric(LayoutResult::max_intrinsic_width)
    }

    /// Returns the distance from the top to the first alphabetic baseline.
    pub fn alphabetic_baseline(&self) -> f32 {
        self.metric(LayoutResult::alphabetic_baseline)
    }

    /// Returns the distance from the top to the first ideographic baseline.
    pub fn ideographic_baseline(&self) -> f32 {
        self.metric(LayoutResult::ideographic_baseline)
    }

    /// Returns `true` if lines were dropped because of the paragraph's `max_lines`.
    pub fn did_exceed_max_lines(&self) -> bool {
        self.layout_result()
            .is_some_and(LayoutResult::did_exceed_max_lines)
    }

    /// Returns the lines.
    pub fn line_metrics(&self) -> &[LineMetrics] {
        self.layout_result()
            .map(LayoutResult::lines)
            .unwrap_or_default()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.line_metrics().len()
    }

    /// Returns the line with the given index.
    pub fn line_metrics_at(&self, line_number: usize) -> Option<&LineMetrics> {
        self.line_metrics().get(line_number)
    }

    /// Returns the index of the line containing `offset`.
    pub fn line_number_at(&self, offset: usize) -> Option<usize> {
        self.layout_result()?.line_number_at(offset)
    }

    /// Paints the paragraph onto `surface` with its top left corner at `origin`.
    ///
    /// Does nothing if the paragraph is not laid out.
    pub fn paint(&self, surface: &mut impl Surface<B>, origin: Point) {
        let Some(result) = self.layout_result() else {
            tracing::warn!("painting a paragraph that was not laid out");
            return;
        };
        if self.data.can_draw_on_fast_path {
            paint::paint_fast(&self.data, result, surface, origin);
        } else if let Some(structure) = self.structure() {
            surface.fill_structured(structure, origin);
        }
    }

    /// Returns the structural representation of the laid out paragraph.
    ///
    /// It is built on first use and reused until the next layout that changes
    /// the geometry.
    pub fn structure(&self) -> Option<&StructuredText<B>> {
        let result = self.layout_result()?;
        Some(
            self.structure
                .get_or_init(|| paint::build_structure(&self.data, result)),
        )
    }

    /// Returns the rectangles covering `start..end`, line by line.
    ///
    /// The range is clamped to the text and may be empty or inverted, in which
    /// case nothing is returned.
    pub fn get_boxes_for_range<M: MeasureBackend>(
        &self,
        mcx: &mut MeasureContext<M>,
        start: usize,
        end: usize,
        height_style: BoxHeightStyle,
        width_style: BoxWidthStyle,
    ) -> Result<Vec<TextBox>, LayoutError> {
        let Some(result) = self.layout_result() else {
            return Ok(Vec::new());
        };
        let end = end.min(self.data.text.len());
        if start >= end {
            return Ok(Vec::new());
        }
        layout::boxes_for_range(
            &self.data,
            result,
            mcx,
            start..end,
            height_style,
            width_style,
        )
    }

    /// Returns the boxes of all placeholders that were laid out, in order.
    pub fn get_boxes_for_placeholders(&self) -> Vec<TextBox> {
        self.layout_result()
            .map(|result| layout::boxes_for_placeholders(&self.data, result))
            .unwrap_or_default()
    }

    /// Returns the text position closest to `point`, relative to the paragraph.
    pub fn get_position_for_offset<M: MeasureBackend>(
        &self,
        mcx: &mut MeasureContext<M>,
        point: Point,
    ) -> Result<TextPosition, LayoutError> {
        match self.layout_result() {
            Some(result) => layout::position_for_point(&self.data, result, mcx, point),
            None => Ok(TextPosition::default()),
        }
    }

    /// Returns the word around `offset`.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is inside the encoding of a character.
    pub fn get_word_boundary(&self, offset: usize) -> Range<usize> {
        let text = &self.data.text;
        prev_break_index(text, offset)..next_break_index(text, offset)
    }

    /// Returns the text of the line containing `offset`, excluding a hard line break.
    ///
    /// Offsets past the end of the text belong to the last line.
    pub fn get_line_boundary(&self, offset: usize) -> Range<usize> {
        self.layout_result()
            .map(|result| layout::line_boundary(result, offset))
            .unwrap_or_default()
    }
}
