// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout types.

mod alignment;
mod cursor;
mod line;
mod selection;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use peniko::kurbo::Rect;

use crate::error::LayoutError;
use crate::measure::{FontMetrics, MeasureBackend, MeasureContext};
use crate::paragraph::ParagraphData;
use crate::style::{Brush, TextDirection};
use crate::util::floor_width;

pub(crate) use cursor::{line_boundary, position_for_point};
pub(crate) use line::compute_layout;
pub(crate) use selection::{boxes_for_placeholders, boxes_for_range};

/// Ratio between the ideographic and the alphabetic baseline of a paragraph.
///
/// Used when the measurement backend does not report an ideographic baseline.
/// The value was measured on a single Latin font and is only an approximation
/// for any other font.
pub const IDEOGRAPHIC_BASELINE_RATIO: f32 = 1.166_249_9;

/// The width a paragraph is laid out against.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraints {
    /// Maximum line width. May be infinite.
    pub width: f32,
}

impl Constraints {
    /// Creates constraints with the given maximum line width.
    pub fn new(width: f32) -> Self {
        Self { width }
    }

    /// Creates constraints that never wrap lines.
    pub fn unbounded() -> Self {
        Self::new(f32::INFINITY)
    }

    /// Floors the width to a whole unit, clamping negative widths to zero.
    ///
    /// # Panics
    ///
    /// Panics if the width is NaN.
    pub(crate) fn normalized(self) -> Self {
        assert!(!self.width.is_nan(), "layout width must not be NaN");
        Self::new(floor_width(self.width))
    }
}

/// Reason that a line was ended.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub enum BreakReason {
    /// The last line of the laid out content.
    #[default]
    None,
    /// The next word did not fit.
    Regular,
    /// The line ends with a hard line break.
    Explicit,
}

/// Which side of an offset a position belongs to when the offset sits on a
/// line boundary.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub enum Affinity {
    /// The position belongs to the character after the offset.
    #[default]
    Downstream,
    /// The position belongs to the character before the offset.
    Upstream,
}

/// A position in a paragraph's text.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub struct TextPosition {
    /// Byte offset into the paragraph's text.
    pub offset: usize,
    /// Side of `offset` that the position belongs to.
    pub affinity: Affinity,
}

impl TextPosition {
    /// Creates a position.
    pub fn new(offset: usize, affinity: Affinity) -> Self {
        Self { offset, affinity }
    }
}

/// How tall the boxes returned by [`Paragraph::get_boxes_for_range`] are.
///
/// [`Paragraph::get_boxes_for_range`]: crate::Paragraph::get_boxes_for_range
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub enum BoxHeightStyle {
    /// Each box is as tall as the font of its own run.
    #[default]
    Tight,
    /// Every box on a line is as tall as the tallest run or placeholder of the line.
    Max,
    /// Boxes cover the whole line, with line spacing split evenly above and below.
    IncludeLineSpacingMiddle,
    /// Like [`Max`](Self::Max), extended up to the content of the line above.
    ///
    /// On the first line, boxes extend to the top of the line.
    IncludeLineSpacingTop,
    /// Like [`Max`](Self::Max), extended down to the content of the line below.
    ///
    /// On the last line, boxes extend to the bottom of the line.
    IncludeLineSpacingBottom,
}

/// How wide the boxes returned by [`Paragraph::get_boxes_for_range`] are.
///
/// [`Paragraph::get_boxes_for_range`]: crate::Paragraph::get_boxes_for_range
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
pub enum BoxWidthStyle {
    /// Boxes are as wide as the selected text.
    #[default]
    Tight,
    /// On lines that the range continues past, an extra box reaches to the
    /// paragraph's end edge. On lines that the range started before, an extra
    /// box reaches to the start edge.
    Max,
}

/// A rectangle covering part of the paragraph.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct TextBox {
    /// The covered area, relative to the paragraph's top left corner.
    pub rect: Rect,
    /// Direction of the text in the box.
    pub direction: TextDirection,
}

/// A run of one text span on one line.
#[derive(Clone, PartialEq, Debug)]
pub struct SpanBox {
    /// Index of the span in [`Paragraph::spans`](crate::Paragraph::spans).
    pub span: usize,
    /// Index of the span's resolved style.
    pub style_index: usize,
    /// The text covered by the box.
    pub range: Range<usize>,
    /// Left edge, relative to the paragraph.
    pub left: f32,
    /// Right edge, relative to the paragraph.
    pub right: f32,
    /// Top of the font's em box.
    pub top: f32,
    /// Bottom of the font's em box.
    pub bottom: f32,
    /// Alphabetic baseline of the line.
    pub baseline: f32,
}

/// A placeholder on a line.
#[derive(Clone, PartialEq, Debug)]
pub struct PlaceholderBox {
    /// Index of the span in [`Paragraph::spans`](crate::Paragraph::spans).
    pub span: usize,
    /// Index of the placeholder among the paragraph's placeholders.
    pub index: usize,
    /// The placeholder character.
    pub range: Range<usize>,
    /// Left edge, relative to the paragraph.
    pub left: f32,
    /// Right edge, relative to the paragraph.
    pub right: f32,
    /// Top edge, relative to the paragraph.
    pub top: f32,
    /// Bottom edge, relative to the paragraph.
    pub bottom: f32,
}

/// A positioned piece of a line.
#[derive(Clone, PartialEq, Debug)]
pub enum RangeBox {
    /// Text from a text span.
    Span(SpanBox),
    /// A placeholder.
    Placeholder(PlaceholderBox),
}

impl RangeBox {
    /// Returns the text covered by the box.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Span(b) => b.range.clone(),
            Self::Placeholder(b) => b.range.clone(),
        }
    }

    /// Returns the index of the span the box belongs to.
    pub fn span(&self) -> usize {
        match self {
            Self::Span(b) => b.span,
            Self::Placeholder(b) => b.span,
        }
    }

    /// Returns the left edge.
    pub fn left(&self) -> f32 {
        match self {
            Self::Span(b) => b.left,
            Self::Placeholder(b) => b.left,
        }
    }

    /// Returns the right edge.
    pub fn right(&self) -> f32 {
        match self {
            Self::Span(b) => b.right,
            Self::Placeholder(b) => b.right,
        }
    }

    /// Returns the top edge.
    pub fn top(&self) -> f32 {
        match self {
            Self::Span(b) => b.top,
            Self::Placeholder(b) => b.top,
        }
    }

    /// Returns the bottom edge.
    pub fn bottom(&self) -> f32 {
        match self {
            Self::Span(b) => b.bottom,
            Self::Placeholder(b) => b.bottom,
        }
    }

    /// Returns the width.
    pub fn width(&self) -> f32 {
        self.right() - self.left()
    }

    /// Returns the box as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.left().into(),
            self.top().into(),
            self.right().into(),
            self.bottom().into(),
        )
    }

    fn shift(&mut self, dx: f32) {
        let (left, right) = match self {
            Self::Span(b) => (&mut b.left, &mut b.right),
            Self::Placeholder(b) => (&mut b.left, &mut b.right),
        };
        *left += dx;
        *right += dx;
    }

    fn set_horizontal(&mut self, new_left: f32, new_right: f32) {
        let (left, right) = match self {
            Self::Span(b) => (&mut b.left, &mut b.right),
            Self::Placeholder(b) => (&mut b.left, &mut b.right),
        };
        *left = new_left;
        *right = new_right;
    }
}

/// Where the ellipsis of a truncated line is drawn.
#[derive(Clone, PartialEq, Debug)]
pub(crate) struct EllipsisBox {
    pub(crate) style_index: usize,
    pub(crate) left: f32,
    pub(crate) right: f32,
}

/// Geometry of a single line.
#[derive(Clone, PartialEq, Debug)]
pub struct LineMetrics {
    /// Zero-based index of the line.
    pub line_number: usize,
    /// Offset of the first character of the line.
    pub start_index: usize,
    /// Offset past the last character of the line, excluding a hard line break.
    pub end_index: usize,
    /// Offset past the last character of the line, including a hard line break.
    pub end_index_including_newline: usize,
    /// Why the line ended.
    pub break_reason: BreakReason,
    /// Width of the content, excluding trailing whitespace and including the ellipsis.
    pub width: f32,
    /// Width of the content including trailing whitespace.
    pub width_with_trailing_spaces: f32,
    /// Offset of the line's start edge from the paragraph's left edge.
    pub left: f32,
    /// Top of the line, relative to the paragraph.
    pub top: f32,
    /// Distance from the top of the line to its baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line.
    pub descent: f32,
    /// Height of the line.
    pub height: f32,
    /// Alphabetic baseline, relative to the paragraph.
    pub baseline: f32,
    /// The pieces of the line, in logical order.
    pub boxes: Vec<RangeBox>,
    /// The ellipsis drawn after the content when the line was truncated.
    pub ellipsis: Option<String>,
    pub(crate) ellipsis_box: Option<EllipsisBox>,
    /// Extents of the tallest run or placeholder, without line spacing.
    pub(crate) content_ascent: f32,
    pub(crate) content_descent: f32,
    /// End of the visible content; whitespace after it hangs.
    pub(crate) visible_end: usize,
    /// Space added after every inner space by justification.
    pub(crate) justify_extra: f32,
}

impl LineMetrics {
    /// Returns the bottom of the line, relative to the paragraph.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Returns the range of text covered by the line, excluding a hard line break.
    pub fn text_range(&self) -> Range<usize> {
        self.start_index..self.end_index
    }

    /// Returns `true` if `offset` belongs to this line.
    pub(crate) fn contains(&self, offset: usize, is_last: bool) -> bool {
        (self.start_index..self.end_index_including_newline).contains(&offset)
            || (is_last && offset == self.end_index_including_newline)
    }
}

/// The result of laying out a paragraph against a [`Constraints`].
#[derive(Clone, PartialEq, Debug)]
pub struct LayoutResult {
    pub(crate) constraints: Constraints,
    pub(crate) lines: Vec<LineMetrics>,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) min_intrinsic_width: f32,
    pub(crate) max_intrinsic_width: f32,
    pub(crate) longest_line: f32,
    pub(crate) alphabetic_baseline: f32,
    pub(crate) ideographic_baseline: f32,
    pub(crate) did_exceed_max_lines: bool,
}

impl LayoutResult {
    /// Returns the (floored) constraints the result was computed for.
    pub fn constraints(&self) -> Constraints {
        self.constraints
    }

    /// Returns the lines.
    pub fn lines(&self) -> &[LineMetrics] {
        &self.lines
    }

    /// Returns the width of the paragraph, which is the constraint width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the total height of all lines.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the width of the widest unbreakable piece of content.
    pub fn min_intrinsic_width(&self) -> f32 {
        self.min_intrinsic_width
    }

    /// Returns the width the paragraph would take up without wrapping.
    pub fn max_intrinsic_width(&self) -> f32 {
        self.max_intrinsic_width
    }

    /// Returns the width of the widest line.
    pub fn longest_line(&self) -> f32 {
        self.longest_line
    }

    /// Returns the distance from the top of the paragraph to the alphabetic
    /// baseline of the first line.
    pub fn alphabetic_baseline(&self) -> f32 {
        self.alphabetic_baseline
    }

    /// Returns the distance from the top of the paragraph to the ideographic
    /// baseline of the first line.
    pub fn ideographic_baseline(&self) -> f32 {
        self.ideographic_baseline
    }

    /// Returns `true` if lines were dropped because of the paragraph's `max_lines`.
    pub fn did_exceed_max_lines(&self) -> bool {
        self.did_exceed_max_lines
    }

    /// Returns the index of the line containing `offset`.
    ///
    /// The end of the text belongs to the last line.
    pub fn line_number_at(&self, offset: usize) -> Option<usize> {
        let last = self.lines.len().checked_sub(1)?;
        self.lines
            .iter()
            .position(|line| line.contains(offset, line.line_number == last))
    }

    /// Returns the horizontal alignment width of the lines.
    pub(crate) fn alignment_width(&self) -> f32 {
        if self.width.is_finite() {
            self.width
        } else {
            self.longest_line
        }
    }
}

/// Returns the font metrics of `style_index`, asking `mcx` only once per style.
pub(crate) fn style_metrics<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
    cache: &mut Vec<Option<FontMetrics>>,
    style_index: usize,
) -> Result<FontMetrics, LayoutError> {
    if cache.len() < data.styles.len() {
        cache.resize(data.styles.len(), None);
    }
    if let Some(metrics) = cache[style_index] {
        return Ok(metrics);
    }
    let metrics = mcx.metrics_for(&data.styles[style_index])?;
    cache[style_index] = Some(metrics);
    Ok(metrics)
}

/// Returns the horizontal position of `offset` within a text box.
pub(crate) fn x_for_offset<B: Brush, M: MeasureBackend>(
    data: &ParagraphData<B>,
    mcx: &mut MeasureContext<M>,
    line: &LineMetrics,
    span_box: &SpanBox,
    offset: usize,
) -> Result<f32, LayoutError> {
    let offset = offset.clamp(span_box.range.start, span_box.range.end);
    if offset == span_box.range.start {
        return Ok(if data.is_rtl() {
            span_box.right
        } else {
            span_box.left
        });
    }
    let style = &data.styles[span_box.style_index];
    let mut advance = mcx.measure_styled(style, &data.text, span_box.range.start..offset)?;
    if line.justify_extra > 0.0 {
        let end = offset.min(line.visible_end).max(span_box.range.start);
        let spaces = data.text[span_box.range.start..end]
            .bytes()
            .filter(|b| *b == b' ')
            .count();
        advance += line.justify_extra * spaces as f32;
    }
    Ok(if data.is_rtl() {
        span_box.right - advance
    } else {
        span_box.left + advance
    })
}
