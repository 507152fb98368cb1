// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::style::TextBaseline;

/// The character that stands in for a placeholder in a paragraph's plain text.
pub const PLACEHOLDER_CHAR: char = '\u{FFFC}';

/// Where a placeholder sits vertically relative to the line it is placed on.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceholderAlignment {
    /// The placeholder's `baseline_offset` is aligned with the line's baseline.
    #[default]
    Baseline,
    /// The bottom edge of the placeholder rests on the line's baseline.
    AboveBaseline,
    /// The top edge of the placeholder hangs from the line's baseline.
    BelowBaseline,
    /// The top edge of the placeholder is aligned with the top of the tallest text on the line.
    Top,
    /// The bottom edge of the placeholder is aligned with the bottom of the lowest text on the line.
    Bottom,
    /// The placeholder is vertically centered on the text of the line.
    Middle,
}

/// A box to be laid out inline with text, such as an embedded image or widget.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placeholder {
    /// The width of the box in layout units.
    pub width: f32,
    /// The height of the box in layout units.
    pub height: f32,
    /// Vertical alignment of the box within its line.
    pub alignment: PlaceholderAlignment,
    /// Distance from the top of the box to its baseline.
    ///
    /// Only used with [`PlaceholderAlignment::Baseline`].
    pub baseline_offset: f32,
    /// Which baseline of the surrounding text `baseline_offset` refers to.
    ///
    /// `None` uses the [`text_baseline`](crate::TextStyle::text_baseline) of the
    /// style the placeholder is added in.
    pub baseline: Option<TextBaseline>,
}

impl Placeholder {
    /// Creates a placeholder whose bottom edge rests on the baseline.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            alignment: PlaceholderAlignment::Baseline,
            baseline_offset: height,
            baseline: None,
        }
    }

    /// Returns the placeholder with a different vertical alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: PlaceholderAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Returns the placeholder with a different baseline offset.
    #[must_use]
    pub fn with_baseline_offset(mut self, baseline_offset: f32) -> Self {
        self.baseline_offset = baseline_offset;
        self
    }

    /// Returns the placeholder aligned to a specific baseline of the text.
    #[must_use]
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Computes how far the placeholder extends above and below the alphabetic
    /// baseline of a line whose text has the given `ascent` and `descent`.
    ///
    /// `ideographic_drop` is the distance from the alphabetic baseline down to
    /// the ideographic one.
    pub(crate) fn vertical_extent(
        &self,
        baseline: TextBaseline,
        ascent: f32,
        descent: f32,
        ideographic_drop: f32,
    ) -> (f32, f32) {
        match self.alignment {
            PlaceholderAlignment::Baseline => {
                let shift = match baseline {
                    TextBaseline::Alphabetic => 0.0,
                    TextBaseline::Ideographic => ideographic_drop,
                };
                (
                    self.baseline_offset - shift,
                    self.height - self.baseline_offset + shift,
                )
            }
            PlaceholderAlignment::AboveBaseline => (self.height, 0.0),
            PlaceholderAlignment::BelowBaseline => (0.0, self.height),
            PlaceholderAlignment::Top => (ascent, self.height - ascent),
            PlaceholderAlignment::Bottom => (self.height - descent, descent),
            PlaceholderAlignment::Middle => {
                let mid = (ascent - descent) * 0.5;
                (mid + self.height * 0.5, self.height * 0.5 - mid)
            }
        }
    }
}
