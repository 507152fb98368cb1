// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rich styling support.

mod brush;
mod font;

use alloc::string::String;
use alloc::vec::Vec;

pub use brush::Brush;
pub use font::{FontStyle, FontWeight};

use crate::setting::FontFeature;

/// Default font family used when a paragraph does not name one.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Default font size used when a paragraph does not specify one.
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Horizontal alignment of lines within a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlign {
    /// Align content to the left edge.
    Left,
    /// Align content to the right edge.
    Right,
    /// Align each line centered within the paragraph.
    Center,
    /// Justify each line by widening inner spaces, except for the last line and lines ended by a
    /// hard break.
    Justify,
    /// This is [`TextAlign::Left`] for LTR text and [`TextAlign::Right`] for RTL text.
    #[default]
    Start,
    /// This is [`TextAlign::Right`] for LTR text and [`TextAlign::Left`] for RTL text.
    End,
}

/// Base direction of a paragraph.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl TextDirection {
    /// Returns `true` for [`TextDirection::Rtl`].
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

/// A baseline of a run of text.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextBaseline {
    /// The baseline used for alphabetic scripts.
    #[default]
    Alphabetic,
    /// The baseline used for ideographic scripts.
    Ideographic,
}

/// Set of lines drawn through or around text.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decoration(u8);

impl Decoration {
    /// No decoration.
    pub const NONE: Self = Self(0);
    /// A line below the text.
    pub const UNDERLINE: Self = Self(1);
    /// A line above the text.
    pub const OVERLINE: Self = Self(1 << 1);
    /// A line through the middle of the text.
    pub const LINE_THROUGH: Self = Self(1 << 2);

    /// Returns `true` if every line in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no line is drawn.
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl core::ops::BitOr for Decoration {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Stroke pattern of a decoration line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecorationStyle {
    /// A single solid line.
    #[default]
    Solid,
    /// Two parallel lines.
    Double,
    /// A dotted line.
    Dotted,
    /// A dashed line.
    Dashed,
    /// A sine-like wave.
    Wavy,
}

/// Properties that define a style.
///
/// A style node holds the properties that were explicitly set on it; every
/// other property is inherited from its parent.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleProperty<B: Brush> {
    /// Brush for rendering text.
    Brush(B),
    /// Brush for filling the area behind text.
    Background(Option<B>),
    /// Decoration lines.
    Decoration(Decoration),
    /// Brush for decoration lines. Falls back to the text brush.
    DecorationBrush(Option<B>),
    /// Stroke pattern of decoration lines.
    DecorationStyle(DecorationStyle),
    /// Thickness multiplier of decoration lines.
    DecorationThickness(f32),
    /// Font family name.
    ///
    /// An empty name selects the paragraph's default family rather than the parent's.
    FontFamily(String),
    /// Families tried after the primary family.
    FontFamilyFallback(Vec<String>),
    /// Font size.
    FontSize(f32),
    /// Font weight.
    FontWeight(FontWeight),
    /// Font style.
    FontStyle(FontStyle),
    /// Extra spacing between letters.
    LetterSpacing(f32),
    /// Extra spacing between words.
    WordSpacing(f32),
    /// Line height as a multiple of the font size.
    LineHeight(Option<f32>),
    /// Locale.
    Locale(Option<String>),
    /// Font feature settings.
    FontFeatures(Vec<FontFeature>),
    /// Baseline used to align this text.
    TextBaseline(TextBaseline),
}

/// Fully resolved style of a run of text.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle<B: Brush> {
    /// Brush for rendering text.
    pub brush: B,
    /// Brush for filling the area behind text.
    pub background: Option<B>,
    /// Decoration lines.
    pub decoration: Decoration,
    /// Brush for decoration lines.
    pub decoration_brush: Option<B>,
    /// Stroke pattern of decoration lines.
    pub decoration_style: DecorationStyle,
    /// Thickness multiplier of decoration lines.
    pub decoration_thickness: f32,
    /// Font family name.
    pub font_family: String,
    /// Families tried after the primary family.
    pub font_family_fallback: Vec<String>,
    /// Font size.
    pub font_size: f32,
    /// Font weight.
    pub font_weight: FontWeight,
    /// Font style.
    pub font_style: FontStyle,
    /// Extra spacing between letters.
    pub letter_spacing: f32,
    /// Extra spacing between words.
    pub word_spacing: f32,
    /// Line height as a multiple of the font size.
    pub line_height: Option<f32>,
    /// Locale.
    pub locale: Option<String>,
    /// Font feature settings.
    pub font_features: Vec<FontFeature>,
    /// Baseline used to align this text.
    pub text_baseline: TextBaseline,
}

impl<B: Brush> Default for TextStyle<B> {
    fn default() -> Self {
        Self {
            brush: B::default(),
            background: None,
            decoration: Decoration::NONE,
            decoration_brush: None,
            decoration_style: DecorationStyle::Solid,
            decoration_thickness: 1.0,
            font_family: DEFAULT_FONT_FAMILY.into(),
            font_family_fallback: Vec::new(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            letter_spacing: 0.0,
            word_spacing: 0.0,
            line_height: None,
            locale: None,
            font_features: Vec::new(),
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

impl<B: Brush> TextStyle<B> {
    /// Overwrites the field that corresponds to `property`.
    pub fn apply(&mut self, property: StyleProperty<B>) {
        use StyleProperty::*;
        match property {
            Brush(value) => self.brush = value,
            Background(value) => self.background = value,
            Decoration(value) => self.decoration = value,
            DecorationBrush(value) => self.decoration_brush = value,
            DecorationStyle(value) => self.decoration_style = value,
            DecorationThickness(value) => self.decoration_thickness = value,
            FontFamily(value) => self.font_family = value,
            FontFamilyFallback(value) => self.font_family_fallback = value,
            FontSize(value) => self.font_size = value,
            FontWeight(value) => self.font_weight = value,
            FontStyle(value) => self.font_style = value,
            LetterSpacing(value) => self.letter_spacing = value,
            WordSpacing(value) => self.word_spacing = value,
            LineHeight(value) => self.line_height = value,
            Locale(value) => self.locale = value,
            FontFeatures(value) => self.font_features = value,
            TextBaseline(value) => self.text_baseline = value,
        }
    }

    /// Returns `true` if this style can be drawn with a backend's plain text
    /// primitive, i.e. it needs neither decorations nor font features.
    pub fn is_plain(&self) -> bool {
        self.decoration.is_none() && self.font_features.is_empty()
    }

    /// Returns the CSS font shorthand handed to measurement backends, e.g.
    /// `italic bold 10px Ahem`.
    pub fn font_description(&self) -> String {
        font::font_description(
            self.font_style,
            self.font_weight,
            self.font_size,
            &self.font_family,
            &self.font_family_fallback,
        )
    }
}

/// Paragraph-wide layout settings and the defaults for the root text style.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParagraphStyle {
    /// Horizontal alignment of lines.
    pub text_align: TextAlign,
    /// Base direction.
    pub text_direction: TextDirection,
    /// Maximum number of lines; content past the last line is dropped.
    pub max_lines: Option<usize>,
    /// String shown at the end of the last line when content was dropped.
    pub ellipsis: Option<String>,
    /// Default line height as a multiple of the font size.
    pub line_height: Option<f32>,
    /// Default font family.
    pub font_family: String,
    /// Default font size.
    pub font_size: f32,
    /// Default font weight.
    pub font_weight: FontWeight,
    /// Default font style.
    pub font_style: FontStyle,
    /// Default locale.
    pub locale: Option<String>,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            text_align: TextAlign::Start,
            text_direction: TextDirection::Ltr,
            max_lines: None,
            ellipsis: None,
            line_height: None,
            font_family: DEFAULT_FONT_FAMILY.into(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
            locale: None,
        }
    }
}

impl ParagraphStyle {
    /// Returns the style that text inherits when no pushed style overrides it.
    pub fn root_text_style<B: Brush>(&self) -> TextStyle<B> {
        TextStyle {
            font_family: self.font_family.clone(),
            font_size: self.font_size,
            font_weight: self.font_weight,
            font_style: self.font_style,
            line_height: self.line_height,
            locale: self.locale.clone(),
            ..TextStyle::default()
        }
    }

    /// Returns the alignment with `Start`/`End` resolved against the text direction.
    pub fn effective_align(&self) -> TextAlign {
        match (self.text_align, self.text_direction) {
            (TextAlign::Start, TextDirection::Ltr) | (TextAlign::End, TextDirection::Rtl) => {
                TextAlign::Left
            }
            (TextAlign::Start, TextDirection::Rtl) | (TextAlign::End, TextDirection::Ltr) => {
                TextAlign::Right
            }
            (align, _) => align,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_single_field() {
        let mut style = TextStyle::<u32>::default();
        style.apply(StyleProperty::FontSize(20.0));
        style.apply(StyleProperty::Brush(7));
        assert_eq!(style.font_size, 20.0);
        assert_eq!(style.brush, 7);
        assert_eq!(style.font_family, DEFAULT_FONT_FAMILY);
    }

    #[test]
    fn plain_styles() {
        let mut style = TextStyle::<u32>::default();
        assert!(style.is_plain());
        style.apply(StyleProperty::Decoration(
            Decoration::UNDERLINE | Decoration::LINE_THROUGH,
        ));
        assert!(!style.is_plain());
        assert!(style.decoration.contains(Decoration::UNDERLINE));
        assert!(!style.decoration.contains(Decoration::OVERLINE));
    }

    #[test]
    fn start_and_end_follow_direction() {
        let mut style = ParagraphStyle::default();
        assert_eq!(style.effective_align(), TextAlign::Left);
        style.text_direction = TextDirection::Rtl;
        assert_eq!(style.effective_align(), TextAlign::Right);
        style.text_align = TextAlign::End;
        assert_eq!(style.effective_align(), TextAlign::Left);
        style.text_align = TextAlign::Justify;
        assert_eq!(style.effective_align(), TextAlign::Justify);
    }
}
