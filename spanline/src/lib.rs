// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat-span paragraph layout.
//!
//! A paragraph is built by pushing styles and adding text or placeholders to a
//! [`ParagraphBuilder`]. The builder flattens its style stack into an ordered list of
//! [`Span`]s over a single plain-text buffer. The resulting [`Paragraph`] can then be
//! laid out against a width constraint, painted onto a [`Surface`], and queried for
//! geometry (boxes for a range, position for a point, word and line boundaries).
//!
//! Text is measured through a [`MeasureBackend`] owned by a [`MeasureContext`], which
//! also memoizes the most recent substring measurement.
//!
//! ```
//! use spanline::{Constraints, MeasureBackend, MeasureContext, MeasureError, FontMetrics};
//! use spanline::{ParagraphBuilder, ParagraphStyle, StyleProperty};
//!
//! // A backend where every character is exactly one em wide.
//! #[derive(Default)]
//! struct Monospace {
//!     font: String,
//!     size: f32,
//! }
//!
//! impl MeasureBackend for Monospace {
//!     fn font(&self) -> &str {
//!         &self.font
//!     }
//!     fn set_font(&mut self, font: &str, size: f32) {
//!         self.font = font.to_owned();
//!         self.size = size;
//!     }
//!     fn measure_text(&mut self, text: &str) -> Result<f32, MeasureError> {
//!         Ok(text.chars().count() as f32 * self.size)
//!     }
//!     fn font_metrics(&mut self) -> Result<FontMetrics, MeasureError> {
//!         Ok(FontMetrics::new(self.size * 0.8, self.size * 0.2))
//!     }
//! }
//!
//! let mut mcx = MeasureContext::new(Monospace::default());
//! let mut builder = ParagraphBuilder::<()>::new(ParagraphStyle::default());
//! builder.push_style([StyleProperty::FontSize(10.0)]);
//! builder.add_text("Test Ahem");
//! let mut paragraph = builder.build();
//! paragraph.layout(&mut mcx, Constraints::new(50.0)).unwrap();
//!
//! assert_eq!(paragraph.line_count(), 2);
//! assert_eq!(paragraph.height(), 20.0);
//! ```

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("spanline requires either the `std` or `libm` feature to be enabled");

extern crate alloc;

pub use peniko::kurbo;

mod builder;
mod error;
mod lru_cache;
mod measure;
mod paint;
mod paragraph;
mod placeholder;
mod resolve;
mod setting;
mod util;

pub mod analysis;
pub mod layout;
pub mod style;

pub use builder::ParagraphBuilder;
pub use error::{LayoutError, MeasureError};
pub use layout::{
    Affinity, BoxHeightStyle, BoxWidthStyle, BreakReason, Constraints, IDEOGRAPHIC_BASELINE_RATIO,
    LayoutResult, LineMetrics, PlaceholderBox, RangeBox, SpanBox, TextBox, TextPosition,
};
pub use measure::{FontMetrics, MeasureBackend, MeasureCache, MeasureContext};
pub use paint::{StructuredElement, StructuredText, Surface, decoration_rects};
pub use paragraph::{Paragraph, PlaceholderSpan, Span, TextSpan};
pub use placeholder::{PLACEHOLDER_CHAR, Placeholder, PlaceholderAlignment};
pub use setting::{FontFeature, Setting, Tag};
pub use style::{
    Brush, Decoration, DecorationStyle, FontStyle, FontWeight, ParagraphStyle, StyleProperty,
    TextAlign, TextBaseline, TextDirection, TextStyle,
};
pub use util::round_width;
