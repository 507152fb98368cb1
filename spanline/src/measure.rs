// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement through a pluggable backend.

use alloc::string::String;
use core::ops::Range;

use crate::error::MeasureError;
use crate::lru_cache::{LookupKey, LruCache};
use crate::style::{Brush, TextStyle};
use crate::util::{nearly_zero, round_width};

/// Vertical metrics of the active font.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct FontMetrics {
    /// Distance from the alphabetic baseline to the top of the font's em box.
    pub ascent: f32,
    /// Distance from the alphabetic baseline to the bottom of the font's em box.
    pub descent: f32,
    /// Distance from the top of the em box to the ideographic baseline, when the backend knows it.
    pub ideographic_baseline: Option<f32>,
}

impl FontMetrics {
    /// Creates metrics without an ideographic baseline.
    pub fn new(ascent: f32, descent: f32) -> Self {
        Self {
            ascent,
            descent,
            ideographic_baseline: None,
        }
    }

    /// Returns the height of the em box.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// A text measuring capability, typically provided by a canvas or GPU backend.
///
/// Measurements apply to the *active* font, selected with [`set_font`](Self::set_font).
/// Results are treated as slightly imprecise; every width is rounded to two
/// decimal places before it is used for layout.
pub trait MeasureBackend {
    /// Returns the description of the active font.
    fn font(&self) -> &str;

    /// Activates the font with the given CSS shorthand description.
    ///
    /// `size` is the pixel size contained in the description.
    fn set_font(&mut self, font: &str, size: f32);

    /// Measures the advance width of `text` in the active font.
    fn measure_text(&mut self, text: &str) -> Result<f32, MeasureError>;

    /// Returns vertical metrics of the active font.
    fn font_metrics(&mut self) -> Result<FontMetrics, MeasureError>;
}

impl<T: MeasureBackend + ?Sized> MeasureBackend for &mut T {
    fn font(&self) -> &str {
        (**self).font()
    }

    fn set_font(&mut self, font: &str, size: f32) {
        (**self).set_font(font, size);
    }

    fn measure_text(&mut self, text: &str) -> Result<f32, MeasureError> {
        (**self).measure_text(text)
    }

    fn font_metrics(&mut self) -> Result<FontMetrics, MeasureError> {
        (**self).font_metrics()
    }
}

/// Memo of the last substring measurement.
///
/// This holds exactly one entry. It is overwritten on every miss, so it only
/// pays off for immediately repeated queries, which line breaking and hit
/// testing issue constantly.
///
/// The text of a query is matched by its length and the measured substring,
/// so storing an entry copies only the substring.
#[derive(Clone, Default, Debug)]
pub struct MeasureCache {
    substring: String,
    text_len: usize,
    font: String,
    start: usize,
    end: usize,
    width: f32,
    valid: bool,
}

impl MeasureCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, text: &str, start: usize, end: usize, font: &str) -> Option<f32> {
        (self.valid
            && self.start == start
            && self.end == end
            && self.text_len == text.len()
            && self.substring == text[start..end]
            && self.font == font)
            .then_some(self.width)
    }

    fn store(&mut self, text: &str, start: usize, end: usize, font: &str, width: f32) {
        self.substring.clear();
        self.substring.push_str(&text[start..end]);
        self.text_len = text.len();
        self.font.clear();
        self.font.push_str(font);
        self.start = start;
        self.end = end;
        self.width = width;
        self.valid = true;
    }

    /// Forgets the stored measurement.
    pub fn clear(&mut self) {
        self.valid = false;
    }
}

struct FontKey<'a>(&'a str);

impl LookupKey<String> for FontKey<'_> {
    fn eq(&self, other: &String) -> bool {
        self.0 == other.as_str()
    }

    fn to_id(self) -> String {
        self.0.into()
    }
}

/// A measurement backend together with the caches that are only valid for it.
///
/// Create one per rendering surface. Contexts are not meant to be shared between
/// threads or surfaces, since cache hits are only meaningful for the backend that
/// produced them.
pub struct MeasureContext<M: MeasureBackend> {
    backend: M,
    cache: MeasureCache,
    metrics: LruCache<String, FontMetrics>,
}

impl<M: MeasureBackend> MeasureContext<M> {
    /// Creates a context that measures with `backend`.
    pub fn new(backend: M) -> Self {
        Self {
            backend,
            cache: MeasureCache::new(),
            metrics: LruCache::new(16),
        }
    }

    /// Returns the backend.
    pub fn backend(&self) -> &M {
        &self.backend
    }

    /// Returns the backend mutably.
    ///
    /// Changing the backend's fonts behind the context's back is fine: every
    /// cache lookup is keyed by the active font description.
    pub fn backend_mut(&mut self) -> &mut M {
        &mut self.backend
    }

    /// Consumes the context, returning the backend.
    pub fn into_backend(self) -> M {
        self.backend
    }

    /// Measures the width of `text[start..end]` in the active font, plus
    /// `letter_spacing` for every character in that range.
    ///
    /// Returns `0.0` for an empty range without consulting the backend. The result
    /// is rounded with [`round_width`](crate::round_width).
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or does not fall on character boundaries.
    pub fn measure_substring(
        &mut self,
        text: &str,
        start: usize,
        end: usize,
        letter_spacing: f32,
    ) -> Result<f32, MeasureError> {
        assert!(
            start <= end && end <= text.len(),
            "invalid measurement range {start}..{end} for text of length {}",
            text.len()
        );
        if start == end {
            return Ok(0.0);
        }
        let cached = self.cache.get(text, start, end, self.backend.font());
        let mut width = match cached {
            Some(width) => width,
            None => {
                let substring = if start == 0 && end == text.len() {
                    text
                } else {
                    &text[start..end]
                };
                let width = self.backend.measure_text(substring).inspect_err(|err| {
                    tracing::warn!(font = self.backend.font(), %err, "text measurement failed");
                })?;
                self.cache
                    .store(text, start, end, self.backend.font(), width);
                width
            }
        };
        if !nearly_zero(letter_spacing) {
            width += letter_spacing * text[start..end].chars().count() as f32;
        }
        Ok(round_width(width))
    }

    /// Activates the font described by `style` if it is not already active.
    pub(crate) fn select_font<B: Brush>(&mut self, style: &TextStyle<B>) {
        let description = style.font_description();
        if self.backend.font() != description {
            self.backend.set_font(&description, style.font_size);
        }
    }

    /// Measures `text[range]` in `style`, including letter and word spacing.
    pub(crate) fn measure_styled<B: Brush>(
        &mut self,
        style: &TextStyle<B>,
        text: &str,
        range: Range<usize>,
    ) -> Result<f32, MeasureError> {
        self.select_font(style);
        let mut width =
            self.measure_substring(text, range.start, range.end, style.letter_spacing)?;
        if !nearly_zero(style.word_spacing) {
            let spaces = text[range].bytes().filter(|b| *b == b' ').count();
            width = round_width(width + style.word_spacing * spaces as f32);
        }
        Ok(width)
    }

    /// Returns the vertical metrics of the font described by `style`, remembering
    /// the answer for recently used fonts.
    pub(crate) fn metrics_for<B: Brush>(
        &mut self,
        style: &TextStyle<B>,
    ) -> Result<FontMetrics, MeasureError> {
        let description = style.font_description();
        let backend = &mut self.backend;
        self.metrics
            .try_entry(FontKey(&description), || {
                if backend.font() != description {
                    backend.set_font(&description, style.font_size);
                }
                backend.font_metrics()
            })
            .copied()
    }
}

impl<M: MeasureBackend + core::fmt::Debug> core::fmt::Debug for MeasureContext<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MeasureContext")
            .field("backend", &self.backend)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
