// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! # Spanline Dev
//!
//! This crate provides utilities for developing Spanline: a measurement
//! backend with fully predictable metrics, and text samples.

use spanline::{FontMetrics, MeasureBackend, MeasureError};

/// Family name that [`AhemBackend`] is usually driven with in tests.
pub const AHEM: &str = "Ahem";

/// A measurement backend modelled on the Ahem test font.
///
/// Every character is exactly one em wide. The ascent is 0.8 em and the
/// descent 0.2 em. All calls are counted, so tests can check how often
/// layout consults the backend.
#[derive(Clone, Debug)]
pub struct AhemBackend {
    font: String,
    size: f32,
    noise: f32,
    ideographic_baseline: Option<f32>,
    failing_family: Option<String>,
    measure_calls: usize,
    metrics_calls: usize,
    set_font_calls: usize,
}

impl Default for AhemBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AhemBackend {
    /// Creates a backend with a 14px font active.
    pub fn new() -> Self {
        Self {
            font: String::new(),
            size: 14.0,
            noise: 0.0,
            ideographic_baseline: None,
            failing_family: None,
            measure_calls: 0,
            metrics_calls: 0,
            set_font_calls: 0,
        }
    }

    /// Adds `noise` to every measured width, like real backends that report
    /// widths such as `40.0009`.
    #[must_use]
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise;
        self
    }

    /// Reports an ideographic baseline at `ratio` em below the top of the em box.
    #[must_use]
    pub fn with_ideographic_baseline(mut self, ratio: f32) -> Self {
        self.ideographic_baseline = Some(ratio);
        self
    }

    /// Fails every measurement while a font of `family` is active.
    #[must_use]
    pub fn failing_on(mut self, family: &str) -> Self {
        self.failing_family = Some(family.to_owned());
        self
    }

    /// Returns the size of the active font.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns how often [`MeasureBackend::measure_text`] was called.
    pub fn measure_calls(&self) -> usize {
        self.measure_calls
    }

    /// Returns how often [`MeasureBackend::font_metrics`] was called.
    pub fn metrics_calls(&self) -> usize {
        self.metrics_calls
    }

    /// Returns how often [`MeasureBackend::set_font`] was called.
    pub fn set_font_calls(&self) -> usize {
        self.set_font_calls
    }

    /// Returns the number of calls of any kind.
    pub fn total_calls(&self) -> usize {
        self.measure_calls + self.metrics_calls + self.set_font_calls
    }

    /// Resets all call counters.
    pub fn reset_counts(&mut self) {
        self.measure_calls = 0;
        self.metrics_calls = 0;
        self.set_font_calls = 0;
    }

    fn check_font(&self) -> Result<(), MeasureError> {
        match &self.failing_family {
            Some(family) if self.font.contains(family.as_str()) => {
                Err(MeasureError::UnknownFont(self.font.clone()))
            }
            _ => Ok(()),
        }
    }
}

impl MeasureBackend for AhemBackend {
    fn font(&self) -> &str {
        &self.font
    }

    fn set_font(&mut self, font: &str, size: f32) {
        self.set_font_calls += 1;
        self.font.clear();
        self.font.push_str(font);
        self.size = size;
    }

    fn measure_text(&mut self, text: &str) -> Result<f32, MeasureError> {
        self.measure_calls += 1;
        self.check_font()?;
        Ok(text.chars().count() as f32 * self.size + self.noise)
    }

    fn font_metrics(&mut self) -> Result<FontMetrics, MeasureError> {
        self.metrics_calls += 1;
        self.check_font()?;
        let mut metrics = FontMetrics::new(self.size * 0.8, self.size * 0.2);
        metrics.ideographic_baseline = self.ideographic_baseline.map(|ratio| ratio * self.size);
        Ok(metrics)
    }
}

/// A sample to be used for development.
#[derive(Debug)]
pub struct Sample {
    /// The name of the sample.
    pub name: &'static str,
    /// The text of the sample.
    pub text: &'static str,
}

/// A collection of text samples.
#[derive(Debug)]
pub struct TextSamples {
    /// The Latin text sample.
    pub latin: Sample,
    /// The Japanese text sample.
    pub japanese: Sample,
    /// A sample with several paragraphs separated by hard line breaks.
    pub multiline: Sample,
}

impl TextSamples {
    /// Creates a new collection of text samples.
    pub const fn new() -> Self {
        Self {
            latin: Sample {
                name: "latin",
                text: "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                       eiusmod tempor incididunt ut labore et dolore magna aliqua.",
            },
            japanese: Sample {
                name: "japanese",
                text: "吾輩は猫である。名前はまだ無い。どこで生れたかとんと見当がつかぬ。",
            },
            multiline: Sample {
                name: "multiline",
                text: "First line\nSecond line\r\nThird line\n",
            },
        }
    }
}

impl Default for TextSamples {
    fn default() -> Self {
        Self::new()
    }
}
