// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Once;

use spanline::{Constraints, MeasureContext, Paragraph, ParagraphBuilder, ParagraphStyle};
use spanline_dev::{AHEM, AhemBackend};
use tracing_subscriber::EnvFilter;

use super::ColorBrush;

/// Font size of the paragraph style every test starts from.
pub(crate) const FONT_SIZE: f32 = 10.0;

static TRACING: Once = Once::new();

/// Installs a subscriber that prints events through the test harness.
///
/// Set `RUST_LOG=spanline=trace` to see what layout does.
fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Shared state of one test: a measurement context and the paragraph style
/// that builders start from.
pub(crate) struct TestEnv {
    test_name: String,
    pub(crate) mcx: MeasureContext<AhemBackend>,
    pub(crate) style: ParagraphStyle,
}

impl TestEnv {
    pub(crate) fn new(test_name: &str) -> Self {
        Self::with_backend(test_name, AhemBackend::new())
    }

    pub(crate) fn with_backend(test_name: &str, backend: AhemBackend) -> Self {
        init_tracing();
        Self {
            test_name: test_name.to_owned(),
            mcx: MeasureContext::new(backend),
            style: ParagraphStyle {
                font_family: AHEM.into(),
                font_size: FONT_SIZE,
                ..ParagraphStyle::default()
            },
        }
    }

    pub(crate) fn backend(&self) -> &AhemBackend {
        self.mcx.backend()
    }

    pub(crate) fn builder(&self) -> ParagraphBuilder<ColorBrush> {
        ParagraphBuilder::new(self.style.clone())
    }

    /// Builds a paragraph holding `text` in the root style.
    pub(crate) fn paragraph(&self, text: &str) -> Paragraph<ColorBrush> {
        let mut builder = self.builder();
        builder.add_text(text);
        builder.build()
    }

    /// Lays out `paragraph`, failing the test on measurement errors.
    pub(crate) fn layout(&mut self, paragraph: &mut Paragraph<ColorBrush>, width: f32) {
        if let Err(err) = paragraph.layout(&mut self.mcx, Constraints::new(width)) {
            panic!("{}: layout failed: {err}", self.test_name);
        }
    }

    /// Builds and lays out a paragraph holding `text` in the root style.
    pub(crate) fn laid_out(&mut self, text: &str, width: f32) -> Paragraph<ColorBrush> {
        let mut paragraph = self.paragraph(text);
        self.layout(&mut paragraph, width);
        paragraph
    }
}
