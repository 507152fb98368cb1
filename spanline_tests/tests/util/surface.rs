// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A surface that records what a paragraph paints.

use peniko::Color;
use peniko::color::palette;
use peniko::kurbo::{Point, Rect};
use spanline::{Surface, TextStyle};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ColorBrush {
    pub(crate) color: Color,
}

impl ColorBrush {
    pub(crate) fn new(color: Color) -> Self {
        Self { color }
    }
}

impl Default for ColorBrush {
    fn default() -> Self {
        Self {
            color: palette::css::BLACK,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCall {
    Rect { rect: Rect, brush: ColorBrush },
    Text { text: String, origin: Point, brush: ColorBrush },
    Decoration { rect: Rect },
}

#[derive(Default, Debug)]
pub(crate) struct RecordingSurface {
    pub(crate) calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Returns the text of every text call, in order.
    pub(crate) fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn decorations(&self) -> Vec<Rect> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Decoration { rect } => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Surface<ColorBrush> for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, brush: &ColorBrush) {
        self.calls.push(DrawCall::Rect {
            rect,
            brush: *brush,
        });
    }

    fn fill_text(&mut self, text: &str, origin: Point, style: &TextStyle<ColorBrush>) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            origin,
            brush: style.brush,
        });
    }

    fn draw_decoration(&mut self, rect: Rect, _style: &TextStyle<ColorBrush>) {
        self.calls.push(DrawCall::Decoration { rect });
    }
}
