// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction of paragraphs from a stack of styles.

use alloc::string::String;
use alloc::vec::Vec;

use crate::paragraph::{Paragraph, ParagraphData, PlaceholderSpan, Span, TextSpan};
use crate::placeholder::{PLACEHOLDER_CHAR, Placeholder};
use crate::resolve::{ROOT_NODE, StyleTree};
use crate::style::{Brush, ParagraphStyle, StyleProperty, TextStyle};

/// Builder for constructing a [`Paragraph`] from nested styles.
///
/// Styles form a stack: [`push_style`](Self::push_style) starts a style that
/// inherits every property it does not set from the style below it, and
/// [`pop`](Self::pop) ends it. Text and placeholders are added in the style on
/// top of the stack, or in the paragraph's root style when the stack is empty.
///
/// The builder is consumed by [`build`](Self::build).
#[must_use]
pub struct ParagraphBuilder<B: Brush> {
    paragraph_style: ParagraphStyle,
    tree: StyleTree<B>,
    stack: Vec<usize>,
    styles: Vec<TextStyle<B>>,
    spans: Vec<Span>,
    text: String,
    placeholder_count: usize,
    can_draw_on_fast_path: bool,
}

impl<B: Brush> ParagraphBuilder<B> {
    /// Creates a builder for a paragraph with the given paragraph-wide style.
    pub fn new(paragraph_style: ParagraphStyle) -> Self {
        let tree = StyleTree::new(paragraph_style.root_text_style());
        Self {
            paragraph_style,
            tree,
            stack: Vec::new(),
            styles: Vec::new(),
            spans: Vec::new(),
            text: String::new(),
            placeholder_count: 0,
            can_draw_on_fast_path: true,
        }
    }

    fn current_node(&self) -> usize {
        self.stack.last().copied().unwrap_or(ROOT_NODE)
    }

    /// Starts a style that overrides `properties` of the current style.
    pub fn push_style(&mut self, properties: impl IntoIterator<Item = StyleProperty<B>>) {
        let node = self.tree.push_child(self.current_node(), properties);
        self.stack.push(node);
    }

    /// Ends the most recently pushed style.
    ///
    /// Does nothing if no style is pushed.
    pub fn pop(&mut self) {
        self.stack.pop();
    }

    /// Returns the resolved style that text added now would get.
    pub fn peek_style(&mut self) -> TextStyle<B> {
        self.tree.resolve(self.current_node()).clone()
    }

    /// Appends `text` in the current style.
    ///
    /// Empty strings are ignored.
    pub fn add_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let node = self.current_node();
        let style_index = self.tree.resolve_style_id(node, &mut self.styles);
        if self.can_draw_on_fast_path && !self.styles[style_index].is_plain() {
            tracing::trace!("paragraph needs structured rendering");
            self.can_draw_on_fast_path = false;
        }
        let start = self.text.len();
        self.text.push_str(text);
        self.spans.push(Span::Text(TextSpan {
            range: start..self.text.len(),
            style_index,
        }));
    }

    /// Appends a placeholder box, which occupies a single
    /// [`PLACEHOLDER_CHAR`] in the paragraph's text.
    pub fn add_placeholder(&mut self, placeholder: Placeholder) {
        assert!(
            placeholder.width >= 0.0 && placeholder.height >= 0.0,
            "placeholder dimensions must be non-negative, got {}x{}",
            placeholder.width,
            placeholder.height
        );
        let baseline = match placeholder.baseline {
            Some(baseline) => baseline,
            None => {
                let node = self.current_node();
                self.tree.resolve(node).text_baseline
            }
        };
        let start = self.text.len();
        self.text.push(PLACEHOLDER_CHAR);
        self.spans.push(Span::Placeholder(PlaceholderSpan {
            range: start..self.text.len(),
            index: self.placeholder_count,
            placeholder,
            baseline,
        }));
        self.placeholder_count += 1;
    }

    /// Returns the number of placeholders added so far.
    pub fn placeholder_count(&self) -> usize {
        self.placeholder_count
    }

    /// Returns the text added so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the builder, returning the paragraph.
    pub fn build(mut self) -> Paragraph<B> {
        let root_style = self.tree.resolve_style_id(ROOT_NODE, &mut self.styles);
        Paragraph::new(ParagraphData {
            text: self.text,
            spans: self.spans,
            styles: self.styles,
            root_style,
            style: self.paragraph_style,
            placeholder_count: self.placeholder_count,
            can_draw_on_fast_path: self.can_draw_on_fast_path,
        })
    }
}
