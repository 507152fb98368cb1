// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical tree based style application.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::style::{Brush, StyleProperty, TextStyle};

/// Index of the root node of every [`StyleTree`].
pub(crate) const ROOT_NODE: usize = 0;

#[derive(Debug, Clone)]
struct StyleTreeNode<B: Brush> {
    parent: Option<usize>,
    properties: SmallVec<[StyleProperty<B>; 2]>,
    /// Filled on first resolution; nodes never change afterwards.
    resolved: Option<TextStyle<B>>,
    style_id: Option<usize>,
}

/// An arena of style nodes, each of which overrides some properties of its parent.
///
/// Nodes are immutable once created, so their resolved styles are memoized and
/// never invalidated.
#[derive(Debug, Clone)]
pub(crate) struct StyleTree<B: Brush> {
    nodes: Vec<StyleTreeNode<B>>,
    default_family: String,
}

impl<B: Brush> StyleTree<B> {
    /// Creates a tree whose root resolves to `root_style`.
    ///
    /// An explicitly empty font family anywhere in the tree resolves to the
    /// root style's family.
    pub(crate) fn new(root_style: TextStyle<B>) -> Self {
        let default_family = root_style.font_family.clone();
        Self {
            nodes: alloc::vec![StyleTreeNode {
                parent: None,
                properties: SmallVec::new(),
                resolved: Some(root_style),
                style_id: None,
            }],
            default_family,
        }
    }

    /// Adds a node below `parent` that overrides `properties`, returning its index.
    ///
    /// When a property is given more than once, the last one wins.
    pub(crate) fn push_child(
        &mut self,
        parent: usize,
        properties: impl IntoIterator<Item = StyleProperty<B>>,
    ) -> usize {
        assert!(parent < self.nodes.len(), "unknown parent style node {parent}");
        self.nodes.push(StyleTreeNode {
            parent: Some(parent),
            properties: properties.into_iter().collect(),
            resolved: None,
            style_id: None,
        });
        self.nodes.len() - 1
    }

    /// Returns the fully resolved style of `node`.
    pub(crate) fn resolve(&mut self, node: usize) -> &TextStyle<B> {
        // Collect the unresolved part of the chain, nearest node first.
        let mut pending: SmallVec<[usize; 8]> = SmallVec::new();
        let mut current = node;
        while self.nodes[current].resolved.is_none() {
            pending.push(current);
            current = self.nodes[current]
                .parent
                .expect("the root node is always resolved");
        }
        for &index in pending.iter().rev() {
            let parent = self.nodes[index]
                .parent
                .expect("only the root node has no parent");
            let mut style = self.nodes[parent]
                .resolved
                .clone()
                .expect("ancestors are resolved before their children");
            for property in self.nodes[index].properties.iter().cloned() {
                match property {
                    StyleProperty::FontFamily(family) if family.is_empty() => {
                        style.font_family.clone_from(&self.default_family);
                    }
                    property => style.apply(property),
                }
            }
            self.nodes[index].resolved = Some(style);
        }
        self.nodes[node]
            .resolved
            .as_ref()
            .expect("node was resolved above")
    }

    /// Returns the index of `node`'s resolved style within `style_table`,
    /// appending the style to the table the first time.
    pub(crate) fn resolve_style_id(
        &mut self,
        node: usize,
        style_table: &mut Vec<TextStyle<B>>,
    ) -> usize {
        if let Some(style_id) = self.nodes[node].style_id {
            return style_id;
        }
        let style_id = style_table.len();
        style_table.push(self.resolve(node).clone());
        self.nodes[node].style_id = Some(style_id);
        style_id
    }
}
