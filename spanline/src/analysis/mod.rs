// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text analysis: line-break opportunities, word boundaries and grapheme clusters.
//!
//! Line-break opportunities and grapheme clusters come from `icu_segmenter`.
//! Word boundaries are a heuristic over a handful of character classes.

mod words;

use alloc::vec::Vec;

use icu_segmenter::options::LineBreakOptions;
use icu_segmenter::{GraphemeClusterSegmenter, LineSegmenter};

use crate::placeholder::PLACEHOLDER_CHAR;

pub use words::{next_break_index, prev_break_index};

/// Kind of a line-break opportunity.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BreakKind {
    /// The line may be broken here.
    Soft,
    /// The line must be broken here.
    Hard,
    /// The end of the text.
    End,
}

/// A line-break opportunity before the byte at `index`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LineBreak {
    /// Byte offset the next line would start at.
    pub index: usize,
    /// Whether the break is optional.
    pub kind: BreakKind,
}

/// Returns `true` for characters that force a line break after them.
pub fn is_hard_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Returns `true` for characters that occupy no horizontal space at the end of a line.
pub(crate) fn is_trailing_space(c: char) -> bool {
    c.is_whitespace()
}

/// Returns the line-break opportunities of `text`, in order.
///
/// Opportunities follow the Unicode line breaking algorithm, with lines also
/// allowed to break on both sides of every placeholder. An opportunity after a
/// line terminator is a hard break (`\r\n` is one terminator). The last item is
/// always at `text.len()`, of kind [`BreakKind::Hard`] if the text ends with a
/// line terminator and [`BreakKind::End`] otherwise. Empty text yields nothing.
pub fn line_breaks(text: &str) -> impl Iterator<Item = LineBreak> + '_ {
    let mut indices: Vec<usize> = LineSegmenter::new_auto(LineBreakOptions::default())
        .segment_str(text)
        .collect();
    for (index, _) in text.match_indices(PLACEHOLDER_CHAR) {
        indices.push(index);
        indices.push(index + PLACEHOLDER_CHAR.len_utf8());
    }
    indices.sort_unstable();
    indices.dedup();
    indices
        .into_iter()
        .filter(|&index| index > 0)
        .map(move |index| {
            let kind = if text[..index].ends_with(is_hard_break) {
                BreakKind::Hard
            } else if index == text.len() {
                BreakKind::End
            } else {
                BreakKind::Soft
            };
            LineBreak { index, kind }
        })
}

/// Returns every grapheme cluster boundary of `text`, including `0` and `text.len()`.
pub fn grapheme_boundaries(text: &str) -> impl Iterator<Item = usize> + '_ {
    GraphemeClusterSegmenter::new().segment_str(text)
}

/// Returns the offset of the grapheme cluster boundary after `offset`, or
/// `text.len()` if there is none.
pub fn next_grapheme_offset(text: &str, offset: usize) -> usize {
    grapheme_boundaries(text)
        .find(|boundary| *boundary > offset)
        .unwrap_or(text.len())
}

/// Returns the offset of the grapheme cluster boundary before `offset`, or `0`
/// if there is none.
pub fn prev_grapheme_offset(text: &str, offset: usize) -> usize {
    grapheme_boundaries(text)
        .take_while(|boundary| *boundary < offset)
        .last()
        .unwrap_or(0)
}
