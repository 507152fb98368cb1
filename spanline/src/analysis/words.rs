// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word boundaries for selection.
//!
//! This follows the shape of the default word boundary rules from UAX #29, but
//! classifies characters with a few hand-picked ranges instead of the Unicode
//! property tables.

use super::is_hard_break;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum WordClass {
    Newline,
    Extend,
    Whitespace,
    Letter,
    Numeric,
    Katakana,
    MidLetter,
    MidNumLet,
    MidNum,
    ExtendNumLet,
    Other,
}

fn classify(c: char) -> WordClass {
    use WordClass::*;
    if is_hard_break(c) {
        return Newline;
    }
    match c {
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{200C}'
        | '\u{200D}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{FE20}'..='\u{FE2F}'
        | '\u{1F3FB}'..='\u{1F3FF}' => Extend,
        '_' | '\u{202F}' | '\u{203F}' | '\u{2040}' | '\u{2054}' | '\u{FE33}' | '\u{FE34}'
        | '\u{FE4D}'..='\u{FE4F}' | '\u{FF3F}' => ExtendNumLet,
        ':' | '\u{B7}' | '\u{387}' | '\u{5F4}' | '\u{2027}' | '\u{FE13}' | '\u{FE55}'
        | '\u{FF1A}' => MidLetter,
        '.' | '\'' | '\u{2018}' | '\u{2019}' | '\u{2024}' | '\u{FE52}' | '\u{FF07}'
        | '\u{FF0E}' => MidNumLet,
        ',' | ';' | '\u{37E}' | '\u{589}' | '\u{60C}' | '\u{60D}' | '\u{66C}' | '\u{7F8}'
        | '\u{2044}' | '\u{FE10}' | '\u{FE14}' | '\u{FE50}' | '\u{FE54}' | '\u{FF0C}'
        | '\u{FF1B}' => MidNum,
        '\u{30A0}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => Katakana,
        // Ideographs and kana are alphabetic, but every one is a word of its own.
        '\u{3040}'..='\u{309F}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FFFF}' => Other,
        c if c.is_whitespace() => Whitespace,
        c if c.is_numeric() => Numeric,
        c if c.is_alphabetic() => Letter,
        _ => Other,
    }
}

/// Returns the class of the last non-extending character before `index`, and
/// the offset that character starts at.
fn class_before(text: &str, index: usize) -> Option<(WordClass, usize)> {
    text[..index]
        .char_indices()
        .rev()
        .map(|(i, c)| (classify(c), i))
        .find(|(class, _)| *class != WordClass::Extend)
}

/// Returns the class of the first non-extending character at or after `index`,
/// and the offset just past it.
fn class_after(text: &str, index: usize) -> Option<(WordClass, usize)> {
    text[index..]
        .char_indices()
        .map(|(i, c)| (classify(c), index + i + c.len_utf8()))
        .find(|(class, _)| *class != WordClass::Extend)
}

/// Returns `true` if a word boundary lies before the byte at `index`.
fn is_boundary(text: &str, index: usize) -> bool {
    use WordClass::*;
    if index == 0 || index >= text.len() {
        return true;
    }
    let (Some(left_raw), Some(right_raw)) = (text[..index].chars().next_back(), text[index..].chars().next())
    else {
        return true;
    };
    if left_raw == '\r' && right_raw == '\n' {
        return false;
    }
    let right = classify(right_raw);
    if is_hard_break(left_raw) || right == Newline {
        return true;
    }
    if right == Extend {
        return false;
    }
    let Some((left, left_start)) = class_before(text, index) else {
        return true;
    };
    let after_right = || class_after(text, index + right_raw.len_utf8()).map(|(class, _)| class);
    let before_left = || class_before(text, left_start).map(|(class, _)| class);
    match (left, right) {
        (Whitespace, Whitespace)
        | (Letter, Letter)
        | (Numeric, Numeric)
        | (Letter, Numeric)
        | (Numeric, Letter)
        | (Katakana, Katakana)
        | (Letter | Numeric | Katakana | ExtendNumLet, ExtendNumLet)
        | (ExtendNumLet, Letter | Numeric | Katakana) => false,
        (Letter, MidLetter | MidNumLet) => after_right() != Some(Letter),
        (MidLetter | MidNumLet, Letter) => before_left() != Some(Letter),
        (Numeric, MidNum | MidNumLet) => after_right() != Some(Numeric),
        (MidNum | MidNumLet, Numeric) => before_left() != Some(Numeric),
        _ => true,
    }
}

fn clamp_to_char_boundary(text: &str, index: usize) -> usize {
    let index = index.min(text.len());
    assert!(
        text.is_char_boundary(index),
        "index {index} is not on a character boundary"
    );
    index
}

/// Returns the nearest word boundary at or before `index`.
///
/// Indices past the end of `text` are clamped to its length.
///
/// # Panics
///
/// Panics if `index` is inside the encoding of a character.
pub fn prev_break_index(text: &str, index: usize) -> usize {
    let mut index = clamp_to_char_boundary(text, index);
    while index > 0 && !is_boundary(text, index) {
        index = text[..index]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i);
    }
    index
}

/// Returns the nearest word boundary after the character at `index`, that is
/// the end of the word containing that character.
///
/// Returns `text.len()` when `index` is at or past the end.
///
/// # Panics
///
/// Panics if `index` is inside the encoding of a character.
pub fn next_break_index(text: &str, index: usize) -> usize {
    let mut index = clamp_to_char_boundary(text, index);
    while let Some(c) = text[index..].chars().next() {
        index += c.len_utf8();
        if is_boundary(text, index) {
            break;
        }
    }
    index
}
