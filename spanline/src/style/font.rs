// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use core::fmt::{self, Write};

/// Visual weight class of a font, on the CSS scale from 1 to 1000.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontWeight(u16);

impl FontWeight {
    /// Thin weight (100).
    pub const THIN: Self = Self(100);
    /// Light weight (300).
    pub const LIGHT: Self = Self(300);
    /// Normal weight (400).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (500).
    pub const MEDIUM: Self = Self(500);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);
    /// Black weight (900).
    pub const BLACK: Self = Self(900);

    /// Creates a weight, clamping to the range `1..=1000`.
    pub const fn new(weight: u16) -> Self {
        let weight = if weight < 1 {
            1
        } else if weight > 1000 {
            1000
        } else {
            weight
        };
        Self(weight)
    }

    /// Returns the numeric weight.
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::NORMAL => f.write_str("normal"),
            Self::BOLD => f.write_str("bold"),
            Self(value) => write!(f, "{value}"),
        }
    }
}

/// Visual style or 'slope' of a font.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontStyle {
    /// An upright or "roman" style.
    #[default]
    Normal,
    /// Generally a slanted style, originally based on semi-cursive forms.
    Italic,
}

const GENERIC_FAMILIES: &[&str] = &[
    "serif",
    "sans-serif",
    "monospace",
    "cursive",
    "fantasy",
    "system-ui",
    "math",
    "emoji",
];

fn write_family(out: &mut String, family: &str) {
    let needs_quotes = family.contains(|c: char| !c.is_ascii_alphanumeric() && c != '-');
    if GENERIC_FAMILIES.contains(&family) || !needs_quotes {
        out.push_str(family);
    } else {
        out.push('"');
        out.push_str(family);
        out.push('"');
    }
}

/// Builds a CSS font shorthand. Normal style and weight are omitted.
pub(crate) fn font_description(
    style: FontStyle,
    weight: FontWeight,
    size: f32,
    family: &str,
    fallback: &[String],
) -> String {
    let mut out = String::new();
    if style == FontStyle::Italic {
        out.push_str("italic ");
    }
    if weight != FontWeight::NORMAL {
        let _ = write!(out, "{weight} ");
    }
    let _ = write!(out, "{size}px ");
    write_family(&mut out, family);
    for family in fallback {
        out.push_str(", ");
        write_family(&mut out, family);
    }
    out
}
