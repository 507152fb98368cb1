// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Four byte OpenType tag packed big-endian into a `u32`.
pub type Tag = u32;

/// A tagged font setting, such as a font feature.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Setting<T> {
    /// The tag that identifies the setting.
    pub tag: Tag,
    /// The value for the setting.
    pub value: T,
}

/// Setting for a font feature.
pub type FontFeature = Setting<u16>;

const fn tag_from_bytes(bytes: [u8; 4]) -> Tag {
    (bytes[0] as u32) << 24 | (bytes[1] as u32) << 16 | (bytes[2] as u32) << 8 | bytes[3] as u32
}

impl<T> Setting<T> {
    /// Creates a setting from a four byte tag such as `b"liga"`.
    pub const fn new(tag: &[u8; 4], value: T) -> Self {
        Self {
            tag: tag_from_bytes(*tag),
            value,
        }
    }
}
