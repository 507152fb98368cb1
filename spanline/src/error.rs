// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Failure reported by a [`MeasureBackend`](crate::MeasureBackend).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MeasureError {
    /// The backend has no font matching the requested description.
    #[error("font `{0}` is not available to the measurement backend")]
    UnknownFont(String),
    /// The backend cannot measure at all (for example, its surface was lost).
    #[error("measurement backend is unavailable")]
    Unavailable,
    /// Any other backend specific failure.
    #[error("measurement failed: {0}")]
    Other(String),
}

/// Failure while laying out or querying a [`Paragraph`](crate::Paragraph).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum LayoutError {
    /// Text could not be measured.
    #[error(transparent)]
    Measure(#[from] MeasureError),
}
