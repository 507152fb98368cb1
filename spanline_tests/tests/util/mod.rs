// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

pub(crate) mod env;
mod surface;

pub(crate) use env::TestEnv;
pub(crate) use surface::{ColorBrush, DrawCall, RecordingSurface};

/// Returns the current function name (for use in test naming).
#[macro_export]
macro_rules! test_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        let name = &name[..name.len() - 3];
        let name = &name[name.rfind(':').map(|x| x + 1).unwrap_or(0)..];

        name
    }};
}

/// Asserts that two floats are equal up to a small tolerance.
#[track_caller]
pub(crate) fn assert_approx(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
