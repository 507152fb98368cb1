// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `spanline`.
//!
//! - The `util` module contains shared utility functions that are needed by different
//!   test methods.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests. This makes it easier to share the test environment
//!   and the recording surface between topics.
//! - All tests measure text with `spanline_dev::AhemBackend`, so every character is exactly
//!   one em wide and expected geometry can be computed by hand.
//! - If you want to add new tests, try to follow these guidelines:
//!   - If your test can be classified to a clear "topic" (e.g. wrap, queries, etc.), put
//!     it into the corresponding module, or create a new one in case it doesn't exist yet.
//!   - If it cannot be classified cleanly, put it into `basic.rs`.
//!   - For test naming, put the "topic" of the test at the start of the name instead of
//!     the end. For example, `wrap_long_word` is better than `long_word_wrap`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]
#![allow(clippy::float_cmp, reason = "Ahem metrics are exact")]

mod placeholders;
mod queries;
#[macro_use]
mod util;
