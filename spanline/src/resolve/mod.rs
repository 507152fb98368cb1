// Copyright 2025 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of inherited style properties during paragraph construction.

mod tree;

pub(crate) use tree::{ROOT_NODE, StyleTree};
