// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared helpers for the tally test suites.

pub mod generator;
pub mod subscriber;

pub use generator::{BlockGenerator, GeneratedBlock, GeneratorConfig};
pub use subscriber::init_tracing;
