// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Types shared by every crate of the aggregation kernel: the error taxonomy,
//! borrowed views over decoded column blocks and the configuration structs.

pub mod column;
pub mod config;
pub mod error;

pub use column::{Block, ColumnView, GroupId, GroupKeys};
pub use config::{DigestConfig, HolderConfig};
pub use error::{Error, Result};
