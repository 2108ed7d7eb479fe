// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
};

/// The value shape a result array was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
	Double,
	Long,
	DoubleLong,
	Object,
}

impl Display for ResultShape {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ResultShape::Double => f.write_str("DOUBLE"),
			ResultShape::Long => f.write_str("LONG"),
			ResultShape::DoubleLong => f.write_str("DOUBLE_LONG"),
			ResultShape::Object => f.write_str("OBJECT"),
		}
	}
}

/// Whether a column carries one value or a list of values per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
	SingleValued,
	MultiValued,
}

impl Display for ColumnKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ColumnKind::SingleValued => f.write_str("single-valued"),
			ColumnKind::MultiValued => f.write_str("multi-valued"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	#[error("length mismatch for {what}: expected {expected} rows, got {actual}")]
	LengthMismatch {
		what: &'static str,
		expected: usize,
		actual: usize,
	},

	#[error("index {index} out of bounds for result array of size {size}")]
	IndexOutOfBounds {
		index: usize,
		size: usize,
	},

	#[error("operation '{operation}' is not supported by a {shape} result array")]
	UnsupportedOperation {
		operation: &'static str,
		shape: ResultShape,
	},

	#[error("unsupported percentile {0}, expected one of 50, 90, 95, 99")]
	UnsupportedPercentile(u32),

	#[error("cannot merge quantile digests with max error {left} and {right}")]
	IncompatibleDigest {
		left: f64,
		right: f64,
	},

	#[error("function '{function}' requires an input column")]
	MissingColumn {
		function: String,
	},

	#[error("function '{function}' expects a {expected} input column")]
	ColumnShape {
		function: String,
		expected: ColumnKind,
	},

	#[error("segment scan cancelled")]
	Cancelled,

	#[error("serialization failed: {0}")]
	Serialization(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns `Err(Error::InvalidArgument)` built from a format string.
#[macro_export]
macro_rules! invalid_argument {
	($($arg:tt)*) => {
		return Err($crate::error::Error::InvalidArgument(format!($($arg)*)))
	};
}
