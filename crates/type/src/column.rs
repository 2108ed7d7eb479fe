// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Borrowed views over one decoded block of a segment scan.

use std::slice;

use crate::{Error, Result, error::ColumnKind};

/// Dense per-segment identifier of a distinct group-by key.
pub type GroupId = u32;

/// Decoded values of one column for the rows of a block.
#[derive(Debug, Clone, Copy)]
pub enum ColumnView<'a> {
	/// One value per row.
	Single(&'a [f64]),
	/// A variable-length list of values per row.
	Multi(&'a [Vec<f64>]),
}

impl<'a> ColumnView<'a> {
	pub fn len(&self) -> usize {
		match self {
			ColumnView::Single(values) => values.len(),
			ColumnView::Multi(rows) => rows.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn kind(&self) -> ColumnKind {
		match self {
			ColumnView::Single(_) => ColumnKind::SingleValued,
			ColumnView::Multi(_) => ColumnKind::MultiValued,
		}
	}

	/// Values of `row`; a single-valued column yields a one element slice.
	#[inline]
	pub fn row(&self, row: usize) -> &'a [f64] {
		match self {
			ColumnView::Single(values) => slice::from_ref(&values[row]),
			ColumnView::Multi(rows) => rows[row].as_slice(),
		}
	}
}

/// Group membership of the rows of a block.
#[derive(Debug, Clone, Copy)]
pub enum GroupKeys<'a> {
	/// Exactly one group per row.
	Single(&'a [GroupId]),
	/// Any number of groups per row, produced by multi-valued group-by keys.
	Multi(&'a [Vec<GroupId>]),
}

impl<'a> GroupKeys<'a> {
	pub fn len(&self) -> usize {
		match self {
			GroupKeys::Single(ids) => ids.len(),
			GroupKeys::Multi(lists) => lists.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// One unit of scan work handed to the aggregation kernel.
#[derive(Debug, Clone)]
pub struct Block<'a> {
	pub row_count: usize,
	pub columns: Vec<ColumnView<'a>>,
	pub group_keys: Option<GroupKeys<'a>>,
}

impl<'a> Block<'a> {
	pub fn new(row_count: usize, columns: Vec<ColumnView<'a>>) -> Self {
		Self {
			row_count,
			columns,
			group_keys: None,
		}
	}

	pub fn grouped(row_count: usize, columns: Vec<ColumnView<'a>>, group_keys: GroupKeys<'a>) -> Self {
		Self {
			row_count,
			columns,
			group_keys: Some(group_keys),
		}
	}
}

/// Fails with `LengthMismatch` unless every column has exactly `n` rows.
pub fn check_columns(n: usize, columns: &[ColumnView<'_>]) -> Result<()> {
	for column in columns {
		check_length("input column", n, column.len())?;
	}
	Ok(())
}

/// Fails with `LengthMismatch` when `actual != expected`.
#[inline]
pub fn check_length(what: &'static str, expected: usize, actual: usize) -> Result<()> {
	if expected != actual {
		return Err(Error::LengthMismatch {
			what,
			expected,
			actual,
		});
	}
	Ok(())
}
