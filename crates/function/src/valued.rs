// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::{AggregationResultHolder, GroupByResultHolder, ResultArray};
use tally_type::{
	ColumnView, Error, GroupId, Result,
	column::{check_columns, check_length},
	error::ColumnKind,
};

use crate::{AggregationFunction, Reducer};

/// Aggregation over a single-valued input column.
#[derive(Debug, Clone, Default)]
pub struct SingleValued<R> {
	reducer: R,
}

impl<R: Reducer> SingleValued<R> {
	pub fn new(reducer: R) -> Self {
		Self {
			reducer,
		}
	}

	pub fn reducer(&self) -> &R {
		&self.reducer
	}

	fn function_name(&self) -> String {
		self.reducer.name()
	}
}

/// Aggregation over a multi-valued input column: every element of every row
/// is folded as if it were its own row.
#[derive(Debug, Clone, Default)]
pub struct MultiValued<R> {
	reducer: R,
}

impl<R: Reducer> MultiValued<R> {
	pub fn new(reducer: R) -> Self {
		Self {
			reducer,
		}
	}

	pub fn reducer(&self) -> &R {
		&self.reducer
	}

	fn function_name(&self) -> String {
		format!("{}mv", self.reducer.name())
	}
}

macro_rules! impl_aggregation_function {
	($wrapper:ident, $kind:expr) => {
		impl<R: Reducer> AggregationFunction for $wrapper<R> {
			type Value = R::Value;
			type Array = R::Array;

			fn name(&self) -> String {
				self.function_name()
			}

			fn default_value(&self) -> R::Value {
				self.reducer.default_value()
			}

			fn aggregate(
				&self,
				n: usize,
				holder: &mut AggregationResultHolder<R::Value>,
				columns: &[ColumnView<'_>],
			) -> Result<()> {
				let column = input_column(|| self.function_name(), $kind, n, columns)?;
				fold_ungrouped(&self.reducer, column, n, holder)
			}

			fn aggregate_single_group(
				&self,
				n: usize,
				group_ids: &[GroupId],
				holder: &mut GroupByResultHolder<R::Array>,
				columns: &[ColumnView<'_>],
			) -> Result<()> {
				let column = input_column(|| self.function_name(), $kind, n, columns)?;
				fold_single_group(&self.reducer, column, n, group_ids, holder)
			}

			fn aggregate_multi_group(
				&self,
				n: usize,
				group_ids: &[Vec<GroupId>],
				holder: &mut GroupByResultHolder<R::Array>,
				columns: &[ColumnView<'_>],
			) -> Result<()> {
				let column = input_column(|| self.function_name(), $kind, n, columns)?;
				fold_multi_group(&self.reducer, column, n, group_ids, holder)
			}

			fn check_mergeable(&self, source: &R::Value) -> Result<()> {
				self.reducer.check_mergeable(source)
			}

			fn merge(&self, target: &mut R::Value, source: &R::Value) -> Result<()> {
				self.reducer.merge(target, source)
			}
		}
	};
}

impl_aggregation_function!(SingleValued, ColumnKind::SingleValued);
impl_aggregation_function!(MultiValued, ColumnKind::MultiValued);

/// Validates the inputs of one call and returns the column to fold.
fn input_column<'a>(
	name: impl FnOnce() -> String,
	expected: ColumnKind,
	n: usize,
	columns: &[ColumnView<'a>],
) -> Result<ColumnView<'a>> {
	let Some(column) = columns.first().copied() else {
		return Err(Error::MissingColumn {
			function: name(),
		});
	};
	if column.kind() != expected {
		return Err(Error::ColumnShape {
			function: name(),
			expected,
		});
	}
	check_columns(n, columns)?;
	Ok(column)
}

fn fold_ungrouped<R: Reducer>(
	reducer: &R,
	column: ColumnView<'_>,
	n: usize,
	holder: &mut AggregationResultHolder<R::Value>,
) -> Result<()> {
	let acc = holder.value_mut();
	for row in 0..n {
		for &value in column.row(row) {
			reducer.fold(acc, value)?;
		}
	}
	Ok(())
}

fn fold_single_group<R: Reducer>(
	reducer: &R,
	column: ColumnView<'_>,
	n: usize,
	group_ids: &[GroupId],
	holder: &mut GroupByResultHolder<R::Array>,
) -> Result<()> {
	check_length("group ids", n, group_ids.len())?;

	// growing up front keeps a capacity failure from leaving a partial fold
	let Some(&max_group) = group_ids.iter().max() else {
		return Ok(());
	};
	let array = holder.ensure_capacity(max_group)?;

	for (row, &group_id) in group_ids.iter().enumerate() {
		let values = column.row(row);
		if values.is_empty() {
			continue;
		}
		array.update(group_id as usize, |acc| values.iter().try_for_each(|&value| reducer.fold(acc, value)))?;
	}
	Ok(())
}

fn fold_multi_group<R: Reducer>(
	reducer: &R,
	column: ColumnView<'_>,
	n: usize,
	group_ids: &[Vec<GroupId>],
	holder: &mut GroupByResultHolder<R::Array>,
) -> Result<()> {
	check_length("group id lists", n, group_ids.len())?;

	let Some(max_group) = group_ids.iter().flatten().copied().max() else {
		return Ok(());
	};
	let array = holder.ensure_capacity(max_group)?;

	for (row, groups) in group_ids.iter().enumerate() {
		let values = column.row(row);
		if values.is_empty() {
			continue;
		}
		for &group_id in groups {
			array.update(group_id as usize, |acc| {
				values.iter().try_for_each(|&value| reducer.fold(acc, value))
			})?;
		}
	}
	Ok(())
}
