// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::LongResultArray;
use tally_type::Result;

use crate::{MultiValued, Reducer, SingleValued};

/// Counts input values. The multi-valued form counts list elements, not rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Count;

impl Count {
	pub const DEFAULT: i64 = 0;
}

impl Reducer for Count {
	type Value = i64;
	type Array = LongResultArray;

	fn name(&self) -> String {
		"count".to_string()
	}

	fn default_value(&self) -> i64 {
		Self::DEFAULT
	}

	#[inline]
	fn fold(&self, acc: &mut i64, _value: f64) -> Result<()> {
		*acc += 1;
		Ok(())
	}

	fn merge(&self, acc: &mut i64, other: &i64) -> Result<()> {
		*acc += *other;
		Ok(())
	}
}

pub type CountFunction = SingleValued<Count>;
pub type CountMultiValued = MultiValued<Count>;

#[cfg(test)]
mod tests {
	use tally_type::{ColumnView, HolderConfig};

	use super::*;
	use crate::AggregationFunction;

	#[test]
	fn test_counts_rows() {
		let function = CountFunction::default();
		let mut holder = function.new_group_by_holder(HolderConfig::default()).unwrap();

		function.aggregate_single_group(
			5,
			&[2, 0, 2, 2, 0],
			&mut holder,
			&[ColumnView::Single(&[f64::NAN, 1.0, 2.0, 3.0, 4.0])],
		)
		.unwrap();

		assert_eq!(holder.value(0), 2);
		assert_eq!(holder.value(1), 0);
		assert_eq!(holder.value(2), 3);
	}

	#[test]
	fn test_counts_elements() {
		let function = CountMultiValued::default();
		let rows = vec![vec![1.0, 2.0], vec![], vec![3.0, 4.0, 5.0]];
		let mut holder = function.new_result_holder();

		function.aggregate(3, &mut holder, &[ColumnView::Multi(&rows)]).unwrap();
		assert_eq!(holder.get(), 5);
	}
}
