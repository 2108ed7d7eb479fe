// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::DoubleResultArray;
use tally_type::Result;

use crate::{MultiValued, Reducer, SingleValued};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sum;

impl Sum {
	pub const DEFAULT: f64 = 0.0;
}

impl Reducer for Sum {
	type Value = f64;
	type Array = DoubleResultArray;

	fn name(&self) -> String {
		"sum".to_string()
	}

	fn default_value(&self) -> f64 {
		Self::DEFAULT
	}

	#[inline]
	fn fold(&self, acc: &mut f64, value: f64) -> Result<()> {
		*acc += value;
		Ok(())
	}

	fn merge(&self, acc: &mut f64, other: &f64) -> Result<()> {
		*acc += *other;
		Ok(())
	}
}

pub type SumFunction = SingleValued<Sum>;
pub type SumMultiValued = MultiValued<Sum>;

#[cfg(test)]
mod tests {
	use tally_type::{ColumnView, HolderConfig};

	use super::*;
	use crate::AggregationFunction;

	#[test]
	fn test_single_group() {
		let function = SumFunction::default();
		let mut holder = function.new_group_by_holder(HolderConfig::default()).unwrap();

		function.aggregate_single_group(
			4,
			&[1, 1, 0, 1],
			&mut holder,
			&[ColumnView::Single(&[1.5, 2.5, 10.0, 4.0])],
		)
		.unwrap();

		assert_eq!(holder.value(0), 10.0);
		assert_eq!(holder.value(1), 8.0);
	}

	#[test]
	fn test_multi_valued() {
		let function = SumMultiValued::default();
		let rows = vec![vec![1.0, 2.0, 3.0], vec![], vec![4.0]];
		let mut holder = function.new_result_holder();

		function.aggregate(3, &mut holder, &[ColumnView::Multi(&rows)]).unwrap();
		assert_eq!(holder.get(), 10.0);
	}
}
