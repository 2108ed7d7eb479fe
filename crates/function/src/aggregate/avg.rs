// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::DoubleLongResultArray;
use tally_type::Result;

use crate::{MultiValued, Reducer, SingleValued};

/// Running `(sum, count)` pair, finished into a mean by [`Avg::finish`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Avg;

impl Avg {
	pub const DEFAULT: (f64, i64) = (0.0, 0);

	/// Mean of a finished accumulator, `None` when no value was folded.
	pub fn finish(acc: &(f64, i64)) -> Option<f64> {
		let (sum, count) = *acc;
		if count == 0 {
			return None;
		}
		Some(sum / count as f64)
	}
}

impl Reducer for Avg {
	type Value = (f64, i64);
	type Array = DoubleLongResultArray;

	fn name(&self) -> String {
		"avg".to_string()
	}

	fn default_value(&self) -> (f64, i64) {
		Self::DEFAULT
	}

	#[inline]
	fn fold(&self, acc: &mut (f64, i64), value: f64) -> Result<()> {
		acc.0 += value;
		acc.1 += 1;
		Ok(())
	}

	fn merge(&self, acc: &mut (f64, i64), other: &(f64, i64)) -> Result<()> {
		acc.0 += other.0;
		acc.1 += other.1;
		Ok(())
	}
}

pub type AvgFunction = SingleValued<Avg>;
pub type AvgMultiValued = MultiValued<Avg>;

#[cfg(test)]
mod tests {
	use tally_type::{ColumnView, HolderConfig};

	use super::*;
	use crate::AggregationFunction;

	#[test]
	fn test_group_means() {
		let function = AvgFunction::default();
		let mut holder = function.new_group_by_holder(HolderConfig::default()).unwrap();

		function.aggregate_single_group(
			4,
			&[0, 0, 1, 0],
			&mut holder,
			&[ColumnView::Single(&[1.0, 2.0, 10.0, 6.0])],
		)
		.unwrap();

		assert_eq!(holder.value(0), (9.0, 3));
		assert_eq!(Avg::finish(&holder.value(0)), Some(3.0));
		assert_eq!(Avg::finish(&holder.value(1)), Some(10.0));
		assert_eq!(Avg::finish(&holder.value(7)), None);
	}

	#[test]
	fn test_merge_adds_pairs() {
		let mut acc = (4.0, 2);
		Avg.merge(&mut acc, &(6.0, 3)).unwrap();
		Avg.merge(&mut acc, &Avg::DEFAULT).unwrap();
		assert_eq!(acc, (10.0, 5));
		assert_eq!(Avg::finish(&acc), Some(2.0));
	}
}
