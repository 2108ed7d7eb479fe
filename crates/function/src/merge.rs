// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Combining the holders of independently scanned segments.
//!
//! Both holders must have been filled by the same function and must use the
//! same group id numbering.

use tally_holder::{AggregationResultHolder, GroupByResultHolder, ResultArray};
use tally_type::{GroupId, Result};
use tracing::instrument;

use crate::AggregationFunction;

#[instrument(name = "function::merge::result_holders", level = "trace", skip_all, fields(function = %function.name()))]
pub fn merge_result_holders<F: AggregationFunction>(
	function: &F,
	target: &mut AggregationResultHolder<F::Value>,
	source: &AggregationResultHolder<F::Value>,
) -> Result<()> {
	function.merge(target.value_mut(), source.value())
}

/// Merges every slot of `source` into the slot of the same group id in
/// `target`, growing `target` as needed.
///
/// Every source slot is checked with
/// [`AggregationFunction::check_mergeable`] before `target` is grown or any
/// of its slots is touched, so an incompatible source leaves `target` as it
/// was.
#[instrument(name = "function::merge::group_by_holders", level = "trace", skip_all, fields(function = %function.name(), groups = source.capacity()))]
pub fn merge_group_by_holders<F: AggregationFunction>(
	function: &F,
	target: &mut GroupByResultHolder<F::Array>,
	source: &GroupByResultHolder<F::Array>,
) -> Result<()> {
	let Some(source) = source.array() else {
		return Ok(());
	};
	let size = source.size();
	if size == 0 {
		return Ok(());
	}

	let values = (0..size).map(|group_id| source.get(group_id)).collect::<Result<Vec<_>>>()?;
	for value in &values {
		function.check_mergeable(value)?;
	}

	let array = target.ensure_capacity((size - 1) as GroupId)?;
	for (group_id, value) in values.iter().enumerate() {
		array.update(group_id, |acc| function.merge(acc, value))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use tally_type::{ColumnView, Error, HolderConfig};

	use super::*;
	use crate::{AvgFunction, MinFunction, PercentileEst, PercentileEstFunction};

	#[test]
	fn test_merge_result_holders() {
		let function = MinFunction::default();
		let mut left = function.new_result_holder();
		let mut right = function.new_result_holder();
		function.aggregate(2, &mut left, &[ColumnView::Single(&[4.0, 6.0])]).unwrap();
		function.aggregate(2, &mut right, &[ColumnView::Single(&[5.0, 3.0])]).unwrap();

		merge_result_holders(&function, &mut left, &right).unwrap();
		assert_eq!(left.get(), 3.0);
		assert_eq!(right.get(), 3.0);
	}

	#[test]
	fn test_merge_grows_target() {
		let function = AvgFunction::default();
		let config = HolderConfig::new(2, None);
		let mut target = function.new_group_by_holder(config.clone()).unwrap();
		let mut source = function.new_group_by_holder(config).unwrap();

		function.aggregate_single_group(2, &[0, 1], &mut target, &[ColumnView::Single(&[1.0, 2.0])]).unwrap();
		function.aggregate_single_group(2, &[1, 9], &mut source, &[ColumnView::Single(&[4.0, 8.0])]).unwrap();

		merge_group_by_holders(&function, &mut target, &source).unwrap();
		assert_eq!(target.value(0), (1.0, 1));
		assert_eq!(target.value(1), (6.0, 2));
		assert_eq!(target.value(9), (8.0, 1));
		assert!(target.capacity() >= source.capacity());
	}

	#[test]
	fn test_merge_empty_source() {
		let function = MinFunction::default();
		let mut target = function.new_group_by_holder(HolderConfig::default()).unwrap();
		let source = function.new_group_by_holder(HolderConfig::default()).unwrap();

		merge_group_by_holders(&function, &mut target, &source).unwrap();
		assert_eq!(target.capacity(), 0);
	}

	#[test]
	fn test_merge_digests() {
		let function = PercentileEstFunction::new(PercentileEst::new(50).unwrap());
		let mut target = function.new_group_by_holder(HolderConfig::default()).unwrap();
		let mut source = function.new_group_by_holder(HolderConfig::default()).unwrap();

		let low: Vec<f64> = (1..=100).map(|v| v as f64).collect();
		let high: Vec<f64> = (101..=200).map(|v| v as f64).collect();
		function.aggregate_single_group(100, &[3; 100], &mut target, &[ColumnView::Single(&low)]).unwrap();
		function.aggregate_single_group(100, &[3; 100], &mut source, &[ColumnView::Single(&high)]).unwrap();

		merge_group_by_holders(&function, &mut target, &source).unwrap();

		let median = function.reducer().finish(&target.value(3)).unwrap().unwrap();
		assert!((90..=111).contains(&median), "median {}", median);
		assert_eq!(target.value(0), None);
	}

	#[test]
	fn test_merge_incompatible_digests() {
		let coarse = PercentileEstFunction::new(PercentileEst::with_max_error(50, 0.1).unwrap());
		let fine = PercentileEstFunction::new(PercentileEst::with_max_error(50, 0.01).unwrap());
		let mut target = coarse.new_result_holder();
		let mut source = fine.new_result_holder();
		coarse.aggregate(1, &mut target, &[ColumnView::Single(&[1.0])]).unwrap();
		fine.aggregate(1, &mut source, &[ColumnView::Single(&[2.0])]).unwrap();

		assert!(matches!(
			merge_result_holders(&coarse, &mut target, &source),
			Err(Error::IncompatibleDigest { .. })
		));
	}

	#[test]
	fn test_incompatible_group_merge_leaves_target_untouched() {
		let coarse = PercentileEstFunction::new(PercentileEst::with_max_error(50, 0.1).unwrap());
		let fine = PercentileEstFunction::new(PercentileEst::with_max_error(50, 0.01).unwrap());
		let config = HolderConfig::new(2, None);
		let mut target = coarse.new_group_by_holder(config.clone()).unwrap();
		let mut source = fine.new_group_by_holder(config).unwrap();

		coarse.aggregate_single_group(1, &[1], &mut target, &[ColumnView::Single(&[7.0])]).unwrap();
		fine.aggregate_single_group(2, &[0, 1], &mut source, &[ColumnView::Single(&[1.0, 2.0])]).unwrap();
		let before = target.clone();

		assert_eq!(
			merge_group_by_holders(&coarse, &mut target, &source),
			Err(Error::IncompatibleDigest {
				left: 0.1,
				right: 0.01,
			})
		);
		assert_eq!(target.value(0), None);
		assert_eq!(target.value(1), before.value(1));
		assert_eq!(target.capacity(), before.capacity());
	}

	#[test]
	fn test_incompatible_source_does_not_grow_target() {
		let coarse = PercentileEstFunction::new(PercentileEst::with_max_error(50, 0.1).unwrap());
		let fine = PercentileEstFunction::new(PercentileEst::with_max_error(50, 0.01).unwrap());
		let mut target = coarse.new_group_by_holder(HolderConfig::new(2, None)).unwrap();
		let mut source = fine.new_group_by_holder(HolderConfig::new(2, None)).unwrap();
		fine.aggregate_single_group(1, &[40], &mut source, &[ColumnView::Single(&[1.0])]).unwrap();

		assert!(merge_group_by_holders(&coarse, &mut target, &source).is_err());
		assert_eq!(target.capacity(), 0);
	}
}
