// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Drives one aggregation over the blocks of a single segment.
//!
//! Cancellation is only observed between blocks; a fold in progress always
//! completes.

use std::sync::atomic::{AtomicBool, Ordering};

use tally_holder::{AggregationResultHolder, GroupByResultHolder};
use tally_type::{Block, Error, GroupKeys, Result, invalid_argument};
use tracing::{instrument, trace, warn};

use crate::AggregationFunction;

/// Work done by one segment scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
	pub blocks: usize,
	pub rows: usize,
}

impl ScanSummary {
	fn record(&mut self, block: &Block<'_>) {
		self.blocks += 1;
		self.rows += block.row_count;
	}
}

#[instrument(name = "function::segment::scan", level = "trace", skip_all, fields(function = %function.name(), blocks = blocks.len()))]
pub fn scan_segment<F: AggregationFunction>(
	function: &F,
	blocks: &[Block<'_>],
	holder: &mut AggregationResultHolder<F::Value>,
	cancel: &AtomicBool,
) -> Result<ScanSummary> {
	let mut summary = ScanSummary::default();

	for block in blocks {
		check_cancelled(cancel, &summary)?;
		if block.group_keys.is_some() {
			invalid_argument!("block carries group keys but the aggregation is not grouped");
		}

		function.aggregate(block.row_count, holder, &block.columns)?;
		summary.record(block);
	}

	trace!(blocks = summary.blocks, rows = summary.rows, "segment scan complete");
	Ok(summary)
}

#[instrument(name = "function::segment::scan_grouped", level = "trace", skip_all, fields(function = %function.name(), blocks = blocks.len()))]
pub fn scan_segment_grouped<F: AggregationFunction>(
	function: &F,
	blocks: &[Block<'_>],
	holder: &mut GroupByResultHolder<F::Array>,
	cancel: &AtomicBool,
) -> Result<ScanSummary> {
	let mut summary = ScanSummary::default();

	for block in blocks {
		check_cancelled(cancel, &summary)?;
		match block.group_keys {
			Some(GroupKeys::Single(group_ids)) => {
				function.aggregate_single_group(block.row_count, group_ids, holder, &block.columns)?
			}
			Some(GroupKeys::Multi(group_ids)) => {
				function.aggregate_multi_group(block.row_count, group_ids, holder, &block.columns)?
			}
			None => invalid_argument!("grouped aggregation requires group keys on every block"),
		}
		summary.record(block);
	}

	trace!(blocks = summary.blocks, rows = summary.rows, groups = holder.capacity(), "grouped segment scan complete");
	Ok(summary)
}

fn check_cancelled(cancel: &AtomicBool, summary: &ScanSummary) -> Result<()> {
	if cancel.load(Ordering::Acquire) {
		warn!(blocks = summary.blocks, rows = summary.rows, "segment scan cancelled");
		return Err(Error::Cancelled);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use tally_type::{ColumnView, HolderConfig};

	use super::*;
	use crate::{CountFunction, MinFunction, SumFunction};

	#[test]
	fn test_scan_segment() {
		let function = SumFunction::default();
		let first = [1.0, 2.0, 3.0];
		let second = [4.0];
		let blocks = vec![
			Block::new(3, vec![ColumnView::Single(&first)]),
			Block::new(1, vec![ColumnView::Single(&second)]),
		];
		let mut holder = function.new_result_holder();

		let summary = scan_segment(&function, &blocks, &mut holder, &AtomicBool::new(false)).unwrap();
		assert_eq!(
			summary,
			ScanSummary {
				blocks: 2,
				rows: 4,
			}
		);
		assert_eq!(holder.get(), 10.0);
	}

	#[test]
	fn test_scan_grouped_mixes_key_kinds() {
		let function = CountFunction::default();
		let values = [1.0, 2.0, 3.0];
		let single = [0, 1, 1];
		let multi = vec![vec![0, 1], vec![], vec![2]];
		let blocks = vec![
			Block::grouped(3, vec![ColumnView::Single(&values)], GroupKeys::Single(&single)),
			Block::grouped(3, vec![ColumnView::Single(&values)], GroupKeys::Multi(&multi)),
		];
		let mut holder = function.new_group_by_holder(HolderConfig::default()).unwrap();

		scan_segment_grouped(&function, &blocks, &mut holder, &AtomicBool::new(false)).unwrap();
		assert_eq!(holder.value(0), 2);
		assert_eq!(holder.value(1), 3);
		assert_eq!(holder.value(2), 1);
	}

	#[test]
	fn test_key_presence_is_checked() {
		let function = MinFunction::default();
		let values = [1.0];
		let ids = [0];

		let grouped = vec![Block::grouped(1, vec![ColumnView::Single(&values)], GroupKeys::Single(&ids))];
		let mut holder = function.new_result_holder();
		assert!(matches!(
			scan_segment(&function, &grouped, &mut holder, &AtomicBool::new(false)),
			Err(Error::InvalidArgument(_))
		));

		let ungrouped = vec![Block::new(1, vec![ColumnView::Single(&values)])];
		let mut holder = function.new_group_by_holder(HolderConfig::default()).unwrap();
		assert!(matches!(
			scan_segment_grouped(&function, &ungrouped, &mut holder, &AtomicBool::new(false)),
			Err(Error::InvalidArgument(_))
		));
	}

	#[test]
	fn test_cancelled_before_first_block() {
		let function = SumFunction::default();
		let values = [1.0];
		let blocks = vec![Block::new(1, vec![ColumnView::Single(&values)])];
		let mut holder = function.new_result_holder();

		let result = scan_segment(&function, &blocks, &mut holder, &AtomicBool::new(true));
		assert_eq!(result, Err(Error::Cancelled));
		assert_eq!(holder.get(), 0.0);
	}

	#[test]
	fn test_empty_segment() {
		let function = SumFunction::default();
		let mut holder = function.new_group_by_holder(HolderConfig::default()).unwrap();
		let summary = scan_segment_grouped(&function, &[], &mut holder, &AtomicBool::new(false)).unwrap();
		assert_eq!(summary, ScanSummary::default());
		assert_eq!(holder.capacity(), 0);
	}
}
