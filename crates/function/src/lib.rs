// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Aggregation functions of the scan kernel.
//!
//! A function is stateless and shared by every segment scan; all running
//! state lives in the result holder handed to each call. Per-row logic is
//! written once as a [`Reducer`] and exposed for single-valued or
//! multi-valued input columns through the [`SingleValued`] and
//! [`MultiValued`] wrappers.

use tally_holder::{AggregationResultHolder, GroupByResultHolder, ResultArray};
use tally_type::{ColumnView, GroupId, HolderConfig, Result};

pub mod aggregate;
pub mod merge;
pub mod reducer;
pub mod segment;
mod valued;

pub use aggregate::{
	Avg, AvgFunction, AvgMultiValued, Count, CountFunction, CountMultiValued, Max, MaxFunction, MaxMultiValued,
	Min, MinFunction, MinMultiValued, PercentileEst, PercentileEstFunction, PercentileEstMultiValued, Sum,
	SumFunction, SumMultiValued,
};
pub use merge::{merge_group_by_holders, merge_result_holders};
pub use reducer::Reducer;
pub use segment::{ScanSummary, scan_segment, scan_segment_grouped};
pub use valued::{MultiValued, SingleValued};

pub trait AggregationFunction: Send + Sync {
	/// Accumulator of one group.
	type Value: Clone;

	/// Result array storing one accumulator per group id.
	type Array: ResultArray<Value = Self::Value>;

	/// Lower-case identifier, unique per function and input kind.
	fn name(&self) -> String;

	/// Accumulator of a group that has not seen any value.
	fn default_value(&self) -> Self::Value;

	fn new_result_holder(&self) -> AggregationResultHolder<Self::Value> {
		AggregationResultHolder::new(self.default_value())
	}

	fn new_group_by_holder(&self, config: HolderConfig) -> Result<GroupByResultHolder<Self::Array>> {
		GroupByResultHolder::new(self.default_value(), config)
	}

	/// Folds the first `n` rows of `columns` into the holder's current value.
	fn aggregate(
		&self,
		n: usize,
		holder: &mut AggregationResultHolder<Self::Value>,
		columns: &[ColumnView<'_>],
	) -> Result<()>;

	/// Folds row `i` into the accumulator of `group_ids[i]`.
	fn aggregate_single_group(
		&self,
		n: usize,
		group_ids: &[GroupId],
		holder: &mut GroupByResultHolder<Self::Array>,
		columns: &[ColumnView<'_>],
	) -> Result<()>;

	/// Folds row `i` into the accumulator of every group in `group_ids[i]`.
	fn aggregate_multi_group(
		&self,
		n: usize,
		group_ids: &[Vec<GroupId>],
		holder: &mut GroupByResultHolder<Self::Array>,
		columns: &[ColumnView<'_>],
	) -> Result<()>;

	/// Fails when `source` cannot be merged into accumulators of this
	/// function, without touching any state.
	fn check_mergeable(&self, _source: &Self::Value) -> Result<()> {
		Ok(())
	}

	/// Combines two accumulators of the same group produced by different
	/// segments.
	fn merge(&self, target: &mut Self::Value, source: &Self::Value) -> Result<()>;
}
