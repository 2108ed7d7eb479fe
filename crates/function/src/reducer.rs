// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::ResultArray;
use tally_type::Result;

/// Per-value fold logic shared by the single-valued and multi-valued form of
/// an aggregation.
///
/// `fold` must be commutative and associative over the values of a group,
/// and `merge` with the default value must leave the accumulator unchanged.
pub trait Reducer: Send + Sync {
	type Value: Clone;

	type Array: ResultArray<Value = Self::Value>;

	fn name(&self) -> String;

	fn default_value(&self) -> Self::Value;

	/// Folds one raw input value into the accumulator.
	fn fold(&self, acc: &mut Self::Value, value: f64) -> Result<()>;

	/// Fails when `other` can never be merged into an accumulator of this
	/// reducer. Checked before any accumulator is touched.
	fn check_mergeable(&self, _other: &Self::Value) -> Result<()> {
		Ok(())
	}

	fn merge(&self, acc: &mut Self::Value, other: &Self::Value) -> Result<()>;
}
