// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod avg;
mod count;
mod max;
mod min;
mod percentile;
mod sum;

pub use avg::{Avg, AvgFunction, AvgMultiValued};
pub use count::{Count, CountFunction, CountMultiValued};
pub use max::{Max, MaxFunction, MaxMultiValued};
pub use min::{Min, MinFunction, MinMultiValued};
pub use percentile::{
	PercentileEst, PercentileEstFunction, PercentileEstMultiValued, SUPPORTED_PERCENTILES,
};
pub use sum::{Sum, SumFunction, SumMultiValued};
