// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Storage for running aggregate state.
//!
//! A [`ResultArray`] keeps one accumulator slot per dense group id and only
//! grows on request. [`GroupByResultHolder`] owns such an array, allocates it
//! lazily and grows it geometrically as larger group ids show up, while
//! [`AggregationResultHolder`] keeps the single accumulator of an ungrouped
//! query.

pub mod array;
mod group_by;
mod single;

pub use array::{
	DoubleLongResultArray, DoubleResultArray, LongResultArray, ObjectResultArray, ResultArray, ScalarResultArray,
	TypedResultArray,
};
pub use group_by::GroupByResultHolder;
pub use single::AggregationResultHolder;
