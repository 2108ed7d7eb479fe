// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::DoubleResultArray;
use tally_type::Result;

use crate::{MultiValued, Reducer, SingleValued};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Min;

impl Min {
	pub const DEFAULT: f64 = f64::INFINITY;
}

impl Reducer for Min {
	type Value = f64;
	type Array = DoubleResultArray;

	fn name(&self) -> String {
		"min".to_string()
	}

	fn default_value(&self) -> f64 {
		Self::DEFAULT
	}

	#[inline]
	fn fold(&self, acc: &mut f64, value: f64) -> Result<()> {
		*acc = acc.min(value);
		Ok(())
	}

	fn merge(&self, acc: &mut f64, other: &f64) -> Result<()> {
		*acc = acc.min(*other);
		Ok(())
	}
}

pub type MinFunction = SingleValued<Min>;
pub type MinMultiValued = MultiValued<Min>;
