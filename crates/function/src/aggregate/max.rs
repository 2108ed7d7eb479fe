// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_holder::DoubleResultArray;
use tally_type::Result;

use crate::{MultiValued, Reducer, SingleValued};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Max;

impl Max {
	pub const DEFAULT: f64 = f64::NEG_INFINITY;
}

impl Reducer for Max {
	type Value = f64;
	type Array = DoubleResultArray;

	fn name(&self) -> String {
		"max".to_string()
	}

	fn default_value(&self) -> f64 {
		Self::DEFAULT
	}

	#[inline]
	fn fold(&self, acc: &mut f64, value: f64) -> Result<()> {
		*acc = acc.max(value);
		Ok(())
	}

	fn merge(&self, acc: &mut f64, other: &f64) -> Result<()> {
		*acc = acc.max(*other);
		Ok(())
	}
}

pub type MaxFunction = SingleValued<Max>;
pub type MaxMultiValued = MultiValued<Max>;
