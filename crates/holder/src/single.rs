// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Accumulator of an aggregation without group-by.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResultHolder<V: Clone> {
	value: V,
	default: V,
}

impl<V: Clone> AggregationResultHolder<V> {
	pub fn new(default: V) -> Self {
		Self {
			value: default.clone(),
			default,
		}
	}

	pub fn get(&self) -> V {
		self.value.clone()
	}

	pub fn value(&self) -> &V {
		&self.value
	}

	pub fn value_mut(&mut self) -> &mut V {
		&mut self.value
	}

	pub fn set(&mut self, value: V) {
		self.value = value;
	}

	pub fn default_value(&self) -> &V {
		&self.default
	}

	/// Puts the accumulator back to its default.
	pub fn reset(&mut self) {
		self.value = self.default.clone();
	}
}
