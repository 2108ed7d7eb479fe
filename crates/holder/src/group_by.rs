// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_type::{Error, GroupId, HolderConfig, Result, invalid_argument};
use tracing::{debug, trace};

use crate::array::{ObjectResultArray, ResultArray};

/// Per-group accumulator storage for one segment scan.
///
/// The backing array is allocated on first access and grows geometrically,
/// so a stream of increasing group ids costs amortised O(1) per write.
#[derive(Debug, Clone)]
pub struct GroupByResultHolder<A: ResultArray> {
	array: Option<A>,
	default: A::Value,
	config: HolderConfig,
	grow_count: usize,
}

impl<A: ResultArray> GroupByResultHolder<A> {
	pub fn new(default: A::Value, config: HolderConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self {
			array: None,
			default,
			config,
			grow_count: 0,
		})
	}

	/// Number of allocated slots.
	pub fn capacity(&self) -> usize {
		self.array.as_ref().map_or(0, |array| array.size())
	}

	/// How many times the backing array has been grown.
	pub fn grow_count(&self) -> usize {
		self.grow_count
	}

	pub fn default_value(&self) -> &A::Value {
		&self.default
	}

	pub fn array(&self) -> Option<&A> {
		self.array.as_ref()
	}

	/// Reads the accumulator of `group_id`, growing first when the id lies
	/// beyond the current capacity.
	pub fn get(&mut self, group_id: GroupId) -> Result<A::Value> {
		self.ensure_capacity(group_id)?.get(group_id as usize)
	}

	/// Reads the accumulator of `group_id` without growing; ids beyond the
	/// capacity read as the default.
	pub fn value(&self, group_id: GroupId) -> A::Value {
		self.array
			.as_ref()
			.and_then(|array| array.get(group_id as usize).ok())
			.unwrap_or_else(|| self.default.clone())
	}

	pub fn set(&mut self, group_id: GroupId, value: A::Value) -> Result<()> {
		self.ensure_capacity(group_id)?.set(group_id as usize, value)
	}

	pub fn update<F>(&mut self, group_id: GroupId, f: F) -> Result<()>
	where
		F: FnOnce(&mut A::Value) -> Result<()>,
	{
		self.ensure_capacity(group_id)?.update(group_id as usize, f)
	}

	/// Makes sure `group_id` has a slot and returns the backing array.
	pub fn ensure_capacity(&mut self, group_id: GroupId) -> Result<&mut A> {
		let needed = group_id as usize + 1;
		let current = self.capacity();

		if needed > current {
			let capacity = self.next_capacity(current, needed)?;
			match self.array.as_mut() {
				Some(array) => {
					array.grow(capacity)?;
					self.grow_count += 1;
					debug!(from = current, to = capacity, "grew group-by result holder");
				}
				None => {
					self.array = Some(A::new(capacity, self.default.clone()));
					trace!(capacity, "allocated group-by result holder");
				}
			}
		}

		self.array.as_mut().ok_or(Error::IndexOutOfBounds {
			index: group_id as usize,
			size: 0,
		})
	}

	fn next_capacity(&self, current: usize, needed: usize) -> Result<usize> {
		let grown = needed.max(self.config.initial_capacity).max(current.saturating_mul(self.config.growth_factor));
		let mut capacity = grown.checked_next_power_of_two().unwrap_or(grown);

		if let Some(max) = self.config.max_capacity {
			if needed > max {
				invalid_argument!("group id {} exceeds the max capacity of {} groups", needed - 1, max);
			}
			capacity = capacity.min(max);
		}
		Ok(capacity)
	}
}

impl<T: Clone> GroupByResultHolder<ObjectResultArray<T>> {
	/// In-place access to the object of `group_id`, created with `create`
	/// on first use.
	pub fn get_or_insert_with<F>(&mut self, group_id: GroupId, create: F) -> Result<&mut T>
	where
		F: FnOnce() -> T,
	{
		self.ensure_capacity(group_id)?.get_or_insert_with(group_id as usize, create)
	}
}
