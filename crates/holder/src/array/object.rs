// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_type::Result;

use super::{ResultArray, check_copy, check_grow, check_index};

/// Result array of opaque accumulator objects, created lazily per slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectResultArray<T: Clone> {
	data: Vec<Option<T>>,
	default: Option<T>,
}

impl<T: Clone> ObjectResultArray<T> {
	/// Mutable access to a slot without cloning its object.
	#[inline]
	pub fn get_mut(&mut self, index: usize) -> Result<&mut Option<T>> {
		check_index(index, self.data.len())?;
		Ok(&mut self.data[index])
	}

	/// The object of `index`, created with `create` if the slot is empty.
	#[inline]
	pub fn get_or_insert_with<F>(&mut self, index: usize, create: F) -> Result<&mut T>
	where
		F: FnOnce() -> T,
	{
		Ok(self.get_mut(index)?.get_or_insert_with(create))
	}

	/// Borrowed read of a slot.
	pub fn get_ref(&self, index: usize) -> Result<Option<&T>> {
		check_index(index, self.data.len())?;
		Ok(self.data[index].as_ref())
	}
}

impl<T: Clone> ResultArray for ObjectResultArray<T> {
	type Value = Option<T>;

	fn new(capacity: usize, default: Option<T>) -> Self {
		Self {
			data: vec![default.clone(); capacity],
			default,
		}
	}

	fn size(&self) -> usize {
		self.data.len()
	}

	fn default_value(&self) -> &Option<T> {
		&self.default
	}

	fn get(&self, index: usize) -> Result<Option<T>> {
		check_index(index, self.data.len())?;
		Ok(self.data[index].clone())
	}

	fn set(&mut self, index: usize, value: Option<T>) -> Result<()> {
		check_index(index, self.data.len())?;
		self.data[index] = value;
		Ok(())
	}

	fn fill(&mut self, value: Option<T>) {
		self.data.fill(value);
	}

	fn grow(&mut self, new_size: usize) -> Result<()> {
		check_grow(new_size, self.data.len())?;
		self.data.resize(new_size, self.default.clone());
		Ok(())
	}

	fn copy_range(
		&mut self,
		dst_index: usize,
		source: &[Option<T>],
		src_start: usize,
		src_end: usize,
	) -> Result<()> {
		check_copy(dst_index, source.len(), src_start, src_end, self.data.len())?;
		let len = src_end - src_start;
		self.data[dst_index..dst_index + len].clone_from_slice(&source[src_start..src_end]);
		Ok(())
	}

	/// Mutates the slot in place. Callers that need the slot untouched on
	/// failure must check before mutating.
	fn update<F>(&mut self, index: usize, f: F) -> Result<()>
	where
		F: FnOnce(&mut Option<T>) -> Result<()>,
	{
		f(self.get_mut(index)?)
	}
}
