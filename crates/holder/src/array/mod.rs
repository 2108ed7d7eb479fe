// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_type::{Error, Result, invalid_argument};

mod double_long;
mod object;
mod scalar;
mod typed;

pub use double_long::DoubleLongResultArray;
pub use object::ObjectResultArray;
pub use scalar::{DoubleResultArray, LongResultArray, Scalar, ScalarResultArray};
pub use typed::TypedResultArray;

/// Fixed-size sequence of accumulator slots, one per group id.
///
/// Accessors never grow the array; callers grow first.
pub trait ResultArray {
	type Value: Clone;

	/// Creates an array of `capacity` slots, each seeded with `default`.
	fn new(capacity: usize, default: Self::Value) -> Self
	where
		Self: Sized;

	fn size(&self) -> usize;

	/// The value new slots are filled with.
	fn default_value(&self) -> &Self::Value;

	fn get(&self, index: usize) -> Result<Self::Value>;

	fn set(&mut self, index: usize, value: Self::Value) -> Result<()>;

	/// Overwrites every slot with `value`. The default used by `grow` is
	/// unchanged.
	fn fill(&mut self, value: Self::Value);

	/// Grows to `new_size` slots, keeping existing slots and seeding the new
	/// ones with the default. Fails unless `new_size > size()`.
	fn grow(&mut self, new_size: usize) -> Result<()>;

	/// Copies `source[src_start..src_end]` into the slots starting at
	/// `dst_index`.
	fn copy_range(&mut self, dst_index: usize, source: &[Self::Value], src_start: usize, src_end: usize)
	-> Result<()>;

	/// Read-modify-write of one slot. The slot keeps its old value when `f`
	/// fails.
	fn update<F>(&mut self, index: usize, f: F) -> Result<()>
	where
		F: FnOnce(&mut Self::Value) -> Result<()>,
	{
		let mut value = self.get(index)?;
		f(&mut value)?;
		self.set(index, value)
	}
}

#[inline]
pub(crate) fn check_index(index: usize, size: usize) -> Result<()> {
	if index >= size {
		return Err(Error::IndexOutOfBounds {
			index,
			size,
		});
	}
	Ok(())
}

pub(crate) fn check_grow(new_size: usize, size: usize) -> Result<()> {
	if new_size <= size {
		invalid_argument!("new size {} must exceed current size {}", new_size, size);
	}
	Ok(())
}

pub(crate) fn check_copy(
	dst_index: usize,
	source_len: usize,
	src_start: usize,
	src_end: usize,
	size: usize,
) -> Result<()> {
	if src_start > src_end || src_end > source_len {
		invalid_argument!("source range {}..{} is invalid for {} elements", src_start, src_end, source_len);
	}
	if dst_index > size || size - dst_index < src_end - src_start {
		invalid_argument!(
			"cannot copy {} elements to index {} of an array of size {}",
			src_end - src_start,
			dst_index,
			size
		);
	}
	Ok(())
}
