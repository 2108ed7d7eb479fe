// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::Debug;

use tally_type::Result;

use super::{ResultArray, check_copy, check_grow, check_index};

/// Element types a [`ScalarResultArray`] can hold.
pub trait Scalar: Copy + PartialEq + Debug + Send + Sync + 'static {}

impl Scalar for f64 {}

impl Scalar for i64 {}

/// Result array of plain numeric slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarResultArray<T: Scalar> {
	data: Vec<T>,
	default: T,
}

pub type DoubleResultArray = ScalarResultArray<f64>;
pub type LongResultArray = ScalarResultArray<i64>;

impl<T: Scalar> ScalarResultArray<T> {
	pub fn as_slice(&self) -> &[T] {
		&self.data
	}
}

impl<T: Scalar> ResultArray for ScalarResultArray<T> {
	type Value = T;

	fn new(capacity: usize, default: T) -> Self {
		Self {
			data: vec![default; capacity],
			default,
		}
	}

	fn size(&self) -> usize {
		self.data.len()
	}

	fn default_value(&self) -> &T {
		&self.default
	}

	#[inline]
	fn get(&self, index: usize) -> Result<T> {
		check_index(index, self.data.len())?;
		Ok(self.data[index])
	}

	#[inline]
	fn set(&mut self, index: usize, value: T) -> Result<()> {
		check_index(index, self.data.len())?;
		self.data[index] = value;
		Ok(())
	}

	fn fill(&mut self, value: T) {
		self.data.fill(value);
	}

	fn grow(&mut self, new_size: usize) -> Result<()> {
		check_grow(new_size, self.data.len())?;
		self.data.resize(new_size, self.default);
		Ok(())
	}

	fn copy_range(&mut self, dst_index: usize, source: &[T], src_start: usize, src_end: usize) -> Result<()> {
		check_copy(dst_index, source.len(), src_start, src_end, self.data.len())?;
		let len = src_end - src_start;
		self.data[dst_index..dst_index + len].copy_from_slice(&source[src_start..src_end]);
		Ok(())
	}

	#[inline]
	fn update<F>(&mut self, index: usize, f: F) -> Result<()>
	where
		F: FnOnce(&mut T) -> Result<()>,
	{
		check_index(index, self.data.len())?;
		let mut value = self.data[index];
		f(&mut value)?;
		self.data[index] = value;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use tally_type::Error;

	use super::*;

	#[test]
	fn test_new_seeds_default() {
		let array = DoubleResultArray::new(4, f64::INFINITY);
		assert_eq!(array.size(), 4);
		assert_eq!(array.as_slice(), &[f64::INFINITY; 4]);
		assert_eq!(*array.default_value(), f64::INFINITY);
	}

	#[test]
	fn test_get_set() {
		let mut array = LongResultArray::new(3, 0);
		array.set(1, 42).unwrap();
		assert_eq!(array.get(1).unwrap(), 42);
		assert_eq!(array.get(0).unwrap(), 0);
	}

	#[test]
	fn test_fill() {
		let mut array = DoubleResultArray::new(3, f64::INFINITY);
		array.set(0, 1.0).unwrap();
		array.fill(f64::NEG_INFINITY);
		assert_eq!(array.as_slice(), &[f64::NEG_INFINITY; 3]);
		assert_eq!(*array.default_value(), f64::INFINITY);
	}

	#[test]
	fn test_out_of_bounds() {
		let mut array = LongResultArray::new(3, 0);
		assert_eq!(
			array.get(3),
			Err(Error::IndexOutOfBounds {
				index: 3,
				size: 3,
			})
		);
		assert_eq!(
			array.set(7, 1),
			Err(Error::IndexOutOfBounds {
				index: 7,
				size: 3,
			})
		);
	}

	#[test]
	fn test_grow_preserves_content() {
		let mut array = DoubleResultArray::new(3, f64::INFINITY);
		for i in 0..3 {
			array.set(i, i as f64 * 1.5).unwrap();
		}

		array.grow(8).unwrap();
		assert_eq!(array.size(), 8);
		for i in 0..3 {
			assert_eq!(array.get(i).unwrap(), i as f64 * 1.5);
		}
		for i in 3..8 {
			assert_eq!(array.get(i).unwrap(), f64::INFINITY);
		}
	}

	#[test]
	fn test_grow_must_increase() {
		let mut array = DoubleResultArray::new(4, 0.0);
		assert!(matches!(array.grow(4), Err(Error::InvalidArgument(_))));
		assert!(matches!(array.grow(2), Err(Error::InvalidArgument(_))));
		assert_eq!(array.size(), 4);
	}

	#[test]
	fn test_copy_range() {
		let mut array = LongResultArray::new(5, -1);
		array.copy_range(1, &[10, 20, 30, 40], 1, 4).unwrap();
		assert_eq!(array.as_slice(), &[-1, 20, 30, 40, -1]);

		assert!(matches!(array.copy_range(3, &[1, 2, 3], 0, 3), Err(Error::InvalidArgument(_))));
		assert_eq!(array.as_slice(), &[-1, 20, 30, 40, -1]);
	}

	#[test]
	fn test_update_keeps_value_on_error() {
		let mut array = LongResultArray::new(2, 5);
		array.update(0, |v| {
			*v += 1;
			Ok(())
		})
		.unwrap();
		assert_eq!(array.get(0).unwrap(), 6);

		let result = array.update(1, |v| {
			*v = 100;
			Err(Error::Cancelled)
		});
		assert_eq!(result, Err(Error::Cancelled));
		assert_eq!(array.get(1).unwrap(), 5);
	}
}
