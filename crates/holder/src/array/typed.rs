// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_type::{Error, Result, error::ResultShape};

use super::{DoubleLongResultArray, DoubleResultArray, LongResultArray, ResultArray};

/// Result array whose shape is chosen at runtime. Every accessor exists for
/// every shape; the ones not matching the shape fail with
/// `UnsupportedOperation`.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedResultArray {
	Double(DoubleResultArray),
	Long(LongResultArray),
	DoubleLong(DoubleLongResultArray),
}

impl TypedResultArray {
	/// Zero-seeded array of the given shape. Object arrays have no runtime
	/// variant.
	pub fn with_shape(shape: ResultShape, capacity: usize) -> Result<Self> {
		match shape {
			ResultShape::Double => Ok(Self::double(capacity, 0.0)),
			ResultShape::Long => Ok(Self::long(capacity, 0)),
			ResultShape::DoubleLong => Ok(Self::double_long(capacity, (0.0, 0))),
			ResultShape::Object => Err(Error::UnsupportedOperation {
				operation: "with_shape",
				shape,
			}),
		}
	}

	pub fn double(capacity: usize, default: f64) -> Self {
		TypedResultArray::Double(DoubleResultArray::new(capacity, default))
	}

	pub fn long(capacity: usize, default: i64) -> Self {
		TypedResultArray::Long(LongResultArray::new(capacity, default))
	}

	pub fn double_long(capacity: usize, default: (f64, i64)) -> Self {
		TypedResultArray::DoubleLong(DoubleLongResultArray::new(capacity, default))
	}

	pub fn shape(&self) -> ResultShape {
		match self {
			TypedResultArray::Double(_) => ResultShape::Double,
			TypedResultArray::Long(_) => ResultShape::Long,
			TypedResultArray::DoubleLong(_) => ResultShape::DoubleLong,
		}
	}

	pub fn size(&self) -> usize {
		match self {
			TypedResultArray::Double(array) => array.size(),
			TypedResultArray::Long(array) => array.size(),
			TypedResultArray::DoubleLong(array) => array.size(),
		}
	}

	pub fn grow(&mut self, new_size: usize) -> Result<()> {
		match self {
			TypedResultArray::Double(array) => array.grow(new_size),
			TypedResultArray::Long(array) => array.grow(new_size),
			TypedResultArray::DoubleLong(array) => array.grow(new_size),
		}
	}

	pub fn fill_double(&mut self, value: f64) -> Result<()> {
		match self {
			TypedResultArray::Double(array) => {
				array.fill(value);
				Ok(())
			}
			_ => Err(self.unsupported("fill_double")),
		}
	}

	pub fn get_double(&self, index: usize) -> Result<f64> {
		match self {
			TypedResultArray::Double(array) => array.get(index),
			_ => Err(self.unsupported("get_double")),
		}
	}

	pub fn set_double(&mut self, index: usize, value: f64) -> Result<()> {
		match self {
			TypedResultArray::Double(array) => array.set(index, value),
			_ => Err(self.unsupported("set_double")),
		}
	}

	pub fn copy_doubles(&mut self, dst_index: usize, source: &[f64], src_start: usize, src_end: usize) -> Result<()> {
		match self {
			TypedResultArray::Double(array) => array.copy_range(dst_index, source, src_start, src_end),
			_ => Err(self.unsupported("copy_doubles")),
		}
	}

	pub fn fill_long(&mut self, value: i64) -> Result<()> {
		match self {
			TypedResultArray::Long(array) => {
				array.fill(value);
				Ok(())
			}
			_ => Err(self.unsupported("fill_long")),
		}
	}

	pub fn get_long(&self, index: usize) -> Result<i64> {
		match self {
			TypedResultArray::Long(array) => array.get(index),
			_ => Err(self.unsupported("get_long")),
		}
	}

	pub fn set_long(&mut self, index: usize, value: i64) -> Result<()> {
		match self {
			TypedResultArray::Long(array) => array.set(index, value),
			_ => Err(self.unsupported("set_long")),
		}
	}

	pub fn copy_longs(&mut self, dst_index: usize, source: &[i64], src_start: usize, src_end: usize) -> Result<()> {
		match self {
			TypedResultArray::Long(array) => array.copy_range(dst_index, source, src_start, src_end),
			_ => Err(self.unsupported("copy_longs")),
		}
	}

	/// Overwrites both halves of every slot.
	pub fn fill_pair(&mut self, value: (f64, i64)) -> Result<()> {
		match self {
			TypedResultArray::DoubleLong(array) => {
				array.fill(value);
				Ok(())
			}
			_ => Err(self.unsupported("fill_pair")),
		}
	}

	pub fn get_pair(&self, index: usize) -> Result<(f64, i64)> {
		match self {
			TypedResultArray::DoubleLong(array) => array.get(index),
			_ => Err(self.unsupported("get_pair")),
		}
	}

	pub fn set_pair(&mut self, index: usize, value: (f64, i64)) -> Result<()> {
		match self {
			TypedResultArray::DoubleLong(array) => array.set(index, value),
			_ => Err(self.unsupported("set_pair")),
		}
	}

	pub fn copy_pairs(
		&mut self,
		dst_index: usize,
		source: &[(f64, i64)],
		src_start: usize,
		src_end: usize,
	) -> Result<()> {
		match self {
			TypedResultArray::DoubleLong(array) => array.copy_range(dst_index, source, src_start, src_end),
			_ => Err(self.unsupported("copy_pairs")),
		}
	}

	fn unsupported(&self, operation: &'static str) -> Error {
		Error::UnsupportedOperation {
			operation,
			shape: self.shape(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_double_rejects_pair_operations() {
		let mut array = TypedResultArray::double(4, f64::INFINITY);
		array.set_double(0, 1.0).unwrap();
		assert_eq!(array.get_double(0).unwrap(), 1.0);

		assert_eq!(
			array.set_pair(0, (1.0, 1)),
			Err(Error::UnsupportedOperation {
				operation: "set_pair",
				shape: ResultShape::Double,
			})
		);
		assert_eq!(
			array.copy_pairs(0, &[(1.0, 1)], 0, 1),
			Err(Error::UnsupportedOperation {
				operation: "copy_pairs",
				shape: ResultShape::Double,
			})
		);
		assert!(matches!(array.get_long(0), Err(Error::UnsupportedOperation { .. })));
	}

	#[test]
	fn test_pair_rejects_scalar_operations() {
		let mut array = TypedResultArray::double_long(2, (0.0, 0));
		array.set_pair(1, (3.5, 2)).unwrap();
		assert_eq!(array.get_pair(1).unwrap(), (3.5, 2));

		assert_eq!(
			array.set_double(0, 1.0),
			Err(Error::UnsupportedOperation {
				operation: "set_double",
				shape: ResultShape::DoubleLong,
			})
		);
		assert_eq!(
			array.copy_doubles(0, &[1.0], 0, 1),
			Err(Error::UnsupportedOperation {
				operation: "copy_doubles",
				shape: ResultShape::DoubleLong,
			})
		);
		assert!(matches!(array.set_long(0, 1), Err(Error::UnsupportedOperation { .. })));
	}

	#[test]
	fn test_fill_matches_shape() {
		let mut array = TypedResultArray::double_long(2, (0.0, 0));
		array.fill_pair((2.5, 4)).unwrap();
		assert_eq!(array.get_pair(0).unwrap(), (2.5, 4));
		assert_eq!(array.get_pair(1).unwrap(), (2.5, 4));
		assert_eq!(
			array.fill_double(1.0),
			Err(Error::UnsupportedOperation {
				operation: "fill_double",
				shape: ResultShape::DoubleLong,
			})
		);

		let mut longs = TypedResultArray::long(2, 0);
		longs.fill_long(-3).unwrap();
		assert_eq!(longs.get_long(1).unwrap(), -3);
		assert!(matches!(longs.fill_pair((0.0, 0)), Err(Error::UnsupportedOperation { .. })));
	}

	#[test]
	fn test_with_shape() {
		let array = TypedResultArray::with_shape(ResultShape::DoubleLong, 3).unwrap();
		assert_eq!(array.shape(), ResultShape::DoubleLong);
		assert_eq!(array.get_pair(2).unwrap(), (0.0, 0));

		assert_eq!(
			TypedResultArray::with_shape(ResultShape::Object, 3),
			Err(Error::UnsupportedOperation {
				operation: "with_shape",
				shape: ResultShape::Object,
			})
		);
	}

	#[test]
	fn test_long_shape() {
		let mut array = TypedResultArray::long(1, 0);
		assert_eq!(array.shape(), ResultShape::Long);

		array.grow(3).unwrap();
		array.copy_longs(0, &[4, 5, 6], 0, 3).unwrap();
		assert_eq!(array.size(), 3);
		assert_eq!(array.get_long(2).unwrap(), 6);
		assert!(matches!(array.get_pair(0), Err(Error::UnsupportedOperation { .. })));
	}
}
