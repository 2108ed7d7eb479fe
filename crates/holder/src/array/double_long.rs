// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_type::Result;

use super::{ResultArray, check_copy, check_grow, check_index};

/// Result array of `(f64, i64)` pairs, such as the running `(sum, count)` of
/// an average. Both halves live in parallel vectors; reads return the pair by
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleLongResultArray {
	doubles: Vec<f64>,
	longs: Vec<i64>,
	default: (f64, i64),
}

impl DoubleLongResultArray {
	pub fn doubles(&self) -> &[f64] {
		&self.doubles
	}

	pub fn longs(&self) -> &[i64] {
		&self.longs
	}
}

impl ResultArray for DoubleLongResultArray {
	type Value = (f64, i64);

	fn new(capacity: usize, default: (f64, i64)) -> Self {
		Self {
			doubles: vec![default.0; capacity],
			longs: vec![default.1; capacity],
			default,
		}
	}

	fn size(&self) -> usize {
		self.doubles.len()
	}

	fn default_value(&self) -> &(f64, i64) {
		&self.default
	}

	#[inline]
	fn get(&self, index: usize) -> Result<(f64, i64)> {
		check_index(index, self.doubles.len())?;
		Ok((self.doubles[index], self.longs[index]))
	}

	#[inline]
	fn set(&mut self, index: usize, value: (f64, i64)) -> Result<()> {
		check_index(index, self.doubles.len())?;
		self.doubles[index] = value.0;
		self.longs[index] = value.1;
		Ok(())
	}

	fn fill(&mut self, value: (f64, i64)) {
		self.doubles.fill(value.0);
		self.longs.fill(value.1);
	}

	fn grow(&mut self, new_size: usize) -> Result<()> {
		check_grow(new_size, self.doubles.len())?;
		self.doubles.resize(new_size, self.default.0);
		self.longs.resize(new_size, self.default.1);
		Ok(())
	}

	fn copy_range(
		&mut self,
		dst_index: usize,
		source: &[(f64, i64)],
		src_start: usize,
		src_end: usize,
	) -> Result<()> {
		debug_assert_eq!(self.doubles.len(), self.longs.len());
		check_copy(dst_index, source.len(), src_start, src_end, self.doubles.len())?;

		for (offset, &(double, long)) in source[src_start..src_end].iter().enumerate() {
			self.doubles[dst_index + offset] = double;
			self.longs[dst_index + offset] = long;
		}
		Ok(())
	}
}
