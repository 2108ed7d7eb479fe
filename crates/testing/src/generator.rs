// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Seeded random blocks for aggregation tests.
//!
//! Values are integral so that sums stay exact regardless of fold order.

use rand::{Rng, SeedableRng, rngs::StdRng};
use tally_type::{Block, ColumnView, GroupId, GroupKeys};

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
	/// Rows per block.
	pub rows: usize,
	/// Group ids are drawn from `0..groups`.
	pub groups: GroupId,
	/// Upper bound on the length of a multi-valued row or group list.
	pub max_list_len: usize,
	/// Values are drawn from `-value_bound..value_bound`.
	pub value_bound: i64,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			rows: 256,
			groups: 32,
			max_list_len: 4,
			value_bound: 10_000,
		}
	}
}

/// Owned column data of one generated block. The block views borrow from it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedBlock {
	pub values: Vec<f64>,
	pub rows: Vec<Vec<f64>>,
	pub group_ids: Vec<GroupId>,
	pub group_lists: Vec<Vec<GroupId>>,
}

impl GeneratedBlock {
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn single(&self) -> Block<'_> {
		Block::new(self.len(), vec![ColumnView::Single(&self.values)])
	}

	pub fn multi(&self) -> Block<'_> {
		Block::new(self.len(), vec![ColumnView::Multi(&self.rows)])
	}

	pub fn single_grouped(&self) -> Block<'_> {
		Block::grouped(self.len(), vec![ColumnView::Single(&self.values)], GroupKeys::Single(&self.group_ids))
	}

	pub fn multi_grouped(&self) -> Block<'_> {
		Block::grouped(self.len(), vec![ColumnView::Multi(&self.rows)], GroupKeys::Single(&self.group_ids))
	}

	/// Single-valued column with a list of groups per row.
	pub fn fan_out(&self) -> Block<'_> {
		Block::grouped(self.len(), vec![ColumnView::Single(&self.values)], GroupKeys::Multi(&self.group_lists))
	}
}

pub struct BlockGenerator {
	rng: StdRng,
	config: GeneratorConfig,
}

impl BlockGenerator {
	pub fn new(seed: u64) -> Self {
		Self::with_config(seed, GeneratorConfig::default())
	}

	pub fn with_config(seed: u64, config: GeneratorConfig) -> Self {
		Self {
			rng: StdRng::seed_from_u64(seed),
			config,
		}
	}

	pub fn value(&mut self) -> f64 {
		let bound = self.config.value_bound;
		self.rng.random_range(-bound..bound) as f64
	}

	pub fn group_id(&mut self) -> GroupId {
		self.rng.random_range(0..self.config.groups)
	}

	pub fn block(&mut self) -> GeneratedBlock {
		let rows = self.config.rows;
		let mut block = GeneratedBlock {
			values: Vec::with_capacity(rows),
			rows: Vec::with_capacity(rows),
			group_ids: Vec::with_capacity(rows),
			group_lists: Vec::with_capacity(rows),
		};

		for _ in 0..rows {
			block.values.push(self.value());
			block.group_ids.push(self.group_id());

			let len = self.rng.random_range(0..=self.config.max_list_len);
			let row = (0..len).map(|_| self.value()).collect();
			block.rows.push(row);

			let len = self.rng.random_range(0..=self.config.max_list_len);
			let groups = (0..len).map(|_| self.group_id()).collect();
			block.group_lists.push(groups);
		}
		block
	}

	pub fn blocks(&mut self, count: usize) -> Vec<GeneratedBlock> {
		(0..count).map(|_| self.block()).collect()
	}
}
