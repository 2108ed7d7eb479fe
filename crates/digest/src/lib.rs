// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Mergeable, error-bounded quantile digest over `i64` values.
//!
//! The digest is a binary trie over the 64-bit value domain. A node at level
//! `L` stands for the `2^L` values sharing its high `64 - L` bits, leaves sit
//! at level 0. Counts of sparse regions are periodically folded into their
//! ancestors, which bounds the number of nodes by a function of the configured
//! max error instead of the number of distinct values. A quantile estimate is
//! off by at most roughly `max_error * count()` ranks.

use serde::{Deserialize, Serialize};
use tally_type::{DigestConfig, Error, Result, config::validate_max_error, invalid_argument};
use tracing::trace;

const MAX_BITS: u8 = 64;

/// Compression kicks in once the live node count exceeds this multiple of the
/// compression factor and has doubled since the previous compression.
const MAX_SIZE_FACTOR: f64 = 1.5;

const SIGN_FLIP: u64 = 1 << 63;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct Node {
	/// Prefix of the covered range, low `level` bits cleared.
	bits: u64,
	level: u8,
	count: u64,
	left: Option<usize>,
	right: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileDigest {
	max_error: f64,
	nodes: Vec<Node>,
	free: Vec<usize>,
	root: Option<usize>,
	count: u64,
	min: i64,
	max: i64,
	/// Live node count right after the last compression.
	compressed_nodes: usize,
}

impl QuantileDigest {
	pub fn new(max_error: f64) -> Result<Self> {
		validate_max_error(max_error)?;
		Ok(Self {
			max_error,
			nodes: Vec::new(),
			free: Vec::new(),
			root: None,
			count: 0,
			min: i64::MAX,
			max: i64::MIN,
			compressed_nodes: 0,
		})
	}

	pub fn with_config(config: &DigestConfig) -> Result<Self> {
		Self::new(config.max_error)
	}

	pub fn max_error(&self) -> f64 {
		self.max_error
	}

	/// Total number of inserted values.
	pub fn count(&self) -> u64 {
		self.count
	}

	pub fn is_empty(&self) -> bool {
		self.count == 0
	}

	pub fn min(&self) -> Option<i64> {
		(!self.is_empty()).then_some(self.min)
	}

	pub fn max(&self) -> Option<i64> {
		(!self.is_empty()).then_some(self.max)
	}

	/// Number of live trie nodes.
	pub fn node_count(&self) -> usize {
		self.nodes.len() - self.free.len()
	}

	pub fn insert(&mut self, value: i64) -> Result<()> {
		self.insert_n(value, 1)
	}

	/// Inserts `value` with weight `count`. Fails without touching the digest
	/// when the total count would exceed `u64::MAX`.
	pub fn insert_n(&mut self, value: i64, count: u64) -> Result<()> {
		if count == 0 {
			return Ok(());
		}
		let total = self.checked_total(count)?;

		self.insert_node(to_bits(value), 0, count);
		self.count = total;
		self.min = self.min.min(value);
		self.max = self.max.max(value);

		if self.needs_compression() {
			self.compress();
		}
		Ok(())
	}

	/// Estimates the value at quantile `q`; `None` when the digest is empty.
	pub fn estimate_quantile(&self, q: f64) -> Result<Option<i64>> {
		Ok(self.estimate_quantiles(&[q])?.map(|values| values[0]))
	}

	/// Estimates several quantiles in a single traversal. The result is in the
	/// order of `quantiles`; `None` when the digest is empty.
	pub fn estimate_quantiles(&self, quantiles: &[f64]) -> Result<Option<Vec<i64>>> {
		for &q in quantiles {
			if !(0.0..=1.0).contains(&q) {
				invalid_argument!("quantile must be within [0, 1], got {}", q);
			}
		}

		let Some(root) = self.root else {
			return Ok(None);
		};

		let mut order: Vec<usize> = (0..quantiles.len()).collect();
		order.sort_by(|&l, &r| quantiles[l].total_cmp(&quantiles[r]));

		let total = self.count as f64;
		let max = self.max;
		let mut result = vec![max; quantiles.len()];
		let mut next = 0;
		let mut sum = 0u64;

		// Post-order visits nodes by non-decreasing upper bound.
		self.post_order(root, &mut |node| {
			sum += node.count;
			while next < order.len() && sum as f64 > quantiles[order[next]] * total {
				result[order[next]] = from_bits(node.bits | low_mask(node.level)).min(max);
				next += 1;
			}
			next < order.len()
		});

		Ok(Some(result))
	}

	/// Returns a new digest holding the values of both digests.
	pub fn merge(&self, other: &QuantileDigest) -> Result<QuantileDigest> {
		let mut merged = self.clone();
		merged.merge_from(other)?;
		Ok(merged)
	}

	/// Folds `other` into this digest.
	pub fn merge_from(&mut self, other: &QuantileDigest) -> Result<()> {
		if self.max_error != other.max_error {
			return Err(Error::IncompatibleDigest {
				left: self.max_error,
				right: other.max_error,
			});
		}

		let total = self.checked_total(other.count)?;
		let Some(root) = other.root else {
			return Ok(());
		};

		let mut weighted = Vec::with_capacity(other.node_count());
		other.post_order(root, &mut |node| {
			if node.count > 0 {
				weighted.push((node.bits, node.level, node.count));
			}
			true
		});

		for (bits, level, count) in weighted {
			self.insert_node(bits, level, count);
		}
		self.count = total;
		self.min = self.min.min(other.min);
		self.max = self.max.max(other.max);

		if self.needs_compression() {
			self.compress();
		}
		Ok(())
	}

	/// Folds sparse subtrees into their parents until no further fold applies.
	/// Compressing an already compressed digest leaves it unchanged.
	pub fn compress(&mut self) {
		let before = self.node_count();
		let mut passes = 0;

		while let Some(root) = self.root {
			let bound = (self.count as f64 / self.compression_factor()).floor() as u64;
			let mut changed = self.compress_subtree(root, bound);

			if self.nodes[root].count == 0 {
				let replacement = self.try_remove(root);
				changed |= replacement != Some(root);
				self.root = replacement;
			}

			passes += 1;
			if !changed {
				break;
			}
		}
		self.compressed_nodes = self.node_count();

		trace!(before, after = self.node_count(), passes, "compressed quantile digest");
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		postcard::to_allocvec(self).map_err(|e| Error::Serialization(e.to_string()))
	}

	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let digest: QuantileDigest =
			postcard::from_bytes(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
		validate_max_error(digest.max_error)?;
		digest.check_structure()?;
		Ok(digest)
	}

	/// Rejects a decoded trie that inserts and merges could not have built:
	/// dangling, freed or shared node references, children outside their
	/// parent's range, unreachable nodes, or node counts not adding up to
	/// `count`.
	fn check_structure(&self) -> Result<()> {
		let len = self.nodes.len();
		let mut seen = vec![false; len];

		for &idx in &self.free {
			if idx >= len || seen[idx] {
				return Err(corrupt(format!("invalid free slot {idx}")));
			}
			seen[idx] = true;
		}

		let mut stack = Vec::new();
		if let Some(root) = self.root {
			if root >= len || seen[root] {
				return Err(corrupt(format!("invalid root {root}")));
			}
			seen[root] = true;
			stack.push(root);
		}

		let mut total = 0u64;
		let mut reachable = 0usize;
		while let Some(idx) = stack.pop() {
			let node = self.nodes[idx];
			if node.level > MAX_BITS || node.bits != prefix(node.bits, node.level) {
				return Err(corrupt(format!("malformed node {idx}")));
			}
			total = total.checked_add(node.count).ok_or_else(|| corrupt("node counts overflow".to_string()))?;
			reachable += 1;

			for (child, right) in [(node.left, false), (node.right, true)] {
				let Some(child) = child else {
					continue;
				};
				if child >= len || seen[child] {
					return Err(corrupt(format!("node {idx} has an invalid child {child}")));
				}
				let inner = self.nodes[child];
				if inner.level >= node.level
					|| !contains(node.bits, node.level, inner.bits)
					|| branch(inner.bits, node.level) != right
				{
					return Err(corrupt(format!("node {child} lies outside its parent {idx}")));
				}
				seen[child] = true;
				stack.push(child);
			}
		}

		if reachable + self.free.len() != len {
			return Err(corrupt(format!("{} unreachable nodes", len - reachable - self.free.len())));
		}
		if total != self.count {
			return Err(corrupt(format!("node counts sum to {total}, expected {}", self.count)));
		}
		if self.count > 0 && self.min > self.max {
			return Err(corrupt(format!("min {} exceeds max {}", self.min, self.max)));
		}
		Ok(())
	}

	fn checked_total(&self, count: u64) -> Result<u64> {
		match self.count.checked_add(count) {
			Some(total) => Ok(total),
			None => invalid_argument!("digest count overflows u64: {} + {}", self.count, count),
		}
	}

	fn compression_factor(&self) -> f64 {
		match self.root {
			None => 1.0,
			Some(root) => ((self.nodes[root].level as f64 + 1.0) / self.max_error).max(1.0),
		}
	}

	fn needs_compression(&self) -> bool {
		let threshold = (MAX_SIZE_FACTOR * self.compression_factor()).max(2.0 * self.compressed_nodes as f64);
		self.node_count() as f64 > threshold
	}

	/// Adds `count` to the node covering prefix `bits` at `level`, creating
	/// the node and any interior join node it needs.
	fn insert_node(&mut self, bits: u64, level: u8, count: u64) {
		let bits = prefix(bits, level);
		let mut parent: Option<(usize, bool)> = None;
		let mut current = self.root;

		while let Some(idx) = current {
			let node = self.nodes[idx];

			if node.level >= level && contains(node.bits, node.level, bits) {
				if node.level == level {
					self.nodes[idx].count += count;
					return;
				}
				let right = branch(bits, node.level);
				parent = Some((idx, right));
				current = if right {
					node.right
				} else {
					node.left
				};
				continue;
			}

			if level > node.level && contains(bits, level, node.bits) {
				let created = self.allocate(bits, level, count);
				if branch(node.bits, level) {
					self.nodes[created].right = Some(idx);
				} else {
					self.nodes[created].left = Some(idx);
				}
				self.link(parent, created);
				return;
			}

			// Disjoint ranges meet under a node at their highest differing bit.
			let split = MAX_BITS - (bits ^ node.bits).leading_zeros() as u8;
			let joint = self.allocate(prefix(bits, split), split, 0);
			let created = self.allocate(bits, level, count);
			if branch(bits, split) {
				self.nodes[joint].left = Some(idx);
				self.nodes[joint].right = Some(created);
			} else {
				self.nodes[joint].left = Some(created);
				self.nodes[joint].right = Some(idx);
			}
			self.link(parent, joint);
			return;
		}

		let created = self.allocate(bits, level, count);
		self.link(parent, created);
	}

	fn compress_subtree(&mut self, idx: usize, bound: u64) -> bool {
		let mut changed = false;

		let node = self.nodes[idx];
		if let Some(left) = node.left {
			changed |= self.compress_subtree(left, bound);
		}
		if let Some(right) = node.right {
			changed |= self.compress_subtree(right, bound);
		}

		let node = self.nodes[idx];
		if node.left.is_none() && node.right.is_none() {
			return changed;
		}

		let left_count = node.left.map_or(0, |left| self.nodes[left].count);
		let right_count = node.right.map_or(0, |right| self.nodes[right].count);
		let fold = node.count + left_count + right_count < bound;

		if let Some(left) = node.left {
			if fold || left_count == 0 {
				let replacement = self.try_remove(left);
				changed |= left_count > 0 || replacement != Some(left);
				self.nodes[idx].left = replacement;
				self.nodes[idx].count += left_count;
			}
		}

		if let Some(right) = node.right {
			if fold || right_count == 0 {
				let replacement = self.try_remove(right);
				changed |= right_count > 0 || replacement != Some(right);
				self.nodes[idx].right = replacement;
				self.nodes[idx].count += right_count;
			}
		}

		changed
	}

	/// Removes `idx` once its count has moved to the parent. A node with two
	/// children stays in place with a zero count.
	fn try_remove(&mut self, idx: usize) -> Option<usize> {
		let node = self.nodes[idx];
		match (node.left, node.right) {
			(Some(_), Some(_)) => {
				self.nodes[idx].count = 0;
				Some(idx)
			}
			(Some(child), None) | (None, Some(child)) => {
				self.release(idx);
				Some(child)
			}
			(None, None) => {
				self.release(idx);
				None
			}
		}
	}

	fn post_order(&self, idx: usize, visit: &mut impl FnMut(&Node) -> bool) -> bool {
		let node = &self.nodes[idx];
		if let Some(left) = node.left {
			if !self.post_order(left, visit) {
				return false;
			}
		}
		if let Some(right) = node.right {
			if !self.post_order(right, visit) {
				return false;
			}
		}
		visit(node)
	}

	fn allocate(&mut self, bits: u64, level: u8, count: u64) -> usize {
		let node = Node {
			bits,
			level,
			count,
			left: None,
			right: None,
		};
		match self.free.pop() {
			Some(idx) => {
				self.nodes[idx] = node;
				idx
			}
			None => {
				self.nodes.push(node);
				self.nodes.len() - 1
			}
		}
	}

	fn release(&mut self, idx: usize) {
		self.nodes[idx] = Node {
			bits: 0,
			level: 0,
			count: 0,
			left: None,
			right: None,
		};
		self.free.push(idx);
	}

	fn link(&mut self, parent: Option<(usize, bool)>, child: usize) {
		match parent {
			None => self.root = Some(child),
			Some((idx, true)) => self.nodes[idx].right = Some(child),
			Some((idx, false)) => self.nodes[idx].left = Some(child),
		}
	}
}

fn corrupt(reason: String) -> Error {
	Error::Serialization(format!("corrupt quantile digest: {reason}"))
}

/// Maps signed values onto unsigned bit patterns of the same order.
#[inline]
fn to_bits(value: i64) -> u64 {
	(value as u64) ^ SIGN_FLIP
}

#[inline]
fn from_bits(bits: u64) -> i64 {
	(bits ^ SIGN_FLIP) as i64
}

#[inline]
fn low_mask(level: u8) -> u64 {
	if level >= MAX_BITS {
		u64::MAX
	} else {
		(1u64 << level) - 1
	}
}

#[inline]
fn prefix(bits: u64, level: u8) -> u64 {
	bits & !low_mask(level)
}

#[inline]
fn contains(node_bits: u64, node_level: u8, bits: u64) -> bool {
	prefix(bits, node_level) == node_bits
}

/// Whether `bits` falls into the right child of a node at `level` (>= 1).
#[inline]
fn branch(bits: u64, level: u8) -> bool {
	(bits >> (level - 1)) & 1 == 1
}
