// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tally_digest::QuantileDigest;
use tally_holder::ObjectResultArray;
use tally_type::{
	DigestConfig, Error, Result,
	config::{DEFAULT_MAX_ERROR, validate_max_error},
};

use crate::{MultiValued, Reducer, SingleValued};

pub const SUPPORTED_PERCENTILES: [u32; 4] = [50, 90, 95, 99];

/// Estimated percentile backed by a [`QuantileDigest`] per group.
///
/// Inputs are truncated toward zero before insertion. A group's digest is
/// created on the first value folded into it.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileEst {
	percentile: u32,
	max_error: f64,
}

impl PercentileEst {
	pub fn new(percentile: u32) -> Result<Self> {
		Self::with_max_error(percentile, DEFAULT_MAX_ERROR)
	}

	pub fn with_max_error(percentile: u32, max_error: f64) -> Result<Self> {
		if !SUPPORTED_PERCENTILES.contains(&percentile) {
			return Err(Error::UnsupportedPercentile(percentile));
		}
		validate_max_error(max_error)?;
		Ok(Self {
			percentile,
			max_error,
		})
	}

	pub fn with_config(percentile: u32, config: &DigestConfig) -> Result<Self> {
		Self::with_max_error(percentile, config.max_error)
	}

	pub fn percentile(&self) -> u32 {
		self.percentile
	}

	pub fn max_error(&self) -> f64 {
		self.max_error
	}

	/// Estimated percentile of a finished accumulator, `None` when no value
	/// was folded.
	pub fn finish(&self, acc: &Option<QuantileDigest>) -> Result<Option<i64>> {
		match acc {
			Some(digest) => digest.estimate_quantile(self.percentile as f64 / 100.0),
			None => Ok(None),
		}
	}
}

impl Reducer for PercentileEst {
	type Value = Option<QuantileDigest>;
	type Array = ObjectResultArray<QuantileDigest>;

	fn name(&self) -> String {
		format!("percentileest{}", self.percentile)
	}

	fn default_value(&self) -> Option<QuantileDigest> {
		None
	}

	#[inline]
	fn fold(&self, acc: &mut Option<QuantileDigest>, value: f64) -> Result<()> {
		if acc.is_none() {
			*acc = Some(QuantileDigest::new(self.max_error)?);
		}
		match acc {
			Some(digest) => digest.insert(value as i64),
			None => Ok(()),
		}
	}

	fn check_mergeable(&self, other: &Option<QuantileDigest>) -> Result<()> {
		match other {
			Some(digest) if digest.max_error() != self.max_error => Err(Error::IncompatibleDigest {
				left: self.max_error,
				right: digest.max_error(),
			}),
			_ => Ok(()),
		}
	}

	fn merge(&self, acc: &mut Option<QuantileDigest>, other: &Option<QuantileDigest>) -> Result<()> {
		self.check_mergeable(other)?;
		let Some(other) = other else {
			return Ok(());
		};
		match acc {
			Some(digest) => digest.merge_from(other),
			None => {
				*acc = Some(other.clone());
				Ok(())
			}
		}
	}
}

pub type PercentileEstFunction = SingleValued<PercentileEst>;
pub type PercentileEstMultiValued = MultiValued<PercentileEst>;
