// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

use crate::{Result, invalid_argument};

/// Max rank error used by percentile estimators unless configured otherwise.
pub const DEFAULT_MAX_ERROR: f64 = 0.05;

/// Configuration for group-by result holders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolderConfig {
	/// Number of slots allocated on first access.
	pub initial_capacity: usize,
	/// Upper bound on the number of slots (None = unbounded).
	pub max_capacity: Option<usize>,
	/// Multiplicative factor applied to the capacity on every grow.
	pub growth_factor: usize,
}

impl Default for HolderConfig {
	fn default() -> Self {
		Self {
			initial_capacity: 16,
			max_capacity: None,
			growth_factor: 2,
		}
	}
}

impl HolderConfig {
	pub fn new(initial_capacity: usize, max_capacity: Option<usize>) -> Self {
		Self {
			initial_capacity,
			max_capacity,
			..Self::default()
		}
	}

	pub fn validate(&self) -> Result<()> {
		if self.initial_capacity == 0 {
			invalid_argument!("initial capacity must be at least 1");
		}
		if self.growth_factor < 2 {
			invalid_argument!("growth factor must be at least 2, got {}", self.growth_factor);
		}
		if let Some(max) = self.max_capacity {
			if max < self.initial_capacity {
				invalid_argument!(
					"max capacity {} is below initial capacity {}",
					max,
					self.initial_capacity
				);
			}
		}
		Ok(())
	}
}

/// Configuration for quantile digests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigestConfig {
	/// Max rank error as a fraction of the total count, in `[0, 1]`.
	pub max_error: f64,
}

impl Default for DigestConfig {
	fn default() -> Self {
		Self {
			max_error: DEFAULT_MAX_ERROR,
		}
	}
}

impl DigestConfig {
	pub fn validate(&self) -> Result<()> {
		validate_max_error(self.max_error)
	}
}

pub fn validate_max_error(max_error: f64) -> Result<()> {
	if !(0.0..=1.0).contains(&max_error) {
		invalid_argument!("max error must be within [0, 1], got {}", max_error);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Error;

	#[test]
	fn test_defaults_are_valid() {
		assert!(HolderConfig::default().validate().is_ok());
		assert!(DigestConfig::default().validate().is_ok());
	}

	#[test]
	fn test_holder_config_rejects_small_growth_factor() {
		let config = HolderConfig {
			growth_factor: 1,
			..HolderConfig::default()
		};
		assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_holder_config_rejects_max_below_initial() {
		let config = HolderConfig::new(64, Some(8));
		assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));

		let config = HolderConfig::new(0, None);
		assert!(matches!(config.validate(), Err(Error::InvalidArgument(_))));
	}

	#[test]
	fn test_digest_config_bounds() {
		assert!(
			DigestConfig {
				max_error: -0.1
			}
			.validate()
			.is_err()
		);
		assert!(
			DigestConfig {
				max_error: f64::NAN
			}
			.validate()
			.is_err()
		);
		assert!(
			DigestConfig {
				max_error: 0.0
			}
			.validate()
			.is_ok()
		);
	}

	#[test]
	fn test_partial_config_from_json() {
		let config: HolderConfig = serde_json::from_str(r#"{ "initial_capacity": 4 }"#).unwrap();
		assert_eq!(config.initial_capacity, 4);
		assert_eq!(config.growth_factor, 2);
		assert_eq!(config.max_capacity, None);

		let config: DigestConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config.max_error, DEFAULT_MAX_ERROR);
	}
}
