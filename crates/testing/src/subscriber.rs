// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Installs a fmt subscriber writing through the test harness, so output is
/// captured per test. Safe to call from every test; only the first call
/// installs.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
}
