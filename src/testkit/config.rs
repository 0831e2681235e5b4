//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use std::path::Path;
use std::time::Duration;

use crate::app::{Config, RetryPolicy};

/// Retry policy with zero delays, so failing stores don't slow tests down.
pub const fn fast_retry(attempts: u32) -> RetryPolicy {
    RetryPolicy::new(attempts, Duration::ZERO)
}

/// Default configuration with files under `dir` and no retry delay.
pub fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.store.path = dir.join("picks.json");
    config.store.retry_initial_delay_ms = 0;
    config.weights_path = dir.join("weights.json");
    config
}

/// Minimal TOML that points both artifacts into `dir`.
pub fn toml_in(dir: &Path) -> String {
    format!(
        "weights_path = {:?}\n\n[store]\npath = {:?}\nretry_initial_delay_ms = 0\n",
        dir.join("weights.json").display().to_string(),
        dir.join("picks.json").display().to_string(),
    )
}
