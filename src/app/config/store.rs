use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Pick store location and retry policy.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// JSON document holding every pick.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Attempts per write, including the first.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Delay before the first retry; doubles after each failure.
    #[serde(default = "default_retry_initial_delay_ms")]
    pub retry_initial_delay_ms: u64,
}

fn default_path() -> PathBuf {
    PathBuf::from("data/picks.json")
}

const fn default_retry_attempts() -> u32 {
    3
}

const fn default_retry_initial_delay_ms() -> u64 {
    2000
}

impl StoreConfig {
    #[must_use]
    pub const fn retry_initial_delay(&self) -> Duration {
        Duration::from_millis(self.retry_initial_delay_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            retry_attempts: default_retry_attempts(),
            retry_initial_delay_ms: default_retry_initial_delay_ms(),
        }
    }
}
