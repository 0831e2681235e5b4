//! Application layer - orchestration, configuration, and shared state.

mod aggregate;
mod config;
mod pipeline;
mod retry;
mod snapshot;

pub use aggregate::recalibrate;
pub use config::{Config, LoggingConfig, StoreConfig, STORE_PATH_ENV, WEIGHTS_PATH_ENV};
pub use pipeline::{Engine, GameEvaluation, Pipeline, Recommendation, RunOutput, RunReport};
pub use retry::{with_retry, RetryPolicy};
pub use snapshot::{load_or_default, SnapshotHandle};
