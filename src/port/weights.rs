//! Weights snapshot port.

use std::future::Future;

use crate::domain::WeightsSnapshot;
use crate::error::Result;

/// Source and sink of the versioned weights artifact.
pub trait WeightsRepository: Send + Sync {
    /// Load the stored snapshot. `Ok(None)` means none has been written yet.
    fn load(&self) -> impl Future<Output = Result<Option<WeightsSnapshot>>> + Send;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &WeightsSnapshot) -> impl Future<Output = Result<()>> + Send;
}
