//! Shared weights snapshot.
//!
//! Readers take an `Arc` to the current snapshot and keep it for the whole
//! cycle. A rebuild swaps the pointer, so no reader ever sees a partially
//! updated snapshot.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::domain::WeightsSnapshot;
use crate::port::WeightsRepository;

/// Holder of the current snapshot.
#[derive(Debug)]
pub struct SnapshotHandle {
    current: RwLock<Arc<WeightsSnapshot>>,
}

impl SnapshotHandle {
    #[must_use]
    pub fn new(snapshot: WeightsSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// The snapshot in effect now.
    #[must_use]
    pub fn current(&self) -> Arc<WeightsSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot, returning the previous one.
    pub fn swap(&self, snapshot: WeightsSnapshot) -> Arc<WeightsSnapshot> {
        std::mem::replace(&mut *self.current.write(), Arc::new(snapshot))
    }
}

impl Default for SnapshotHandle {
    fn default() -> Self {
        Self::new(WeightsSnapshot::default())
    }
}

/// Load the stored snapshot, falling back to built-in weights when it is
/// missing or unreadable.
pub async fn load_or_default<R: WeightsRepository>(repo: &R) -> WeightsSnapshot {
    match repo.load().await {
        Ok(Some(snapshot)) => {
            info!(
                version = snapshot.version,
                samples = snapshot.total_sample_size,
                "Loaded weights snapshot"
            );
            snapshot
        }
        Ok(None) => {
            warn!("No weights snapshot found, using built-in weights");
            WeightsSnapshot::default()
        }
        Err(e) => {
            warn!(error = %e, "Weights snapshot unavailable, using built-in weights");
            WeightsSnapshot::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_leaves_held_snapshot_untouched() {
        let handle = SnapshotHandle::default();
        let held = handle.current();
        let previous = handle.swap(WeightsSnapshot {
            version: 3,
            ..WeightsSnapshot::default()
        });
        assert_eq!(held.version, 0);
        assert_eq!(previous.version, 0);
        assert_eq!(handle.current().version, 3);
    }
}
