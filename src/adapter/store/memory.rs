//! In-memory pick store.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::write_once;
use crate::domain::{Pick, PickId};
use crate::error::Result;
use crate::port::{PickStore, WriteOutcome};

/// In-memory store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    picks: RwLock<BTreeMap<PickId, Pick>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored picks.
    pub fn len(&self) -> usize {
        self.picks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.read().is_empty()
    }
}

impl PickStore for MemoryStore {
    async fn save_pick(&self, pick: &Pick) -> Result<WriteOutcome> {
        Ok(write_once(&mut self.picks.write(), pick))
    }

    async fn get_pick(&self, id: &PickId) -> Result<Option<Pick>> {
        Ok(self.picks.read().get(id).cloned())
    }

    async fn list_picks(&self) -> Result<Vec<Pick>> {
        Ok(self.picks.read().values().cloned().collect())
    }
}
