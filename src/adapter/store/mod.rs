//! Pick store adapters.
//!
//! - [`MemoryStore`] keeps picks in process memory (tests, dry runs).
//! - [`JsonFileStore`] keeps one JSON document keyed by pick id.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use crate::domain::{Pick, PickId};
use crate::port::WriteOutcome;

/// Insert `pick`, or merge it into the record already stored under its id.
pub(crate) fn write_once(picks: &mut BTreeMap<PickId, Pick>, pick: &Pick) -> WriteOutcome {
    match picks.get_mut(&pick.id) {
        Some(existing) => {
            if existing.merge_confirmation(pick) {
                WriteOutcome::Merged
            } else {
                WriteOutcome::Unchanged
            }
        }
        None => {
            picks.insert(pick.id.clone(), pick.clone());
            WriteOutcome::Created
        }
    }
}
