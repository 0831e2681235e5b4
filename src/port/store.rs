//! Store port for pick persistence.

use std::future::Future;

use crate::domain::{Pick, PickId};
use crate::error::Result;

/// What a save did to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteOutcome {
    /// No record existed; the pick was stored.
    Created,
    /// A record existed and gained confirmation fields.
    Merged,
    /// A record existed and nothing new was added.
    Unchanged,
}

/// Storage operations for picks.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `save_pick` never overwrites an existing record's market, probability
///   or EV fields. An existing id only goes through
///   [`Pick::merge_confirmation`].
pub trait PickStore: Send + Sync {
    /// Save a pick, merging into an existing record with the same id.
    fn save_pick(&self, pick: &Pick) -> impl Future<Output = Result<WriteOutcome>> + Send;

    /// Get a pick by id.
    fn get_pick(&self, id: &PickId) -> impl Future<Output = Result<Option<Pick>>> + Send;

    /// List every stored pick.
    fn list_picks(&self) -> impl Future<Output = Result<Vec<Pick>>> + Send;
}
