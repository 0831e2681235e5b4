//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams where the engine meets slow or external systems.
//! Adapters in [`crate::adapter`] implement them.
//!
//! # Available Ports
//!
//! - [`PickStore`] - Write-once persistence of picks keyed by deterministic id
//! - [`WeightsRepository`] - Load and save the weights snapshot artifact

mod store;
mod weights;

pub use store::{PickStore, WriteOutcome};
pub use weights::WeightsRepository;
