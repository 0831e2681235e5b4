//! Implementations of ports (hexagonal adapters).

mod atomic;
pub mod feed;
pub mod store;
pub mod weights;
