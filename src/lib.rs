//! Courtedge - forecast-ensemble edge detection and calibrated staking for
//! college basketball.
//!
//! Independent forecasting sources are blended into one probability per
//! side, priced against the market, classified into historical performance
//! bins, sized from a calibrated weights snapshot and finally filtered by a
//! multi-signal gate before prime picks are persisted.
//!
//! # Modules
//!
//! - [`domain`] - Pure types and calculations: ensemble, edge, classification,
//!   calibration, sizing and the gate
//! - [`port`] - Persistence traits (`PickStore`, `WeightsRepository`)
//! - [`adapter`] - JSON feed loading, pick stores and the weights file
//! - [`app`] - Configuration, the evaluation pipeline and recalibration
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use courtedge::domain::{AmericanOdds, Grade, OddsRange};
//!
//! assert_eq!(Grade::from_ev(4.2), Grade::B);
//! let odds = AmericanOdds::try_new(150).unwrap();
//! assert_eq!(OddsRange::of(odds), OddsRange::SlightDog);
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
