//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! These errors are returned by `try_new` constructors that validate inputs.
//!
//! # Examples
//!
//! Handling validation errors:
//!
//! ```
//! use courtedge::domain::error::DomainError;
//! use courtedge::domain::forecast::Forecast;
//! use courtedge::domain::id::SourceId;
//!
//! // Two-sided probabilities must sum to roughly one
//! let result = Forecast::try_new(SourceId::new("dratings"), 0.70, 0.50, 0.05);
//!
//! assert!(matches!(result, Err(DomainError::InvalidProbability { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// A forecast's two-sided probabilities do not sum to one within tolerance.
    #[error("probabilities for {source_id} sum to {sum:.3}, outside tolerance {tolerance}")]
    InvalidProbability {
        /// The forecasting source that produced the bad pair.
        source_id: String,
        /// The observed sum of both sides.
        sum: f64,
        /// The permitted absolute deviation from one.
        tolerance: f64,
    },

    /// A single probability lies outside `[0, 1]`.
    #[error("probability {value} for {source_id} is outside [0, 1]")]
    ProbabilityOutOfRange {
        /// The forecasting source that produced the value.
        source_id: String,
        /// The invalid value.
        value: f64,
    },

    /// American odds must be at least +100 or at most -100.
    #[error("invalid american odds {odds}")]
    InvalidOdds {
        /// The rejected odds value.
        odds: i32,
    },

    /// Decimal odds must exceed 1.0.
    #[error("invalid decimal odds {odds}")]
    InvalidDecimalOdds {
        /// The rejected decimal price.
        odds: f64,
    },

    /// Team names must be non-empty.
    #[error("team name cannot be empty")]
    EmptyTeam,
}
