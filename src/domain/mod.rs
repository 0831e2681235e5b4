//! Pure betting domain: forecasts, pricing, classification and sizing.
//!
//! Nothing here performs I/O. Every function takes its inputs plus an
//! immutable [`WeightsSnapshot`] and returns a value.

pub mod calibration;
pub mod classify;
pub mod edge;
pub mod ensemble;
pub mod error;
pub mod forecast;
pub mod game;
pub mod gate;
pub mod grade;
pub mod id;
pub mod odds;
pub mod pick;
pub mod prediction;
pub mod sizing;
pub mod stake;
pub mod threshold;
pub mod wager;

// Core records
pub use forecast::Forecast;
pub use game::{MarketOdds, MatchedGame, Side, SpreadLines};
pub use id::{GameKey, SourceId};
pub use odds::AmericanOdds;
pub use prediction::{Component, EnsemblePrediction, InsufficientData, Prediction};
pub use wager::{SettledWager, WagerOutcome};

// Pipeline stages
pub use calibration::{PerformanceRecord, WeightsSnapshot};
pub use classify::{BetClassification, EvRange, Factor, OddsRange, ProbRange};
pub use edge::{rank_recommendations, EdgeRules, Eligibility, IneligibleReason};
pub use ensemble::{Blend, EnsembleBlender, EnsembleConfig, SourceWeight};
pub use gate::{Gate, GateConfig, GateState, GateVerdict, RejectReason};
pub use grade::Grade;
pub use pick::{ConvictionTier, Market, PassKind, Pick, PickId, PrimeTerms, SpreadAnalysis};
pub use sizing::{SizingConfig, StakeSizer};
pub use stake::{FactorContribution, StakeDecision, StakeTier};
pub use threshold::ThresholdTable;
