//! Ensemble prediction records.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::DomainError;
use super::forecast::Forecast;
use super::game::Side;
use super::grade::Grade;
use super::id::SourceId;
use super::odds::AmericanOdds;

/// One source's contribution to a blend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub weight: f64,
    pub forecast: Forecast,
}

impl Component {
    #[must_use]
    pub fn source_id(&self) -> &SourceId {
        &self.forecast.source_id
    }
}

/// Why a game produced no prediction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsufficientData {
    #[error("no forecast from mandatory source {source_id}")]
    MissingSource { source_id: SourceId },

    #[error("forecast from {source_id} rejected: {reason}")]
    InvalidForecast {
        source_id: SourceId,
        reason: DomainError,
    },

    #[error("market odds missing for one or both sides")]
    MissingOdds,
}

impl InsufficientData {
    /// Short code for reporting.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingSource { .. } => "missing_source",
            Self::InvalidForecast { .. } => "invalid_forecast",
            Self::MissingOdds => "missing_odds",
        }
    }
}

/// Per-game output of the blender and edge calculator.
///
/// Created fresh every run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsemblePrediction {
    pub ensemble_away_prob: f64,
    pub ensemble_home_prob: f64,
    pub ensemble_away_score: Option<f64>,
    pub ensemble_home_score: Option<f64>,
    pub market_away_prob: f64,
    pub market_home_prob: f64,
    pub away_odds: AmericanOdds,
    pub home_odds: AmericanOdds,
    /// Model minus market probability, away side.
    pub away_edge: f64,
    pub home_edge: f64,
    pub away_ev: f64,
    pub home_ev: f64,
    pub best_side: Side,
    pub best_ev: f64,
    pub best_odds: AmericanOdds,
    pub grade: Grade,
    /// Every source favors the same winner.
    pub models_agree: bool,
    /// The winner every source favors, when they agree.
    pub consensus_side: Option<Side>,
    /// Sum of per-source predicted margins from the best side.
    pub combined_margin: Option<f64>,
    pub components: Vec<Component>,
}

impl EnsemblePrediction {
    /// Ensemble probability for `side`.
    #[must_use]
    pub const fn prob(&self, side: Side) -> f64 {
        match side {
            Side::Away => self.ensemble_away_prob,
            Side::Home => self.ensemble_home_prob,
        }
    }

    #[must_use]
    pub const fn best_prob(&self) -> f64 {
        self.prob(self.best_side)
    }

    #[must_use]
    pub const fn ev(&self, side: Side) -> f64 {
        match side {
            Side::Away => self.away_ev,
            Side::Home => self.home_ev,
        }
    }

    #[must_use]
    pub const fn edge(&self, side: Side) -> f64 {
        match side {
            Side::Away => self.away_edge,
            Side::Home => self.home_edge,
        }
    }

    #[must_use]
    pub const fn odds(&self, side: Side) -> AmericanOdds {
        match side {
            Side::Away => self.away_odds,
            Side::Home => self.home_odds,
        }
    }

    /// Blended predicted margin from `side`, when scores were blended.
    #[must_use]
    pub fn blended_margin(&self, side: Side) -> Option<f64> {
        let away = self.ensemble_away_score? - self.ensemble_home_score?;
        Some(match side {
            Side::Away => away,
            Side::Home => -away,
        })
    }

    /// The forecast used for `source`.
    #[must_use]
    pub fn component(&self, source: &SourceId) -> Option<&Component> {
        self.components.iter().find(|c| c.source_id() == source)
    }
}

impl AsRef<EnsemblePrediction> for EnsemblePrediction {
    fn as_ref(&self) -> &EnsemblePrediction {
        self
    }
}

/// Outcome of running one game through the ensemble.
#[derive(Debug, Clone, PartialEq)]
pub enum Prediction {
    Ready(EnsemblePrediction),
    Insufficient(InsufficientData),
}

impl Prediction {
    #[must_use]
    pub const fn as_ready(&self) -> Option<&EnsemblePrediction> {
        match self {
            Self::Ready(p) => Some(p),
            Self::Insufficient(_) => None,
        }
    }

    /// The reason a prediction is missing, if it is.
    #[must_use]
    pub const fn error(&self) -> Option<&InsufficientData> {
        match self {
            Self::Ready(_) => None,
            Self::Insufficient(reason) => Some(reason),
        }
    }
}

impl From<Result<EnsemblePrediction, InsufficientData>> for Prediction {
    fn from(result: Result<EnsemblePrediction, InsufficientData>) -> Self {
        match result {
            Ok(p) => Self::Ready(p),
            Err(reason) => Self::Insufficient(reason),
        }
    }
}
