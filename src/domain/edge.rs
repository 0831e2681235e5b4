//! Edge, EV and eligibility.
//!
//! Prices a [`Blend`] against the market, picks the side with the higher EV,
//! grades it and decides whether the prediction is bettable at all.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ensemble::Blend;
use super::game::{MarketOdds, Side};
use super::grade::Grade;
use super::prediction::EnsemblePrediction;

/// Price a blend against market odds.
#[must_use]
pub fn price(blend: Blend, odds: MarketOdds) -> EnsemblePrediction {
    let market_away_prob = odds.away_odds.implied_probability();
    let market_home_prob = odds.home_odds.implied_probability();
    let away_ev = odds.away_odds.expected_value(blend.away_prob);
    let home_ev = odds.home_odds.expected_value(blend.home_prob);

    let best_side = if away_ev >= home_ev { Side::Away } else { Side::Home };
    let best_ev = away_ev.max(home_ev);

    let favored: Vec<Option<Side>> = blend
        .components
        .iter()
        .map(|c| c.forecast.favored_side())
        .collect();
    let consensus_side = match favored.first() {
        Some(Some(first)) if favored.iter().all(|f| *f == Some(*first)) => Some(*first),
        _ => None,
    };

    let combined_margin = blend
        .components
        .iter()
        .map(|c| c.forecast.margin(best_side))
        .sum::<Option<f64>>();

    EnsemblePrediction {
        ensemble_away_prob: blend.away_prob,
        ensemble_home_prob: blend.home_prob,
        ensemble_away_score: blend.away_score,
        ensemble_home_score: blend.home_score,
        market_away_prob,
        market_home_prob,
        away_odds: odds.away_odds,
        home_odds: odds.home_odds,
        away_edge: blend.away_prob - market_away_prob,
        home_edge: blend.home_prob - market_home_prob,
        away_ev,
        home_ev,
        best_side,
        best_ev,
        best_odds: odds.for_side(best_side),
        grade: Grade::from_ev(best_ev),
        models_agree: consensus_side.is_some(),
        consensus_side,
        combined_margin,
        components: blend.components,
    }
}

/// Hard gates a prediction must clear to be bettable.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeRules {
    /// Minimum best-side EV, percent.
    #[serde(default = "default_min_ev")]
    pub min_ev: f64,

    /// Minimum best-side model probability.
    #[serde(default = "default_min_probability")]
    pub min_probability: f64,

    /// Most negative odds accepted.
    #[serde(default = "default_min_odds")]
    pub min_odds: i32,

    /// Most positive odds accepted.
    #[serde(default = "default_max_odds")]
    pub max_odds: i32,

    /// Require every source to favor the best side.
    #[serde(default = "default_require_agreement")]
    pub require_agreement: bool,
}

const fn default_min_ev() -> f64 {
    3.0
}

const fn default_min_probability() -> f64 {
    0.35
}

const fn default_min_odds() -> i32 {
    -1000
}

const fn default_max_odds() -> i32 {
    300
}

const fn default_require_agreement() -> bool {
    true
}

impl Default for EdgeRules {
    fn default() -> Self {
        Self {
            min_ev: default_min_ev(),
            min_probability: default_min_probability(),
            min_odds: default_min_odds(),
            max_odds: default_max_odds(),
            require_agreement: default_require_agreement(),
        }
    }
}

/// Why a prediction is not bettable.
#[derive(Debug, Clone, PartialEq)]
pub enum IneligibleReason {
    EvBelowMinimum { ev: f64, min: f64 },
    ProbabilityTooLow { probability: f64, min: f64 },
    OddsOutOfRange { odds: i32 },
    ModelsDisagree,
    AgainstConsensus { consensus: Side },
}

impl IneligibleReason {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EvBelowMinimum { .. } => "ev_below_minimum",
            Self::ProbabilityTooLow { .. } => "probability_too_low",
            Self::OddsOutOfRange { .. } => "odds_out_of_range",
            Self::ModelsDisagree => "models_disagree",
            Self::AgainstConsensus { .. } => "against_consensus",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvBelowMinimum { ev, min } => write!(f, "EV {ev:.2}% below minimum {min}%"),
            Self::ProbabilityTooLow { probability, min } => {
                write!(f, "probability {probability:.3} below minimum {min}")
            }
            Self::OddsOutOfRange { odds } => write!(f, "odds {odds} outside accepted range"),
            Self::ModelsDisagree => f.write_str("sources disagree on the winner"),
            Self::AgainstConsensus { consensus } => {
                write!(f, "best side is not the consensus winner ({consensus})")
            }
        }
    }
}

/// Result of the eligibility gates.
#[derive(Debug, Clone, PartialEq)]
pub enum Eligibility {
    Bettable,
    Ineligible(IneligibleReason),
}

impl Eligibility {
    #[must_use]
    pub const fn is_bettable(&self) -> bool {
        matches!(self, Self::Bettable)
    }
}

impl EdgeRules {
    /// Apply every gate, reporting the first failure.
    #[must_use]
    pub fn check(&self, prediction: &EnsemblePrediction) -> Eligibility {
        match self.first_failure(prediction) {
            Some(reason) => Eligibility::Ineligible(reason),
            None => Eligibility::Bettable,
        }
    }

    fn first_failure(&self, p: &EnsemblePrediction) -> Option<IneligibleReason> {
        if p.best_ev < self.min_ev {
            return Some(IneligibleReason::EvBelowMinimum {
                ev: p.best_ev,
                min: self.min_ev,
            });
        }
        let probability = p.best_prob();
        if probability < self.min_probability {
            return Some(IneligibleReason::ProbabilityTooLow {
                probability,
                min: self.min_probability,
            });
        }
        let odds = p.best_odds.value();
        if odds < self.min_odds || odds > self.max_odds {
            return Some(IneligibleReason::OddsOutOfRange { odds });
        }
        if self.require_agreement {
            match p.consensus_side {
                None => return Some(IneligibleReason::ModelsDisagree),
                Some(consensus) if consensus != p.best_side => {
                    return Some(IneligibleReason::AgainstConsensus { consensus });
                }
                Some(_) => {}
            }
        }
        None
    }
}

/// Order recommendations best grade first, then by EV descending.
///
/// Ties keep their input order.
#[must_use]
pub fn rank_recommendations<T: AsRef<EnsemblePrediction>>(mut items: Vec<T>) -> Vec<T> {
    items.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        match a.grade.cmp(&b.grade) {
            Ordering::Equal => b.best_ev.total_cmp(&a.best_ev),
            other => other,
        }
    });
    items
}
