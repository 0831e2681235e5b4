//! Bet classification into performance bins.
//!
//! Every candidate wager lands in exactly one bin per [`Factor`]. Bins are the
//! keys the aggregator groups history by and the sizer looks weights up by.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::game::Side;
use super::grade::Grade;
use super::odds::AmericanOdds;
use super::prediction::EnsemblePrediction;
use super::threshold::ThresholdTable;

/// A classification dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Grade,
    Odds,
    Probability,
    Ev,
    Side,
}

impl Factor {
    pub const ALL: [Factor; 5] = [
        Factor::Grade,
        Factor::Odds,
        Factor::Probability,
        Factor::Ev,
        Factor::Side,
    ];

    /// Factors that feed the exponent-weighted calibration product.
    pub const CALIBRATED: [Factor; 4] = [Factor::Odds, Factor::Grade, Factor::Probability, Factor::Ev];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Factor::Grade => "grade",
            Factor::Odds => "odds",
            Factor::Probability => "probability",
            Factor::Ev => "ev",
            Factor::Side => "side",
        }
    }

    /// Every bin label this factor can produce.
    #[must_use]
    pub fn bins(self) -> Vec<&'static str> {
        match self {
            Factor::Grade => Grade::ALL.iter().map(|g| g.as_str()).collect(),
            Factor::Odds => OddsRange::ALL.iter().map(|r| r.as_str()).collect(),
            Factor::Probability => ProbRange::ALL.iter().map(|r| r.as_str()).collect(),
            Factor::Ev => EvRange::ALL.iter().map(|r| r.as_str()).collect(),
            Factor::Side => Side::ALL.iter().map(|s| s.as_str()).collect(),
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket for the quoted price of the chosen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OddsRange {
    HeavyFav,
    BigFav,
    ModFav,
    SlightFav,
    Pickem,
    SlightDog,
    BigDog,
}

// American odds are integral, so each open bound becomes the next integer.
const ODDS_TABLE: ThresholdTable<'static, OddsRange> = ThresholdTable::new(
    &[
        (200.0, OddsRange::BigDog),
        (111.0, OddsRange::SlightDog),
        (-110.0, OddsRange::Pickem),
        (-149.0, OddsRange::SlightFav),
        (-199.0, OddsRange::ModFav),
        (-299.0, OddsRange::BigFav),
    ],
    OddsRange::HeavyFav,
);

impl OddsRange {
    pub const ALL: [OddsRange; 7] = [
        OddsRange::HeavyFav,
        OddsRange::BigFav,
        OddsRange::ModFav,
        OddsRange::SlightFav,
        OddsRange::Pickem,
        OddsRange::SlightDog,
        OddsRange::BigDog,
    ];

    #[must_use]
    pub fn of(odds: AmericanOdds) -> Self {
        ODDS_TABLE.lookup(f64::from(odds.value()))
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OddsRange::HeavyFav => "HEAVY_FAV",
            OddsRange::BigFav => "BIG_FAV",
            OddsRange::ModFav => "MOD_FAV",
            OddsRange::SlightFav => "SLIGHT_FAV",
            OddsRange::Pickem => "PICKEM",
            OddsRange::SlightDog => "SLIGHT_DOG",
            OddsRange::BigDog => "BIG_DOG",
        }
    }
}

/// Bucket for the model probability of the chosen side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProbRange {
    High,
    Good,
    Mod,
    Low,
}

const PROB_TABLE: ThresholdTable<'static, ProbRange> = ThresholdTable::new(
    &[(0.70, ProbRange::High), (0.60, ProbRange::Good), (0.55, ProbRange::Mod)],
    ProbRange::Low,
);

impl ProbRange {
    pub const ALL: [ProbRange; 4] = [ProbRange::High, ProbRange::Good, ProbRange::Mod, ProbRange::Low];

    #[must_use]
    pub fn of(probability: f64) -> Self {
        PROB_TABLE.lookup(probability)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ProbRange::High => "HIGH",
            ProbRange::Good => "GOOD",
            ProbRange::Mod => "MOD",
            ProbRange::Low => "LOW",
        }
    }
}

/// Bucket for best-side EV, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvRange {
    VeryHigh,
    High,
    Good,
    Mod,
    Low,
    Neg,
}

const EV_TABLE: ThresholdTable<'static, EvRange> = ThresholdTable::new(
    &[
        (20.0, EvRange::VeryHigh),
        (15.0, EvRange::High),
        (10.0, EvRange::Good),
        (5.0, EvRange::Mod),
        (0.0, EvRange::Low),
    ],
    EvRange::Neg,
);

impl EvRange {
    pub const ALL: [EvRange; 6] = [
        EvRange::VeryHigh,
        EvRange::High,
        EvRange::Good,
        EvRange::Mod,
        EvRange::Low,
        EvRange::Neg,
    ];

    #[must_use]
    pub fn of(ev: f64) -> Self {
        EV_TABLE.lookup(ev)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EvRange::VeryHigh => "VERY_HIGH",
            EvRange::High => "HIGH",
            EvRange::Good => "GOOD",
            EvRange::Mod => "MOD",
            EvRange::Low => "LOW",
            EvRange::Neg => "NEG",
        }
    }
}

/// The bin a wager occupies for every factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetClassification {
    pub grade: Grade,
    pub odds_range: OddsRange,
    pub prob_range: ProbRange,
    pub ev_range: EvRange,
    pub side: Side,
}

impl BetClassification {
    /// Classify from raw decision-time values.
    #[must_use]
    pub fn from_parts(grade: Grade, odds: AmericanOdds, probability: f64, ev: f64, side: Side) -> Self {
        Self {
            grade,
            odds_range: OddsRange::of(odds),
            prob_range: ProbRange::of(probability),
            ev_range: EvRange::of(ev),
            side,
        }
    }

    /// Classify a prediction on its best side.
    #[must_use]
    pub fn of(prediction: &EnsemblePrediction) -> Self {
        Self::from_parts(
            prediction.grade,
            prediction.best_odds,
            prediction.best_prob(),
            prediction.best_ev,
            prediction.best_side,
        )
    }

    /// Bin label for `factor`.
    #[must_use]
    pub const fn bin(&self, factor: Factor) -> &'static str {
        match factor {
            Factor::Grade => self.grade.as_str(),
            Factor::Odds => self.odds_range.as_str(),
            Factor::Probability => self.prob_range.as_str(),
            Factor::Ev => self.ev_range.as_str(),
            Factor::Side => self.side.as_str(),
        }
    }
}
