use std::fmt;

use super::{cover_probability, GateConfig, Selection};
use crate::domain::game::Side;
use crate::domain::odds::AmericanOdds;
use crate::domain::pick::{ConvictionTier, Market, PrimeTerms, SpreadAnalysis};
use crate::domain::prediction::EnsemblePrediction;

/// Where a game stands after both passes.
#[derive(Debug, Clone, PartialEq)]
pub enum GateState {
    Unseen,
    EvOnly(Selection),
    SpreadOnly(Selection),
    BothSameSide { ev: Selection, spread: Selection },
    BothConflictingSide { ev: Selection, spread: Selection },
}

/// Why a game did not become a prime pick.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    NoSelection,
    EvOnly,
    SpreadOnly,
    ConflictingSides { ev_side: Side, spread_side: Side },
    MarginBelowFloor { margin: f64, floor: f64 },
    SkepticalEv { ev: f64, margin: f64, required: f64 },
    InvalidAtsOdds { odds: i32 },
}

impl RejectReason {
    /// Short code for reporting.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NoSelection => "no_selection",
            Self::EvOnly => "ev_only",
            Self::SpreadOnly => "spread_only",
            Self::ConflictingSides { .. } => "conflicting_sides",
            Self::MarginBelowFloor { .. } => "margin_below_floor",
            Self::SkepticalEv { .. } => "skeptical_ev",
            Self::InvalidAtsOdds { .. } => "invalid_ats_odds",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSelection => f.write_str("neither pass selected the game"),
            Self::EvOnly => f.write_str("selected by EV pass only"),
            Self::SpreadOnly => f.write_str("selected by spread pass only"),
            Self::ConflictingSides {
                ev_side,
                spread_side,
            } => write!(f, "EV pass picked {ev_side}, spread pass picked {spread_side}"),
            Self::MarginBelowFloor { margin, floor } => {
                write!(f, "margin over spread {margin:.1} below {floor}")
            }
            Self::SkepticalEv {
                ev,
                margin,
                required,
            } => write!(
                f,
                "EV {ev:.1}% needs margin {required}, model margin only {margin:.1}"
            ),
            Self::InvalidAtsOdds { odds } => write!(f, "configured spread odds {odds} invalid"),
        }
    }
}

/// Terminal result of the gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateVerdict {
    Prime(PrimeTerms),
    Rejected(RejectReason),
}

impl GateState {
    /// Combine the two pass results.
    #[must_use]
    pub fn from_selections(ev: Option<Selection>, spread: Option<Selection>) -> Self {
        match (ev, spread) {
            (None, None) => Self::Unseen,
            (Some(ev), None) => Self::EvOnly(ev),
            (None, Some(spread)) => Self::SpreadOnly(spread),
            (Some(ev), Some(spread)) if ev.side == spread.side => Self::BothSameSide { ev, spread },
            (Some(ev), Some(spread)) => Self::BothConflictingSide { ev, spread },
        }
    }

    /// Short label for logging.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::EvOnly(_) => "ev_only",
            Self::SpreadOnly(_) => "spread_only",
            Self::BothSameSide { .. } => "both_same_side",
            Self::BothConflictingSide { .. } => "both_conflicting_side",
        }
    }

    /// Resolve to a prime pick or a rejection.
    #[must_use]
    pub fn resolve(self, prediction: &EnsemblePrediction, config: &GateConfig) -> GateVerdict {
        match self {
            Self::Unseen => GateVerdict::Rejected(RejectReason::NoSelection),
            Self::EvOnly(_) => GateVerdict::Rejected(RejectReason::EvOnly),
            Self::SpreadOnly(_) => GateVerdict::Rejected(RejectReason::SpreadOnly),
            Self::BothConflictingSide { ev, spread } => {
                GateVerdict::Rejected(RejectReason::ConflictingSides {
                    ev_side: ev.side,
                    spread_side: spread.side,
                })
            }
            Self::BothSameSide { ev, spread } => match spread.spread {
                Some(analysis) => prime_terms(ev.side, analysis, prediction, config),
                None => GateVerdict::Rejected(RejectReason::EvOnly),
            },
        }
    }
}

fn prime_terms(
    side: Side,
    analysis: SpreadAnalysis,
    prediction: &EnsemblePrediction,
    config: &GateConfig,
) -> GateVerdict {
    let margin = analysis.margin_over_spread;
    if margin < config.margin_floor {
        return GateVerdict::Rejected(RejectReason::MarginBelowFloor {
            margin,
            floor: config.margin_floor,
        });
    }
    if prediction.best_ev >= config.skeptic_ev && margin < config.skeptic_margin {
        return GateVerdict::Rejected(RejectReason::SkepticalEv {
            ev: prediction.best_ev,
            margin,
            required: config.skeptic_margin,
        });
    }
    let Some(conviction) = ConvictionTier::from_margin(margin) else {
        return GateVerdict::Rejected(RejectReason::MarginBelowFloor {
            margin,
            floor: config.margin_floor,
        });
    };

    let (market, odds, probability, ev) = if margin >= config.ats_margin {
        let Ok(odds) = AmericanOdds::try_new(config.ats_odds) else {
            return GateVerdict::Rejected(RejectReason::InvalidAtsOdds {
                odds: config.ats_odds,
            });
        };
        let cover = cover_probability(margin);
        (Market::Spread, odds, cover, odds.expected_value(cover))
    } else {
        (
            Market::Moneyline,
            prediction.odds(side),
            prediction.prob(side),
            prediction.ev(side),
        )
    };

    GateVerdict::Prime(PrimeTerms {
        side,
        market,
        conviction,
        units: conviction.units(),
        odds,
        probability,
        ev,
        spread: analysis,
    })
}
