//! Settled historical wagers.
//!
//! The offline aggregator is the only consumer. Each record carries the
//! decision-time prediction values so it can be re-binned.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classify::BetClassification;
use super::game::Side;
use super::grade::Grade;
use super::odds::AmericanOdds;

/// Final result of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WagerOutcome {
    Win,
    Loss,
    Push,
}

/// A wager with a known outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettledWager {
    #[serde(default)]
    pub id: Option<String>,
    pub side: Side,
    /// Price the wager was placed at.
    pub odds: AmericanOdds,
    #[serde(default = "default_units")]
    pub units: Decimal,
    pub outcome: WagerOutcome,
    /// Grade at decision time. Re-derived from `ev` when absent.
    #[serde(default)]
    pub grade: Option<Grade>,
    /// Model probability for the wagered side at decision time.
    pub model_prob: f64,
    /// Best-side EV at decision time, percent.
    pub ev: f64,
}

fn default_units() -> Decimal {
    Decimal::ONE
}

impl SettledWager {
    #[must_use]
    pub fn grade(&self) -> Grade {
        self.grade.unwrap_or_else(|| Grade::from_ev(self.ev))
    }

    #[must_use]
    pub fn classification(&self) -> BetClassification {
        BetClassification::from_parts(self.grade(), self.odds, self.model_prob, self.ev, self.side)
    }

    /// Realized profit in units. Pushes return zero.
    ///
    /// `None` when the amount does not fit in a `Decimal`.
    #[must_use]
    pub fn profit(&self) -> Option<Decimal> {
        match self.outcome {
            WagerOutcome::Win => {
                let odds = Decimal::from(self.odds.value());
                if odds > Decimal::ZERO {
                    self.units.checked_mul(odds)?.checked_div(Decimal::ONE_HUNDRED)
                } else {
                    self.units
                        .checked_mul(Decimal::ONE_HUNDRED)?
                        .checked_div(odds.abs())
                }
            }
            WagerOutcome::Loss => Some(-self.units),
            WagerOutcome::Push => Some(Decimal::ZERO),
        }
    }

    /// Whether the wager settled as a win or loss.
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        !matches!(self.outcome, WagerOutcome::Push)
    }
}
