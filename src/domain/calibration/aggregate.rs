use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::roi_to_weight;
use super::snapshot::{default_weights, WeightsSnapshot};
use crate::domain::classify::Factor;
use crate::domain::wager::{SettledWager, WagerOutcome};

/// Historical performance of one `(factor, bin)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    /// Decided wagers (wins + losses).
    pub sample_size: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub pushes: u32,
    #[serde(default)]
    pub staked: Decimal,
    #[serde(default)]
    pub profit: Decimal,
    /// Wins over decided wagers, percent.
    #[serde(default)]
    pub win_rate: f64,
    /// Profit over staked, percent.
    pub roi: f64,
    pub avg_model_prob: f64,
    pub actual_win_rate: f64,
    /// `actual_win_rate - avg_model_prob`; positive means underconfident.
    pub calibration_error: f64,
}

/// Records keyed by factor then bin label.
pub type PerformanceTable = BTreeMap<Factor, BTreeMap<String, PerformanceRecord>>;

/// Per-bin summaries plus the wagers that could not be tallied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub performance: PerformanceTable,
    /// Indexes into the input whose amounts overflow.
    pub skipped: Vec<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    wins: u32,
    losses: u32,
    pushes: u32,
    staked: Decimal,
    profit: Decimal,
    prob_sum: f64,
}

impl Tally {
    fn with(mut self, wager: &SettledWager, profit: Decimal) -> Option<Self> {
        self.staked = self.staked.checked_add(wager.units)?;
        self.profit = self.profit.checked_add(profit)?;
        match wager.outcome {
            WagerOutcome::Win => self.wins += 1,
            WagerOutcome::Loss => self.losses += 1,
            WagerOutcome::Push => self.pushes += 1,
        }
        if wager.is_decided() {
            self.prob_sum += wager.model_prob;
        }
        Some(self)
    }

    fn finish(self) -> PerformanceRecord {
        let decided = self.wins + self.losses;
        let (actual_win_rate, avg_model_prob) = if decided > 0 {
            let n = f64::from(decided);
            (f64::from(self.wins) / n, self.prob_sum / n)
        } else {
            (0.0, 0.0)
        };
        let roi = if self.staked > Decimal::ZERO {
            self.profit
                .checked_div(self.staked)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .and_then(|pct| pct.to_f64())
                .unwrap_or(0.0)
        } else {
            0.0
        };
        PerformanceRecord {
            sample_size: decided,
            wins: self.wins,
            losses: self.losses,
            pushes: self.pushes,
            staked: self.staked,
            profit: self.profit,
            win_rate: actual_win_rate * 100.0,
            roi,
            avg_model_prob,
            actual_win_rate,
            calibration_error: if decided > 0 {
                actual_win_rate - avg_model_prob
            } else {
                0.0
            },
        }
    }
}

/// Group wagers by every factor's bin and summarize each bin.
///
/// A wager lands in all of its bins or none. One whose profit or running
/// totals would overflow is left out and its index reported.
#[must_use]
pub fn aggregate(wagers: &[SettledWager]) -> Aggregation {
    let mut tallies: BTreeMap<Factor, BTreeMap<String, Tally>> = BTreeMap::new();
    let mut skipped = Vec::new();
    for (index, wager) in wagers.iter().enumerate() {
        let classification = wager.classification();
        let updates = wager.profit().and_then(|profit| {
            Factor::ALL
                .into_iter()
                .map(|factor| {
                    let bin = classification.bin(factor).to_string();
                    let current = tallies
                        .get(&factor)
                        .and_then(|bins| bins.get(&bin))
                        .copied()
                        .unwrap_or_default();
                    Some((factor, bin, current.with(wager, profit)?))
                })
                .collect::<Option<Vec<_>>>()
        });
        match updates {
            Some(updates) => {
                for (factor, bin, tally) in updates {
                    tallies.entry(factor).or_default().insert(bin, tally);
                }
            }
            None => skipped.push(index),
        }
    }

    let performance = tallies
        .into_iter()
        .map(|(factor, bins)| {
            let records = bins
                .into_iter()
                .map(|(bin, tally)| (bin, tally.finish()))
                .collect();
            (factor, records)
        })
        .collect();
    Aggregation {
        performance,
        skipped,
    }
}

/// Rebuild a snapshot wholesale from aggregated history.
///
/// Weights start from the built-in table and are replaced per bin by the
/// ROI-derived weight wherever history exists. The version advances by one
/// from `previous`.
#[must_use]
pub fn rebuild_snapshot(
    performance: PerformanceTable,
    previous: Option<&WeightsSnapshot>,
    now: DateTime<Utc>,
) -> WeightsSnapshot {
    let mut weights = default_weights();
    for (factor, bins) in &performance {
        let table = weights.entry(*factor).or_default();
        for (bin, record) in bins {
            table.insert(bin.clone(), roi_to_weight(record.roi, record.sample_size));
        }
    }

    // Every tallied wager lands in exactly one grade bin.
    let total_sample_size = performance
        .get(&Factor::Grade)
        .map_or(0, |bins| {
            bins.values()
                .fold(0_u32, |sum, record| sum.saturating_add(record.sample_size))
        });
    WeightsSnapshot {
        version: previous.map_or(1, |p| p.version + 1),
        weights,
        performance,
        total_sample_size,
        last_updated: Some(now),
    }
}
