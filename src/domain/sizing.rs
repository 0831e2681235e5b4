//! Calibration-weighted stake sizing.
//!
//! Two layers feed the final stake:
//!
//! 1. An additive **base score** from the snapshot's slow-moving weight
//!    table, capped per factor, which picks base units.
//! 2. A **combined multiplier**, the exponent-weighted product of each
//!    calibrated factor's ROI and calibration-error multipliers.
//!
//! Final units are `base * combined`, rounded to the nearest half unit and
//! clamped to `[0.5, 5.0]`.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::calibration::{factor_multiplier, WeightsSnapshot, MIN_MULTIPLIER_SAMPLE};
use super::classify::{BetClassification, Factor};
use super::grade::Grade;
use super::stake::{FactorContribution, StakeDecision, StakeTier, BASE_UNITS_TABLE};

/// Smallest stake, in half units.
const MIN_HALF_UNITS: i64 = 1;
/// Largest stake, in half units.
const MAX_HALF_UNITS: i64 = 10;

/// Weight used when the snapshot has no entry for a bin.
pub const NEUTRAL_WEIGHT: f64 = 1.0;

/// Sizing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SizingConfig {
    /// Samples a bin needs before its multipliers leave neutral.
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: u32,

    /// Exponent of each calibrated factor in the combined product.
    #[serde(default = "default_factor_exponents")]
    pub factor_exponents: BTreeMap<Factor, f64>,

    /// Cap on each factor's additive contribution.
    #[serde(default = "default_max_contributions")]
    pub max_contributions: BTreeMap<Factor, f64>,

    /// Scale applied to the side weight before capping.
    #[serde(default = "default_side_scale")]
    pub side_scale: f64,

    /// Fixed stake for grade F, bypassing the weights.
    #[serde(default = "default_f_grade_cap")]
    pub f_grade_cap: Decimal,
}

const fn default_min_sample_size() -> u32 {
    MIN_MULTIPLIER_SAMPLE
}

fn default_factor_exponents() -> BTreeMap<Factor, f64> {
    BTreeMap::from([
        (Factor::Odds, 0.50),
        (Factor::Grade, 0.25),
        (Factor::Probability, 0.15),
        (Factor::Ev, 0.10),
    ])
}

fn default_max_contributions() -> BTreeMap<Factor, f64> {
    BTreeMap::from([
        (Factor::Grade, 2.0),
        (Factor::Odds, 2.0),
        (Factor::Probability, 1.5),
        (Factor::Ev, 1.0),
        (Factor::Side, 0.5),
    ])
}

const fn default_side_scale() -> f64 {
    0.5
}

fn default_f_grade_cap() -> Decimal {
    Decimal::new(5, 1) // 0.5
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_sample_size: default_min_sample_size(),
            factor_exponents: default_factor_exponents(),
            max_contributions: default_max_contributions(),
            side_scale: default_side_scale(),
            f_grade_cap: default_f_grade_cap(),
        }
    }
}

/// Turns a classification plus snapshot into a [`StakeDecision`].
#[derive(Debug, Clone)]
pub struct StakeSizer {
    config: SizingConfig,
}

impl StakeSizer {
    #[must_use]
    pub const fn new(config: SizingConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SizingConfig {
        &self.config
    }

    /// Size a wager.
    #[must_use]
    pub fn size(&self, classification: &BetClassification, snapshot: &WeightsSnapshot) -> StakeDecision {
        if classification.grade == Grade::F {
            return self.f_grade_decision();
        }

        let mut score = 0.0;
        let mut combined = 1.0;
        let mut contributing_factors = Vec::with_capacity(Factor::ALL.len());

        for factor in Factor::ALL {
            let bin = classification.bin(factor);
            let weight = snapshot.weight(factor, bin).unwrap_or(NEUTRAL_WEIGHT);
            let cap = self.config.max_contributions.get(&factor).copied().unwrap_or(f64::INFINITY);
            let raw = if factor == Factor::Side {
                weight * self.config.side_scale
            } else {
                weight
            };
            let contribution = raw.min(cap);
            score += contribution;

            let record = snapshot.performance(factor, bin);
            let exponent = self.config.factor_exponents.get(&factor).copied();
            let multiplier = exponent.map(|e| {
                let m = record.map_or(1.0, |r| factor_multiplier(r, self.config.min_sample_size));
                combined *= m.powf(e);
                m
            });

            contributing_factors.push(FactorContribution {
                factor,
                bin: bin.to_string(),
                weight,
                contribution,
                multiplier,
                exponent,
                sample_size: record.map_or(0, |r| r.sample_size),
            });
        }

        let base_units = BASE_UNITS_TABLE.lookup(score);
        let halves = (f64::from(base_units) * combined * 2.0).round() as i64;
        let halves = halves.clamp(MIN_HALF_UNITS, MAX_HALF_UNITS);

        StakeDecision {
            units: half_units(halves),
            tier: StakeTier::from_units(halves as f64 / 2.0),
            score,
            base_units,
            combined_multiplier: combined,
            contributing_factors,
        }
    }

    fn f_grade_decision(&self) -> StakeDecision {
        let units = self.config.f_grade_cap;
        StakeDecision {
            units,
            tier: StakeTier::from_units(units.to_f64().unwrap_or(0.0)),
            score: 0.0,
            base_units: 0,
            combined_multiplier: 1.0,
            contributing_factors: Vec::new(),
        }
    }
}

/// `halves / 2` as an exact decimal.
#[must_use]
pub fn half_units(halves: i64) -> Decimal {
    Decimal::new(halves * 5, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::calibration::PerformanceRecord;
    use crate::domain::game::Side;
    use crate::domain::odds::AmericanOdds;
    use rust_decimal_macros::dec;

    fn classification(grade: Grade, odds: i32, prob: f64, ev: f64, side: Side) -> BetClassification {
        BetClassification::from_parts(grade, AmericanOdds::try_new(odds).unwrap(), prob, ev, side)
    }

    fn record(n: u32, roi: f64, err: f64) -> PerformanceRecord {
        PerformanceRecord {
            sample_size: n,
            roi,
            calibration_error: err,
            ..PerformanceRecord::default()
        }
    }

    #[test]
    fn default_snapshot_sizes_from_weights_alone() {
        // A 1.6 + MOD_FAV 1.5 + GOOD 1.2 + MOD 1.2 (capped 1.0) + AWAY 0.6 (capped 0.5) = 5.8
        let c = classification(Grade::A, -170, 0.62, 6.0, Side::Away);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &WeightsSnapshot::default());
        assert!((d.score - 5.8).abs() < 1e-9);
        assert_eq!(d.base_units, 5);
        assert_eq!(d.combined_multiplier, 1.0);
        assert_eq!(d.units, dec!(5.0));
        assert_eq!(d.tier, StakeTier::Elite);
        assert_eq!(d.contributing_factors.len(), 5);
    }

    #[test]
    fn missing_weight_is_neutral() {
        let mut snapshot = WeightsSnapshot::default();
        snapshot.weights.clear();
        let c = classification(Grade::B, -110, 0.5, 3.5, Side::Home);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &snapshot);
        // 1 + 1 + 1 + 1 + 0.5
        assert!((d.score - 4.5).abs() < 1e-9);
        assert_eq!(d.base_units, 4);
        assert_eq!(d.units, dec!(4.0));
        assert_eq!(d.tier, StakeTier::High);
    }

    #[test]
    fn overconfident_odds_bin_shrinks_stake() {
        let mut snapshot = WeightsSnapshot::default();
        snapshot
            .performance
            .entry(Factor::Odds)
            .or_default()
            .insert("MOD_FAV".to_string(), record(40, -36.0, -0.5));
        let c = classification(Grade::A, -170, 0.62, 6.0, Side::Away);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &snapshot);
        // odds multiplier = mean(0.1, 0.15) = 0.125; combined = 0.125^0.5
        assert!((d.combined_multiplier - 0.125_f64.sqrt()).abs() < 1e-12);
        // 5 * 0.354 = 1.77 -> 2.0
        assert_eq!(d.units, dec!(2.0));
        assert_eq!(d.tier, StakeTier::Moderate);
    }

    #[test]
    fn small_samples_leave_multiplier_neutral() {
        let mut snapshot = WeightsSnapshot::default();
        snapshot
            .performance
            .entry(Factor::Odds)
            .or_default()
            .insert("MOD_FAV".to_string(), record(10, -36.0, -0.5));
        let c = classification(Grade::A, -170, 0.62, 6.0, Side::Away);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &snapshot);
        assert_eq!(d.combined_multiplier, 1.0);
    }

    #[test]
    fn units_clamp_to_half_unit_floor() {
        let mut snapshot = WeightsSnapshot::default();
        for factor in Factor::CALIBRATED {
            let bins = snapshot.performance.entry(factor).or_default();
            for bin in factor.bins() {
                bins.insert(bin.to_string(), record(100, -60.0, -0.5));
            }
        }
        let c = classification(Grade::C, -110, 0.5, 1.5, Side::Home);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &snapshot);
        assert_eq!(d.units, dec!(0.5));
        assert_eq!(d.tier, StakeTier::Minimal);
    }

    #[test]
    fn f_grade_is_capped_without_weights() {
        let c = classification(Grade::F, -110, 0.5, -8.0, Side::Home);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &WeightsSnapshot::default());
        assert_eq!(d.units, dec!(0.5));
        assert_eq!(d.tier, StakeTier::Minimal);
        assert!(d.contributing_factors.is_empty());
    }

    #[test]
    fn f_grade_tier_follows_configured_cap() {
        let c = classification(Grade::F, -110, 0.5, -8.0, Side::Home);
        let config = SizingConfig {
            f_grade_cap: dec!(1.0),
            ..SizingConfig::default()
        };
        let d = StakeSizer::new(config).size(&c, &WeightsSnapshot::default());
        assert_eq!(d.units, dec!(1.0));
        assert_eq!(d.tier, StakeTier::Low);
    }

    #[test]
    fn trace_lists_every_factor() {
        let c = classification(Grade::A, -170, 0.62, 6.0, Side::Away);
        let d = StakeSizer::new(SizingConfig::default()).size(&c, &WeightsSnapshot::default());
        let trace = d.trace();
        assert_eq!(trace.lines().count(), 6);
        assert!(trace.contains("odds=MOD_FAV"));
        assert!(trace.contains("ELITE"));
    }

    #[test]
    fn half_units_are_exact() {
        assert_eq!(half_units(3), dec!(1.5));
        assert_eq!(half_units(10), dec!(5.0));
    }
}
