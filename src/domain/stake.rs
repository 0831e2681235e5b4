//! Stake decisions and tier labels.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classify::Factor;
use super::threshold::ThresholdTable;

/// Display label derived only from final units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StakeTier {
    Elite,
    High,
    Good,
    Moderate,
    Low,
    Minimal,
}

pub const STAKE_TIER_TABLE: ThresholdTable<'static, StakeTier> = ThresholdTable::new(
    &[
        (4.5, StakeTier::Elite),
        (3.5, StakeTier::High),
        (2.5, StakeTier::Good),
        (1.5, StakeTier::Moderate),
        (1.0, StakeTier::Low),
    ],
    StakeTier::Minimal,
);

/// Base units by additive score.
pub const BASE_UNITS_TABLE: ThresholdTable<'static, u8> =
    ThresholdTable::new(&[(5.5, 5), (4.5, 4), (3.5, 3), (2.5, 2)], 1);

impl StakeTier {
    #[must_use]
    pub fn from_units(units: f64) -> Self {
        STAKE_TIER_TABLE.lookup(units)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StakeTier::Elite => "ELITE",
            StakeTier::High => "HIGH",
            StakeTier::Good => "GOOD",
            StakeTier::Moderate => "MODERATE",
            StakeTier::Low => "LOW",
            StakeTier::Minimal => "MINIMAL",
        }
    }
}

impl fmt::Display for StakeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one factor moved the stake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorContribution {
    pub factor: Factor,
    pub bin: String,
    /// Weight from the snapshot, or 1.0 when the table has none.
    pub weight: f64,
    /// Amount added to the base score after capping.
    pub contribution: f64,
    /// Calibration multiplier, for factors in the product.
    pub multiplier: Option<f64>,
    pub exponent: Option<f64>,
    pub sample_size: u32,
}

impl fmt::Display for FactorContribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}={} weight {:.2} -> +{:.2}",
            self.factor, self.bin, self.weight, self.contribution
        )?;
        if let (Some(m), Some(e)) = (self.multiplier, self.exponent) {
            write!(f, ", x{m:.3}^{e} (n={})", self.sample_size)?;
        }
        Ok(())
    }
}

/// Final sizing for one wager. Never changed once made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeDecision {
    pub units: Decimal,
    pub tier: StakeTier,
    pub score: f64,
    pub base_units: u8,
    pub combined_multiplier: f64,
    pub contributing_factors: Vec<FactorContribution>,
}

impl StakeDecision {
    /// Human-readable audit trail, one line per factor.
    #[must_use]
    pub fn trace(&self) -> String {
        let mut lines: Vec<String> = self
            .contributing_factors
            .iter()
            .map(ToString::to_string)
            .collect();
        lines.push(format!(
            "score {:.2} -> {}u base x{:.3} -> {}u {}",
            self.score, self.base_units, self.combined_multiplier, self.units, self.tier
        ));
        lines.join("\n")
    }
}
