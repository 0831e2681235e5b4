use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::{PerformanceRecord, PerformanceTable};
use crate::domain::classify::Factor;

/// Additive weights keyed by factor then bin label.
pub type WeightTable = BTreeMap<Factor, BTreeMap<String, f64>>;

/// Immutable weights and performance artifact read by the sizer.
///
/// Replaced wholesale between runs, never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightsSnapshot {
    #[serde(default)]
    pub version: u64,
    #[serde(default = "default_weights")]
    pub weights: WeightTable,
    #[serde(default)]
    pub performance: PerformanceTable,
    #[serde(default)]
    pub total_sample_size: u32,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for WeightsSnapshot {
    fn default() -> Self {
        Self {
            version: 0,
            weights: default_weights(),
            performance: PerformanceTable::new(),
            total_sample_size: 0,
            last_updated: None,
        }
    }
}

impl WeightsSnapshot {
    /// Additive weight for a bin, if the table has one.
    #[must_use]
    pub fn weight(&self, factor: Factor, bin: &str) -> Option<f64> {
        self.weights.get(&factor)?.get(bin).copied()
    }

    /// Historical record for a bin, if any wagers landed in it.
    #[must_use]
    pub fn performance(&self, factor: Factor, bin: &str) -> Option<&PerformanceRecord> {
        self.performance.get(&factor)?.get(bin)
    }

    /// Whether this is the built-in fallback rather than an aggregated artifact.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        self.version == 0 && self.performance.is_empty()
    }
}

/// Built-in weight table used before any history has been aggregated.
#[must_use]
pub fn default_weights() -> WeightTable {
    let table: [(Factor, &[(&str, f64)]); 5] = [
        (
            Factor::Grade,
            &[("A", 1.6), ("B", 0.9), ("C", 1.0), ("D", 0.8), ("F", 0.5)],
        ),
        (
            Factor::Odds,
            &[
                ("HEAVY_FAV", 0.5),
                ("BIG_FAV", 1.0),
                ("MOD_FAV", 1.5),
                ("SLIGHT_FAV", 1.6),
                ("PICKEM", 0.8),
                ("SLIGHT_DOG", 0.7),
                ("BIG_DOG", 0.4),
            ],
        ),
        (
            Factor::Probability,
            &[("HIGH", 1.5), ("GOOD", 1.2), ("MOD", 1.0), ("LOW", 0.7)],
        ),
        (
            Factor::Ev,
            &[
                ("VERY_HIGH", 0.5),
                ("HIGH", 0.8),
                ("GOOD", 1.4),
                ("MOD", 1.2),
                ("LOW", 1.0),
                ("NEG", 0.9),
            ],
        ),
        (Factor::Side, &[("AWAY", 1.2), ("HOME", 0.9)]),
    ];

    table
        .into_iter()
        .map(|(factor, bins)| {
            let bins = bins.iter().map(|(bin, w)| ((*bin).to_string(), *w)).collect();
            (factor, bins)
        })
        .collect()
}
