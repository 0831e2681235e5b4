//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Every section has defaults, so
//! an empty file is valid. File locations can be overridden through
//! `COURTEDGE_WEIGHTS_PATH` and `COURTEDGE_STORE_PATH`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::{EdgeRules, EnsembleConfig, Factor, GateConfig, SizingConfig};
use crate::error::{ConfigError, Result};

mod logging;
mod store;

pub use logging::LoggingConfig;
pub use store::StoreConfig;

/// Environment variable overriding `weights_path`.
pub const WEIGHTS_PATH_ENV: &str = "COURTEDGE_WEIGHTS_PATH";
/// Environment variable overriding `store.path`.
pub const STORE_PATH_ENV: &str = "COURTEDGE_STORE_PATH";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ensemble: EnsembleConfig,
    #[serde(default)]
    pub edge: EdgeRules,
    #[serde(default)]
    pub sizing: SizingConfig,
    #[serde(default)]
    pub gate: GateConfig,
    #[serde(default)]
    pub store: StoreConfig,
    /// Weights snapshot artifact.
    #[serde(default = "default_weights_path")]
    pub weights_path: PathBuf,
}

fn default_weights_path() -> PathBuf {
    PathBuf::from("data/weights.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            ensemble: EnsembleConfig::default(),
            edge: EdgeRules::default(),
            sizing: SizingConfig::default(),
            gate: GateConfig::default(),
            store: StoreConfig::default(),
            weights_path: default_weights_path(),
        }
    }
}

impl Config {
    /// Load, apply environment overrides and validate.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let mut config = Self::parse(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML without environment overrides or validation.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(WEIGHTS_PATH_ENV) {
            self.weights_path = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var(STORE_PATH_ENV) {
            self.store.path = PathBuf::from(path);
        }
    }

    /// Check cross-field invariants.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.validate_ensemble()?;
        self.validate_edge()?;
        self.validate_sizing()?;
        self.validate_gate()?;

        if self.store.retry_attempts == 0 {
            return Err(invalid("store.retry_attempts", "must be at least 1"));
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "store.path" }.into());
        }
        if self.weights_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingField {
                field: "weights_path",
            }
            .into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid(
                "logging.format",
                format!("expected \"pretty\" or \"json\", got {:?}", self.logging.format),
            ));
        }
        Ok(())
    }

    fn validate_ensemble(&self) -> Result<()> {
        let ensemble = &self.ensemble;
        if ensemble.sources.len() < 2 {
            return Err(invalid(
                "ensemble.sources",
                format!("need at least 2 sources, got {}", ensemble.sources.len()),
            ));
        }
        let mut seen = HashSet::new();
        for source in &ensemble.sources {
            if !seen.insert(source.source.as_str()) {
                return Err(invalid(
                    "ensemble.sources",
                    format!("duplicate source {}", source.source),
                ));
            }
            if !(source.weight > 0.0 && source.weight <= 1.0) {
                return Err(invalid(
                    "ensemble.sources",
                    format!("weight for {} must be in (0, 1]", source.source),
                ));
            }
        }
        let sum = ensemble.weight_sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(invalid(
                "ensemble.sources",
                format!("weights must sum to 1, got {sum}"),
            ));
        }
        let tolerance = ensemble.probability_tolerance;
        if !(tolerance > 0.0 && tolerance < 0.5) {
            return Err(invalid(
                "ensemble.probability_tolerance",
                "must be in (0, 0.5)",
            ));
        }
        Ok(())
    }

    fn validate_edge(&self) -> Result<()> {
        let edge = &self.edge;
        if edge.min_odds > -100 || edge.max_odds < 100 {
            return Err(invalid(
                "edge.min_odds",
                "bounds must straddle the +/-100 gap",
            ));
        }
        if !(0.0..=1.0).contains(&edge.min_probability) {
            return Err(invalid("edge.min_probability", "must be in [0, 1]"));
        }
        Ok(())
    }

    fn validate_sizing(&self) -> Result<()> {
        let sizing = &self.sizing;
        for (factor, exponent) in &sizing.factor_exponents {
            if *factor == Factor::Side {
                return Err(invalid(
                    "sizing.factor_exponents",
                    "side does not take part in the calibrated product",
                ));
            }
            if *exponent < 0.0 {
                return Err(invalid(
                    "sizing.factor_exponents",
                    format!("{factor} exponent must be non-negative"),
                ));
            }
        }
        if sizing.max_contributions.values().any(|cap| *cap <= 0.0) {
            return Err(invalid("sizing.max_contributions", "caps must be positive"));
        }
        if sizing.f_grade_cap <= rust_decimal::Decimal::ZERO {
            return Err(invalid("sizing.f_grade_cap", "must be positive"));
        }
        Ok(())
    }

    fn validate_gate(&self) -> Result<()> {
        let gate = &self.gate;
        if gate.margin_floor > gate.skeptic_margin {
            return Err(invalid(
                "gate.skeptic_margin",
                "must not be below gate.margin_floor",
            ));
        }
        if gate.margin_floor > gate.ats_margin {
            return Err(invalid(
                "gate.ats_margin",
                "must not be below gate.margin_floor",
            ));
        }
        if gate.ats_odds.unsigned_abs() < 100 {
            return Err(invalid("gate.ats_odds", "must be <= -100 or >= 100"));
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
