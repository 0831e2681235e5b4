//! Fixed-weight ensemble of forecaster outputs.
//!
//! Only the configured mandatory sources are blended. A game missing any of
//! them, or carrying a forecast that fails the probability invariant, yields
//! [`InsufficientData`]; there is no degraded single-source prediction.

use serde::{Deserialize, Serialize};

use super::forecast::DEFAULT_PROBABILITY_TOLERANCE;
use super::game::MatchedGame;
use super::id::SourceId;
use super::prediction::{Component, InsufficientData};

/// A mandatory source and its blend weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceWeight {
    pub source: SourceId,
    pub weight: f64,
}

impl SourceWeight {
    #[must_use]
    pub fn new(source: impl Into<SourceId>, weight: f64) -> Self {
        Self {
            source: source.into(),
            weight,
        }
    }
}

/// Ensemble configuration. The first source is the primary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnsembleConfig {
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceWeight>,

    /// Allowed deviation of `away + home` from 1.
    #[serde(default = "default_tolerance")]
    pub probability_tolerance: f64,
}

fn default_sources() -> Vec<SourceWeight> {
    vec![
        SourceWeight::new("dratings", 0.90),
        SourceWeight::new("haslametrics", 0.10),
    ]
}

const fn default_tolerance() -> f64 {
    DEFAULT_PROBABILITY_TOLERANCE
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            probability_tolerance: default_tolerance(),
        }
    }
}

impl EnsembleConfig {
    /// The primary (first-listed) source.
    #[must_use]
    pub fn primary(&self) -> Option<&SourceWeight> {
        self.sources.first()
    }

    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.sources.iter().map(|s| s.weight).sum()
    }
}

/// Blended probabilities and scores for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct Blend {
    pub away_prob: f64,
    pub home_prob: f64,
    pub away_score: Option<f64>,
    pub home_score: Option<f64>,
    pub components: Vec<Component>,
}

/// Linear combination of mandatory forecasts.
#[derive(Debug, Clone)]
pub struct EnsembleBlender {
    config: EnsembleConfig,
}

impl EnsembleBlender {
    #[must_use]
    pub const fn new(config: EnsembleConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &EnsembleConfig {
        &self.config
    }

    /// Blend the mandatory forecasts of `game`.
    pub fn blend(&self, game: &MatchedGame) -> Result<Blend, InsufficientData> {
        let mut components = Vec::with_capacity(self.config.sources.len());
        for source in &self.config.sources {
            let forecast = game
                .forecast(&source.source)
                .ok_or_else(|| InsufficientData::MissingSource {
                    source_id: source.source.clone(),
                })?;
            forecast
                .validate(self.config.probability_tolerance)
                .map_err(|reason| InsufficientData::InvalidForecast {
                    source_id: source.source.clone(),
                    reason,
                })?;
            components.push(Component {
                weight: source.weight,
                forecast: forecast.clone(),
            });
        }

        let away_prob: f64 = components
            .iter()
            .map(|c| c.weight * c.forecast.away_win_prob)
            .sum();

        let scored = components
            .iter()
            .all(|c| c.forecast.away_score.is_some() && c.forecast.home_score.is_some());
        let (away_score, home_score) = if scored {
            let away = components
                .iter()
                .map(|c| c.weight * c.forecast.away_score.unwrap_or_default())
                .sum();
            let home = components
                .iter()
                .map(|c| c.weight * c.forecast.home_score.unwrap_or_default())
                .sum();
            (Some(away), Some(home))
        } else {
            (None, None)
        };

        Ok(Blend {
            away_prob,
            home_prob: 1.0 - away_prob,
            away_score,
            home_score,
            components,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::Forecast;
    use crate::domain::game::Side;

    fn forecast(source: &str, away: f64) -> Forecast {
        Forecast::try_new(SourceId::new(source), away, 1.0 - away, 0.05).unwrap()
    }

    fn game() -> MatchedGame {
        MatchedGame::try_new("Toledo", "Troy", None).unwrap()
    }

    #[test]
    fn blends_with_configured_weights() {
        let g = game()
            .with_forecast(forecast("dratings", 0.70))
            .with_forecast(forecast("haslametrics", 0.30));
        let blend = EnsembleBlender::new(EnsembleConfig::default()).blend(&g).unwrap();
        assert!((blend.away_prob - 0.66).abs() < 1e-9);
        assert!((blend.home_prob - 0.34).abs() < 1e-9);
        assert_eq!(blend.components.len(), 2);
    }

    #[test]
    fn missing_mandatory_source_is_insufficient() {
        let g = game().with_forecast(forecast("dratings", 0.70));
        let result = EnsembleBlender::new(EnsembleConfig::default()).blend(&g);
        assert!(matches!(
            result,
            Err(InsufficientData::MissingSource { source_id }) if source_id.as_str() == "haslametrics"
        ));
    }

    #[test]
    fn non_mandatory_sources_are_ignored() {
        let g = game()
            .with_forecast(forecast("dratings", 0.70))
            .with_forecast(forecast("haslametrics", 0.70))
            .with_forecast(forecast("kenpom", 0.10));
        let blend = EnsembleBlender::new(EnsembleConfig::default()).blend(&g).unwrap();
        assert!((blend.away_prob - 0.70).abs() < 1e-9);
    }

    #[test]
    fn invalid_forecast_is_insufficient() {
        let mut bad = forecast("haslametrics", 0.5);
        bad.away_win_prob = 0.8;
        let g = game().with_forecast(forecast("dratings", 0.7)).with_forecast(bad);
        let result = EnsembleBlender::new(EnsembleConfig::default()).blend(&g);
        assert!(matches!(result, Err(InsufficientData::InvalidForecast { .. })));
    }

    #[test]
    fn scores_blend_only_when_every_source_has_them() {
        let g = game()
            .with_forecast(forecast("dratings", 0.7).with_scores(78.0, 70.0))
            .with_forecast(forecast("haslametrics", 0.6).with_scores(76.0, 70.0));
        let blend = EnsembleBlender::new(EnsembleConfig::default()).blend(&g).unwrap();
        let margin = blend.away_score.unwrap() - blend.home_score.unwrap();
        assert!((margin - 7.8).abs() < 1e-9);

        let partial = game()
            .with_forecast(forecast("dratings", 0.7).with_scores(78.0, 70.0))
            .with_forecast(forecast("haslametrics", 0.6));
        let blend = EnsembleBlender::new(EnsembleConfig::default()).blend(&partial).unwrap();
        assert_eq!(blend.away_score, None);
        assert_eq!(blend.home_score, None);
        assert_eq!(blend.components[0].forecast.margin(Side::Away), Some(8.0));
    }
}
