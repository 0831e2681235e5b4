//! Normalized forecaster output.
//!
//! Each upstream rating service produces a win probability per side and,
//! optionally, a predicted final score. [`Forecast`] is the common shape all
//! of them are adapted into before blending.

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::game::Side;
use super::id::SourceId;

/// Default tolerance on `|away + home - 1|`.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 0.05;

/// One source's prediction for a single game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// Which forecaster produced this prediction.
    pub source_id: SourceId,
    /// Probability that the away side wins outright.
    pub away_win_prob: f64,
    /// Probability that the home side wins outright.
    pub home_win_prob: f64,
    /// Predicted away score, when the source publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away_score: Option<f64>,
    /// Predicted home score, when the source publishes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_score: Option<f64>,
}

impl Forecast {
    /// Create a validated forecast without predicted scores.
    pub fn try_new(
        source_id: SourceId,
        away_win_prob: f64,
        home_win_prob: f64,
        tolerance: f64,
    ) -> Result<Self, DomainError> {
        let forecast = Self {
            source_id,
            away_win_prob,
            home_win_prob,
            away_score: None,
            home_score: None,
        };
        forecast.validate(tolerance)?;
        Ok(forecast)
    }

    /// Attach predicted scores.
    #[must_use]
    pub fn with_scores(mut self, away_score: f64, home_score: f64) -> Self {
        self.away_score = Some(away_score);
        self.home_score = Some(home_score);
        self
    }

    /// Check both probabilities are in range and sum to one within `tolerance`.
    pub fn validate(&self, tolerance: f64) -> Result<(), DomainError> {
        for value in [self.away_win_prob, self.home_win_prob] {
            if !(0.0..=1.0).contains(&value) || value.is_nan() {
                return Err(DomainError::ProbabilityOutOfRange {
                    source_id: self.source_id.to_string(),
                    value,
                });
            }
        }
        let sum = self.away_win_prob + self.home_win_prob;
        if (sum - 1.0).abs() > tolerance {
            return Err(DomainError::InvalidProbability {
                source_id: self.source_id.to_string(),
                sum,
                tolerance,
            });
        }
        Ok(())
    }

    /// Win probability for `side`.
    #[must_use]
    pub fn win_prob(&self, side: Side) -> f64 {
        match side {
            Side::Away => self.away_win_prob,
            Side::Home => self.home_win_prob,
        }
    }

    /// The side this forecast expects to win, or `None` on an exact coin flip.
    #[must_use]
    pub fn favored_side(&self) -> Option<Side> {
        if self.away_win_prob > self.home_win_prob {
            Some(Side::Away)
        } else if self.home_win_prob > self.away_win_prob {
            Some(Side::Home)
        } else {
            None
        }
    }

    /// Predicted margin of victory from `side`'s perspective.
    ///
    /// Returns `None` unless both scores are present.
    #[must_use]
    pub fn margin(&self, side: Side) -> Option<f64> {
        let away_margin = self.away_score? - self.home_score?;
        Some(match side {
            Side::Away => away_margin,
            Side::Home => -away_margin,
        })
    }

    /// The side the predicted score says wins, or `None` when scores are
    /// missing or tied.
    #[must_use]
    pub fn score_winner(&self) -> Option<Side> {
        let margin = self.margin(Side::Away)?;
        if margin > 0.0 {
            Some(Side::Away)
        } else if margin < 0.0 {
            Some(Side::Home)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_probabilities_within_tolerance() {
        let f = Forecast::try_new(SourceId::new("a"), 0.52, 0.50, 0.05);
        assert!(f.is_ok());
    }

    #[test]
    fn rejects_probabilities_outside_tolerance() {
        let f = Forecast::try_new(SourceId::new("a"), 0.60, 0.50, 0.05);
        assert!(matches!(f, Err(DomainError::InvalidProbability { .. })));
    }

    #[test]
    fn rejects_probability_out_of_range() {
        let f = Forecast::try_new(SourceId::new("a"), 1.2, -0.2, 0.05);
        assert!(matches!(f, Err(DomainError::ProbabilityOutOfRange { .. })));
    }

    #[test]
    fn margin_is_side_relative() {
        let f = Forecast::try_new(SourceId::new("a"), 0.7, 0.3, 0.05)
            .unwrap()
            .with_scores(78.0, 70.0);
        assert_eq!(f.margin(Side::Away), Some(8.0));
        assert_eq!(f.margin(Side::Home), Some(-8.0));
        assert_eq!(f.score_winner(), Some(Side::Away));
    }

    #[test]
    fn margin_requires_both_scores() {
        let mut f = Forecast::try_new(SourceId::new("a"), 0.7, 0.3, 0.05).unwrap();
        f.away_score = Some(70.0);
        assert_eq!(f.margin(Side::Away), None);
        assert_eq!(f.score_winner(), None);
    }

    #[test]
    fn favored_side_by_probability() {
        let f = Forecast::try_new(SourceId::new("a"), 0.4, 0.6, 0.05).unwrap();
        assert_eq!(f.favored_side(), Some(Side::Home));
        let even = Forecast::try_new(SourceId::new("a"), 0.5, 0.5, 0.05).unwrap();
        assert_eq!(even.favored_side(), None);
    }
}
