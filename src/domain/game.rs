//! Matched game records supplied by the entity-resolution collaborator.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::forecast::Forecast;
use super::id::{GameKey, SourceId};
use super::odds::AmericanOdds;

/// Which team a wager backs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    /// Both sides, away first.
    pub const ALL: [Side; 2] = [Side::Away, Side::Home];

    /// The other team.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }

    /// Upper-case label used in identifiers and bins.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Side::Away => "AWAY",
            Side::Home => "HOME",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Moneyline prices quoted for both sides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOdds {
    pub away_odds: AmericanOdds,
    pub home_odds: AmericanOdds,
}

impl MarketOdds {
    #[must_use]
    pub const fn new(away_odds: AmericanOdds, home_odds: AmericanOdds) -> Self {
        Self {
            away_odds,
            home_odds,
        }
    }

    /// Price for `side`.
    #[must_use]
    pub const fn for_side(&self, side: Side) -> AmericanOdds {
        match side {
            Side::Away => self.away_odds,
            Side::Home => self.home_odds,
        }
    }
}

/// Quoted point spread per side. Negative lines mark the favorite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadLines {
    pub away_line: f64,
    pub home_line: f64,
}

impl SpreadLines {
    #[must_use]
    pub const fn new(away_line: f64, home_line: f64) -> Self {
        Self {
            away_line,
            home_line,
        }
    }

    /// Line for `side`.
    #[must_use]
    pub const fn for_side(&self, side: Side) -> f64 {
        match side {
            Side::Away => self.away_line,
            Side::Home => self.home_line,
        }
    }
}

/// One resolved matchup with market prices and every available forecast.
///
/// Produced upstream and consumed read-only by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedGame {
    pub away_team: String,
    pub home_team: String,
    /// Moneyline prices; a game without them cannot be priced for EV.
    #[serde(default)]
    pub market_odds: Option<MarketOdds>,
    /// Spread lines, when the book quotes them.
    #[serde(default)]
    pub spread: Option<SpreadLines>,
    #[serde(default)]
    pub forecasts: Vec<Forecast>,
    #[serde(default)]
    pub game_time: Option<DateTime<Utc>>,
}

impl MatchedGame {
    /// Create a game with validated team names and no forecasts.
    pub fn try_new(
        away_team: impl Into<String>,
        home_team: impl Into<String>,
        market_odds: Option<MarketOdds>,
    ) -> Result<Self, DomainError> {
        let away_team = away_team.into();
        let home_team = home_team.into();
        if away_team.trim().is_empty() || home_team.trim().is_empty() {
            return Err(DomainError::EmptyTeam);
        }
        Ok(Self {
            away_team,
            home_team,
            market_odds,
            spread: None,
            forecasts: Vec::new(),
            game_time: None,
        })
    }

    /// Attach spread lines.
    #[must_use]
    pub fn with_spread(mut self, spread: SpreadLines) -> Self {
        self.spread = Some(spread);
        self
    }

    /// Add a forecast, replacing any earlier one from the same source.
    #[must_use]
    pub fn with_forecast(mut self, forecast: Forecast) -> Self {
        self.forecasts.retain(|f| f.source_id != forecast.source_id);
        self.forecasts.push(forecast);
        self
    }

    /// Matchup key.
    #[must_use]
    pub fn key(&self) -> GameKey {
        GameKey::new(&self.away_team, &self.home_team)
    }

    /// Team name for `side`.
    #[must_use]
    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Away => &self.away_team,
            Side::Home => &self.home_team,
        }
    }

    /// The forecast published by `source`, if any.
    #[must_use]
    pub fn forecast(&self, source: &SourceId) -> Option<&Forecast> {
        self.forecasts.iter().find(|f| &f.source_id == source)
    }
}
