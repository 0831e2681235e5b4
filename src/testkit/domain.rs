//! Builders for domain primitives used across tests.
//!
//! Tests describe games in terms of the two default sources (`dratings` as
//! primary, `haslametrics` as secondary) so assertions stay focused on the
//! numbers rather than on construction boilerplate.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::domain::{
    AmericanOdds, Forecast, Grade, MarketOdds, MatchedGame, Side, SettledWager, SourceId,
    SpreadLines, WagerOutcome,
};

/// Primary source id in the default ensemble.
pub const PRIMARY: &str = "dratings";
/// Secondary source id in the default ensemble.
pub const SECONDARY: &str = "haslametrics";

/// Slate date used by pipeline tests.
pub fn slate_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

/// Fixed clock for reproducible `created_at`/`last_updated` stamps.
pub fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 17, 0, 0).unwrap()
}

/// Create validated American odds.
pub fn odds(value: i32) -> AmericanOdds {
    AmericanOdds::try_new(value).unwrap()
}

/// Moneyline prices for both sides.
pub fn market(away: i32, home: i32) -> MarketOdds {
    MarketOdds::new(odds(away), odds(home))
}

/// Forecast from `source` with away probability `away_prob`.
pub fn forecast(source: &str, away_prob: f64) -> Forecast {
    Forecast::try_new(SourceId::new(source), away_prob, 1.0 - away_prob, 0.05).unwrap()
}

/// Forecast with predicted scores.
pub fn scored(source: &str, away_prob: f64, away_score: f64, home_score: f64) -> Forecast {
    forecast(source, away_prob).with_scores(away_score, home_score)
}

/// Fluent builder for [`MatchedGame`].
#[derive(Debug, Clone)]
pub struct GameBuilder {
    game: MatchedGame,
}

impl GameBuilder {
    /// A game between `away` and `home` priced at the given moneylines.
    pub fn new(away: &str, home: &str, away_odds: i32, home_odds: i32) -> Self {
        Self {
            game: MatchedGame::try_new(away, home, Some(market(away_odds, home_odds))).unwrap(),
        }
    }

    /// A game with no moneyline prices.
    pub fn unpriced(away: &str, home: &str) -> Self {
        Self {
            game: MatchedGame::try_new(away, home, None).unwrap(),
        }
    }

    /// Add the primary source's forecast.
    #[must_use]
    pub fn primary(self, away_prob: f64, away_score: f64, home_score: f64) -> Self {
        self.forecast(scored(PRIMARY, away_prob, away_score, home_score))
    }

    /// Add the secondary source's forecast.
    #[must_use]
    pub fn secondary(self, away_prob: f64, away_score: f64, home_score: f64) -> Self {
        self.forecast(scored(SECONDARY, away_prob, away_score, home_score))
    }

    /// Add an arbitrary forecast.
    #[must_use]
    pub fn forecast(mut self, forecast: Forecast) -> Self {
        self.game = self.game.with_forecast(forecast);
        self
    }

    /// Quote a spread from the away side's perspective.
    #[must_use]
    pub fn away_line(mut self, line: f64) -> Self {
        self.game = self.game.with_spread(SpreadLines::new(line, -line));
        self
    }

    pub fn build(self) -> MatchedGame {
        self.game
    }
}

/// Scenario D shape: both sources favor the away side by 7 and 6 points,
/// the book has the away side at -130 and -3.5.
///
/// Blended margin 6.9, margin over spread 3.4, best EV about 4%.
pub fn prime_game(away: &str, home: &str) -> MatchedGame {
    GameBuilder::new(away, home, -130, 110)
        .primary(0.588, 75.0, 68.0)
        .secondary(0.588, 74.0, 68.0)
        .away_line(-3.5)
        .build()
}

/// Settled wager builder with sensible defaults (1u, -110, away).
#[derive(Debug, Clone)]
pub struct WagerBuilder {
    wager: SettledWager,
}

impl WagerBuilder {
    pub fn new(outcome: WagerOutcome) -> Self {
        Self {
            wager: SettledWager {
                id: None,
                side: Side::Away,
                odds: odds(-110),
                units: Decimal::ONE,
                outcome,
                grade: None,
                model_prob: 0.55,
                ev: 5.0,
            },
        }
    }

    #[must_use]
    pub fn odds(mut self, value: i32) -> Self {
        self.wager.odds = odds(value);
        self
    }

    #[must_use]
    pub fn side(mut self, side: Side) -> Self {
        self.wager.side = side;
        self
    }

    #[must_use]
    pub fn units(mut self, units: Decimal) -> Self {
        self.wager.units = units;
        self
    }

    #[must_use]
    pub fn grade(mut self, grade: Grade) -> Self {
        self.wager.grade = Some(grade);
        self
    }

    #[must_use]
    pub fn model_prob(mut self, probability: f64) -> Self {
        self.wager.model_prob = probability;
        self
    }

    #[must_use]
    pub fn ev(mut self, ev: f64) -> Self {
        self.wager.ev = ev;
        self
    }

    pub fn build(self) -> SettledWager {
        self.wager
    }
}

/// `wins` wins followed by `losses` losses from the same template.
pub fn record(template: &WagerBuilder, wins: usize, losses: usize) -> Vec<SettledWager> {
    let mut wagers = Vec::with_capacity(wins + losses);
    for _ in 0..wins {
        let mut w = template.clone().build();
        w.outcome = WagerOutcome::Win;
        wagers.push(w);
    }
    for _ in 0..losses {
        let mut w = template.clone().build();
        w.outcome = WagerOutcome::Loss;
        wagers.push(w);
    }
    wagers
}
