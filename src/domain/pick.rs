//! Persisted pick records.
//!
//! A [`Pick`] is write-once. Its [`PickId`] is derived from the date, teams,
//! market and side, so re-running a day produces the same ids. The only
//! change a later write may make is [`Pick::merge_confirmation`].

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::classify::BetClassification;
use super::game::{MatchedGame, Side};
use super::grade::Grade;
use super::id::{id_segment, GameKey};
use super::odds::AmericanOdds;
use super::prediction::EnsemblePrediction;
use super::stake::{StakeDecision, StakeTier};
use super::threshold::ThresholdTable;

/// Market a pick is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Market {
    Moneyline,
    Spread,
}

impl Market {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Market::Moneyline => "MONEYLINE",
            Market::Spread => "SPREAD",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation pass that selected a pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PassKind {
    Ev,
    Spread,
}

impl PassKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            PassKind::Ev => "EV",
            PassKind::Spread => "SPREAD",
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conviction tier of a prime pick, from margin over spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConvictionTier {
    Max,
    Strong,
    Solid,
    Base,
}

/// Margin-over-spread cutoffs. Below the last step a game is not prime.
pub const CONVICTION_TABLE: ThresholdTable<'static, Option<ConvictionTier>> = ThresholdTable::new(
    &[
        (3.0, Some(ConvictionTier::Max)),
        (2.5, Some(ConvictionTier::Strong)),
        (2.0, Some(ConvictionTier::Solid)),
        (1.6, Some(ConvictionTier::Base)),
    ],
    None,
);

impl ConvictionTier {
    #[must_use]
    pub fn from_margin(margin_over_spread: f64) -> Option<Self> {
        CONVICTION_TABLE.lookup(margin_over_spread)
    }

    /// Stake for the tier.
    #[must_use]
    pub fn units(self) -> Decimal {
        match self {
            ConvictionTier::Max => Decimal::new(30, 1),
            ConvictionTier::Strong => Decimal::new(25, 1),
            ConvictionTier::Solid => Decimal::new(20, 1),
            ConvictionTier::Base => Decimal::new(15, 1),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ConvictionTier::Max => "MAX",
            ConvictionTier::Strong => "STRONG",
            ConvictionTier::Solid => "SOLID",
            ConvictionTier::Base => "BASE",
        }
    }
}

impl fmt::Display for ConvictionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deterministic pick identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PickId(String);

impl PickId {
    /// `{date}_{AWAY}_{HOME}_{MARKET}_{TEAM}_({SIDE})`.
    #[must_use]
    pub fn derive(date: NaiveDate, away_team: &str, home_team: &str, market: Market, side: Side) -> Self {
        let team = match side {
            Side::Away => away_team,
            Side::Home => home_team,
        };
        Self(format!(
            "{}_{}_{}_{}_{}_({})",
            date.format("%Y-%m-%d"),
            id_segment(away_team),
            id_segment(home_team),
            market,
            id_segment(team),
            side
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Spread-pass evidence attached to a pick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpreadAnalysis {
    /// Quoted line for the picked side.
    pub line: f64,
    /// Blended predicted margin for the picked side.
    pub blended_margin: f64,
    /// Primary source's predicted margin for the picked side.
    pub primary_margin: f64,
    /// `blended_margin + line`.
    pub margin_over_spread: f64,
    /// Primary margin covers the line.
    pub confirmed: bool,
}

/// Everything the gate decided for a prime pick.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimeTerms {
    pub side: Side,
    pub market: Market,
    pub conviction: ConvictionTier,
    pub units: Decimal,
    pub odds: AmericanOdds,
    pub probability: f64,
    pub ev: f64,
    pub spread: SpreadAnalysis,
}

/// A persisted high-conviction recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub id: PickId,
    pub date: NaiveDate,
    pub game_key: GameKey,
    pub away_team: String,
    pub home_team: String,
    /// Team backed.
    pub team: String,
    pub side: Side,
    pub market: Market,
    pub units: Decimal,
    /// Label derived from `units`.
    pub tier: StakeTier,
    pub conviction: ConvictionTier,
    /// Price the pick is placed at.
    pub odds: AmericanOdds,
    /// Win probability for moneyline, cover probability for spread.
    pub probability: f64,
    /// EV at `odds`, percent.
    pub ev: f64,
    pub grade: Grade,
    pub margin_over_spread: f64,
    pub combined_margin: Option<f64>,
    #[serde(default)]
    pub spread_analysis: Option<SpreadAnalysis>,
    #[serde(default)]
    pub confirmed_by: BTreeSet<PassKind>,
    pub classification: BetClassification,
    /// Calibrated sizing computed alongside the tier stake.
    pub stake: StakeDecision,
    pub prediction: EnsemblePrediction,
    #[serde(default)]
    pub game_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl AsRef<EnsemblePrediction> for Pick {
    fn as_ref(&self) -> &EnsemblePrediction {
        &self.prediction
    }
}

impl Pick {
    /// Assemble a prime pick.
    #[must_use]
    pub fn prime(
        date: NaiveDate,
        game: &MatchedGame,
        prediction: &EnsemblePrediction,
        stake: StakeDecision,
        terms: PrimeTerms,
        created_at: DateTime<Utc>,
    ) -> Self {
        let units_f64 = terms.units.to_f64().unwrap_or(0.0);
        Self {
            id: PickId::derive(date, &game.away_team, &game.home_team, terms.market, terms.side),
            date,
            game_key: game.key(),
            away_team: game.away_team.clone(),
            home_team: game.home_team.clone(),
            team: game.team(terms.side).to_string(),
            side: terms.side,
            market: terms.market,
            units: terms.units,
            tier: StakeTier::from_units(units_f64),
            conviction: terms.conviction,
            odds: terms.odds,
            probability: terms.probability,
            ev: terms.ev,
            grade: prediction.grade,
            margin_over_spread: terms.spread.margin_over_spread,
            combined_margin: prediction.combined_margin,
            spread_analysis: Some(terms.spread),
            confirmed_by: BTreeSet::from([PassKind::Ev, PassKind::Spread]),
            classification: BetClassification::of(prediction),
            stake,
            prediction: prediction.clone(),
            game_time: game.game_time,
            created_at,
        }
    }

    /// Apply the additive merge from a later write of the same id.
    ///
    /// Fills a missing spread analysis and unions `confirmed_by`. Every other
    /// field keeps its stored value. Returns whether anything changed.
    pub fn merge_confirmation(&mut self, incoming: &Pick) -> bool {
        let mut changed = false;
        if self.spread_analysis.is_none() {
            if let Some(analysis) = &incoming.spread_analysis {
                self.spread_analysis = Some(analysis.clone());
                changed = true;
            }
        }
        for pass in &incoming.confirmed_by {
            changed |= self.confirmed_by.insert(*pass);
        }
        changed
    }
}
