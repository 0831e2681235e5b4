//! Batch evaluation pipeline.
//!
//! Runs every matched game through
//! resolve -> ensemble -> classify -> size -> gate -> persist.
//! Evaluation is pure and per-game; only persistence touches the store, and
//! only persistence retries. One game's failure never stops the batch.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info};

use super::config::Config;
use super::retry::{with_retry, RetryPolicy};
use crate::domain::edge::{self, rank_recommendations};
use crate::domain::gate::PassContext;
use crate::domain::{
    BetClassification, EdgeRules, Eligibility, EnsembleBlender, EnsemblePrediction, Gate,
    GateVerdict, GameKey, InsufficientData, MatchedGame, Pick, Prediction, RejectReason,
    StakeDecision, StakeSizer, WeightsSnapshot,
};
use crate::error::{ConfigError, Result};
use crate::port::{PickStore, WriteOutcome};

/// Pure per-game evaluator.
#[derive(Debug)]
pub struct Engine {
    blender: EnsembleBlender,
    edge: EdgeRules,
    sizer: StakeSizer,
    gate: Gate,
}

/// How one game ended.
#[derive(Debug, Clone)]
pub enum GameEvaluation {
    /// No prediction could be made.
    Insufficient {
        game: GameKey,
        reason: InsufficientData,
    },
    /// A prediction was made but the gate rejected it.
    Rejected {
        game: GameKey,
        prediction: Box<EnsemblePrediction>,
        eligibility: Eligibility,
        stake: Box<StakeDecision>,
        reason: RejectReason,
    },
    /// Both passes agreed.
    Prime(Box<Pick>),
}

impl Engine {
    /// Build from validated configuration.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config) -> Result<Self> {
        let primary = config
            .ensemble
            .primary()
            .ok_or(ConfigError::MissingField {
                field: "ensemble.sources",
            })?
            .source
            .clone();
        Ok(Self {
            blender: EnsembleBlender::new(config.ensemble.clone()),
            edge: config.edge.clone(),
            sizer: StakeSizer::new(config.sizing.clone()),
            gate: Gate::new(config.gate.clone(), primary),
        })
    }

    /// Blend and price a game.
    #[must_use]
    pub fn predict(&self, game: &MatchedGame) -> Prediction {
        let Some(odds) = game.market_odds else {
            return Prediction::Insufficient(InsufficientData::MissingOdds);
        };
        self.blender
            .blend(game)
            .map(|blend| edge::price(blend, odds))
            .into()
    }

    /// Run one game through every stage up to the gate.
    #[must_use]
    pub fn evaluate(
        &self,
        game: &MatchedGame,
        snapshot: &WeightsSnapshot,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> GameEvaluation {
        let key = game.key();
        let prediction = match self.predict(game) {
            Prediction::Ready(p) => p,
            Prediction::Insufficient(reason) => {
                return GameEvaluation::Insufficient { game: key, reason };
            }
        };

        let eligibility = self.edge.check(&prediction);
        let classification = BetClassification::of(&prediction);
        let stake = self.sizer.size(&classification, snapshot);

        let ctx = PassContext {
            game,
            prediction: &prediction,
            eligibility: &eligibility,
        };
        match self.gate.evaluate(&ctx) {
            GateVerdict::Prime(terms) => {
                let pick = Pick::prime(date, game, &prediction, stake, terms, now);
                GameEvaluation::Prime(Box::new(pick))
            }
            GateVerdict::Rejected(reason) => GameEvaluation::Rejected {
                game: key,
                prediction: Box::new(prediction),
                eligibility,
                stake: Box::new(stake),
                reason,
            },
        }
    }
}

/// Counts from one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub evaluated: usize,
    pub insufficient: usize,
    pub ineligible: usize,
    pub rejected: BTreeMap<&'static str, usize>,
    pub prime: usize,
    pub created: usize,
    pub merged: usize,
    pub unchanged: usize,
    pub failed: usize,
}

impl RunReport {
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    fn record_write(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Created => self.created += 1,
            WriteOutcome::Merged => self.merged += 1,
            WriteOutcome::Unchanged => self.unchanged += 1,
        }
    }
}

/// A bettable prediction and the game it belongs to.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub game: GameKey,
    pub prediction: EnsemblePrediction,
}

impl AsRef<EnsemblePrediction> for Recommendation {
    fn as_ref(&self) -> &EnsemblePrediction {
        &self.prediction
    }
}

/// Result of a run.
///
/// `recommendations` and `picks` are ranked best grade first, then by EV.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: RunReport,
    pub recommendations: Vec<Recommendation>,
    pub picks: Vec<Pick>,
    pub evaluations: Vec<GameEvaluation>,
}

/// Evaluates a batch and persists prime picks.
pub struct Pipeline<S> {
    engine: Engine,
    store: S,
    retry: RetryPolicy,
}

impl<S: PickStore> Pipeline<S> {
    #[must_use]
    pub const fn new(engine: Engine, store: S, retry: RetryPolicy) -> Self {
        Self {
            engine,
            store,
            retry,
        }
    }

    /// Build the engine and retry policy from configuration.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: &Config, store: S) -> Result<Self> {
        let retry = RetryPolicy::new(
            config.store.retry_attempts,
            config.store.retry_initial_delay(),
        );
        Ok(Self::new(Engine::from_config(config)?, store, retry))
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub const fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Evaluate every game against `snapshot` and persist the prime picks.
    pub async fn run(
        &self,
        games: &[MatchedGame],
        snapshot: &WeightsSnapshot,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> RunOutput {
        let mut report = RunReport::default();
        let mut picks = Vec::new();
        let mut recommendations = Vec::new();
        let mut evaluations = Vec::with_capacity(games.len());

        for game in games {
            report.evaluated += 1;
            let evaluation = self.engine.evaluate(game, snapshot, date, now);
            match &evaluation {
                GameEvaluation::Insufficient { game, reason } => {
                    report.insufficient += 1;
                    info!(game = %game, reason = %reason, "Skipping game, insufficient data");
                }
                GameEvaluation::Rejected {
                    game,
                    prediction,
                    eligibility,
                    stake,
                    reason,
                } => {
                    match eligibility {
                        Eligibility::Ineligible(why) => {
                            report.ineligible += 1;
                            debug!(game = %game, reason = %why, "Prediction not bettable");
                        }
                        Eligibility::Bettable => {
                            debug!(game = %game, trace = %stake.trace(), "Stake sized");
                            recommendations.push(Recommendation {
                                game: game.clone(),
                                prediction: (**prediction).clone(),
                            });
                        }
                    }
                    *report.rejected.entry(reason.code()).or_default() += 1;
                    debug!(
                        game = %game,
                        side = %prediction.best_side,
                        ev = prediction.best_ev,
                        reason = %reason,
                        "Rejected"
                    );
                }
                GameEvaluation::Prime(pick) => {
                    report.prime += 1;
                    debug!(game = %pick.game_key, trace = %pick.stake.trace(), "Stake sized");
                    recommendations.push(Recommendation {
                        game: pick.game_key.clone(),
                        prediction: pick.prediction.clone(),
                    });
                    info!(
                        game = %pick.game_key,
                        team = %pick.team,
                        market = %pick.market,
                        units = %pick.units,
                        conviction = %pick.conviction,
                        mos = pick.margin_over_spread,
                        ev = pick.ev,
                        "Prime pick"
                    );
                    match self.persist(pick).await {
                        Ok(outcome) => report.record_write(outcome),
                        Err(e) => {
                            report.failed += 1;
                            error!(pick = %pick.id, error = %e, "Failed to persist pick");
                        }
                    }
                    picks.push(pick.as_ref().clone());
                }
            }
            evaluations.push(evaluation);
        }

        info!(
            evaluated = report.evaluated,
            insufficient = report.insufficient,
            ineligible = report.ineligible,
            rejected = report.rejected_total(),
            prime = report.prime,
            created = report.created,
            merged = report.merged,
            unchanged = report.unchanged,
            failed = report.failed,
            "Run complete"
        );

        RunOutput {
            report,
            recommendations: rank_recommendations(recommendations),
            picks: rank_recommendations(picks),
            evaluations,
        }
    }

    async fn persist(&self, pick: &Pick) -> Result<WriteOutcome> {
        with_retry(self.retry, "save_pick", || self.store.save_pick(pick)).await
    }
}
