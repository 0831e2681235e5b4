//! Multi-signal agreement gate.
//!
//! Two independent recommendation passes run over every game:
//!
//! - **EV pass** ([`EvPass`]): the prediction is bettable and clears the
//!   gate's own EV minimum.
//! - **Spread pass** ([`SpreadPass`]): every source's predicted score picks
//!   the same winner and a spread is quoted for that side.
//!
//! Their selections place the game in a [`GateState`], which resolves to a
//! prime pick only when both passes chose the same side with enough margin
//! over the spread. Everything else is rejected with a reason.

mod ev_pass;
mod prime;
mod spread_pass;

pub use ev_pass::EvPass;
pub use prime::{GateState, GateVerdict, RejectReason};
pub use spread_pass::SpreadPass;

use serde::{Deserialize, Serialize};

use super::edge::Eligibility;
use super::game::{MatchedGame, Side};
use super::id::SourceId;
use super::odds::STANDARD_SPREAD_ODDS;
use super::pick::{PassKind, SpreadAnalysis};
use super::prediction::EnsemblePrediction;

/// Inputs shared by both passes.
#[derive(Debug, Clone, Copy)]
pub struct PassContext<'a> {
    pub game: &'a MatchedGame,
    pub prediction: &'a EnsemblePrediction,
    pub eligibility: &'a Eligibility,
}

/// A pass's choice for one game.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub pass: PassKind,
    pub side: Side,
    /// Present for spread-pass selections.
    pub spread: Option<SpreadAnalysis>,
}

/// An independent recommendation pass.
pub trait Pass: Send + Sync {
    fn kind(&self) -> PassKind;

    /// Select a side for the game, or `None` to pass on it.
    fn select(&self, ctx: &PassContext<'_>) -> Option<Selection>;
}

/// Gate thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GateConfig {
    /// Minimum best-side EV for the EV pass, percent.
    #[serde(default = "default_min_ev")]
    pub min_ev: f64,

    /// Minimum margin over spread for a prime pick.
    #[serde(default = "default_margin_floor")]
    pub margin_floor: f64,

    /// EV at or above which the larger margin is required.
    #[serde(default = "default_skeptic_ev")]
    pub skeptic_ev: f64,

    /// Margin required when EV is at or above `skeptic_ev`.
    #[serde(default = "default_skeptic_margin")]
    pub skeptic_margin: f64,

    /// Margin at which a pick moves to the spread market.
    #[serde(default = "default_ats_margin")]
    pub ats_margin: f64,

    /// Price assumed for spread picks.
    #[serde(default = "default_ats_odds")]
    pub ats_odds: i32,
}

const fn default_min_ev() -> f64 {
    3.0
}

const fn default_margin_floor() -> f64 {
    1.6
}

const fn default_skeptic_ev() -> f64 {
    10.0
}

const fn default_skeptic_margin() -> f64 {
    2.0
}

const fn default_ats_margin() -> f64 {
    2.0
}

const fn default_ats_odds() -> i32 {
    STANDARD_SPREAD_ODDS
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_ev: default_min_ev(),
            margin_floor: default_margin_floor(),
            skeptic_ev: default_skeptic_ev(),
            skeptic_margin: default_skeptic_margin(),
            ats_margin: default_ats_margin(),
            ats_odds: default_ats_odds(),
        }
    }
}

/// Probability a pick covers, from its margin over spread.
#[must_use]
pub fn cover_probability(margin_over_spread: f64) -> f64 {
    (0.50 + 0.03 * margin_over_spread).clamp(0.01, 0.99)
}

/// Runs both passes and resolves the gate state.
#[derive(Debug)]
pub struct Gate {
    config: GateConfig,
    ev: EvPass,
    spread: SpreadPass,
}

impl Gate {
    /// `primary` is the source whose margin decides spread confirmation.
    #[must_use]
    pub fn new(config: GateConfig, primary: SourceId) -> Self {
        let ev = EvPass::new(config.min_ev);
        Self {
            config,
            ev,
            spread: SpreadPass::new(primary),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Place the game in a gate state.
    #[must_use]
    pub fn state(&self, ctx: &PassContext<'_>) -> GateState {
        GateState::from_selections(self.ev.select(ctx), self.spread.select(ctx))
    }

    /// Run both passes and resolve.
    #[must_use]
    pub fn evaluate(&self, ctx: &PassContext<'_>) -> GateVerdict {
        self.state(ctx).resolve(ctx.prediction, &self.config)
    }
}
