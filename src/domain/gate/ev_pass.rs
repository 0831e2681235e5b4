use super::{Pass, PassContext, Selection};
use crate::domain::pick::PassKind;

/// Selects the best side of bettable predictions above an EV minimum.
#[derive(Debug, Clone)]
pub struct EvPass {
    min_ev: f64,
}

impl EvPass {
    #[must_use]
    pub const fn new(min_ev: f64) -> Self {
        Self { min_ev }
    }
}

impl Pass for EvPass {
    fn kind(&self) -> PassKind {
        PassKind::Ev
    }

    fn select(&self, ctx: &PassContext<'_>) -> Option<Selection> {
        if !ctx.eligibility.is_bettable() || ctx.prediction.best_ev < self.min_ev {
            return None;
        }
        Some(Selection {
            pass: self.kind(),
            side: ctx.prediction.best_side,
            spread: None,
        })
    }
}
