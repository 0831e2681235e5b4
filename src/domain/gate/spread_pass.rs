use super::{Pass, PassContext, Selection};
use crate::domain::id::SourceId;
use crate::domain::pick::{PassKind, SpreadAnalysis};

/// Selects the winner every source's predicted score agrees on.
///
/// Margin over spread is the blended margin plus the quoted line for that
/// side. The pass stays silent unless the primary source alone covers the
/// line.
#[derive(Debug, Clone)]
pub struct SpreadPass {
    primary: SourceId,
}

impl SpreadPass {
    #[must_use]
    pub const fn new(primary: SourceId) -> Self {
        Self { primary }
    }
}

impl Pass for SpreadPass {
    fn kind(&self) -> PassKind {
        PassKind::Spread
    }

    fn select(&self, ctx: &PassContext<'_>) -> Option<Selection> {
        let components = &ctx.prediction.components;
        let side = components.first()?.forecast.score_winner()?;
        if components
            .iter()
            .any(|c| c.forecast.score_winner() != Some(side))
        {
            return None;
        }

        let line = ctx.game.spread?.for_side(side);
        let blended_margin = ctx.prediction.blended_margin(side)?;
        let primary_margin = ctx.prediction.component(&self.primary)?.forecast.margin(side)?;
        let confirmed = primary_margin > -line;
        if !confirmed {
            return None;
        }

        Some(Selection {
            pass: self.kind(),
            side,
            spread: Some(SpreadAnalysis {
                line,
                blended_margin,
                primary_margin,
                margin_over_spread: blended_margin + line,
                confirmed,
            }),
        })
    }
}
