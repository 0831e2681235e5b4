//! Letter grades assigned from best-side EV.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::threshold::ThresholdTable;

/// Letter grade for a prediction. Declaration order is best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

/// EV percentage cutoffs for each grade.
pub const GRADE_TABLE: ThresholdTable<'static, Grade> = ThresholdTable::new(
    &[(5.0, Grade::A), (3.0, Grade::B), (1.0, Grade::C), (-3.0, Grade::D)],
    Grade::F,
);

impl Grade {
    pub const ALL: [Grade; 5] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::F];

    /// Grade an expected value expressed in percent of stake.
    #[must_use]
    pub fn from_ev(ev: f64) -> Self {
        GRADE_TABLE.lookup(ev)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// D and F are never recommended.
    #[must_use]
    pub const fn is_recommendable(self) -> bool {
        matches!(self, Grade::A | Grade::B | Grade::C)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
