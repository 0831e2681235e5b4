//! Ordered cutoff tables.
//!
//! Grades, base units, stake tiers and conviction tiers are all "first cutoff
//! the value reaches" lookups. [`ThresholdTable`] holds the cutoffs in
//! descending order and resolves a value with a single scan, so each table's
//! boundaries can be tested directly.

/// A descending list of `(cutoff, label)` steps plus a floor label.
///
/// `lookup(v)` returns the label of the first step with `v >= cutoff`, or the
/// floor when no step matches.
#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable<'a, L> {
    steps: &'a [(f64, L)],
    floor: L,
}

impl<'a, L: Copy> ThresholdTable<'a, L> {
    /// Build a table. `steps` must be sorted by cutoff, highest first.
    #[must_use]
    pub const fn new(steps: &'a [(f64, L)], floor: L) -> Self {
        Self { steps, floor }
    }

    /// Resolve `value` to its label.
    #[must_use]
    pub fn lookup(&self, value: f64) -> L {
        self.steps
            .iter()
            .find(|(cutoff, _)| value >= *cutoff)
            .map_or(self.floor, |(_, label)| *label)
    }

    /// Whether cutoffs are strictly descending.
    #[must_use]
    pub fn is_descending(&self) -> bool {
        self.steps.windows(2).all(|w| w[0].0 > w[1].0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: ThresholdTable<'static, u8> = ThresholdTable::new(&[(10.0, 3), (5.0, 2), (0.0, 1)], 0);

    #[test]
    fn lookup_uses_inclusive_cutoffs() {
        assert_eq!(TABLE.lookup(10.0), 3);
        assert_eq!(TABLE.lookup(9.999), 2);
        assert_eq!(TABLE.lookup(5.0), 2);
        assert_eq!(TABLE.lookup(0.0), 1);
        assert_eq!(TABLE.lookup(-0.001), 0);
    }

    #[test]
    fn nan_falls_to_floor() {
        assert_eq!(TABLE.lookup(f64::NAN), 0);
    }

    #[test]
    fn detects_unsorted_steps() {
        assert!(TABLE.is_descending());
        let bad = ThresholdTable::new(&[(1.0, 1), (2.0, 2)], 0);
        assert!(!bad.is_descending());
    }
}
