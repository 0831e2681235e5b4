//! Market odds conversion.
//!
//! American odds are the quoting convention for every market the engine
//! consumes. Decimal odds are accepted at the boundary and converted: a JSON
//! integer is read as American, a number with a fractional part as decimal.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Standard stake used for expected-value math; EV is read as a percentage.
pub const EV_STAKE: f64 = 100.0;

/// Standard juice assumed for against-the-spread wagers.
pub const STANDARD_SPREAD_ODDS: i32 = -110;

/// American moneyline odds.
///
/// Valid values are `>= +100` or `<= -100`. Construction goes through
/// [`AmericanOdds::try_new`] so the conversion formulas never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "QuotedOdds", into = "i32")]
pub struct AmericanOdds(i32);

/// Odds as they arrive on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum QuotedOdds {
    American(i32),
    Decimal(f64),
}

impl AmericanOdds {
    /// Validate and wrap an American odds value.
    pub fn try_new(odds: i32) -> Result<Self, DomainError> {
        if odds.unsigned_abs() < 100 {
            return Err(DomainError::InvalidOdds { odds });
        }
        Ok(Self(odds))
    }

    /// Convert decimal odds (e.g. 2.5) to the nearest American value.
    pub fn try_from_decimal(decimal: f64) -> Result<Self, DomainError> {
        if !decimal.is_finite() || decimal <= 1.0 {
            return Err(DomainError::InvalidDecimalOdds { odds: decimal });
        }
        let american = if decimal >= 2.0 {
            (decimal - 1.0) * 100.0
        } else {
            -100.0 / (decimal - 1.0)
        }
        .round();
        if american.abs() > f64::from(i32::MAX) {
            return Err(DomainError::InvalidDecimalOdds { odds: decimal });
        }
        Self::try_new(american as i32)
    }

    /// The raw American value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Probability implied by the price, vig included.
    #[must_use]
    pub fn implied_probability(self) -> f64 {
        let o = f64::from(self.0);
        if self.0 > 0 {
            100.0 / (o + 100.0)
        } else {
            o.abs() / (o.abs() + 100.0)
        }
    }

    /// Decimal payout per unit staked, stake included.
    #[must_use]
    pub fn decimal(self) -> f64 {
        let o = f64::from(self.0);
        if self.0 > 0 {
            1.0 + o / 100.0
        } else {
            1.0 + 100.0 / o.abs()
        }
    }

    /// Expected value, in percent of stake, of backing this price at
    /// `probability`.
    #[must_use]
    pub fn expected_value(self, probability: f64) -> f64 {
        probability * self.decimal() * EV_STAKE - EV_STAKE
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = DomainError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl TryFrom<QuotedOdds> for AmericanOdds {
    type Error = DomainError;

    fn try_from(value: QuotedOdds) -> Result<Self, Self::Error> {
        match value {
            QuotedOdds::American(odds) => Self::try_new(odds),
            QuotedOdds::Decimal(decimal) => Self::try_from_decimal(decimal),
        }
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn odds(v: i32) -> AmericanOdds {
        AmericanOdds::try_new(v).unwrap()
    }

    #[test]
    fn rejects_odds_inside_plus_minus_100() {
        assert!(AmericanOdds::try_new(0).is_err());
        assert!(AmericanOdds::try_new(99).is_err());
        assert!(AmericanOdds::try_new(-99).is_err());
        assert!(AmericanOdds::try_new(100).is_ok());
        assert!(AmericanOdds::try_new(-100).is_ok());
    }

    #[test]
    fn extreme_values_do_not_overflow() {
        assert_eq!(AmericanOdds::try_new(i32::MIN).unwrap().value(), i32::MIN);
        assert!(AmericanOdds::try_new(i32::MAX).is_ok());
    }

    #[test]
    fn implied_probability_matches_both_conventions() {
        assert!((odds(-150).implied_probability() - 0.60).abs() < 1e-9);
        assert!((odds(150).implied_probability() - 0.40).abs() < 1e-9);
        assert!((odds(-110).implied_probability() - 0.5238).abs() < 1e-4);
    }

    #[test]
    fn decimal_odds_conversion() {
        assert!((odds(150).decimal() - 2.5).abs() < 1e-9);
        assert!((odds(-200).decimal() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn expected_value_at_fair_price_is_zero() {
        let ev = odds(-110).expected_value(0.5238);
        assert!(ev.abs() < 0.5, "ev = {ev}");
    }

    #[test]
    fn expected_value_for_underdog() {
        let ev = odds(150).expected_value(0.45);
        assert!((ev - 12.5).abs() < 1e-9);
    }

    #[test]
    fn decimal_input_round_trips_to_american() {
        assert_eq!(AmericanOdds::try_from_decimal(2.5).unwrap().value(), 150);
        assert_eq!(AmericanOdds::try_from_decimal(1.5).unwrap().value(), -200);
        assert!(AmericanOdds::try_from_decimal(1.0).is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok: AmericanOdds = serde_json::from_str("-150").unwrap();
        assert_eq!(ok.value(), -150);
        assert!(serde_json::from_str::<AmericanOdds>("50").is_err());
    }

    #[test]
    fn deserialize_accepts_decimal_prices() {
        let dog: AmericanOdds = serde_json::from_str("2.5").unwrap();
        assert_eq!(dog.value(), 150);
        let fav: AmericanOdds = serde_json::from_str("1.5").unwrap();
        assert_eq!(fav.value(), -200);
        assert!(serde_json::from_str::<AmericanOdds>("1.0").is_err());
        assert!(serde_json::from_str::<AmericanOdds>("1e300").is_err());
        // Serializes back as American.
        assert_eq!(serde_json::to_string(&dog).unwrap(), "150");
    }

    #[test]
    fn display_signs_underdogs() {
        assert_eq!(odds(120).to_string(), "+120");
        assert_eq!(odds(-120).to_string(), "-120");
    }
}
