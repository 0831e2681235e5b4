//! Boundary tests for EV, grades and classifier bins.

use courtedge::domain::{
    AmericanOdds, BetClassification, EvRange, Factor, Grade, OddsRange, ProbRange, Side,
};
use courtedge::testkit::domain::odds;

#[test]
fn ev_formula_matches_reference_points() {
    let even = odds(-110).expected_value(0.5238);
    assert!(even.abs() < 0.5, "EV at -110/0.5238 was {even}");

    let dog = odds(150).expected_value(0.45);
    assert!((dog - 12.5).abs() < 1e-9);
}

#[test]
fn grade_cut_points() {
    let cases = [
        (5.0, Grade::A),
        (4.99, Grade::B),
        (3.0, Grade::B),
        (2.99, Grade::C),
        (1.0, Grade::C),
        (0.99, Grade::D),
        (-3.0, Grade::D),
        (-3.01, Grade::F),
    ];
    for (ev, grade) in cases {
        assert_eq!(Grade::from_ev(ev), grade, "grade({ev})");
    }
}

#[test]
fn grade_never_improves_as_ev_falls() {
    let mut previous = Grade::A;
    let mut ev = 30.0;
    while ev > -30.0 {
        let grade = Grade::from_ev(ev);
        assert!(grade >= previous, "grade({ev}) = {grade:?} after {previous:?}");
        previous = grade;
        ev -= 0.01;
    }
}

#[test]
fn odds_cut_points() {
    let cases = [
        (-110, OddsRange::Pickem),
        (-111, OddsRange::SlightFav),
        (-149, OddsRange::SlightFav),
        (-150, OddsRange::ModFav),
        (-199, OddsRange::ModFav),
        (-200, OddsRange::BigFav),
        (-299, OddsRange::BigFav),
        (-300, OddsRange::HeavyFav),
        (-1000, OddsRange::HeavyFav),
        (100, OddsRange::Pickem),
        (110, OddsRange::Pickem),
        (111, OddsRange::SlightDog),
        (199, OddsRange::SlightDog),
        (200, OddsRange::BigDog),
        (450, OddsRange::BigDog),
    ];
    for (value, range) in cases {
        assert_eq!(OddsRange::of(odds(value)), range, "oddsRange({value})");
    }
}

#[test]
fn probability_cut_points() {
    assert_eq!(ProbRange::of(0.70), ProbRange::High);
    assert_eq!(ProbRange::of(0.6999), ProbRange::Good);
    assert_eq!(ProbRange::of(0.60), ProbRange::Good);
    assert_eq!(ProbRange::of(0.5999), ProbRange::Mod);
    assert_eq!(ProbRange::of(0.55), ProbRange::Mod);
    assert_eq!(ProbRange::of(0.5499), ProbRange::Low);
    assert_eq!(ProbRange::of(0.0), ProbRange::Low);
}

#[test]
fn ev_cut_points() {
    assert_eq!(EvRange::of(20.0), EvRange::VeryHigh);
    assert_eq!(EvRange::of(19.99), EvRange::High);
    assert_eq!(EvRange::of(15.0), EvRange::High);
    assert_eq!(EvRange::of(10.0), EvRange::Good);
    assert_eq!(EvRange::of(5.0), EvRange::Mod);
    assert_eq!(EvRange::of(0.0), EvRange::Low);
    assert_eq!(EvRange::of(-0.01), EvRange::Neg);
}

#[test]
fn every_valid_price_lands_in_exactly_one_bin() {
    for value in (-2000..=2000).filter(|v: &i32| v.abs() >= 100) {
        let price = AmericanOdds::try_new(value).unwrap();
        let range = OddsRange::of(price);
        assert_eq!(
            OddsRange::ALL.iter().filter(|r| **r == range).count(),
            1,
            "{value}"
        );
    }
}

#[test]
fn classification_exposes_a_bin_per_factor() {
    let c = BetClassification::from_parts(Grade::B, odds(-130), 0.588, 4.03, Side::Away);
    assert_eq!(c.bin(Factor::Grade), "B");
    assert_eq!(c.bin(Factor::Odds), "SLIGHT_FAV");
    assert_eq!(c.bin(Factor::Probability), "MOD");
    assert_eq!(c.bin(Factor::Ev), "LOW");
    assert_eq!(c.bin(Factor::Side), "AWAY");
    for factor in Factor::ALL {
        assert!(factor.bins().contains(&c.bin(factor)), "{factor}");
    }
}
