//! Gate state machine over real predictions.

use courtedge::app::{Config, Engine};
use courtedge::domain::gate::{cover_probability, PassContext};
use courtedge::domain::{
    ConvictionTier, EdgeRules, EnsemblePrediction, Gate, GateConfig, GateState, GateVerdict,
    Market, MatchedGame, Prediction, RejectReason, Side, SourceId,
};
use courtedge::testkit::domain::{prime_game, GameBuilder, PRIMARY};

fn predict(game: &MatchedGame) -> EnsemblePrediction {
    let engine = Engine::from_config(&Config::default()).unwrap();
    match engine.predict(game) {
        Prediction::Ready(p) => p,
        Prediction::Insufficient(reason) => panic!("insufficient data: {reason}"),
    }
}

fn gate(config: GateConfig) -> Gate {
    Gate::new(config, SourceId::new(PRIMARY))
}

fn run(gate: &Gate, game: &MatchedGame) -> (GateState, GateVerdict) {
    let prediction = predict(game);
    let eligibility = EdgeRules::default().check(&prediction);
    let ctx = PassContext {
        game,
        prediction: &prediction,
        eligibility: &eligibility,
    };
    (gate.state(&ctx), gate.evaluate(&ctx))
}

#[test]
fn unseen_when_neither_pass_selects() {
    // No edge and no predicted scores.
    let game = GameBuilder::new("Duke", "UNC", -150, 130)
        .forecast(courtedge::testkit::domain::forecast(PRIMARY, 0.6))
        .forecast(courtedge::testkit::domain::forecast("haslametrics", 0.6))
        .build();

    let (state, verdict) = run(&gate(GateConfig::default()), &game);

    assert_eq!(state, GateState::Unseen);
    assert_eq!(verdict, GateVerdict::Rejected(RejectReason::NoSelection));
}

#[test]
fn ev_only_without_a_quoted_spread() {
    let mut game = prime_game("Duke", "UNC");
    game.spread = None;

    let (state, verdict) = run(&gate(GateConfig::default()), &game);

    assert_eq!(state.label(), "ev_only");
    assert_eq!(verdict, GateVerdict::Rejected(RejectReason::EvOnly));
}

#[test]
fn spread_only_when_ev_is_short() {
    let game = GameBuilder::new("Duke", "UNC", -150, 130)
        .primary(0.61, 75.0, 68.0)
        .secondary(0.61, 74.0, 68.0)
        .away_line(-3.5)
        .build();

    let (state, verdict) = run(&gate(GateConfig::default()), &game);

    assert_eq!(state.label(), "spread_only");
    assert_eq!(verdict, GateVerdict::Rejected(RejectReason::SpreadOnly));
}

#[test]
fn split_score_predictions_leave_spread_pass_silent() {
    let game = GameBuilder::new("Duke", "UNC", -130, 110)
        .primary(0.588, 75.0, 68.0)
        .secondary(0.588, 66.0, 68.0)
        .away_line(-3.5)
        .build();

    let (state, _) = run(&gate(GateConfig::default()), &game);

    assert_eq!(state.label(), "ev_only");
}

#[test]
fn both_same_side_resolves_to_prime() {
    let (state, verdict) = run(&gate(GateConfig::default()), &prime_game("Duke", "UNC"));

    assert_eq!(state.label(), "both_same_side");
    match verdict {
        GateVerdict::Prime(terms) => {
            assert_eq!(terms.side, Side::Away);
            assert_eq!(terms.conviction, ConvictionTier::Max);
            assert_eq!(terms.market, Market::Spread);
            assert!(terms.spread.confirmed);
            assert!((terms.spread.blended_margin - 6.9).abs() < 1e-9);
            assert!((terms.spread.primary_margin - 7.0).abs() < 1e-9);
        }
        other => panic!("expected prime, got {other:?}"),
    }
}

#[test]
fn spread_pass_requires_primary_to_cover() {
    // Blend clears the line, the primary source alone does not.
    let game = GameBuilder::new("Duke", "UNC", -130, 110)
        .primary(0.588, 72.0, 68.0)
        .secondary(0.588, 94.0, 68.0)
        .away_line(-4.5)
        .build();

    let (state, verdict) = run(&gate(GateConfig::default()), &game);

    assert_eq!(state.label(), "ev_only");
    assert_eq!(verdict, GateVerdict::Rejected(RejectReason::EvOnly));
}

#[test]
fn primary_covering_by_half_a_point_confirms() {
    let game = GameBuilder::new("Duke", "UNC", -130, 110)
        .primary(0.588, 73.0, 68.0)
        .secondary(0.588, 90.0, 68.0)
        .away_line(-4.5)
        .build();

    let (state, _) = run(&gate(GateConfig::default()), &game);

    assert_eq!(state.label(), "both_same_side");
}

#[test]
fn raising_the_floor_rejects_the_same_game() {
    let config = GateConfig {
        margin_floor: 3.5,
        skeptic_margin: 3.5,
        ats_margin: 3.5,
        ..GateConfig::default()
    };

    let (_, verdict) = run(&gate(config), &prime_game("Duke", "UNC"));

    assert!(matches!(
        verdict,
        GateVerdict::Rejected(RejectReason::MarginBelowFloor { floor, .. }) if floor == 3.5
    ));
}

#[test]
fn ats_upgrade_threshold_is_configurable() {
    let config = GateConfig {
        ats_margin: 5.0,
        ..GateConfig::default()
    };

    let (_, verdict) = run(&gate(config), &prime_game("Duke", "UNC"));

    match verdict {
        GateVerdict::Prime(terms) => {
            assert_eq!(terms.market, Market::Moneyline);
            assert_eq!(terms.odds.value(), -130);
        }
        other => panic!("expected prime, got {other:?}"),
    }
}

#[test]
fn invalid_ats_odds_reject_instead_of_panicking() {
    let config = GateConfig {
        ats_odds: 50,
        ..GateConfig::default()
    };

    let (_, verdict) = run(&gate(config), &prime_game("Duke", "UNC"));

    assert_eq!(
        verdict,
        GateVerdict::Rejected(RejectReason::InvalidAtsOdds { odds: 50 })
    );
}

#[test]
fn conviction_cut_points() {
    assert_eq!(ConvictionTier::from_margin(3.0), Some(ConvictionTier::Max));
    assert_eq!(ConvictionTier::from_margin(2.99), Some(ConvictionTier::Strong));
    assert_eq!(ConvictionTier::from_margin(2.5), Some(ConvictionTier::Strong));
    assert_eq!(ConvictionTier::from_margin(2.0), Some(ConvictionTier::Solid));
    assert_eq!(ConvictionTier::from_margin(1.6), Some(ConvictionTier::Base));
    assert_eq!(ConvictionTier::from_margin(1.59), None);
}

#[test]
fn cover_probability_grows_with_margin() {
    assert!((cover_probability(0.0) - 0.5).abs() < 1e-12);
    assert!(cover_probability(4.0) > cover_probability(2.0));
}
