//! Configuration loading and validation from TOML files.

use std::fs;
use std::path::PathBuf;

use courtedge::app::Config;
use courtedge::domain::{Factor, SourceId};
use courtedge::error::{ConfigError, Error};
use rust_decimal_macros::dec;
use tempfile::TempDir;

fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

fn expect_invalid(toml: &str, expected: &str) {
    let (_dir, path) = write_temp_config(toml);
    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue { field, .. })) if field == expected => {}
        Err(err) => panic!("expected invalid {expected}, got {err}"),
        Ok(_) => panic!("expected invalid {expected} to be rejected"),
    }
}

#[test]
fn full_config_round_trips() {
    let toml = r#"
weights_path = "state/weights.json"

[logging]
level = "debug"
format = "json"

[[ensemble.sources]]
source = "dratings"
weight = 0.7

[[ensemble.sources]]
source = "haslametrics"
weight = 0.3

[edge]
min_ev = 4.0
require_agreement = false

[sizing]
min_sample_size = 40
f_grade_cap = 0.25

[sizing.factor_exponents]
odds = 0.6
grade = 0.4

[gate]
margin_floor = 1.8
ats_margin = 2.5

[store]
path = "state/picks.json"
retry_attempts = 5
"#;
    let (_dir, path) = write_temp_config(toml);
    let config = Config::load(&path).unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.ensemble.sources.len(), 2);
    assert_eq!(config.ensemble.primary().unwrap().source, SourceId::new("dratings"));
    assert!((config.ensemble.sources[1].weight - 0.3).abs() < 1e-12);
    assert_eq!(config.edge.min_ev, 4.0);
    assert!(!config.edge.require_agreement);
    assert_eq!(config.edge.max_odds, 300);
    assert_eq!(config.sizing.min_sample_size, 40);
    assert_eq!(config.sizing.f_grade_cap, dec!(0.25));
    assert_eq!(config.sizing.factor_exponents.get(&Factor::Odds), Some(&0.6));
    assert_eq!(config.sizing.factor_exponents.get(&Factor::Probability), None);
    assert_eq!(config.gate.margin_floor, 1.8);
    assert_eq!(config.gate.skeptic_ev, 10.0);
    assert_eq!(config.store.retry_attempts, 5);
    assert_eq!(config.store.retry_initial_delay_ms, 2000);
}

#[test]
fn empty_file_is_valid() {
    let (_dir, path) = write_temp_config("");
    let config = Config::load(&path).unwrap();
    assert_eq!(config.ensemble.sources.len(), 2);
    assert_eq!(config.gate.ats_odds, -110);
}

#[test]
fn rejects_weights_that_do_not_sum_to_one() {
    expect_invalid(
        r#"
[[ensemble.sources]]
source = "dratings"
weight = 0.9

[[ensemble.sources]]
source = "haslametrics"
weight = 0.2
"#,
        "ensemble.sources",
    );
}

#[test]
fn rejects_single_source() {
    expect_invalid(
        r#"
[[ensemble.sources]]
source = "dratings"
weight = 1.0
"#,
        "ensemble.sources",
    );
}

#[test]
fn rejects_duplicate_sources() {
    expect_invalid(
        r#"
[[ensemble.sources]]
source = "dratings"
weight = 0.5

[[ensemble.sources]]
source = "dratings"
weight = 0.5
"#,
        "ensemble.sources",
    );
}

#[test]
fn rejects_tolerance_outside_range() {
    expect_invalid(
        "[ensemble]\nprobability_tolerance = 0.5\n",
        "ensemble.probability_tolerance",
    );
}

#[test]
fn rejects_unordered_gate_thresholds() {
    expect_invalid("[gate]\nmargin_floor = 2.5\n", "gate.skeptic_margin");
    expect_invalid(
        "[gate]\nmargin_floor = 1.6\nats_margin = 1.0\n",
        "gate.ats_margin",
    );
}

#[test]
fn rejects_odds_bounds_inside_the_gap() {
    expect_invalid("[edge]\nmin_odds = -50\n", "edge.min_odds");
}

#[test]
fn rejects_side_exponent() {
    expect_invalid(
        "[sizing.factor_exponents]\nside = 0.2\n",
        "sizing.factor_exponents",
    );
}

#[test]
fn rejects_zero_retry_attempts() {
    expect_invalid("[store]\nretry_attempts = 0\n", "store.retry_attempts");
}

#[test]
fn rejects_unknown_log_format() {
    expect_invalid("[logging]\nformat = \"xml\"\n", "logging.format");
}

#[test]
fn reports_parse_errors() {
    let (_dir, path) = write_temp_config("[gate\nmargin_floor = ");
    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn example_config_matches_defaults() {
    let example = Config::parse(include_str!("../config.toml.example")).unwrap();
    example.validate().unwrap();

    let defaults = Config::default();
    assert_eq!(example.ensemble.sources, defaults.ensemble.sources);
    assert_eq!(example.sizing.factor_exponents, defaults.sizing.factor_exponents);
    assert_eq!(example.sizing.max_contributions, defaults.sizing.max_contributions);
    assert_eq!(example.gate.ats_odds, defaults.gate.ats_odds);
    assert_eq!(example.store.path, defaults.store.path);
}
