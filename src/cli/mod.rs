//! Command-line interface definitions.

pub mod aggregate;
pub mod check;
pub mod evaluate;
pub mod output;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Courtedge - Forecast-ensemble edge and calibrated staking for college basketball.
#[derive(Parser, Debug)]
#[command(name = "courtedge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a matched-game feed and persist prime picks
    Evaluate(EvaluateArgs),

    /// Rebuild the weights snapshot from settled wagers
    Aggregate(AggregateArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `courtedge check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// JSON array of matched games
    #[arg(long)]
    pub games: PathBuf,

    /// Slate date used in pick ids (defaults to today, UTC)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Evaluate without writing to the pick store
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `aggregate` subcommand.
#[derive(Parser, Debug)]
pub struct AggregateArgs {
    /// JSON array of settled wagers
    #[arg(long)]
    pub wagers: PathBuf,

    /// Where to write the snapshot (defaults to `weights_path`)
    #[arg(long)]
    pub out: Option<PathBuf>,
}
