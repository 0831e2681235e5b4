//! `courtedge evaluate`: run the pipeline over one slate.

use chrono::{NaiveDate, Utc};
use tabled::Tabled;

use super::output;
use super::EvaluateArgs;
use crate::adapter::feed;
use crate::adapter::store::{JsonFileStore, MemoryStore};
use crate::adapter::weights::JsonWeightsFile;
use crate::app::{load_or_default, Config, Pipeline, Recommendation, RunOutput};
use crate::domain::{MatchedGame, Pick, WeightsSnapshot};
use crate::error::Result;
use crate::port::PickStore;

#[derive(Tabled)]
struct PickRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Pick")]
    team: String,
    #[tabled(rename = "Market")]
    market: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "MOS")]
    mos: String,
    #[tabled(rename = "EV")]
    ev: String,
    #[tabled(rename = "Units")]
    units: String,
    #[tabled(rename = "Tier")]
    conviction: String,
    #[tabled(rename = "Calibrated")]
    calibrated: String,
}

impl From<&Pick> for PickRow {
    fn from(pick: &Pick) -> Self {
        Self {
            game: pick.game_key.to_string(),
            team: format!("{} ({})", pick.team, pick.side),
            market: pick.market.to_string(),
            odds: pick.odds.to_string(),
            mos: format!("{:+.1}", pick.margin_over_spread),
            ev: format!("{:+.1}%", pick.ev),
            units: format!("{}u", pick.units),
            conviction: pick.conviction.to_string(),
            calibrated: format!("{}u {}", pick.stake.units, pick.stake.tier),
        }
    }
}

#[derive(Tabled)]
struct RecommendationRow {
    #[tabled(rename = "Game")]
    game: String,
    #[tabled(rename = "Side")]
    side: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Prob")]
    probability: String,
    #[tabled(rename = "EV")]
    ev: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

impl From<&Recommendation> for RecommendationRow {
    fn from(rec: &Recommendation) -> Self {
        let p = &rec.prediction;
        Self {
            game: rec.game.to_string(),
            side: p.best_side.to_string(),
            odds: p.best_odds.to_string(),
            probability: format!("{:.1}%", p.best_prob() * 100.0),
            ev: format!("{:+.1}%", p.best_ev),
            grade: p.grade.to_string(),
        }
    }
}

/// Evaluate a feed and print the ranked recommendations and prime picks.
pub async fn execute(config: &Config, args: &EvaluateArgs) -> Result<()> {
    let date = args.date.unwrap_or_else(|| Utc::now().date_naive());
    let load = feed::load_games(&args.games).await?;
    let snapshot = load_or_default(&JsonWeightsFile::new(&config.weights_path)).await;

    let result = if args.dry_run {
        run(config, MemoryStore::new(), &load.records, &snapshot, date).await?
    } else {
        let store = JsonFileStore::new(&config.store.path);
        run(config, store, &load.records, &snapshot, date).await?
    };

    output::header(env!("CARGO_PKG_VERSION"));
    output::section(&format!("Slate {date}"));
    output::field("Games", load.records.len() + load.skipped.len());
    if !load.skipped.is_empty() {
        output::field("Malformed", load.skipped.len());
    }
    output::field("Weights", snapshot_label(&snapshot));

    let report = &result.report;
    output::field("Insufficient", report.insufficient);
    output::field("Ineligible", report.ineligible);
    output::field("Rejected", report.rejected_total());
    for (code, count) in &report.rejected {
        output::note(&format!("{code}: {count}"));
    }
    output::field("Prime", report.prime);

    output::section("Recommendations");
    if result.recommendations.is_empty() {
        output::note("No bettable predictions.");
    } else {
        output::table(
            result
                .recommendations
                .iter()
                .map(RecommendationRow::from)
                .collect(),
        );
    }

    output::section("Prime picks");
    if result.picks.is_empty() {
        output::note("No games cleared both passes.");
    } else {
        output::table(result.picks.iter().map(PickRow::from).collect());
    }

    println!();
    if args.dry_run {
        output::warning("Dry run, nothing persisted");
    } else {
        output::field("Store", config.store.path.display());
        output::field(
            "Writes",
            format!(
                "{} created, {} merged, {} unchanged",
                report.created, report.merged, report.unchanged
            ),
        );
        if report.failed > 0 {
            output::error(&format!("{} picks failed to persist", report.failed));
        } else {
            output::success("Picks persisted");
        }
    }

    Ok(())
}

async fn run<S: PickStore>(
    config: &Config,
    store: S,
    games: &[MatchedGame],
    snapshot: &WeightsSnapshot,
    date: NaiveDate,
) -> Result<RunOutput> {
    let pipeline = Pipeline::from_config(config, store)?;
    Ok(pipeline.run(games, snapshot, date, Utc::now()).await)
}

fn snapshot_label(snapshot: &WeightsSnapshot) -> String {
    if snapshot.is_builtin() {
        "built-in".to_string()
    } else {
        format!(
            "v{} ({} settled wagers)",
            snapshot.version, snapshot.total_sample_size
        )
    }
}
