//! `courtedge aggregate`: rebuild the weights snapshot.

use chrono::Utc;
use tabled::Tabled;

use super::output;
use super::AggregateArgs;
use crate::adapter::feed;
use crate::adapter::weights::JsonWeightsFile;
use crate::app::{recalibrate, Config, RetryPolicy, SnapshotHandle};
use crate::domain::calibration::factor_multiplier;
use crate::domain::WeightsSnapshot;
use crate::error::Result;

#[derive(Tabled)]
struct BinRow {
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Bin")]
    bin: String,
    #[tabled(rename = "N")]
    sample_size: u32,
    #[tabled(rename = "Win %")]
    win_rate: String,
    #[tabled(rename = "ROI")]
    roi: String,
    #[tabled(rename = "Calib Err")]
    calibration_error: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Mult")]
    multiplier: String,
}

/// Rebuild and store the snapshot, then print per-bin performance.
pub async fn execute(config: &Config, args: &AggregateArgs) -> Result<()> {
    let load = feed::load_wagers(&args.wagers).await?;
    let path = args.out.clone().unwrap_or_else(|| config.weights_path.clone());
    let repo = JsonWeightsFile::new(&path);
    let handle = SnapshotHandle::default();
    let retry = RetryPolicy::new(
        config.store.retry_attempts,
        config.store.retry_initial_delay(),
    );

    let snapshot = recalibrate(&load.records, &repo, &handle, retry, Utc::now()).await?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Performance by bin");
    output::table(rows(&snapshot, config.sizing.min_sample_size));

    println!();
    output::field("Wagers", load.records.len());
    if !load.skipped.is_empty() {
        output::field("Malformed", load.skipped.len());
    }
    output::field("Decided", snapshot.total_sample_size);
    output::field("Version", snapshot.version);
    output::field("Written to", path.display());
    output::success("Weights snapshot rebuilt");
    Ok(())
}

fn rows(snapshot: &WeightsSnapshot, min_sample: u32) -> Vec<BinRow> {
    snapshot
        .performance
        .iter()
        .flat_map(|(factor, bins)| {
            bins.iter().map(move |(bin, record)| {
                let multiplier = factor_multiplier(record, min_sample);
                BinRow {
                    factor: factor.to_string(),
                    bin: bin.clone(),
                    sample_size: record.sample_size,
                    win_rate: format!("{:.1}", record.win_rate),
                    roi: format!("{:+.1}%", record.roi),
                    calibration_error: format!("{:+.3}", record.calibration_error),
                    weight: snapshot
                        .weight(*factor, bin)
                        .map_or_else(|| "-".to_string(), |w| format!("{w:.2}")),
                    multiplier: format!("{multiplier:.3}"),
                }
            })
        })
        .collect()
}
