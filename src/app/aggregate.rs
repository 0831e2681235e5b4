//! Offline recalibration: settled wagers in, new weights snapshot out.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::retry::{with_retry, RetryPolicy};
use super::snapshot::SnapshotHandle;
use crate::domain::calibration::{aggregate, rebuild_snapshot};
use crate::domain::{SettledWager, WeightsSnapshot};
use crate::error::Result;
use crate::port::WeightsRepository;

/// Rebuild the snapshot from `wagers`, store it and make it current.
///
/// The version continues from whatever snapshot the repository holds. An
/// unreadable previous snapshot restarts versioning at 1. Wagers whose
/// amounts overflow are skipped with a warning.
pub async fn recalibrate<R: WeightsRepository>(
    wagers: &[SettledWager],
    repo: &R,
    handle: &SnapshotHandle,
    retry: RetryPolicy,
    now: DateTime<Utc>,
) -> Result<WeightsSnapshot> {
    let previous = match repo.load().await {
        Ok(previous) => previous,
        Err(e) => {
            warn!(error = %e, "Previous weights snapshot unreadable, starting at version 1");
            None
        }
    };

    let aggregation = aggregate(wagers);
    for &index in &aggregation.skipped {
        let id = wagers.get(index).and_then(|w| w.id.as_deref()).unwrap_or("-");
        warn!(index, id, "Wager amounts overflow, skipped");
    }

    let snapshot = rebuild_snapshot(aggregation.performance, previous.as_ref(), now);
    with_retry(retry, "save_weights", || repo.save(&snapshot)).await?;
    handle.swap(snapshot.clone());

    info!(
        version = snapshot.version,
        wagers = wagers.len(),
        skipped = aggregation.skipped.len(),
        samples = snapshot.total_sample_size,
        "Weights snapshot rebuilt"
    );
    Ok(snapshot)
}
