//! JSON input feeds: matched games and settled wagers.
//!
//! Records are decoded one at a time so a single malformed game is skipped
//! rather than failing the whole batch. Only an empty or unparseable
//! document is an error.

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{MatchedGame, SettledWager};
use crate::error::{Error, Result};

/// Records decoded from a feed, plus the ones that were skipped.
#[derive(Debug, Clone)]
pub struct FeedLoad<T> {
    pub records: Vec<T>,
    /// `(index, reason)` for each record that failed to decode.
    pub skipped: Vec<(usize, String)>,
}

/// Decode a JSON array, skipping records that do not fit `T`.
pub fn parse_feed<T: DeserializeOwned>(json: &str, kind: &'static str) -> Result<FeedLoad<T>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    if values.is_empty() {
        return Err(Error::EmptyFeed);
    }

    let mut records = Vec::with_capacity(values.len());
    let mut skipped = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(feed = kind, index, error = %e, "Skipping malformed record");
                skipped.push((index, e.to_string()));
            }
        }
    }

    if records.is_empty() {
        return Err(Error::Parse(format!("no valid {kind} records in feed")));
    }
    Ok(FeedLoad { records, skipped })
}

/// Load the matched-game feed.
pub async fn load_games(path: &Path) -> Result<FeedLoad<MatchedGame>> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_feed(&json, "game")
}

/// Load the settled-wager corpus.
pub async fn load_wagers(path: &Path) -> Result<FeedLoad<SettledWager>> {
    let json = tokio::fs::read_to_string(path).await?;
    parse_feed(&json, "wager")
}
