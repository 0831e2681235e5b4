//! Pick store adapters: write-once semantics, merge and file handling.

use courtedge::adapter::store::{JsonFileStore, MemoryStore};
use courtedge::app::{Config, Engine, GameEvaluation};
use courtedge::domain::{PassKind, Pick, WeightsSnapshot};
use courtedge::error::{Error, StoreError};
use courtedge::port::{PickStore, WriteOutcome};
use courtedge::testkit::domain::{fixed_now, prime_game, slate_date};

fn prime_pick(away: &str, home: &str) -> Pick {
    let engine = Engine::from_config(&Config::default()).unwrap();
    match engine.evaluate(
        &prime_game(away, home),
        &WeightsSnapshot::default(),
        slate_date(),
        fixed_now(),
    ) {
        GameEvaluation::Prime(pick) => *pick,
        other => panic!("expected a prime pick, got {other:?}"),
    }
}

fn unconfirmed(pick: &Pick) -> Pick {
    let mut partial = pick.clone();
    partial.spread_analysis = None;
    partial.confirmed_by.remove(&PassKind::Spread);
    partial
}

async fn exercise_write_once<S: PickStore>(store: &S) {
    let pick = prime_pick("Duke", "UNC");

    assert_eq!(store.save_pick(&pick).await.unwrap(), WriteOutcome::Created);
    assert_eq!(store.save_pick(&pick).await.unwrap(), WriteOutcome::Unchanged);

    let mut repriced = pick.clone();
    repriced.ev += 5.0;
    repriced.probability = 0.9;
    assert_eq!(store.save_pick(&repriced).await.unwrap(), WriteOutcome::Unchanged);

    let stored = store.get_pick(&pick.id).await.unwrap().unwrap();
    assert_eq!(stored.ev, pick.ev);
    assert_eq!(stored.probability, pick.probability);
}

async fn exercise_merge<S: PickStore>(store: &S) {
    let pick = prime_pick("Purdue", "Indiana");
    let partial = unconfirmed(&pick);

    assert_eq!(store.save_pick(&partial).await.unwrap(), WriteOutcome::Created);
    assert_eq!(store.save_pick(&pick).await.unwrap(), WriteOutcome::Merged);

    let stored = store.get_pick(&pick.id).await.unwrap().unwrap();
    assert_eq!(stored.spread_analysis, pick.spread_analysis);
    assert_eq!(stored.confirmed_by, pick.confirmed_by);

    // A later write without the analysis cannot remove it.
    assert_eq!(store.save_pick(&partial).await.unwrap(), WriteOutcome::Unchanged);
    let stored = store.get_pick(&pick.id).await.unwrap().unwrap();
    assert!(stored.spread_analysis.is_some());
}

#[tokio::test]
async fn memory_store_is_write_once() {
    let store = MemoryStore::new();
    exercise_write_once(&store).await;
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn memory_store_merges_confirmation() {
    exercise_merge(&MemoryStore::new()).await;
}

#[tokio::test]
async fn file_store_is_write_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("picks.json"));
    exercise_write_once(&store).await;
    assert_eq!(store.list_picks().await.unwrap().len(), 1);
}

#[tokio::test]
async fn file_store_merges_confirmation() {
    let dir = tempfile::tempdir().unwrap();
    exercise_merge(&JsonFileStore::new(dir.path().join("picks.json"))).await;
}

#[tokio::test]
async fn file_store_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("picks.json");
    let store = JsonFileStore::new(&path);

    assert!(store.list_picks().await.unwrap().is_empty());
    store.save_pick(&prime_pick("Duke", "UNC")).await.unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn file_store_document_is_keyed_by_pick_id() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("picks.json");
    let store = JsonFileStore::new(&path);
    let pick = prime_pick("Duke", "UNC");
    store.save_pick(&pick).await.unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let record = &raw[pick.id.as_str()];
    assert_eq!(record["team"], "Duke");
    assert_eq!(record["market"], "SPREAD");
    assert_eq!(record["conviction"], "MAX");
}

#[tokio::test]
async fn corrupt_document_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("picks.json");
    std::fs::write(&path, "[1, 2").unwrap();
    let store = JsonFileStore::new(&path);

    let err = store.save_pick(&prime_pick("Duke", "UNC")).await.unwrap_err();

    assert!(matches!(err, Error::Store(StoreError::Corrupt { .. })));
    assert!(!err.is_retryable());
}
