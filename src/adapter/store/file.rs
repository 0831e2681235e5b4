//! JSON document pick store.
//!
//! The whole store is one JSON object mapping pick id to record. Each save
//! reads the document, applies the write-once rule and writes it back via a
//! temporary file and rename.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;

use super::write_once;
use crate::adapter::atomic::replace_file;
use crate::domain::{Pick, PickId};
use crate::error::{Result, StoreError};
use crate::port::{PickStore, WriteOutcome};

/// File-backed pick store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_document(&self) -> Result<BTreeMap<PickId, Pick>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.display_path(),
                    source,
                }
                .into())
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| {
            StoreError::Corrupt {
                path: self.display_path(),
                source,
            }
            .into()
        })
    }

    async fn write_document(&self, picks: &BTreeMap<PickId, Pick>) -> Result<()> {
        let json = serde_json::to_vec_pretty(picks)?;
        replace_file(&self.path, &json)
            .await
            .map_err(|source| StoreError::Write {
                path: self.display_path(),
                source,
            })?;
        Ok(())
    }
}

impl PickStore for JsonFileStore {
    async fn save_pick(&self, pick: &Pick) -> Result<WriteOutcome> {
        let _guard = self.lock.lock().await;
        let mut picks = self.read_document().await?;
        let outcome = write_once(&mut picks, pick);
        if outcome != WriteOutcome::Unchanged {
            self.write_document(&picks).await?;
        }
        Ok(outcome)
    }

    async fn get_pick(&self, id: &PickId) -> Result<Option<Pick>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.remove(id))
    }

    async fn list_picks(&self) -> Result<Vec<Pick>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_document().await?.into_values().collect())
    }
}
