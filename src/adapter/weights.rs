//! JSON file holding the weights snapshot.
//!
//! Saves replace the file through a temp file and rename, so a concurrent
//! `load` sees either the previous snapshot or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::atomic::replace_file;
use crate::domain::WeightsSnapshot;
use crate::error::{Result, StoreError};
use crate::port::WeightsRepository;

/// Weights snapshot stored as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonWeightsFile {
    path: PathBuf,
}

impl JsonWeightsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WeightsRepository for JsonWeightsFile {
    async fn load(&self) -> Result<Option<WeightsSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.display().to_string(),
                    source,
                }
                .into())
            }
        };
        let snapshot = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source,
        })?;
        Ok(Some(snapshot))
    }

    async fn save(&self, snapshot: &WeightsSnapshot) -> Result<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        replace_file(&self.path, &json)
            .await
            .map_err(|source| StoreError::Write {
                path: self.path.display().to_string(),
                source,
            })?;
        Ok(())
    }
}
