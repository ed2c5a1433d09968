use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::record::Artifact;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read artifact file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("artifact file {path} is not a valid artifact array")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Source of accepted artifacts. Called once per graph (re)build.
pub trait ArtifactStore: Send {
    fn list_accepted_artifacts(&self) -> Result<Vec<Artifact>, StoreError>;
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArtifactStore for JsonFileStore {
    fn list_accepted_artifacts(&self) -> Result<Vec<Artifact>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "artifact file missing, archive is empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<Value> =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        let artifacts = entries
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                serde_json::from_value(entry).unwrap_or_else(|error| {
                    warn!(position, "artifact entry is not an object, keeping it untitled: {error}");
                    Artifact::default()
                })
            })
            .collect::<Vec<Artifact>>();
        info!(
            path = %self.path.display(),
            count = artifacts.len(),
            "loaded accepted artifacts"
        );
        Ok(artifacts)
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    artifacts: Vec<Artifact>,
}

impl MemoryStore {
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        Self { artifacts }
    }
}

impl ArtifactStore for MemoryStore {
    fn list_accepted_artifacts(&self) -> Result<Vec<Artifact>, StoreError> {
        Ok(self.artifacts.clone())
    }
}
