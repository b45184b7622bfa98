//! File-backed cache of the published state
//!
//! Writes the latest published state as JSON so the next start can show
//! the last known collection before the first fetch completes.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use shared::{ProcessId, ResultRecord, process_debug};

use crate::core::PublishedState;
use crate::error::{ClientError, ClientResult};
use crate::traits::StatePersistence;

/// Real file implementation of `StatePersistence`
#[derive(Debug, Clone)]
pub struct RealFilePersistence {
    path: PathBuf,
}

/// Persistence disabled
pub type NoPersistence = Option<RealFilePersistence>;

impl RealFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StatePersistence for RealFilePersistence {
    async fn load(&self) -> ClientResult<Option<Vec<ResultRecord>>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let state: PublishedState = serde_json::from_slice(&content).map_err(|e| ClientError::PersistenceError {
            message: format!("{}: {e}", self.path.display()),
        })?;

        process_debug!(ProcessId::current(), "💾 Loaded {} cached results", state.results.len());
        Ok(Some(state.results))
    }

    async fn save(&self, state: &PublishedState) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        // Write-then-rename keeps the cache readable if we die mid-write
        let temp = self.temp_path();
        fs::write(&temp, serde_json::to_vec(state)?).await?;
        fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl<P: StatePersistence> StatePersistence for Option<P> {
    async fn load(&self) -> ClientResult<Option<Vec<ResultRecord>>> {
        match self {
            Some(persistence) => persistence.load().await,
            None => Ok(None),
        }
    }

    async fn save(&self, state: &PublishedState) -> ClientResult<()> {
        match self {
            Some(persistence) => persistence.save(state).await,
            None => Ok(()),
        }
    }
}
