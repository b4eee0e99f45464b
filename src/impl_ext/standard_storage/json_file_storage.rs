use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use fractic_server_error::ServerError;

use crate::{
    entities::{QueueStorage, SyncQueueItem},
    errors::{InvalidJson, QueueStorageFailed, ReadError, WriteError},
};

/// Queue persisted as a single JSON array on disk. A missing file is an empty
/// queue. Saves go through a sibling temp file and a rename, so a crash
/// mid-write leaves the previous list intact.
#[derive(Debug, Clone)]
pub struct JsonFileQueueStorage {
    path: PathBuf,
}

impl JsonFileQueueStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl QueueStorage for JsonFileQueueStorage {
    async fn load(&self) -> Result<Vec<SyncQueueItem>, ServerError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(s) => serde_json::from_str(&s).map_err(|e| InvalidJson::with_debug("SyncQueue", &e)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(ReadError::with_debug(&e)),
        }
    }

    async fn save(&self, items: &[SyncQueueItem]) -> Result<(), ServerError> {
        let json = serde_json::to_string_pretty(items)
            .map_err(|e| QueueStorageFailed::with_debug("encode", &e))?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| WriteError::with_debug(&e))
    }

    async fn clear(&self) -> Result<(), ServerError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(WriteError::with_debug(&e)),
        }
    }
}
