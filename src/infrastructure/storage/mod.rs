use crate::domain::announcement::model::CompletedRecord;
use std::path::PathBuf;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("record not found")]
    NotFound,
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Append-only JSON file of completed announcement records.
///
/// The whole file is one JSON array; every mutation is a serialized
/// read-modify-write under the store mutex, so concurrent appends
/// cannot interleave. A missing or unparseable file reads as empty
/// rather than failing the pipeline; any other I/O failure is
/// surfaced, so a mutation can never clobber records it could not
/// read.
pub struct AnnouncementStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl AnnouncementStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub async fn append(&self, record: &CompletedRecord) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.push(record.clone());
        self.persist(&records).await
    }

    pub async fn list(&self) -> Result<Vec<CompletedRecord>, StorageError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            return Err(StorageError::NotFound);
        }
        self.persist(&records).await
    }

    async fn load(&self) -> Result<Vec<CompletedRecord>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                tracing::warn!(path = %self.path.display(), error = %e, "Record file unreadable, starting empty");
                Vec::new()
            })),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn persist(&self, records: &[CompletedRecord]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(records)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
