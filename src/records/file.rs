//! File-backed record store.
//!
//! Layout: `<root>/users/<ID>.json`, one pretty-printed document per record.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::id::is_well_formed;
use super::{RecordStore, StoreError, UserRecord};

const COLLECTION: &str = "users";

/// Document collection stored as JSON files on disk.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    collection_dir: PathBuf,
}

impl FileRecordStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            collection_dir: root.as_ref().join(COLLECTION),
        }
    }

    /// Ensures the collection directory exists.
    pub async fn init(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.collection_dir).await?;
        info!(dir = ?self.collection_dir, "Record store initialized");
        Ok(())
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.collection_dir.join(format!("{}.json", id))
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError> {
        let path = self.document_path(record.id.as_str());
        let body = serde_json::to_vec_pretty(record)?;

        // create_new makes the id check and the write one atomic step
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::Duplicate(record.id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(&body).await?;
        file.flush().await?;
        debug!(id = %record.id, "Record written");
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        if !is_well_formed(id) {
            return Ok(None);
        }

        match fs::read(self.document_path(id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
