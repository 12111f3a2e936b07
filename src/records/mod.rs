//! Records Module
//!
//! User records, their identifiers, and the stores that persist them.

mod file;
mod id;
mod memory;
mod model;
mod store;

use std::sync::Arc;

use tracing::{info, warn};

pub use file::FileRecordStore;
pub use id::{RecordId, ID_LENGTH};
pub use memory::MemoryRecordStore;
pub use model::{ContactDetails, RecordKind, StoredImage, UserDetails, UserRecord};
pub use store::{RecordStore, StoreError};

/// How many fresh identifiers `create` draws before giving up.
pub const MAX_ID_ATTEMPTS: usize = 5;

/// Front door to the record store: id generation plus lookups.
#[derive(Clone)]
pub struct Records {
    store: Arc<dyn RecordStore>,
}

impl Records {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stores a new record under a freshly generated id.
    ///
    /// A duplicate id draws a new one, up to [`MAX_ID_ATTEMPTS`] times.
    pub async fn create(&self, kind: RecordKind) -> Result<UserRecord, StoreError> {
        let mut record = UserRecord {
            id: RecordId::generate(),
            kind,
        };

        let mut attempt = 1;
        loop {
            match self.store.insert(&record).await {
                Ok(()) => {
                    info!(id = %record.id, "Record created");
                    return Ok(record);
                }
                Err(StoreError::Duplicate(taken)) if attempt < MAX_ID_ATTEMPTS => {
                    warn!(id = %taken, attempt, "Record id already taken, retrying");
                    record.id = RecordId::generate();
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        self.store.find_by_id(id).await
    }
}
