//! Record store trait.

use async_trait::async_trait;
use thiserror::Error;

use super::UserRecord;

/// Failures reported by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A record with this id already exists
    #[error("duplicate record id: {0}")]
    Duplicate(String),

    #[error("record store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("record encoding error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Document collection of user records keyed by id.
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared by
/// all in-flight requests.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert a record under its id.
    ///
    /// # Returns
    /// * `Err(StoreError::Duplicate)` - the id is already taken
    async fn insert(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Look a record up by id. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<UserRecord>, StoreError>;
}
