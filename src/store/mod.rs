pub mod fs;

use async_trait::async_trait;

use crate::models::{FormRecord, Submission};

pub use fs::FsFormStore;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Serialize(serde_json::Error),
    Corrupt { id: String, source: serde_json::Error },
    /// A record with this id is already stored.
    AlreadyExists(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(err) => write!(f, "{err}"),
            StoreError::Serialize(err) => write!(f, "Serialization failed: {err}"),
            StoreError::Corrupt { id, source } => write!(f, "Stored form {id} is unreadable: {source}"),
            StoreError::AlreadyExists(id) => write!(f, "Form {id} already exists"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            StoreError::Serialize(err) => Some(err),
            StoreError::Corrupt { source, .. } => Some(source),
            StoreError::AlreadyExists(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize(err)
    }
}

/// Persistence for form records. Records are created once, read many times,
/// and only ever mutated by appending submissions.
#[async_trait]
pub trait FormStore: Send + Sync {
    /// Make sure the storage location exists. Safe to call repeatedly.
    async fn ensure_ready(&self) -> Result<(), StoreError>;

    /// Persist a new record. Fails with `AlreadyExists` instead of
    /// overwriting an existing record with the same id.
    async fn insert(&self, record: &FormRecord) -> Result<(), StoreError>;

    async fn get(&self, id: &str) -> Result<Option<FormRecord>, StoreError>;

    /// All readable records, newest first.
    async fn list(&self) -> Result<Vec<FormRecord>, StoreError>;

    /// Append to a record's submission log. Returns `None` if the form does not exist.
    async fn append_submission(
        &self,
        form_id: &str,
        submission: Submission,
    ) -> Result<Option<FormRecord>, StoreError>;
}
