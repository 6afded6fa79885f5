use async_trait::async_trait;
use thiserror::Error;

use crate::timetable::TimetableDocument;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A single persisted timetable document. Writes always replace the whole
/// document; there are no partial updates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the document does not exist yet.
    async fn fetch(&self) -> Result<Option<TimetableDocument>, StoreError>;

    async fn overwrite(&self, document: &TimetableDocument) -> Result<(), StoreError>;

    fn describe(&self) -> String;
}
