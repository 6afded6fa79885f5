use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::storage::config::{Config, StoreBackend};
use crate::storage::local_store::SqliteDocumentStore;
use crate::sync::document_store::{DocumentStore, StoreError};
use crate::sync::rest_store::RestDocumentStore;
use crate::sync::watcher::{Subscription, Watcher};
use crate::timetable::{Timetable, TimetableDocument};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

pub struct SyncEngine {
    store: Arc<dyn DocumentStore>,
    poll_interval: Duration,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn DocumentStore>, poll_interval: Duration) -> Self {
        Self { store, poll_interval }
    }

    pub fn from_config(config: &Config, backend: StoreBackend) -> Result<Self, SyncError> {
        let store: Arc<dyn DocumentStore> = match backend {
            StoreBackend::Remote => Arc::new(RestDocumentStore::from_config(&config.store)),
            StoreBackend::Local => Arc::new(SqliteDocumentStore::open(
                &config.local.database,
                config.store.document.clone(),
            )?),
        };
        tracing::info!("Using document store {}", store.describe());
        Ok(Self::new(store, config.store.poll_interval()))
    }

    /// Reads the document, creating it as `{ data: {} }` when it is absent.
    pub async fn load(&self) -> Result<Timetable, SyncError> {
        match self.store.fetch().await? {
            Some(document) => {
                tracing::info!("Loaded {} classes", document.data.total_entries());
                Ok(document.data)
            }
            None => {
                tracing::info!("No timetable yet, initializing an empty one");
                self.store.overwrite(&TimetableDocument::default()).await?;
                Ok(Timetable::new())
            }
        }
    }

    /// Replaces the whole remote document with `timetable`.
    pub async fn save(&self, timetable: &Timetable) -> Result<(), SyncError> {
        let document = TimetableDocument::new(timetable.clone());
        match self.store.overwrite(&document).await {
            Ok(()) => {
                tracing::info!("Timetable saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error saving timetable: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn subscribe(&self) -> Subscription {
        Watcher::new(self.store.clone()).spawn(self.poll_interval)
    }
}
