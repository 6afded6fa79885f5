use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::sync::document_store::DocumentStore;
use crate::timetable::{Timetable, TimetableDocument};

/// Polls the store and reports every change of the persisted document,
/// including changes this client wrote itself.
pub struct Watcher {
    store: Arc<dyn DocumentStore>,
    last_seen: Option<TimetableDocument>,
}

impl Watcher {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store, last_seen: None }
    }

    /// Fetches once; returns the new mapping when the document changed
    /// since the previous poll. Absent documents and fetch errors yield `None`.
    pub async fn poll_once(&mut self) -> Option<Timetable> {
        match self.store.fetch().await {
            Ok(Some(document)) => {
                if self.last_seen.as_ref() == Some(&document) {
                    return None;
                }
                let data = document.data.clone();
                self.last_seen = Some(document);
                Some(data)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Watcher failed to fetch {}: {}", self.store.describe(), e);
                None
            }
        }
    }

    pub fn spawn(mut self, interval: Duration) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Some(snapshot) = self.poll_once().await {
                    tracing::debug!("Change notification with {} classes", snapshot.total_entries());
                    if tx.send(snapshot).is_err() {
                        break;
                    }
                }
            }
        });

        Subscription { receiver: rx, handle }
    }
}

/// Live change feed; the polling task stops when this is dropped.
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<Timetable>,
    handle: JoinHandle<()>,
}

impl Subscription {
    pub fn try_next(&mut self) -> Option<Timetable> {
        self.receiver.try_recv().ok()
    }

    pub async fn next(&mut self) -> Option<Timetable> {
        self.receiver.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
