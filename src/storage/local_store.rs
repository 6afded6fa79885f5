use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};

use crate::sync::document_store::{DocumentStore, StoreError};
use crate::timetable::TimetableDocument;

/// SQLite-backed document store for working without the remote service.
/// One row per document id, holding the whole document as JSON.
pub struct SqliteDocumentStore {
    conn: Mutex<Connection>,
    document_id: String,
}

impl SqliteDocumentStore {
    pub fn new(conn: Connection, document_id: impl Into<String>) -> Self {
        Self {
            conn: Mutex::new(conn),
            document_id: document_id.into(),
        }
    }

    pub fn open(path: &Path, document_id: impl Into<String>) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Unavailable(format!("{}: {}", parent.display(), e)))?;
        }
        let store = Self::new(Connection::open(path)?, document_id);
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS documents (
                    id TEXT PRIMARY KEY,
                    data TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )",
                [],
            )?;
            Ok(())
        })
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        self.with_conn(|conn| {
            let count: i32 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [table_name],
                |row| row.get(0),
            )?;
            Ok(count > 0)
        })
        .unwrap_or(false)
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let conn = self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("database lock poisoned".to_string()))?;
        f(&conn)
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn fetch(&self) -> Result<Option<TimetableDocument>, StoreError> {
        let data: Option<String> = self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT data FROM documents WHERE id = ?1")?;
            Ok(stmt.query_row([&self.document_id], |row| row.get(0)).optional()?)
        })?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn overwrite(&self, document: &TimetableDocument) -> Result<(), StoreError> {
        let data = serde_json::to_string(document)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO documents (id, data, updated_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![&self.document_id, &data, chrono::Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })?;
        tracing::debug!("Stored {} classes locally", document.data.total_entries());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("local:{}", self.document_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timetable::{ClassEntry, Timetable, Weekday};
    use chrono::NaiveTime;

    fn create_test_store() -> SqliteDocumentStore {
        let conn = Connection::open_in_memory().unwrap();
        let store = SqliteDocumentStore::new(conn, "timetables/main");
        store.initialize().unwrap();
        store
    }

    fn sample_document() -> TimetableDocument {
        let mut timetable = Timetable::new();
        timetable.add(ClassEntry {
            name: "Physiology (Sem 1)".to_string(),
            room: None,
            day: Weekday::Thursday,
            start_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
        });
        TimetableDocument::new(timetable)
    }

    #[test]
    fn creates_database_schema() {
        let store = create_test_store();
        assert!(store.table_exists("documents"));
    }

    #[tokio::test]
    async fn missing_document_is_none() {
        let store = create_test_store();
        assert_eq!(store.fetch().await.unwrap(), None);
    }

    #[tokio::test]
    async fn stored_document_reads_back() {
        let store = create_test_store();
        let document = sample_document();

        store.overwrite(&document).await.unwrap();

        assert_eq!(store.fetch().await.unwrap(), Some(document));
    }

    #[tokio::test]
    async fn overwrite_replaces_previous_document() {
        let store = create_test_store();
        store.overwrite(&sample_document()).await.unwrap();

        store.overwrite(&TimetableDocument::default()).await.unwrap();

        let loaded = store.fetch().await.unwrap().unwrap();
        assert!(loaded.data.is_empty());
    }

    #[tokio::test]
    async fn documents_are_isolated_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.db");
        let first = SqliteDocumentStore::open(&path, "first").unwrap();
        let second = SqliteDocumentStore::open(&path, "second").unwrap();

        first.overwrite(&sample_document()).await.unwrap();

        assert!(first.fetch().await.unwrap().is_some());
        assert!(second.fetch().await.unwrap().is_none());
    }
}
