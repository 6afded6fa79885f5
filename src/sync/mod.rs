pub mod document_store;
pub mod rest_store;
pub mod sync_engine;
pub mod watcher;
