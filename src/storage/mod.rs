pub mod config;
pub mod local_store;
