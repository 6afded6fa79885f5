pub mod timetable;
pub mod form;
pub mod input;
pub mod ui;
pub mod sync;
pub mod storage;
pub mod export;
pub mod app;
pub mod controller;

pub use timetable::{ClassEntry, EntryRef, Timetable, TimetableDocument, Weekday};
pub use app::{AppState, Mode, SyncStatus, ExportStatus};

pub use input::{normal_mode, command_mode, insert_mode};
