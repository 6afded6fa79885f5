pub mod entry;
pub mod schedule;

pub use entry::{ClassEntry, Weekday, format_time_12h, format_clock_time, parse_clock_time};
pub use schedule::{EntryRef, PinnedEntry, Timetable, TimetableError};

use serde::{Deserialize, Serialize};

/// Shape of the single persisted document: `{ "data": { <weekday>: [..] } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableDocument {
    #[serde(default)]
    pub data: Timetable,
}

impl TimetableDocument {
    pub fn new(data: Timetable) -> Self {
        Self { data }
    }
}
