use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entry::{ClassEntry, Weekday};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TimetableError {
    #[error("No class at position {position} on {day}")]
    NoSuchEntry { day: Weekday, position: usize },
}

/// Addresses an entry by its day and its position in that day's sorted list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef {
    pub day: Weekday,
    pub position: usize,
}

impl EntryRef {
    pub fn new(day: Weekday, position: usize) -> Self {
        Self { day, position }
    }
}

/// An entry reference together with the entry it pointed at when taken.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedEntry {
    pub origin: EntryRef,
    pub original: ClassEntry,
}

impl PinnedEntry {
    pub fn new(origin: EntryRef, original: ClassEntry) -> Self {
        Self { origin, original }
    }

    /// Where the pinned entry is now. A change notification may have
    /// reshuffled the day since the pin was taken, so a mismatch at the
    /// recorded position falls back to a lookup by value on the same day.
    pub fn resolve(&self, timetable: &Timetable) -> Option<EntryRef> {
        if timetable.get(self.origin) == Some(&self.original) {
            return Some(self.origin);
        }

        let day = self.origin.day;
        let position = timetable.locate(day, &self.original)?;
        tracing::warn!(
            "{} moved from position {} to {} on {}",
            self.original.name, self.origin.position, position, day
        );
        Some(EntryRef::new(day, position))
    }
}

/// Weekday -> classes. Day lists are kept sorted by start time and empty
/// lists are never stored, so an absent day and an empty day compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Weekday, Vec<ClassEntry>>", into = "BTreeMap<Weekday, Vec<ClassEntry>>")]
pub struct Timetable {
    days: BTreeMap<Weekday, Vec<ClassEntry>>,
}

impl From<BTreeMap<Weekday, Vec<ClassEntry>>> for Timetable {
    fn from(days: BTreeMap<Weekday, Vec<ClassEntry>>) -> Self {
        let mut timetable = Self { days };
        timetable.normalize();
        timetable
    }
}

impl From<Timetable> for BTreeMap<Weekday, Vec<ClassEntry>> {
    fn from(timetable: Timetable) -> Self {
        timetable.days
    }
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn total_entries(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn has_day(&self, day: Weekday) -> bool {
        self.days.contains_key(&day)
    }

    pub fn day(&self, day: Weekday) -> &[ClassEntry] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, entry_ref: EntryRef) -> Option<&ClassEntry> {
        self.day(entry_ref.day).get(entry_ref.position)
    }

    /// Finds the current position of an entry equal to `entry` on `day`.
    pub fn locate(&self, day: Weekday, entry: &ClassEntry) -> Option<usize> {
        self.day(day).iter().position(|candidate| candidate == entry)
    }

    /// Appends `entry` to the list of `entry.day`, creating it if needed.
    pub fn add(&mut self, entry: ClassEntry) -> EntryRef {
        let day = entry.day;
        let list = self.days.entry(day).or_default();
        list.push(entry);
        let appended = list.len() - 1;
        self.position_after_sort(day, appended)
    }

    /// Replaces the entry at `origin`. When the replacement names another
    /// day the entry moves: it leaves the old list and is appended to the
    /// new one.
    pub fn replace(&mut self, origin: EntryRef, entry: ClassEntry) -> Result<EntryRef, TimetableError> {
        if self.get(origin).is_none() {
            return Err(TimetableError::NoSuchEntry { day: origin.day, position: origin.position });
        }

        if entry.day != origin.day {
            self.remove(origin)?;
            return Ok(self.add(entry));
        }

        let list = self.days.entry(origin.day).or_default();
        list[origin.position] = entry;
        Ok(self.position_after_sort(origin.day, origin.position))
    }

    /// Removes the entry at `entry_ref`; the day key goes away with its last entry.
    pub fn remove(&mut self, entry_ref: EntryRef) -> Result<ClassEntry, TimetableError> {
        let missing = TimetableError::NoSuchEntry { day: entry_ref.day, position: entry_ref.position };
        let list = self.days.get_mut(&entry_ref.day).ok_or_else(|| missing.clone())?;
        if entry_ref.position >= list.len() {
            return Err(missing);
        }

        let removed = list.remove(entry_ref.position);
        if list.is_empty() {
            self.days.remove(&entry_ref.day);
        }
        Ok(removed)
    }

    pub fn normalize(&mut self) {
        self.days.retain(|_, list| !list.is_empty());
        for list in self.days.values_mut() {
            list.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        }
    }

    /// Sorts `day` and returns where the entry previously at `index` ended up.
    fn position_after_sort(&mut self, day: Weekday, index: usize) -> EntryRef {
        let Some(list) = self.days.get_mut(&day) else {
            return EntryRef::new(day, 0);
        };

        let mut order: Vec<usize> = (0..list.len()).collect();
        order.sort_by(|&a, &b| list[a].start_time.cmp(&list[b].start_time));
        let position = order.iter().position(|&i| i == index).unwrap_or(0);

        list.sort_by(|a, b| a.start_time.cmp(&b.start_time));
        EntryRef::new(day, position)
    }
}
