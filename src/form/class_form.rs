use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;
use thiserror::Error;

use crate::form::choice::ChoiceField;
use crate::storage::config::FormConfig;
use crate::timetable::{ClassEntry, EntryRef, PinnedEntry, Timetable, Weekday, format_clock_time};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Please enter a subject name")]
    MissingSubject,
    #[error("Invalid {field} '{input}'. Use HH:MM")]
    InvalidTime { field: &'static str, input: String },
    #[error("End time must be after start time")]
    EndNotAfterStart,
    #[error("The class being edited was changed elsewhere; reopen it and try again")]
    EntryGone,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormOptions {
    pub subjects: Vec<String>,
    pub instructors: Vec<String>,
}

impl From<&FormConfig> for FormOptions {
    fn from(config: &FormConfig) -> Self {
        Self {
            subjects: config.subjects.clone(),
            instructors: config.instructors.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Subject,
    Room,
    Day,
    StartTime,
    EndTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassForm {
    pub subject: ChoiceField,
    pub room: ChoiceField,
    pub day: Weekday,
    pub start_input: String,
    pub end_input: String,
    pub start_touched: bool,
    pub end_touched: bool,
    pub active_field: FormField,
    pub editing: Option<PinnedEntry>,
}

impl ClassForm {
    pub fn for_new(options: &FormOptions, day: Weekday) -> Self {
        Self {
            subject: ChoiceField::new(options.subjects.clone(), false),
            room: ChoiceField::new(options.instructors.clone(), true),
            day,
            start_input: "09:00".to_string(),
            end_input: "10:00".to_string(),
            start_touched: false,
            end_touched: false,
            active_field: FormField::Subject,
            editing: None,
        }
    }

    pub fn for_entry(options: &FormOptions, origin: EntryRef, entry: &ClassEntry) -> Self {
        Self {
            subject: ChoiceField::with_value(options.subjects.clone(), false, Some(entry.name.as_str())),
            room: ChoiceField::with_value(options.instructors.clone(), true, entry.room.as_deref()),
            day: entry.day,
            start_input: format_clock_time(entry.start_time),
            end_input: format_clock_time(entry.end_time),
            start_touched: false,
            end_touched: false,
            active_field: FormField::Subject,
            editing: Some(PinnedEntry::new(origin, entry.clone())),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn next_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Subject => FormField::Room,
            FormField::Room => FormField::Day,
            FormField::Day => FormField::StartTime,
            FormField::StartTime => FormField::EndTime,
            FormField::EndTime => FormField::Subject,
        };
    }

    pub fn prev_field(&mut self) {
        self.active_field = match self.active_field {
            FormField::Subject => FormField::EndTime,
            FormField::Room => FormField::Subject,
            FormField::Day => FormField::Room,
            FormField::StartTime => FormField::Day,
            FormField::EndTime => FormField::StartTime,
        };
    }

    /// Validates the inputs and produces the entry they describe.
    pub fn build_entry(&self) -> Result<ClassEntry, FormError> {
        let name = self.subject.resolved().ok_or(FormError::MissingSubject)?;
        let start_time = parse_time_input(&self.start_input)
            .ok_or_else(|| FormError::InvalidTime { field: "start time", input: self.start_input.clone() })?;
        let end_time = parse_time_input(&self.end_input)
            .ok_or_else(|| FormError::InvalidTime { field: "end time", input: self.end_input.clone() })?;

        if start_time >= end_time {
            return Err(FormError::EndNotAfterStart);
        }

        Ok(ClassEntry {
            name,
            room: self.room.resolved(),
            day: self.day,
            start_time,
            end_time,
        })
    }

    /// Validates, then adds or replaces the entry. Nothing is mutated when
    /// validation fails.
    pub fn apply(&self, timetable: &mut Timetable) -> Result<EntryRef, FormError> {
        let entry = self.build_entry()?;

        match &self.editing {
            Some(target) => {
                let origin = target.resolve(timetable).ok_or(FormError::EntryGone)?;
                timetable.replace(origin, entry).map_err(|_| FormError::EntryGone)
            }
            None => Ok(timetable.add(entry)),
        }
    }
}

/// Accepts `HH:MM`, `H:MM` and `HHMM`.
pub fn parse_time_input(input: &str) -> Option<NaiveTime> {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    let pattern = TIME_RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):?(\d{2})$").expect("invalid time input regex")
    });

    let captures = pattern.captures(input.trim())?;
    let hour: u32 = captures.get(1)?.as_str().parse().ok()?;
    let minute: u32 = captures.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
