use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::form::{ClassForm, FormOptions};
use crate::timetable::{ClassEntry, EntryRef, PinnedEntry, Timetable, Weekday};
use crate::ui::theme::Theme;

/// How long the loading indicator stays up after a change notification.
pub const SNAPSHOT_SETTLE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncStatus {
    Synced,
    Syncing,
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Idle,
    Saved(PathBuf),
    Failed { message: String, until: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    pub day: Weekday,
    pub position: usize,
}

/// Controls that are hidden while the timetable is captured for export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeState {
    pub capture_mode: bool,
    pub loading: bool,
}

pub struct AppState {
    pub mode: Mode,
    pub timetable: Timetable,
    pub cursor: Cursor,
    pub sync_status: SyncStatus,
    pub loading: bool,
    pub loading_until: Option<Instant>,
    pub form_options: FormOptions,
    pub class_form: Option<ClassForm>,
    pub alert: Option<String>,
    pub status_message: Option<String>,
    pub delete_confirmation: Option<PinnedEntry>,
    pub command_buffer: String,
    pub show_help: bool,
    pub help_scroll: usize,
    pub theme: Theme,
    pub export_status: ExportStatus,
    pub capture_mode: bool,
    pub dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            timetable: Timetable::new(),
            cursor: Cursor { day: Weekday::Monday, position: 0 },
            sync_status: SyncStatus::Synced,
            loading: false,
            loading_until: None,
            form_options: FormOptions::default(),
            class_form: None,
            alert: None,
            status_message: None,
            delete_confirmation: None,
            command_buffer: String::new(),
            show_help: false,
            help_scroll: 0,
            theme: Theme::default(),
            export_status: ExportStatus::Idle,
            capture_mode: false,
            dirty: true,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_form_options(mut self, form_options: FormOptions) -> Self {
        self.form_options = form_options;
        self
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn is_interactive(&self) -> bool {
        !self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        self.loading_until = None;
        self.sync_status = if loading { SyncStatus::Syncing } else { SyncStatus::Synced };
        self.dirty = true;
    }

    pub fn fail_sync(&mut self, message: String) {
        self.loading = false;
        self.loading_until = None;
        self.sync_status = SyncStatus::Error(message);
        self.dirty = true;
    }

    /// Swaps in a timetable delivered by a change notification. Returns
    /// whether anything visible changed; an identical mapping is ignored.
    pub fn apply_snapshot(&mut self, incoming: Timetable, now: Instant) -> bool {
        if incoming == self.timetable {
            return false;
        }

        self.timetable = incoming;
        self.clamp_cursor();
        self.loading = true;
        self.loading_until = Some(now + SNAPSHOT_SETTLE);
        self.dirty = true;
        true
    }

    /// Advances timers: settles the post-notification loading indicator and
    /// reverts an expired export error.
    pub fn tick(&mut self, now: Instant) {
        if let Some(until) = self.loading_until
            && now >= until
        {
            self.loading = false;
            self.loading_until = None;
            self.dirty = true;
        }

        if let ExportStatus::Failed { until, .. } = &self.export_status
            && now >= *until
        {
            self.export_status = ExportStatus::Idle;
            self.dirty = true;
        }
    }

    pub fn hide_chrome(&mut self) -> ChromeState {
        let previous = ChromeState { capture_mode: self.capture_mode, loading: self.loading };
        self.capture_mode = true;
        self.loading = false;
        previous
    }

    pub fn restore_chrome(&mut self, previous: ChromeState) {
        self.capture_mode = previous.capture_mode;
        self.loading = previous.loading;
        self.dirty = true;
    }

    pub fn selected_entry_ref(&self) -> Option<EntryRef> {
        let entry_ref = EntryRef::new(self.cursor.day, self.cursor.position);
        self.timetable.get(entry_ref).map(|_| entry_ref)
    }

    pub fn selected_entry(&self) -> Option<&ClassEntry> {
        self.selected_entry_ref().and_then(|entry_ref| self.timetable.get(entry_ref))
    }

    pub fn select(&mut self, entry_ref: EntryRef) {
        self.cursor = Cursor { day: entry_ref.day, position: entry_ref.position };
        self.clamp_cursor();
    }

    pub fn move_day_next(&mut self) {
        self.cursor.day = self.cursor.day.next();
        self.clamp_cursor();
    }

    pub fn move_day_prev(&mut self) {
        self.cursor.day = self.cursor.day.prev();
        self.clamp_cursor();
    }

    pub fn move_selection_down(&mut self) {
        let count = self.timetable.day(self.cursor.day).len();
        if count > 0 && self.cursor.position < count - 1 {
            self.cursor.position += 1;
        }
    }

    pub fn move_selection_up(&mut self) {
        self.cursor.position = self.cursor.position.saturating_sub(1);
    }

    pub fn clamp_cursor(&mut self) {
        let count = self.timetable.day(self.cursor.day).len();
        self.cursor.position = self.cursor.position.min(count.saturating_sub(1));
    }

    /// Add intent: a blank form with no edit markers, preset to the day under the cursor.
    pub fn open_add_form(&mut self, subject: Option<String>) {
        let mut form = ClassForm::for_new(&self.form_options, self.cursor.day);
        if let Some(subject) = subject.filter(|s| !s.trim().is_empty()) {
            form.subject.set_choice(crate::form::Choice::resolve(Some(&subject), &self.form_options.subjects));
        }
        self.class_form = Some(form);
        self.mode = Mode::Insert;
        self.dirty = true;
    }

    /// Edit intent for the selected entry; does nothing on an empty day.
    pub fn open_edit_form(&mut self) -> bool {
        let Some(entry_ref) = self.selected_entry_ref() else {
            return false;
        };
        let Some(entry) = self.timetable.get(entry_ref) else {
            return false;
        };

        self.class_form = Some(ClassForm::for_entry(&self.form_options, entry_ref, entry));
        self.mode = Mode::Insert;
        self.dirty = true;
        true
    }

    pub fn close_form(&mut self) {
        self.class_form = None;
        self.mode = Mode::Normal;
        self.dirty = true;
    }

    /// Pins the selected entry by value so a change notification arriving
    /// while the dialog is open cannot retarget the delete.
    pub fn request_delete(&mut self) -> bool {
        let Some(entry_ref) = self.selected_entry_ref() else {
            return false;
        };
        let Some(entry) = self.timetable.get(entry_ref).cloned() else {
            return false;
        };

        self.delete_confirmation = Some(PinnedEntry::new(entry_ref, entry));
        self.mode = Mode::Confirm;
        self.dirty = true;
        true
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
        self.dirty = true;
    }

    /// One-line notice in the status bar, cleared by the next key press.
    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.dirty = true;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
        self.dirty = true;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn entry(name: &str, day: Weekday, start: u32) -> ClassEntry {
        ClassEntry {
            name: name.to_string(),
            room: None,
            day,
            start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start + 1, 0, 0).unwrap(),
        }
    }

    fn state_with_monday_classes() -> AppState {
        let mut app = AppState::new();
        app.timetable.add(entry("Biology", Weekday::Monday, 9));
        app.timetable.add(entry("Physics", Weekday::Monday, 14));
        app
    }

    #[test]
    fn new_app_starts_in_normal_mode() {
        let app = AppState::new();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.timetable.is_empty());
    }

    #[test]
    fn new_app_starts_on_monday() {
        let app = AppState::new();
        assert_eq!(app.cursor.day, Weekday::Monday);
    }

    #[test]
    fn identical_snapshot_is_ignored() {
        let mut app = state_with_monday_classes();
        app.take_dirty();

        let changed = app.apply_snapshot(app.timetable.clone(), Instant::now());

        assert!(!changed);
        assert!(!app.take_dirty());
        assert!(!app.loading);
    }

    #[test]
    fn differing_snapshot_replaces_timetable() {
        let mut app = state_with_monday_classes();
        app.take_dirty();
        let now = Instant::now();

        let changed = app.apply_snapshot(Timetable::new(), now);

        assert!(changed);
        assert!(app.timetable.is_empty());
        assert!(app.take_dirty());
        assert!(app.loading);

        app.tick(now + SNAPSHOT_SETTLE);
        assert!(!app.loading);
    }

    #[test]
    fn snapshot_clamps_cursor() {
        let mut app = state_with_monday_classes();
        app.cursor.position = 1;

        let mut shorter = Timetable::new();
        shorter.add(entry("Biology", Weekday::Monday, 9));
        app.apply_snapshot(shorter, Instant::now());

        assert_eq!(app.cursor.position, 0);
    }

    #[test]
    fn selection_moves_within_day() {
        let mut app = state_with_monday_classes();

        app.move_selection_down();
        assert_eq!(app.selected_entry().map(|e| e.name.as_str()), Some("Physics"));

        app.move_selection_down();
        assert_eq!(app.cursor.position, 1);

        app.move_selection_up();
        app.move_selection_up();
        assert_eq!(app.cursor.position, 0);
    }

    #[test]
    fn moving_to_empty_day_has_no_selection() {
        let mut app = state_with_monday_classes();
        app.move_selection_down();

        app.move_day_next();

        assert_eq!(app.cursor, Cursor { day: Weekday::Tuesday, position: 0 });
        assert!(app.selected_entry_ref().is_none());
    }

    #[test]
    fn add_form_uses_cursor_day() {
        let mut app = AppState::new();
        app.move_day_prev();

        app.open_add_form(None);

        assert_eq!(app.mode, Mode::Insert);
        let form = app.class_form.as_ref().unwrap();
        assert_eq!(form.day, Weekday::Friday);
        assert!(!form.is_editing());
    }

    #[test]
    fn edit_form_requires_selection() {
        let mut app = AppState::new();
        assert!(!app.open_edit_form());

        let mut app = state_with_monday_classes();
        assert!(app.open_edit_form());
        assert!(app.class_form.as_ref().unwrap().is_editing());
    }

    #[test]
    fn delete_request_enters_confirm_mode() {
        let mut app = state_with_monday_classes();

        assert!(app.request_delete());

        assert_eq!(app.mode, Mode::Confirm);
        let pin = app.delete_confirmation.as_ref().unwrap();
        assert_eq!(pin.origin, EntryRef::new(Weekday::Monday, 0));
        assert_eq!(Some(&pin.original), app.timetable.get(pin.origin));
    }

    #[test]
    fn hide_and_restore_chrome() {
        let mut app = AppState::new();
        app.loading = true;

        let previous = app.hide_chrome();
        assert!(app.capture_mode);
        assert!(!app.loading);

        app.restore_chrome(previous);
        assert!(!app.capture_mode);
        assert!(app.loading);
    }

    #[test]
    fn expired_export_error_reverts() {
        let mut app = AppState::new();
        let now = Instant::now();
        app.export_status = ExportStatus::Failed { message: "disk full".to_string(), until: now };

        app.tick(now);

        assert_eq!(app.export_status, ExportStatus::Idle);
    }
}
