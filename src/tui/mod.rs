mod session;
mod presentation;
mod timetable_view;
mod dialogs;

pub use presentation::ui;
pub use session::run_tui;
