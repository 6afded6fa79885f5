use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use class_timetable::{
    app::{AppState, ExportStatus, Mode, SyncStatus},
    ui::week_layout::TITLE_ROWS,
};
use crate::tui::{dialogs, timetable_view};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn ui(f: &mut Frame, app: &AppState) {
    if app.capture_mode {
        render_capture(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_ROWS),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_title(f, app, chunks[0], &format!("Class Timetable - {:?} Mode", app.mode));
    timetable_view::render(f, app, chunks[1]);
    render_status(f, app, chunks[2]);

    if app.show_help {
        dialogs::help::render(f, app);
    }

    if app.class_form.is_some() {
        dialogs::class_form::render(f, app);
    }

    if app.delete_confirmation.is_some() {
        dialogs::delete_confirmation::render(f, app);
    }

    if app.alert.is_some() {
        dialogs::alert::render(f, app);
    }
}

/// Only the title and the week grid; no status bar, dialogs or cursor.
fn render_capture(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(TITLE_ROWS), Constraint::Min(0)])
        .split(f.size());

    render_title(f, app, chunks[0], "Class Timetable");
    timetable_view::render(f, app, chunks[1]);
}

fn render_title(f: &mut Frame, app: &AppState, area: Rect, text: &str) {
    let title = Paragraph::new(text.to_string())
        .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let (status_text, status_color) = if matches!(app.mode, Mode::Command) {
        (app.command_buffer.to_string(), app.theme.command_mode)
    } else {
        status_line(app)
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(if matches!(app.mode, Mode::Command) { Alignment::Left } else { Alignment::Center })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn status_line(app: &AppState) -> (String, ratatui::style::Color) {
    let theme = &app.theme;

    if let ExportStatus::Failed { message, .. } = &app.export_status {
        return (format!("Export failed: {}", message), theme.error);
    }

    if let Some(message) = &app.status_message {
        return (message.clone(), theme.error);
    }

    let sync = match &app.sync_status {
        SyncStatus::Synced if app.loading => format!("Loading {}", spinner_frame()),
        SyncStatus::Synced => "Synced".to_string(),
        SyncStatus::Syncing => format!("Syncing {}", spinner_frame()),
        SyncStatus::Error(message) => return (message.clone(), theme.error),
    };

    let (export, color) = match &app.export_status {
        ExportStatus::Saved(path) => (format!(" | Saved {}", path.display()), theme.success),
        _ => (String::new(), theme.status_bar),
    };

    let text = format!(
        "Classes: {} | {}{} | a add, E edit, x delete, p export, ? help, q quit",
        app.timetable.total_entries(),
        sync,
        export,
    );
    (text, color)
}

fn spinner_frame() -> &'static str {
    let tick = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() / 150)
        .unwrap_or(0);
    SPINNER[(tick % SPINNER.len() as u128) as usize]
}
