use crossterm::event::KeyCode;

use crate::app::{AppState, Mode};
use crate::input::command_mode::Command;

/// Handles navigation locally; returns a command when the key asks for
/// work that has to go through the store or the exporter.
pub fn handle_key(key: KeyCode, state: &mut AppState) -> Option<Command> {
    if key == KeyCode::Char('q') {
        return Some(Command::Quit);
    }
    if !state.is_interactive() {
        return None;
    }

    match key {
        KeyCode::Char('h') | KeyCode::Left => state.move_day_prev(),
        KeyCode::Char('l') | KeyCode::Right => state.move_day_next(),
        KeyCode::Char('j') | KeyCode::Down => state.move_selection_down(),
        KeyCode::Char('k') | KeyCode::Up => state.move_selection_up(),
        KeyCode::Char('g') => state.cursor.position = 0,
        KeyCode::Char('G') => {
            state.cursor.position = usize::MAX;
            state.clamp_cursor();
        }
        KeyCode::Char('a') => state.open_add_form(None),
        KeyCode::Char('E') | KeyCode::Enter => {
            state.open_edit_form();
        }
        KeyCode::Char('x') => {
            state.request_delete();
        }
        KeyCode::Char('p') => return Some(Command::Export),
        KeyCode::Char('r') => return Some(Command::Reload),
        KeyCode::Char(':') => enter_command_mode(state),
        KeyCode::Char('?') => return Some(Command::Help),
        _ => return None,
    }

    state.mark_dirty();
    None
}

fn enter_command_mode(state: &mut AppState) {
    state.mode = Mode::Command;
    state.command_buffer = ":".to_string();
}
