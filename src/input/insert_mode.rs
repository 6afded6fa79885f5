use crossterm::event::KeyCode;

use crate::app::AppState;
use crate::form::{Choice, ChoiceField, ClassForm, FormField};

const MAX_TIME_INPUT: usize = 5;

/// Edits the open class form. Enter and Esc are handled by the session
/// because they submit or discard the form.
pub fn handle_key(key: KeyCode, state: &mut AppState) {
    let Some(form) = state.class_form.as_mut() else {
        return;
    };

    match key {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => cycle(form, false),
        KeyCode::Right => cycle(form, true),
        KeyCode::Backspace => match form.active_field {
            FormField::Subject => form.subject.pop_char(),
            FormField::Room => form.room.pop_char(),
            FormField::Day => {}
            FormField::StartTime => {
                form.start_input.pop();
                form.start_touched = true;
            }
            FormField::EndTime => {
                form.end_input.pop();
                form.end_touched = true;
            }
        },
        KeyCode::Char(c) => match form.active_field {
            FormField::Subject => type_into(&mut form.subject, c),
            FormField::Room => type_into(&mut form.room, c),
            FormField::Day => {
                if c == ' ' {
                    form.day = form.day.next();
                }
            }
            FormField::StartTime => {
                push_time_char(&mut form.start_input, &mut form.start_touched, c);
            }
            FormField::EndTime => {
                push_time_char(&mut form.end_input, &mut form.end_touched, c);
            }
        },
        _ => {}
    }

    state.mark_dirty();
}

fn cycle(form: &mut ClassForm, forward: bool) {
    match form.active_field {
        FormField::Subject if forward => form.subject.next(),
        FormField::Subject => form.subject.prev(),
        FormField::Room if forward => form.room.next(),
        FormField::Room => form.room.prev(),
        FormField::Day if forward => form.day = form.day.next(),
        FormField::Day => form.day = form.day.prev(),
        FormField::StartTime | FormField::EndTime => {}
    }
}

/// Typing on a fixed option switches the field to its free-text value.
fn type_into(field: &mut ChoiceField, c: char) {
    if !field.is_custom() {
        field.set_choice(Choice::Custom(String::new()));
    }
    field.push_char(c);
}

fn push_time_char(buffer: &mut String, touched: &mut bool, c: char) {
    if !(c.is_ascii_digit() || c == ':') {
        return;
    }
    if !*touched {
        buffer.clear();
        *touched = true;
    }
    if buffer.len() < MAX_TIME_INPUT {
        buffer.push(c);
    }
}
