use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use class_timetable::{
    app::AppState,
    form::{ClassForm, FormField},
};
use crate::tui::dialogs::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let Some(form) = &app.class_form else {
        return;
    };

    let form_area = centered(f.size(), 64, 17);
    f.render_widget(Clear, form_area);

    let active_color = app.theme.selected_bg;
    let inactive_color = Color::DarkGray;
    let label = |field: FormField, text: &'static str| {
        let color = if form.active_field == field { active_color } else { inactive_color };
        Span::styled(text, Style::default().fg(color))
    };

    let form_title = if form.is_editing() { "Edit Class" } else { "Add New Class" };

    let form_text = vec![
        Line::from(vec![Span::styled(form_title, Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            label(FormField::Subject, "Subject:    "),
            Span::raw(form.subject.label()),
            choice_hint(form, FormField::Subject, form.subject.is_custom()),
        ]),
        Line::from(""),
        Line::from(vec![
            label(FormField::Room, "Professor:  "),
            Span::raw(form.room.label()),
            choice_hint(form, FormField::Room, form.room.is_custom()),
        ]),
        Line::from(""),
        Line::from(vec![
            label(FormField::Day, "Day:        "),
            Span::raw(form.day.name()),
            hint(form.active_field == FormField::Day, " [←/→ to change]"),
        ]),
        Line::from(""),
        Line::from(vec![
            label(FormField::StartTime, "Start time: "),
            Span::raw(&form.start_input),
            time_hint(form.active_field == FormField::StartTime, form.start_touched),
        ]),
        Line::from(""),
        Line::from(vec![
            label(FormField::EndTime, "End time:   "),
            Span::raw(&form.end_input),
            time_hint(form.active_field == FormField::EndTime, form.end_touched),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Cyan)),
            Span::raw(" = Next field | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" = Save | "),
            Span::styled("Esc", Style::default().fg(Color::Red)),
            Span::raw(" = Cancel"),
        ]),
    ];

    let block_title = if form.is_editing() { " Edit Class " } else { " New Class " };

    let form_paragraph = Paragraph::new(form_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(form_paragraph, form_area);
}

fn hint(visible: bool, text: &'static str) -> Span<'static> {
    Span::styled(if visible { text } else { "" }, Style::default().fg(Color::DarkGray))
}

fn choice_hint(form: &ClassForm, field: FormField, is_custom: bool) -> Span<'static> {
    let text = if is_custom { " [type a name]" } else { " [←/→ or type]" };
    hint(form.active_field == field, text)
}

fn time_hint(active: bool, touched: bool) -> Span<'static> {
    hint(active, if touched { " (HH:MM or HHMM)" } else { " [type to replace]" })
}
