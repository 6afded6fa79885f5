use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use class_timetable::{
    app::AppState,
    ui::week_layout::{self, DayColumn, EntryCard},
};

pub fn render(f: &mut Frame, app: &AppState, area: Rect) {
    let layout = week_layout::calculate_layout(app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (column, chunk) in layout.days.iter().zip(columns.iter()) {
        render_day(f, app, column, *chunk);
    }
}

fn render_day(f: &mut Frame, app: &AppState, column: &DayColumn, area: Rect) {
    let theme = &app.theme;
    let mut header_style = Style::default().fg(theme.day_header).add_modifier(Modifier::BOLD);
    if column.is_selected {
        header_style = header_style.add_modifier(Modifier::UNDERLINED);
    }

    let mut lines = Vec::new();
    if let Some(placeholder) = column.placeholder {
        lines.push(Line::from(Span::styled(
            placeholder,
            Style::default().fg(theme.placeholder).add_modifier(Modifier::ITALIC),
        )));
    }
    for card in &column.entries {
        lines.extend(card_lines(app, card));
        lines.push(Line::from(""));
    }

    let mut body_style = Style::default();
    if app.loading {
        body_style = body_style.add_modifier(Modifier::DIM);
    }

    let paragraph = Paragraph::new(lines)
        .style(body_style)
        .wrap(Wrap { trim: true })
        .block(Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(format!(" {} ", column.day), header_style)));
    f.render_widget(paragraph, area);
}

fn card_lines<'a>(app: &AppState, card: &'a EntryCard) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let highlight = |style: Style| {
        if card.is_selected {
            style.bg(theme.selected_bg)
        } else {
            style
        }
    };

    let name_style = if card.is_selected {
        Style::default().fg(theme.selected_fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.class_name).add_modifier(Modifier::BOLD)
    };

    let mut lines = vec![
        Line::from(Span::styled(card.name.as_str(), highlight(name_style))),
        Line::from(Span::styled(card.time_range.as_str(), highlight(Style::default().fg(theme.time_range)))),
    ];
    if let Some(room) = &card.room_label {
        lines.push(Line::from(Span::styled(room.as_str(), highlight(Style::default().fg(theme.room)))));
    }
    lines
}
