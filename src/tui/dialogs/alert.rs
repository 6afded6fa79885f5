use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use class_timetable::app::AppState;
use crate::tui::dialogs::centered;

/// Blocking message box; any key dismisses it.
pub fn render(f: &mut Frame, app: &AppState) {
    let Some(message) = &app.alert else {
        return;
    };

    let alert_area = centered(f.size(), 50, 7);
    f.render_widget(Clear, alert_area);

    let alert_text = vec![
        Line::from(vec![Span::styled(message.as_str(), Style::default().fg(app.theme.error).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Press any key to continue", Style::default().fg(Color::DarkGray))]),
    ];

    let alert_paragraph = Paragraph::new(alert_text)
        .wrap(Wrap { trim: true })
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Alert ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Center);

    f.render_widget(alert_paragraph, alert_area);
}
