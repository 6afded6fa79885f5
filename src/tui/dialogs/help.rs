use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use class_timetable::{app::AppState, ui::theme::Theme};
use crate::tui::dialogs::centered;

pub fn render(f: &mut Frame, app: &AppState) {
    let help_height = 23;
    let help_area = centered(f.size(), 60, help_height);
    f.render_widget(Clear, help_area);

    let section = |title: &'static str| {
        Line::from(vec![Span::styled(title, Style::default().fg(app.theme.help_section))])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Class Timetable Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        section("Navigation:"),
        Line::from("  h/l      - Previous/next day"),
        Line::from("  j/k      - Previous/next class in the day"),
        Line::from("  g/G      - First/last class in the day"),
        Line::from(""),
        section("Classes:"),
        Line::from("  a        - Add a class on the selected day"),
        Line::from("  :new     - Add a class (:new [Subject])"),
        Line::from("  E/Enter  - Edit selected class"),
        Line::from("  x        - Delete selected class"),
        Line::from(""),
        section("Class Form:"),
        Line::from("  Tab      - Next field (Shift-Tab: previous)"),
        Line::from("  ←/→      - Cycle subject, professor or day"),
        Line::from("  typing   - Enter a subject/professor not listed"),
        Line::from("  Enter    - Save, Esc - Cancel"),
        Line::from(""),
        section("Sync & Export:"),
        Line::from("  r  / :e  - Reload from the store"),
        Line::from("  :w       - Write the timetable to the store"),
        Line::from("  p  / :export - Save class-timetable.png"),
        Line::from(""),
        section("Commands:"),
        Line::from("  :q       - Quit"),
        Line::from(format!("  :theme   - Change theme ({})", Theme::available_themes().join(", "))),
        Line::from("  :help    - Show this help"),
        Line::from(""),
    ];

    let visible_lines = help_height.saturating_sub(3) as usize;
    let total_lines = help_text.len();
    let max_scroll = total_lines.saturating_sub(visible_lines);
    let scroll = app.help_scroll.min(max_scroll);

    let scrolled_text: Vec<Line> = help_text
        .into_iter()
        .skip(scroll)
        .take(visible_lines)
        .collect();

    let help_paragraph = Paragraph::new(scrolled_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!(" Help (j/k to scroll, q to close) [{}/{}] ", scroll + 1, total_lines))
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
