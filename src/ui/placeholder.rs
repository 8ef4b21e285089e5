use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::centered_rect;

/// Shown when the signed-in user's role isn't one this client recognizes.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let name = app
        .user
        .as_ref()
        .map(|u| u.first_name.clone())
        .unwrap_or_default();

    let lines = vec![
        Line::raw(""),
        Line::styled(
            format!("Welcome, {name}!"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "Your account is being set up.",
            Style::default().fg(ratatui::style::Color::Yellow),
        ),
        Line::raw(""),
        Line::raw("A scrum master still needs to assign your role before"),
        Line::raw("your dashboard unlocks. Press r to re-check."),
    ];

    let box_area = centered_rect(58, lines.len() as u16 + 2, area);
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ratatui::style::Color::Cyan))
                .title(" TaskFlow "),
        );
    f.render_widget(paragraph, box_area);
}
