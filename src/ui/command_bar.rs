use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let input = match &app.new_task_input {
        Some(input) => input,
        None => return,
    };

    let project = app
        .projects
        .get(app.selected_project)
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    let title = format!(" New Task — {project} ");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ratatui::style::Color::Yellow))
        .title(title);

    let paragraph = Paragraph::new(Line::from(Span::raw(input.clone()))).block(block);
    f.render_widget(paragraph, area);

    // Position cursor at the end of the input
    let x = area.x + 1 + input.chars().count() as u16;
    let y = area.y + 1;
    f.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), y));
}
