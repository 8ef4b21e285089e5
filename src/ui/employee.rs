use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::{detail_panel, task_list};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // Task list (55%) + overview/detail column (45%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    task_list::render(
        f,
        horizontal[0],
        &app.my_tasks,
        app.selected_my_task,
        "My Tasks",
        app.loading,
        true,
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(horizontal[1]);

    render_overview(f, right[0], app);
    detail_panel::render(f, right[1], app.selected_task());
}

fn render_overview(f: &mut Frame, area: Rect, app: &App) {
    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(ratatui::style::Color::Gray))
    };

    let overdue_style = if app.stats.overdue_tasks > 0 {
        Style::default().fg(ratatui::style::Color::Red)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(vec![
            label("Assigned to me: "),
            Span::raw(app.my_tasks.len().to_string()),
        ]),
        Line::from(vec![
            label("In progress: "),
            Span::raw(app.stats.in_progress_tasks.to_string()),
        ]),
        Line::from(vec![
            label("Completed: "),
            Span::raw(app.stats.completed_tasks.to_string()),
        ]),
        Line::from(vec![
            label("Overdue: "),
            Span::styled(app.stats.overdue_tasks.to_string(), overdue_style),
        ]),
    ];

    let title = match &app.user {
        Some(user) => format!(" Overview — {} ", user.first_name),
        None => " Overview ".to_string(),
    };
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Cyan))
            .title(title),
    );
    f.render_widget(paragraph, area);
}
