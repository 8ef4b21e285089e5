use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, Pane};
use crate::ui::theme::project_status_color;
use crate::ui::task_list;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    // Projects (28%) + Tasks (44%) + Analytics (28%)
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(28),
            Constraint::Percentage(44),
            Constraint::Percentage(28),
        ])
        .split(area);

    render_projects(f, horizontal[0], app);
    task_list::render(
        f,
        horizontal[1],
        &app.project_tasks,
        app.selected_project_task,
        "Tasks",
        app.loading,
        app.pane == Pane::Tasks,
    );
    render_analytics(f, horizontal[2], app);
}

fn render_projects(f: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let name_style = if i == app.selected_project {
                Style::default()
                    .fg(ratatui::style::Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let line = Line::from(vec![
                Span::styled(project.name.clone(), name_style),
                Span::styled(
                    format!(" [{}]", project.status.display_name()),
                    Style::default().fg(project_status_color(project.status)),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if app.loading {
        " Projects (loading...) "
    } else {
        " Projects "
    };
    let border = if app.pane == Pane::Projects {
        ratatui::style::Color::Cyan
    } else {
        ratatui::style::Color::DarkGray
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );
    f.render_widget(list, area);
}

fn render_analytics(f: &mut Frame, area: Rect, app: &App) {
    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(ratatui::style::Color::Gray))
    };

    let counts = &app.analytics.status_counts;
    let priorities = &app.analytics.priority_counts;

    let lines = vec![
        Line::from(vec![label("To Do: "), Span::raw(counts.todo.to_string())]),
        Line::from(vec![
            label("In Progress: "),
            Span::raw(counts.in_progress.to_string()),
        ]),
        Line::from(vec![label("Review: "), Span::raw(counts.review.to_string())]),
        Line::from(vec![label("Done: "), Span::raw(counts.done.to_string())]),
        Line::raw(""),
        Line::from(vec![
            label("Urgent: "),
            Span::styled(
                priorities.urgent.to_string(),
                Style::default().fg(ratatui::style::Color::Red),
            ),
        ]),
        Line::from(vec![label("High: "), Span::raw(priorities.high.to_string())]),
        Line::from(vec![
            label("Medium: "),
            Span::raw(priorities.medium.to_string()),
        ]),
        Line::from(vec![label("Low: "), Span::raw(priorities.low.to_string())]),
        Line::raw(""),
        Line::from(vec![
            label("Completion: "),
            Span::raw(format!("{:.0}%", app.analytics.completion_rate * 100.0)),
        ]),
        Line::from(vec![
            label("Team members: "),
            Span::raw(app.stats.team_members.to_string()),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::DarkGray))
            .title(" Analytics "),
    );
    f.render_widget(paragraph, area);
}
