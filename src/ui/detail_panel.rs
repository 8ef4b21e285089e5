use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::model::task::Task;
use crate::ui::theme::{priority_color, status_color};

pub fn render(f: &mut Frame, area: Rect, task: Option<&Task>) {
    let task = match task {
        Some(task) => task,
        None => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ratatui::style::Color::Cyan))
                .title(" Details ");
            f.render_widget(block, area);
            return;
        }
    };

    let label = |text: &'static str| {
        Span::styled(text, Style::default().fg(ratatui::style::Color::Gray))
    };

    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        label("Status: "),
        Span::styled(
            task.status.display_name(),
            Style::default().fg(status_color(task.status)),
        ),
    ]));

    lines.push(Line::from(vec![
        label("Priority: "),
        Span::styled(
            task.priority.display_name(),
            Style::default().fg(priority_color(task.priority)),
        ),
    ]));

    if let Some(due) = task.due_date {
        let today = chrono::Utc::now().date_naive();
        let style = if task.is_overdue(today) {
            Style::default().fg(ratatui::style::Color::Red)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            label("Due: "),
            Span::styled(due.format("%Y-%m-%d").to_string(), style),
        ]));
    }

    if let Some(assignee) = &task.assignee {
        lines.push(Line::from(vec![
            label("Assignee: "),
            Span::raw(assignee.full_name()),
        ]));
    }

    lines.push(Line::from(vec![
        label("Project: "),
        Span::raw(task.project.name.clone()),
    ]));

    lines.push(Line::from(vec![
        label("Created by: "),
        Span::raw(task.created_by.full_name()),
    ]));

    if let Some(desc) = &task.description {
        lines.push(Line::raw(""));
        let truncated: String = desc.chars().take(300).collect();
        lines.push(Line::raw(truncated));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ratatui::style::Color::Cyan))
                .title(" Details "),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
