use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

use crate::model::task::Task;
use crate::ui::theme::{priority_color, status_color};

pub fn render(
    f: &mut Frame,
    area: Rect,
    tasks: &[Task],
    selected: usize,
    title: &str,
    loading: bool,
    focused: bool,
) {
    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let marker = Span::styled("● ", Style::default().fg(status_color(task.status)));

            // Truncate title to fit
            let max_title = area.width.saturating_sub(14) as usize;
            let text: String = task.title.chars().take(max_title).collect();
            let title_style = if i == selected {
                Style::default()
                    .fg(ratatui::style::Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let title_span = Span::styled(text, title_style);

            let priority_span = Span::styled(
                format!(" [{}]", task.priority.display_name()),
                Style::default().fg(priority_color(task.priority)),
            );

            ListItem::new(Line::from(vec![marker, title_span, priority_span]))
        })
        .collect();

    let full_title = if loading {
        format!(" {title} (loading...) ")
    } else {
        format!(" {title} ")
    };
    let border = if focused {
        ratatui::style::Color::Cyan
    } else {
        ratatui::style::Color::DarkGray
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(full_title),
    );

    f.render_widget(list, area);
}
