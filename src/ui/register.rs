use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::forms::register::RegisterField;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.register_form;
    let mut lines: Vec<Line> = vec![Line::raw("")];

    for field in RegisterField::ALL {
        let focused = form.focused() == field;
        let prefix = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(ratatui::style::Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ratatui::style::Color::Gray)
        };
        lines.push(Line::from(Span::styled(
            format!("{prefix}{}", field.label()),
            label_style,
        )));

        let value = if field.masked() {
            "•".repeat(form.value(field).chars().count())
        } else {
            form.value(field).to_string()
        };
        lines.push(Line::from(Span::raw(format!("  {value}"))));

        if let Some(error) = form.error_for(field) {
            lines.push(Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(ratatui::style::Color::Red),
            )));
        }
    }

    lines.push(Line::raw(""));
    if let Some(error) = &form.server_error {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(ratatui::style::Color::Red),
        )));
    }
    if form.submitting {
        lines.push(Line::from(Span::styled(
            "  Creating account...",
            Style::default().fg(ratatui::style::Color::Yellow),
        )));
    }

    let height = lines.len() as u16 + 2;
    let box_area = centered_rect(72, height, area);
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ratatui::style::Color::Cyan))
            .title(" TaskFlow — Create Account "),
    );
    f.render_widget(paragraph, box_area);
}
