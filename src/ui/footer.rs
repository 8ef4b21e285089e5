use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, DashboardView, Screen};
use crate::ui::theme::role_color;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();

    match app.screen {
        Screen::Login => {
            spans.push(hint("tab", "next field"));
            spans.push(hint("enter", "sign in"));
            spans.push(hint("ctrl+r", "register"));
            spans.push(hint("esc", "quit"));
        }
        Screen::Register => {
            spans.push(hint("tab", "next field"));
            spans.push(hint("enter", "create account"));
            spans.push(hint("esc", "back"));
        }
        Screen::Dashboard(DashboardView::Employee) => {
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("enter", "details"));
            spans.push(hint("s", "status"));
            spans.push(hint("c", "claim"));
            spans.push(hint("r", "refresh"));
            spans.push(hint("l", "logout"));
            spans.push(hint("q", "quit"));
        }
        Screen::Dashboard(DashboardView::ScrumMaster) => {
            spans.push(hint("←→", "pane"));
            spans.push(hint("↑↓", "navigate"));
            spans.push(hint("enter", "select"));
            spans.push(hint("n", "new task"));
            spans.push(hint("s", "status"));
            spans.push(hint("r", "refresh"));
            spans.push(hint("l", "logout"));
            spans.push(hint("q", "quit"));
        }
        Screen::Dashboard(DashboardView::Pending) => {
            spans.push(hint("r", "re-check"));
            spans.push(hint("l", "logout"));
            spans.push(hint("q", "quit"));
        }
    }

    // Role badge for the signed-in user
    if let Some(user) = &app.user {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(" {} ", user.role.display_name().to_uppercase()),
            Style::default()
                .fg(ratatui::style::Color::Black)
                .bg(role_color(user.role)),
        ));
    }

    // Flash message
    if let Some((msg, _)) = &app.flash_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            msg,
            Style::default().fg(ratatui::style::Color::Yellow),
        ));
    }

    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(ratatui::style::Color::DarkGray),
    )
}
