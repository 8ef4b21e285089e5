use ratatui::style::Color;

use crate::model::project::ProjectStatus;
use crate::model::task::{TaskPriority, TaskStatus};
use crate::model::user::Role;

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Todo => Color::Gray,
        TaskStatus::InProgress => Color::Cyan,
        TaskStatus::Review => Color::Yellow,
        TaskStatus::Done => Color::Green,
    }
}

pub fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::Urgent => Color::Red,
        TaskPriority::High => Color::Yellow,
        TaskPriority::Medium => Color::Blue,
        TaskPriority::Low => Color::Gray,
    }
}

pub fn project_status_color(status: ProjectStatus) -> Color {
    match status {
        ProjectStatus::Active => Color::Green,
        ProjectStatus::Completed => Color::Blue,
        ProjectStatus::OnHold => Color::Yellow,
    }
}

pub fn role_color(role: Role) -> Color {
    match role {
        Role::Employee => Color::Cyan,
        Role::ScrumMaster => Color::Magenta,
        Role::Unknown => Color::Gray,
    }
}
