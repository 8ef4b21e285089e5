pub mod command_bar;
pub mod detail_panel;
pub mod employee;
pub mod footer;
pub mod login;
pub mod placeholder;
pub mod register;
pub mod scrum_master;
pub mod task_list;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, DashboardView, Screen};

pub fn render(f: &mut Frame, app: &App) {
    let size = f.area();

    // Bottom bar: command bar (3) while the new-task input is open, else footer (1)
    let bottom_height = if app.new_task_input.is_some() { 3 } else { 1 };

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(bottom_height)])
        .split(size);
    let main_area = vertical[0];
    let bottom_area = vertical[1];

    match app.screen {
        Screen::Login => login::render(f, main_area, app),
        Screen::Register => register::render(f, main_area, app),
        Screen::Dashboard(DashboardView::Employee) => employee::render(f, main_area, app),
        Screen::Dashboard(DashboardView::ScrumMaster) => scrum_master::render(f, main_area, app),
        Screen::Dashboard(DashboardView::Pending) => placeholder::render(f, main_area, app),
    }

    if app.new_task_input.is_some() {
        command_bar::render(f, bottom_area, app);
    } else {
        footer::render(f, bottom_area, app);
    }
}

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    use super::render;
    use crate::activity::ActivityLog;
    use crate::app::{App, DashboardView, Screen};
    use crate::model::user::Role;
    use crate::services::Services;
    use crate::session::Session;
    use crate::testutil::{make_user, MockApi};

    fn blank_app() -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let session = Arc::new(Mutex::new(Session::load_from(
            dir.path().join("session.json"),
        )));
        let services = Services::new(Arc::new(MockApi::ok()), session.clone());
        let activity = ActivityLog::with_path(dir.path().join("activity.jsonl"));
        let (tx, _rx) = mpsc::unbounded_channel();
        (App::new(services, session, activity, tx), dir)
    }

    fn app_for_role(role: Role) -> (App, tempfile::TempDir) {
        let (mut app, dir) = blank_app();
        let user = make_user(1, "ana", role);
        app.screen = Screen::Dashboard(DashboardView::for_user(&user));
        app.user = Some(user);
        (app, dir)
    }

    fn render_to_text(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.cell((x, y)).unwrap().symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn employee_role_renders_only_the_employee_view() {
        let (app, _dir) = app_for_role(Role::Employee);
        let text = render_to_text(&app);
        assert!(text.contains("My Tasks"));
        assert!(!text.contains("Projects"));
        assert!(!text.contains("account is being set up"));
    }

    #[test]
    fn scrum_master_role_renders_only_the_scrum_master_view() {
        let (app, _dir) = app_for_role(Role::ScrumMaster);
        let text = render_to_text(&app);
        assert!(text.contains("Projects"));
        assert!(!text.contains("My Tasks"));
        assert!(!text.contains("account is being set up"));
    }

    #[test]
    fn unrecognized_role_renders_the_placeholder_and_neither_dashboard() {
        let (app, _dir) = app_for_role(Role::Unknown);
        let text = render_to_text(&app);
        assert!(text.contains("account is being set up"));
        assert!(!text.contains("My Tasks"));
        assert!(!text.contains("Projects"));
    }

    #[test]
    fn login_screen_shows_field_errors_inline() {
        let (mut app, _dir) = blank_app();
        app.login_form.validate();
        let text = render_to_text(&app);
        assert!(text.contains("Username is required"));
        assert!(text.contains("Password is required"));
    }

    #[test]
    fn register_screen_shows_the_pending_label_while_submitting() {
        let (mut app, _dir) = blank_app();
        app.screen = Screen::Register;
        app.register_form.submitting = true;
        let text = render_to_text(&app);
        assert!(text.contains("Creating account..."));
    }
}
