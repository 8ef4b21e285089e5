use std::sync::{Arc, Mutex};
use std::time::Instant;

use tokio::sync::mpsc;

use crate::activity::ActivityLog;
use crate::api::{NewTask, TaskPatch};
use crate::event::KeyAction;
use crate::forms::login::LoginForm;
use crate::forms::register::RegisterForm;
use crate::model::analytics::{DashboardStats, TaskAnalytics};
use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::{Role, User};
use crate::services::Services;
use crate::session::Session;

#[derive(Debug)]
pub enum Action {
    Key(KeyAction),
    Tick,
    LoginFinished(Result<User, String>),
    RegisterFinished(Result<User, String>),
    ProfileLoaded(Option<User>),
    MyTasksLoaded(Vec<Task>),
    ProjectsLoaded(Vec<Project>),
    ProjectTasksLoaded(i64, Vec<Task>),
    StatsLoaded(DashboardStats),
    AnalyticsLoaded(TaskAnalytics),
    TaskUpdated(Task),
    TaskCreated(Task),
    WriteFailed(String),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    Employee,
    ScrumMaster,
    /// Account exists but its role isn't one this client knows; show the
    /// "being set up" placeholder instead of either dashboard.
    Pending,
}

impl DashboardView {
    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::Employee => DashboardView::Employee,
            Role::ScrumMaster => DashboardView::ScrumMaster,
            Role::Unknown => DashboardView::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Dashboard(DashboardView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Projects,
    Tasks,
}

pub struct App {
    pub screen: Screen,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub user: Option<User>,
    pub my_tasks: Vec<Task>,
    pub selected_my_task: usize,
    pub projects: Vec<Project>,
    pub selected_project: usize,
    pub project_tasks: Vec<Task>,
    pub selected_project_task: usize,
    pub pane: Pane,
    pub stats: DashboardStats,
    pub analytics: TaskAnalytics,
    pub loading: bool,
    pub flash_message: Option<(String, Instant)>,
    pub new_task_input: Option<String>,
    pub should_quit: bool,
    pub action_tx: mpsc::UnboundedSender<Action>,
    services: Services,
    activity: ActivityLog,
}

impl App {
    pub fn new(
        services: Services,
        session: Arc<Mutex<Session>>,
        activity: ActivityLog,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let (user, authenticated) = {
            let session = session.lock().unwrap();
            (session.user().cloned(), session.is_authenticated())
        };
        let screen = match &user {
            // A stored user without tokens still has to sign in
            Some(user) if authenticated => Screen::Dashboard(DashboardView::for_user(user)),
            _ => Screen::Login,
        };

        Self {
            screen,
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            user,
            my_tasks: Vec::new(),
            selected_my_task: 0,
            projects: Vec::new(),
            selected_project: 0,
            project_tasks: Vec::new(),
            selected_project_task: 0,
            pane: Pane::Projects,
            stats: DashboardStats::default(),
            analytics: TaskAnalytics::default(),
            loading: false,
            flash_message: None,
            new_task_input: None,
            should_quit: false,
            action_tx,
            services,
            activity,
        }
    }

    pub async fn update(&mut self, action: Action) {
        // Clear flash message after 3 seconds
        if let Some((_, t)) = &self.flash_message {
            if t.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }

        match action {
            Action::Key(key) => self.handle_key(key).await,
            Action::Tick => {}
            Action::LoginFinished(Ok(user)) => {
                self.login_form = LoginForm::default();
                let _ = self.activity.record("login", None, Some(&user.username));
                self.screen = Screen::Dashboard(DashboardView::for_user(&user));
                self.user = Some(user);
                self.refresh_dashboard().await;
            }
            Action::LoginFinished(Err(message)) => {
                self.login_form.submitting = false;
                self.login_form.server_error = Some(message);
            }
            Action::RegisterFinished(Ok(user)) => {
                self.register_form = RegisterForm::default();
                let _ = self.activity.record("register", None, Some(&user.username));
                self.screen = Screen::Login;
                self.flash("Account created, sign in to continue".into());
            }
            Action::RegisterFinished(Err(message)) => {
                self.register_form.submitting = false;
                self.register_form.server_error = Some(message);
            }
            Action::ProfileLoaded(Some(user)) => {
                self.loading = false;
                let view = DashboardView::for_user(&user);
                self.user = Some(user);
                if self.screen != Screen::Dashboard(view) {
                    self.screen = Screen::Dashboard(view);
                    self.refresh_dashboard().await;
                }
            }
            Action::ProfileLoaded(None) => {
                self.loading = false;
            }
            Action::MyTasksLoaded(tasks) => {
                self.my_tasks = tasks;
                self.loading = false;
                if self.selected_my_task >= self.my_tasks.len() && !self.my_tasks.is_empty() {
                    self.selected_my_task = self.my_tasks.len() - 1;
                }
            }
            Action::ProjectsLoaded(projects) => {
                self.projects = projects;
                self.loading = false;
                if self.selected_project >= self.projects.len() {
                    self.selected_project = 0;
                }
                self.load_selected_project_tasks().await;
            }
            Action::ProjectTasksLoaded(project_id, tasks) => {
                // Ignore stale loads from a previously selected project
                let current = self.projects.get(self.selected_project).map(|p| p.id);
                if current == Some(project_id) {
                    self.project_tasks = tasks;
                    if self.selected_project_task >= self.project_tasks.len()
                        && !self.project_tasks.is_empty()
                    {
                        self.selected_project_task = self.project_tasks.len() - 1;
                    }
                }
            }
            Action::StatsLoaded(stats) => {
                self.stats = stats;
            }
            Action::AnalyticsLoaded(analytics) => {
                self.analytics = analytics;
            }
            Action::TaskUpdated(task) => {
                let _ = self
                    .activity
                    .record("status-change", Some(task.id), Some(task.status.as_str()));
                self.flash(format!("{} → {}", task.title, task.status.display_name()));
                replace_task(&mut self.my_tasks, &task);
                replace_task(&mut self.project_tasks, &task);
            }
            Action::TaskCreated(task) => {
                let _ = self
                    .activity
                    .record("task-create", Some(task.id), Some(&task.title));
                self.flash(format!("Created {}", task.title));
                self.project_tasks.push(task);
            }
            Action::WriteFailed(message) => {
                self.flash(message);
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
    }

    async fn handle_key(&mut self, key: KeyAction) {
        match self.screen {
            Screen::Login => self.handle_login_key(key),
            Screen::Register => self.handle_register_key(key),
            Screen::Dashboard(view) => self.handle_dashboard_key(view, key).await,
        }
    }

    fn handle_login_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Char(c) => self.login_form.insert(c),
            KeyAction::Backspace => self.login_form.backspace(),
            KeyAction::Tab | KeyAction::Down => self.login_form.focus_next(),
            KeyAction::BackTab | KeyAction::Up => self.login_form.focus_prev(),
            KeyAction::Select => self.submit_login(),
            KeyAction::SwitchForm => {
                self.screen = Screen::Register;
            }
            KeyAction::Escape => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn handle_register_key(&mut self, key: KeyAction) {
        match key {
            KeyAction::Char(c) => self.register_form.insert(c),
            KeyAction::Backspace => self.register_form.backspace(),
            KeyAction::Tab | KeyAction::Down => self.register_form.focus_next(),
            KeyAction::BackTab | KeyAction::Up => self.register_form.focus_prev(),
            KeyAction::Select => self.submit_register(),
            KeyAction::SwitchForm | KeyAction::Escape => {
                self.screen = Screen::Login;
            }
            _ => {}
        }
    }

    async fn handle_dashboard_key(&mut self, view: DashboardView, key: KeyAction) {
        // The new-task command bar captures input while open
        if let Some(input) = &mut self.new_task_input {
            match key {
                KeyAction::Char(c) => input.push(c),
                KeyAction::Backspace => {
                    input.pop();
                }
                KeyAction::Escape => self.new_task_input = None,
                KeyAction::Select => self.submit_new_task(),
                _ => {}
            }
            return;
        }

        match key {
            KeyAction::Char('q') | KeyAction::Escape => {
                self.should_quit = true;
            }
            KeyAction::Char('l') => self.logout(),
            KeyAction::Char('r') => self.refresh_dashboard().await,
            KeyAction::Char('s') => self.advance_selected_status(),
            KeyAction::Char('c') => self.claim_selected_task(),
            KeyAction::Char('n') if view == DashboardView::ScrumMaster => {
                self.new_task_input = Some(String::new());
            }
            KeyAction::Up => match view {
                DashboardView::Employee => {
                    if self.selected_my_task > 0 {
                        self.selected_my_task -= 1;
                    }
                }
                DashboardView::ScrumMaster => match self.pane {
                    Pane::Projects => {
                        if self.selected_project > 0 {
                            self.selected_project -= 1;
                        }
                    }
                    Pane::Tasks => {
                        if self.selected_project_task > 0 {
                            self.selected_project_task -= 1;
                        }
                    }
                },
                DashboardView::Pending => {}
            },
            KeyAction::Down => match view {
                DashboardView::Employee => {
                    if !self.my_tasks.is_empty() && self.selected_my_task < self.my_tasks.len() - 1
                    {
                        self.selected_my_task += 1;
                    }
                }
                DashboardView::ScrumMaster => match self.pane {
                    Pane::Projects => {
                        if !self.projects.is_empty()
                            && self.selected_project < self.projects.len() - 1
                        {
                            self.selected_project += 1;
                        }
                    }
                    Pane::Tasks => {
                        if !self.project_tasks.is_empty()
                            && self.selected_project_task < self.project_tasks.len() - 1
                        {
                            self.selected_project_task += 1;
                        }
                    }
                },
                DashboardView::Pending => {}
            },
            KeyAction::Left if view == DashboardView::ScrumMaster => {
                self.pane = Pane::Projects;
            }
            KeyAction::Right if view == DashboardView::ScrumMaster => {
                self.pane = Pane::Tasks;
            }
            KeyAction::Select
                if view == DashboardView::ScrumMaster && self.pane == Pane::Projects =>
            {
                self.load_selected_project_tasks().await;
            }
            KeyAction::Select => self.reload_selected_task().await,
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        if self.login_form.submitting {
            return;
        }
        if !self.login_form.validate() {
            return;
        }
        self.login_form.submitting = true;

        let auth = self.services.auth.clone();
        let username = self.login_form.username.trim().to_string();
        let password = self.login_form.password.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = auth
                .login(&username, &password)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::LoginFinished(result));
        });
    }

    fn submit_register(&mut self) {
        if self.register_form.submitting {
            return;
        }
        // Validation errors block submission; no call goes out
        if !self.register_form.validate() {
            return;
        }
        self.register_form.submitting = true;

        let auth = self.services.auth.clone();
        let request = self.register_form.payload();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = auth.register(&request).await.map_err(|e| e.to_string());
            let _ = tx.send(Action::RegisterFinished(result));
        });
    }

    fn submit_new_task(&mut self) {
        let title = match self.new_task_input.take() {
            Some(input) => input.trim().to_string(),
            None => return,
        };
        if title.is_empty() {
            return;
        }
        let project_id = match self.projects.get(self.selected_project) {
            Some(project) => project.id,
            None => {
                self.flash("No project selected".into());
                return;
            }
        };

        let tasks = self.services.tasks.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let new_task = NewTask {
                title,
                description: None,
                priority: TaskPriority::Medium,
                due_date: None,
                assignee_id: None,
            };
            match tasks.create(project_id, &new_task).await {
                Ok(task) => {
                    let _ = tx.send(Action::TaskCreated(task));
                }
                Err(e) => {
                    let _ = tx.send(Action::WriteFailed(e.to_string()));
                }
            }
        });
    }

    fn advance_selected_status(&mut self) {
        let task = match self.selected_task() {
            Some(task) => task.clone(),
            None => return,
        };
        if task.status == TaskStatus::Done {
            self.flash(format!("{} is already done", task.title));
            return;
        }

        let tasks = self.services.tasks.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match tasks.advance_status(&task).await {
                Ok(updated) => {
                    let _ = tx.send(Action::TaskUpdated(updated));
                }
                Err(e) => {
                    let _ = tx.send(Action::WriteFailed(e.to_string()));
                }
            }
        });
    }

    pub fn selected_task(&self) -> Option<&Task> {
        match self.screen {
            Screen::Dashboard(DashboardView::Employee) => self.my_tasks.get(self.selected_my_task),
            Screen::Dashboard(DashboardView::ScrumMaster) => {
                self.project_tasks.get(self.selected_project_task)
            }
            _ => None,
        }
    }

    pub async fn refresh_dashboard(&mut self) {
        let view = match self.screen {
            Screen::Dashboard(view) => view,
            _ => return,
        };
        self.loading = true;
        let tx = self.action_tx.clone();

        match view {
            DashboardView::Employee => {
                let (tasks, stats) = tokio::join!(
                    self.services.tasks.my_tasks(),
                    self.services.analytics.dashboard_stats()
                );
                let _ = tx.send(Action::MyTasksLoaded(tasks));
                let _ = tx.send(Action::StatsLoaded(stats));
            }
            DashboardView::ScrumMaster => {
                let (projects, analytics, stats) = tokio::join!(
                    self.services.projects.projects(),
                    self.services.analytics.task_analytics(),
                    self.services.analytics.dashboard_stats()
                );
                let _ = tx.send(Action::ProjectsLoaded(projects));
                let _ = tx.send(Action::AnalyticsLoaded(analytics));
                let _ = tx.send(Action::StatsLoaded(stats));
            }
            DashboardView::Pending => {
                let profile = self.services.auth.reload_profile().await;
                let _ = tx.send(Action::ProfileLoaded(profile));
            }
        }
    }

    async fn load_selected_project_tasks(&mut self) {
        let project_id = match self.projects.get(self.selected_project) {
            Some(project) => project.id,
            None => {
                self.project_tasks.clear();
                return;
            }
        };
        let tasks = self.services.tasks.project_tasks(project_id).await;
        let _ = self
            .action_tx
            .send(Action::ProjectTasksLoaded(project_id, tasks));
    }

    fn logout(&mut self) {
        self.services.auth.logout();
        let _ = self.activity.record("logout", None, None);

        self.user = None;
        self.my_tasks.clear();
        self.projects.clear();
        self.project_tasks.clear();
        self.selected_my_task = 0;
        self.selected_project = 0;
        self.selected_project_task = 0;
        self.stats = DashboardStats::default();
        self.analytics = TaskAnalytics::default();
        self.login_form = LoginForm::default();
        self.register_form = RegisterForm::default();
        self.new_task_input = None;
        self.pane = Pane::Projects;
        self.screen = Screen::Login;
        self.flash("Signed out".into());
    }

    fn flash(&mut self, message: String) {
        self.flash_message = Some((message, Instant::now()));
    }

    /// Fetch the selected task's latest server copy into the detail panel.
    pub async fn reload_selected_task(&mut self) {
        let task_id = match self.selected_task() {
            Some(task) => task.id,
            None => return,
        };
        if let Some(task) = self.services.tasks.task(task_id).await {
            replace_task(&mut self.my_tasks, &task);
            replace_task(&mut self.project_tasks, &task);
        }
    }

    /// Reassign the selected task to the signed-in user.
    pub fn claim_selected_task(&mut self) {
        let (task_id, user_id) = match (self.selected_task(), &self.user) {
            (Some(task), Some(user)) => (task.id, user.id),
            _ => return,
        };
        let tasks = self.services.tasks.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let patch = TaskPatch {
                assignee_id: Some(user_id),
                ..TaskPatch::default()
            };
            match tasks.update(task_id, &patch).await {
                Ok(updated) => {
                    let _ = tx.send(Action::TaskUpdated(updated));
                }
                Err(e) => {
                    let _ = tx.send(Action::WriteFailed(e.to_string()));
                }
            }
        });
    }
}

fn replace_task(tasks: &mut [Task], updated: &Task) {
    if let Some(slot) = tasks.iter_mut().find(|t| t.id == updated.id) {
        *slot = updated.clone();
    }
}
