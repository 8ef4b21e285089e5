use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::api::{Api, ApiError, NewTask, RegisterRequest, TaskPatch, TokenPair};
use crate::model::analytics::{DashboardStats, StatusCounts, TaskAnalytics};
use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::{Role, User};

pub fn make_user(id: i64, username: &str, role: Role) -> User {
    User {
        id,
        username: username.to_string(),
        email: format!("{username}@taskflow.dev"),
        first_name: username.to_string(),
        last_name: "Tester".to_string(),
        role,
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
    }
}

pub fn make_project(id: i64, name: &str) -> Project {
    Project {
        id,
        name: name.to_string(),
        description: None,
        status: ProjectStatus::Active,
        start_date: None,
        end_date: None,
        created_by: make_user(1, "lead", Role::ScrumMaster),
    }
}

pub fn make_task(id: i64, title: &str, status: TaskStatus) -> Task {
    Task {
        id,
        title: title.to_string(),
        description: None,
        status,
        priority: TaskPriority::Medium,
        due_date: None,
        assignee: Some(make_user(2, "ana", Role::Employee)),
        created_by: make_user(1, "lead", Role::ScrumMaster),
        project: make_project(1, "Atlas"),
    }
}

#[derive(Default)]
pub struct MockCalls {
    /// Every API method bumps this, so tests can assert "no call was made".
    pub total: usize,
    pub login: Vec<(String, String)>,
    pub register: Vec<RegisterRequest>,
    pub status_changes: Vec<(i64, TaskStatus)>,
    pub created: Vec<(i64, String)>,
}

/// Canned-response API in the mold of a mock provider: succeeds with
/// fixtures, or fails every call with one configured error.
pub struct MockApi {
    pub failure: Option<(u16, String)>,
    pub user: User,
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    pub stats: DashboardStats,
    pub analytics: TaskAnalytics,
    pub calls: Arc<Mutex<MockCalls>>,
}

impl MockApi {
    pub fn ok() -> Self {
        Self {
            failure: None,
            user: make_user(2, "ana", Role::Employee),
            tasks: vec![
                make_task(1, "Wire up login", TaskStatus::Todo),
                make_task(2, "Fix board drag", TaskStatus::InProgress),
            ],
            projects: vec![make_project(1, "Atlas"), make_project(2, "Borealis")],
            stats: DashboardStats {
                total_tasks: 2,
                in_progress_tasks: 1,
                ..DashboardStats::default()
            },
            analytics: TaskAnalytics {
                status_counts: StatusCounts {
                    todo: 1,
                    in_progress: 1,
                    ..StatusCounts::default()
                },
                ..TaskAnalytics::default()
            },
            calls: Arc::new(Mutex::new(MockCalls::default())),
        }
    }

    pub fn failing(code: u16, message: &str) -> Self {
        Self {
            failure: Some((code, message.to_string())),
            ..Self::ok()
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = user;
        self
    }

    fn check(&self) -> Result<(), ApiError> {
        self.calls.lock().unwrap().total += 1;
        match &self.failure {
            Some((code, message)) => Err(ApiError::Status {
                code: *code,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Api for MockApi {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        self.check()?;
        self.calls
            .lock()
            .unwrap()
            .login
            .push((username.to_string(), password.to_string()));
        Ok(TokenPair {
            access: "access".into(),
            refresh: "refresh".into(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.check()?;
        self.calls.lock().unwrap().register.push(request.clone());
        Ok(make_user(9, &request.username, Role::Employee))
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.check()?;
        Ok(self.user.clone())
    }

    async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.check()?;
        Ok(self.projects.clone())
    }

    async fn project_tasks(&self, _project_id: i64) -> Result<Vec<Task>, ApiError> {
        self.check()?;
        Ok(self.tasks.clone())
    }

    async fn create_task(&self, project_id: i64, task: &NewTask) -> Result<Task, ApiError> {
        self.check()?;
        self.calls
            .lock()
            .unwrap()
            .created
            .push((project_id, task.title.clone()));
        Ok(make_task(99, &task.title, TaskStatus::Todo))
    }

    async fn my_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.check()?;
        Ok(self.tasks.clone())
    }

    async fn task(&self, task_id: i64) -> Result<Task, ApiError> {
        self.check()?;
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(ApiError::Status {
                code: 404,
                message: "Not found".into(),
            })
    }

    async fn update_task(&self, task_id: i64, _patch: &TaskPatch) -> Result<Task, ApiError> {
        self.check()?;
        self.tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .ok_or(ApiError::Status {
                code: 404,
                message: "Not found".into(),
            })
    }

    async fn change_status(&self, task_id: i64, status: TaskStatus) -> Result<Task, ApiError> {
        self.check()?;
        self.calls
            .lock()
            .unwrap()
            .status_changes
            .push((task_id, status));
        let mut task = self
            .tasks
            .iter()
            .find(|t| t.id == task_id)
            .cloned()
            .unwrap_or_else(|| make_task(task_id, "Task", status));
        task.status = status;
        Ok(task)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.check()?;
        Ok(self.stats.clone())
    }

    async fn task_analytics(&self) -> Result<TaskAnalytics, ApiError> {
        self.check()?;
        Ok(self.analytics.clone())
    }
}
