use std::sync::{Arc, Mutex};

use crate::api::{Api, ApiError, NewTask, RegisterRequest, TaskPatch};
use crate::model::analytics::{DashboardStats, TaskAnalytics};
use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::user::User;
use crate::session::Session;

#[cfg(test)]
mod tests;

/// Per-resource wrappers over the API. Read paths never propagate errors:
/// a failed list resolves to empty and a failed aggregate resolves to its
/// zero default, so a flaky backend can't take the dashboard down. Write
/// paths return the server's message for the UI to display.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub projects: ProjectService,
    pub analytics: AnalyticsService,
}

impl Services {
    pub fn new(api: Arc<dyn Api>, session: Arc<Mutex<Session>>) -> Self {
        Self {
            auth: AuthService {
                api: api.clone(),
                session,
            },
            tasks: TaskService { api: api.clone() },
            projects: ProjectService { api: api.clone() },
            analytics: AnalyticsService { api },
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn Api>,
    session: Arc<Mutex<Session>>,
}

impl AuthService {
    /// Exchange credentials for a token pair, then load the profile. The
    /// signed-in user ends up in the session alongside the tokens.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        self.api.login(username, password).await?;
        let user = self.api.profile().await?;
        {
            let mut session = self.session.lock().unwrap();
            let _ = session.store_user(user.clone());
        }
        Ok(user)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.api.register(request).await
    }

    /// Re-fetch the signed-in user's profile and update the session copy.
    /// `None` when the profile can't be fetched.
    pub async fn reload_profile(&self) -> Option<User> {
        let user = self.api.profile().await.ok()?;
        {
            let mut session = self.session.lock().unwrap();
            let _ = session.store_user(user.clone());
        }
        Some(user)
    }

    /// Client-side only: drop access, refresh, and user from the session.
    /// No HTTP call is made.
    pub fn logout(&self) {
        let _ = self.session.lock().unwrap().clear();
    }
}

#[derive(Clone)]
pub struct TaskService {
    api: Arc<dyn Api>,
}

impl TaskService {
    /// Tasks assigned to the signed-in user; empty on any failure.
    pub async fn my_tasks(&self) -> Vec<Task> {
        self.api.my_tasks().await.unwrap_or_default()
    }

    pub async fn project_tasks(&self, project_id: i64) -> Vec<Task> {
        self.api.project_tasks(project_id).await.unwrap_or_default()
    }

    pub async fn task(&self, task_id: i64) -> Option<Task> {
        self.api.task(task_id).await.ok()
    }

    pub async fn create(&self, project_id: i64, task: &NewTask) -> Result<Task, ApiError> {
        self.api.create_task(project_id, task).await
    }

    pub async fn update(&self, task_id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        self.api.update_task(task_id, patch).await
    }

    /// Move a task to the next board column.
    pub async fn advance_status(&self, task: &Task) -> Result<Task, ApiError> {
        self.api.change_status(task.id, task.status.next()).await
    }
}

#[derive(Clone)]
pub struct ProjectService {
    api: Arc<dyn Api>,
}

impl ProjectService {
    pub async fn projects(&self) -> Vec<Project> {
        self.api.projects().await.unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct AnalyticsService {
    api: Arc<dyn Api>,
}

impl AnalyticsService {
    pub async fn dashboard_stats(&self) -> DashboardStats {
        self.api.dashboard_stats().await.unwrap_or_default()
    }

    pub async fn task_analytics(&self) -> TaskAnalytics {
        self.api.task_analytics().await.unwrap_or_default()
    }
}
