pub mod http;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;
use crate::model::analytics::{DashboardStats, TaskAnalytics};
use crate::model::project::Project;
use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::User;
use crate::session::Session;

pub use http::HttpApi;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response; `message` is whatever the server put in its error
    /// body (`detail`, `message`, or the first field error).
    #[error("{message}")]
    Status { code: u16, message: String },
    #[error("Session expired, please sign in again")]
    Unauthenticated,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub department: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
}

/// One method per REST call the TaskFlow backend exposes. `login`
/// implementations also store the returned token pair in the shared
/// session so subsequent calls carry it.
#[async_trait]
pub trait Api: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError>;
    async fn profile(&self) -> Result<User, ApiError>;
    async fn projects(&self) -> Result<Vec<Project>, ApiError>;
    async fn project_tasks(&self, project_id: i64) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, project_id: i64, task: &NewTask) -> Result<Task, ApiError>;
    async fn my_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn task(&self, task_id: i64) -> Result<Task, ApiError>;
    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> Result<Task, ApiError>;
    async fn change_status(&self, task_id: i64, status: TaskStatus) -> Result<Task, ApiError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    async fn task_analytics(&self) -> Result<TaskAnalytics, ApiError>;
}

pub fn create_api(config: &AppConfig, session: Arc<Mutex<Session>>) -> Arc<dyn Api> {
    Arc::new(HttpApi::new(config.server.base_url.clone(), session))
}
