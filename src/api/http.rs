use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::{Api, ApiError, NewTask, RegisterRequest, TaskPatch, TokenPair};
use crate::model::analytics::{DashboardStats, TaskAnalytics};
use crate::model::project::Project;
use crate::model::task::{Task, TaskStatus};
use crate::model::user::User;
use crate::session::Session;

pub struct HttpApi {
    base_url: String,
    client: reqwest::Client,
    session: Arc<Mutex<Session>>,
}

impl HttpApi {
    pub fn new(base_url: String, session: Arc<Mutex<Session>>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn access_token(&self) -> Option<String> {
        self.session.lock().unwrap().access().map(String::from)
    }

    async fn refresh_access(&self) -> Result<(), ApiError> {
        let refresh = {
            let session = self.session.lock().unwrap();
            session.refresh().map(String::from)
        };
        let refresh = match refresh {
            Some(token) => token,
            None => return Err(ApiError::Unauthenticated),
        };

        let resp = self
            .client
            .post(self.url("/token/refresh/"))
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ApiError::Unauthenticated);
        }

        #[derive(Deserialize)]
        struct Refreshed {
            access: String,
        }
        let body: Refreshed = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        let mut session = self.session.lock().unwrap();
        let _ = session.store_access(body.access);
        Ok(())
    }

    /// Refresh up front when the stored access token is already past its
    /// expiry claim.
    async fn ensure_fresh(&self) -> Result<(), ApiError> {
        let expired = {
            let session = self.session.lock().unwrap();
            match session.access_expires_at() {
                Some(expiry) => expiry <= chrono::Utc::now(),
                None => false,
            }
        };
        if expired {
            self.refresh_access().await
        } else {
            Ok(())
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authed: bool,
    ) -> Result<reqwest::Response, ApiError> {
        if authed {
            self.ensure_fresh().await?;
        }

        let mut refreshed = false;
        loop {
            let mut request = self.client.request(method.clone(), self.url(path));
            if authed {
                if let Some(token) = self.access_token() {
                    request = request.bearer_auth(token);
                }
            }
            if let Some(body) = body {
                request = request.json(body);
            }

            let resp = request.send().await?;
            if authed && resp.status() == StatusCode::UNAUTHORIZED && !refreshed {
                refreshed = true;
                self.refresh_access().await?;
                continue;
            }
            return Ok(resp);
        }
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if status.is_success() {
            resp.json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ApiError::Status {
                code: status.as_u16(),
                message: extract_message(&body, status),
            })
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(Method::GET, path, None, true).await?;
        Self::parse(resp).await
    }
}

/// Pull a human-readable message out of a DRF-style error body. Falls back
/// to the status code when the body isn't JSON or has no usable text.
fn extract_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(object) = value.as_object() {
            for (field, errors) in object {
                match errors {
                    Value::String(text) => return format!("{field}: {text}"),
                    Value::Array(items) => {
                        if let Some(first) = items.iter().find_map(Value::as_str) {
                            return format!("{field}: {first}");
                        }
                    }
                    _ => {}
                }
            }
        }
    }
    format!("Request failed with status {}", status.as_u16())
}

#[async_trait]
impl Api for HttpApi {
    async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let body = serde_json::json!({ "username": username, "password": password });
        let resp = self.send(Method::POST, "/token/", Some(&body), false).await?;
        let pair: TokenPair = Self::parse(resp).await?;

        let mut session = self.session.lock().unwrap();
        let _ = session.store_tokens(pair.access.clone(), pair.refresh.clone());
        Ok(pair)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let body = serde_json::to_value(request).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = self
            .send(Method::POST, "/users/register/", Some(&body), false)
            .await?;
        Self::parse(resp).await
    }

    async fn profile(&self) -> Result<User, ApiError> {
        self.get("/users/profile/").await
    }

    async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects/").await
    }

    async fn project_tasks(&self, project_id: i64) -> Result<Vec<Task>, ApiError> {
        self.get(&format!("/projects/{project_id}/tasks/")).await
    }

    async fn create_task(&self, project_id: i64, task: &NewTask) -> Result<Task, ApiError> {
        let body = serde_json::to_value(task).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = self
            .send(
                Method::POST,
                &format!("/projects/{project_id}/tasks/"),
                Some(&body),
                true,
            )
            .await?;
        Self::parse(resp).await
    }

    async fn my_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get("/tasks/").await
    }

    async fn task(&self, task_id: i64) -> Result<Task, ApiError> {
        self.get(&format!("/tasks/{task_id}/")).await
    }

    async fn update_task(&self, task_id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
        let body = serde_json::to_value(patch).map_err(|e| ApiError::Decode(e.to_string()))?;
        let resp = self
            .send(
                Method::PATCH,
                &format!("/tasks/{task_id}/"),
                Some(&body),
                true,
            )
            .await?;
        Self::parse(resp).await
    }

    async fn change_status(&self, task_id: i64, status: TaskStatus) -> Result<Task, ApiError> {
        let body = serde_json::json!({ "status": status });
        let resp = self
            .send(
                Method::POST,
                &format!("/tasks/{task_id}/change_status/"),
                Some(&body),
                true,
            )
            .await?;
        Self::parse(resp).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/analytics/dashboard/").await
    }

    async fn task_analytics(&self) -> Result<TaskAnalytics, ApiError> {
        self.get("/analytics/tasks/").await
    }
}
