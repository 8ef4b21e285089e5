use std::sync::{Arc, Mutex};

use super::Services;
use crate::api::{NewTask, RegisterRequest};
use crate::model::analytics::{DashboardStats, TaskAnalytics};
use crate::model::task::{TaskPriority, TaskStatus};
use crate::session::Session;
use crate::testutil::{make_task, MockApi};

fn services_with(mock: MockApi) -> (Services, Arc<Mutex<Session>>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let session = Arc::new(Mutex::new(Session::load_from(
        dir.path().join("session.json"),
    )));
    let services = Services::new(Arc::new(mock), session.clone());
    (services, session, dir)
}

#[tokio::test]
async fn failed_list_reads_resolve_to_empty() {
    let (services, _session, _dir) = services_with(MockApi::failing(500, "boom"));

    assert!(services.tasks.my_tasks().await.is_empty());
    assert!(services.tasks.project_tasks(1).await.is_empty());
    assert!(services.projects.projects().await.is_empty());
}

#[tokio::test]
async fn failed_aggregate_reads_resolve_to_zero_defaults() {
    let (services, _session, _dir) = services_with(MockApi::failing(500, "boom"));

    assert_eq!(
        services.analytics.dashboard_stats().await,
        DashboardStats::default()
    );
    assert_eq!(
        services.analytics.task_analytics().await,
        TaskAnalytics::default()
    );
}

#[tokio::test]
async fn failed_single_task_read_is_none() {
    let (services, _session, _dir) = services_with(MockApi::failing(500, "boom"));
    assert!(services.tasks.task(1).await.is_none());
}

#[tokio::test]
async fn register_passes_the_payload_through() {
    let mock = MockApi::ok();
    let calls = mock.calls.clone();
    let (services, _session, _dir) = services_with(mock);

    let request = RegisterRequest {
        username: "ana".into(),
        email: "ana@taskflow.dev".into(),
        password: "Sup3rSecret".into(),
        first_name: "Ana".into(),
        last_name: "Silva".into(),
        phone_number: String::new(),
        department: String::new(),
    };
    services.auth.register(&request).await.unwrap();

    let recorded = &calls.lock().unwrap().register;
    assert_eq!(recorded.as_slice(), &[request]);
}

#[tokio::test]
async fn register_failure_carries_the_server_message() {
    let (services, _session, _dir) = services_with(MockApi::failing(
        400,
        "username: A user with that username already exists.",
    ));

    let request = RegisterRequest {
        username: "ana".into(),
        email: "ana@taskflow.dev".into(),
        password: "Sup3rSecret".into(),
        first_name: "Ana".into(),
        last_name: "Silva".into(),
        phone_number: String::new(),
        department: String::new(),
    };
    let err = services.auth.register(&request).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "username: A user with that username already exists."
    );
}

#[tokio::test]
async fn login_stores_the_user_in_the_session() {
    let (services, session, _dir) = services_with(MockApi::ok());

    let user = services.auth.login("ana", "Sup3rSecret").await.unwrap();
    assert_eq!(user.username, "ana");
    assert_eq!(
        session.lock().unwrap().user().map(|u| u.username.clone()),
        Some("ana".to_string())
    );
}

#[tokio::test]
async fn login_failure_carries_the_server_message() {
    let (services, _session, _dir) = services_with(MockApi::failing(
        401,
        "No active account found with the given credentials",
    ));

    let err = services.auth.login("ana", "nope").await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "No active account found with the given credentials"
    );
}

#[tokio::test]
async fn advance_status_requests_the_next_column() {
    let mock = MockApi::ok();
    let calls = mock.calls.clone();
    let (services, _session, _dir) = services_with(mock);

    let task = make_task(2, "Fix board drag", TaskStatus::InProgress);
    let updated = services.tasks.advance_status(&task).await.unwrap();

    assert_eq!(updated.status, TaskStatus::Review);
    assert_eq!(
        calls.lock().unwrap().status_changes.as_slice(),
        &[(2, TaskStatus::Review)]
    );
}

#[tokio::test]
async fn create_targets_the_given_project() {
    let mock = MockApi::ok();
    let calls = mock.calls.clone();
    let (services, _session, _dir) = services_with(mock);

    let new_task = NewTask {
        title: "Ship onboarding".into(),
        description: None,
        priority: TaskPriority::Medium,
        due_date: None,
        assignee_id: None,
    };
    services.tasks.create(7, &new_task).await.unwrap();

    assert_eq!(
        calls.lock().unwrap().created.as_slice(),
        &[(7, "Ship onboarding".to_string())]
    );
}

#[tokio::test]
async fn logout_clears_the_session_and_makes_no_call() {
    let mock = MockApi::ok();
    let calls = mock.calls.clone();
    let (services, session, _dir) = services_with(mock);

    {
        let mut session = session.lock().unwrap();
        session
            .store_tokens("access".into(), "refresh".into())
            .unwrap();
        session
            .store_user(crate::testutil::make_user(
                2,
                "ana",
                crate::model::user::Role::Employee,
            ))
            .unwrap();
    }

    services.auth.logout();

    let session = session.lock().unwrap();
    assert!(session.access().is_none());
    assert!(session.refresh().is_none());
    assert!(session.user().is_none());
    assert_eq!(calls.lock().unwrap().total, 0);
}
