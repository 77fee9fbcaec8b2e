mod common;

use axum::http::StatusCode;
use common::{user, TestApp};
use polo_access::services::UserMetadata;
use polo_access::models::{ModuleKey, PermissionRecord};
use serde_json::json;

#[tokio::test]
async fn test_super_admin_may_assign_every_role() {
    let app = TestApp::new();
    let token = app.login(user("root", Some("super_admin"), None));

    let (status, body) = app.get("/provisioning/roles", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let roles = body.as_array().unwrap();
    assert_eq!(roles.len(), 20);
    assert_eq!(roles[0], json!({"role": "super_admin", "label": "Super Admin"}));
}

#[tokio::test]
async fn test_branch_director_assigns_branch_roles_only() {
    let app = TestApp::new();
    let token = app.login(user("dir7", Some("diretor_polo"), Some("B7")));

    let (status, body) = app.get("/provisioning/roles", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let roles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["role"].as_str().unwrap())
        .collect();
    assert!(roles.contains(&"professor"));
    assert!(!roles.contains(&"diretor_geral"));
}

#[tokio::test]
async fn test_branch_director_plan_is_pinned_to_own_branch() {
    let app = TestApp::new();
    let token = app.login(user("dir7", Some("diretor_polo"), Some("B7")));

    let (status, body) = app
        .post(
            "/provisioning/plan",
            Some(&token),
            json!({"name": "Maria", "email": "maria@polo.org", "role": "professor"}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["identity"]["role"], "professor");
    assert_eq!(body["identity"]["scope"], "branch_specific");
    assert_eq!(body["identity"]["branch_id"], "B7");

    let (status, _) = app
        .post(
            "/provisioning/plan",
            Some(&token),
            json!({"name": "Maria", "email": "maria@polo.org", "role": "professor", "polo_id": "B2"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/provisioning/plan",
            Some(&token),
            json!({"name": "Maria", "email": "maria@polo.org", "role": "diretor_geral"}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_plan_rejects_bad_input() {
    let app = TestApp::new();
    let token = app.login(user("root", Some("admin_geral"), None));

    let (status, body) = app
        .post(
            "/provisioning/plan",
            Some(&token),
            json!({"name": "Maria", "email": "not-an-email", "role": "professor", "branch_id": "B1"}),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Validation error");

    let (status, _) = app
        .post(
            "/provisioning/plan",
            Some(&token),
            json!({"name": "Maria", "email": "maria@polo.org", "role": "zelador"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/provisioning/plan",
            Some(&token),
            json!({"name": "Maria", "email": "maria@polo.org", "role": "professor"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provisioning_requires_user_management_module() {
    let app = TestApp::new();
    let mut payload = user("aux", Some("auxiliar"), Some("B1"));
    payload.metadata = Some(UserMetadata {
        permissions: Some(PermissionRecord::limited([ModuleKey::Attendance])),
    });
    let token = app.login(payload);

    let (status, body) = app.get("/provisioning/roles", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].as_str().unwrap().contains("manage_users"));
}
