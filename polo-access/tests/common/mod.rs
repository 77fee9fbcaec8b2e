//! Shared setup for polo-access integration tests.
//!
//! Builds the full router over in-memory sessions and a fixed five-branch
//! directory, and drives it in-process.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use polo_access::{
    build_router,
    config::{AccessConfig, BackendConfig, Environment},
    models::{Branch, BranchId},
    services::{
        BranchDirectory, InMemorySessionSource, SessionSource, StaticBranchDirectory, UserPayload,
    },
    AppState,
};
use serde_json::Value;
use service_core::config::Config;
use std::sync::Arc;
use tower::ServiceExt;

pub const BRANCH_IDS: [&str; 5] = ["B1", "B2", "B3", "B7", "B9"];

pub fn directory() -> Vec<Branch> {
    vec![
        Branch::new("B1", "Polo Centro"),
        Branch::new("B2", "Polo Norte"),
        Branch::new("B3", "Polo Sul"),
        Branch::new("B7", "Polo Leste"),
        Branch::new("B9", "Polo Oeste"),
    ]
}

pub fn branch_ids() -> Vec<BranchId> {
    BRANCH_IDS.iter().map(|id| BranchId::from(*id)).collect()
}

pub fn test_config() -> AccessConfig {
    AccessConfig {
        common: Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "polo-access-test".to_string(),
        service_version: "test".to_string(),
        log_level: "error".to_string(),
        backend: BackendConfig {
            url: "http://localhost:0".to_string(),
            timeout_seconds: 1,
        },
        fixtures: None,
    }
}

pub fn user(id: &str, role: Option<&str>, polo_id: Option<&str>) -> UserPayload {
    UserPayload {
        id: id.to_string(),
        email: Some(format!("{}@polo.org", id)),
        role: role.map(str::to_string),
        polo_id: polo_id.map(str::to_string),
        ..Default::default()
    }
}

pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<InMemorySessionSource>,
}

impl TestApp {
    pub fn new() -> Self {
        let sessions = Arc::new(InMemorySessionSource::new());
        let state = AppState {
            config: test_config(),
            sessions: sessions.clone(),
            branches: Arc::new(StaticBranchDirectory::new(directory())),
        };

        Self {
            router: build_router(state),
            sessions,
        }
    }

    /// Router over arbitrary sources. `sessions` is left empty.
    pub fn with_sources(
        sessions: Arc<dyn SessionSource>,
        branches: Arc<dyn BranchDirectory>,
    ) -> Router {
        build_router(AppState {
            config: test_config(),
            sessions,
            branches,
        })
    }

    /// Registers a session and returns its bearer token.
    pub fn login(&self, payload: UserPayload) -> String {
        let token = format!("token-{}", payload.id);
        self.sessions.insert(token.clone(), payload);
        token
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        read_json(self.request(Method::GET, uri, token, None).await).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        read_json(self.request(Method::POST, uri, token, Some(body)).await).await
    }
}

pub async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
