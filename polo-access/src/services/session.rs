//! Session adapter - turns the backend's user payload into a [`Principal`].
//!
//! The evaluator never reads raw payloads; this module is the boundary.

use async_trait::async_trait;
use dashmap::DashMap;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::models::{
    AccessScope, AdminSession, Identity, PermissionRecord, Principal, Role, StudentSession,
};

/// Backend roles that mark a non-admin account.
const NON_ADMIN_ROLES: [&str; 2] = ["aluno", "responsavel"];

/// Roles whose session always starts with general scope.
const GLOBAL_SESSION_ROLES: [Role; 6] = [
    Role::SuperAdmin,
    Role::AdminGeral,
    Role::CoordenadorGeral,
    Role::DiretorGeral,
    Role::PrimeiroSecretarioGeral,
    Role::PrimeiroTesoureiroGeral,
];

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session backend unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Session backend returned status {0}")]
    Status(u16),
}

/// `GET /usuarios/me` response body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
    #[serde(default)]
    pub nome_completo: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub polo_id: Option<String>,
    #[serde(default)]
    pub aluno_id: Option<String>,
    #[serde(default)]
    pub metadata: Option<UserMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub permissions: Option<PermissionRecord>,
}

/// Build the principal for a restored or freshly logged-in session.
pub fn principal_from_payload(payload: UserPayload) -> Principal {
    let raw_role = payload
        .role
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());

    let Some(raw_role) = raw_role.filter(|r| !NON_ADMIN_ROLES.contains(r)) else {
        return Principal::Student(StudentSession {
            email: payload.email.or(payload.cpf).unwrap_or_default(),
            user_id: payload.id,
            student_id: payload.aluno_id,
        });
    };

    let role = Role::parse(raw_role);
    if !role.is_recognized() {
        tracing::warn!(user_id = %payload.id, role = %raw_role, "Unrecognized admin role in session payload");
    }

    let branch = payload.polo_id.as_deref().filter(|id| !id.trim().is_empty());
    let scope = match branch {
        _ if GLOBAL_SESSION_ROLES.contains(&role) => AccessScope::General,
        Some(id) => AccessScope::BranchSpecific(id.into()),
        None => AccessScope::General,
    };

    let email = payload.email.unwrap_or_default();
    let name = payload
        .nome_completo
        .or(payload.name)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    Principal::Admin(AdminSession {
        user_id: payload.id,
        email,
        name,
        profile: Some(Identity {
            role,
            scope,
            permissions: payload.metadata.and_then(|m| m.permissions),
        }),
    })
}

/// Resolves a bearer token into the current user.
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// `Ok(None)` when the token does not name a live session.
    async fn resolve(&self, token: &str) -> Result<Option<UserPayload>, SessionError>;
}

/// Session source backed by the REST backend.
#[derive(Clone)]
pub struct HttpSessionSource {
    client: Client,
    base_url: String,
}

impl HttpSessionSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SessionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn resolve(&self, token: &str) -> Result<Option<UserPayload>, SessionError> {
        let url = format!("{}/usuarios/me", self.base_url);

        let response = self.client.get(&url).bearer_auth(token).send().await.map_err(|e| {
            tracing::error!("Failed to send GET request to {}: {}", url, e);
            e
        })?;

        match response.status() {
            status if status.is_success() => Ok(Some(response.json().await?)),
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("Session token rejected by backend");
                Ok(None)
            }
            status => Err(SessionError::Status(status.as_u16())),
        }
    }
}

/// Token map held in memory, for fixtures and tests.
#[derive(Default)]
pub struct InMemorySessionSource {
    sessions: DashMap<String, UserPayload>,
}

impl InMemorySessionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: impl Into<String>, payload: UserPayload) {
        self.sessions.insert(token.into(), payload);
    }

    pub fn remove(&self, token: &str) {
        self.sessions.remove(token);
    }
}

impl FromIterator<(String, UserPayload)> for InMemorySessionSource {
    fn from_iter<I: IntoIterator<Item = (String, UserPayload)>>(iter: I) -> Self {
        Self {
            sessions: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl SessionSource for InMemorySessionSource {
    async fn resolve(&self, token: &str) -> Result<Option<UserPayload>, SessionError> {
        Ok(self.sessions.get(token).map(|entry| entry.value().clone()))
    }
}
