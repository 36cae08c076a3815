//! Session collaborator turning portal access codes into role assertions.
//!
//! Credential handling is deliberately trivial: agents present any code of a
//! configured minimum length, managers one of a fixed code table. The
//! listings workflow never sees a code, only the resulting `Session` the
//! caller asserts on later requests.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::SessionConfig;
use crate::workflows::listings::domain::Role;

/// A resolved portal session: who is acting, and in which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub principal: String,
    pub role: Role,
}

/// A manager access code and the display name it unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerCredential {
    pub code: String,
    pub display_name: String,
}

/// Access-code policy for both portals.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    agent_code_min_len: usize,
    manager_codes: Vec<ManagerCredential>,
}

impl AccessPolicy {
    pub fn new(agent_code_min_len: usize, manager_codes: Vec<ManagerCredential>) -> Self {
        Self {
            agent_code_min_len,
            manager_codes,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        let manager_codes = config
            .manager_codes
            .iter()
            .map(|entry| ManagerCredential {
                code: entry.code.clone(),
                display_name: entry.name.clone(),
            })
            .collect();
        Self::new(config.agent_code_min_len, manager_codes)
    }

    /// Any sufficiently long code opens an agent session. The principal is
    /// derived from the code, so the same code always maps to the same
    /// agent identity.
    pub fn agent_session(&self, code: &str) -> Result<Session, AccessError> {
        let code = code.trim();
        if code.chars().count() < self.agent_code_min_len {
            return Err(AccessError::CodeTooShort {
                min: self.agent_code_min_len,
            });
        }

        Ok(Session {
            principal: format!("agent-{code}"),
            role: Role::Agent,
        })
    }

    /// Manager codes come from a fixed table; the session carries the
    /// manager's display name as principal.
    pub fn manager_session(&self, code: &str) -> Result<Session, AccessError> {
        let code = code.trim();
        self.manager_codes
            .iter()
            .find(|credential| credential.code == code)
            .map(|credential| Session {
                principal: credential.display_name.clone(),
                role: Role::Manager,
            })
            .ok_or(AccessError::UnknownManagerCode)
    }
}

/// Failed login attempts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("agent access code must be at least {min} characters")]
    CodeTooShort { min: usize },
    #[error("manager access code not recognized")]
    UnknownManagerCode,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub code: String,
}

/// Router builder exposing the two portal login endpoints.
pub fn session_router(policy: Arc<AccessPolicy>) -> Router {
    Router::new()
        .route("/api/v1/sessions/agent", post(agent_login_handler))
        .route("/api/v1/sessions/manager", post(manager_login_handler))
        .with_state(policy)
}

pub(crate) async fn agent_login_handler(
    State(policy): State<Arc<AccessPolicy>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response {
    login_response(policy.agent_session(&request.code))
}

pub(crate) async fn manager_login_handler(
    State(policy): State<Arc<AccessPolicy>>,
    axum::Json(request): axum::Json<LoginRequest>,
) -> Response {
    login_response(policy.manager_session(&request.code))
}

fn login_response(result: Result<Session, AccessError>) -> Response {
    match result {
        Ok(session) => (StatusCode::OK, axum::Json(session)).into_response(),
        Err(error) => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> AccessPolicy {
        AccessPolicy::new(
            3,
            vec![
                ManagerCredential {
                    code: "000".to_string(),
                    display_name: "Lera".to_string(),
                },
                ManagerCredential {
                    code: "111".to_string(),
                    display_name: "Ilya".to_string(),
                },
            ],
        )
    }

    #[test]
    fn agent_codes_below_minimum_are_rejected() {
        match policy().agent_session("ab") {
            Err(AccessError::CodeTooShort { min: 3 }) => {}
            other => panic!("expected short-code rejection, got {other:?}"),
        }
    }

    #[test]
    fn agent_code_is_trimmed_before_the_length_check() {
        assert!(policy().agent_session("  ab  ").is_err());

        let session = policy().agent_session("  4452  ").expect("code accepted");
        assert_eq!(session.principal, "agent-4452");
        assert_eq!(session.role, Role::Agent);
    }

    #[test]
    fn same_agent_code_always_resolves_the_same_principal() {
        let first = policy().agent_session("4452").expect("accepted");
        let second = policy().agent_session("4452").expect("accepted");
        assert_eq!(first, second);
    }

    #[test]
    fn known_manager_codes_resolve_display_names() {
        let session = policy().manager_session("000").expect("code accepted");
        assert_eq!(session.principal, "Lera");
        assert_eq!(session.role, Role::Manager);

        let session = policy().manager_session("111").expect("code accepted");
        assert_eq!(session.principal, "Ilya");
    }

    #[test]
    fn unknown_manager_codes_are_rejected() {
        assert_eq!(
            policy().manager_session("222"),
            Err(AccessError::UnknownManagerCode)
        );
    }
}
