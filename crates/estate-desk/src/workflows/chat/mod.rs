//! Agent-to-manager chat threads.
//!
//! Fully separate from the listings workflow: no listing state is shared
//! with or read from here. One in-memory log holds a thread per agent
//! principal; managers and the agent post into the same thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::workflows::listings::domain::Role;

/// A single message within an agent's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub role: Role,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// In-memory chat log. Threads are keyed by agent principal and created on
/// first post; reading an unknown thread is just empty.
#[derive(Default)]
pub struct ChatLog {
    threads: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

static MESSAGE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_message_id() -> String {
    let id = MESSAGE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("msg-{id:06}")
}

impl ChatLog {
    /// Append a message to the thread. Blank bodies are rejected.
    pub fn post(
        &self,
        thread: &str,
        author: &str,
        role: Role,
        body: &str,
    ) -> Result<ChatMessage, ChatError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let message = ChatMessage {
            id: next_message_id(),
            author: author.to_string(),
            role,
            body: body.to_string(),
            sent_at: Utc::now(),
        };

        let mut threads = self.threads.lock().expect("chat mutex poisoned");
        threads
            .entry(thread.to_string())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    /// Messages in send order.
    pub fn thread(&self, thread: &str) -> Vec<ChatMessage> {
        let threads = self.threads.lock().expect("chat mutex poisoned");
        threads.get(thread).cloned().unwrap_or_default()
    }
}

/// Rejected chat posts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("message body is empty")]
    EmptyMessage,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub author: String,
    pub role: Role,
    pub body: String,
}

/// Router builder for the per-agent chat thread.
pub fn chat_router(log: Arc<ChatLog>) -> Router {
    Router::new()
        .route(
            "/api/v1/chat/:agent_id/messages",
            post(post_message_handler).get(thread_handler),
        )
        .with_state(log)
}

pub(crate) async fn post_message_handler(
    State(log): State<Arc<ChatLog>>,
    Path(agent_id): Path<String>,
    axum::Json(request): axum::Json<PostMessageRequest>,
) -> Response {
    match log.post(&agent_id, &request.author, request.role, &request.body) {
        Ok(message) => (StatusCode::CREATED, axum::Json(message)).into_response(),
        Err(error) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "error": error.to_string() })),
        )
            .into_response(),
    }
}

pub(crate) async fn thread_handler(
    State(log): State<Arc<ChatLog>>,
    Path(agent_id): Path<String>,
) -> Response {
    (StatusCode::OK, axum::Json(log.thread(&agent_id))).into_response()
}
