//! Chat widget logic: one message in, one reply or fallback out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::ClientError;
use crate::traits::{ChatBackend, ChatRequest};

/// Shown when the endpoint answers without success.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error. Please try again.";

/// Shown when the endpoint cannot be reached or its answer cannot be read.
pub const FALLBACK_UNREACHABLE: &str =
    "Sorry, I encountered an error connecting to my brain. Please try again.";

/// What the widget shows after a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply {
        text: String,
        received_at: DateTime<Utc>,
    },
    Fallback(&'static str),
}

impl ChatOutcome {
    pub fn text(&self) -> &str {
        match self {
            ChatOutcome::Reply { text, .. } => text,
            ChatOutcome::Fallback(text) => text,
        }
    }
}

/// Counts one in-flight send until dropped, whatever path the send took.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn raise(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A chat input bound to a backend and an optional course context.
pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
    course: Option<String>,
    /// Sends currently in flight; overlapping sends each hold one.
    loading: AtomicUsize,
}

impl ChatWidget {
    pub fn new(backend: Arc<dyn ChatBackend>, course: Option<String>) -> Self {
        Self {
            backend,
            course,
            loading: AtomicUsize::new(0),
        }
    }

    /// Whether any message is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    /// Send `message`. Blank messages are not sent and yield `None`.
    pub async fn send(&self, message: &str) -> Option<ChatOutcome> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let _loading = LoadingGuard::raise(&self.loading);
        let request = ChatRequest {
            message: message.to_string(),
            course_id: self.course.clone(),
        };

        let outcome = match self.backend.send(&request).await {
            Ok(reply) => match reply.success_text() {
                Some(text) => ChatOutcome::Reply {
                    text: text.to_string(),
                    received_at: Utc::now(),
                },
                None => {
                    tracing::warn!(
                        backend = self.backend.name(),
                        status = %reply.status,
                        message = reply.message.as_deref().unwrap_or(""),
                        "chat endpoint did not succeed"
                    );
                    ChatOutcome::Fallback(FALLBACK_REPLY)
                }
            },
            Err(e) => {
                let unreachable = e
                    .downcast_ref::<ClientError>()
                    .is_some_and(ClientError::is_unreachable);
                tracing::error!(backend = self.backend.name(), unreachable, "chat request failed: {e:#}");
                ChatOutcome::Fallback(FALLBACK_UNREACHABLE)
            }
        };
        Some(outcome)
    }
}
