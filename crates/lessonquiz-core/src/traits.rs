//! Core trait definitions for the remote collaborators.
//!
//! These async traits are implemented over HTTP by `lessonquiz-client`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::ProgressUpdate;

// ---------------------------------------------------------------------------
// Progress sink
// ---------------------------------------------------------------------------

/// Destination for completion and quiz-score reports.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    /// Human-readable sink name (e.g. "http").
    fn name(&self) -> &str;

    /// Record one progress update.
    async fn report(&self, update: &ProgressUpdate) -> anyhow::Result<ProgressAck>;
}

/// Acknowledgement returned by the progress endpoint.
///
/// Only logged; every field is optional so unknown shapes still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressAck {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Present when the update unlocked an achievement.
    #[serde(default)]
    pub achievement: Option<Achievement>,
}

/// A badge unlocked by a progress update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Sink that drops every report. Used when running offline.
pub struct NoopSink;

#[async_trait]
impl ProgressSink for NoopSink {
    fn name(&self) -> &str {
        "noop"
    }

    async fn report(&self, _: &ProgressUpdate) -> anyhow::Result<ProgressAck> {
        Ok(ProgressAck {
            status: "skipped".into(),
            ..Default::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Chat backend
// ---------------------------------------------------------------------------

/// Request/response chat endpoint.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Send one message and return the decoded reply.
    async fn send(&self, request: &ChatRequest) -> anyhow::Result<ChatReply>;
}

/// Body sent to the chat endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Course context, or `null` for a general question.
    pub course_id: Option<String>,
}

/// Body returned by the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatReply {
    /// The reply text, if the endpoint reported success.
    pub fn success_text(&self) -> Option<&str> {
        if self.status == "success" {
            self.response.as_deref()
        } else {
            None
        }
    }
}
