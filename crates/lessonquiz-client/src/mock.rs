//! Mock collaborators for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use lessonquiz_core::model::ProgressUpdate;
use lessonquiz_core::traits::{ChatBackend, ChatReply, ChatRequest, ProgressAck, ProgressSink};

use crate::error::ClientError;

/// A progress sink that records every update instead of sending it.
pub struct MockProgressSink {
    /// Updates received, in arrival order.
    updates: Mutex<Vec<ProgressUpdate>>,
    /// When set, every report fails with a network error.
    fail: bool,
    /// Achievement title returned for a perfect quiz score.
    perfect_score_badge: Option<String>,
}

impl MockProgressSink {
    /// A sink that acknowledges every update.
    pub fn new() -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
            fail: false,
            perfect_score_badge: None,
        }
    }

    /// A sink that fails every update, as an unreachable server would.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Answer a 100% quiz score with an achievement.
    pub fn with_perfect_score_badge(mut self, title: &str) -> Self {
        self.perfect_score_badge = Some(title.to_string());
        self
    }

    /// All updates received so far.
    pub fn updates(&self) -> Vec<ProgressUpdate> {
        self.updates.lock().unwrap().clone()
    }

    /// The most recent update received.
    pub fn last_update(&self) -> Option<ProgressUpdate> {
        self.updates.lock().unwrap().last().cloned()
    }
}

impl Default for MockProgressSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressSink for MockProgressSink {
    fn name(&self) -> &str {
        "mock"
    }

    async fn report(&self, update: &ProgressUpdate) -> anyhow::Result<ProgressAck> {
        self.updates.lock().unwrap().push(update.clone());

        if self.fail {
            return Err(ClientError::NetworkError("mock sink is offline".into()).into());
        }

        let achievement = match (&self.perfect_score_badge, update.quiz_score) {
            (Some(title), Some(100)) => Some(lessonquiz_core::traits::Achievement {
                title: title.clone(),
                description: "Scored 100% on a module quiz".into(),
            }),
            _ => None,
        };

        Ok(ProgressAck {
            status: "success".into(),
            message: Some("Progress updated".into()),
            achievement,
        })
    }
}

/// A chat backend that always returns the same reply.
pub struct MockChatBackend {
    reply: ChatReply,
    call_count: AtomicU32,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockChatBackend {
    /// Reply successfully with `text`.
    pub fn with_fixed_response(text: &str) -> Self {
        Self::with_reply(ChatReply {
            status: "success".into(),
            response: Some(text.to_string()),
            message: None,
        })
    }

    pub fn with_reply(reply: ChatReply) -> Self {
        Self {
            reply,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the last request made to this backend.
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: &ChatRequest) -> anyhow::Result<ChatReply> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());
        Ok(self.reply.clone())
    }
}
