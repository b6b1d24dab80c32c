//! HTTP chat client.

use async_trait::async_trait;
use tracing::instrument;

use lessonquiz_core::traits::{ChatBackend, ChatReply, ChatRequest};

use crate::config::LessonquizConfig;
use crate::error::{from_transport, ClientError};
use crate::http::{build_client, endpoint_url, with_session};

/// Posts chat messages to the course server.
pub struct HttpChatClient {
    endpoint: String,
    session_cookie: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new(
        base_url: &str,
        path: &str,
        session_cookie: Option<String>,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            endpoint: endpoint_url(base_url, path),
            session_cookie,
            timeout_secs,
            client: build_client(timeout_secs)?,
        })
    }

    pub fn from_config(config: &LessonquizConfig) -> anyhow::Result<Self> {
        Self::new(
            &config.base_url,
            &config.chat_path,
            config.session_cookie.clone(),
            config.timeout_secs,
        )
    }
}

#[async_trait]
impl ChatBackend for HttpChatClient {
    fn name(&self) -> &str {
        "http"
    }

    /// Any JSON reply is returned as-is, whatever the HTTP status, so the
    /// widget decides on the fallback from the `status` field.
    #[instrument(skip(self, request), fields(course = ?request.course_id))]
    async fn send(&self, request: &ChatRequest) -> anyhow::Result<ChatReply> {
        let response = with_session(
            self.client.post(&self.endpoint).json(request),
            self.session_cookie.as_deref(),
        )
        .send()
        .await
        .map_err(|e| from_transport(e, self.timeout_secs))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| from_transport(e, self.timeout_secs))?;

        match serde_json::from_str::<ChatReply>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if status >= 400 => Err(ClientError::ApiError {
                status,
                message: body,
            }
            .into()),
            Err(e) => {
                Err(ClientError::InvalidResponse(format!("failed to parse response: {e}")).into())
            }
        }
    }
}
