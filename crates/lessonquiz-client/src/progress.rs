//! HTTP progress reporter.

use async_trait::async_trait;
use tracing::instrument;

use lessonquiz_core::model::ProgressUpdate;
use lessonquiz_core::traits::{ProgressAck, ProgressSink};

use crate::config::LessonquizConfig;
use crate::error::{from_transport, ClientError};
use crate::http::{build_client, endpoint_url, with_session};

/// Posts progress updates to the course server.
pub struct HttpProgressReporter {
    endpoint: String,
    session_cookie: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpProgressReporter {
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
            &config.progress_path,
            config.session_cookie.clone(),
            config.timeout_secs,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ProgressSink for HttpProgressReporter {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, update), fields(module_id = update.module_id, quiz_score = ?update.quiz_score))]
    async fn report(&self, update: &ProgressUpdate) -> anyhow::Result<ProgressAck> {
        let request = with_session(
            self.client.post(&self.endpoint).json(update),
            self.session_cookie.as_deref(),
        );

        let response = request
            .send()
            .await
            .map_err(|e| from_transport(e, self.timeout_secs))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::ApiError {
                status,
                message: body,
            }
            .into());
        }

        let ack: ProgressAck = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("failed to parse response: {e}")))?;
        tracing::debug!(status = %ack.status, "progress endpoint acknowledged");
        Ok(ack)
    }
}
