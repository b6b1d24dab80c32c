//! Shared HTTP plumbing for the endpoint clients.

use std::time::Duration;

use anyhow::{Context, Result};

/// Build a client with a request-wide timeout.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

/// Join a base URL and an endpoint path with exactly one slash.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Attach the session cookie, if one is configured.
pub(crate) fn with_session(
    request: reqwest::RequestBuilder,
    session_cookie: Option<&str>,
) -> reqwest::RequestBuilder {
    match session_cookie {
        Some(cookie) if !cookie.is_empty() => request.header(reqwest::header::COOKIE, cookie),
        _ => request,
    }
}
