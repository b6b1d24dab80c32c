//! Client configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lessonquiz_core::scoring::DEFAULT_PASS_THRESHOLD;

/// Top-level lessonquiz configuration.
///
/// Note: Custom Debug impl masks the session cookie to keep it out of logs.
#[derive(Clone, Serialize, Deserialize)]
pub struct LessonquizConfig {
    /// Base URL of the course server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the progress endpoint.
    #[serde(default = "default_progress_path")]
    pub progress_path: String,
    /// Path of the chat endpoint.
    #[serde(default = "default_chat_path")]
    pub chat_path: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// `Cookie` header value for the logged-in session.
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// Percentage at which a quiz counts as passed.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u8,
    /// How long to wait for in-flight progress reports before exiting.
    #[serde(default = "default_report_settle")]
    pub report_settle_ms: u64,
}

impl std::fmt::Debug for LessonquizConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LessonquizConfig")
            .field("base_url", &self.base_url)
            .field("progress_path", &self.progress_path)
            .field("chat_path", &self.chat_path)
            .field("timeout_secs", &self.timeout_secs)
            .field("session_cookie", &self.session_cookie.as_ref().map(|_| "***"))
            .field("pass_threshold", &self.pass_threshold)
            .field("report_settle_ms", &self.report_settle_ms)
            .finish()
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}
fn default_progress_path() -> String {
    "/api/update-progress".to_string()
}
fn default_chat_path() -> String {
    "/api/chat".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_pass_threshold() -> u8 {
    DEFAULT_PASS_THRESHOLD
}
fn default_report_settle() -> u64 {
    2000
}

impl Default for LessonquizConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            progress_path: default_progress_path(),
            chat_path: default_chat_path(),
            timeout_secs: default_timeout(),
            session_cookie: None,
            pass_threshold: default_pass_threshold(),
            report_settle_ms: default_report_settle(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `lessonquiz.toml` in the current directory
/// 2. `~/.config/lessonquiz/config.toml`
///
/// Environment variable overrides: `LESSONQUIZ_BASE_URL`, `LESSONQUIZ_SESSION_COOKIE`.
pub fn load_config() -> Result<LessonquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<LessonquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lessonquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => parse_config_file(&path)?,
        None => LessonquizConfig::default(),
    };

    if let Ok(url) = std::env::var("LESSONQUIZ_BASE_URL") {
        config.base_url = url;
    }
    if let Ok(cookie) = std::env::var("LESSONQUIZ_SESSION_COOKIE") {
        config.session_cookie = Some(cookie);
    }

    config.base_url = resolve_env_vars(&config.base_url);
    config.session_cookie = config
        .session_cookie
        .as_deref()
        .map(resolve_env_vars)
        .filter(|c| !c.is_empty());

    anyhow::ensure!(
        config.pass_threshold <= 100,
        "pass_threshold must be between 0 and 100, got {}",
        config.pass_threshold
    );
    anyhow::ensure!(config.timeout_secs >= 1, "timeout_secs must be at least 1");

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<LessonquizConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<LessonquizConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lessonquiz"))
}
