//! lessonquiz-client: HTTP collaborators.
//!
//! Implements the `ProgressSink` and `ChatBackend` traits over HTTP, and
//! loads the configuration that points them at a server.

pub mod chat;
pub mod config;
pub mod error;
mod http;
pub mod mock;
pub mod progress;

pub use chat::HttpChatClient;
pub use config::{load_config, load_config_from, LessonquizConfig};
pub use error::ClientError;
pub use progress::HttpProgressReporter;
