//! Client error types.
//!
//! The error enum lives in `lessonquiz-core` so the controller and chat
//! widget can classify failures; it is re-exported here for callers that
//! only depend on the client crate.

pub use lessonquiz_core::error::ClientError;

/// Map a transport failure onto a [`ClientError`].
pub(crate) fn from_transport(e: reqwest::Error, timeout_secs: u64) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout(timeout_secs)
    } else {
        ClientError::NetworkError(e.to_string())
    }
}
