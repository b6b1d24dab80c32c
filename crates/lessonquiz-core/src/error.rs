//! Client error types.
//!
//! These error types represent failures when talking to the progress and
//! chat endpoints. Defined in `lessonquiz-core` so the controller and the
//! chat widget can classify failures without string matching.

use thiserror::Error;

/// Errors that can occur when talking to a remote endpoint.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint answered with an error status.
    #[error("endpoint error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response body could not be decoded as the expected JSON.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ClientError {
    /// Returns `true` if the request never produced a response.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Timeout(_) | ClientError::NetworkError(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_classification() {
        assert!(ClientError::Timeout(30).is_unreachable());
        assert!(ClientError::NetworkError("refused".into()).is_unreachable());
        assert!(!ClientError::InvalidResponse("not json".into()).is_unreachable());
        assert!(!ClientError::ApiError {
            status: 500,
            message: "boom".into()
        }
        .is_unreachable());
    }

    #[test]
    fn status_only_for_api_errors() {
        let err = ClientError::ApiError {
            status: 403,
            message: "Not enrolled in this course".into(),
        };
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("403"));
        assert_eq!(ClientError::Timeout(5).status(), None);
    }
}
