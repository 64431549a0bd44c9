//! Error type returned by every backend call.

use crate::core::config::data::path_display;
use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    Transport(reqwest::Error),

    /// The backend answered with a non-success status.
    Status { status: u16, body: String },

    /// The response body did not have the expected shape.
    Decode {
        /// What the client was trying to decode.
        what: &'static str,
        source: serde_json::Error,
    },

    /// A response expected to carry a `data` envelope did not.
    MissingEnvelope { endpoint: String },

    /// The image upload reply was not a path string.
    UnexpectedUploadReply(serde_json::Value),

    InvalidBaseUrl(String),

    /// A local file needed for the request could not be read.
    File {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ApiError {
    /// Whether repeating the same request could plausibly succeed.
    ///
    /// Transport failures, `429 Too Many Requests` and server errors are
    /// retryable; everything else is terminal. The client itself never
    /// retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(err) => !err.is_builder() && !err.is_decode(),
            ApiError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(err) => write!(f, "Request failed: {err}"),
            ApiError::Status { status, body } => {
                if body.trim().is_empty() {
                    write!(f, "API request failed with status {status}")
                } else {
                    write!(f, "API request failed with status {status}: {body}")
                }
            }
            ApiError::Decode { what, source } => write!(f, "Failed to decode {what}: {source}"),
            ApiError::MissingEnvelope { endpoint } => {
                write!(f, "Response from {endpoint} has no `data` field")
            }
            ApiError::UnexpectedUploadReply(value) => {
                write!(f, "Image upload returned {value} instead of a path")
            }
            ApiError::InvalidBaseUrl(url) => write!(f, "Invalid base URL: {url}"),
            ApiError::File { path, source } => {
                write!(f, "Failed to read {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for ApiError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ApiError::Transport(err) => Some(err),
            ApiError::Decode { source, .. } => Some(source),
            ApiError::File { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        let server = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        let throttled = ApiError::Status {
            status: 429,
            body: String::new(),
        };
        let missing = ApiError::Status {
            status: 404,
            body: "not found".to_string(),
        };

        assert!(server.is_retryable());
        assert!(throttled.is_retryable());
        assert!(!missing.is_retryable());
        assert_eq!(missing.status(), Some(404));
    }

    #[test]
    fn status_display_omits_blank_body() {
        let err = ApiError::Status {
            status: 500,
            body: "  ".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed with status 500");

        let err = ApiError::Status {
            status: 400,
            body: "bad chat".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "API request failed with status 400: bad chat"
        );
    }

    #[test]
    fn decode_errors_are_terminal() {
        let source = serde_json::from_str::<u8>("x").unwrap_err();
        let err = ApiError::Decode {
            what: "chat",
            source,
        };
        assert!(!err.is_retryable());
        assert!(err.source().is_some());
    }
}
