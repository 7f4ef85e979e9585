//! Errors raised while talking to the scanning service.

use std::path::PathBuf;
use thiserror::Error;

/// Longest response-body excerpt kept in [`ClientError::Status`].
pub const BODY_EXCERPT_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid identifier `{0}`")]
    InvalidId(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ClientError {
    /// Whether retrying the same request later could succeed.
    ///
    /// Transport failures, rate limiting, and 5xx responses are transient;
    /// other 4xx responses and decode failures are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::InvalidUrl { .. }
            | Self::InvalidId(_)
            | Self::Decode(_)
            | Self::Io { .. } => false,
        }
    }
}

/// Trim a response body to [`BODY_EXCERPT_LEN`] characters for error messages.
pub(crate) fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((cut, _)) => format!("{}…", &trimmed[..cut]),
        None => trimmed.to_owned(),
    }
}
