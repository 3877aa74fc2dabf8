//! Errors produced while talking to the catalog/order service.

use thiserror::Error;

/// Errors that can occur on a single service call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// The request never got a reply (connection refused, timeout, DNS, …).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status.
    #[error("Rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The service answered 2xx but the body was not what we expected.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The configured base URL or a derived endpoint is not a valid URL.
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Human-readable detail without the variant prefix, for status lines.
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Transport(msg) | ApiError::Decode(msg) | ApiError::InvalidUrl(msg) => msg,
            ApiError::Rejected { body, .. } => body,
        }
    }

    /// True when the failure happened before the service could answer.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_strips_prefix() {
        let rejected = ApiError::Rejected {
            status: 409,
            body: "out of stock".into(),
        };
        assert_eq!(rejected.detail(), "out of stock");
        assert_eq!(rejected.to_string(), "Rejected with status 409: out of stock");
        assert!(!rejected.is_network());
        assert!(ApiError::Transport("refused".into()).is_network());
    }
}
