//! Store error type shared by every remote call.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The identity context has no token to attach.
    #[error("not signed in")]
    MissingToken,

    /// The HTTP request never produced a response (DNS, connect, timeout).
    #[error("request failed: {0}")]
    Request(String),

    /// The store answered with a non-success status and no readable message.
    #[error("store returned status {status}")]
    Status { status: u16, body: String },

    /// The store answered with an explicit failure message. `status` is the
    /// HTTP status for non-2xx replies and `None` for a `success: false` body.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    /// The response body did not match the expected schema.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl StoreError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "E_MISSING_TOKEN",
            Self::Request(_) => "E_REQUEST",
            Self::Status { .. } => "E_STATUS",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    /// Whether a user-initiated retry could plausibly succeed.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            Self::Request(_)
                | Self::Status { status: 429 | 500..=599, .. }
                | Self::Rejected { status: Some(429 | 500..=599), .. }
        )
    }

    /// The store's own failure message, when it sent one.
    #[must_use]
    pub fn store_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }

    pub(crate) fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected { status: None, message: message.into() }
    }
}
