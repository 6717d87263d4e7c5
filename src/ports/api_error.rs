//! Errors shared by every remote collaborator port.

/// Failures talking to the support backend.
///
/// Every variant is absorbed at the call site: chat failures become the
/// apology message, session and evaluation failures are only logged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, and the like.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the configured limit.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Non-success HTTP status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// Response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// Collaborator deliberately unavailable (e.g. a test double).
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    /// Creates a status error, keeping at most 512 bytes of the body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > 512 {
            let mut cut = 512;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Self::Status { status, body }
    }
}
