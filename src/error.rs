//! Pipeline error types.
//!
//! Every variant is non-fatal to a resolution: the orchestrator catches
//! provider errors at the call site and moves on to the next source. The
//! taxonomy exists so logs can tell a rate-limited upstream apart from a
//! dead network or a page whose structure changed.

use thiserror::Error;

/// Pipeline result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream source rejected the request (non-2xx status)
    #[error("Upstream error: {message}")]
    Upstream {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Response parsing error (malformed JSON, missing structural marker)
    #[error("Parse error in {context:?}: {message}")]
    Parse {
        /// What was being parsed (URL or endpoint), if known.
        context: Option<String>,
        /// Description of the parse failure.
        message: String,
    },

    /// Extracted text failed lyric classification
    #[error("Content rejected: {0}")]
    ContentRejected(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an upstream error with HTTP status and an actionable hint
    pub fn upstream_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            401 => Some("Check the GENIUS_ACCESS_TOKEN environment variable"),
            403 => Some("The source may be blocking automated requests"),
            404 => Some("The requested resource was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Upstream server error - try again later"),
            _ => None,
        };
        Self::Upstream {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a parse error with source context
    pub fn parse(message: impl Into<String>, context: impl Into<Option<String>>) -> Self {
        Self::Parse { context: context.into(), message: message.into() }
    }

    /// Create a classifier rejection error
    pub fn content_rejected(message: impl Into<String>) -> Self {
        Self::ContentRejected(message.into())
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Whether this error is an upstream throttling response.
    ///
    /// Rate limiting is equivalent to any other failure for control flow but
    /// is surfaced distinctly in logs.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::Upstream { status: Some(429), .. })
    }
}

// Convenience conversions
impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}
