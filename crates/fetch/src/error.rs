//! Error types for the fetcher

use imgxform_core::ErrorCode;
use thiserror::Error;

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Fetch errors
///
/// A missing file and an unreachable origin share one variant;
/// `reason` only reaches the logs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The source URL is not an absolute http(s) URL
    #[error("Invalid URL {url:?}: {reason}")]
    MalformedUrl {
        /// URL as supplied
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// Non-2xx status or network failure
    #[error("Source not found: {reason}")]
    NotFound {
        /// What went wrong
        reason: String,
    },

    /// Body exceeded the configured cap
    #[error("Source body exceeds {limit} bytes")]
    TooLarge {
        /// Configured cap in bytes
        limit: u64,
    },

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub(crate) fn malformed(url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(reason: impl Into<String>) -> Self {
        Self::NotFound {
            reason: reason.into(),
        }
    }

    /// Caller-visible error code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MalformedUrl { .. } => ErrorCode::MalformedUrl,
            Self::NotFound { .. } => ErrorCode::FetchNotFound,
            Self::TooLarge { .. } => ErrorCode::SourceTooLarge,
            Self::Client(_) => ErrorCode::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            FetchError::malformed("x", "relative URL").code(),
            ErrorCode::MalformedUrl
        );
        assert_eq!(FetchError::not_found("404").code(), ErrorCode::FetchNotFound);
        assert_eq!(
            FetchError::TooLarge { limit: 1 }.code(),
            ErrorCode::SourceTooLarge
        );
    }
}
