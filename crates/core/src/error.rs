//! Error codes and the structured error type
//!
//! Every failure a caller can observe maps to exactly one [`ErrorCode`]. The
//! code carries its HTTP status so the boundary layer never has to guess, and
//! serializes as a stable `SCREAMING_SNAKE_CASE` string for JSON bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Caller-visible error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Request errors (1xxx)
    /// A path segment could not be parsed
    InvalidParams = 1000,
    /// Output format not on the allow-list
    InvalidFormat = 1001,
    /// Output width not on the allow-list
    InvalidSize = 1002,
    /// No source URL was given
    MissingUrl = 1003,
    /// Source URL is not an absolute http(s) URL
    MalformedUrl = 1004,

    // Fetch errors (2xxx)
    /// Origin answered non-2xx or could not be reached
    FetchNotFound = 2000,
    /// Source body is over the configured cap
    SourceTooLarge = 2001,

    // Codec errors (3xxx)
    /// Source did not decode
    DecodeFailure = 3000,
    /// Encoder failed
    EncodeFailure = 3001,
    /// Resampled image would exceed the output pixel budget
    OutputTooLarge = 3002,

    // Configuration errors (4xxx)
    /// Invalid configuration value
    ConfigError = 4000,
    /// Configuration file missing
    ConfigNotFound = 4001,
    /// Configuration file is not valid TOML
    ConfigParseError = 4002,

    // General errors (9xxx)
    /// Unexpected internal failure
    Internal = 9000,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "Request",
            2 => "Fetch",
            3 => "Codec",
            4 => "Configuration",
            _ => "General",
        }
    }

    /// HTTP status reported for this code
    pub fn http_status(&self) -> u16 {
        match self {
            ErrorCode::InvalidParams
            | ErrorCode::InvalidFormat
            | ErrorCode::InvalidSize
            | ErrorCode::MalformedUrl
            | ErrorCode::DecodeFailure
            | ErrorCode::OutputTooLarge => 400,
            ErrorCode::MissingUrl | ErrorCode::FetchNotFound => 404,
            ErrorCode::SourceTooLarge => 413,
            ErrorCode::EncodeFailure
            | ErrorCode::ConfigError
            | ErrorCode::ConfigNotFound
            | ErrorCode::ConfigParseError
            | ErrorCode::Internal => 500,
        }
    }

    /// Default message shown to HTTP callers
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::InvalidParams => "Invalid path parameters",
            ErrorCode::InvalidFormat => "Invalid image format",
            ErrorCode::InvalidSize => "Invalid image size",
            ErrorCode::MissingUrl | ErrorCode::FetchNotFound => "File not found",
            ErrorCode::MalformedUrl => "Incorrect URL",
            ErrorCode::SourceTooLarge => "Source image is too large",
            ErrorCode::DecodeFailure => "Unsupported or corrupt image",
            ErrorCode::EncodeFailure => "Failed to encode image",
            ErrorCode::OutputTooLarge => "Requested output is too large for this source",
            ErrorCode::ConfigError | ErrorCode::ConfigNotFound | ErrorCode::ConfigParseError => {
                "Configuration error"
            }
            ErrorCode::Internal => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({ctx})")?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            source: None,
        }
    }

    /// Add context to the error
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a source error
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport::new(self.code, self.message.clone())
    }

    /// Format not on the allow-list
    pub fn invalid_format(format: &str) -> Self {
        Self::new(
            ErrorCode::InvalidFormat,
            format!("Invalid image format: {format:?}"),
        )
    }

    /// Width not on the allow-list
    pub fn invalid_size(size: u32) -> Self {
        Self::new(ErrorCode::InvalidSize, format!("Invalid image size: {size}"))
    }

    /// Absent or empty source URL
    pub fn missing_url() -> Self {
        Self::new(ErrorCode::MissingUrl, "Missing source url")
    }

    /// Invalid configuration value
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Explicit configuration path does not exist
    pub fn config_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::new(
            ErrorCode::ConfigNotFound,
            format!("Configuration file not found: {}", path.as_ref().display()),
        )
    }
}

/// Serializable error body for logging and API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Stable error identifier, e.g. `INVALID_SIZE`
    pub error: ErrorCode,
    /// Numeric code string, e.g. `E1002`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ErrorReport {
    /// Build a report for `code` with a caller-facing message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error: code,
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::ConfigNotFound,
            _ => ErrorCode::ConfigError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {err}"))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Attach context to the error, if any
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
