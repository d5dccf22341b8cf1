//! Pipeline error type and its HTTP rendering

use crate::pipeline::Stage;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use imgxform_core::{ErrorCode, ErrorReport};
use imgxform_fetch::FetchError;
use imgxform_image::ImageError;
use thiserror::Error;

/// Result type alias for pipeline operations
pub type TransformResult<T> = Result<T, TransformError>;

/// The first failure of a transformation, carried verbatim from the stage
/// that produced it
#[derive(Error, Debug)]
pub enum TransformError {
    /// Path segments could not be parsed
    #[error("Invalid path parameters: {0}")]
    InvalidParams(String),

    /// Format, size or URL presence rejected
    #[error(transparent)]
    Request(#[from] imgxform_core::Error),

    /// URL syntax, origin status, network or size cap
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Decode, resample budget or encode failure
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The blocking task running a codec stage panicked or was cancelled
    #[error("{stage} worker failed: {message}")]
    Worker {
        /// Stage the task was running
        stage: Stage,
        /// Join error description
        message: String,
    },
}

impl TransformError {
    /// Caller-visible error code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidParams(_) => ErrorCode::InvalidParams,
            Self::Request(e) => e.code,
            Self::Fetch(e) => e.code(),
            Self::Image(e) => e.code(),
            Self::Worker { .. } => ErrorCode::Internal,
        }
    }

    /// Stage that produced the error
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::InvalidParams(_) | Self::Request(_) => Stage::Validating,
            Self::Fetch(_) => Stage::Fetching,
            Self::Image(ImageError::OutputTooLarge { .. }) => Stage::Resampling,
            Self::Image(ImageError::Encode { .. }) => Stage::Encoding,
            Self::Image(_) => Stage::Decoding,
            Self::Worker { stage, .. } => *stage,
        }
    }

    /// HTTP status for the boundary layer
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code().http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Message safe to show callers.
    ///
    /// Validation and decode details are echoed back; origin, network and
    /// internal failures only report their generic message.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Request(e) => e.message.clone(),
            Self::InvalidParams(_)
            | Self::Image(ImageError::Decode { .. } | ImageError::OutputTooLarge { .. })
            | Self::Fetch(FetchError::TooLarge { .. }) => self.to_string(),
            _ => self.code().default_message().to_string(),
        }
    }

    /// Serializable body for the error response
    #[must_use]
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport::new(self.code(), self.public_message())
    }
}

impl IntoResponse for TransformError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_report())).into_response()
    }
}
