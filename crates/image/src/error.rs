//! Error types for the image crate.

use crate::decode::SourceKind;
use imgxform_core::validation::OutputFormat;
use imgxform_core::ErrorCode;
use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur during image operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The body did not decode under the codec chosen for its content-type
    #[error("Failed to decode image as {kind}: {source}")]
    Decode {
        /// Codec that was tried
        kind: SourceKind,
        /// Underlying codec error
        #[source]
        source: image::ImageError,
    },

    /// The codec produced an image with no pixels
    #[error("Decoded image has an empty dimension ({width}x{height})")]
    EmptyImage {
        /// Decoded width
        width: u32,
        /// Decoded height
        height: u32,
    },

    /// The resampled image would exceed [`MAX_OUTPUT_PIXELS`](crate::MAX_OUTPUT_PIXELS)
    #[error("Output of {width}x{height} exceeds the {limit} pixel budget")]
    OutputTooLarge {
        /// Target width
        width: u32,
        /// Height proportional to the source
        height: u32,
        /// Pixel budget
        limit: u64,
    },

    /// The encoder rejected the grid
    #[error("Failed to encode {format}: {message}")]
    Encode {
        /// Requested output format
        format: OutputFormat,
        /// Codec error description
        message: String,
    },
}

impl ImageError {
    /// Caller-visible error code
    pub fn code(&self) -> ErrorCode {
        match self {
            ImageError::Decode { .. } | ImageError::EmptyImage { .. } => ErrorCode::DecodeFailure,
            ImageError::OutputTooLarge { .. } => ErrorCode::OutputTooLarge,
            ImageError::Encode { .. } => ErrorCode::EncodeFailure,
        }
    }

    pub(crate) fn encode(format: OutputFormat, message: impl Into<String>) -> Self {
        ImageError::Encode {
            format,
            message: message.into(),
        }
    }
}
