//! Transformation parameter validation
//!
//! Formats and widths are checked by membership in fixed allow-lists. A width
//! of 600 is rejected even though it sits between two allowed values: the list
//! is the contract, not the range it spans.
//!
//! [`OutputFormat`] and [`TargetWidth`] can only be obtained through these
//! checks, so any code holding one can rely on it being valid.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output formats accepted in the request path, matched case-sensitively
pub const ALLOWED_FORMATS: &[&str] = &["jpeg", "webp"];

/// Output widths accepted in the request path
pub const ALLOWED_WIDTHS: &[u32] = &[150, 300, 500, 800, 1024, 1200, 2048];

/// Encoded output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG
    Jpeg,
    /// Lossy WebP
    Webp,
}

impl OutputFormat {
    /// MIME type of the encoded output
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Webp => "image/webp",
        }
    }

    /// Path segment naming this format
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Webp => "webp",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jpeg" => Ok(OutputFormat::Jpeg),
            "webp" => Ok(OutputFormat::Webp),
            other => Err(Error::invalid_format(other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output width in pixels, guaranteed to be one of [`ALLOWED_WIDTHS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TargetWidth(u32);

impl TargetWidth {
    /// Width in pixels
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for TargetWidth {
    type Error = Error;

    fn try_from(width: u32) -> Result<Self> {
        if ALLOWED_WIDTHS.contains(&width) {
            Ok(TargetWidth(width))
        } else {
            Err(Error::invalid_size(width))
        }
    }
}

impl fmt::Display for TargetWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Check `format` and `size` against the allow-lists.
///
/// Format is checked first, so a request that is wrong on both counts
/// reports [`ErrorCode::InvalidFormat`](crate::ErrorCode::InvalidFormat).
pub fn validate(format: &str, size: u32) -> Result<(OutputFormat, TargetWidth)> {
    let format = format.parse::<OutputFormat>()?;
    let width = TargetWidth::try_from(size)?;
    Ok((format, width))
}

/// A fully validated transformation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    format: OutputFormat,
    width: TargetWidth,
    source_url: String,
}

impl TransformRequest {
    /// Validate the raw request parameters.
    ///
    /// The source URL only has to be present and non-empty here; its syntax
    /// is checked by the fetcher before any network I/O.
    pub fn new(format: &str, size: u32, source_url: Option<&str>) -> Result<Self> {
        let (format, width) = validate(format, size)?;

        let source_url = match source_url {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => return Err(Error::missing_url()),
        };

        Ok(Self {
            format,
            width,
            source_url,
        })
    }

    /// Requested output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Requested output width
    pub fn width(&self) -> TargetWidth {
        self.width
    }

    /// Source image URL, as supplied
    pub fn source_url(&self) -> &str {
        &self.source_url
    }
}
