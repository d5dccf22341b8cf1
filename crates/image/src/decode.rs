//! Content-type dispatched decoding.
//!
//! This is a two-way branch on the origin's declared `Content-Type`, not
//! format sniffing: exactly `image/png` selects the PNG decoder and anything
//! else, including a missing header, selects JPEG. A GIF or WebP body served
//! under any type therefore fails as a corrupt JPEG.

use crate::error::{ImageError, Result};
use crate::grid::PixelGrid;
use image::{GenericImageView, ImageFormat};
use std::fmt;

const PNG_CONTENT_TYPE: &str = "image/png";

/// Decoder selected for a source body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Declared as `image/png`
    Png,
    /// Anything else, decoded as JPEG
    Other,
}

impl SourceKind {
    /// Pick the decoder for a declared content-type.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            Some(PNG_CONTENT_TYPE) => SourceKind::Png,
            _ => SourceKind::Other,
        }
    }

    fn codec(self) -> ImageFormat {
        match self {
            SourceKind::Png => ImageFormat::Png,
            SourceKind::Other => ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Png => f.write_str("png"),
            SourceKind::Other => f.write_str("jpeg"),
        }
    }
}

/// Decode a fetched body into a pixel grid.
///
/// # Arguments
/// * `bytes` - Complete response body
/// * `content_type` - The origin's `Content-Type` header, if any
pub fn decode(bytes: &[u8], content_type: Option<&str>) -> Result<PixelGrid> {
    let kind = SourceKind::from_content_type(content_type);

    let image = image::load_from_memory_with_format(bytes, kind.codec())
        .map_err(|source| ImageError::Decode { kind, source })?;

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(ImageError::EmptyImage { width, height });
    }

    Ok(PixelGrid::new(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{gradient, jpeg_bytes, png_bytes};
    use imgxform_core::ErrorCode;

    #[test]
    fn test_dispatch_is_exact_png_match() {
        assert_eq!(SourceKind::from_content_type(Some("image/png")), SourceKind::Png);
        assert_eq!(SourceKind::from_content_type(Some("image/jpeg")), SourceKind::Other);
        assert_eq!(SourceKind::from_content_type(Some("image/PNG")), SourceKind::Other);
        assert_eq!(
            SourceKind::from_content_type(Some("image/png; charset=binary")),
            SourceKind::Other
        );
        assert_eq!(SourceKind::from_content_type(None), SourceKind::Other);
    }

    #[test]
    fn test_decode_png() {
        let grid = decode(&png_bytes(&gradient(600, 400)), Some("image/png")).unwrap();
        assert_eq!(grid.dimensions(), (600, 400));
    }

    #[test]
    fn test_decode_jpeg_under_any_other_type() {
        let body = jpeg_bytes(&gradient(64, 48));
        for content_type in [Some("image/jpeg"), Some("application/octet-stream"), None] {
            let grid = decode(&body, content_type).unwrap();
            assert_eq!(grid.dimensions(), (64, 48));
        }
    }

    #[test]
    fn test_png_body_without_png_type_fails() {
        let body = png_bytes(&gradient(16, 16));
        let err = decode(&body, Some("image/jpeg")).unwrap_err();
        assert!(matches!(err, ImageError::Decode { kind: SourceKind::Other, .. }));
        assert_eq!(err.code(), ErrorCode::DecodeFailure);
    }

    #[test]
    fn test_jpeg_body_labelled_png_fails() {
        let body = jpeg_bytes(&gradient(16, 16));
        let err = decode(&body, Some("image/png")).unwrap_err();
        assert!(matches!(err, ImageError::Decode { kind: SourceKind::Png, .. }));
    }

    #[test]
    fn test_garbage_fails() {
        let err = decode(b"<html>not an image</html>", Some("text/html")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DecodeFailure);

        let err = decode(&[], None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::DecodeFailure);
    }
}
