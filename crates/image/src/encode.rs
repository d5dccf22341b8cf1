//! JPEG and WebP encoding at a fixed quality.

use crate::error::{ImageError, Result};
use crate::grid::PixelGrid;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use imgxform_core::validation::OutputFormat;

/// Quality used for every lossy encode. Not caller-configurable.
pub const ENCODE_QUALITY: u8 = 90;

/// Encoded image ready to be sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedOutput {
    /// MIME type of `bytes`
    pub content_type: &'static str,
    /// Encoded image
    pub bytes: Vec<u8>,
}

/// Encode a grid in the requested format.
///
/// JPEG has no alpha channel, so alpha is dropped. WebP keeps alpha when the
/// grid has one.
pub fn encode(grid: &PixelGrid, format: OutputFormat) -> Result<EncodedOutput> {
    let bytes = match format {
        OutputFormat::Jpeg => encode_jpeg(grid.as_image())?,
        OutputFormat::Webp => encode_webp(grid)?,
    };

    if bytes.is_empty() {
        return Err(ImageError::encode(format, "encoder produced no output"));
    }

    Ok(EncodedOutput {
        content_type: format.mime_type(),
        bytes,
    })
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
    let mut buffer = Vec::new();

    let encoder = JpegEncoder::new_with_quality(&mut buffer, ENCODE_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(|e| ImageError::encode(OutputFormat::Jpeg, e.to_string()))?;

    Ok(buffer)
}

fn encode_webp(grid: &PixelGrid) -> Result<Vec<u8>> {
    let (width, height) = grid.dimensions();
    let quality = f32::from(ENCODE_QUALITY);

    // The encoder borrows the pixel buffer, so each branch encodes before
    // its buffer goes out of scope.
    let encoded = if grid.has_alpha() {
        let rgba = grid.as_image().to_rgba8();
        webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode_simple(false, quality)
    } else {
        let rgb = grid.as_image().to_rgb8();
        webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode_simple(false, quality)
    };

    encoded
        .map(|memory| memory.to_vec())
        .map_err(|e| ImageError::encode(OutputFormat::Webp, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::test_helpers::{gradient, gradient_rgba, png_bytes};
    use image::ImageFormat;

    fn grid(width: u32, height: u32) -> PixelGrid {
        decode(&png_bytes(&gradient(width, height)), Some("image/png")).unwrap()
    }

    #[test]
    fn test_jpeg_output() {
        let out = encode(&grid(300, 200), OutputFormat::Jpeg).unwrap();
        assert_eq!(out.content_type, "image/jpeg");
        assert_eq!(image::guess_format(&out.bytes).unwrap(), ImageFormat::Jpeg);

        let decoded = image::load_from_memory(&out.bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (300, 200));
    }

    #[test]
    fn test_webp_output() {
        let out = encode(&grid(150, 100), OutputFormat::Webp).unwrap();
        assert_eq!(out.content_type, "image/webp");
        assert_eq!(&out.bytes[0..4], b"RIFF");
        assert_eq!(&out.bytes[8..12], b"WEBP");

        let decoded = image::load_from_memory_with_format(&out.bytes, ImageFormat::WebP).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (150, 100));
    }

    #[test]
    fn test_alpha_sources_encode_in_both_formats() {
        let source = decode(&png_bytes(&gradient_rgba(40, 30)), Some("image/png")).unwrap();
        assert!(source.has_alpha());

        let jpeg = encode(&source, OutputFormat::Jpeg).unwrap();
        assert_eq!(image::guess_format(&jpeg.bytes).unwrap(), ImageFormat::Jpeg);

        let webp = encode(&source, OutputFormat::Webp).unwrap();
        assert_eq!(&webp.bytes[8..12], b"WEBP");
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let source = grid(200, 120);
        for format in [OutputFormat::Jpeg, OutputFormat::Webp] {
            let a = encode(&source, format).unwrap();
            let b = encode(&source, format).unwrap();
            assert_eq!(a, b, "{format} output differs between runs");
        }
    }
}
