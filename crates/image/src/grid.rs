//! In-memory pixel grid passed between stages.

use image::{DynamicImage, GenericImageView};

/// Decoded raster image.
///
/// Only the decoder and the resampler build grids, and both guarantee
/// positive dimensions.
#[derive(Debug, Clone)]
pub struct PixelGrid(DynamicImage);

impl PixelGrid {
    pub(crate) fn new(image: DynamicImage) -> Self {
        debug_assert!(image.width() > 0 && image.height() > 0);
        Self(image)
    }

    /// (width, height)
    pub fn dimensions(&self) -> (u32, u32) {
        self.0.dimensions()
    }

    /// Whether the decoded color model carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        self.0.color().has_alpha()
    }

    /// Borrow the underlying image
    pub fn as_image(&self) -> &DynamicImage {
        &self.0
    }

    /// Give up the grid and keep the underlying image
    pub fn into_image(self) -> DynamicImage {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    #[test]
    fn test_dimensions() {
        let grid = PixelGrid::new(DynamicImage::ImageRgb8(RgbImage::new(1920, 1080)));
        assert_eq!(grid.dimensions(), (1920, 1080));
    }

    #[test]
    fn test_has_alpha() {
        let rgba = PixelGrid::new(DynamicImage::ImageRgba8(RgbaImage::new(1, 1)));
        assert!(rgba.has_alpha());

        let rgb = PixelGrid::new(DynamicImage::ImageRgb8(RgbImage::new(1, 1)));
        assert!(!rgb.has_alpha());
    }
}
