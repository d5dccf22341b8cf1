//! Lanczos-3 resampling to a target width.

use crate::error::{ImageError, Result};
use crate::grid::PixelGrid;
use image::imageops::FilterType;
use imgxform_core::validation::TargetWidth;

/// Upper bound on the pixel count of a resampled image.
///
/// Height follows the source aspect ratio, so a thin source asked for a wide
/// output can demand an allocation the process cannot survive.
pub const MAX_OUTPUT_PIXELS: u64 = 2048 * 8192;

/// Calculate target dimensions maintaining aspect ratio.
///
/// Height is `round(current_height * target_width / current_width)`, rounding
/// half away from zero, and never less than 1. Upscaling is allowed.
///
/// # Example
/// ```
/// use imgxform_image::calculate_dimensions;
///
/// assert_eq!(calculate_dimensions(600, 400, 300), (300, 200));
/// assert_eq!(calculate_dimensions(300, 200, 1200), (1200, 800));
/// ```
pub fn calculate_dimensions(current_width: u32, current_height: u32, target_width: u32) -> (u32, u32) {
    debug_assert!(current_width > 0 && target_width > 0);

    let ratio = f64::from(target_width) / f64::from(current_width);
    let new_height = (f64::from(current_height) * ratio).round() as u32;

    (target_width, new_height.max(1))
}

/// Resample `grid` to `width` pixels wide with proportional height.
///
/// The input grid is consumed; only the resampled grid survives. The filter
/// runs even when the width is unchanged. Fails with
/// [`ImageError::OutputTooLarge`] before allocating if the result would exceed
/// [`MAX_OUTPUT_PIXELS`].
pub fn resample(grid: PixelGrid, width: TargetWidth) -> Result<PixelGrid> {
    let (current_width, current_height) = grid.dimensions();
    let (new_width, new_height) = calculate_dimensions(current_width, current_height, width.get());

    if u64::from(new_width) * u64::from(new_height) > MAX_OUTPUT_PIXELS {
        return Err(ImageError::OutputTooLarge {
            width: new_width,
            height: new_height,
            limit: MAX_OUTPUT_PIXELS,
        });
    }

    let resized = grid
        .into_image()
        .resize_exact(new_width, new_height, FilterType::Lanczos3);

    Ok(PixelGrid::new(resized))
}
