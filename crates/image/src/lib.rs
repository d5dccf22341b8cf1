//! Image codec and resampling stages for imgxform.
//!
//! This crate provides:
//! - Content-type dispatched decoding (PNG, or JPEG for everything else)
//! - Lanczos-3 resampling to a target width with proportional height, within
//!   a fixed output pixel budget
//! - JPEG and lossy WebP encoding at a fixed quality
//!
//! Every stage takes and returns a [`PixelGrid`] by value, so a request never
//! holds more than the grid it is currently working on.

#![warn(missing_docs)]

mod decode;
mod encode;
mod error;
mod grid;
mod resize;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use decode::{decode, SourceKind};
pub use encode::{encode, EncodedOutput, ENCODE_QUALITY};
pub use error::{ImageError, Result};
pub use grid::PixelGrid;
pub use resize::{calculate_dimensions, resample, MAX_OUTPUT_PIXELS};
