//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the per-job logic in
//! [`operations`](super::operations) and the codec libraries. It has three
//! operations: `load` (decode + colour/orientation normalisation), `resize`,
//! and `encode`.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use the
//! recording `MockBackend` below.

use super::params::EncodeParams;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to encode {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },
}

/// Width and height of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn of(image: &DynamicImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode an image from disk, flattened to an encoder-friendly colour
    /// mode and rotated upright according to its EXIF orientation.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Resize to exactly `width` x `height` with a downscaling-quality filter.
    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    /// Encode `image` and write it to `params.output`, overwriting any
    /// existing file.
    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<(), BackendError>;
}
