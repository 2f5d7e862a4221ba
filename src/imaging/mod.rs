//! Image processing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (+ [`heif`] for HEIF/AVIF) |
//! | **Orientation** | EXIF tag via `ImageDecoder::orientation` |
//! | **Resize** | Lanczos3 |
//! | **Encode** | `webp` (lossy, method 6) and `image` JPEG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing encodes
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`optimize_image`], combining calculations + backend
//! - **Capabilities**: startup codec check

pub mod backend;
mod calculations;
pub mod capabilities;
pub mod heif;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{VariantSize, calculate_target_dimensions, calculate_variant_sizes};
pub use operations::{
    GeneratedFile, VariantConfig, optimize_image, plan_variants, variant_file_name,
};
pub use params::{
    EncodeParams, JpegParams, OutputFormat, Quality, WEBP_METHOD_BEST, WebpParams,
};
pub use rust_backend::RustBackend;
