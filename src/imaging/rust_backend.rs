//! Production backend built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` with content sniffing |
//! | Decode (HEIF family) | [`heif`](super::heif) extension, feature `heif` |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` |
//! | Encode → WebP | `webp` crate (libwebp), lossy, explicit method |
//! | Encode → JPEG | `jpeg-encoder` with optimised Huffman tables |

use super::backend::{BackendError, ImageBackend};
use super::params::{EncodeParams, JpegParams, OutputFormat, WebpParams};
use image::imageops::FilterType;
use image::metadata::Orientation;
use image::{ColorType, DynamicImage, ImageDecoder, ImageReader};
use std::path::Path;

/// Backend that decodes and encodes with pure-Rust codecs plus libwebp.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> BackendError {
    BackendError::Encode {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Decode with the `image` crate, returning the pixels and the EXIF orientation.
///
/// The format is sniffed from content first and falls back to the extension,
/// so a mislabelled file still decodes.
fn decode_raster(path: &Path) -> Result<(DynamicImage, Orientation), BackendError> {
    let reader = ImageReader::open(path)?
        .with_guessed_format()
        .map_err(BackendError::Io)?;
    let mut decoder = reader
        .into_decoder()
        .map_err(|e| decode_error(path, e))?;

    // Unreadable EXIF is not fatal; the pixels are still usable.
    let orientation = decoder.orientation().unwrap_or_else(|e| {
        tracing::debug!(path = %path.display(), error = %e, "ignoring unreadable EXIF orientation");
        Orientation::NoTransforms
    });
    let image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
    Ok((image, orientation))
}

/// Convert to a colour mode both encoders accept.
///
/// Alpha is dropped (not composited). Palette sources arrive here already
/// expanded to RGB/RGBA by the decoders. 8-bit RGB and 8-bit grayscale pass
/// through untouched; everything else becomes RGB8.
pub(crate) fn flatten_color(image: DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::Rgb8 | ColorType::L8 => image,
        other => {
            tracing::debug!(from = ?other, "flattening to RGB8");
            DynamicImage::ImageRgb8(image.into_rgb8())
        }
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    if super::heif::is_heif(path)? {
        return super::heif::decode(path).map(flatten_color);
    }

    let (image, orientation) = decode_raster(path)?;
    let mut image = flatten_color(image);
    if orientation != Orientation::NoTransforms {
        tracing::debug!(path = %path.display(), ?orientation, "applying EXIF orientation");
        image.apply_orientation(orientation);
    }
    Ok(image)
}

fn save_webp(image: &DynamicImage, path: &Path, params: WebpParams) -> Result<(), BackendError> {
    // libwebp takes RGB(A) only; grayscale is widened here.
    let rgb = image.to_rgb8();
    let encoder = webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height());

    let mut config = webp::WebPConfig::new()
        .map_err(|()| encode_error(path, "libwebp rejected the default config"))?;
    config.lossless = 0;
    config.quality = params.quality.value() as f32;
    config.method = params.method as i32;

    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| encode_error(path, format!("{e:?}")))?;
    std::fs::write(path, &*encoded)?;
    Ok(())
}

fn save_jpeg(image: &DynamicImage, path: &Path, params: JpegParams) -> Result<(), BackendError> {
    let too_large = |_| encode_error(path, "JPEG dimensions are limited to 65535 pixels");
    let width = u16::try_from(image.width()).map_err(too_large)?;
    let height = u16::try_from(image.height()).map_err(too_large)?;

    let mut encoded = Vec::new();
    let mut encoder = jpeg_encoder::Encoder::new(&mut encoded, params.quality.value());
    // Per-image Huffman tables instead of the stock Annex K ones.
    encoder.set_optimized_huffman_tables(true);

    let result = match image {
        DynamicImage::ImageLuma8(gray) => {
            encoder.encode(gray.as_raw(), width, height, jpeg_encoder::ColorType::Luma)
        }
        other => {
            let rgb = other.to_rgb8();
            encoder.encode(rgb.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
        }
    };
    result.map_err(|e| encode_error(path, e))?;

    std::fs::write(path, &encoded)?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        load_image(path)
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        image.resize_exact(width, height, FilterType::Lanczos3)
    }

    fn encode(&self, image: &DynamicImage, params: &EncodeParams) -> Result<(), BackendError> {
        match params.format {
            OutputFormat::WebP(webp) => save_webp(image, &params.output, webp),
            OutputFormat::Jpeg(jpeg) => save_jpeg(image, &params.output, jpeg),
        }
    }
}
