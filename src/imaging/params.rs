//! Parameter types for image operations.
//!
//! These structs describe *what* to write, not *how*. The
//! [`operations`](super::operations) module decides which files to create and
//! hands an [`EncodeParams`] per file to the [`backend`](super::backend).
//!
//! - [`Quality`]: lossy quality (0–100). Clamped on construction.
//! - [`WebpParams`]: quality + libwebp compression method (0–6).
//! - [`JpegParams`]: quality (1–100).
//! - [`OutputFormat`]: which encoder, with its settings.

use std::path::PathBuf;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Slowest libwebp method; produces the smallest files.
pub const WEBP_METHOD_BEST: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebpParams {
    pub quality: Quality,
    /// libwebp effort, 0 (fast) to 6 (slowest/best).
    pub method: u8,
}

impl Default for WebpParams {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            method: WEBP_METHOD_BEST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JpegParams {
    pub quality: Quality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    WebP(WebpParams),
    Jpeg(JpegParams),
}

impl OutputFormat {
    /// File extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::WebP(_) => "webp",
            OutputFormat::Jpeg(_) => "jpg",
        }
    }

    pub fn quality(self) -> Quality {
        match self {
            OutputFormat::WebP(p) => p.quality,
            OutputFormat::Jpeg(p) => p.quality,
        }
    }
}

/// A single encode: where to write and with which encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeParams {
    pub output: PathBuf,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_clamps_to_100() {
        assert_eq!(Quality::new(0).value(), 0);
        assert_eq!(Quality::new(85).value(), 85);
        assert_eq!(Quality::new(250).value(), 100);
    }

    #[test]
    fn defaults_match_delivery_settings() {
        let webp = WebpParams::default();
        assert_eq!(webp.quality.value(), 85);
        assert_eq!(webp.method, 6);
        assert_eq!(JpegParams::default().quality.value(), 85);
    }

    #[test]
    fn extensions() {
        assert_eq!(OutputFormat::WebP(WebpParams::default()).extension(), "webp");
        assert_eq!(OutputFormat::Jpeg(JpegParams::default()).extension(), "jpg");
    }
}
