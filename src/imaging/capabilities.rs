//! Startup check that the codecs the batch depends on are present.
//!
//! Decoder support in the `image` crate is decided by cargo features, and WebP
//! output goes through libwebp. JPEG output uses `jpeg-encoder`, which is
//! always linked. A binary built without one of them cannot do
//! any useful work, so `main` refuses to start instead of failing every job.

use image::ImageFormat;
use std::fmt;

/// A codec the batch needs but the binary lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    JpegDecode,
    WebpEncode,
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Codec::JpegDecode => "JPEG decoder (image feature \"jpeg\")",
            Codec::WebpEncode => "WebP encoder (libwebp via the webp crate)",
        };
        f.write_str(s)
    }
}

/// Input formats with a decoder compiled in, for the startup banner.
pub fn input_formats() -> Vec<&'static str> {
    let mut formats: Vec<&'static str> = [
        ("JPEG", ImageFormat::Jpeg),
        ("PNG", ImageFormat::Png),
        ("TIFF", ImageFormat::Tiff),
        ("WebP", ImageFormat::WebP),
        ("GIF", ImageFormat::Gif),
        ("BMP", ImageFormat::Bmp),
    ]
    .into_iter()
    .filter(|(_, fmt)| fmt.reading_enabled())
    .map(|(name, _)| name)
    .collect();

    if cfg!(feature = "heic") {
        formats.push("AVIF/HEIF/HEIC");
    } else if cfg!(feature = "heif") {
        formats.push("AVIF/HEIF");
    }
    formats
}

/// Codecs required for the batch that are not usable in this build.
pub fn missing_codecs() -> Vec<Codec> {
    let mut missing = Vec::new();
    if !ImageFormat::Jpeg.reading_enabled() {
        missing.push(Codec::JpegDecode);
    }
    // WebPConfig::new fails when the linked libwebp does not match the
    // headers the bindings were generated from.
    if webp::WebPConfig::new().is_err() {
        missing.push(Codec::WebpEncode);
    }
    missing
}

/// Remediation text printed before exiting when codecs are missing.
pub fn remediation(missing: &[Codec]) -> Vec<String> {
    let mut lines = vec!["Required image codecs are not available:".to_string()];
    lines.extend(missing.iter().map(|c| format!("  - {c}")));
    lines.push(
        "Rebuild with the default features: cargo install --path . --features heif".to_string(),
    );
    lines
}
