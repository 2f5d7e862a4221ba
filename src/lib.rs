//! # responsive-variants
//!
//! Batch image optimizer for a static website. Every source photo is decoded
//! once, normalised to upright 8-bit RGB, and written out at a few fixed
//! widths, each as a lossy WebP for modern browsers and a JPEG fallback:
//!
//! ```text
//! florida_etm_2011314_432_xlrg.jpg  →  florida_432_400w.webp
//!                                      florida_432_400w.jpg
//!                                      florida_432_800w.webp
//!                                      florida_432_800w.jpg
//! ```
//!
//! The batch is one-shot and stateless: no cache and no manifest. A rerun
//! overwrites every file. A missing source is skipped and a broken one is
//! reported, and neither stops the rest of the batch.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | Built-in jobs and defaults, optional `responsive-variants.toml` overlay, validation |
//! | [`process`] | Runs the jobs in order, one error boundary per job, emits progress events |
//! | [`imaging`] | Decode (incl. HEIF/AVIF), orientation, resize math, WebP/JPEG encode |
//! | [`output`] | CLI output formatting for banner, progress and summary |
//!
//! # Design Decisions
//!
//! ## Lossy WebP Through libwebp
//!
//! The `image` crate only writes lossless WebP. Photos need lossy output at a
//! chosen quality, so WebP encoding goes through the `webp` crate, which
//! wraps libwebp and exposes the quality and method knobs directly.
//!
//! ## Backend Trait
//!
//! All pixel work goes through [`imaging::ImageBackend`]. The production
//! [`imaging::RustBackend`] does real decoding and encoding, and tests use a
//! recording mock so that sizing, naming and error handling can be checked
//! without touching image data.
//!
//! ## Sequential
//!
//! Three photos do not justify a thread pool. Jobs run one after another and
//! each decoded image is dropped before the next job starts, so peak memory
//! is one source image plus one resized copy.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
