//! High-level image operations.
//!
//! These functions combine calculations with backend execution: they take
//! configuration, compute sizes and paths, and call the backend.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::calculations::{VariantSize, calculate_variant_sizes};
use super::params::{EncodeParams, JpegParams, OutputFormat, WebpParams};
use std::path::{Path, PathBuf};

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Configuration for responsive variant generation.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantConfig {
    /// Longer-edge sizes, one variant pair per entry.
    pub sizes: Vec<u32>,
    pub webp: WebpParams,
    pub jpeg: JpegParams,
}

impl Default for VariantConfig {
    fn default() -> Self {
        Self {
            sizes: vec![400, 800],
            webp: WebpParams::default(),
            jpeg: JpegParams::default(),
        }
    }
}

impl VariantConfig {
    /// Encoders in write order: WebP first, then the JPEG fallback.
    fn formats(&self) -> [OutputFormat; 2] {
        [OutputFormat::WebP(self.webp), OutputFormat::Jpeg(self.jpeg)]
    }
}

/// One file written by [`optimize_image`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Requested size the file was named after.
    pub target: u32,
    pub width: u32,
    pub height: u32,
}

/// `{base_name}_{target}w.{ext}`
pub fn variant_file_name(base_name: &str, target: u32, format: OutputFormat) -> String {
    format!("{}_{}w.{}", base_name, target, format.extension())
}

/// Every output path and size for a source of `original` dimensions, in
/// write order: sizes as configured, WebP before JPEG within each size.
pub fn plan_variants(
    output_dir: &Path,
    base_name: &str,
    original: Dimensions,
    config: &VariantConfig,
) -> Vec<(VariantSize, EncodeParams)> {
    calculate_variant_sizes((original.width, original.height), &config.sizes)
        .into_iter()
        .flat_map(|size| {
            config.formats().map(|format| {
                let params = EncodeParams {
                    output: output_dir.join(variant_file_name(base_name, size.target, format)),
                    format,
                };
                (size, params)
            })
        })
        .collect()
}

/// Decode `source` once and write a WebP and a JPEG per configured size.
///
/// `on_file` is called right after each file is written, so callers can
/// report progress even if a later encode fails. Files written before a
/// failure are left in place.
pub fn optimize_image(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    base_name: &str,
    config: &VariantConfig,
    mut on_file: impl FnMut(&GeneratedFile),
) -> Result<Vec<GeneratedFile>> {
    let image = backend.load(source)?;
    let original = Dimensions::of(&image);
    tracing::debug!(
        source = %source.display(),
        width = original.width,
        height = original.height,
        "decoded"
    );

    std::fs::create_dir_all(output_dir)?;

    let plan = plan_variants(output_dir, base_name, original, config);
    let mut written = Vec::with_capacity(plan.len());

    // One resize per size, shared by that size's encodes.
    for group in plan.chunk_by(|(a, _), (b, _)| a == b) {
        let size = group[0].0;
        let resized = backend.resize(&image, size.width, size.height);

        for (_, params) in group {
            backend.encode(&resized, params)?;

            let file = GeneratedFile {
                path: params.output.clone(),
                format: params.format,
                target: size.target,
                width: size.width,
                height: size.height,
            };
            on_file(&file);
            written.push(file);
        }
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};
    use crate::imaging::params::Quality;

    fn dims(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    #[test]
    fn file_names_follow_width_suffix_convention() {
        let webp = OutputFormat::WebP(WebpParams::default());
        let jpeg = OutputFormat::Jpeg(JpegParams::default());
        assert_eq!(variant_file_name("florida_432", 400, webp), "florida_432_400w.webp");
        assert_eq!(variant_file_name("florida_432", 800, jpeg), "florida_432_800w.jpg");
    }

    #[test]
    fn plan_orders_by_size_then_webp_before_jpeg() {
        let plan = plan_variants(
            Path::new("/out"),
            "pic",
            dims(1600, 1200),
            &VariantConfig::default(),
        );

        let outputs: Vec<_> = plan
            .iter()
            .map(|(_, p)| p.output.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            outputs,
            vec![
                "/out/pic_400w.webp",
                "/out/pic_400w.jpg",
                "/out/pic_800w.webp",
                "/out/pic_800w.jpg",
            ]
        );
        assert_eq!((plan[0].0.width, plan[0].0.height), (400, 300));
        assert_eq!((plan[2].0.width, plan[2].0.height), (800, 600));
    }

    #[test]
    fn optimize_decodes_once_and_encodes_twice_per_size() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(3000, 2000)]);

        let files = optimize_image(
            &backend,
            Path::new("/src/a.jpg"),
            tmp.path(),
            "a",
            &VariantConfig::default(),
            |_| {},
        )
        .unwrap();

        assert_eq!(files.len(), 4);
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1 + 2 * 3);
        assert!(matches!(&ops[0], RecordedOp::Load(p) if p == "/src/a.jpg"));
        assert_eq!(
            ops[1],
            RecordedOp::Resize {
                width: 400,
                height: 266
            }
        );
        assert!(matches!(
            &ops[2],
            RecordedOp::Encode { extension: "webp", quality: 85, width: 400, height: 266, .. }
        ));
        assert!(matches!(
            &ops[3],
            RecordedOp::Encode { extension: "jpg", quality: 85, .. }
        ));
        assert_eq!(
            ops[4],
            RecordedOp::Resize {
                width: 800,
                height: 533
            }
        );
    }

    #[test]
    fn optimize_writes_exactly_the_plan() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = VariantConfig {
            sizes: vec![320, 640, 1280],
            ..VariantConfig::default()
        };
        let backend = MockBackend::with_dimensions(vec![dims(2000, 1000)]);

        let files =
            optimize_image(&backend, Path::new("/p.jpg"), tmp.path(), "p", &config, |_| {})
                .unwrap();

        let planned: Vec<_> = plan_variants(tmp.path(), "p", dims(2000, 1000), &config)
            .into_iter()
            .map(|(size, params)| (params.output, size.width, size.height))
            .collect();
        let written: Vec<_> = files
            .into_iter()
            .map(|f| (f.path, f.width, f.height))
            .collect();
        assert_eq!(written, planned);

        let resizes = backend
            .get_operations()
            .into_iter()
            .filter(|op| matches!(op, RecordedOp::Resize { .. }))
            .count();
        assert_eq!(resizes, 3);
    }

    #[test]
    fn optimize_portrait_fixes_height() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(1000, 1500)]);

        let files = optimize_image(
            &backend,
            Path::new("/src/p.jpg"),
            tmp.path(),
            "p",
            &VariantConfig::default(),
            |_| {},
        )
        .unwrap();

        assert_eq!((files[0].width, files[0].height), (266, 400));
        assert_eq!((files[2].width, files[2].height), (533, 800));
    }

    #[test]
    fn optimize_uses_configured_quality() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(100, 100)]);
        let config = VariantConfig {
            sizes: vec![50],
            webp: WebpParams {
                quality: Quality::new(70),
                method: 4,
            },
            jpeg: JpegParams {
                quality: Quality::new(60),
            },
        };

        optimize_image(&backend, Path::new("/s.png"), tmp.path(), "s", &config, |_| {}).unwrap();

        let ops = backend.get_operations();
        assert!(matches!(&ops[2], RecordedOp::Encode { quality: 70, .. }));
        assert!(matches!(&ops[3], RecordedOp::Encode { quality: 60, .. }));
    }

    #[test]
    fn optimize_reports_each_file_as_written() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::with_dimensions(vec![dims(800, 800)]);
        let mut reported = Vec::new();

        optimize_image(
            &backend,
            Path::new("/s.jpg"),
            tmp.path(),
            "s",
            &VariantConfig::default(),
            |f| reported.push(f.path.clone()),
        )
        .unwrap();

        assert_eq!(
            reported,
            vec![
                tmp.path().join("s_400w.webp"),
                tmp.path().join("s_400w.jpg"),
                tmp.path().join("s_800w.webp"),
                tmp.path().join("s_800w.jpg"),
            ]
        );
    }

    #[test]
    fn decode_failure_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend = MockBackend::with_results(vec![Err("bad marker".to_string())]);

        let result = optimize_image(
            &backend,
            Path::new("/bad.jpg"),
            tmp.path(),
            "bad",
            &VariantConfig::default(),
            |_| panic!("nothing should be reported"),
        );

        assert!(matches!(result, Err(BackendError::Decode { .. })));
        assert!(backend.encoded_outputs().is_empty());
    }

    #[test]
    fn encode_failure_stops_midway_without_rollback() {
        let tmp = tempfile::TempDir::new().unwrap();
        let backend =
            MockBackend::with_dimensions(vec![dims(1000, 500)]).failing_encode("_800w.jpg");
        let mut reported = 0;

        let result = optimize_image(
            &backend,
            Path::new("/s.jpg"),
            tmp.path(),
            "s",
            &VariantConfig::default(),
            |_| reported += 1,
        );

        assert!(matches!(result, Err(BackendError::Encode { .. })));
        // 400w pair and 800w webp succeeded before the 800w jpeg failed
        assert_eq!(reported, 3);
        assert_eq!(backend.encoded_outputs().len(), 4);
    }
}
