//! Batch configuration.
//!
//! The built-in defaults are the whole job: three source photos, an output
//! directory, 400px and 800px variants, WebP and JPEG at quality 85. Running
//! with no config file reproduces exactly that.
//!
//! ## Overriding
//!
//! An optional `responsive-variants.toml` in the working directory (or the
//! file passed with `--config`) is merged on top of the defaults. Files are
//! sparse: set only what differs.
//!
//! ```toml
//! output_dir = "assets/images/optimized"
//! sizes = [400, 800]
//!
//! [webp]
//! quality = 85   # 0-100
//! method = 6     # 0 (fast) - 6 (slowest, smallest)
//!
//! [jpeg]
//! quality = 85   # 1-100
//!
//! [[jobs]]
//! input = "assets/images/hyper/florida/florida_etm_2011314_432_xlrg.jpg"
//! base_name = "florida_432"
//! ```
//!
//! Arrays replace rather than merge: a file that lists `[[jobs]]` replaces
//! the whole default job list. Unknown keys are rejected to catch typos early.

use crate::imaging::{JpegParams, Quality, VariantConfig, WebpParams};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "responsive-variants.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// One source image and the stem its variants are named after.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub input: PathBuf,
    pub base_name: String,
}

impl Job {
    pub fn new(input: impl Into<PathBuf>, base_name: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            base_name: base_name.into(),
        }
    }
}

/// The photos the site ships, relative to the repository root.
pub fn default_jobs() -> Vec<Job> {
    vec![
        Job::new(
            "assets/images/hyper/florida/florida_etm_2011314_432_xlrg.jpg",
            "florida_432",
        ),
        Job::new(
            "assets/images/hyper/piqiang/piqiang_ast_2005055_468_decorrelation_lrg.jpg",
            "piqiang_468",
        ),
        Job::new(
            "assets/images/hyper/piqiang/piqiang_ast_2005055_nir_gray_lrg.jpg",
            "piqiang_nir",
        ),
    ]
}

/// Full batch configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizerConfig {
    /// Directory every variant is written to; created with parents if absent.
    pub output_dir: PathBuf,
    /// Longer-edge sizes; each produces a `_{size}w.webp` and `_{size}w.jpg`.
    pub sizes: Vec<u32>,
    pub webp: WebpConfig,
    pub jpeg: JpegConfig,
    pub jobs: Vec<Job>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("assets/images/optimized"),
            sizes: vec![400, 800],
            webp: WebpConfig::default(),
            jpeg: JpegConfig::default(),
            jobs: default_jobs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WebpConfig {
    /// Lossy quality (0 = worst, 100 = best).
    pub quality: u32,
    /// libwebp effort, 0 (fast) to 6 (slowest, smallest output).
    pub method: u32,
}

impl Default for WebpConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            method: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    /// Quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self { quality: 85 }
    }
}

impl OptimizerConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.sizes.is_empty() {
            return Err(ConfigError::Validation("sizes must not be empty".into()));
        }
        if self.sizes.contains(&0) {
            return Err(ConfigError::Validation("sizes must be non-zero".into()));
        }
        if self.webp.quality > 100 {
            return Err(ConfigError::Validation("webp.quality must be 0-100".into()));
        }
        if self.webp.method > 6 {
            return Err(ConfigError::Validation("webp.method must be 0-6".into()));
        }
        if !(1..=100).contains(&self.jpeg.quality) {
            return Err(ConfigError::Validation("jpeg.quality must be 1-100".into()));
        }
        for job in &self.jobs {
            if job.base_name.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "job {} has an empty base_name",
                    job.input.display()
                )));
            }
            if job.base_name.contains(['/', '\\']) {
                return Err(ConfigError::Validation(format!(
                    "base_name '{}' must not contain a path separator",
                    job.base_name
                )));
            }
        }
        Ok(())
    }

    /// Encoder settings for [`optimize_image`](crate::imaging::optimize_image).
    pub fn variant_config(&self) -> VariantConfig {
        VariantConfig {
            sizes: self.sizes.clone(),
            webp: WebpParams {
                quality: Quality::new(self.webp.quality),
                method: self.webp.method as u8,
            },
            jpeg: JpegParams {
                quality: Quality::new(self.jpeg.quality),
            },
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// [`OptimizerConfig::default`] as a TOML table: the built-in jobs, output
/// directory, sizes and qualities that a config file is layered over.
pub fn stock_defaults_value() -> toml::Value {
    // Plain strings, integers and arrays only; serialisation cannot fail.
    toml::Value::try_from(OptimizerConfig::default()).expect("default config must serialize")
}

/// Layer a user file over the defaults.
///
/// `[webp]` and `[jpeg]` merge key by key, so `[webp] quality = 70` keeps the
/// default `method`. `sizes` and `[[jobs]]` are arrays and are taken whole
/// from the file when present.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(defaults), toml::Value::Table(user)) => {
            toml::Value::Table(user.into_iter().fold(defaults, |mut merged, (key, value)| {
                let value = match merged.remove(&key) {
                    Some(default) => merge_toml(default, value),
                    None => value,
                };
                merged.insert(key, value);
                merged
            }))
        }
        (_, user) => user,
    }
}

fn read_toml(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist, `Err` if it exists but
/// cannot be read or parsed.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    read_toml(path).map(Some)
}

/// Build the final config from the defaults and an optional user file,
/// rejecting unknown keys and out-of-range values.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<OptimizerConfig, ConfigError> {
    let layered = match overlay {
        Some(user) => merge_toml(base, user),
        None => base,
    };
    let config: OptimizerConfig = layered.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the batch configuration.
///
/// With `explicit` set, that file must exist. Otherwise
/// [`DEFAULT_CONFIG_FILE`] is used when present and the built-in defaults
/// when not.
pub fn load_config(explicit: Option<&Path>) -> Result<OptimizerConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(read_toml(path)?),
        None => load_raw_config(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock config with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# responsive-variants configuration
# =================================
# All settings are optional. Values shown below are the defaults; without
# this file the tool behaves exactly as if it contained them.
# Unknown keys will cause an error.

# Directory the variants are written to (created if missing).
output_dir = "assets/images/optimized"

# Longer-edge sizes in pixels. Each size yields <base_name>_<size>w.webp
# and <base_name>_<size>w.jpg. Sources smaller than a size are upscaled.
sizes = [400, 800]

# ---------------------------------------------------------------------------
# WebP (modern browsers)
# ---------------------------------------------------------------------------
[webp]
# Lossy quality, 0 (worst) - 100 (best).
quality = 85
# Compression effort, 0 (fast) - 6 (slowest, smallest files).
method = 6

# ---------------------------------------------------------------------------
# JPEG fallback (older browsers)
# ---------------------------------------------------------------------------
[jpeg]
# Quality, 1 (worst) - 100 (best).
quality = 85

# ---------------------------------------------------------------------------
# Jobs. Listing any [[jobs]] replaces the whole default list.
# Missing inputs are skipped with a warning.
# ---------------------------------------------------------------------------
[[jobs]]
input = "assets/images/hyper/florida/florida_etm_2011314_432_xlrg.jpg"
base_name = "florida_432"

[[jobs]]
input = "assets/images/hyper/piqiang/piqiang_ast_2005055_468_decorrelation_lrg.jpg"
base_name = "piqiang_468"

[[jobs]]
input = "assets/images/hyper/piqiang/piqiang_ast_2005055_nir_gray_lrg.jpg"
base_name = "piqiang_nir"
"##
}
