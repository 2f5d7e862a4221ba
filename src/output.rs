//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Using image crate codecs: JPEG, PNG, TIFF, WebP, GIF, BMP, AVIF/HEIF
//! Starting image optimization...
//! Output directory: assets/images/optimized
//!
//! Processing: assets/images/hyper/florida/florida_etm_2011314_432_xlrg.jpg
//!     Created: assets/images/optimized/florida_432_400w.webp
//!     Created: assets/images/optimized/florida_432_400w.jpg
//! File not found: assets/images/hyper/piqiang/piqiang_ast_2005055_468_decorrelation_lrg.jpg
//!
//! Image optimization complete!
//!
//! Summary:
//! - Created WebP versions for modern browsers (85% quality)
//! - Created JPEG fallbacks for older browsers
//! - Generated 400px and 800px versions for responsive loading
//! 1 processed, 1 skipped, 0 failed
//! ```
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::config::OptimizerConfig;
use crate::imaging::capabilities::Codec;
use crate::process::{BatchReport, ProcessEvent};

pub fn format_banner(formats: &[&str]) -> Vec<String> {
    vec![format!("Using image crate codecs: {}", formats.join(", "))]
}

pub fn print_banner(formats: &[&str]) {
    print_lines(format_banner(formats));
}

pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::BatchStarted { output_dir } => vec![
            "Starting image optimization...".to_string(),
            format!("Output directory: {}", output_dir.display()),
        ],
        ProcessEvent::JobStarted { input } => {
            vec![String::new(), format!("Processing: {}", input.display())]
        }
        ProcessEvent::FileCreated { path } => vec![format!("    Created: {}", path.display())],
        ProcessEvent::JobSkipped { input } => {
            vec![format!("File not found: {}", input.display())]
        }
        ProcessEvent::JobFailed { input, message } => {
            vec![format!("    Error processing {}: {}", input.display(), message)]
        }
        ProcessEvent::BatchFinished => Vec::new(),
    }
}

pub fn print_process_event(event: &ProcessEvent) {
    print_lines(format_process_event(event));
}

/// "400px", "400px and 800px", "400px, 800px and 1200px"
fn size_list(sizes: &[u32]) -> String {
    let labels: Vec<String> = sizes.iter().map(|s| format!("{s}px")).collect();
    match labels.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

pub fn format_summary(config: &OptimizerConfig, report: &BatchReport) -> Vec<String> {
    vec![
        String::new(),
        "Image optimization complete!".to_string(),
        String::new(),
        "Summary:".to_string(),
        format!(
            "- Created WebP versions for modern browsers ({}% quality)",
            config.webp.quality
        ),
        "- Created JPEG fallbacks for older browsers".to_string(),
        format!(
            "- Generated {} versions for responsive loading",
            size_list(&config.sizes)
        ),
        format!(
            "{} processed, {} skipped, {} failed",
            report.completed(),
            report.skipped(),
            report.failed()
        ),
    ]
}

pub fn print_summary(config: &OptimizerConfig, report: &BatchReport) {
    print_lines(format_summary(config, report));
}

/// Written to stderr.
pub fn print_missing_codecs(missing: &[Codec]) {
    for line in crate::imaging::capabilities::remediation(missing) {
        eprintln!("{}", line);
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
