//! The batch: run every configured job, one after another.
//!
//! Each job is an error boundary. A missing input is skipped with a notice, a
//! decode or encode failure is reported and recorded, and in both cases the
//! batch moves on to the next job. The only batch-level failure is not being
//! able to create the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! assets/images/optimized/
//! ├── florida_432_400w.webp
//! ├── florida_432_400w.jpg
//! ├── florida_432_800w.webp
//! ├── florida_432_800w.jpg
//! └── ...
//! ```
//!
//! Progress is reported through [`ProcessEvent`]s handed to a caller-supplied
//! sink as they happen, on the calling thread.

use crate::config::{Job, OptimizerConfig};
use crate::imaging::{GeneratedFile, ImageBackend, RustBackend, VariantConfig, optimize_image};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Progress notifications, in the order they occur.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    BatchStarted { output_dir: PathBuf },
    JobStarted { input: PathBuf },
    FileCreated { path: PathBuf },
    JobSkipped { input: PathBuf },
    JobFailed { input: PathBuf, message: String },
    BatchFinished,
}

/// What happened to one job.
#[derive(Debug)]
pub enum JobOutcome {
    Completed { files: Vec<GeneratedFile> },
    /// Input file did not exist.
    Skipped,
    Failed { error: crate::imaging::BackendError },
}

#[derive(Debug)]
pub struct JobReport {
    pub job: Job,
    pub outcome: JobOutcome,
}

/// Per-job outcomes in job order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub jobs: Vec<JobReport>,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Completed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, JobOutcome::Failed { .. }))
    }

    /// Every file written across the batch.
    pub fn files(&self) -> impl Iterator<Item = &GeneratedFile> {
        self.jobs.iter().flat_map(|r| match &r.outcome {
            JobOutcome::Completed { files } => files.as_slice(),
            _ => &[],
        })
    }

    fn count(&self, pred: impl Fn(&JobOutcome) -> bool) -> usize {
        self.jobs.iter().filter(|r| pred(&r.outcome)).count()
    }
}

/// Run one job, turning any failure into an outcome value.
fn run_job(
    backend: &impl ImageBackend,
    job: &Job,
    output_dir: &Path,
    variants: &VariantConfig,
    sink: &mut impl FnMut(ProcessEvent),
) -> JobOutcome {
    if !job.input.exists() {
        tracing::warn!(input = %job.input.display(), "input not found, skipping");
        sink(ProcessEvent::JobSkipped {
            input: job.input.clone(),
        });
        return JobOutcome::Skipped;
    }

    sink(ProcessEvent::JobStarted {
        input: job.input.clone(),
    });

    let result = optimize_image(
        backend,
        &job.input,
        output_dir,
        &job.base_name,
        variants,
        |file| {
            sink(ProcessEvent::FileCreated {
                path: file.path.clone(),
            })
        },
    );

    match result {
        Ok(files) => JobOutcome::Completed { files },
        Err(error) => {
            tracing::warn!(input = %job.input.display(), %error, "job failed");
            sink(ProcessEvent::JobFailed {
                input: job.input.clone(),
                message: error.to_string(),
            });
            JobOutcome::Failed { error }
        }
    }
}

/// Process `jobs` sequentially with a specific backend (allows testing with mock).
pub fn process_jobs(
    backend: &impl ImageBackend,
    jobs: &[Job],
    output_dir: &Path,
    variants: &VariantConfig,
    mut sink: impl FnMut(ProcessEvent),
) -> Result<BatchReport, ProcessError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ProcessError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    sink(ProcessEvent::BatchStarted {
        output_dir: output_dir.to_path_buf(),
    });

    let mut report = BatchReport::default();
    for job in jobs {
        let outcome = run_job(backend, job, output_dir, variants, &mut sink);
        report.jobs.push(JobReport {
            job: job.clone(),
            outcome,
        });
    }

    sink(ProcessEvent::BatchFinished);
    Ok(report)
}

/// Run the configured batch with the production backend, printing progress.
pub fn process(config: &OptimizerConfig) -> Result<BatchReport, ProcessError> {
    let backend = RustBackend::new();
    process_jobs(
        &backend,
        &config.jobs,
        &config.output_dir,
        &config.variant_config(),
        |event| crate::output::print_process_event(&event),
    )
}
