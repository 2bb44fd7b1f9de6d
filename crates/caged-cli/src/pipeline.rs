//! Sequential orchestration of the three stages.
//!
//! The run walks [`PipelineState`]: each stage's return value becomes the next
//! stage's input, and a failed stage is retried per [`RetryPolicy`] before the
//! run is marked failed. Nothing is shared between stages except those values.

use std::path::PathBuf;
use std::thread;
use std::time::Instant;

use thiserror::Error;
use tracing::{info, info_span, warn};

use caged_extract::extract;
use caged_model::{
    LakeConfig, PipelineError, PipelineState, QualityReport, RetryPolicy, Stage,
};
use caged_transform::transform;
use caged_validate::quality_check;

/// A stage that exhausted its attempts.
#[derive(Debug, Error)]
#[error("{stage} stage failed after {attempts} attempt(s): {source}")]
pub struct StageFailure {
    pub stage: Stage,
    pub attempts: u32,
    #[source]
    pub source: PipelineError,
}

impl StageFailure {
    /// Terminal state recorded for this failure.
    pub fn state(&self) -> PipelineState {
        PipelineState::Failed {
            stage: self.stage,
            kind: self.source.kind(),
        }
    }
}

/// Runs `operation` until it succeeds, the policy is exhausted, or it fails
/// with a non-retryable error.
pub fn run_with_retry<T>(
    stage: Stage,
    policy: &RetryPolicy,
    mut operation: impl FnMut() -> Result<T, PipelineError>,
) -> Result<T, StageFailure> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(error) if error.is_retryable() && attempt < max_attempts => {
                warn!(
                    stage = %stage,
                    attempt,
                    max_attempts,
                    kind = ?error.kind(),
                    delay_secs = policy.delay.as_secs(),
                    error = %error,
                    "stage failed, retrying"
                );
                if !policy.delay.is_zero() {
                    thread::sleep(policy.delay);
                }
                attempt += 1;
            }
            Err(source) => {
                return Err(StageFailure {
                    stage,
                    attempts: attempt,
                    source,
                });
            }
        }
    }
}

/// Moves `state` forward by one stage. Terminal states are returned as is.
pub fn advance(config: &LakeConfig, state: PipelineState) -> Result<PipelineState, StageFailure> {
    let policy = &config.retry;
    match state {
        PipelineState::NotStarted => run_with_retry(Stage::Extract, policy, || extract(config))
            .map(|raw_file| PipelineState::Extracted { raw_file }),
        PipelineState::Extracted { raw_file } => {
            run_with_retry(Stage::Transform, policy, || transform(config, &raw_file))
                .map(|dataset_root| PipelineState::Transformed { dataset_root })
        }
        PipelineState::Transformed { dataset_root } => {
            run_with_retry(Stage::Validate, policy, || quality_check(&dataset_root))
                .map(|report| PipelineState::Validated { report })
        }
        terminal => Ok(terminal),
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub raw_file: PathBuf,
    pub dataset_root: PathBuf,
    pub report: QualityReport,
}

/// Runs extract, transform, and validate in order.
///
/// Stops at the first stage that fails after its retries; later stages do not
/// run.
pub fn run_pipeline(config: &LakeConfig) -> Result<RunSummary, StageFailure> {
    let span = info_span!("pipeline", base_dir = %config.base_dir().display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut state = PipelineState::NotStarted;
    let mut raw_file = PathBuf::new();
    let mut dataset_root = PathBuf::new();
    // `advance` reports failures as errors, so Failed never reaches this loop.
    loop {
        state = match state {
            PipelineState::Validated { report } => {
                info!(
                    duration_ms = start.elapsed().as_millis(),
                    records = report.total_records,
                    "pipeline validated"
                );
                return Ok(RunSummary {
                    raw_file,
                    dataset_root,
                    report,
                });
            }
            current => advance(config, current).inspect_err(|failure| {
                warn!(state = failure.state().name(), error = %failure, "pipeline failed");
            })?,
        };
        match &state {
            PipelineState::Extracted { raw_file: path } => raw_file = path.clone(),
            PipelineState::Transformed { dataset_root: path } => dataset_root = path.clone(),
            _ => {}
        }
        info!(state = state.name(), "stage complete");
    }
}
