//! Transform stage: bronze CSV to partitioned silver Parquet.
//!
//! Steps, in order:
//! 1. Probe the columnar backend (environment defect if unusable)
//! 2. Read the whole staging file
//! 3. Drop rows with `wage < 0`
//! 4. Coerce column types
//! 5. Replace the dataset under the silver tier, partitioned by `region_code`

mod clean;
mod staging;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{debug, error, info, info_span};

use caged_model::record::{REGION_CODE, WAGE};
use caged_model::{LakeConfig, PipelineError, Result};
use caged_store::{probe_backend, write_partitioned};

pub use clean::{PERIOD_FORMAT, coerce_types, drop_negative_wages};
pub use staging::read_staging;

/// Runs the transform stage on `raw_file` and returns the absolute dataset
/// root.
pub fn transform(config: &LakeConfig, raw_file: &Path) -> Result<PathBuf> {
    let span = info_span!("transform", raw_file = %raw_file.display());
    let _guard = span.enter();
    run_transform(config, raw_file).inspect_err(|err| {
        error!(error = %err, kind = ?err.kind(), "transform failed");
    })
}

fn run_transform(config: &LakeConfig, raw_file: &Path) -> Result<PathBuf> {
    let start = Instant::now();
    probe_backend()?;

    let raw = read_staging(raw_file)?;
    info!(records = raw.height(), "staging file read");

    let (cleaned, removed) =
        drop_negative_wages(raw).map_err(|e| PipelineError::data(raw_file, e))?;
    info!(removed, remaining = cleaned.height(), "negative wages removed");

    let typed = coerce_types(cleaned).map_err(|e| PipelineError::data(raw_file, e))?;
    debug!(schema = ?typed.schema(), "column types coerced");
    log_wage_stats(&typed);

    fs::create_dir_all(config.silver_dir())
        .map_err(|e| PipelineError::io(config.silver_dir(), e))?;
    let root = config.dataset_root();
    let root = std::path::absolute(&root).map_err(|e| PipelineError::io(&root, e))?;
    let summary = write_partitioned(&typed, &root, REGION_CODE)?;

    info!(
        path = %root.display(),
        records = summary.rows,
        partitions = summary.partitions.len(),
        duration_ms = start.elapsed().as_millis(),
        "transform complete"
    );
    Ok(root)
}

fn log_wage_stats(df: &DataFrame) {
    let Ok(column) = df.column(WAGE) else {
        return;
    };
    let wages = column.as_materialized_series();
    info!(
        mean = ?wages.mean(),
        median = ?wages.median(),
        "wage statistics"
    );
}
