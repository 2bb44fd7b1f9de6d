//! Quality gate for the curated dataset.
//!
//! Checks, failing fast on the first violation:
//! 1. the dataset root is a directory
//! 2. it holds at least one `region_code=*` partition
//! 3. the partitions hold at least one Parquet file
//! 4. reading the whole dataset yields at least one row

mod checks;

use std::path::Path;
use std::time::Instant;

use tracing::{error, info, info_span};

use caged_model::record::REGION_CODE;
use caged_model::{QualityReport, Result, ValidationFailure};
use caged_store::read_dataset;

pub use checks::{DataFiles, check_data_files, check_exists, check_partitions};

/// Validates the dataset rooted at `root` and reports its shape.
pub fn quality_check(root: &Path) -> Result<QualityReport> {
    let span = info_span!("validate", dataset = %root.display());
    let _guard = span.enter();
    run_quality_check(root).inspect_err(|err| {
        error!(error = %err, kind = ?err.kind(), "quality check failed");
    })
}

fn run_quality_check(root: &Path) -> Result<QualityReport> {
    let start = Instant::now();
    check_exists(root)?;
    let partitions = check_partitions(root)?;
    let files = check_data_files(root, &partitions)?;

    let dataset = read_dataset(root, REGION_CODE, None)?;
    if dataset.height() == 0 {
        return Err(ValidationFailure::EmptyAfterRead {
            path: root.to_path_buf(),
        }
        .into());
    }
    let columns: Vec<&str> = dataset
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    info!(records = dataset.height(), columns = ?columns, "dataset read back");

    let report = QualityReport::passed(
        dataset.height(),
        partitions.len(),
        files.paths.len(),
        files.total_bytes,
    );
    info!(
        records = report.total_records,
        partitions = report.total_partitions,
        files = report.total_files,
        size_mb = report.size_mb,
        duration_ms = start.elapsed().as_millis(),
        "quality check passed"
    );
    Ok(report)
}
