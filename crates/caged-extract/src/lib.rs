//! Extract stage: synthesizes raw movements into the bronze tier.
//!
//! The staging file is plain UTF-8 CSV with a header row in
//! [`RECORD_COLUMNS`] order. Each run overwrites it.

mod generator;

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::WriterBuilder;
use tracing::{debug, error, info, info_span};

use caged_model::record::RECORD_COLUMNS;
use caged_model::{LakeConfig, PipelineError, RawRecord, Result};

pub use generator::RecordGenerator;

/// Counts of one extract run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub records: usize,
    pub negative_wages: usize,
}

/// Generates `config.record_count` records and writes them to
/// `config.raw_file()`. Returns the absolute path of the written file.
pub fn extract(config: &LakeConfig) -> Result<PathBuf> {
    let span = info_span!(
        "extract",
        seed = config.seed,
        record_count = config.record_count
    );
    let _guard = span.enter();
    run_extract(config).inspect_err(|err| {
        error!(error = %err, kind = ?err.kind(), "extract failed");
    })
}

fn run_extract(config: &LakeConfig) -> Result<PathBuf> {
    let start = Instant::now();
    fs::create_dir_all(config.bronze_dir())
        .map_err(|e| PipelineError::io(config.bronze_dir(), e))?;
    debug!(path = %config.bronze_dir().display(), "bronze directory ready");

    let path = config.raw_file();
    let mut generator = RecordGenerator::new(config.seed);
    let stats = write_records(&path, generator.records(config.record_count))?;
    let absolute = fs::canonicalize(&path).map_err(|e| PipelineError::io(&path, e))?;
    info!(
        path = %absolute.display(),
        records = stats.records,
        negative_wages = stats.negative_wages,
        duration_ms = start.elapsed().as_millis(),
        "extract complete"
    );
    Ok(absolute)
}

/// Writes records as CSV to `path`, replacing any existing file.
///
/// The header row is written even when `records` is empty.
pub fn write_records(
    path: &Path,
    records: impl IntoIterator<Item = RawRecord>,
) -> Result<ExtractStats> {
    let file = File::create(path).map_err(|e| PipelineError::io(path, e))?;
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    writer
        .write_record(RECORD_COLUMNS)
        .map_err(|e| PipelineError::io(path, e.into()))?;

    let mut stats = ExtractStats::default();
    for record in records {
        if !record.has_valid_wage() {
            stats.negative_wages += 1;
        }
        writer
            .serialize(&record)
            .map_err(|e| PipelineError::io(path, e.into()))?;
        stats.records += 1;
    }
    writer.flush().map_err(|e| PipelineError::io(path, e))?;
    Ok(stats)
}
