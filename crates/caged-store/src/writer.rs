//! Partitioned Parquet writer.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetCompression, ParquetWriter};
use tracing::{debug, info};

use caged_model::{PipelineError, Result};

use crate::frame::str_value;
use crate::layout::{data_file_name, partition_dir_name};

/// Block compression applied to every data file.
pub const COMPRESSION: ParquetCompression = ParquetCompression::Snappy;

/// What a partitioned write produced.
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub partitions: Vec<String>,
    pub files: Vec<PathBuf>,
    pub rows: usize,
    pub bytes: u64,
}

/// Writes `df` under `root`, one `key=value` directory per distinct value of
/// `key`.
///
/// Any existing dataset at `root` is removed first so reruns overwrite rather
/// than append. The key column is encoded in the directory name only.
pub fn write_partitioned(df: &DataFrame, root: &Path, key: &str) -> Result<WriteSummary> {
    if root.exists() {
        debug!(path = %root.display(), "removing previous dataset");
        fs::remove_dir_all(root).map_err(|e| PipelineError::io(root, e))?;
    }
    fs::create_dir_all(root).map_err(|e| PipelineError::io(root, e))?;

    let partitions = df
        .partition_by_stable([key], true)
        .map_err(|e| PipelineError::data(root, format!("partition by {key}: {e}")))?;

    let mut summary = WriteSummary::default();
    for partition in partitions {
        let value = str_value(&partition, key, 0)
            .map_err(|e| PipelineError::data(root, e))?
            .ok_or_else(|| PipelineError::data(root, format!("null {key} in partition")))?;
        let dir = root.join(partition_dir_name(key, &value));
        fs::create_dir_all(&dir).map_err(|e| PipelineError::io(&dir, e))?;

        let mut data = partition
            .drop(key)
            .map_err(|e| PipelineError::data(root, e))?;
        let path = dir.join(data_file_name(0));
        let file = File::create(&path).map_err(|e| PipelineError::io(&path, e))?;
        let bytes = ParquetWriter::new(file)
            .with_compression(COMPRESSION)
            .finish(&mut data)
            .map_err(|e| PipelineError::io(&path, io::Error::other(e.to_string())))?;

        debug!(
            partition = %value,
            rows = data.height(),
            bytes,
            file = %path.display(),
            "partition written"
        );
        summary.rows += data.height();
        summary.bytes += bytes;
        summary.partitions.push(value);
        summary.files.push(path);
    }

    info!(
        path = %root.display(),
        partitions = summary.partitions.len(),
        rows = summary.rows,
        "dataset written"
    );
    Ok(summary)
}
