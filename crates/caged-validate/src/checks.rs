//! Individual quality preconditions, in the order they are enforced.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use caged_model::record::REGION_CODE;
use caged_model::{PipelineError, Result, ValidationFailure};
use caged_store::{PartitionDir, list_data_files, list_partitions};

/// Data files found across all partitions.
#[derive(Debug, Clone, Default)]
pub struct DataFiles {
    pub paths: Vec<PathBuf>,
    pub total_bytes: u64,
}

pub fn check_exists(root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Err(ValidationFailure::NotFound {
            path: root.to_path_buf(),
        }
        .into());
    }
    info!(path = %root.display(), "dataset found");
    Ok(())
}

pub fn check_partitions(root: &Path) -> Result<Vec<PartitionDir>> {
    let partitions = list_partitions(root, REGION_CODE).map_err(|e| PipelineError::io(root, e))?;
    if partitions.is_empty() {
        return Err(ValidationFailure::NoPartitions {
            path: root.to_path_buf(),
        }
        .into());
    }
    let names: Vec<&str> = partitions.iter().map(|p| p.value.as_str()).collect();
    info!(count = partitions.len(), partitions = ?names, "partitions found");
    Ok(partitions)
}

pub fn check_data_files(root: &Path, partitions: &[PartitionDir]) -> Result<DataFiles> {
    let mut files = DataFiles::default();
    for partition in partitions {
        let paths =
            list_data_files(&partition.path).map_err(|e| PipelineError::io(&partition.path, e))?;
        for path in paths {
            let metadata = fs::metadata(&path).map_err(|e| PipelineError::io(&path, e))?;
            files.total_bytes += metadata.len();
            files.paths.push(path);
        }
    }
    if files.paths.is_empty() {
        return Err(ValidationFailure::NoDataFiles {
            path: root.to_path_buf(),
        }
        .into());
    }
    info!(
        files = files.paths.len(),
        total_bytes = files.total_bytes,
        "data files found"
    );
    Ok(files)
}
