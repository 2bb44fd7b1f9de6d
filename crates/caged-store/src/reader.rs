//! Reads a partitioned dataset back into one frame.

use std::fs::File;
use std::path::Path;

use polars::prelude::{Column, DataFrame, ParquetReader, SerReader};
use tracing::debug;

use caged_model::{PipelineError, Result};

use crate::frame::categorical_dtype;
use crate::layout::{list_data_files, list_partitions};

/// Reads every data file under `root`, re-attaching `key` as a categorical
/// column from the directory names.
///
/// With `only = Some(value)` the other partitions are pruned without opening
/// their files. Columns keep the file column order with `key` appended; the
/// result is empty when no partition or file matches.
pub fn read_dataset(root: &Path, key: &str, only: Option<&str>) -> Result<DataFrame> {
    let partitions = list_partitions(root, key).map_err(|e| PipelineError::io(root, e))?;
    let mut combined: Option<DataFrame> = None;

    for partition in partitions {
        if only.is_some_and(|wanted| wanted != partition.value) {
            continue;
        }
        let files =
            list_data_files(&partition.path).map_err(|e| PipelineError::io(&partition.path, e))?;
        for path in files {
            let file = File::open(&path).map_err(|e| PipelineError::io(&path, e))?;
            let mut frame = ParquetReader::new(file)
                .finish()
                .map_err(|e| PipelineError::data(&path, e))?;
            let values = vec![partition.value.as_str(); frame.height()];
            let key_column = Column::new(key.into(), values)
                .cast(&categorical_dtype())
                .map_err(|e| PipelineError::data(&path, e))?;
            frame
                .with_column(key_column)
                .map_err(|e| PipelineError::data(&path, e))?;
            debug!(file = %path.display(), rows = frame.height(), "data file read");

            match combined.as_mut() {
                Some(all) => {
                    all.vstack_mut(&frame)
                        .map_err(|e| PipelineError::data(&path, e))?;
                }
                None => combined = Some(frame),
            }
        }
    }

    Ok(combined.unwrap_or_default())
}
