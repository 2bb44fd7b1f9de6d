//! Staging file reader.

use std::io;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use caged_model::record::RECORD_COLUMNS;
use caged_model::{PipelineError, Result};

/// Rows sampled for CSV schema inference.
const INFER_SCHEMA_ROWS: usize = 100;

/// Reads the full staging CSV into memory.
///
/// A missing file is an I/O error; unparseable content or a missing record
/// column is a data error.
pub fn read_staging(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(PipelineError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "staging file not found"),
        ));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| PipelineError::data(path, e))?
        .finish()
        .map_err(|e| PipelineError::data(path, e))?;

    let names = df.get_column_names();
    for column in RECORD_COLUMNS {
        if !names.iter().any(|name| name.as_str() == column) {
            return Err(PipelineError::data(
                path,
                format!("required column '{column}' not found"),
            ));
        }
    }
    Ok(df)
}
