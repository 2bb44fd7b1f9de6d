use std::io::Cursor;

use polars::df;
use polars::prelude::{ParquetReader, ParquetWriter, SerReader};
use tracing::info;

use caged_model::{PipelineError, Result};

use crate::writer::COMPRESSION;

/// Name logged for the columnar backend.
pub const BACKEND: &str = "polars-parquet";

/// Round-trips a one-row frame through the Parquet writer and reader in
/// memory.
///
/// Any failure is an environment defect: the stage cannot succeed on retry.
pub fn probe_backend() -> Result<()> {
    let mut frame = df!("probe" => [1i32]).map_err(PipelineError::environment)?;
    let mut buffer: Vec<u8> = Vec::new();
    ParquetWriter::new(&mut buffer)
        .with_compression(COMPRESSION)
        .finish(&mut frame)
        .map_err(|e| PipelineError::environment(format!("{BACKEND} write: {e}")))?;
    let read = ParquetReader::new(Cursor::new(buffer))
        .finish()
        .map_err(|e| PipelineError::environment(format!("{BACKEND} read: {e}")))?;
    if read.height() != 1 {
        return Err(PipelineError::environment(format!(
            "{BACKEND} round trip returned {} rows",
            read.height()
        )));
    }
    info!(backend = BACKEND, compression = ?COMPRESSION, "columnar backend available");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_succeeds() {
        probe_backend().unwrap();
    }
}
