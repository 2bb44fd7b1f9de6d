use serde::Serialize;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Outcome of the quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityStatus {
    Passed,
    Failed,
}

/// Shape and health of the curated dataset, returned once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub status: QualityStatus,
    pub total_records: usize,
    pub total_partitions: usize,
    pub total_files: usize,
    pub size_mb: f64,
}

impl QualityReport {
    pub fn passed(
        total_records: usize,
        total_partitions: usize,
        total_files: usize,
        total_bytes: u64,
    ) -> Self {
        Self {
            status: QualityStatus::Passed,
            total_records,
            total_partitions,
            total_files,
            size_mb: bytes_to_mb(total_bytes),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == QualityStatus::Passed
    }
}

/// Converts a byte count to mebibytes rounded to two decimals.
pub fn bytes_to_mb(bytes: u64) -> f64 {
    ((bytes as f64 / BYTES_PER_MB) * 100.0).round() / 100.0
}
