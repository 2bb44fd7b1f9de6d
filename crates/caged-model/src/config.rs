//! Lake layout and run configuration.
//!
//! A [`LakeConfig`] is built once at process start and handed to each stage.
//! Stages never consult the environment themselves.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::BaseDirs;

/// Environment variable naming the lake base directory.
pub const DATALAKE_PATH_ENV: &str = "AIRFLOW_DATALAKE_PATH";

/// Scheduler home under the user's home directory.
pub const SCHEDULER_HOME_DIR: &str = "airflow";
/// Lake directory inside the scheduler home, used when no base directory is given.
pub const DEFAULT_LAKE_DIR: &str = "datalake";

/// Raw staging tier.
pub const BRONZE_DIR: &str = "bronze";
/// Curated tier.
pub const SILVER_DIR: &str = "silver";

/// Staging file name inside the bronze tier.
pub const RAW_FILE_NAME: &str = "caged_raw.csv";
/// Dataset root name inside the silver tier.
pub const DATASET_DIR_NAME: &str = "caged_processed.parquet";

pub const DEFAULT_RECORD_COUNT: usize = 50_000;
pub const DEFAULT_SEED: u64 = 42;

/// Fixed-count, fixed-delay retry schedule applied per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub retries: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 2,
            delay: Duration::from_secs(5 * 60),
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            retries: 0,
            delay: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Process-wide configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LakeConfig {
    base_dir: PathBuf,
    bronze_dir: PathBuf,
    silver_dir: PathBuf,
    /// Number of synthetic records the generator emits.
    pub record_count: usize,
    /// Seed for the generator's PRNG.
    pub seed: u64,
    pub retry: RetryPolicy,
}

impl LakeConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            bronze_dir: base_dir.join(BRONZE_DIR),
            silver_dir: base_dir.join(SILVER_DIR),
            base_dir,
            record_count: DEFAULT_RECORD_COUNT,
            seed: DEFAULT_SEED,
            retry: RetryPolicy::default(),
        }
    }

    /// Use `base_dir` when given, otherwise `<home>/airflow/datalake`.
    ///
    /// The CLI feeds `base_dir` from `--datalake` or [`DATALAKE_PATH_ENV`].
    pub fn resolve(base_dir: Option<PathBuf>) -> Self {
        Self::new(base_dir.unwrap_or_else(default_base_dir))
    }

    #[must_use]
    pub fn with_record_count(mut self, record_count: usize) -> Self {
        self.record_count = record_count;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn bronze_dir(&self) -> &Path {
        &self.bronze_dir
    }

    pub fn silver_dir(&self) -> &Path {
        &self.silver_dir
    }

    pub fn raw_file(&self) -> PathBuf {
        self.bronze_dir.join(RAW_FILE_NAME)
    }

    pub fn dataset_root(&self) -> PathBuf {
        self.silver_dir.join(DATASET_DIR_NAME)
    }
}

fn default_base_dir() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SCHEDULER_HOME_DIR)
        .join(DEFAULT_LAKE_DIR)
}
