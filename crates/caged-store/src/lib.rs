//! Partitioned Parquet storage for the curated tier.
//!
//! Partitioning, encoding, and compression are delegated to Polars; this
//! crate only owns the `key=value` directory layout around it.

pub mod frame;
pub mod layout;
mod probe;
mod reader;
mod writer;

pub use frame::{categorical_dtype, str_value};
pub use layout::{
    PARQUET_EXTENSION, PartitionDir, list_data_files, list_partitions, parse_partition_dir,
    partition_dir_name,
};
pub use probe::{BACKEND, probe_backend};
pub use reader::read_dataset;
pub use writer::{COMPRESSION, WriteSummary, write_partitioned};
