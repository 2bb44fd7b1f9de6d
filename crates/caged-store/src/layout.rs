//! Directory layout of a partitioned dataset.
//!
//! ```text
//! <root>/
//!   region_code=CE/part-00000.parquet
//!   region_code=SP/part-00000.parquet
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Extension of data files inside a partition directory.
pub const PARQUET_EXTENSION: &str = "parquet";

/// A `key=value` partition directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionDir {
    pub path: PathBuf,
    pub value: String,
}

/// Directory name for one partition value.
pub fn partition_dir_name(key: &str, value: &str) -> String {
    format!("{key}={value}")
}

/// Extracts the value from a `key=value` directory name when the key matches.
pub fn parse_partition_dir<'a>(name: &'a str, key: &str) -> Option<&'a str> {
    let (found_key, value) = name.split_once('=')?;
    if found_key == key && !value.is_empty() {
        Some(value)
    } else {
        None
    }
}

/// Name of the `index`-th data file written into a partition.
pub fn data_file_name(index: usize) -> String {
    format!("part-{index:05}.{PARQUET_EXTENSION}")
}

/// Lists the immediate `key=*` subdirectories of `root`, sorted by value.
///
/// Plain files and directories not following the naming scheme are ignored.
pub fn list_partitions(root: &Path, key: &str) -> io::Result<Vec<PartitionDir>> {
    let mut partitions = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(value) = parse_partition_dir(name, key) {
            partitions.push(PartitionDir {
                value: value.to_string(),
                path: path.clone(),
            });
        }
    }
    partitions.sort_by(|a, b| a.value.cmp(&b.value));
    Ok(partitions)
}

/// Lists `*.parquet` files directly inside a partition directory, sorted by name.
pub fn list_data_files(partition: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(partition)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_parquet = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case(PARQUET_EXTENSION))
            .unwrap_or(false);
        if is_parquet {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_matching_key_only() {
        assert_eq!(parse_partition_dir("region_code=CE", "region_code"), Some("CE"));
        assert_eq!(parse_partition_dir("uf=CE", "region_code"), None);
        assert_eq!(parse_partition_dir("region_code=", "region_code"), None);
        assert_eq!(parse_partition_dir("region_code", "region_code"), None);
    }

    #[test]
    fn names_are_stable() {
        assert_eq!(partition_dir_name("region_code", "SP"), "region_code=SP");
        assert_eq!(data_file_name(0), "part-00000.parquet");
    }

    #[test]
    fn lists_partitions_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("region_code=SP")).unwrap();
        fs::create_dir_all(root.join("region_code=BA")).unwrap();
        fs::create_dir_all(root.join("_tmp")).unwrap();
        fs::write(root.join("region_code=ZZ"), b"not a dir").unwrap();
        fs::write(root.join("region_code=SP").join("part-00000.parquet"), b"x").unwrap();
        fs::write(root.join("region_code=SP").join("notes.txt"), b"x").unwrap();

        let partitions = list_partitions(root, "region_code").unwrap();
        let values: Vec<&str> = partitions.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(values, vec!["BA", "SP"]);

        let files = list_data_files(&partitions[1].path).unwrap();
        assert_eq!(files.len(), 1);
        assert!(list_data_files(&partitions[0].path).unwrap().is_empty());
    }
}
