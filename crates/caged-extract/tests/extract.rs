use std::fs;

use proptest::prelude::*;

use caged_extract::{RecordGenerator, extract, write_records};
use caged_model::record::RECORD_COLUMNS;
use caged_model::{LakeConfig, PipelineError};

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_path(path).expect("open csv");
    let headers = reader
        .headers()
        .expect("headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader.records().map(|row| row.expect("row")).collect();
    (headers, rows)
}

#[test]
fn writes_staging_file_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let config = LakeConfig::new(dir.path()).with_record_count(500);

    let path = extract(&config).expect("extract");

    assert!(path.is_absolute());
    assert_eq!(path, fs::canonicalize(config.raw_file()).unwrap());
    let (headers, rows) = read_rows(&path);
    assert_eq!(headers, RECORD_COLUMNS);
    assert_eq!(rows.len(), 500);
    assert_eq!(rows[0].len(), 5);
    assert!(rows[0][0].ends_with("-01"), "period = {}", &rows[0][0]);
}

#[test]
fn rerun_overwrites_with_identical_content() {
    let dir = tempfile::tempdir().unwrap();
    let config = LakeConfig::new(dir.path()).with_record_count(300);

    let first = fs::read(extract(&config).unwrap()).unwrap();
    let second = fs::read(extract(&config).unwrap()).unwrap();
    assert_eq!(first, second);

    let smaller = LakeConfig::new(dir.path()).with_record_count(10);
    let (_, rows) = read_rows(&extract(&smaller).unwrap());
    assert_eq!(rows.len(), 10);
}

#[test]
fn empty_run_still_writes_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    let stats = write_records(&path, Vec::new()).unwrap();
    assert_eq!(stats.records, 0);
    let (headers, rows) = read_rows(&path);
    assert_eq!(headers, RECORD_COLUMNS);
    assert!(rows.is_empty());
}

#[test]
fn unwritable_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("lake");
    fs::write(&blocker, b"a file where the lake should be").unwrap();
    let config = LakeConfig::new(&blocker).with_record_count(5);

    let err = extract(&config).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }), "{err}");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn record_count_matches_request(count in 0usize..400, seed in any::<u64>()) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        let mut generator = RecordGenerator::new(seed);
        let stats = write_records(&path, generator.records(count)).unwrap();
        prop_assert_eq!(stats.records, count);
        let (_, rows) = read_rows(&path);
        prop_assert_eq!(rows.len(), count);

        let negatives = rows
            .iter()
            .filter(|row| row[3].parse::<f64>().unwrap() < 0.0)
            .count();
        prop_assert_eq!(negatives, stats.negative_wages);
    }
}
