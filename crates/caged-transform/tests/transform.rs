use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use polars::prelude::{ChunkAgg, DataType};

use caged_extract::extract;
use caged_model::record::{OCCUPATION_CODE, PERIOD, REGION_CODE, WAGE};
use caged_model::{LakeConfig, PipelineError};
use caged_store::{list_partitions, read_dataset, str_value};
use caged_transform::transform;

struct RawRow {
    region: String,
    occupation: i64,
    wage: f64,
}

fn read_raw(path: &Path) -> Vec<RawRow> {
    let mut reader = csv::Reader::from_path(path).expect("open raw csv");
    reader
        .records()
        .map(|row| {
            let row = row.expect("raw row");
            RawRow {
                region: row[1].to_string(),
                occupation: row[2].parse().expect("occupation"),
                wage: row[3].parse().expect("wage"),
            }
        })
        .collect()
}

fn staged(dir: &Path, records: usize) -> (LakeConfig, std::path::PathBuf) {
    let config = LakeConfig::new(dir).with_record_count(records);
    let raw = extract(&config).expect("extract");
    (config, raw)
}

#[test]
fn drops_exactly_the_negative_wages() {
    let dir = tempfile::tempdir().unwrap();
    let (config, raw_path) = staged(dir.path(), 3_000);
    let raw = read_raw(&raw_path);
    let negatives = raw.iter().filter(|row| row.wage < 0.0).count();
    assert!(negatives > 0, "seeded data should contain negative wages");

    let root = transform(&config, &raw_path).expect("transform");
    let curated = read_dataset(&root, REGION_CODE, None).unwrap();

    assert_eq!(curated.height(), raw.len() - negatives);
    let min_wage = curated
        .column(WAGE)
        .unwrap()
        .f32()
        .unwrap()
        .min()
        .unwrap();
    assert!(min_wage >= 0.0);
}

#[test]
fn partitions_follow_regions_present() {
    let dir = tempfile::tempdir().unwrap();
    let (config, raw_path) = staged(dir.path(), 2_000);
    let expected: BTreeSet<String> = read_raw(&raw_path)
        .into_iter()
        .filter(|row| row.wage >= 0.0)
        .map(|row| row.region)
        .collect();

    let root = transform(&config, &raw_path).unwrap();
    assert!(root.is_absolute());
    assert_eq!(root, std::path::absolute(config.dataset_root()).unwrap());

    let found: BTreeSet<String> = list_partitions(&root, REGION_CODE)
        .unwrap()
        .into_iter()
        .map(|partition| partition.value)
        .collect();
    assert_eq!(found, expected);
}

#[test]
fn rerun_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (config, raw_path) = staged(dir.path(), 1_500);

    let first = transform(&config, &raw_path).unwrap();
    let first_count = read_dataset(&first, REGION_CODE, None).unwrap().height();
    let second = transform(&config, &raw_path).unwrap();
    let second_count = read_dataset(&second, REGION_CODE, None).unwrap().height();

    assert_eq!(first, second);
    assert_eq!(first_count, second_count);
}

#[test]
fn schema_is_narrowed_without_losing_precision() {
    let dir = tempfile::tempdir().unwrap();
    let (config, raw_path) = staged(dir.path(), 1_000);
    let raw: Vec<RawRow> = read_raw(&raw_path)
        .into_iter()
        .filter(|row| row.wage >= 0.0 && row.region == "SP")
        .collect();

    let root = transform(&config, &raw_path).unwrap();
    let sp = read_dataset(&root, REGION_CODE, Some("SP")).unwrap();
    let schema = sp.schema();
    assert_eq!(schema.get(PERIOD), Some(&DataType::Date));
    assert_eq!(schema.get(OCCUPATION_CODE), Some(&DataType::Int32));
    assert_eq!(schema.get(WAGE), Some(&DataType::Float32));

    assert_eq!(sp.height(), raw.len());
    let wages: Vec<f32> = sp
        .column(WAGE)
        .unwrap()
        .f32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    let occupations: Vec<i32> = sp
        .column(OCCUPATION_CODE)
        .unwrap()
        .i32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    for ((source, wage), occupation) in raw.iter().zip(&wages).zip(&occupations) {
        let error = (f64::from(*wage) - source.wage).abs();
        assert!(
            error <= source.wage.abs() * f64::from(f32::EPSILON),
            "wage {} stored as {wage}",
            source.wage
        );
        assert_eq!(i64::from(*occupation), source.occupation);
    }
    assert_eq!(str_value(&sp, REGION_CODE, 0).unwrap().as_deref(), Some("SP"));
}

#[test]
fn malformed_wage_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = LakeConfig::new(dir.path());
    let raw_path = dir.path().join("broken.csv");
    fs::write(
        &raw_path,
        "period,region_code,occupation_code,wage,movement_type\n\
         2023-01-01,SP,411005,100.5,Admission\n\
         2023-02-01,CE,411010,not-a-wage,Transfer\n",
    )
    .unwrap();

    let err = transform(&config, &raw_path).unwrap_err();
    assert!(matches!(err, PipelineError::Data { .. }), "{err}");
}

#[test]
fn nan_wage_never_reaches_the_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = LakeConfig::new(dir.path());
    let raw_path = dir.path().join("nan.csv");
    fs::write(
        &raw_path,
        "period,region_code,occupation_code,wage,movement_type\n\
         2023-01-01,SP,411005,100.5,Admission\n\
         2023-02-01,SP,411010,NaN,Transfer\n\
         2023-03-01,CE,411015,-20.0,Termination\n",
    )
    .unwrap();

    let root = transform(&config, &raw_path).expect("transform");
    let curated = read_dataset(&root, REGION_CODE, None).unwrap();

    assert_eq!(curated.height(), 1);
    let wages: Vec<f32> = curated
        .column(WAGE)
        .unwrap()
        .f32()
        .unwrap()
        .into_no_null_iter()
        .collect();
    assert_eq!(wages, vec![100.5]);
}

#[test]
fn missing_column_is_data_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = LakeConfig::new(dir.path());
    let raw_path = dir.path().join("narrow.csv");
    fs::write(&raw_path, "period,region_code,wage\n2023-01-01,SP,1.0\n").unwrap();

    let err = transform(&config, &raw_path).unwrap_err();
    assert!(matches!(err, PipelineError::Data { .. }), "{err}");
    assert!(err.to_string().contains("occupation_code"));
}

#[test]
fn missing_staging_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = LakeConfig::new(dir.path());
    let err = transform(&config, &dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, PipelineError::Io { .. }), "{err}");
}
