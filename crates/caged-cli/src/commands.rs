use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use caged_cli::pipeline::{RunSummary, run_pipeline};
use caged_extract::extract;
use caged_model::record::{REGION_CODE, WAGE};
use caged_model::{LakeConfig, QualityReport, Region, RetryPolicy};
use caged_store::read_dataset;
use caged_transform::transform;
use caged_validate::quality_check;

use crate::cli::{GenerateArgs, InspectArgs, RunArgs, TransformArgs, ValidateArgs};

/// Rows and wage figures read back from a curated dataset.
pub struct Inspection {
    pub dataset_root: PathBuf,
    pub total_rows: usize,
    pub columns: Vec<String>,
    pub sample: DataFrame,
    pub region: Option<RegionFigures>,
}

/// Figures for one region partition.
pub struct RegionFigures {
    pub region: Region,
    pub rows: usize,
    pub mean_wage: Option<f64>,
    pub sample: DataFrame,
}

pub fn run_all(config: LakeConfig, args: &RunArgs) -> Result<RunSummary> {
    let config = with_generate_args(config, &args.generate).with_retry(RetryPolicy {
        retries: args.retries,
        delay: Duration::from_secs(args.retry_delay_secs),
    });
    run_pipeline(&config).context("pipeline run")
}

pub fn run_extract(config: LakeConfig, args: &GenerateArgs) -> Result<PathBuf> {
    let config = with_generate_args(config, args);
    extract(&config).context("extract staging records")
}

pub fn run_transform(config: &LakeConfig, args: &TransformArgs) -> Result<PathBuf> {
    let input = args.input.clone().unwrap_or_else(|| config.raw_file());
    transform(config, &input).with_context(|| format!("transform {}", input.display()))
}

pub fn run_validate(config: &LakeConfig, args: &ValidateArgs) -> Result<QualityReport> {
    let dataset = args.dataset.clone().unwrap_or_else(|| config.dataset_root());
    quality_check(&dataset).with_context(|| format!("validate {}", dataset.display()))
}

pub fn run_inspect(config: &LakeConfig, args: &InspectArgs) -> Result<Inspection> {
    let dataset_root = args.dataset.clone().unwrap_or_else(|| config.dataset_root());
    let span = info_span!("inspect", dataset = %dataset_root.display());
    let _guard = span.enter();

    let region = args
        .region
        .as_deref()
        .map(|code| Region::parse(code).ok_or_else(|| anyhow!("unknown region code '{code}'")))
        .transpose()?;

    let all = read_dataset(&dataset_root, REGION_CODE, None)
        .with_context(|| format!("read {}", dataset_root.display()))?;
    if all.height() == 0 {
        return Err(anyhow!("no rows found under {}", dataset_root.display()));
    }
    info!(rows = all.height(), "dataset loaded");

    let region = match region {
        Some(region) => Some(region_figures(&dataset_root, region, args.sample)?),
        None => None,
    };

    Ok(Inspection {
        total_rows: all.height(),
        columns: all
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect(),
        sample: all
            .sample_n_literal(args.sample.min(all.height()), false, true, Some(args.seed))
            .context("sample rows")?,
        region,
        dataset_root,
    })
}

fn region_figures(
    dataset_root: &Path,
    region: Region,
    sample: usize,
) -> Result<RegionFigures> {
    let frame = read_dataset(dataset_root, REGION_CODE, Some(region.as_str()))
        .with_context(|| format!("read partition {REGION_CODE}={region}"))?;
    let mean_wage = if frame.height() == 0 {
        None
    } else {
        frame
            .column(WAGE)
            .context("wage column")?
            .as_materialized_series()
            .mean()
    };
    info!(region = %region, rows = frame.height(), mean_wage = ?mean_wage, "region read");
    Ok(RegionFigures {
        region,
        rows: frame.height(),
        mean_wage,
        sample: frame.head(Some(sample)),
    })
}

fn with_generate_args(config: LakeConfig, args: &GenerateArgs) -> LakeConfig {
    config
        .with_record_count(args.records)
        .with_seed(args.seed)
}

#[cfg(test)]
mod tests {
    use polars::df;
    use polars::prelude::ChunkAgg;

    use caged_store::write_partitioned;

    use super::*;

    fn dataset(dir: &Path) -> PathBuf {
        let root = dir.join("curated.parquet");
        let frame = df!(
            WAGE => [100.0f32, 200.0, 300.0, 400.0, 500.0, 600.0],
            REGION_CODE => ["SP", "SP", "SP", "CE", "CE", "RJ"],
        )
        .unwrap();
        write_partitioned(&frame, &root, REGION_CODE).unwrap();
        root
    }

    fn args(root: &Path, region: Option<&str>, sample: usize, seed: u64) -> InspectArgs {
        InspectArgs {
            dataset: Some(root.to_path_buf()),
            region: region.map(str::to_string),
            sample,
            seed,
        }
    }

    fn wages(frame: &DataFrame) -> Vec<f32> {
        frame
            .column(WAGE)
            .unwrap()
            .f32()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn sample_is_seeded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dataset(dir.path());
        let config = LakeConfig::new(dir.path());

        let first = run_inspect(&config, &args(&root, None, 3, 7)).unwrap();
        let again = run_inspect(&config, &args(&root, None, 3, 7)).unwrap();

        assert_eq!(first.total_rows, 6);
        assert_eq!(first.sample.height(), 3);
        assert_eq!(wages(&first.sample), wages(&again.sample));
    }

    #[test]
    fn oversized_sample_returns_every_row() {
        let dir = tempfile::tempdir().unwrap();
        let root = dataset(dir.path());
        let config = LakeConfig::new(dir.path());

        let inspection = run_inspect(&config, &args(&root, None, 50, 1)).unwrap();

        let mut seen = wages(&inspection.sample);
        seen.sort_by(f32::total_cmp);
        assert_eq!(seen, vec![100.0, 200.0, 300.0, 400.0, 500.0, 600.0]);
        assert_eq!(
            inspection.sample.column(WAGE).unwrap().f32().unwrap().sum(),
            Some(2100.0)
        );
    }

    #[test]
    fn region_figures_cover_one_partition() {
        let dir = tempfile::tempdir().unwrap();
        let root = dataset(dir.path());
        let config = LakeConfig::new(dir.path());

        let inspection = run_inspect(&config, &args(&root, Some("sp"), 2, 1)).unwrap();
        let region = inspection.region.unwrap();

        assert_eq!(region.region, Region::SP);
        assert_eq!(region.rows, 3);
        assert_eq!(region.mean_wage, Some(200.0));
        assert_eq!(region.sample.height(), 2);
    }

    #[test]
    fn unknown_region_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let root = dataset(dir.path());
        let config = LakeConfig::new(dir.path());

        let err = run_inspect(&config, &args(&root, Some("ZZ"), 2, 1))
            .err()
            .unwrap();
        assert!(err.to_string().contains("ZZ"));
    }
}
