//! Row filtering and type coercion.

use polars::prelude::{
    DataFrame, DataType, IntoLazy, PolarsResult, StrptimeOptions, col, lit,
};

use caged_model::record::{
    MOVEMENT_TYPE, OCCUPATION_CODE, PERIOD, RECORD_COLUMNS, REGION_CODE, WAGE,
};
use caged_store::categorical_dtype;

/// Format of `period` values in the staging file.
pub const PERIOD_FORMAT: &str = "%Y-%m-%d";

/// Drops rows whose wage is negative, null, or NaN and returns how many were
/// removed. Other rows pass through untouched.
///
/// A non-numeric wage column fails the whole frame.
pub fn drop_negative_wages(df: DataFrame) -> PolarsResult<(DataFrame, usize)> {
    let before = df.height();
    // NaN sorts above every number in Polars, so `>= 0` alone keeps it.
    let wage = col(WAGE).strict_cast(DataType::Float64);
    let cleaned = df
        .lazy()
        .filter(wage.clone().is_not_nan().and(wage.gt_eq(lit(0.0))))
        .collect()?;
    let removed = before - cleaned.height();
    Ok((cleaned, removed))
}

/// Retypes the record columns:
///
/// - `period`: Date, parsed strictly with [`PERIOD_FORMAT`]
/// - `region_code`, `movement_type`: Categorical
/// - `occupation_code`: Int32 (overflow is an error)
/// - `wage`: Float32
///
/// Output columns follow the record column order.
pub fn coerce_types(df: DataFrame) -> PolarsResult<DataFrame> {
    let period_options = StrptimeOptions {
        format: Some(PERIOD_FORMAT.into()),
        strict: true,
        exact: true,
        ..Default::default()
    };
    df.lazy()
        .with_columns([
            col(PERIOD).str().to_date(period_options),
            col(REGION_CODE).strict_cast(categorical_dtype()),
            col(OCCUPATION_CODE).strict_cast(DataType::Int32),
            col(WAGE).strict_cast(DataType::Float32),
            col(MOVEMENT_TYPE).strict_cast(categorical_dtype()),
        ])
        .select(RECORD_COLUMNS.map(col))
        .collect()
}
