//! Small Polars helpers shared by the writer, reader, and callers.

use polars::prelude::{Categories, DataFrame, DataType, PolarsResult};

/// Low-cardinality string type used for code columns.
pub fn categorical_dtype() -> DataType {
    DataType::from_categories(Categories::global())
}

/// Reads `column[index]` as a string, whatever the column's logical type.
pub fn str_value(df: &DataFrame, column: &str, index: usize) -> PolarsResult<Option<String>> {
    let series = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series.str()?.get(index).map(str::to_string))
}
