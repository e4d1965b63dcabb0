//! Table profiling: summary statistics and per-column profiles.

use crate::error::Result;
use crate::types::{ColumnProfile, MissingCount, Table, TableSummary};
use crate::utils::collect_sample_values;

/// Computes read-only statistics over a [`Table`].
pub struct TableProfiler;

impl TableProfiler {
    /// Summarize a table: row count, column count, and the missing-value
    /// report.
    ///
    /// Pure function; the report only retains columns with at least one
    /// missing cell, in column order.
    pub fn summarize(table: &Table) -> TableSummary {
        let df = table.dataframe();

        let mut missing = Vec::new();
        for col in df.get_columns() {
            let count = col.null_count();
            if count > 0 {
                missing.push(MissingCount {
                    column: col.name().to_string(),
                    count,
                });
            }
        }

        TableSummary {
            row_count: df.height(),
            column_count: df.width(),
            missing,
        }
    }

    /// Profile each column: dtype, kind tag, null accounting, cardinality,
    /// and a handful of sample values.
    pub fn profile_columns(table: &Table, max_sample_values: usize) -> Result<Vec<ColumnProfile>> {
        let df = table.dataframe();
        let mut profiles = Vec::with_capacity(df.width());

        for (col, kind) in df.get_columns().iter().zip(table.kinds()) {
            let series = col.as_materialized_series();
            let null_count = series.null_count();
            let null_percentage = if df.height() > 0 {
                (null_count as f64 / df.height() as f64) * 100.0
            } else {
                0.0
            };

            profiles.push(ColumnProfile {
                name: series.name().to_string(),
                dtype: format!("{:?}", series.dtype()),
                kind: *kind,
                null_count,
                null_percentage,
                unique_count: series.n_unique()?,
                sample_values: collect_sample_values(series, max_sample_values),
            });
        }

        Ok(profiles)
    }
}
