//! Core data model for the file cleaning pipeline.

use crate::error::Result;
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-column type tag, determined once at load time.
///
/// Every downstream operation dispatches on this tag instead of re-inferring
/// column types ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Integer or floating point column; imputed with the column mean.
    Numeric,
    /// Everything else, held as text; imputed with the most frequent value.
    Categorical,
}

impl ColumnKind {
    /// Get a display name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

/// An in-memory table: ordered named columns with a uniform row count,
/// plus a per-column [`ColumnKind`] tag fixed at construction.
///
/// Invariants: all columns have equal length, column names are unique
/// (both guaranteed by the backing DataFrame), and every column is either
/// a numeric dtype or String.
#[derive(Debug, Clone)]
pub struct Table {
    df: DataFrame,
    kinds: Vec<ColumnKind>,
}

impl Table {
    /// Build a Table from a DataFrame, normalizing column storage and
    /// tagging each column.
    ///
    /// Numeric columns keep their dtype; every other column is cast to
    /// String so categorical operations see a uniform representation.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        let mut df = df;
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        let mut kinds = Vec::with_capacity(names.len());

        for name in &names {
            let series = df.column(name)?.as_materialized_series().clone();
            if is_numeric_dtype(series.dtype()) {
                kinds.push(ColumnKind::Numeric);
            } else {
                if series.dtype() != &DataType::String {
                    let cast = series.cast(&DataType::String)?;
                    df.replace(name, cast)?;
                }
                kinds.push(ColumnKind::Categorical);
            }
        }

        Ok(Self { df, kinds })
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.df.width()
    }

    /// Column names, in column order.
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Per-column kind tags, in column order.
    pub fn kinds(&self) -> &[ColumnKind] {
        &self.kinds
    }

    /// Kind tag for a named column.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.df
            .get_column_names()
            .iter()
            .position(|col| col.as_str() == name)
            .map(|idx| self.kinds[idx])
    }

    /// The backing DataFrame.
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Consume the table, returning the backing DataFrame.
    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    /// Build a table around a transformed DataFrame that kept this table's
    /// column layout (same columns, same order, same kinds).
    pub(crate) fn with_same_kinds(&self, df: DataFrame) -> Table {
        Table {
            df,
            kinds: self.kinds.clone(),
        }
    }
}

// Tables move freely between caller threads
static_assertions::assert_impl_all!(Table: Send);

/// Missing-cell count for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCount {
    /// Column name.
    pub column: String,
    /// Number of missing cells in that column.
    pub count: usize,
}

/// Summary statistics for a table.
///
/// Derived and read-only; recompute on demand rather than caching.
/// `missing` only retains columns with at least one missing cell, in
/// column order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSummary {
    pub row_count: usize,
    pub column_count: usize,
    pub missing: Vec<MissingCount>,
}

/// Profile of a single column, for overview display and report services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub kind: ColumnKind,
    pub null_count: usize,
    pub null_percentage: f64,
    pub unique_count: usize,
    pub sample_values: Vec<String>,
}

/// Result of an imputation pass: a new table of identical shape where only
/// previously-missing cells changed, plus an audit trail.
#[derive(Debug, Clone)]
pub struct ImputationOutcome {
    /// The imputed table. The input table is never mutated.
    pub table: Table,
    /// One entry per imputed column, naming the strategy and fill value.
    pub actions: Vec<String>,
    /// Columns left untouched because they had no non-missing values to
    /// derive a fill value from.
    pub skipped: Vec<String>,
}
