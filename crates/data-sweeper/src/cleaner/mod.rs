//! Statistical imputation of missing values.
//!
//! Columns are partitioned by their [`ColumnKind`](crate::types::ColumnKind)
//! tag: numeric columns are filled with the column mean, categorical
//! columns with the most frequent value. Strategies are fixed; there is
//! nothing to configure.

use crate::error::Result;
use crate::types::{ColumnKind, ImputationOutcome, Table};
use crate::utils::{fill_numeric_nulls, fill_string_nulls, string_mode};
use tracing::{debug, warn};

/// Statistical imputer for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Impute missing values in a table.
    ///
    /// Returns a new table of identical shape where only previously-missing
    /// cells changed. Columns without missing values pass through untouched,
    /// so imputing a complete table yields an equal table.
    ///
    /// A column with no non-missing values has no mean or mode to draw
    /// from; it is left unchanged and reported in
    /// [`ImputationOutcome::skipped`].
    pub fn impute(table: &Table) -> Result<ImputationOutcome> {
        let mut df = table.dataframe().clone();
        let mut actions = Vec::new();
        let mut skipped = Vec::new();

        let names = table.column_names();
        for (name, kind) in names.iter().zip(table.kinds()) {
            let series = df.column(name)?.as_materialized_series().clone();
            let missing = series.null_count();
            if missing == 0 {
                continue;
            }

            match kind {
                ColumnKind::Numeric => match series.mean() {
                    Some(mean) => {
                        let filled = fill_numeric_nulls(&series, mean)?;
                        df.replace(name, filled)?;
                        actions.push(format!(
                            "Filled {} missing values in '{}' with mean {:.2}",
                            missing, name, mean
                        ));
                        debug!("Imputed '{}' with mean {:.2}", name, mean);
                    }
                    None => {
                        warn!("Column '{}' is entirely missing, leaving unchanged", name);
                        skipped.push(name.clone());
                    }
                },
                ColumnKind::Categorical => match string_mode(&series) {
                    Some(mode) => {
                        let filled = fill_string_nulls(&series, &mode)?;
                        df.replace(name, filled)?;
                        actions.push(format!(
                            "Filled {} missing values in '{}' with most frequent value '{}'",
                            missing, name, mode
                        ));
                        debug!("Imputed '{}' with mode '{}'", name, mode);
                    }
                    None => {
                        warn!("Column '{}' is entirely missing, leaving unchanged", name);
                        skipped.push(name.clone());
                    }
                },
            }
        }

        Ok(ImputationOutcome {
            table: table.with_same_kinds(df),
            actions,
            skipped,
        })
    }
}
