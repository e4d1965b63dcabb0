//! Shared series utilities for the cleaning pipeline.
//!
//! Common helper functions used across multiple modules to keep
//! null handling and value formatting consistent.

use polars::prelude::*;
use std::collections::HashMap;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Render an AnyValue without the surrounding quotes Polars adds to strings.
pub fn anyvalue_display(value: &AnyValue) -> String {
    match value {
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        other => format!("{}", other),
    }
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64, matching the promotion that happens when
/// a fractional fill value lands in an integer column.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let float_series = series.cast(&DataType::Float64)?;
    let ca = float_series.f64()?;
    let mut result: Vec<Option<f64>> = Vec::with_capacity(ca.len());

    for val in ca.into_iter() {
        result.push(Some(val.unwrap_or(fill_value)));
    }

    Ok(Series::new(series.name().clone(), result))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let ca = series.str()?;
    let mut result: Vec<Option<String>> = Vec::with_capacity(ca.len());

    for val in ca.into_iter() {
        result.push(Some(val.unwrap_or(fill_value).to_string()));
    }

    Ok(Series::new(series.name().clone(), result))
}

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties are broken by first occurrence in column order, so the result is
/// deterministic across runs.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let ca = non_null.str().ok()?;

    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for val in ca.into_iter().flatten() {
        let count = counts.entry(val).or_insert(0);
        if *count == 0 {
            order.push(val);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for val in order {
        let count = counts[val];
        match best {
            Some((_, top)) if count <= top => {}
            _ => best = Some((val, count)),
        }
    }

    best.map(|(val, _)| val.to_string())
}

/// Collect sample values from a Series (non-null values only).
pub fn collect_sample_values(series: &Series, max_samples: usize) -> Vec<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Vec::new();
    }

    let sample_size = std::cmp::min(max_samples, non_null.len());
    let mut samples = Vec::with_capacity(sample_size);

    for i in 0..sample_size {
        if let Ok(val) = non_null.get(i) {
            samples.push(anyvalue_display(&val));
        }
    }

    samples
}
