//! Data Loading
//!
//! Reads the fish reference dataset with Polars and turns it into a
//! `Catalog`. Numeric columns are coerced leniently: unparsable cells,
//! NaN and infinities become missing values instead of failing the load.

use polars::prelude::*;
use anyhow::{Context, Result};
use std::path::Path;

use crate::catalog::{Catalog, SpeciesRecord};

/// Dataset column names
pub mod columns {
    pub const NAME: &str = "name_english";
    pub const TANK_SIZE: &str = "tank_size_liter";
    pub const TEMPERATURE_MIN: &str = "temperature_min";
    pub const TEMPERATURE_MAX: &str = "temperature_max";
    pub const PH_MIN: &str = "phmin";
    pub const PH_MAX: &str = "phmax";
    pub const MAX_SIZE: &str = "cm_max";
    pub const CARE: &str = "uncare";
    pub const AVAILABILITY: &str = "availability";
    pub const BEHAVIOR: &str = "school";
    pub const AGGRESSION: &str = "agression";
    pub const BREEDING: &str = "breeding_difficulty";
}

/// Load the fish CSV and build the catalog
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    tracing::info!("Loading fish dataset from {:?}", path);
    let df = read_fish_csv(path)?;
    let records = records_from_frame(&df)
        .with_context(|| format!("Failed to read species rows from {:?}", path))?;
    tracing::info!("  Rows: {}, usable records: {}", df.height(), records.len());
    Ok(Catalog::from_records(records))
}

/// Read the raw CSV
///
/// Schema inference scans the whole file so a stray text cell late in a
/// numeric column turns the column into text (coerced later) rather than
/// aborting the read.
fn read_fish_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {:?}", path))?
        .finish()
        .with_context(|| format!("Failed to load fish CSV: {:?}", path))
}

/// Column coerced to Float64, or None when the column is absent
fn float_column(df: &DataFrame, name: &str) -> Result<Option<Series>> {
    let Ok(column) = df.column(name) else {
        tracing::warn!("Column '{}' not found, treating all values as missing", name);
        return Ok(None);
    };
    let series = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' cannot be read as numbers", name))?;
    Ok(Some(series))
}

fn finite_at(series: Option<&Series>, idx: usize) -> Result<Option<f64>> {
    let Some(series) = series else {
        return Ok(None);
    };
    Ok(series.f64()?.get(idx).filter(|v| v.is_finite()))
}

/// Ordinal codes may arrive as floats (4.0) when the column has gaps
fn code_at(series: Option<&Series>, idx: usize) -> Result<Option<i64>> {
    Ok(finite_at(series, idx)?
        .filter(|v| v.fract() == 0.0)
        .map(|v| v as i64))
}

/// Swap a reversed (min, max) pair so min <= max holds
fn ordered_range(name: &str, field: &str, lo: Option<f64>, hi: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (lo, hi) {
        (Some(a), Some(b)) if a > b => {
            tracing::warn!("'{}': {} range {} > {}, swapping bounds", name, field, a, b);
            (Some(b), Some(a))
        }
        other => other,
    }
}

/// Convert a fish DataFrame into species records
///
/// Only the name column is required. Rows without a name are skipped.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<SpeciesRecord>> {
    let names = df
        .column(columns::NAME)
        .with_context(|| format!("Column '{}' not found", columns::NAME))?
        .as_materialized_series()
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' is not text", columns::NAME))?;
    let names = names.str()?;

    let tank = float_column(df, columns::TANK_SIZE)?;
    let temp_min = float_column(df, columns::TEMPERATURE_MIN)?;
    let temp_max = float_column(df, columns::TEMPERATURE_MAX)?;
    let ph_min = float_column(df, columns::PH_MIN)?;
    let ph_max = float_column(df, columns::PH_MAX)?;
    let max_size = float_column(df, columns::MAX_SIZE)?;
    let care = float_column(df, columns::CARE)?;
    let availability = float_column(df, columns::AVAILABILITY)?;
    let behavior = float_column(df, columns::BEHAVIOR)?;
    let aggression = float_column(df, columns::AGGRESSION)?;
    let breeding = float_column(df, columns::BREEDING)?;

    let mut records = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for idx in 0..df.height() {
        let Some(name) = names.get(idx).map(str::trim).filter(|n| !n.is_empty()) else {
            skipped += 1;
            continue;
        };

        let (temperature_min, temperature_max) = ordered_range(
            name,
            "temperature",
            finite_at(temp_min.as_ref(), idx)?,
            finite_at(temp_max.as_ref(), idx)?,
        );
        let (ph_min, ph_max) = ordered_range(
            name,
            "pH",
            finite_at(ph_min.as_ref(), idx)?,
            finite_at(ph_max.as_ref(), idx)?,
        );

        records.push(SpeciesRecord {
            name: name.to_string(),
            tank_size_liter: finite_at(tank.as_ref(), idx)?,
            temperature_min,
            temperature_max,
            ph_min,
            ph_max,
            max_size_cm: finite_at(max_size.as_ref(), idx)?,
            care_difficulty: code_at(care.as_ref(), idx)?,
            availability: code_at(availability.as_ref(), idx)?,
            behavior: code_at(behavior.as_ref(), idx)?,
            aggression: code_at(aggression.as_ref(), idx)?,
            breeding_difficulty: code_at(breeding.as_ref(), idx)?,
        });
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} rows without a species name", skipped);
    }

    Ok(records)
}
