//! Environment Aggregation
//!
//! Combines the habitat requirements of several species into one recommended
//! tank environment: the per-field mean of tank size, temperature range and
//! pH range over the species that resolved.
//!
//! Partial records are tolerated field-wise: a species without a recorded pH
//! still contributes its temperature and tank size.

use rayon::prelude::*;
use serde::Serialize;

use crate::catalog::{Catalog, SpeciesRecord};
use crate::error::{AdvisorError, AdvisorResult};
use crate::search_index::NameIndex;

/// Mean habitat envelope over a set of resolved species
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentRecommendation {
    pub tank_size_liter: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub ph_min: Option<f64>,
    pub ph_max: Option<f64>,
    /// Canonical names in resolution order (duplicates kept)
    pub included_species: Vec<String>,
}

/// Display form of a recommendation, one decimal place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnvironmentSummary {
    #[serde(rename = "Recommended Tank Size")]
    pub tank_size: String,
    #[serde(rename = "Recommended Temperature")]
    pub temperature: String,
    #[serde(rename = "Recommended pH Range")]
    pub ph_range: String,
    #[serde(rename = "Included Fish")]
    pub included_species: Vec<String>,
}

fn one_decimal(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => "Unknown".to_string(),
    }
}

impl EnvironmentRecommendation {
    pub fn summary(&self) -> EnvironmentSummary {
        EnvironmentSummary {
            tank_size: format!("{} L", one_decimal(self.tank_size_liter)),
            temperature: format!(
                "{} - {}°C",
                one_decimal(self.temperature_min),
                one_decimal(self.temperature_max)
            ),
            ph_range: format!("{} - {}", one_decimal(self.ph_min), one_decimal(self.ph_max)),
            included_species: self.included_species.clone(),
        }
    }

    /// Temperature bounds, when both means exist
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.temperature_min.zip(self.temperature_max)
    }

    pub fn ph_range(&self) -> Option<(f64, f64)> {
        self.ph_min.zip(self.ph_max)
    }
}

impl std::fmt::Display for EnvironmentRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.summary();
        write!(
            f,
            "{}, {}, pH {} ({} species)",
            s.tank_size,
            s.temperature,
            s.ph_range,
            self.included_species.len()
        )
    }
}

/// Arithmetic mean of the present values
///
/// Values are summed in sorted order so the result is independent of the
/// order species were requested in.
pub fn field_mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut present: Vec<f64> = values.into_iter().flatten().filter(|v| v.is_finite()).collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(f64::total_cmp);
    let sum: f64 = present.iter().sum();
    Some(sum / present.len() as f64)
}

/// Aggregate already-resolved records
pub fn aggregate_records(records: &[&SpeciesRecord]) -> AdvisorResult<EnvironmentRecommendation> {
    if records.is_empty() {
        return Err(AdvisorError::Empty);
    }

    Ok(EnvironmentRecommendation {
        tank_size_liter: field_mean(records.iter().map(|r| r.tank_size_liter)),
        temperature_min: field_mean(records.iter().map(|r| r.temperature_min)),
        temperature_max: field_mean(records.iter().map(|r| r.temperature_max)),
        ph_min: field_mean(records.iter().map(|r| r.ph_min)),
        ph_max: field_mean(records.iter().map(|r| r.ph_max)),
        included_species: records.iter().map(|r| r.name.clone()).collect(),
    })
}

/// Resolve free-text names and aggregate the matching species
///
/// Unresolvable names are skipped; only a batch where nothing resolves fails,
/// with `AdvisorError::Empty`.
pub fn aggregate<S>(
    catalog: &Catalog,
    index: &NameIndex,
    names: &[S],
) -> AdvisorResult<EnvironmentRecommendation>
where
    S: AsRef<str> + Sync,
{
    // Parallel resolution; collect keeps input order
    let resolved: Vec<Option<&SpeciesRecord>> = names
        .par_iter()
        .map(|name| {
            let name = name.as_ref();
            match index.resolve(name) {
                Ok(m) => catalog.get(&m.name),
                Err(e) => {
                    tracing::debug!("Dropping '{}' from aggregation: {}", name, e);
                    None
                }
            }
        })
        .collect();

    let records: Vec<&SpeciesRecord> = resolved.into_iter().flatten().collect();

    let recommendation = aggregate_records(&records)?;
    tracing::debug!(
        "Aggregated {} of {} requested species: {}",
        records.len(),
        names.len(),
        recommendation
    );
    Ok(recommendation)
}
