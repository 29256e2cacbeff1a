//! Reference Catalog
//!
//! Immutable in-memory table of fish species, built once at startup and
//! shared read-only by every request. Lookups are keyed by canonical name.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::utils::lookup_tables::{
    decode, AGGRESSION, AVAILABILITY, BEHAVIOR, BREEDING_DIFFICULTY, CARE_DIFFICULTY,
};

/// One species row from the reference dataset
///
/// Numeric fields are optional: partially recorded species stay in the
/// catalog and simply drop out of averages that need the missing field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    pub tank_size_liter: Option<f64>,
    pub temperature_min: Option<f64>,
    pub temperature_max: Option<f64>,
    pub ph_min: Option<f64>,
    pub ph_max: Option<f64>,
    pub max_size_cm: Option<f64>,

    // Ordinal codes, decoded through utils::lookup_tables
    pub care_difficulty: Option<i64>,
    pub availability: Option<i64>,
    pub behavior: Option<i64>,
    pub aggression: Option<i64>,
    pub breeding_difficulty: Option<i64>,
}

impl SpeciesRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Midpoint of the temperature range, when both ends are recorded
    pub fn temperature_midpoint(&self) -> Option<f64> {
        match (self.temperature_min, self.temperature_max) {
            (Some(lo), Some(hi)) => Some((lo + hi) / 2.0),
            _ => None,
        }
    }
}

/// Format a number the way the dataset reports it: at least one decimal place
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

pub(crate) fn format_optional(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_else(|| "Unknown".to_string())
}

/// Presentation of a species record for lookup responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesInfo {
    #[serde(rename = "Fish Name")]
    pub name: String,
    #[serde(rename = "Match Score")]
    pub match_score: u8,
    #[serde(rename = "Minimum Tank Size")]
    pub tank_size: String,
    #[serde(rename = "Temperature")]
    pub temperature: String,
    #[serde(rename = "pH Range")]
    pub ph_range: String,
    #[serde(rename = "Max Size")]
    pub max_size: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: &'static str,
    #[serde(rename = "Availability")]
    pub availability: &'static str,
    #[serde(rename = "Behavior")]
    pub behavior: &'static str,
    #[serde(rename = "Aggression")]
    pub aggression: &'static str,
    #[serde(rename = "Breeding Difficulty")]
    pub breeding_difficulty: &'static str,
}

impl SpeciesInfo {
    pub fn from_record(record: &SpeciesRecord, match_score: u8) -> Self {
        Self {
            name: record.name.clone(),
            match_score,
            tank_size: format!("{} L", format_optional(record.tank_size_liter)),
            temperature: format!(
                "{} - {}°C",
                format_optional(record.temperature_min),
                format_optional(record.temperature_max)
            ),
            ph_range: format!(
                "{} - {}",
                format_optional(record.ph_min),
                format_optional(record.ph_max)
            ),
            max_size: format!("{} cm", format_optional(record.max_size_cm)),
            difficulty: decode(&CARE_DIFFICULTY, record.care_difficulty),
            availability: decode(&AVAILABILITY, record.availability),
            behavior: decode(&BEHAVIOR, record.behavior),
            aggression: decode(&AGGRESSION, record.aggression),
            breeding_difficulty: decode(&BREEDING_DIFFICULTY, record.breeding_difficulty),
        }
    }
}

/// Immutable species table with keyed lookup
#[derive(Debug, Default)]
pub struct Catalog {
    /// Records in dataset order (the order ties are broken by)
    records: Vec<SpeciesRecord>,
    /// Canonical name → slot in `records`
    by_name: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build the catalog, enforcing unique non-empty canonical names
    ///
    /// Blank names are skipped and duplicates keep their first occurrence.
    pub fn from_records(records: impl IntoIterator<Item = SpeciesRecord>) -> Self {
        let mut kept: Vec<SpeciesRecord> = Vec::new();
        let mut by_name: FxHashMap<String, usize> = FxHashMap::default();

        for mut record in records {
            let trimmed = record.name.trim();
            if trimmed.is_empty() {
                tracing::warn!("Skipping species record with empty name");
                continue;
            }
            if trimmed.len() != record.name.len() {
                record.name = trimmed.to_string();
            }
            if by_name.contains_key(&record.name) {
                tracing::warn!("Duplicate species name '{}', keeping first occurrence", record.name);
                continue;
            }
            by_name.insert(record.name.clone(), kept.len());
            kept.push(record);
        }

        tracing::info!("Catalog built with {} species", kept.len());

        Self {
            records: kept,
            by_name,
        }
    }

    /// Exact lookup by canonical name
    pub fn get(&self, name: &str) -> Option<&SpeciesRecord> {
        self.by_name.get(name).map(|&slot| &self.records[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// All records, in dataset order
    pub fn records(&self) -> &[SpeciesRecord] {
        &self.records
    }

    /// Canonical names, in dataset order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
