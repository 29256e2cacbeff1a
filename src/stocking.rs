//! Stocking Recommendation
//!
//! Suggests species suited to a tank's size and temperature, with a
//! conservative estimate of how many fit.
//!
//! Algorithm:
//! 1. At startup, keep every species with temperature range, tank size and
//!    max size recorded. Features are (temperature midpoint, tank size),
//!    standardized once with `StandardScaler`.
//! 2. Per query, standardize (target temperature, tank volume) with the same
//!    statistics and take the `NEIGHBOR_COUNT` nearest species by Euclidean
//!    distance (ties keep catalog order).
//! 3. A species longer than the tank's length or width gets 0. Otherwise the
//!    quantity is the smaller of the footprint and volume estimates.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SpeciesRecord};
use crate::error::{AdvisorError, AdvisorResult};
use crate::utils::normalization::{euclidean_distance, StandardScaler};

/// Number of species returned per recommendation
pub const NEIGHBOR_COUNT: usize = 5;

/// Footprint cap: one fish per 400 cm² of floor area
pub const FOOTPRINT_PER_FISH_CM2: f64 = 400.0;

/// Volume cap: one fish per 20·20/1000 L (400 cm³) of water
pub const VOLUME_PER_FISH_CM3: f64 = 20.0 * 20.0;

/// Tank geometry (cm) and target temperature (°C)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankQuery {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub temperature: f64,
}

impl TankQuery {
    pub fn new(length: f64, width: f64, height: f64, temperature: f64) -> Self {
        Self {
            length,
            width,
            height,
            temperature,
        }
    }

    /// Dimensions must be positive and finite, temperature finite
    pub fn validate(&self) -> AdvisorResult<()> {
        for (field, value) in [
            ("length", self.length),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AdvisorError::InvalidInput(format!(
                    "'{}' must be a positive number of centimeters, got {}",
                    field, value
                )));
            }
        }
        if !self.temperature.is_finite() {
            return Err(AdvisorError::InvalidInput(format!(
                "'temperature' must be a finite number, got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    pub fn volume_cm3(&self) -> f64 {
        self.length * self.width * self.height
    }

    /// Tank volume in liters (cm³ / 1000)
    pub fn volume_liters(&self) -> f64 {
        self.volume_cm3() / 1000.0
    }

    pub fn footprint_cm2(&self) -> f64 {
        self.length * self.width
    }
}

/// Footprint-based capacity estimate
pub fn footprint_capacity(query: &TankQuery) -> u32 {
    (query.footprint_cm2() / FOOTPRINT_PER_FISH_CM2).floor() as u32
}

/// Volume-based capacity estimate
pub fn volume_capacity(query: &TankQuery) -> u32 {
    (query.volume_cm3() / VOLUME_PER_FISH_CM3).floor() as u32
}

/// Safe quantity of a species with the given adult size
///
/// Zero when the fish cannot turn around in the footprint; otherwise the
/// smaller of the two capacity estimates.
pub fn estimate_quantity(query: &TankQuery, max_size_cm: f64) -> u32 {
    if max_size_cm > query.length || max_size_cm > query.width {
        return 0;
    }
    footprint_capacity(query).min(volume_capacity(query))
}

/// One recommended species for a tank
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockingSuggestion {
    pub name: String,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub tank_size_liter: f64,
    pub max_size_cm: f64,
    /// Standardized feature-space distance from the query
    pub distance: f64,
    pub quantity: u32,
}

/// A species with complete habitat data, pre-scaled
#[derive(Debug, Clone)]
struct FeatureRow {
    name: String,
    temperature_min: f64,
    temperature_max: f64,
    tank_size_liter: f64,
    max_size_cm: f64,
    scaled: [f64; 2],
}

impl FeatureRow {
    fn from_record(record: &SpeciesRecord) -> Option<Self> {
        Some(Self {
            name: record.name.clone(),
            temperature_min: record.temperature_min?,
            temperature_max: record.temperature_max?,
            tank_size_liter: record.tank_size_liter?,
            max_size_cm: record.max_size_cm?,
            scaled: [0.0; 2],
        })
    }

    fn features(&self) -> [f64; 2] {
        [
            (self.temperature_min + self.temperature_max) / 2.0,
            self.tank_size_liter,
        ]
    }
}

/// Pre-normalized feature table, built once from the catalog
///
/// Immutable after construction; share it by reference across requests.
#[derive(Debug)]
pub struct StockingIndex {
    /// Complete rows in catalog order
    rows: Vec<FeatureRow>,
    /// None when no row qualifies
    scaler: Option<StandardScaler<2>>,
}

impl StockingIndex {
    pub fn build(catalog: &Catalog) -> Self {
        let mut rows: Vec<FeatureRow> = catalog
            .records()
            .iter()
            .filter_map(FeatureRow::from_record)
            .collect();

        let raw: Vec<[f64; 2]> = rows.iter().map(FeatureRow::features).collect();
        let scaler = StandardScaler::<2>::fit(&raw);

        if let Some(scaler) = &scaler {
            for (row, features) in rows.iter_mut().zip(&raw) {
                row.scaled = scaler.transform(features);
            }
            tracing::info!(
                "Stocking index built: {} of {} species (temperature mean {:.2}, tank mean {:.2} L)",
                rows.len(),
                catalog.len(),
                scaler.mean()[0],
                scaler.mean()[1]
            );
        } else {
            tracing::warn!("Stocking index is empty: no species has complete habitat data");
        }

        Self { rows, scaler }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Nearest rows to the query with their distances, closest first
    fn nearest(&self, query: &TankQuery, k: usize) -> AdvisorResult<Vec<(&FeatureRow, f64)>> {
        let scaler = self.scaler.as_ref().ok_or(AdvisorError::DataUnavailable)?;
        let point = scaler.transform(&[query.temperature, query.volume_liters()]);

        let mut ranked: Vec<(&FeatureRow, f64)> = self
            .rows
            .iter()
            .map(|row| (row, euclidean_distance(&row.scaled, &point)))
            .collect();

        // Stable sort: equal distances keep catalog order
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(k);
        Ok(ranked)
    }

    /// Recommend species and safe quantities for a tank
    pub fn recommend(&self, query: &TankQuery) -> AdvisorResult<Vec<StockingSuggestion>> {
        query.validate()?;

        let suggestions: Vec<StockingSuggestion> = self
            .nearest(query, NEIGHBOR_COUNT)?
            .into_iter()
            .map(|(row, distance)| StockingSuggestion {
                name: row.name.clone(),
                temperature_min: row.temperature_min,
                temperature_max: row.temperature_max,
                tank_size_liter: row.tank_size_liter,
                max_size_cm: row.max_size_cm,
                distance,
                quantity: estimate_quantity(query, row.max_size_cm),
            })
            .collect();

        tracing::debug!(
            "Stocking for {:.1} L at {}°C: {} suggestions",
            query.volume_liters(),
            query.temperature,
            suggestions.len()
        );
        Ok(suggestions)
    }
}
