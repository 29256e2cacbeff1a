//! Aquarium Advisor - Main coordinator
//!
//! Owns the long-lived read-only state (catalog, name index, stocking index)
//! and exposes the four operations used by the HTTP boundary:
//! - `lookup_species`
//! - `aggregate_environment`
//! - `advise_on_conditions`
//! - `recommend_stocking`
//!
//! Every operation is a pure function of its inputs and the shared state, so
//! one instance can serve concurrent requests without locking.

use anyhow::Result;
use std::path::Path;

use crate::catalog::{Catalog, SpeciesInfo};
use crate::data::load_catalog;
use crate::environment::{aggregate, EnvironmentRecommendation};
use crate::error::{AdvisorError, AdvisorResult};
use crate::search_index::NameIndex;
use crate::stocking::{StockingIndex, StockingSuggestion, TankQuery};
use crate::suitability::{advise, AdviceResult, LiveConditions};

/// Main advisor
#[derive(Debug)]
pub struct AquariumAdvisor {
    catalog: Catalog,
    name_index: NameIndex,
    stocking_index: StockingIndex,
}

impl AquariumAdvisor {
    /// Build derived indexes over an in-memory catalog
    pub fn new(catalog: Catalog) -> Self {
        let name_index = NameIndex::build(&catalog);
        let stocking_index = StockingIndex::build(&catalog);

        tracing::info!(
            "Aquarium advisor ready: {} species, {} with stocking data",
            catalog.len(),
            stocking_index.len()
        );

        Self {
            catalog,
            name_index,
            stocking_index,
        }
    }

    /// Load the fish CSV and build the advisor
    pub fn from_csv(path: &Path) -> Result<Self> {
        Ok(Self::new(load_catalog(path)?))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn name_index(&self) -> &NameIndex {
        &self.name_index
    }

    pub fn stocking_index(&self) -> &StockingIndex {
        &self.stocking_index
    }

    /// Fuzzy-resolve one name and present its record
    pub fn lookup_species(&self, name: &str) -> AdvisorResult<SpeciesInfo> {
        let resolved = self.name_index.resolve(name)?;
        let record = self
            .catalog
            .get(&resolved.name)
            .ok_or_else(|| AdvisorError::not_found(name))?;
        Ok(SpeciesInfo::from_record(record, resolved.score))
    }

    /// Mean environment over the names that resolve
    pub fn aggregate_environment<S>(&self, names: &[S]) -> AdvisorResult<EnvironmentRecommendation>
    where
        S: AsRef<str> + Sync,
    {
        aggregate(&self.catalog, &self.name_index, names)
    }

    /// Advice for a live tank holding the named species
    pub fn advise_on_conditions<S>(
        &self,
        names: &[S],
        temperature: f64,
        ph: f64,
        turbidity: f64,
        quality: f64,
    ) -> AdvisorResult<AdviceResult>
    where
        S: AsRef<str> + Sync,
    {
        let live = LiveConditions {
            temperature,
            ph,
            turbidity,
            quality,
        };
        advise(&self.catalog, &self.name_index, names, &live)
    }

    /// Nearest-species stocking plan for a tank
    pub fn recommend_stocking(
        &self,
        length: f64,
        width: f64,
        height: f64,
        temperature: f64,
    ) -> AdvisorResult<Vec<StockingSuggestion>> {
        self.stocking_index
            .recommend(&TankQuery::new(length, width, height, temperature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SpeciesRecord;

    fn advisor() -> AquariumAdvisor {
        AquariumAdvisor::new(Catalog::from_records(vec![
            SpeciesRecord {
                name: "Neon Tetra".to_string(),
                tank_size_liter: Some(40.0),
                temperature_min: Some(20.0),
                temperature_max: Some(26.0),
                ph_min: Some(6.0),
                ph_max: Some(7.5),
                max_size_cm: Some(4.0),
                care_difficulty: Some(4),
                ..Default::default()
            },
            SpeciesRecord {
                name: "Guppy".to_string(),
                tank_size_liter: Some(20.0),
                temperature_min: Some(22.0),
                temperature_max: Some(28.0),
                ph_min: Some(7.0),
                ph_max: Some(8.5),
                max_size_cm: Some(6.0),
                ..Default::default()
            },
        ]))
    }

    #[test]
    fn test_lookup_species() {
        let info = advisor().lookup_species("neon tetr").unwrap();
        assert_eq!(info.name, "Neon Tetra");
        assert!(info.match_score >= 60 && info.match_score < 100);
        assert_eq!(info.difficulty, "Beginner");
        assert_eq!(info.availability, "Unknown");
    }

    #[test]
    fn test_lookup_every_catalog_name_exactly() {
        let advisor = advisor();
        let names: Vec<String> = advisor.catalog().names().map(String::from).collect();
        for name in names {
            let info = advisor.lookup_species(&name).unwrap();
            assert_eq!(info.name, name);
            assert_eq!(info.match_score, 100);
        }
    }

    #[test]
    fn test_lookup_unknown_echoes_query() {
        let err = advisor().lookup_species("qqqq zzzz").unwrap_err();
        assert!(err.to_string().contains("qqqq zzzz"));
    }

    #[test]
    fn test_operations_compose() {
        let advisor = advisor();
        let env = advisor.aggregate_environment(&["neon tera", "gupy"]).unwrap();
        assert_eq!(env.summary().temperature, "21.0 - 27.0°C");

        let advice = advisor
            .advise_on_conditions(&["neon tera", "gupy"], 16.0, 7.0, 10.0, 90.0)
            .unwrap();
        assert_eq!(advice.messages().len(), 1);

        let stocking = advisor.recommend_stocking(60.0, 30.0, 40.0, 24.0).unwrap();
        assert_eq!(stocking.len(), 2);
        assert!(stocking.iter().all(|s| s.quantity == 4));
    }
}
