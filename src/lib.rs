//! Aquarium Advisor
//!
//! Fish species lookup and tank planning over a static reference catalog.
//!
//! - `search_index`: Fuzzy name resolution against catalog names
//! - `environment`: Averaged environment for a set of species
//! - `suitability/`: Advice comparing live conditions to that environment
//! - `stocking`: Nearest-species stocking suggestions for a tank
//! - `data`: CSV loading with Polars
//!
//! `AquariumAdvisor` ties these together over one immutable catalog.

pub mod error;
pub mod utils;
pub mod catalog;
pub mod data;
pub mod config;
pub mod search_index;
pub mod environment;
pub mod suitability;
pub mod stocking;
pub mod advisor;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::{AdvisorError, AdvisorResult};
pub use catalog::{Catalog, SpeciesInfo, SpeciesRecord};
pub use config::AdvisorConfig;
pub use search_index::{resolve, NameIndex, ResolvedMatch, MATCH_THRESHOLD};
pub use environment::{aggregate, EnvironmentRecommendation, EnvironmentSummary};
pub use suitability::{advise, Advice, AdviceResult, LiveConditions};
pub use stocking::{StockingIndex, StockingSuggestion, TankQuery};
pub use advisor::AquariumAdvisor;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
