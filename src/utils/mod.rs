//! Shared utilities
//!
//! - Similarity: fuzzy string scoring used by name resolution
//! - Normalization: feature standardization for the stocking index
//! - Lookup tables: ordinal code to label decoding

pub mod lookup_tables;
pub mod normalization;
pub mod similarity;

// Re-export commonly used items
pub use lookup_tables::{decode, CodeTable, UNKNOWN_LABEL};
pub use normalization::{euclidean_distance, StandardScaler};
pub use similarity::{full_process, weighted_ratio};
