//! Error taxonomy for the advisor core
//!
//! Every failure is returned as a tagged value. Messages are written for end
//! users and echo the offending input so the caller can correct it.

use thiserror::Error;

/// Failures produced by the advisor operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdvisorError {
    /// Fuzzy match fell below the confidence threshold, or there was nothing to match against
    #[error("No fish found matching '{query}', try a different name.")]
    NotFound { query: String },

    /// None of the names in a batch resolved to a known species
    #[error("No matching fish found in the list.")]
    Empty,

    /// Stocking recommendation has no species with complete habitat data
    #[error("Stocking data unavailable: no species has temperature, tank size and max size recorded.")]
    DataUnavailable,

    /// Missing or malformed input fields
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AdvisorError {
    pub fn not_found(query: impl Into<String>) -> Self {
        AdvisorError::NotFound { query: query.into() }
    }

    /// Short machine-readable tag, used by the HTTP boundary
    pub fn kind(&self) -> &'static str {
        match self {
            AdvisorError::NotFound { .. } => "not_found",
            AdvisorError::Empty => "empty",
            AdvisorError::DataUnavailable => "data_unavailable",
            AdvisorError::InvalidInput(_) => "invalid_input",
        }
    }
}

pub type AdvisorResult<T> = std::result::Result<T, AdvisorError>;
