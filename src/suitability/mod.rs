//! Tank Condition Advisor
//!
//! Compares a live tank's measured conditions against the environment
//! recommended for its species and generates directional advice.
//!
//! ## Architecture
//! - `comparator.rs` - Range comparison (below / within / above)
//! - `advice.rs` - Advice messages, thresholds and the `advise` entry point

pub mod comparator;
pub mod advice;

// Re-export public API
pub use comparator::{compare_to_range, RangeComparison, RangeFit};
pub use advice::{
    advise, advise_against, Advice, AdviceCategory, AdviceResult, LiveConditions,
    QUALITY_WARNING_THRESHOLD, TURBIDITY_WARNING_THRESHOLD,
};
