//! Range Comparator
//!
//! Compares a measured tank value against a recommended [min, max] range.

use serde::Serialize;

/// Where a measured value sits relative to a recommended range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeFit {
    /// value < min
    BelowRange,

    /// min <= value <= max
    WithinRange,

    /// value > max
    AboveRange,
}

/// Result of a range comparison with distance context
#[derive(Debug, Clone, PartialEq)]
pub struct RangeComparison {
    pub fit: RangeFit,

    /// Measured value being compared
    pub value: f64,

    pub min: f64,
    pub max: f64,

    /// Distance from the nearest bound (0 when inside)
    pub distance_from_range: f64,
}

impl RangeComparison {
    pub fn is_within_range(&self) -> bool {
        self.fit == RangeFit::WithinRange
    }

    /// "21.0-27.0" style range text, one decimal place
    pub fn range_text(&self) -> String {
        format!("{:.1}-{:.1}", self.min, self.max)
    }
}

/// Compare a value against [min, max]
///
/// Bounds are inclusive. NaN values never fall outside the range.
pub fn compare_to_range(value: f64, min: f64, max: f64) -> RangeComparison {
    let (fit, distance) = if value < min {
        (RangeFit::BelowRange, min - value)
    } else if value > max {
        (RangeFit::AboveRange, value - max)
    } else {
        (RangeFit::WithinRange, 0.0)
    };

    RangeComparison {
        fit,
        value,
        min,
        max,
        distance_from_range: distance,
    }
}

/// Compare against an optional range; None when the range is unknown
pub fn compare_to_range_opt(value: f64, range: Option<(f64, f64)>) -> Option<RangeComparison> {
    range.map(|(min, max)| compare_to_range(value, min, max))
}
