//! Advice Generation
//!
//! Turns a comparison of measured tank conditions against the aggregated
//! species environment into short, directional advice messages.
//!
//! Message order is fixed: temperature, pH, turbidity, water quality.

use serde::Serialize;

use super::comparator::{compare_to_range_opt, RangeComparison, RangeFit};
use crate::catalog::{format_number, Catalog};
use crate::environment::{aggregate, EnvironmentRecommendation};
use crate::error::{AdvisorError, AdvisorResult};
use crate::search_index::NameIndex;

/// Turbidity strictly above this (0-100 scale) triggers a cloudiness warning
pub const TURBIDITY_WARNING_THRESHOLD: f64 = 50.0;

/// Quality score strictly below this (0-100 scale) triggers a quality warning
pub const QUALITY_WARNING_THRESHOLD: f64 = 50.0;

pub const IDEAL_MESSAGE: &str = "The aquarium environment is currently ideal!";

/// Measured state of a live tank
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LiveConditions {
    pub temperature: f64,
    pub ph: f64,
    /// 0-100, higher is cloudier
    pub turbidity: f64,
    /// 0-100, higher is better
    pub quality: f64,
}

impl LiveConditions {
    /// Reject non-finite measurements
    pub fn validate(&self) -> AdvisorResult<()> {
        let fields = [
            ("temperature", self.temperature),
            ("ph", self.ph),
            ("turbidity", self.turbidity),
            ("quality", self.quality),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(AdvisorError::InvalidInput(format!(
                    "'{}' must be a finite number, got {}",
                    field, value
                )));
            }
        }
        Ok(())
    }
}

/// What a piece of advice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdviceCategory {
    Temperature,
    Ph,
    Turbidity,
    Quality,
}

/// One actionable recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Advice {
    pub category: AdviceCategory,
    /// Which side of the acceptable range the measurement fell on
    pub fit: RangeFit,
    pub message: String,
}

/// Outcome of comparing live conditions against the recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AdviceResult {
    /// Nothing to change
    Ideal { message: String },
    /// At least one condition needs attention
    Recommendations { recommendations: Vec<Advice> },
}

impl AdviceResult {
    pub fn is_ideal(&self) -> bool {
        matches!(self, AdviceResult::Ideal { .. })
    }

    /// Recommendation messages (empty when ideal)
    pub fn messages(&self) -> Vec<&str> {
        match self {
            AdviceResult::Ideal { .. } => Vec::new(),
            AdviceResult::Recommendations { recommendations } => {
                recommendations.iter().map(|a| a.message.as_str()).collect()
            }
        }
    }
}

fn temperature_advice(comp: &RangeComparison) -> Option<Advice> {
    let message = match comp.fit {
        RangeFit::WithinRange => return None,
        RangeFit::BelowRange => format!(
            "The water temperature is too low ({}°C). It should be increased to around {}°C.",
            format_number(comp.value),
            comp.range_text()
        ),
        RangeFit::AboveRange => format!(
            "The water temperature is too high ({}°C). It should be decreased to around {}°C.",
            format_number(comp.value),
            comp.range_text()
        ),
    };
    Some(Advice {
        category: AdviceCategory::Temperature,
        fit: comp.fit,
        message,
    })
}

fn ph_advice(comp: &RangeComparison) -> Option<Advice> {
    let direction = match comp.fit {
        RangeFit::WithinRange => return None,
        RangeFit::BelowRange => "low",
        RangeFit::AboveRange => "high",
    };
    Some(Advice {
        category: AdviceCategory::Ph,
        fit: comp.fit,
        message: format!(
            "The pH level is too {} ({}). It should be adjusted to around {}.",
            direction,
            format_number(comp.value),
            comp.range_text()
        ),
    })
}

/// Bounds as displayed: one decimal place
fn displayed_range(range: Option<(f64, f64)>) -> Option<(f64, f64)> {
    let round = |v: f64| (v * 10.0).round() / 10.0;
    range.map(|(min, max)| (round(min), round(max)))
}

/// Compare live conditions against an already-aggregated recommendation
///
/// Values are checked against the bounds as printed in the messages, so a
/// reading inside the shown range never triggers advice. A missing
/// aggregated bound (no species recorded it) skips that check.
pub fn advise_against(
    recommendation: &EnvironmentRecommendation,
    live: &LiveConditions,
) -> AdviceResult {
    let mut recommendations = Vec::new();
    let temperature_range = displayed_range(recommendation.temperature_range());
    let ph_range = displayed_range(recommendation.ph_range());

    if let Some(advice) = compare_to_range_opt(live.temperature, temperature_range)
        .as_ref()
        .and_then(temperature_advice)
    {
        recommendations.push(advice);
    }

    if let Some(advice) = compare_to_range_opt(live.ph, ph_range)
        .as_ref()
        .and_then(ph_advice)
    {
        recommendations.push(advice);
    }

    if live.turbidity > TURBIDITY_WARNING_THRESHOLD {
        recommendations.push(Advice {
            category: AdviceCategory::Turbidity,
            fit: RangeFit::AboveRange,
            message: format!(
                "The water is too cloudy ({}/100). Consider changing the water or using a filter.",
                format_number(live.turbidity)
            ),
        });
    }

    if live.quality < QUALITY_WARNING_THRESHOLD {
        recommendations.push(Advice {
            category: AdviceCategory::Quality,
            fit: RangeFit::BelowRange,
            message: format!(
                "The water quality is poor ({}/100). Check the filter and change the water regularly.",
                format_number(live.quality)
            ),
        });
    }

    if recommendations.is_empty() {
        AdviceResult::Ideal {
            message: IDEAL_MESSAGE.to_string(),
        }
    } else {
        AdviceResult::Recommendations { recommendations }
    }
}

/// Aggregate the named species and advise on the live conditions
///
/// `AdvisorError::Empty` from the aggregation propagates unchanged, so callers
/// can tell "no matching species" apart from "conditions are fine".
pub fn advise<S>(
    catalog: &Catalog,
    index: &NameIndex,
    names: &[S],
    live: &LiveConditions,
) -> AdvisorResult<AdviceResult>
where
    S: AsRef<str> + Sync,
{
    live.validate()?;
    let recommendation = aggregate(catalog, index, names)?;
    Ok(advise_against(&recommendation, live))
}
