// Axum API Server Module
//
// Purpose: JSON endpoints over the shared AquariumAdvisor. The advisor is
// built once at startup and shared read-only across requests.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::advisor::AquariumAdvisor;
use crate::error::AdvisorError;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<AquariumAdvisor>,
}

impl AppState {
    /// Load the dataset and build all indexes
    pub async fn new(data_path: &Path) -> anyhow::Result<Self> {
        let path = data_path.to_path_buf();
        // Polars load and index build are CPU-bound
        let advisor = tokio::task::spawn_blocking(move || AquariumAdvisor::from_csv(&path)).await??;
        Ok(Self::from_advisor(advisor))
    }

    pub fn from_advisor(advisor: AquariumAdvisor) -> Self {
        Self {
            advisor: Arc::new(advisor),
        }
    }
}

// ============================================================================
// Router Configuration
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(index))
        .route("/health", get(health_check))
        // Species lookup
        .route("/fish", post(lookup_fish))
        // Environment aggregation
        .route("/fish-recommend", post(recommend_environment))
        // Live condition advice
        .route("/fish-compare", post(compare_conditions))
        // Stocking recommendation
        .route("/fish-stocking", post(recommend_stocking))
        // Middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Request Field Extraction
// ============================================================================

fn require_number(payload: &Value, field: &str) -> Result<f64, AdvisorError> {
    match payload.get(field) {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| AdvisorError::InvalidInput(format!("'{}' is not a valid number", field))),
        // Form-style clients send numbers as strings
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| AdvisorError::InvalidInput(format!("'{}' is not a number: '{}'", field, s))),
        Some(_) => Err(AdvisorError::InvalidInput(format!("'{}' must be a number", field))),
        None => Err(AdvisorError::InvalidInput(format!("Missing field '{}'", field))),
    }
}

fn require_text(payload: &Value, field: &str) -> Result<String, AdvisorError> {
    match payload.get(field) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err(AdvisorError::InvalidInput(format!("'{}' is empty", field))),
        Some(_) => Err(AdvisorError::InvalidInput(format!("'{}' must be a string", field))),
        None => Err(AdvisorError::InvalidInput(format!("Missing field '{}'", field))),
    }
}

/// Names list; non-string entries are skipped like unresolvable names
///
/// An empty list counts as missing.
fn require_name_list(payload: &Value, field: &str) -> Result<Vec<String>, AdvisorError> {
    match payload.get(field) {
        Some(Value::Array(items)) if items.is_empty() => {
            Err(AdvisorError::InvalidInput(format!("Missing '{}' in request.", field)))
        }
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()),
        Some(_) => Err(AdvisorError::InvalidInput(format!("'{}' must be a list of names", field))),
        None => Err(AdvisorError::InvalidInput(format!("Missing field '{}'", field))),
    }
}

// ============================================================================
// Handlers
// ============================================================================

async fn index() -> &'static str {
    "Fish Info API is running!"
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let advisor = &state.advisor;
    Json(json!({
        "status": "healthy",
        "species": advisor.catalog().len(),
        "indexed_names": advisor.name_index().len(),
        "stocking_candidates": advisor.stocking_index().len(),
    }))
}

async fn lookup_fish(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let name = require_text(&payload, "name")?;
    tracing::debug!("Looking up '{}'", name);

    let info = state.advisor.lookup_species(&name)?;
    Ok(Json(serde_json::to_value(info)?))
}

async fn recommend_environment(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let names = require_name_list(&payload, "fish_list")?;
    tracing::info!("Aggregating environment for {} names", names.len());

    // Batch resolution fans out over rayon
    let advisor = state.advisor.clone();
    let env = tokio::task::spawn_blocking(move || advisor.aggregate_environment(&names)).await??;
    Ok(Json(serde_json::to_value(env.summary())?))
}

async fn compare_conditions(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let names = require_name_list(&payload, "fish_list")?;
    let temperature = require_number(&payload, "temperature")?;
    let ph = require_number(&payload, "ph")?;
    let turbidity = require_number(&payload, "turbidity")?;
    let quality = require_number(&payload, "quality")?;

    let advisor = state.advisor.clone();
    let result = tokio::task::spawn_blocking(move || {
        advisor.advise_on_conditions(&names, temperature, ph, turbidity, quality)
    })
    .await??;

    let body = if result.is_ideal() {
        serde_json::to_value(&result)?
    } else {
        json!({ "recommendations": result.messages() })
    };
    Ok(Json(body))
}

async fn recommend_stocking(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let length = require_number(&payload, "length")?;
    let width = require_number(&payload, "width")?;
    let height = require_number(&payload, "height")?;
    let temperature = require_number(&payload, "temperature")?;

    let suggestions = state
        .advisor
        .recommend_stocking(length, width, height, temperature)?;

    Ok(Json(json!({
        "tank_volume_liter": length * width * height / 1000.0,
        "suggestions": suggestions,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    Advisor(AdvisorError),
    Internal(String),
}

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        ApiError::Advisor(err)
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Task join error: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(format!("JSON encode error: {}", err))
    }
}

fn status_for(err: &AdvisorError) -> StatusCode {
    match err {
        AdvisorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        AdvisorError::NotFound { .. } | AdvisorError::Empty => StatusCode::NOT_FOUND,
        AdvisorError::DataUnavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::Advisor(err) => (
                status_for(&err),
                json!({ "error": err.to_string(), "kind": err.kind() }),
            ),
            ApiError::Internal(msg) => {
                tracing::error!("{}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
