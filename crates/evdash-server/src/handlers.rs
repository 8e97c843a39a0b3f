//! Insight proxy handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::{AppState, InsightError};
use evdash_core::{build_prompt, Error, InsightBackend, InsightKind, InsightRequest, YearRange};

/// Request body for POST /api/generate-insights
#[derive(Debug, Deserialize)]
pub struct GenerateInsightsBody {
    /// Aggregate payload assembled by the caller
    pub data: Option<Value>,
    #[serde(default)]
    pub filters: InsightFilters,
}

/// Caller-supplied request metadata
#[derive(Debug, Default, Deserialize)]
pub struct InsightFilters {
    /// Free-text context note for the generic template
    pub context: Option<String>,
    /// Template selector; unrecognized values get the generic template
    #[serde(rename = "requestType")]
    pub request_type: Option<String>,
    /// Manufacturers involved, for logging
    pub makes: Option<Vec<String>>,
    /// Year range involved, for logging
    #[serde(rename = "yearRange")]
    pub year_range: Option<YearRange>,
}

/// Response body on success
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub insight: String,
}

/// POST /api/generate-insights - relay an aggregate to the generation
/// service
///
/// Validates the payload against the selected template before any network
/// call; backend failures come back as typed non-2xx responses carrying a
/// user-facing fallback string. No retries here; a retry is a fresh request.
pub async fn generate_insights(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GenerateInsightsBody>,
) -> Result<Json<InsightResponse>, InsightError> {
    let data = match body.data {
        Some(ref data) if !data.is_null() => data.clone(),
        _ => return Err(Error::InvalidInput("no chart data provided".into()).into()),
    };

    let kind = InsightKind::from_request_type(body.filters.request_type.as_deref());
    info!(
        kind = %kind,
        makes = ?body.filters.makes,
        year_range = ?body.filters.year_range,
        "Insight requested"
    );

    let request = InsightRequest {
        kind,
        data,
        context: body.filters.context,
    };

    // Reject malformed payloads before the proxy is involved
    let prompt = build_prompt(&request)?;

    let token = state.tracker.begin();
    let insight = state.ai.generate(&prompt).await?;

    // A newer request may have been issued while this one was in flight;
    // its result stays visible and this one is only returned to its caller.
    if !state.tracker.complete(token, insight.clone()) {
        debug!(kind = %kind, "Superseded insight response discarded from visible state");
    }

    Ok(Json(InsightResponse { insight }))
}

/// GET /api/health - static readiness payload, no side effects
pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
