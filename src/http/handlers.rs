use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{ApiError, AppState};
use crate::models::ResponseInput;

/// Body of a batch request; `responses` is checked by hand so a missing or
/// non-array value gets the same 400 as an empty one
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub responses: Option<Value>,
}

/// POST /api/mixed-analysis/analyze
pub async fn analyze_response(
    State(state): State<AppState>,
    payload: Result<Json<ResponseInput>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(input) = payload?;

    let bundle = state
        .analyzer
        .analyze_response(&input.audio_url, &input.transcription)
        .await?;

    Ok(Json(json!({ "success": true, "data": bundle })))
}

/// POST /api/mixed-analysis/analyze-batch
pub async fn analyze_batch(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;

    let entries = match request.responses {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Err(ApiError::bad_request("Valid array of responses is required")),
    };

    let responses = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<ResponseInput>(entry).map_err(|e| {
                ApiError::bad_request(format!("Invalid response entry {}: {}", index, e))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    info!("Received batch of {} responses", responses.len());

    let aggregated = state.analyzer.analyze_multiple_responses(&responses).await?;

    Ok(Json(json!({ "success": true, "data": aggregated })))
}
