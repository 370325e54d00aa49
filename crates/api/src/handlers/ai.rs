//! Handlers for the AI assistant endpoints.
//!
//! Field names follow the dashboard's Spanish payloads. Every handler
//! validates its input before the mediator is called, so a rejected
//! request never reaches the completion provider.

use axum::extract::State;
use axum::Json;
use scrumboard_core::assistant::{validate_objective, validate_summary_text, TicketActivity};
use scrumboard_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub texto: String,
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub resumen: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendTasksRequest {
    pub objetivo: String,
    #[serde(default)]
    pub historial: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendTasksResponse {
    pub recomendaciones: String,
}

#[derive(Debug, Deserialize)]
pub struct DetectBlockersRequest {
    pub tickets: Vec<TicketActivity>,
}

#[derive(Debug, Serialize)]
pub struct DetectBlockersResponse {
    pub bloqueados: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /ai/summarize
pub async fn summarize(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<SummarizeRequest>,
) -> AppResult<Json<SummarizeResponse>> {
    let text = validate_summary_text(&input.texto).map_err(CoreError::Validation)?;

    let resumen = state.mediator.summarize(text).await?;
    Ok(Json(SummarizeResponse { resumen }))
}

/// POST /ai/recommend-tasks
pub async fn recommend_tasks(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<RecommendTasksRequest>,
) -> AppResult<Json<RecommendTasksResponse>> {
    let objective = validate_objective(&input.objetivo).map_err(CoreError::Validation)?;

    let recomendaciones = state
        .mediator
        .recommend_tasks(objective, &input.historial)
        .await?;
    Ok(Json(RecommendTasksResponse { recomendaciones }))
}

/// POST /ai/detect-blockers
///
/// Every submitted ticket is forwarded; the blocking criteria are applied
/// by the model, not here.
pub async fn detect_blockers(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<DetectBlockersRequest>,
) -> AppResult<Json<DetectBlockersResponse>> {
    tracing::debug!(tickets = input.tickets.len(), "Detecting blockers");

    let bloqueados = state.mediator.detect_blockers(&input.tickets).await?;
    Ok(Json(DetectBlockersResponse { bloqueados }))
}
