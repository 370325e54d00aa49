//! Route definitions for the AI assistant.
//!
//! The Spanish paths are kept as aliases for dashboards built against
//! the first API revision. That dashboard posts with a trailing slash, so
//! both spellings are routed.

use axum::routing::post;
use axum::Router;

use crate::handlers::ai;
use crate::state::AppState;

/// AI routes mounted at `/ai`.
///
/// ```text
/// POST /summarize             -> summarize
/// POST /recommend-tasks       -> recommend_tasks
/// POST /detect-blockers       -> detect_blockers
/// POST /sumarizar             -> summarize
/// POST /recomendar_tareas     -> recommend_tasks
/// POST /detectar_bloqueos     -> detect_blockers
/// POST /sumarizar/            -> summarize
/// POST /recomendar_tareas/    -> recommend_tasks
/// POST /detectar_bloqueos/    -> detect_blockers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summarize", post(ai::summarize))
        .route("/recommend-tasks", post(ai::recommend_tasks))
        .route("/detect-blockers", post(ai::detect_blockers))
        .route("/sumarizar", post(ai::summarize))
        .route("/recomendar_tareas", post(ai::recommend_tasks))
        .route("/detectar_bloqueos", post(ai::detect_blockers))
        .route("/sumarizar/", post(ai::summarize))
        .route("/recomendar_tareas/", post(ai::recommend_tasks))
        .route("/detectar_bloqueos/", post(ai::detect_blockers))
}
