use std::sync::Arc;

use scrumboard_ai::AiMediator;
use scrumboard_core::board::store::BoardStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Ticket store connection pool.
    pub pool: scrumboard_db::DbPool,
    /// AI assistant, shared by all concurrent requests.
    pub mediator: Arc<AiMediator>,
    /// Persisted dashboard boards.
    pub boards: Arc<BoardStore>,
}
