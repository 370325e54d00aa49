pub mod ai;
pub mod boards;
pub mod health;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Build the root-mounted route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tickets                                      list, create
/// /tickets/{id}                                 get, patch, delete
///
/// /ai/summarize                                 daily summary (POST)
/// /ai/recommend-tasks                           task suggestions (POST)
/// /ai/detect-blockers                           blocker analysis (POST)
/// /ai/sumarizar                                 alias of summarize
/// /ai/recomendar_tareas                         alias of recommend-tasks
/// /ai/detectar_bloqueos                         alias of detect-blockers
///
/// /boards                                       list, create
/// /boards/{board}                               get, delete
/// /boards/{board}/lists                         add list (POST)
/// /boards/{board}/lists/{list}/cards            add card (POST)
/// /boards/{board}/cards/{card_id}               patch, delete
/// /boards/{board}/cards/{card_id}/move          move card (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tickets", tickets::router())
        .nest("/ai", ai::router())
        .nest("/boards", boards::router())
}
