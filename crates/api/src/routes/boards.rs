use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::boards;
use crate::state::AppState;

/// Board routes mounted at `/boards`.
///
/// ```text
/// GET    /                                -> list_boards
/// POST   /                                -> create_board
/// GET    /{board}                         -> get_board
/// DELETE /{board}                         -> delete_board
/// POST   /{board}/lists                   -> add_list
/// POST   /{board}/lists/{list}/cards      -> add_card
/// PATCH  /{board}/cards/{card_id}         -> update_card
/// DELETE /{board}/cards/{card_id}         -> delete_card
/// POST   /{board}/cards/{card_id}/move    -> move_card
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(boards::list_boards).post(boards::create_board))
        .route(
            "/{board}",
            get(boards::get_board).delete(boards::delete_board),
        )
        .route("/{board}/lists", post(boards::add_list))
        .route("/{board}/lists/{list}/cards", post(boards::add_card))
        .route(
            "/{board}/cards/{card_id}",
            patch(boards::update_card).delete(boards::delete_card),
        )
        .route("/{board}/cards/{card_id}/move", post(boards::move_card))
}
