//! Handlers for the `/boards` resource (dashboard boards, lists, cards).
//!
//! All reads and writes go through the shared [`BoardStore`]; each mutation
//! is persisted before the response is sent.
//!
//! [`BoardStore`]: scrumboard_core::board::store::BoardStore

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use scrumboard_core::board::{Board, Card, CardPatch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::{ValidJson, ValidPath};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateBoard {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateList {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateCard {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCard {
    pub to_list: String,
}

/// One entry of the board index.
#[derive(Debug, Serialize)]
pub struct BoardSummary {
    pub name: String,
    pub lists: Vec<String>,
    pub cards: usize,
}

/// A board with its lists and cards, in display order.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub name: String,
    #[serde(flatten)]
    pub board: Board,
}

#[derive(Debug, Serialize)]
pub struct ListView {
    pub board: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Boards
// ---------------------------------------------------------------------------

/// GET /boards
pub async fn list_boards(State(state): State<AppState>) -> Json<Vec<BoardSummary>> {
    let boards = state
        .boards
        .read(|doc| {
            doc.boards
                .iter()
                .map(|(name, board)| BoardSummary {
                    name: name.clone(),
                    lists: board.lists.keys().cloned().collect(),
                    cards: board.lists.values().map(Vec::len).sum(),
                })
                .collect()
        })
        .await;
    Json(boards)
}

/// POST /boards
pub async fn create_board(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateBoard>,
) -> AppResult<(StatusCode, Json<BoardView>)> {
    let name = state
        .boards
        .update(|doc| doc.create_board(&input.name))
        .await?;

    tracing::info!(board = %name, "Board created");
    Ok((
        StatusCode::CREATED,
        Json(BoardView {
            name,
            board: Board::default(),
        }),
    ))
}

/// GET /boards/{board}
pub async fn get_board(
    State(state): State<AppState>,
    ValidPath(board): ValidPath<String>,
) -> AppResult<Json<BoardView>> {
    let view = state
        .boards
        .read(|doc| {
            doc.board(&board).map(|b| BoardView {
                name: board.clone(),
                board: b.clone(),
            })
        })
        .await?;
    Ok(Json(view))
}

/// DELETE /boards/{board}
pub async fn delete_board(
    State(state): State<AppState>,
    ValidPath(board): ValidPath<String>,
) -> AppResult<StatusCode> {
    let removed = state.boards.update(|doc| doc.delete_board(&board)).await?;

    tracing::info!(
        board = %board,
        lists = removed.lists.len(),
        "Board deleted"
    );
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// POST /boards/{board}/lists
pub async fn add_list(
    State(state): State<AppState>,
    ValidPath(board): ValidPath<String>,
    ValidJson(input): ValidJson<CreateList>,
) -> AppResult<(StatusCode, Json<ListView>)> {
    let name = state
        .boards
        .update(|doc| doc.add_list(&board, &input.name))
        .await?;

    tracing::info!(board = %board, list = %name, "List added");
    Ok((StatusCode::CREATED, Json(ListView { board, name })))
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

/// POST /boards/{board}/lists/{list}/cards
///
/// Creates the list when it does not exist yet.
pub async fn add_card(
    State(state): State<AppState>,
    ValidPath((board, list)): ValidPath<(String, String)>,
    ValidJson(input): ValidJson<CreateCard>,
) -> AppResult<(StatusCode, Json<Card>)> {
    let card = state
        .boards
        .update(|doc| {
            let card = doc.add_card(&board, &list, &input.title)?;
            let details = CardPatch {
                description: input.description,
                due_date: input.due_date.map(Some),
                labels: input.labels,
                ..CardPatch::default()
            };
            doc.update_card(&board, card.id, details)
        })
        .await?;

    tracing::info!(board = %board, list = %list, card_id = %card.id, "Card added");
    Ok((StatusCode::CREATED, Json(card)))
}

/// PATCH /boards/{board}/cards/{card_id}
pub async fn update_card(
    State(state): State<AppState>,
    ValidPath((board, card_id)): ValidPath<(String, Uuid)>,
    ValidJson(patch): ValidJson<CardPatch>,
) -> AppResult<Json<Card>> {
    let card = state
        .boards
        .update(|doc| doc.update_card(&board, card_id, patch))
        .await?;
    Ok(Json(card))
}

/// DELETE /boards/{board}/cards/{card_id}
pub async fn delete_card(
    State(state): State<AppState>,
    ValidPath((board, card_id)): ValidPath<(String, Uuid)>,
) -> AppResult<StatusCode> {
    state
        .boards
        .update(|doc| doc.delete_card(&board, card_id))
        .await?;

    tracing::info!(board = %board, card_id = %card_id, "Card deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /boards/{board}/cards/{card_id}/move
///
/// The destination list must exist; moving to the current list is a no-op.
pub async fn move_card(
    State(state): State<AppState>,
    ValidPath((board, card_id)): ValidPath<(String, Uuid)>,
    ValidJson(input): ValidJson<MoveCard>,
) -> AppResult<Json<Card>> {
    let card = state
        .boards
        .update(|doc| doc.move_card(&board, card_id, &input.to_list))
        .await?;

    tracing::info!(board = %board, card_id = %card_id, to_list = %input.to_list, "Card moved");
    Ok(Json(card))
}
