//! Handlers for the `/tickets` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use scrumboard_core::error::CoreError;
use scrumboard_core::ticket::{validate_status, validate_title};
use scrumboard_core::types::DbId;
use scrumboard_db::models::ticket::{CreateTicket, Ticket, UpdateTicket};
use scrumboard_db::repositories::TicketRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath};
use crate::state::AppState;

/// POST /tickets
pub async fn create(
    State(state): State<AppState>,
    ValidJson(mut input): ValidJson<CreateTicket>,
) -> AppResult<(StatusCode, Json<Ticket>)> {
    validate_title(&input.title).map_err(CoreError::Validation)?;
    input.title = input.title.trim().to_string();
    if let Some(status) = &input.status {
        validate_status(status).map_err(CoreError::Validation)?;
    }

    let ticket = TicketRepo::create(&state.pool, &input).await?;
    tracing::info!(ticket_id = ticket.id, status = %ticket.status, "Ticket created");
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /tickets
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = TicketRepo::list(&state.pool).await?;
    Ok(Json(tickets))
}

/// GET /tickets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<Json<Ticket>> {
    let ticket = TicketRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Ticket", id)))?;
    Ok(Json(ticket))
}

/// PATCH /tickets/{id}
///
/// Applies only the supplied fields; `fecha_actualizacion` is refreshed
/// even when the body is empty.
pub async fn update(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
    ValidJson(mut input): ValidJson<UpdateTicket>,
) -> AppResult<Json<Ticket>> {
    if let Some(title) = &input.title {
        validate_title(title).map_err(CoreError::Validation)?;
        input.title = Some(title.trim().to_string());
    }
    if let Some(status) = &input.status {
        validate_status(status).map_err(CoreError::Validation)?;
    }

    let ticket = TicketRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Ticket", id)))?;
    tracing::info!(ticket_id = id, touched_fields = !input.is_empty(), "Ticket updated");
    Ok(Json(ticket))
}

/// DELETE /tickets/{id}
pub async fn delete(
    State(state): State<AppState>,
    ValidPath(id): ValidPath<DbId>,
) -> AppResult<StatusCode> {
    let deleted = TicketRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(ticket_id = id, "Ticket deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::not_found("Ticket", id)))
    }
}
