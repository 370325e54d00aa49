//! Repository for the `tickets` table.

use chrono::Utc;
use sqlx::SqlitePool;
use scrumboard_core::ticket::{next_update_timestamp, DEFAULT_STATUS};
use scrumboard_core::types::DbId;

use crate::models::ticket::{CreateTicket, Ticket, UpdateTicket};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, status, created_at, updated_at";

/// Provides CRUD operations for tickets.
pub struct TicketRepo;

impl TicketRepo {
    /// Insert a new ticket, returning the created row.
    ///
    /// Both timestamps are set to the same instant. If `status` is `None`
    /// in the input, defaults to `"To Do"`.
    pub async fn create(pool: &SqlitePool, input: &CreateTicket) -> Result<Ticket, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO tickets (title, description, status, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Ticket>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status.as_deref().unwrap_or(DEFAULT_STATUS))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// Find a ticket by its ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets WHERE id = ?1");
        sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tickets in creation order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Ticket>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tickets ORDER BY id ASC");
        sqlx::query_as::<_, Ticket>(&query).fetch_all(pool).await
    }

    /// Update a ticket. Only non-`None` fields in `input` are applied, and
    /// `updated_at` always moves strictly forward.
    ///
    /// Read and write happen in one `IMMEDIATE` transaction, so the write
    /// lock is held before the current row is read and concurrent updates
    /// queue on the busy timeout instead of failing. Returns `None` if no
    /// row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateTicket,
    ) -> Result<Option<Ticket>, sqlx::Error> {
        let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

        let select = format!("SELECT {COLUMNS} FROM tickets WHERE id = ?1");
        let Some(current) = sqlx::query_as::<_, Ticket>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let updated_at = next_update_timestamp(current.updated_at, Utc::now());
        let query = format!(
            "UPDATE tickets SET
                title = COALESCE(?2, title),
                description = COALESCE(?3, description),
                status = COALESCE(?4, status),
                updated_at = ?5
             WHERE id = ?1
             RETURNING {COLUMNS}"
        );
        let ticket = sqlx::query_as::<_, Ticket>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.status)
            .bind(updated_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(ticket))
    }

    /// Permanently delete a ticket by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
