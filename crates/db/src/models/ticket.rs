//! Ticket entity model and DTOs.
//!
//! Wire names follow the dashboard's Spanish payloads (`titulo`,
//! `descripcion`, `estado`, ...); columns and Rust fields stay English.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use scrumboard_core::types::{DbId, Timestamp};

/// A ticket row from the `tickets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ticket {
    pub id: DbId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "fecha_creacion")]
    pub created_at: Timestamp,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: Timestamp,
}

/// DTO for creating a new ticket.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTicket {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// Defaults to `"To Do"` if omitted.
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

/// DTO for a partial ticket update. Absent (or `null`) fields are left
/// untouched; `updated_at` is refreshed regardless.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTicket {
    #[serde(rename = "titulo", default)]
    pub title: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
}

impl UpdateTicket {
    /// True when the change-set touches no field.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
