//! Inputs to the AI assistant operations and their boundary validation.
//!
//! The assistant never decides anything locally: these types only carry
//! what the prompts render, and the validators run in the HTTP layer
//! before any provider call is made.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Days without movement from which a ticket counts as blocked.
pub const BLOCKED_IDLE_DAYS: u32 = 3;

/// Label that marks a ticket as blocked regardless of activity.
pub const BLOCKED_LABEL: &str = "bloqueado";

/// Categories a recommended task may be filed under.
pub const TASK_CATEGORIES: &[&str] = &["frontend", "backend", "testing", "documentación"];

/// Number of tasks the recommendation prompt asks for.
pub const RECOMMENDED_TASK_COUNT: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One active ticket as submitted for blocker detection.
///
/// Field names on the wire follow the dashboard's payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketActivity {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "estado")]
    pub status: String,
    #[serde(rename = "dias_sin_movimiento")]
    pub days_idle: u32,
    #[serde(rename = "etiquetas", default)]
    pub labels: Vec<String>,
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate text submitted for summarisation. Returns the trimmed text.
pub fn validate_summary_text(text: &str) -> Result<&str, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err("El campo 'texto' no puede estar vacío.".to_string());
    }
    Ok(trimmed)
}

/// Validate a sprint objective. Returns the trimmed objective.
pub fn validate_objective(objective: &str) -> Result<&str, String> {
    let trimmed = objective.trim();
    if trimmed.is_empty() {
        return Err("El campo 'objetivo' no puede estar vacío.".to_string());
    }
    Ok(trimmed)
}
