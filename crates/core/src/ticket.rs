//! Ticket status constants, validation and timestamp rules.
//!
//! The status set is open-ended: any non-empty label is stored. New
//! tickets start in the board's first column.

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a ticket title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Status assigned when a create request omits `estado`.
pub const DEFAULT_STATUS: &str = "To Do";

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate a ticket title: non-empty after trimming and within the length limit.
pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("El campo 'titulo' no puede estar vacío.".to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "El campo 'titulo' supera el máximo de {MAX_TITLE_LENGTH} caracteres."
        ));
    }
    Ok(())
}

/// Validate a ticket status. Any non-blank label is accepted.
pub fn validate_status(status: &str) -> Result<(), String> {
    if status.trim().is_empty() {
        return Err("El campo 'estado' no puede estar vacío.".to_string());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Compute the next `updated_at` value for a mutation.
///
/// Uses `now` unless the clock has not advanced past `previous` (coarse
/// clocks, back-to-back updates), in which case it bumps `previous` by one
/// microsecond. The result is always strictly greater than `previous`.
pub fn next_update_timestamp(previous: Timestamp, now: Timestamp) -> Timestamp {
    if now > previous {
        now
    } else {
        previous + chrono::Duration::microseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn title_must_not_be_blank() {
        assert!(validate_title("Configurar CI").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
    }

    #[test]
    fn title_length_is_bounded() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(validate_title(&long).is_err());
        assert!(validate_title(&"x".repeat(MAX_TITLE_LENGTH)).is_ok());
    }

    #[test]
    fn any_non_blank_status_is_accepted() {
        assert!(validate_status("Blocked").is_ok());
        assert!(validate_status("Done").is_ok());
        assert!(validate_status(" ").is_err());
    }

    #[test]
    fn update_timestamp_uses_clock_when_it_advanced() {
        let prev = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 5).unwrap();
        assert_eq!(next_update_timestamp(prev, now), now);
    }

    #[test]
    fn update_timestamp_strictly_increases_on_stalled_clock() {
        let prev = Utc.with_ymd_and_hms(2025, 1, 1, 10, 0, 0).unwrap();
        let next = next_update_timestamp(prev, prev);
        assert!(next > prev);

        let earlier = prev - chrono::Duration::seconds(3);
        assert!(next_update_timestamp(prev, earlier) > prev);
    }
}
