//! Error type for configuration, lookup and adapter failures.
//!
//! Allocation shortfall is not an error: a worker that cannot be placed is
//! reported as [`WorkerOutcome::Unassigned`](crate::engine::WorkerOutcome).
//! Everything here aborts the run.

use crate::config::{ShiftNumber, ZoneId};
use crate::validation::ValidationError;

/// Result alias used across the crate.
pub type StaffResult<T> = Result<T, StaffError>;

/// Error type for staffing operations.
#[derive(Debug)]
pub enum StaffError {
    /// A shift label that is not in the shift table.
    UnknownShiftLabel(String),
    /// A shift number past the end of the shift table.
    ShiftOutOfRange {
        shift: ShiftNumber,
        shift_count: usize,
    },
    /// A zone id past the end of the distance matrix.
    ZoneOutOfRange { zone: ZoneId, zone_count: usize },
    /// A travel flexibility string outside the fixed vocabulary.
    UnknownTravelFlexibility(String),
    /// A municipality name with no municipality row.
    UnknownMunicipality(String),
    /// Two sites share an identifier.
    DuplicateSite(String),
    /// Negative, NaN or infinite shift weight.
    InvalidShiftWeight { shift: ShiftNumber, weight: f64 },
    /// Malformed distance matrix or threshold.
    InvalidZoneMatrix(String),
    /// Reservation attempted on a shift with no available slots.
    SlotsExhausted {
        site_id: String,
        shift: ShiftNumber,
    },
    /// A table cell that could not be read as the expected type.
    InvalidCell {
        table: &'static str,
        row: usize,
        column: usize,
        message: String,
    },
    /// Input integrity check failed.
    Validation(Vec<ValidationError>),
    /// Snapshot document could not be parsed or rows could not be written.
    Json(serde_json::Error),
    /// I/O error.
    Io(std::io::Error),
}

impl std::fmt::Display for StaffError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffError::UnknownShiftLabel(label) => write!(f, "Unknown shift label: '{}'", label),
            StaffError::ShiftOutOfRange { shift, shift_count } => write!(
                f,
                "Shift {} out of range ({} shifts configured)",
                shift, shift_count
            ),
            StaffError::ZoneOutOfRange { zone, zone_count } => write!(
                f,
                "Zone {} out of range ({} zones configured)",
                zone, zone_count
            ),
            StaffError::UnknownTravelFlexibility(s) => {
                write!(f, "Unknown travel flexibility: '{}'", s)
            }
            StaffError::UnknownMunicipality(name) => write!(f, "Unknown municipality: '{}'", name),
            StaffError::DuplicateSite(id) => write!(f, "Duplicate site identifier: '{}'", id),
            StaffError::InvalidShiftWeight { shift, weight } => {
                write!(f, "Invalid weight {} for shift {}", weight, shift)
            }
            StaffError::InvalidZoneMatrix(msg) => write!(f, "Invalid zone matrix: {}", msg),
            StaffError::SlotsExhausted { site_id, shift } => write!(
                f,
                "No available slots on shift {} at site '{}'",
                shift, site_id
            ),
            StaffError::InvalidCell {
                table,
                row,
                column,
                message,
            } => write!(
                f,
                "Invalid cell in {} (row {}, column {}): {}",
                table, row, column, message
            ),
            StaffError::Validation(errors) => {
                write!(f, "Input validation failed with {} error(s)", errors.len())?;
                for e in errors {
                    write!(f, "\n  - {}", e.message)?;
                }
                Ok(())
            }
            StaffError::Json(e) => write!(f, "JSON error: {}", e),
            StaffError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for StaffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StaffError::Json(e) => Some(e),
            StaffError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StaffError {
    fn from(e: std::io::Error) -> Self {
        StaffError::Io(e)
    }
}

impl From<serde_json::Error> for StaffError {
    fn from(e: serde_json::Error) -> Self {
        StaffError::Json(e)
    }
}

impl From<Vec<ValidationError>> for StaffError {
    fn from(errors: Vec<ValidationError>) -> Self {
        StaffError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_messages() {
        let e = StaffError::ZoneOutOfRange {
            zone: 7,
            zone_count: 3,
        };
        assert_eq!(e.to_string(), "Zone 7 out of range (3 zones configured)");

        let e = StaffError::UnknownShiftLabel("Midnight".into());
        assert!(e.to_string().contains("Midnight"));
    }

    #[test]
    fn test_validation_display_lists_errors() {
        let e = StaffError::from(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate site ID: P1"),
            ValidationError::new(ValidationErrorKind::UnknownMunicipality, "Unknown: X"),
        ]);
        let text = e.to_string();
        assert!(text.contains("2 error(s)"));
        assert!(text.contains("Duplicate site ID: P1"));
        assert!(text.contains("Unknown: X"));
    }

    #[test]
    fn test_io_source() {
        use std::error::Error;
        let e = StaffError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(e.source().is_some());
        assert!(StaffError::DuplicateSite("P9".into()).source().is_none());
    }
}
