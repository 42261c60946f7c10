//! Error types for the stanza library.
//!
//! This module provides the error taxonomy for all reservation operations,
//! using `thiserror` for ergonomic error handling. Every failure is returned
//! synchronously to the caller; no error is retried internally and a failed
//! call leaves all state unchanged.

use thiserror::Error;

use crate::reservation::ReservationId;
use crate::room::RoomId;
use crate::service::ServiceId;

/// Result type alias for operations that may fail with a stanza error.
///
/// # Examples
///
/// ```
/// use stanza::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the stanza library.
///
/// This enum encompasses all possible error conditions that can occur
/// during reservation lifecycle and availability operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced reservation, room, or service record does not exist.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// The room is already claimed by an active reservation.
    #[error("room {room} is unavailable")]
    RoomUnavailable {
        /// The room whose claim failed.
        room: RoomId,
    },

    /// Check-in was already performed on the reservation.
    #[error("reservation {reservation} is already checked in")]
    AlreadyCheckedIn {
        /// The reservation that was already checked in.
        reservation: ReservationId,
    },

    /// Check-out was attempted before check-in.
    #[error("reservation {reservation} must be checked in before check-out")]
    CheckInRequired {
        /// The reservation that has not been checked in.
        reservation: ReservationId,
    },

    /// The (reservation, service) pair is already attached.
    #[error("service {service} is already attached to reservation {reservation}")]
    DuplicateAttachment {
        /// The reservation the attachment targets.
        reservation: ReservationId,
        /// The service that is already attached.
        service: ServiceId,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds a `NotFound` error for the given resource description.
    ///
    /// # Examples
    ///
    /// ```
    /// use stanza::Error;
    ///
    /// let err = Error::not_found("room 42");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Check if the error indicates a missing record.
    ///
    /// # Examples
    ///
    /// ```
    /// use stanza::Error;
    ///
    /// let err = Error::not_found("reservation abc");
    /// assert!(err.is_not_found());
    /// ```
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if the error is a lifecycle or availability conflict.
    ///
    /// Conflicts are failures where the request was well-formed but the
    /// current state forbids it: an unavailable room, a repeated check-in,
    /// a check-out without check-in, or a duplicate service attachment.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::RoomUnavailable { .. }
                | Self::AlreadyCheckedIn { .. }
                | Self::CheckInRequired { .. }
                | Self::DuplicateAttachment { .. }
        )
    }
}

/// Error type for validation failures on domain types.
///
/// Raised by constructors and builders when a field violates its contract,
/// such as a non-positive occupant count or a stay whose check-out date is
/// not after its check-in date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = Error::not_found("reservation 3fa85f64");
        let display = format!("{err}");
        assert!(display.contains("not found"));
        assert!(display.contains("reservation"));
        assert!(err.is_not_found());
        assert!(!err.is_conflict());
    }

    #[test]
    fn test_room_unavailable_error() {
        let room = RoomId::new();
        let err = Error::RoomUnavailable { room };
        let display = format!("{err}");
        assert!(display.contains("unavailable"));
        assert!(display.contains(&room.to_string()));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_already_checked_in_error() {
        let reservation = ReservationId::new();
        let err = Error::AlreadyCheckedIn { reservation };
        let display = format!("{err}");
        assert!(display.contains("already checked in"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_check_in_required_error() {
        let reservation = ReservationId::new();
        let err = Error::CheckInRequired { reservation };
        let display = format!("{err}");
        assert!(display.contains("before check-out"));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_duplicate_attachment_error() {
        let reservation = ReservationId::new();
        let service = ServiceId::new();
        let err = Error::DuplicateAttachment {
            reservation,
            service,
        };
        let display = format!("{err}");
        assert!(display.contains("already attached"));
        assert!(display.contains(&service.to_string()));
        assert!(err.is_conflict());
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: Error = ValidationError {
            field: "occupants".to_string(),
            message: "must be at least 1".to_string(),
        }
        .into();
        let display = format!("{err}");
        assert!(display.contains("validation error"));
        assert!(display.contains("occupants"));
        assert!(display.contains("at least 1"));
    }

    #[test]
    fn test_unsupported_schema_version_error() {
        let err = Error::UnsupportedSchemaVersion {
            expected: 1,
            found: 2,
        };
        let display = format!("{err}");
        assert!(display.contains("expected 1"));
        assert!(display.contains("found 2"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        let display = format!("{err}");
        assert!(display.contains("I/O error"));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u32> {
            Err(Error::not_found("nothing"))
        }

        assert!(returns_result().is_err());
    }
}
