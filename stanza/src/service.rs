//! Additional services and their attachment to reservations.
//!
//! Attachments are append-only records linking a reservation to an
//! additional service. The (reservation, service) pair is unique across
//! all attachments; no detach operation exists.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::reservation::ReservationId;

/// A unique identifier for an additional service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(Uuid);

impl ServiceId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ServiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ServiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A unique identifier for a service attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for AttachmentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// An additional-service catalog record.
///
/// # Examples
///
/// ```
/// use stanza::{AdditionalService, ServiceId};
///
/// let service = AdditionalService::new(ServiceId::new(), "breakfast", "Buffet breakfast", 18.0)
///     .unwrap();
/// assert_eq!(service.name(), "breakfast");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalService {
    id: ServiceId,
    name: String,
    description: String,
    rate: f64,
}

impl AdditionalService {
    /// Maximum length of a service name.
    pub const MAX_NAME_LEN: usize = 250;

    /// Creates a new service record.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty after trimming whitespace or
    /// exceeds [`Self::MAX_NAME_LEN`] characters.
    pub fn new(
        id: ServiceId,
        name: impl Into<String>,
        description: impl Into<String>,
        rate: f64,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError {
                field: "name".into(),
                message: "service name must be non-empty after trimming whitespace".into(),
            });
        }
        if name.chars().count() > Self::MAX_NAME_LEN {
            return Err(ValidationError {
                field: "name".into(),
                message: format!("service name must be at most {} characters", Self::MAX_NAME_LEN),
            });
        }

        Ok(Self {
            id,
            name,
            description: description.into(),
            rate,
        })
    }

    /// Returns the service identifier.
    #[must_use]
    pub const fn id(&self) -> ServiceId {
        self.id
    }

    /// Returns the service name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the service description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the service rate.
    #[must_use]
    pub const fn rate(&self) -> f64 {
        self.rate
    }
}

/// A record linking a reservation to an additional service.
///
/// # Examples
///
/// ```
/// use stanza::{AttachmentId, ReservationId, ServiceAttachment, ServiceId};
///
/// let attachment = ServiceAttachment::new(AttachmentId::new(), ReservationId::new(), ServiceId::new());
/// assert_eq!(attachment.id(), attachment.id());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAttachment {
    id: AttachmentId,
    reservation: ReservationId,
    service: ServiceId,
}

impl ServiceAttachment {
    /// Creates a new attachment record.
    #[must_use]
    pub const fn new(id: AttachmentId, reservation: ReservationId, service: ServiceId) -> Self {
        Self {
            id,
            reservation,
            service,
        }
    }

    /// Returns the attachment identifier.
    #[must_use]
    pub const fn id(&self) -> AttachmentId {
        self.id
    }

    /// Returns the reservation reference.
    #[must_use]
    pub const fn reservation(&self) -> ReservationId {
        self.reservation
    }

    /// Returns the service reference.
    #[must_use]
    pub const fn service(&self) -> ServiceId {
        self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_construction() {
        let id = ServiceId::new();
        let service = AdditionalService::new(id, "spa", "Day spa access", 45.0).unwrap();
        assert_eq!(service.id(), id);
        assert_eq!(service.name(), "spa");
        assert_eq!(service.description(), "Day spa access");
        assert!((service.rate() - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_service_name_trimming() {
        let service = AdditionalService::new(ServiceId::new(), "  spa  ", "", 0.0).unwrap();
        assert_eq!(service.name(), "spa");
    }

    #[test]
    fn test_service_empty_name_rejected() {
        let result = AdditionalService::new(ServiceId::new(), "   ", "", 0.0);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "name");
    }

    #[test]
    fn test_service_overlong_name_rejected() {
        let long = "x".repeat(AdditionalService::MAX_NAME_LEN + 1);
        let result = AdditionalService::new(ServiceId::new(), long, "", 0.0);
        assert!(result.is_err());
    }

    #[test]
    fn test_attachment_accessors() {
        let id = AttachmentId::new();
        let reservation = ReservationId::new();
        let service = ServiceId::new();
        let attachment = ServiceAttachment::new(id, reservation, service);

        assert_eq!(attachment.id(), id);
        assert_eq!(attachment.reservation(), reservation);
        assert_eq!(attachment.service(), service);
    }

    #[test]
    fn test_attachment_serde() {
        let attachment =
            ServiceAttachment::new(AttachmentId::new(), ReservationId::new(), ServiceId::new());
        let json = serde_json::to_string(&attachment).unwrap();
        let deserialized: ServiceAttachment = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, attachment);
    }
}
