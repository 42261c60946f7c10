//! Room records and identifiers.
//!
//! A room is collaborator-owned state: the engine reads it through the
//! [`RoomCatalog`](crate::store::RoomCatalog) trait and only the
//! [`AvailabilityGuard`](crate::guard::AvailabilityGuard) writes its
//! availability flag.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// A unique identifier for a room.
///
/// # Examples
///
/// ```
/// use stanza::RoomId;
///
/// let id = RoomId::new();
/// let parsed: RoomId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

impl RoomId {
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

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RoomId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A hotel room record.
///
/// The `available` flag is the single source of truth for "currently
/// bookable": it is `false` exactly when some active reservation claims
/// this room. Capacity and nightly rate are carried as data; the engine
/// does not validate occupant counts against capacity.
///
/// # Examples
///
/// ```
/// use stanza::{Room, RoomId};
///
/// let room = Room::builder(RoomId::new(), "204")
///     .capacity(2)
///     .nightly_rate(120.0)
///     .build()
///     .unwrap();
///
/// assert!(room.available());
/// assert_eq!(room.number(), "204");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    id: RoomId,
    number: String,
    capacity: u32,
    nightly_rate: f64,
    available: bool,
}

impl Room {
    /// Creates a new room builder.
    ///
    /// Rooms start available with a capacity of 1 and a nightly rate of 0.
    #[must_use]
    pub fn builder(id: RoomId, number: impl Into<String>) -> RoomBuilder {
        RoomBuilder {
            id,
            number: number.into(),
            capacity: 1,
            nightly_rate: 0.0,
            available: true,
        }
    }

    /// Returns the room identifier.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the identifying room number.
    #[must_use]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the maximum occupant capacity.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the nightly rate.
    #[must_use]
    pub const fn nightly_rate(&self) -> f64 {
        self.nightly_rate
    }

    /// Returns whether the room is currently bookable.
    #[must_use]
    pub const fn available(&self) -> bool {
        self.available
    }

    /// Sets the availability flag.
    ///
    /// Storage backends use this when applying
    /// [`RoomCatalog::set_availability`](crate::store::RoomCatalog::set_availability).
    /// No other component writes the flag directly; the
    /// [`AvailabilityGuard`](crate::guard::AvailabilityGuard) owns it in
    /// lockstep with reservation state changes.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

/// Builder for creating [`Room`] instances.
#[derive(Debug)]
pub struct RoomBuilder {
    id: RoomId,
    number: String,
    capacity: u32,
    nightly_rate: f64,
    available: bool,
}

impl RoomBuilder {
    /// Sets the maximum occupant capacity.
    #[must_use]
    pub const fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the nightly rate.
    #[must_use]
    pub const fn nightly_rate(mut self, rate: f64) -> Self {
        self.nightly_rate = rate;
        self
    }

    /// Sets the availability flag.
    ///
    /// Used by storage backends when reloading persisted rooms.
    #[must_use]
    pub const fn available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Builds the room.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The room number is empty after trimming whitespace
    /// - The capacity is zero
    pub fn build(self) -> Result<Room, ValidationError> {
        let number = self.number.trim().to_string();
        if number.is_empty() {
            return Err(ValidationError {
                field: "number".into(),
                message: "room number must be non-empty after trimming whitespace".into(),
            });
        }

        if self.capacity == 0 {
            return Err(ValidationError {
                field: "capacity".into(),
                message: "capacity must be at least 1".into(),
            });
        }

        Ok(Room {
            id: self.id,
            number,
            capacity: self.capacity,
            nightly_rate: self.nightly_rate,
            available: self.available,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_builder_defaults() {
        let id = RoomId::new();
        let room = Room::builder(id, "101").build().unwrap();

        assert_eq!(room.id(), id);
        assert_eq!(room.number(), "101");
        assert_eq!(room.capacity(), 1);
        assert!(room.available());
    }

    #[test]
    fn test_room_builder_full() {
        let room = Room::builder(RoomId::new(), "suite-3")
            .capacity(4)
            .nightly_rate(310.5)
            .available(false)
            .build()
            .unwrap();

        assert_eq!(room.capacity(), 4);
        assert!((room.nightly_rate() - 310.5).abs() < f64::EPSILON);
        assert!(!room.available());
    }

    #[test]
    fn test_room_number_trimming() {
        let room = Room::builder(RoomId::new(), "  101  ").build().unwrap();
        assert_eq!(room.number(), "101");
    }

    #[test]
    fn test_room_empty_number_rejected() {
        let result = Room::builder(RoomId::new(), "   ").build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "number");
    }

    #[test]
    fn test_room_zero_capacity_rejected() {
        let result = Room::builder(RoomId::new(), "101").capacity(0).build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "capacity");
    }

    #[test]
    fn test_set_available() {
        let mut room = Room::builder(RoomId::new(), "101").build().unwrap();
        room.set_available(false);
        assert!(!room.available());
        room.set_available(true);
        assert!(room.available());
    }

    #[test]
    fn test_room_id_roundtrip() {
        let id = RoomId::new();
        let parsed: RoomId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert_eq!(RoomId::from_uuid(id.as_uuid()), id);
    }

    #[test]
    fn test_room_serde() {
        let room = Room::builder(RoomId::new(), "101")
            .capacity(2)
            .build()
            .unwrap();
        let json = serde_json::to_string(&room).unwrap();
        let deserialized: Room = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, room);
    }
}
