//! Reservation records and identifiers.
//!
//! A reservation tracks a guest's claim on a room for a stay, together
//! with three independent lifecycle flags (checked in, checked out,
//! cancelled). The flags are only ever mutated by the transition functions
//! in [`lifecycle`](crate::lifecycle); the record itself has no
//! self-mutating behavior beyond field storage.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::room::RoomId;

/// A unique identifier for a reservation.
///
/// # Examples
///
/// ```
/// use stanza::ReservationId;
///
/// let id = ReservationId::new();
/// let parsed: ReservationId = id.to_string().parse().unwrap();
/// assert_eq!(id, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationId(Uuid);

impl ReservationId {
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

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ReservationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A unique identifier for a guest.
///
/// Guest records themselves live outside this engine; reservations only
/// carry the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(Uuid);

impl GuestId {
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

impl Default for GuestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for GuestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A stay date range: check-in date and check-out date.
///
/// [`Stay::new`] enforces that check-out is strictly after check-in.
/// [`Stay::new_unchecked`] bypasses the check for the detail-update path,
/// which deliberately performs no re-validation.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use stanza::Stay;
///
/// let check_in = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
/// let check_out = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
/// let stay = Stay::new(check_in, check_out).unwrap();
/// assert_eq!(stay.nights(), 2);
///
/// // Inverted range is rejected
/// assert!(Stay::new(check_out, check_in).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl Stay {
    /// Creates a validated stay.
    ///
    /// # Errors
    ///
    /// Returns an error if `check_out` is not strictly after `check_in`.
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, ValidationError> {
        if check_out <= check_in {
            return Err(ValidationError {
                field: "stay".into(),
                message: format!(
                    "check-out date {check_out} must be strictly after check-in date {check_in}"
                ),
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    /// Creates a stay without validating date order.
    ///
    /// Detail updates write dates exactly as given, so this constructor
    /// exists for that path and for reloading persisted rows.
    #[must_use]
    pub const fn new_unchecked(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Returns the check-in date.
    #[must_use]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    /// Returns the check-out date.
    #[must_use]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Returns the number of nights between the two dates.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }
}

impl std::fmt::Display for Stay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.check_in, self.check_out)
    }
}

/// A room reservation with its lifecycle flags.
///
/// A reservation is **active** iff it is neither cancelled nor checked
/// out. Cancellation is a state, not removal: lifecycle operations never
/// delete the record.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use stanza::{GuestId, Reservation, ReservationId, RoomId, Stay};
///
/// let stay = Stay::new(
///     NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
/// )
/// .unwrap();
///
/// let reservation = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay)
///     .occupants(2)
///     .build()
///     .unwrap();
///
/// assert!(reservation.is_active());
/// assert!(!reservation.checked_in());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    room: RoomId,
    guest: GuestId,
    occupants: u32,
    stay: Stay,
    pub(crate) checked_in: bool,
    pub(crate) checked_out: bool,
    pub(crate) cancelled: bool,
}

impl Reservation {
    /// Creates a new reservation builder.
    ///
    /// All three lifecycle flags start `false` and the occupant count
    /// defaults to 1.
    #[must_use]
    pub const fn builder(
        id: ReservationId,
        room: RoomId,
        guest: GuestId,
        stay: Stay,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            room,
            guest,
            occupants: 1,
            stay,
            checked_in: false,
            checked_out: false,
            cancelled: false,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the reserved room.
    #[must_use]
    pub const fn room(&self) -> RoomId {
        self.room
    }

    /// Returns the booking guest.
    #[must_use]
    pub const fn guest(&self) -> GuestId {
        self.guest
    }

    /// Returns the occupant count.
    #[must_use]
    pub const fn occupants(&self) -> u32 {
        self.occupants
    }

    /// Returns the stay date range.
    #[must_use]
    pub const fn stay(&self) -> Stay {
        self.stay
    }

    /// Returns whether check-in has been performed.
    #[must_use]
    pub const fn checked_in(&self) -> bool {
        self.checked_in
    }

    /// Returns whether check-out has been performed.
    #[must_use]
    pub const fn checked_out(&self) -> bool {
        self.checked_out
    }

    /// Returns whether the reservation has been cancelled.
    #[must_use]
    pub const fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Returns whether the reservation currently claims its room.
    ///
    /// A reservation is active iff it is neither cancelled nor checked
    /// out.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !self.cancelled && !self.checked_out
    }

    /// Overwrites occupant count and stay dates in place.
    ///
    /// Used by the detail-update transition; performs no validation by
    /// design (see the lifecycle documentation).
    pub(crate) fn set_details(&mut self, occupants: u32, stay: Stay) {
        self.occupants = occupants;
        self.stay = stay;
    }
}

/// Builder for creating [`Reservation`] instances.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    room: RoomId,
    guest: GuestId,
    occupants: u32,
    stay: Stay,
    checked_in: bool,
    checked_out: bool,
    cancelled: bool,
}

impl ReservationBuilder {
    /// Sets the occupant count.
    #[must_use]
    pub const fn occupants(mut self, occupants: u32) -> Self {
        self.occupants = occupants;
        self
    }

    /// Sets the checked-in flag.
    ///
    /// Used by storage backends when reloading persisted reservations.
    #[must_use]
    pub const fn checked_in(mut self, checked_in: bool) -> Self {
        self.checked_in = checked_in;
        self
    }

    /// Sets the checked-out flag.
    ///
    /// Used by storage backends when reloading persisted reservations.
    #[must_use]
    pub const fn checked_out(mut self, checked_out: bool) -> Self {
        self.checked_out = checked_out;
        self
    }

    /// Sets the cancelled flag.
    ///
    /// Used by storage backends when reloading persisted reservations.
    #[must_use]
    pub const fn cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the occupant count is zero.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.occupants == 0 {
            return Err(ValidationError {
                field: "occupants".into(),
                message: "occupant count must be at least 1".into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            room: self.room,
            guest: self.guest,
            occupants: self.occupants,
            stay: self.stay,
            checked_in: self.checked_in,
            checked_out: self.checked_out,
            cancelled: self.cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stay() -> Stay {
        Stay::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_stay_validation() {
        let check_in = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();

        let valid = Stay::new(check_in, check_out).unwrap();
        assert_eq!(valid.check_in(), check_in);
        assert_eq!(valid.check_out(), check_out);
        assert_eq!(valid.nights(), 2);

        // Inverted and zero-length ranges are rejected
        assert!(Stay::new(check_out, check_in).is_err());
        assert!(Stay::new(check_in, check_in).is_err());
    }

    #[test]
    fn test_stay_new_unchecked_allows_inverted_range() {
        let check_in = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
        let check_out = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let stay = Stay::new_unchecked(check_in, check_out);
        assert_eq!(stay.nights(), -2);
    }

    #[test]
    fn test_reservation_builder_defaults() {
        let id = ReservationId::new();
        let room = RoomId::new();
        let guest = GuestId::new();
        let reservation = Reservation::builder(id, room, guest, stay())
            .build()
            .unwrap();

        assert_eq!(reservation.id(), id);
        assert_eq!(reservation.room(), room);
        assert_eq!(reservation.guest(), guest);
        assert_eq!(reservation.occupants(), 1);
        assert!(!reservation.checked_in());
        assert!(!reservation.checked_out());
        assert!(!reservation.cancelled());
        assert!(reservation.is_active());
    }

    #[test]
    fn test_reservation_builder_zero_occupants_rejected() {
        let result = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay())
            .occupants(0)
            .build();

        assert!(result.is_err());
        assert_eq!(result.unwrap_err().field, "occupants");
    }

    #[test]
    fn test_reservation_builder_flags_for_reload() {
        let reservation = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay())
            .occupants(2)
            .checked_in(true)
            .checked_out(true)
            .build()
            .unwrap();

        assert!(reservation.checked_in());
        assert!(reservation.checked_out());
        assert!(!reservation.is_active());
    }

    #[test]
    fn test_is_active_flag_combinations() {
        let base = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay());
        let fresh = base.build().unwrap();
        assert!(fresh.is_active());

        let cancelled = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay())
            .cancelled(true)
            .build()
            .unwrap();
        assert!(!cancelled.is_active());

        // Checked in but not out: still active
        let checked_in = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay())
            .checked_in(true)
            .build()
            .unwrap();
        assert!(checked_in.is_active());
    }

    #[test]
    fn test_reservation_serde() {
        let reservation = Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay())
            .occupants(3)
            .build()
            .unwrap();

        let json = serde_json::to_string(&reservation).unwrap();
        let deserialized: Reservation = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, reservation);
    }

    #[test]
    fn test_id_parse_roundtrip() {
        let id = ReservationId::new();
        let parsed: ReservationId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);

        let guest = GuestId::new();
        let parsed: GuestId = guest.to_string().parse().unwrap();
        assert_eq!(guest, parsed);
    }
}
