//! Storage traits and backends.
//!
//! The engine talks to its collaborators through narrow repository
//! traits so that a real storage engine can be substituted without
//! touching lifecycle logic. Two backends are provided:
//!
//! - [`MemoryStore`]: in-process shared state, used by tests and
//!   embedders.
//! - [`SqliteStore`](crate::database::SqliteStore): persistent storage
//!   used by the CLI.
//!
//! Every trait is `Send + Sync`; operations on different records must
//! not block each other, while mutations of the same record are
//! serialized by the backend (see [`ReservationStore::update`]).

mod memory;

pub use memory::MemoryStore;

use crate::error::Result;
use crate::reservation::{Reservation, ReservationId};
use crate::room::{Room, RoomId};
use crate::service::{AdditionalService, AttachmentId, ServiceAttachment, ServiceId};

/// Room record storage.
///
/// The availability flag stored here is the single source of truth for
/// "currently bookable"; only the
/// [`AvailabilityGuard`](crate::guard::AvailabilityGuard) writes it.
#[cfg_attr(test, mockall::automock)]
pub trait RoomCatalog: Send + Sync {
    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; a missing room is `Ok(None)`.
    fn get(&self, id: RoomId) -> Result<Option<Room>>;

    /// Inserts a room record, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the room number is already taken by
    /// a different room.
    fn insert(&self, room: Room) -> Result<()>;

    /// Sets the availability flag of a room.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the room does not exist.
    fn set_availability(&self, id: RoomId, available: bool) -> Result<()>;

    /// Lists all rooms, ordered by room number.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_all(&self) -> Result<Vec<Room>>;
}

/// Reservation record storage.
pub trait ReservationStore: Send + Sync {
    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; a missing reservation is
    /// `Ok(None)`.
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Inserts a reservation record, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn insert(&self, reservation: Reservation) -> Result<()>;

    /// Applies a mutation to the reservation with the given id.
    ///
    /// The backend serializes mutations per record: concurrent updates of
    /// the same id never interleave, while updates of different ids do
    /// not block each other. If the closure fails, nothing is persisted.
    /// On success the updated record is returned.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error if the reservation does not exist, or
    /// the closure's error unchanged.
    fn update(
        &self,
        id: ReservationId,
        f: &mut dyn FnMut(&mut Reservation) -> Result<()>,
    ) -> Result<Reservation>;

    /// Lists all reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_all(&self) -> Result<Vec<Reservation>>;
}

/// Service attachment storage. Append-only.
pub trait AttachmentStore: Send + Sync {
    /// Inserts an attachment record.
    ///
    /// # Errors
    ///
    /// Returns a `DuplicateAttachment` error if the
    /// (reservation, service) pair already exists.
    fn insert(&self, attachment: ServiceAttachment) -> Result<()>;

    /// Looks up an attachment by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails; a missing attachment is
    /// `Ok(None)`.
    fn get(&self, id: AttachmentId) -> Result<Option<ServiceAttachment>>;

    /// Lists all attachments.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_all(&self) -> Result<Vec<ServiceAttachment>>;

    /// Lists the attachments of one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_for(&self, reservation: ReservationId) -> Result<Vec<ServiceAttachment>>;
}

/// Additional-service catalog storage.
pub trait ServiceCatalog: Send + Sync {
    /// Returns whether a service with the given id exists.
    ///
    /// Attachment does not enforce this check; callers who want it can
    /// ask first.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn exists(&self, id: ServiceId) -> Result<bool>;

    /// Inserts a service record, replacing any record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn insert(&self, service: AdditionalService) -> Result<()>;

    /// Lists all services, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    fn list_all(&self) -> Result<Vec<AdditionalService>>;
}
