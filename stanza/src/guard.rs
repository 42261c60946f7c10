//! Room availability claims.
//!
//! The guard serializes the "is this room free" question and the flag
//! mutation so two concurrent booking attempts can never both succeed for
//! the same room. A single guard-level mutex covers the read-then-write;
//! that global scope is deliberate at this scale.

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::room::RoomId;
use crate::store::RoomCatalog;

/// Enforces that a room has at most one active reservation at a time.
///
/// The guard is the only component that writes the room availability
/// flag. Claims happen on reservation creation, releases only on
/// cancellation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use stanza::guard::AvailabilityGuard;
/// use stanza::store::{MemoryStore, RoomCatalog};
/// use stanza::{Room, RoomId};
///
/// let store = Arc::new(MemoryStore::new());
/// let id = RoomId::new();
/// store.insert(Room::builder(id, "101").build().unwrap()).unwrap();
///
/// let guard = AvailabilityGuard::new(store);
/// guard.try_claim(id).unwrap();
/// assert!(guard.try_claim(id).is_err());
/// guard.release(id).unwrap();
/// guard.try_claim(id).unwrap();
/// ```
pub struct AvailabilityGuard {
    rooms: Arc<dyn RoomCatalog>,
    claim_lock: Mutex<()>,
}

impl AvailabilityGuard {
    /// Creates a guard over the given room catalog.
    #[must_use]
    pub fn new(rooms: Arc<dyn RoomCatalog>) -> Self {
        Self {
            rooms,
            claim_lock: Mutex::new(()),
        }
    }

    /// Atomically claims a room if it is available.
    ///
    /// The read of the availability flag and the write that clears it
    /// happen under one lock, so concurrent claims of the same room
    /// cannot both observe it as free.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the room does not exist
    /// - [`Error::RoomUnavailable`] if the flag is already cleared; no
    ///   mutation is performed
    pub fn try_claim(&self, room: RoomId) -> Result<()> {
        let _serialized = self
            .claim_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let current = self
            .rooms
            .get(room)?
            .ok_or_else(|| Error::not_found(format!("room {room}")))?;
        if !current.available() {
            return Err(Error::RoomUnavailable { room });
        }

        self.rooms.set_availability(room, false)?;
        log::debug!("claimed room {room}");
        Ok(())
    }

    /// Unconditionally marks a room available again.
    ///
    /// Called on cancellation. A missing room is treated as silent
    /// success since the room's existence is owned elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error only if the backend fails.
    pub fn release(&self, room: RoomId) -> Result<()> {
        let _serialized = self
            .claim_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match self.rooms.set_availability(room, true) {
            Err(err) if err.is_not_found() => Ok(()),
            other => {
                if other.is_ok() {
                    log::debug!("released room {room}");
                }
                other
            }
        }
    }
}
