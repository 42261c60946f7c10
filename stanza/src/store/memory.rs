//! In-memory storage backend.
//!
//! Backs the engine with shared in-process state. Reservation records are
//! stored behind per-record mutexes so that concurrent updates of the
//! same id are serialized without blocking operations on other ids.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};
use crate::room::{Room, RoomId};
use crate::service::{AdditionalService, AttachmentId, ServiceAttachment, ServiceId};

use super::{AttachmentStore, ReservationStore, RoomCatalog, ServiceCatalog};

/// Attachment records plus the uniqueness index over their pairs.
#[derive(Debug, Default)]
struct AttachmentRecords {
    records: Vec<ServiceAttachment>,
    pairs: HashSet<(ReservationId, ServiceId)>,
}

/// An in-memory store implementing every storage trait.
///
/// # Examples
///
/// ```
/// use stanza::store::{MemoryStore, RoomCatalog};
/// use stanza::{Room, RoomId};
///
/// let store = MemoryStore::new();
/// let id = RoomId::new();
/// let room = Room::builder(id, "101").capacity(2).build().unwrap();
/// store.insert(room).unwrap();
/// assert!(store.get(id).unwrap().is_some());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    rooms: RwLock<HashMap<RoomId, Room>>,
    reservations: RwLock<HashMap<ReservationId, Arc<Mutex<Reservation>>>>,
    attachments: RwLock<AttachmentRecords>,
    services: RwLock<HashMap<ServiceId, AdditionalService>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RoomCatalog for MemoryStore {
    fn get(&self, id: RoomId) -> Result<Option<Room>> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        Ok(rooms.get(&id).cloned())
    }

    fn insert(&self, room: Room) -> Result<()> {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let taken = rooms
            .values()
            .any(|existing| existing.id() != room.id() && existing.number() == room.number());
        if taken {
            return Err(Error::Validation {
                field: "number".into(),
                message: format!("room number '{}' is already registered", room.number()),
            });
        }
        rooms.insert(room.id(), room);
        Ok(())
    }

    fn set_availability(&self, id: RoomId, available: bool) -> Result<()> {
        let mut rooms = self.rooms.write().unwrap_or_else(PoisonError::into_inner);
        let room = rooms
            .get_mut(&id)
            .ok_or_else(|| Error::not_found(format!("room {id}")))?;
        room.set_available(available);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Room>> {
        let rooms = self.rooms.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<Room> = rooms.values().cloned().collect();
        all.sort_by(|a, b| a.number().cmp(b.number()));
        Ok(all)
    }
}

impl ReservationStore for MemoryStore {
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let reservations = self
            .reservations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = reservations.get(&id) else {
            return Ok(None);
        };
        let record = entry.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(Some(record.clone()))
    }

    fn insert(&self, reservation: Reservation) -> Result<()> {
        let mut reservations = self
            .reservations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        reservations.insert(reservation.id(), Arc::new(Mutex::new(reservation)));
        Ok(())
    }

    fn update(
        &self,
        id: ReservationId,
        f: &mut dyn FnMut(&mut Reservation) -> Result<()>,
    ) -> Result<Reservation> {
        // Clone the entry handle so the map lock is not held while the
        // record mutation runs.
        let entry = {
            let reservations = self
                .reservations
                .read()
                .unwrap_or_else(PoisonError::into_inner);
            reservations
                .get(&id)
                .cloned()
                .ok_or_else(|| Error::not_found(format!("reservation {id}")))?
        };

        let mut record = entry.lock().unwrap_or_else(PoisonError::into_inner);
        // Mutate a scratch copy so a failed closure persists nothing.
        let mut scratch = record.clone();
        f(&mut scratch)?;
        *record = scratch.clone();
        Ok(scratch)
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        let reservations = self
            .reservations
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(reservations
            .values()
            .map(|entry| entry.lock().unwrap_or_else(PoisonError::into_inner).clone())
            .collect())
    }
}

impl AttachmentStore for MemoryStore {
    fn insert(&self, attachment: ServiceAttachment) -> Result<()> {
        let mut attachments = self
            .attachments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let pair = (attachment.reservation(), attachment.service());
        if !attachments.pairs.insert(pair) {
            return Err(Error::DuplicateAttachment {
                reservation: attachment.reservation(),
                service: attachment.service(),
            });
        }
        attachments.records.push(attachment);
        Ok(())
    }

    fn get(&self, id: AttachmentId) -> Result<Option<ServiceAttachment>> {
        let attachments = self
            .attachments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(attachments
            .records
            .iter()
            .find(|attachment| attachment.id() == id)
            .copied())
    }

    fn list_all(&self) -> Result<Vec<ServiceAttachment>> {
        let attachments = self
            .attachments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(attachments.records.clone())
    }

    fn list_for(&self, reservation: ReservationId) -> Result<Vec<ServiceAttachment>> {
        let attachments = self
            .attachments
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(attachments
            .records
            .iter()
            .filter(|attachment| attachment.reservation() == reservation)
            .copied()
            .collect())
    }
}

impl ServiceCatalog for MemoryStore {
    fn exists(&self, id: ServiceId) -> Result<bool> {
        let services = self.services.read().unwrap_or_else(PoisonError::into_inner);
        Ok(services.contains_key(&id))
    }

    fn insert(&self, service: AdditionalService) -> Result<()> {
        let mut services = self.services.write().unwrap_or_else(PoisonError::into_inner);
        services.insert(service.id(), service);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<AdditionalService>> {
        let services = self.services.read().unwrap_or_else(PoisonError::into_inner);
        let mut all: Vec<AdditionalService> = services.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }
}
