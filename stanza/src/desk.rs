//! The front desk: the engine facade.
//!
//! `FrontDesk` wires the availability guard and the storage collaborators
//! together and exposes the reservation operations consumed by a
//! presentation layer. Every operation completes synchronously with a
//! typed result; a failed call leaves all state unchanged.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::guard::AvailabilityGuard;
use crate::lifecycle;
use crate::reservation::{GuestId, Reservation, ReservationId, Stay};
use crate::room::{Room, RoomId};
use crate::service::{AdditionalService, AttachmentId, ServiceAttachment, ServiceId};
use crate::store::{AttachmentStore, ReservationStore, RoomCatalog, ServiceCatalog};

use chrono::NaiveDate;

/// A booking request: the input of
/// [`FrontDesk::create_reservation`].
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest {
    /// The room to claim.
    pub room: RoomId,
    /// The booking guest.
    pub guest: GuestId,
    /// Occupant count; must be at least 1.
    pub occupants: u32,
    /// The stay date range.
    pub stay: Stay,
}

/// The reservation engine facade.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use chrono::NaiveDate;
/// use stanza::desk::{BookingRequest, FrontDesk};
/// use stanza::store::MemoryStore;
/// use stanza::{GuestId, Room, RoomId, Stay};
///
/// let desk = FrontDesk::from_shared(Arc::new(MemoryStore::new()));
///
/// let room = RoomId::new();
/// desk.add_room(Room::builder(room, "101").capacity(2).build().unwrap()).unwrap();
///
/// let stay = Stay::new(
///     NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
/// )
/// .unwrap();
/// let request = BookingRequest { room, guest: GuestId::new(), occupants: 2, stay };
///
/// let reservation = desk.create_reservation(request).unwrap();
/// assert!(reservation.is_active());
///
/// // The room is claimed, so a second booking fails
/// let second = BookingRequest { guest: GuestId::new(), ..request };
/// assert!(desk.create_reservation(second).is_err());
/// ```
pub struct FrontDesk {
    rooms: Arc<dyn RoomCatalog>,
    reservations: Arc<dyn ReservationStore>,
    attachments: Arc<dyn AttachmentStore>,
    services: Arc<dyn ServiceCatalog>,
    guard: AvailabilityGuard,
}

impl FrontDesk {
    /// Creates a front desk over explicit collaborators.
    #[must_use]
    pub fn new(
        rooms: Arc<dyn RoomCatalog>,
        reservations: Arc<dyn ReservationStore>,
        attachments: Arc<dyn AttachmentStore>,
        services: Arc<dyn ServiceCatalog>,
    ) -> Self {
        let guard = AvailabilityGuard::new(Arc::clone(&rooms));
        Self {
            rooms,
            reservations,
            attachments,
            services,
            guard,
        }
    }

    /// Creates a front desk over one backend implementing every storage
    /// trait, such as [`MemoryStore`](crate::store::MemoryStore) or
    /// [`SqliteStore`](crate::database::SqliteStore).
    #[must_use]
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: RoomCatalog + ReservationStore + AttachmentStore + ServiceCatalog + 'static,
    {
        Self::new(
            Arc::clone(&store) as Arc<dyn RoomCatalog>,
            Arc::clone(&store) as Arc<dyn ReservationStore>,
            Arc::clone(&store) as Arc<dyn AttachmentStore>,
            store as Arc<dyn ServiceCatalog>,
        )
    }

    /// Accepts a booking request and creates the reservation.
    ///
    /// Claims the room through the availability guard, assigns a fresh
    /// identifier, persists the record with all three lifecycle flags
    /// false, and returns it. This is the only transition that reads room
    /// state. Occupant counts are not validated against room capacity.
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`] if the occupant count is zero
    /// - [`Error::NotFound`] if the room does not exist
    /// - [`Error::RoomUnavailable`] if the claim fails; nothing is
    ///   persisted
    pub fn create_reservation(&self, request: BookingRequest) -> Result<Reservation> {
        // Validate before claiming so a rejected request never touches
        // the room flag.
        let reservation = Reservation::builder(
            ReservationId::new(),
            request.room,
            request.guest,
            request.stay,
        )
        .occupants(request.occupants)
        .build()?;

        self.guard.try_claim(request.room)?;

        match self.reservations.insert(reservation.clone()) {
            Ok(()) => {
                log::debug!(
                    "created reservation {} for room {} ({})",
                    reservation.id(),
                    reservation.room(),
                    reservation.stay()
                );
                Ok(reservation)
            }
            Err(err) => {
                // Undo the claim so a storage failure leaves no partial state.
                if let Err(release_err) = self.guard.release(request.room) {
                    log::warn!(
                        "room {} left unavailable: release after storage failure failed: {release_err}",
                        request.room
                    );
                }
                Err(err)
            }
        }
    }

    /// Overwrites occupant count and stay dates of a reservation.
    ///
    /// The new values are written exactly as given: neither date order
    /// nor room availability is re-validated, and the lifecycle flags are
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reservation does not exist.
    pub fn update_details(
        &self,
        id: ReservationId,
        occupants: u32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Reservation> {
        let stay = Stay::new_unchecked(check_in, check_out);
        self.reservations.update(id, &mut |reservation| {
            lifecycle::update_details(reservation, occupants, stay);
            Ok(())
        })
    }

    /// Performs check-in on a reservation.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::AlreadyCheckedIn`] if check-in was already performed
    pub fn check_in(&self, id: ReservationId) -> Result<Reservation> {
        self.reservations.update(id, &mut lifecycle::check_in)
    }

    /// Performs check-out on a reservation.
    ///
    /// The room stays claimed: only cancellation releases availability.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::CheckInRequired`] if check-in has not been performed
    pub fn check_out(&self, id: ReservationId) -> Result<Reservation> {
        self.reservations.update(id, &mut lifecycle::check_out)
    }

    /// Cancels a reservation and releases its room.
    ///
    /// Permitted at any lifecycle point, including after check-out, and
    /// idempotent: cancelling an already-cancelled reservation succeeds
    /// and the room flag ends up released either way.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reservation does not exist.
    pub fn cancel(&self, id: ReservationId) -> Result<Reservation> {
        let updated = self.reservations.update(id, &mut |reservation| {
            lifecycle::cancel(reservation);
            Ok(())
        })?;
        self.guard.release(updated.room())?;
        log::debug!("cancelled reservation {id}, room {} released", updated.room());
        Ok(updated)
    }

    /// Attaches an additional service to a reservation.
    ///
    /// Attachments are append-only; the (reservation, service) pair must
    /// not already exist. Whether the service itself exists is not
    /// verified; use [`service_exists`](Self::service_exists) to check
    /// first.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the reservation does not exist
    /// - [`Error::DuplicateAttachment`] if the pair is already attached
    pub fn attach_service(
        &self,
        reservation: ReservationId,
        service: ServiceId,
    ) -> Result<ServiceAttachment> {
        if self.reservations.get(reservation)?.is_none() {
            return Err(Error::not_found(format!("reservation {reservation}")));
        }

        let attachment = ServiceAttachment::new(AttachmentId::new(), reservation, service);
        self.attachments.insert(attachment)?;
        log::debug!("attached service {service} to reservation {reservation}");
        Ok(attachment)
    }

    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the reservation does not exist.
    pub fn reservation(&self, id: ReservationId) -> Result<Reservation> {
        self.reservations
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))
    }

    /// Lists all reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn list_reservations(&self) -> Result<Vec<Reservation>> {
        self.reservations.list_all()
    }

    /// Lists the attachments of one reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn attachments_for(&self, id: ReservationId) -> Result<Vec<ServiceAttachment>> {
        self.attachments.list_for(id)
    }

    /// Lists all attachments.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn list_attachments(&self) -> Result<Vec<ServiceAttachment>> {
        self.attachments.list_all()
    }

    /// Registers a room.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the room number is already taken.
    pub fn add_room(&self, room: Room) -> Result<()> {
        self.rooms.insert(room)
    }

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the room does not exist.
    pub fn room(&self, id: RoomId) -> Result<Room> {
        self.rooms
            .get(id)?
            .ok_or_else(|| Error::not_found(format!("room {id}")))
    }

    /// Lists all rooms.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn list_rooms(&self) -> Result<Vec<Room>> {
        self.rooms.list_all()
    }

    /// Registers an additional service.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn add_service(&self, service: AdditionalService) -> Result<()> {
        self.services.insert(service)
    }

    /// Returns whether a service with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn service_exists(&self, id: ServiceId) -> Result<bool> {
        self.services.exists(id)
    }

    /// Lists all services.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails.
    pub fn list_services(&self) -> Result<Vec<AdditionalService>> {
        self.services.list_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;

    fn desk_with_room() -> (FrontDesk, RoomId) {
        let desk = FrontDesk::from_shared(Arc::new(MemoryStore::new()));
        let room = RoomId::new();
        desk.add_room(Room::builder(room, "101").capacity(2).build().unwrap())
            .unwrap();
        (desk, room)
    }

    fn request(room: RoomId) -> BookingRequest {
        BookingRequest {
            room,
            guest: GuestId::new(),
            occupants: 2,
            stay: Stay::new(
                NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            )
            .unwrap(),
        }
    }

    #[test]
    fn test_create_claims_room() {
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();

        assert!(reservation.is_active());
        assert!(!desk.room(room).unwrap().available());
    }

    #[test]
    fn test_create_zero_occupants_leaves_room_unclaimed() {
        let (desk, room) = desk_with_room();
        let mut req = request(room);
        req.occupants = 0;

        let err = desk.create_reservation(req).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        // The rejected request never reached the claim
        assert!(desk.room(room).unwrap().available());
    }

    #[test]
    fn test_create_unknown_room_is_not_found() {
        let (desk, _) = desk_with_room();
        let err = desk.create_reservation(request(RoomId::new())).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_second_create_fails_until_cancel() {
        let (desk, room) = desk_with_room();
        let first = desk.create_reservation(request(room)).unwrap();

        let err = desk.create_reservation(request(room)).unwrap_err();
        assert!(matches!(err, Error::RoomUnavailable { .. }));

        desk.cancel(first.id()).unwrap();
        assert!(desk.room(room).unwrap().available());
        desk.create_reservation(request(room)).unwrap();
    }

    struct FailingReservations;

    impl ReservationStore for FailingReservations {
        fn get(&self, _id: ReservationId) -> Result<Option<Reservation>> {
            Ok(None)
        }

        fn insert(&self, _reservation: Reservation) -> Result<()> {
            Err(Error::Validation {
                field: "reservation".to_string(),
                message: "storage offline".to_string(),
            })
        }

        fn update(
            &self,
            id: ReservationId,
            _f: &mut dyn FnMut(&mut Reservation) -> Result<()>,
        ) -> Result<Reservation> {
            Err(Error::not_found(format!("reservation {id}")))
        }

        fn list_all(&self) -> Result<Vec<Reservation>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_failed_insert_returns_storage_error_and_releases_claim() {
        let store = Arc::new(MemoryStore::new());
        let desk = FrontDesk::new(
            Arc::clone(&store) as Arc<dyn RoomCatalog>,
            Arc::new(FailingReservations),
            Arc::clone(&store) as Arc<dyn AttachmentStore>,
            store as Arc<dyn ServiceCatalog>,
        );
        let room = RoomId::new();
        desk.add_room(Room::builder(room, "101").build().unwrap())
            .unwrap();

        // The storage error wins over any release outcome
        let err = desk.create_reservation(request(room)).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        // The compensating release leaves the room bookable again
        assert!(desk.room(room).unwrap().available());
    }

    #[test]
    fn test_check_out_does_not_release_room() {
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();

        desk.check_in(reservation.id()).unwrap();
        let updated = desk.check_out(reservation.id()).unwrap();

        assert!(updated.checked_out());
        assert!(!updated.is_active());
        // Only cancellation releases availability
        assert!(!desk.room(room).unwrap().available());
    }

    #[test]
    fn test_cancel_is_idempotent_and_room_stays_released() {
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();

        desk.cancel(reservation.id()).unwrap();
        desk.cancel(reservation.id()).unwrap();

        let stored = desk.reservation(reservation.id()).unwrap();
        assert!(stored.cancelled());
        assert!(desk.room(room).unwrap().available());
    }

    #[test]
    fn test_cancel_after_check_out_releases_room() {
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();

        desk.check_in(reservation.id()).unwrap();
        desk.check_out(reservation.id()).unwrap();
        desk.cancel(reservation.id()).unwrap();

        assert!(desk.room(room).unwrap().available());
    }

    #[test]
    fn test_update_details_skips_validation() {
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();

        // Inverted dates and a large occupant count are written as given
        let updated = desk
            .update_details(
                reservation.id(),
                9,
                NaiveDate::from_ymd_opt(2025, 2, 12).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            )
            .unwrap();

        assert_eq!(updated.occupants(), 9);
        assert_eq!(updated.stay().nights(), -2);
        assert!(updated.is_active());
    }

    #[test]
    fn test_update_details_missing_reservation() {
        let (desk, _) = desk_with_room();
        let err = desk
            .update_details(
                ReservationId::new(),
                2,
                NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 12).unwrap(),
            )
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_attach_service_and_duplicate() {
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();
        let service = ServiceId::new();

        let attachment = desk.attach_service(reservation.id(), service).unwrap();
        assert_eq!(attachment.reservation(), reservation.id());

        let err = desk.attach_service(reservation.id(), service).unwrap_err();
        assert!(matches!(err, Error::DuplicateAttachment { .. }));

        assert_eq!(desk.attachments_for(reservation.id()).unwrap().len(), 1);
    }

    #[test]
    fn test_attach_service_unknown_reservation() {
        let (desk, _) = desk_with_room();
        let err = desk
            .attach_service(ReservationId::new(), ServiceId::new())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_attach_does_not_require_service_record() {
        // The service catalog is deliberately not consulted
        let (desk, room) = desk_with_room();
        let reservation = desk.create_reservation(request(room)).unwrap();
        let service = ServiceId::new();

        assert!(!desk.service_exists(service).unwrap());
        desk.attach_service(reservation.id(), service).unwrap();
    }

    #[test]
    fn test_list_reservations() {
        let (desk, room) = desk_with_room();
        let other = RoomId::new();
        desk.add_room(Room::builder(other, "102").build().unwrap())
            .unwrap();

        desk.create_reservation(request(room)).unwrap();
        desk.create_reservation(request(other)).unwrap();
        assert_eq!(desk.list_reservations().unwrap().len(), 2);
    }
}
