//! CRUD operations backing the storage traits.
//!
//! Implements [`RoomCatalog`], [`ReservationStore`], [`AttachmentStore`]
//! and [`ServiceCatalog`] for [`SqliteStore`]. Reservation mutations run
//! inside IMMEDIATE transactions so a failed closure persists nothing.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::reservation::{GuestId, Reservation, ReservationId, Stay};
use crate::room::{Room, RoomId};
use crate::service::{AdditionalService, AttachmentId, ServiceAttachment, ServiceId};
use crate::store::{AttachmentStore, ReservationStore, RoomCatalog, ServiceCatalog};

use super::connection::SqliteStore;

const SELECT_ROOM: &str = r"
    SELECT id, number, capacity, nightly_rate, available
    FROM rooms
    WHERE id = ?
";

const UPSERT_ROOM: &str = r"
    INSERT INTO rooms (id, number, capacity, nightly_rate, available)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        number = excluded.number,
        capacity = excluded.capacity,
        nightly_rate = excluded.nightly_rate,
        available = excluded.available
";

const UPDATE_ROOM_AVAILABILITY: &str = r"
    UPDATE rooms SET available = ? WHERE id = ?
";

const LIST_ROOMS: &str = r"
    SELECT id, number, capacity, nightly_rate, available
    FROM rooms
    ORDER BY number
";

const SELECT_RESERVATION: &str = r"
    SELECT id, room_id, guest_id, occupants, check_in_date, check_out_date,
           checked_in, checked_out, cancelled
    FROM reservations
    WHERE id = ?
";

const INSERT_RESERVATION: &str = r"
    INSERT OR REPLACE INTO reservations
    (id, room_id, guest_id, occupants, check_in_date, check_out_date,
     checked_in, checked_out, cancelled)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET occupants = ?, check_in_date = ?, check_out_date = ?,
        checked_in = ?, checked_out = ?, cancelled = ?
    WHERE id = ?
";

const LIST_RESERVATIONS: &str = r"
    SELECT id, room_id, guest_id, occupants, check_in_date, check_out_date,
           checked_in, checked_out, cancelled
    FROM reservations
    ORDER BY check_in_date, id
";

const INSERT_ATTACHMENT: &str = r"
    INSERT INTO attachments (id, reservation_id, service_id)
    VALUES (?, ?, ?)
";

const SELECT_ATTACHMENT: &str = r"
    SELECT id, reservation_id, service_id FROM attachments WHERE id = ?
";

const LIST_ATTACHMENTS: &str = r"
    SELECT id, reservation_id, service_id FROM attachments ORDER BY rowid
";

const LIST_ATTACHMENTS_FOR: &str = r"
    SELECT id, reservation_id, service_id
    FROM attachments
    WHERE reservation_id = ?
    ORDER BY rowid
";

const SERVICE_EXISTS: &str = r"
    SELECT COUNT(*) FROM services WHERE id = ?
";

const UPSERT_SERVICE: &str = r"
    INSERT OR REPLACE INTO services (id, name, description, rate)
    VALUES (?, ?, ?, ?)
";

const LIST_SERVICES: &str = r"
    SELECT id, name, description, rate FROM services ORDER BY name
";

/// Parses a stored UUID column.
fn parse_uuid(text: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(text).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Parses a stored ISO-8601 date column.
fn parse_date(text: &str) -> rusqlite::Result<NaiveDate> {
    text.parse::<NaiveDate>()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn row_to_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let id: String = row.get(0)?;
    let number: String = row.get(1)?;
    let capacity: u32 = row.get(2)?;
    let nightly_rate: f64 = row.get(3)?;
    let available: bool = row.get(4)?;

    Room::builder(RoomId::from_uuid(parse_uuid(&id)?), number)
        .capacity(capacity)
        .nightly_rate(nightly_rate)
        .available(available)
        .build()
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: String = row.get(0)?;
    let room_id: String = row.get(1)?;
    let guest_id: String = row.get(2)?;
    let occupants: u32 = row.get(3)?;
    let check_in_date: String = row.get(4)?;
    let check_out_date: String = row.get(5)?;
    let checked_in: bool = row.get(6)?;
    let checked_out: bool = row.get(7)?;
    let cancelled: bool = row.get(8)?;

    // Persisted rows may hold an unvalidated range written by a detail
    // update, so the unchecked constructor is the right one here.
    let stay = Stay::new_unchecked(parse_date(&check_in_date)?, parse_date(&check_out_date)?);

    Reservation::builder(
        ReservationId::from_uuid(parse_uuid(&id)?),
        RoomId::from_uuid(parse_uuid(&room_id)?),
        GuestId::from_uuid(parse_uuid(&guest_id)?),
        stay,
    )
    .occupants(occupants)
    .checked_in(checked_in)
    .checked_out(checked_out)
    .cancelled(cancelled)
    .build()
    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn row_to_attachment(row: &rusqlite::Row<'_>) -> rusqlite::Result<ServiceAttachment> {
    let id: String = row.get(0)?;
    let reservation_id: String = row.get(1)?;
    let service_id: String = row.get(2)?;

    Ok(ServiceAttachment::new(
        AttachmentId::from_uuid(parse_uuid(&id)?),
        ReservationId::from_uuid(parse_uuid(&reservation_id)?),
        ServiceId::from_uuid(parse_uuid(&service_id)?),
    ))
}

fn row_to_service(row: &rusqlite::Row<'_>) -> rusqlite::Result<AdditionalService> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let description: String = row.get(2)?;
    let rate: f64 = row.get(3)?;

    AdditionalService::new(ServiceId::from_uuid(parse_uuid(&id)?), name, description, rate)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

impl RoomCatalog for SqliteStore {
    fn get(&self, id: RoomId) -> Result<Option<Room>> {
        let conn = self.connection();
        let room = conn
            .query_row(SELECT_ROOM, params![id.to_string()], row_to_room)
            .optional()?;
        Ok(room)
    }

    fn insert(&self, room: Room) -> Result<()> {
        let conn = self.connection();
        let result = conn.execute(
            UPSERT_ROOM,
            params![
                room.id().to_string(),
                room.number(),
                room.capacity(),
                room.nightly_rate(),
                room.available(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(Error::Validation {
                field: "number".into(),
                message: format!("room number '{}' is already registered", room.number()),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn set_availability(&self, id: RoomId, available: bool) -> Result<()> {
        let conn = self.connection();
        let changed = conn.execute(
            UPDATE_ROOM_AVAILABILITY,
            params![available, id.to_string()],
        )?;
        if changed == 0 {
            return Err(Error::not_found(format!("room {id}")));
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Room>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(LIST_ROOMS)?;
        let rooms = stmt
            .query_map([], row_to_room)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rooms)
    }
}

impl ReservationStore for SqliteStore {
    fn get(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let conn = self.connection();
        let reservation = conn
            .query_row(SELECT_RESERVATION, params![id.to_string()], row_to_reservation)
            .optional()?;
        Ok(reservation)
    }

    fn insert(&self, reservation: Reservation) -> Result<()> {
        let conn = self.connection();
        conn.execute(
            INSERT_RESERVATION,
            params![
                reservation.id().to_string(),
                reservation.room().to_string(),
                reservation.guest().to_string(),
                reservation.occupants(),
                reservation.stay().check_in().to_string(),
                reservation.stay().check_out().to_string(),
                reservation.checked_in(),
                reservation.checked_out(),
                reservation.cancelled(),
            ],
        )?;
        Ok(())
    }

    fn update(
        &self,
        id: ReservationId,
        f: &mut dyn FnMut(&mut Reservation) -> Result<()>,
    ) -> Result<Reservation> {
        let mut conn = self.connection();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut reservation = tx
            .query_row(SELECT_RESERVATION, params![id.to_string()], row_to_reservation)
            .optional()?
            .ok_or_else(|| Error::not_found(format!("reservation {id}")))?;

        // A failing closure drops the transaction and rolls back.
        f(&mut reservation)?;

        tx.execute(
            UPDATE_RESERVATION,
            params![
                reservation.occupants(),
                reservation.stay().check_in().to_string(),
                reservation.stay().check_out().to_string(),
                reservation.checked_in(),
                reservation.checked_out(),
                reservation.cancelled(),
                reservation.id().to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(reservation)
    }

    fn list_all(&self) -> Result<Vec<Reservation>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(LIST_RESERVATIONS)?;
        let reservations = stmt
            .query_map([], row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(reservations)
    }
}

impl AttachmentStore for SqliteStore {
    fn insert(&self, attachment: ServiceAttachment) -> Result<()> {
        let conn = self.connection();
        let result = conn.execute(
            INSERT_ATTACHMENT,
            params![
                attachment.id().to_string(),
                attachment.reservation().to_string(),
                attachment.service().to_string(),
            ],
        );
        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(Error::DuplicateAttachment {
                reservation: attachment.reservation(),
                service: attachment.service(),
            }),
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, id: AttachmentId) -> Result<Option<ServiceAttachment>> {
        let conn = self.connection();
        let attachment = conn
            .query_row(SELECT_ATTACHMENT, params![id.to_string()], row_to_attachment)
            .optional()?;
        Ok(attachment)
    }

    fn list_all(&self) -> Result<Vec<ServiceAttachment>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(LIST_ATTACHMENTS)?;
        let attachments = stmt
            .query_map([], row_to_attachment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(attachments)
    }

    fn list_for(&self, reservation: ReservationId) -> Result<Vec<ServiceAttachment>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(LIST_ATTACHMENTS_FOR)?;
        let attachments = stmt
            .query_map(params![reservation.to_string()], row_to_attachment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(attachments)
    }
}

impl ServiceCatalog for SqliteStore {
    fn exists(&self, id: ServiceId) -> Result<bool> {
        let conn = self.connection();
        let count: i64 = conn.query_row(SERVICE_EXISTS, params![id.to_string()], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn insert(&self, service: AdditionalService) -> Result<()> {
        let conn = self.connection();
        conn.execute(
            UPSERT_SERVICE,
            params![
                service.id().to_string(),
                service.name(),
                service.description(),
                service.rate(),
            ],
        )?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<AdditionalService>> {
        let conn = self.connection();
        let mut stmt = conn.prepare(LIST_SERVICES)?;
        let services = stmt
            .query_map([], row_to_service)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(services)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConfig;
    use tempfile::tempdir;

    fn open_store(dir: &tempfile::TempDir) -> SqliteStore {
        SqliteStore::open(DatabaseConfig::new(dir.path().join("test.db"))).unwrap()
    }

    fn sample_reservation() -> Reservation {
        let stay = Stay::new(
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
        )
        .unwrap();
        Reservation::builder(ReservationId::new(), RoomId::new(), GuestId::new(), stay)
            .occupants(2)
            .build()
            .unwrap()
    }

    #[test]
    fn test_room_roundtrip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let room = Room::builder(RoomId::new(), "101")
            .capacity(2)
            .nightly_rate(120.0)
            .build()
            .unwrap();
        RoomCatalog::insert(&store, room.clone()).unwrap();

        let loaded = RoomCatalog::get(&store, room.id()).unwrap().unwrap();
        assert_eq!(loaded, room);
    }

    #[test]
    fn test_duplicate_room_number_rejected() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        RoomCatalog::insert(&store, Room::builder(RoomId::new(), "101").build().unwrap()).unwrap();
        let result =
            RoomCatalog::insert(&store, Room::builder(RoomId::new(), "101").build().unwrap());
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_reinsert_same_room_updates_in_place() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let id = RoomId::new();
        RoomCatalog::insert(&store, Room::builder(id, "101").build().unwrap()).unwrap();
        RoomCatalog::insert(
            &store,
            Room::builder(id, "101").capacity(4).build().unwrap(),
        )
        .unwrap();

        let loaded = RoomCatalog::get(&store, id).unwrap().unwrap();
        assert_eq!(loaded.capacity(), 4);
        assert_eq!(RoomCatalog::list_all(&store).unwrap().len(), 1);
    }

    #[test]
    fn test_set_availability_missing_room() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let err = store.set_availability(RoomId::new(), true).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reservation_roundtrip() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let reservation = sample_reservation();
        ReservationStore::insert(&store, reservation.clone()).unwrap();

        let loaded = ReservationStore::get(&store, reservation.id()).unwrap().unwrap();
        assert_eq!(loaded, reservation);
    }

    #[test]
    fn test_update_rolls_back_on_closure_failure() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let reservation = sample_reservation();
        ReservationStore::insert(&store, reservation.clone()).unwrap();

        let result = store.update(reservation.id(), &mut |r| {
            r.checked_in = true;
            Err(Error::not_found("forced failure"))
        });
        assert!(result.is_err());

        let loaded = ReservationStore::get(&store, reservation.id()).unwrap().unwrap();
        assert!(!loaded.checked_in());
    }

    #[test]
    fn test_update_missing_reservation() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let err = store
            .update(ReservationId::new(), &mut |_| Ok(()))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_attachment_pair_unique() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let reservation = ReservationId::new();
        let service = ServiceId::new();
        AttachmentStore::insert(
            &store,
            ServiceAttachment::new(AttachmentId::new(), reservation, service),
        )
        .unwrap();

        let result = AttachmentStore::insert(
            &store,
            ServiceAttachment::new(AttachmentId::new(), reservation, service),
        );
        assert!(matches!(result, Err(Error::DuplicateAttachment { .. })));
    }

    #[test]
    fn test_service_exists() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let id = ServiceId::new();
        assert!(!store.exists(id).unwrap());
        ServiceCatalog::insert(
            &store,
            AdditionalService::new(id, "breakfast", "Buffet", 18.0).unwrap(),
        )
        .unwrap();
        assert!(store.exists(id).unwrap());
    }
}
