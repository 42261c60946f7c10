#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # stanza
//!
//! A library for managing hotel room reservations.
//!
//! This library provides core types and functionality for booking rooms,
//! walking reservations through their lifecycle, and attaching additional
//! services, with room availability kept consistent under concurrency.
//!
//! ## Core Types
//!
//! - [`Room`] and [`RoomId`]: Bookable rooms with an availability flag
//! - [`Reservation`], [`ReservationId`] and [`Stay`]: Reservation records
//! - [`AdditionalService`] and [`ServiceAttachment`]: Per-stay extras
//! - [`FrontDesk`]: The coordinating facade over storage and the guard
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use stanza::desk::{BookingRequest, FrontDesk};
//! use stanza::store::MemoryStore;
//! use stanza::{GuestId, Room, RoomId, Stay};
//!
//! let desk = FrontDesk::from_shared(Arc::new(MemoryStore::new()));
//!
//! let room = Room::builder(RoomId::new(), "101").capacity(2).build().unwrap();
//! let room_id = room.id();
//! desk.add_room(room).unwrap();
//!
//! let stay = Stay::new(
//!     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
//! )
//! .unwrap();
//! let request = BookingRequest {
//!     room: room_id,
//!     guest: GuestId::new(),
//!     occupants: 2,
//!     stay,
//! };
//! let reservation = desk.create_reservation(request).unwrap();
//! assert!(reservation.is_active());
//! ```

pub mod config;
pub mod database;
pub mod desk;
pub mod error;
pub mod guard;
pub mod lifecycle;
pub mod logging;
pub mod reservation;
pub mod room;
pub mod service;
pub mod store;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use database::{DatabaseConfig, SqliteStore};
pub use desk::{BookingRequest, FrontDesk};
pub use error::{Error, Result, ValidationError};
pub use guard::AvailabilityGuard;
pub use lifecycle::ReservationState;
pub use logging::{init_logger, LogLevel, Logger};
pub use reservation::{GuestId, Reservation, ReservationId, Stay};
pub use room::{Room, RoomId};
pub use service::{AdditionalService, AttachmentId, ServiceAttachment, ServiceId};
pub use store::MemoryStore;
