//! SQLite storage backend.
//!
//! This module provides the persistent backend used by the CLI: a
//! `SQLite` database holding rooms, reservations, service attachments
//! and the additional-service catalog, with schema versioning and
//! IMMEDIATE transactions for record mutations.
//!
//! # Examples
//!
//! ```no_run
//! use stanza::database::{DatabaseConfig, SqliteStore};
//! use stanza::store::RoomCatalog;
//! use stanza::{Room, RoomId};
//!
//! let store = SqliteStore::open(DatabaseConfig::new("/tmp/stanza.db")).unwrap();
//! let room = Room::builder(RoomId::new(), "101").capacity(2).build().unwrap();
//! store.insert(room).unwrap();
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;

pub use config::{default_data_dir, resolve_database_path, DatabaseConfig};
pub use connection::SqliteStore;

pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
