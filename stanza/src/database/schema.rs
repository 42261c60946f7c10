//! Database schema definitions and SQL constants.

/// Current schema version for the database.
///
/// Stored in the metadata table and checked on open to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the rooms table.
///
/// The room number carries a UNIQUE constraint; the availability flag is
/// stored as an integer 0/1.
pub const CREATE_ROOMS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS rooms (
        id TEXT PRIMARY KEY NOT NULL,
        number TEXT NOT NULL UNIQUE,
        capacity INTEGER NOT NULL,
        nightly_rate REAL NOT NULL,
        available INTEGER NOT NULL
    )";

/// SQL statement to create the reservations table.
///
/// Dates are stored as ISO-8601 text; the three lifecycle flags as
/// integers 0/1.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id TEXT PRIMARY KEY NOT NULL,
        room_id TEXT NOT NULL,
        guest_id TEXT NOT NULL,
        occupants INTEGER NOT NULL,
        check_in_date TEXT NOT NULL,
        check_out_date TEXT NOT NULL,
        checked_in INTEGER NOT NULL,
        checked_out INTEGER NOT NULL,
        cancelled INTEGER NOT NULL
    )";

/// SQL statement to create the attachments table.
///
/// The UNIQUE constraint over (reservation_id, service_id) backs the
/// duplicate-attachment rejection under concurrent load.
pub const CREATE_ATTACHMENTS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS attachments (
        id TEXT PRIMARY KEY NOT NULL,
        reservation_id TEXT NOT NULL,
        service_id TEXT NOT NULL,
        UNIQUE (reservation_id, service_id)
    )";

/// SQL statement to create the additional-services table.
pub const CREATE_SERVICES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS services (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        rate REAL NOT NULL
    )";

/// SQL statement to create an index on the reservation room reference.
///
/// Speeds up per-room queries when auditing room claims.
pub const CREATE_ROOM_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_room ON reservations(room_id)";

/// SQL statement to create an index on the attachment reservation reference.
pub const CREATE_ATTACHMENT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_attachments_reservation ON attachments(reservation_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
