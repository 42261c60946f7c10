//! Database schema management.
//!
//! Handles schema initialization and version checking on open.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::{
    CREATE_ATTACHMENTS_TABLE, CREATE_ATTACHMENT_INDEX, CREATE_METADATA_TABLE,
    CREATE_RESERVATIONS_TABLE, CREATE_ROOMS_TABLE, CREATE_ROOM_INDEX, CREATE_SERVICES_TABLE,
    CURRENT_SCHEMA_VERSION, INSERT_SCHEMA_VERSION, SELECT_SCHEMA_VERSION,
};

/// Initializes the database schema.
///
/// Creates all tables, indices, and the versioned metadata entry for a
/// fresh database.
///
/// # Errors
///
/// Returns an error if any SQL statement fails to execute.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use stanza::database::migrations::initialize_schema;
///
/// let conn = Connection::open_in_memory().unwrap();
/// initialize_schema(&conn).unwrap();
/// ```
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute(CREATE_METADATA_TABLE, [])?;
    conn.execute(CREATE_ROOMS_TABLE, [])?;
    conn.execute(CREATE_RESERVATIONS_TABLE, [])?;
    conn.execute(CREATE_ATTACHMENTS_TABLE, [])?;
    conn.execute(CREATE_SERVICES_TABLE, [])?;

    conn.execute(CREATE_ROOM_INDEX, [])?;
    conn.execute(CREATE_ATTACHMENT_INDEX, [])?;

    conn.execute(INSERT_SCHEMA_VERSION, [CURRENT_SCHEMA_VERSION])?;

    Ok(())
}

/// Gets the current schema version from the database.
///
/// Returns `Ok(0)` if the metadata table does not exist yet or holds no
/// version, which means the database needs initialization.
///
/// # Errors
///
/// Returns an error if the query fails for other reasons.
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    match conn.query_row(SELECT_SCHEMA_VERSION, [], |row| {
        let value: String = row.get(0)?;
        value
            .parse::<i32>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
    }) {
        Ok(version) => Ok(version),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => {
            if let rusqlite::Error::SqliteFailure(ref sqlite_err, _) = e {
                if sqlite_err.code == rusqlite::ErrorCode::Unknown {
                    // Metadata table doesn't exist yet
                    return Ok(0);
                }
            }
            Err(e.into())
        }
    }
}

/// Checks schema compatibility and initializes a fresh database.
///
/// A version of 0 triggers initialization; any version other than
/// [`CURRENT_SCHEMA_VERSION`](super::schema::CURRENT_SCHEMA_VERSION)
/// is rejected.
///
/// # Errors
///
/// Returns [`Error::UnsupportedSchemaVersion`] on a version mismatch, or
/// any error from initialization.
///
/// # Examples
///
/// ```
/// use rusqlite::Connection;
/// use stanza::database::migrations::check_schema_compatibility;
///
/// let conn = Connection::open_in_memory().unwrap();
/// check_schema_compatibility(&conn).unwrap();
/// ```
pub fn check_schema_compatibility(conn: &Connection) -> Result<()> {
    let version = get_schema_version(conn)?;

    if version == 0 {
        return initialize_schema(conn);
    }

    if version != CURRENT_SCHEMA_VERSION {
        return Err(Error::UnsupportedSchemaVersion {
            expected: CURRENT_SCHEMA_VERSION,
            found: version,
        });
    }

    Ok(())
}
