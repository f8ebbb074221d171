//! Schema management for the dispatch SQLite database.

use rusqlite::{Connection, OptionalExtension, Transaction};

use super::SqliteGatewayError;

/// Version recorded in `dispatch_schema_version` by this release.
pub const SCHEMA_VERSION: i64 = 1;

/// Create the dispatch tables inside an existing SQLite database.
///
/// Tables are created when missing and the schema version is recorded.
/// Databases stamped with a different version are rejected so migrations
/// can be applied explicitly.
///
/// # Examples
/// ```
/// use rusqlite::Connection;
/// use dispatch_core::store::initialise_schema;
///
/// let mut conn = Connection::open_in_memory().expect("create in-memory database");
/// initialise_schema(&mut conn).expect("create dispatch schema");
///
/// let tables: i64 = conn
///     .query_row(
///         "SELECT COUNT(*) FROM sqlite_master
///          WHERE type = 'table' AND name IN ('drivers', 'vehicles', 'deliveries')",
///         [],
///         |row| row.get(0),
///     )
///     .expect("count tables");
/// assert_eq!(tables, 3);
/// ```
///
/// # Errors
/// Returns [`SqliteGatewayError::Migration`] when a statement fails and
/// [`SqliteGatewayError::VersionMismatch`] when the stored version differs.
pub fn initialise_schema(connection: &mut Connection) -> Result<(), SqliteGatewayError> {
    let transaction = connection
        .transaction()
        .map_err(|source| SqliteGatewayError::Migration {
            step: "begin schema transaction",
            source,
        })?;

    create_tables(&transaction)?;
    ensure_schema_version(&transaction)?;

    transaction
        .commit()
        .map_err(|source| SqliteGatewayError::Migration {
            step: "commit schema transaction",
            source,
        })
}

fn create_tables(transaction: &Transaction<'_>) -> Result<(), SqliteGatewayError> {
    run_migration_step(
        transaction,
        "create drivers",
        "CREATE TABLE IF NOT EXISTS drivers (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            experience_years INTEGER NOT NULL CHECK (experience_years >= 0),
            distance_from_pickup REAL NOT NULL,
            available INTEGER NOT NULL
        )",
    )?;
    run_migration_step(
        transaction,
        "create vehicles",
        "CREATE TABLE IF NOT EXISTS vehicles (
            reg_number TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            type TEXT NOT NULL,
            fuel_usage REAL NOT NULL,
            mileage INTEGER NOT NULL,
            driver_id INTEGER,
            maintenance_history TEXT NOT NULL DEFAULT '',
            last_service_date TEXT NOT NULL DEFAULT ''
        ) WITHOUT ROWID",
    )?;
    run_migration_step(
        transaction,
        "create deliveries",
        "CREATE TABLE IF NOT EXISTS deliveries (
            package_id TEXT PRIMARY KEY,
            origin TEXT,
            destination TEXT,
            assigned_vehicle_id TEXT,
            assigned_driver_id INTEGER,
            estimated_hours INTEGER,
            status TEXT,
            created_at TEXT
        ) WITHOUT ROWID",
    )
}

fn ensure_schema_version(transaction: &Transaction<'_>) -> Result<(), SqliteGatewayError> {
    run_migration_step(
        transaction,
        "create schema version table",
        "CREATE TABLE IF NOT EXISTS dispatch_schema_version (
            version INTEGER PRIMARY KEY CHECK (version > 0),
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        ) WITHOUT ROWID",
    )?;

    let existing_version: Option<i64> = transaction
        .query_row(
            "SELECT version FROM dispatch_schema_version LIMIT 1",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(|source| SqliteGatewayError::Migration {
            step: "read schema version",
            source,
        })?;

    match existing_version {
        Some(version) if version == SCHEMA_VERSION => Ok(()),
        Some(found) => Err(SqliteGatewayError::VersionMismatch {
            expected: SCHEMA_VERSION,
            found,
        }),
        None => transaction
            .execute(
                "INSERT INTO dispatch_schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )
            .map(|_| ())
            .map_err(|source| SqliteGatewayError::Migration {
                step: "record schema version",
                source,
            }),
    }
}

fn run_migration_step(
    transaction: &Transaction<'_>,
    step: &'static str,
    sql: &str,
) -> Result<(), SqliteGatewayError> {
    transaction
        .execute(sql, [])
        .map(|_| ())
        .map_err(|source| SqliteGatewayError::Migration { step, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn initialising_twice_is_idempotent() {
        let mut connection = Connection::open_in_memory().expect("in-memory database");
        initialise_schema(&mut connection).expect("first initialisation");
        initialise_schema(&mut connection).expect("second initialisation");
        let versions: i64 = connection
            .query_row("SELECT COUNT(*) FROM dispatch_schema_version", [], |row| {
                row.get(0)
            })
            .expect("count versions");
        assert_eq!(versions, 1);
    }

    #[rstest]
    fn rejects_newer_schema_versions() {
        let mut connection = Connection::open_in_memory().expect("in-memory database");
        initialise_schema(&mut connection).expect("initialise");
        connection
            .execute(
                "UPDATE dispatch_schema_version SET version = ?1",
                [SCHEMA_VERSION + 1],
            )
            .expect("bump version");

        let error = initialise_schema(&mut connection).expect_err("version mismatch");
        assert!(matches!(
            error,
            SqliteGatewayError::VersionMismatch { expected, found }
                if expected == SCHEMA_VERSION && found == SCHEMA_VERSION + 1
        ));
    }
}
