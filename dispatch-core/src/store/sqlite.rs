//! SQLite-backed persistence gateway.

use std::{
    fmt,
    sync::{Mutex, MutexGuard},
};

use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::{Connection, Error as SqliteError, Row};
use thiserror::Error;

use crate::{Driver, DriverId, PersistenceGateway, Vehicle};

use super::schema::initialise_schema;

const DRIVER_EXISTS_SQL: &str = "SELECT COUNT(*) FROM drivers WHERE id = ?1";

const UPSERT_DRIVER_SQL: &str = "INSERT INTO drivers (
        id, name, experience_years, distance_from_pickup, available
    ) VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT(id) DO UPDATE SET
        name = excluded.name,
        experience_years = excluded.experience_years,
        distance_from_pickup = excluded.distance_from_pickup,
        available = excluded.available";

const SELECT_DRIVERS_SQL: &str = "SELECT id, name, experience_years, distance_from_pickup, available
    FROM drivers ORDER BY id";

const UPSERT_VEHICLE_SQL: &str = "INSERT INTO vehicles (
        reg_number, name, type, fuel_usage, mileage,
        driver_id, maintenance_history, last_service_date
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(reg_number) DO UPDATE SET
        name = excluded.name,
        type = excluded.type,
        fuel_usage = excluded.fuel_usage,
        mileage = excluded.mileage,
        driver_id = excluded.driver_id,
        maintenance_history = excluded.maintenance_history,
        last_service_date = excluded.last_service_date";

const SELECT_VEHICLES_SQL: &str = "SELECT reg_number, name, type, fuel_usage, mileage,
        driver_id, maintenance_history, last_service_date
    FROM vehicles ORDER BY reg_number";

/// Errors raised by [`SqliteGateway`].
#[derive(Debug, Error)]
pub enum SqliteGatewayError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Requested database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A schema statement failed.
    #[error("failed to execute migration step '{step}'")]
    Migration {
        /// Description of the failed step.
        step: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// The database was created by an incompatible release.
    #[error(
        "expected dispatch schema version {expected} but found {found}; apply migrations before retrying"
    )]
    VersionMismatch {
        /// Version this release understands.
        expected: i64,
        /// Version recorded in the database.
        found: i64,
    },
    /// Reading or writing a record failed.
    #[error("failed to {operation}")]
    Query {
        /// Description of the failed operation.
        operation: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A thread panicked while holding the connection lock.
    #[error("SQLite connection lock was poisoned")]
    ConnectionPoisoned,
}

/// Persistence gateway writing drivers and vehicles to SQLite.
///
/// The connection sits behind a mutex so the gateway can be shared across
/// threads. It is closed when the gateway is dropped.
///
/// # Examples
/// ```
/// use dispatch_core::{Driver, PersistenceGateway, SqliteGateway};
///
/// # fn main() -> Result<(), dispatch_core::SqliteGatewayError> {
/// let gateway = SqliteGateway::open_in_memory()?;
/// assert!(!gateway.driver_exists(1)?);
/// gateway.save_driver(&Driver::new(1, "Ama", 5, 1.5))?;
/// assert!(gateway.driver_exists(1)?);
/// # Ok(())
/// # }
/// ```
pub struct SqliteGateway {
    connection: Mutex<Connection>,
    path: Option<Utf8PathBuf>,
}

impl fmt::Debug for SqliteGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteGateway")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteGateway {
    /// Open (or create) the database at `path` and initialise its schema.
    ///
    /// # Errors
    /// Returns [`SqliteGatewayError::OpenDatabase`] when the file cannot be
    /// opened and propagates schema initialisation failures.
    pub fn open(path: &Utf8Path) -> Result<Self, SqliteGatewayError> {
        let connection = Connection::open(path.as_std_path()).map_err(|source| {
            SqliteGatewayError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_connection(connection, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database with the dispatch schema.
    ///
    /// # Errors
    /// Propagates connection and schema initialisation failures.
    pub fn open_in_memory() -> Result<Self, SqliteGatewayError> {
        let connection =
            Connection::open_in_memory().map_err(|source| SqliteGatewayError::OpenDatabase {
                path: Utf8PathBuf::from(":memory:"),
                source,
            })?;
        Self::from_connection(connection, None)
    }

    fn from_connection(
        mut connection: Connection,
        path: Option<Utf8PathBuf>,
    ) -> Result<Self, SqliteGatewayError> {
        initialise_schema(&mut connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            path,
        })
    }

    /// Location of the backing file, or `None` for in-memory databases.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, SqliteGatewayError> {
        self.connection
            .lock()
            .map_err(|_| SqliteGatewayError::ConnectionPoisoned)
    }
}

fn query_error(operation: &'static str) -> impl FnOnce(SqliteError) -> SqliteGatewayError {
    move |source| SqliteGatewayError::Query { operation, source }
}

fn driver_from_row(row: &Row<'_>) -> rusqlite::Result<Driver> {
    Ok(Driver {
        id: row.get(0)?,
        name: row.get(1)?,
        experience_years: row.get(2)?,
        distance_from_pickup: row.get(3)?,
        available: row.get(4)?,
    })
}

fn vehicle_from_row(row: &Row<'_>) -> rusqlite::Result<Vehicle> {
    Ok(Vehicle {
        reg_number: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        fuel_usage: row.get(3)?,
        mileage: row.get(4)?,
        driver_id: row.get(5)?,
        maintenance_history: row.get(6)?,
        last_service_date: row.get(7)?,
    })
}

impl PersistenceGateway for SqliteGateway {
    type Error = SqliteGatewayError;

    fn driver_exists(&self, id: DriverId) -> Result<bool, Self::Error> {
        let connection = self.connection()?;
        let count: i64 = connection
            .query_row(DRIVER_EXISTS_SQL, [id], |row| row.get(0))
            .map_err(query_error("check driver existence"))?;
        Ok(count > 0)
    }

    fn save_driver(&self, driver: &Driver) -> Result<(), Self::Error> {
        let connection = self.connection()?;
        connection
            .prepare_cached(UPSERT_DRIVER_SQL)
            .and_then(|mut statement| {
                statement.execute((
                    driver.id,
                    driver.name.as_str(),
                    driver.experience_years,
                    driver.distance_from_pickup,
                    driver.available,
                ))
            })
            .map(|_| ())
            .map_err(query_error("upsert driver"))
    }

    fn load_all_drivers(&self) -> Result<Vec<Driver>, Self::Error> {
        let connection = self.connection()?;
        let mut statement = connection
            .prepare_cached(SELECT_DRIVERS_SQL)
            .map_err(query_error("prepare driver query"))?;
        let drivers = statement
            .query_map([], driver_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(query_error("load drivers"))?;
        Ok(drivers)
    }

    fn save_vehicle(&self, vehicle: &Vehicle) -> Result<(), Self::Error> {
        let connection = self.connection()?;
        connection
            .prepare_cached(UPSERT_VEHICLE_SQL)
            .and_then(|mut statement| {
                statement.execute((
                    vehicle.reg_number.as_str(),
                    vehicle.name.as_str(),
                    vehicle.kind.as_str(),
                    vehicle.fuel_usage,
                    vehicle.mileage,
                    vehicle.driver_id,
                    vehicle.maintenance_history.as_str(),
                    vehicle.last_service_date.as_str(),
                ))
            })
            .map(|_| ())
            .map_err(query_error("upsert vehicle"))
    }

    fn load_all_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error> {
        let connection = self.connection()?;
        let mut statement = connection
            .prepare_cached(SELECT_VEHICLES_SQL)
            .map_err(query_error("prepare vehicle query"))?;
        let vehicles = statement
            .query_map([], vehicle_from_row)
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(query_error("load vehicles"))?;
        Ok(vehicles)
    }
}
