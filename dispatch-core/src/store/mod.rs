//! Durable persistence for driver and vehicle records.
//!
//! [`SqliteGateway`] implements [`PersistenceGateway`](crate::PersistenceGateway)
//! on top of a SQLite database. The schema mirrors the relational layout the
//! dispatch service has always used:
//!
//! - `drivers(id PK, name, experience_years, distance_from_pickup, available)`
//! - `vehicles(reg_number PK, name, type, fuel_usage, mileage, driver_id,
//!   maintenance_history, last_service_date)`
//! - `deliveries(package_id PK, ...)`, created but not read by the registry.

mod schema;
mod sqlite;

pub use schema::{SCHEMA_VERSION, initialise_schema};
pub use sqlite::{SqliteGateway, SqliteGatewayError};
