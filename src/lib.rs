//! Facade crate for the Adom dispatch registry.
//!
//! This crate re-exports the core registry types and exposes the optional
//! SQLite persistence gateway behind a feature flag.

#![forbid(unsafe_code)]

pub use dispatch_core::{
    AssociativeStore, AvailabilityPool, COMPLETED_STATUS, DEFAULT_POOL_CAPACITY, DispatchRegistry,
    Driver, DriverId, Performance, PerformanceSummary, Persistence, PersistenceGateway,
    PoolCapacity, Registration, RegistryConfig, RegistryError, Route, SharedRegistry, Vehicle,
};

#[cfg(feature = "serde")]
pub use dispatch_core::ConfigError;

#[cfg(feature = "store-sqlite")]
pub use dispatch_core::{SqliteGateway, SqliteGatewayError};

#[cfg(feature = "test-support")]
pub use dispatch_core::test_support;
