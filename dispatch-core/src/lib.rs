//! Core dispatch registry for a small delivery fleet.
//!
//! The crate tracks drivers, keeps the ones available for work in an
//! experience-ordered pool, hands them out on request and records the
//! routes they are given:
//!
//! - [`DispatchRegistry`] owns the pool, an id-index over every registered
//!   driver and an append-only route history per driver.
//! - [`AssociativeStore`] is the hash-backed index used for id lookups.
//! - [`PersistenceGateway`] is the write-through boundary to durable
//!   storage; [`SqliteGateway`] implements it when the `store-sqlite`
//!   feature is enabled.
//! - [`SharedRegistry`] serialises registry access across threads.
//!
//! # Examples
//!
//! ```
//! use dispatch_core::{DispatchRegistry, Driver, Performance, Route};
//! use dispatch_core::test_support::MemoryGateway;
//!
//! # fn main() -> Result<(), dispatch_core::RegistryError> {
//! let mut registry = DispatchRegistry::new(MemoryGateway::default());
//! registry.register(Driver::new(1, "Ama", 5, 2.0))?;
//! registry.register(Driver::new(2, "Kojo", 8, 1.0))?;
//! registry.register(Driver::new(3, "Efua", 5, 4.0))?;
//!
//! let pool: Vec<u32> = registry.list_pool().iter().map(|d| d.id).collect();
//! assert_eq!(pool, vec![2, 1, 3]);
//!
//! registry.append_route(1, Route::completed(30))?;
//! registry.append_route(1, Route::new("Pending", 20))?;
//! let Performance::Summary(summary) = registry.summarize(1) else {
//!     panic!("driver 1 has routes");
//! };
//! assert_eq!(summary.total_time, 50);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod driver;
mod error;
mod gateway;
mod index;
mod performance;
mod pool;
mod registry;
mod route;
mod shared;
mod text;
mod vehicle;

#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub mod store;
pub mod test_support;

#[cfg(feature = "serde")]
pub use config::ConfigError;
pub use config::RegistryConfig;
pub use driver::{Driver, DriverId};
pub use error::RegistryError;
pub use gateway::PersistenceGateway;
pub use index::AssociativeStore;
pub use performance::{Performance, PerformanceSummary};
pub use pool::{AvailabilityPool, DEFAULT_POOL_CAPACITY, PoolCapacity};
pub use registry::{DispatchRegistry, Persistence, Registration};
pub use route::{COMPLETED_STATUS, Route};
pub use shared::SharedRegistry;
pub use vehicle::Vehicle;

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteGateway, SqliteGatewayError};
