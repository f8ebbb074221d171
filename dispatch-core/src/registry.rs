//! Driver registry and dispatch operations.
//!
//! [`DispatchRegistry`] owns three pieces of state:
//! - the [`AvailabilityPool`] of drivers eligible for assignment;
//! - an id-index over every registered driver, pooled or not;
//! - an append-only route history per driver.
//!
//! Registration validates first and mutates second, so a rejected driver
//! leaves every structure untouched. Persistence runs last and only
//! reports failures.

use log::{debug, info, warn};

use crate::{
    AssociativeStore, AvailabilityPool, Driver, DriverId, Performance, PerformanceSummary,
    PersistenceGateway, PoolCapacity, RegistryConfig, RegistryError, Route,
};

/// Result of a write-through to the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// The driver was written to the gateway.
    Saved,
    /// The gateway already held a record with this id; nothing was written.
    AlreadyStored,
    /// The gateway failed; the in-memory registration still stands.
    Failed {
        /// Rendered gateway error.
        reason: String,
    },
}

/// Outcome of a registration attempt that did not raise an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The driver joined the pool and the id-index.
    Added {
        /// Id the driver was registered under.
        id: DriverId,
        /// What happened when writing through to persistence.
        persistence: Persistence,
    },
    /// Another driver already uses this name, ignoring case. Nothing changed.
    DuplicateName {
        /// Id of the driver holding the name.
        existing: DriverId,
    },
}

impl Registration {
    /// Report whether the driver was added.
    #[must_use]
    pub const fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// In-memory registry of drivers, their availability and route history.
///
/// # Examples
/// ```
/// use dispatch_core::{DispatchRegistry, Driver, Route};
/// use dispatch_core::test_support::MemoryGateway;
///
/// # fn main() -> Result<(), dispatch_core::RegistryError> {
/// let mut registry = DispatchRegistry::new(MemoryGateway::default());
/// registry.register(Driver::new(1, "Ama", 5, 1.2))?;
/// registry.register(Driver::new(2, "Kojo", 8, 0.4))?;
///
/// let assigned = registry.assign().expect("pool is not empty");
/// assert_eq!(assigned.id, 1);
///
/// registry.append_route(1, Route::completed(30))?;
/// assert_eq!(registry.summarize(1).summary().map(|s| s.total), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct DispatchRegistry<G> {
    pool: AvailabilityPool,
    drivers: AssociativeStore<DriverId, Driver>,
    histories: AssociativeStore<DriverId, Vec<Route>>,
    gateway: G,
}

impl<G> DispatchRegistry<G>
where
    G: PersistenceGateway,
{
    /// Create an empty registry with the default configuration.
    pub fn new(gateway: G) -> Self {
        Self::with_config(gateway, RegistryConfig::default())
    }

    /// Create an empty registry with explicit configuration.
    pub fn with_config(gateway: G, config: RegistryConfig) -> Self {
        Self {
            pool: AvailabilityPool::with_capacity(config.pool_capacity),
            drivers: AssociativeStore::new(),
            histories: AssociativeStore::new(),
            gateway,
        }
    }

    /// Register a driver and make it available for assignment.
    ///
    /// A name already present, ignoring case, yields
    /// [`Registration::DuplicateName`] and leaves the registry unchanged.
    /// Once indexed, the driver is written through to the gateway when
    /// the gateway does not already hold it; gateway failures are logged
    /// and reported in [`Persistence::Failed`].
    ///
    /// # Errors
    /// - [`RegistryError::DuplicateId`] when the id is already indexed.
    /// - [`RegistryError::CapacityExceeded`] when the pool is full.
    pub fn register(&mut self, driver: Driver) -> Result<Registration, RegistryError> {
        if let Some(existing) = self
            .drivers
            .values()
            .find(|known| known.name_matches(&driver.name))
        {
            warn!(
                "driver \"{}\" already exists as id {}; skipping",
                driver.name, existing.id
            );
            return Ok(Registration::DuplicateName {
                existing: existing.id,
            });
        }
        if self.drivers.contains_key(&driver.id) {
            return Err(RegistryError::DuplicateId { id: driver.id });
        }

        self.pool.insert(driver.clone())?;
        let id = driver.id;
        self.histories.put(id, Vec::new());
        let persistence = self.persist(&driver);
        self.drivers.put(id, driver);

        info!("driver {id} added to the availability pool");
        Ok(Registration::Added { id, persistence })
    }

    /// Register a driver under the next free id.
    ///
    /// # Errors
    /// Propagates the errors of [`DispatchRegistry::register`].
    pub fn register_new(
        &mut self,
        name: impl Into<String>,
        experience_years: u32,
        distance_from_pickup: f64,
    ) -> Result<Registration, RegistryError> {
        let id = self.next_driver_id();
        self.register(Driver::new(id, name, experience_years, distance_from_pickup))
    }

    /// One past the highest registered id, starting at 1.
    #[must_use]
    pub fn next_driver_id(&self) -> DriverId {
        self.drivers
            .keys()
            .max()
            .map_or(1, |highest| highest.saturating_add(1))
    }

    /// Take the driver at the tail of the pool.
    ///
    /// The tail holds the least experienced pooled driver; among equals it
    /// is the most recently registered one still pooled. The driver stays
    /// in the id-index with its history intact.
    pub fn assign(&mut self) -> Option<Driver> {
        let driver = self.pool.pop_tail()?;
        debug!(
            "assigned driver {} ({} drivers remain available)",
            driver.id,
            self.pool.len()
        );
        Some(driver)
    }

    /// Return the driver registered under `id`.
    #[must_use]
    pub fn lookup(&self, id: DriverId) -> Option<&Driver> {
        self.drivers.get(&id)
    }

    /// Copy the pool in assignment-priority order.
    #[must_use]
    pub fn list_pool(&self) -> Vec<Driver> {
        self.pool.snapshot()
    }

    /// Copy every registered driver in unspecified order.
    #[must_use]
    pub fn list_all(&self) -> Vec<Driver> {
        self.drivers.values().cloned().collect()
    }

    /// Number of drivers currently available for assignment.
    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    /// Number of registered drivers, pooled or assigned.
    #[must_use]
    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }

    /// Capacity policy applied to the pool.
    #[must_use]
    pub const fn pool_capacity(&self) -> PoolCapacity {
        self.pool.capacity()
    }

    /// Routes recorded against `id`, oldest first.
    #[must_use]
    pub fn routes(&self, id: DriverId) -> Option<&[Route]> {
        self.histories.get(&id).map(Vec::as_slice)
    }

    /// Append a route to a driver's history.
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownDriver`] when `id` was never
    /// registered.
    pub fn append_route(&mut self, id: DriverId, route: Route) -> Result<(), RegistryError> {
        let history = self
            .histories
            .get_mut(&id)
            .ok_or(RegistryError::UnknownDriver { id })?;
        history.push(route);
        Ok(())
    }

    /// Summarise a driver's recorded routes.
    ///
    /// Unknown ids and empty histories both yield [`Performance::NoRoutes`].
    #[must_use]
    pub fn summarize(&self, id: DriverId) -> Performance {
        self.routes(id)
            .and_then(|routes| PerformanceSummary::from_routes(id, routes))
            .into()
    }

    /// Register every persisted driver not yet known to the registry.
    ///
    /// Drivers are registered in the order the gateway returns them, and
    /// the SQLite gateway returns them by id. Drivers sharing an experience
    /// level therefore rejoin the pool in id order rather than in their
    /// original registration order, which changes who `assign` picks among
    /// them when ids were not handed out in registration order.
    ///
    /// Drivers rejected by registration (duplicate name or id, full pool)
    /// are logged and skipped. Returns the number of drivers added.
    ///
    /// # Errors
    /// Returns the gateway error when stored drivers cannot be loaded.
    pub fn hydrate(&mut self) -> Result<usize, G::Error> {
        let stored = self.gateway.load_all_drivers()?;
        let mut added = 0_usize;
        for driver in stored {
            let id = driver.id;
            match self.register(driver) {
                Ok(registration) if registration.is_added() => added += 1,
                Ok(_) => {}
                Err(error) => warn!("skipping stored driver {id}: {error}"),
            }
        }
        Ok(added)
    }

    /// Borrow the persistence gateway.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    fn persist(&self, driver: &Driver) -> Persistence {
        let id = driver.id;
        let written = match self.gateway.driver_exists(id) {
            Ok(true) => return Persistence::AlreadyStored,
            Ok(false) => self.gateway.save_driver(driver),
            Err(error) => Err(error),
        };
        match written {
            Ok(()) => Persistence::Saved,
            Err(error) => {
                warn!("failed to persist driver {id}: {error}");
                Persistence::Failed {
                    reason: error.to_string(),
                }
            }
        }
    }
}
