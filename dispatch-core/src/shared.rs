//! Thread-safe handle around a [`DispatchRegistry`].
//!
//! Every call takes the same lock, so registrations and assignments are
//! serialised: a concurrent `assign` never sees a pool mid-insertion.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    DispatchRegistry, Driver, DriverId, Performance, PersistenceGateway, Registration,
    RegistryError, Route,
};

/// Cloneable, lock-guarded registry handle.
///
/// # Examples
/// ```
/// use std::thread;
/// use dispatch_core::{DispatchRegistry, Driver, SharedRegistry};
/// use dispatch_core::test_support::MemoryGateway;
///
/// # fn main() -> Result<(), dispatch_core::RegistryError> {
/// let shared = SharedRegistry::new(DispatchRegistry::new(MemoryGateway::default()));
/// let worker = shared.clone();
/// thread::spawn(move || worker.register(Driver::new(1, "Ama", 4, 1.0)))
///     .join()
///     .expect("worker thread")?;
/// assert_eq!(shared.assign()?.map(|d| d.id), Some(1));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SharedRegistry<G> {
    inner: Arc<Mutex<DispatchRegistry<G>>>,
}

impl<G> Clone for SharedRegistry<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G> SharedRegistry<G>
where
    G: PersistenceGateway,
{
    /// Wrap an existing registry.
    pub fn new(registry: DispatchRegistry<G>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(registry)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DispatchRegistry<G>>, RegistryError> {
        self.inner.lock().map_err(|_| RegistryError::Poisoned)
    }

    /// Run `operation` while holding the registry lock.
    ///
    /// Operations that borrow from the registry or surface gateway errors,
    /// such as [`DispatchRegistry::hydrate`], are reached through here.
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn with_registry<T>(
        &self,
        operation: impl FnOnce(&mut DispatchRegistry<G>) -> T,
    ) -> Result<T, RegistryError> {
        let mut registry = self.lock()?;
        Ok(operation(&mut registry))
    }

    /// See [`DispatchRegistry::register`].
    ///
    /// # Errors
    /// Propagates registration errors and lock poisoning.
    pub fn register(&self, driver: Driver) -> Result<Registration, RegistryError> {
        self.lock()?.register(driver)
    }

    /// See [`DispatchRegistry::register_new`].
    ///
    /// The id is chosen under the same lock as the registration, so
    /// concurrent callers never race for one id.
    ///
    /// # Errors
    /// Propagates registration errors and lock poisoning.
    pub fn register_new(
        &self,
        name: impl Into<String>,
        experience_years: u32,
        distance_from_pickup: f64,
    ) -> Result<Registration, RegistryError> {
        self.lock()?
            .register_new(name, experience_years, distance_from_pickup)
    }

    /// See [`DispatchRegistry::assign`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn assign(&self) -> Result<Option<Driver>, RegistryError> {
        Ok(self.lock()?.assign())
    }

    /// Copy of the driver registered under `id`.
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn lookup(&self, id: DriverId) -> Result<Option<Driver>, RegistryError> {
        Ok(self.lock()?.lookup(id).cloned())
    }

    /// See [`DispatchRegistry::list_pool`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn list_pool(&self) -> Result<Vec<Driver>, RegistryError> {
        Ok(self.lock()?.list_pool())
    }

    /// See [`DispatchRegistry::list_all`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn list_all(&self) -> Result<Vec<Driver>, RegistryError> {
        Ok(self.lock()?.list_all())
    }

    /// Copy of the routes recorded against `id`.
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn routes(&self, id: DriverId) -> Result<Option<Vec<Route>>, RegistryError> {
        Ok(self.lock()?.routes(id).map(<[Route]>::to_vec))
    }

    /// See [`DispatchRegistry::append_route`].
    ///
    /// # Errors
    /// Propagates unknown-driver errors and lock poisoning.
    pub fn append_route(&self, id: DriverId, route: Route) -> Result<(), RegistryError> {
        self.lock()?.append_route(id, route)
    }

    /// See [`DispatchRegistry::summarize`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn summarize(&self, id: DriverId) -> Result<Performance, RegistryError> {
        Ok(self.lock()?.summarize(id))
    }

    /// See [`DispatchRegistry::pool_len`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn pool_len(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.pool_len())
    }

    /// See [`DispatchRegistry::driver_count`].
    ///
    /// # Errors
    /// Returns [`RegistryError::Poisoned`] when the lock is poisoned.
    pub fn driver_count(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.driver_count())
    }
}
