//! Durable storage for drivers and vehicles.
//!
//! The registry writes through a [`PersistenceGateway`] when drivers are
//! registered but never reads from it during a session; the in-memory
//! indexes stay authoritative. Failures are advisory and do not roll back
//! registry state.

use crate::{Driver, DriverId, Vehicle};

/// Upsert-style persistence for driver and vehicle records.
///
/// Methods take `&self` so one gateway can sit behind a shared registry;
/// implementations provide their own interior synchronisation.
///
/// # Examples
///
/// ```rust
/// use std::cell::RefCell;
/// use std::convert::Infallible;
/// use dispatch_core::{Driver, DriverId, PersistenceGateway, Vehicle};
///
/// #[derive(Default)]
/// struct VecGateway {
///     drivers: RefCell<Vec<Driver>>,
/// }
///
/// impl PersistenceGateway for VecGateway {
///     type Error = Infallible;
///
///     fn driver_exists(&self, id: DriverId) -> Result<bool, Infallible> {
///         Ok(self.drivers.borrow().iter().any(|d| d.id == id))
///     }
///
///     fn save_driver(&self, driver: &Driver) -> Result<(), Infallible> {
///         let mut drivers = self.drivers.borrow_mut();
///         drivers.retain(|d| d.id != driver.id);
///         drivers.push(driver.clone());
///         Ok(())
///     }
///
///     fn load_all_drivers(&self) -> Result<Vec<Driver>, Infallible> {
///         Ok(self.drivers.borrow().clone())
///     }
///
///     fn save_vehicle(&self, _vehicle: &Vehicle) -> Result<(), Infallible> {
///         Ok(())
///     }
///
///     fn load_all_vehicles(&self) -> Result<Vec<Vehicle>, Infallible> {
///         Ok(Vec::new())
///     }
/// }
///
/// let gateway = VecGateway::default();
/// gateway.save_driver(&Driver::new(1, "Ama", 5, 1.0)).unwrap();
/// assert!(gateway.driver_exists(1).unwrap());
/// ```
pub trait PersistenceGateway {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Report whether a driver record with `id` is stored.
    ///
    /// # Errors
    /// Returns the backend error when the store cannot be queried.
    fn driver_exists(&self, id: DriverId) -> Result<bool, Self::Error>;

    /// Insert the driver or update the record sharing its id.
    ///
    /// # Errors
    /// Returns the backend error when the write fails.
    fn save_driver(&self, driver: &Driver) -> Result<(), Self::Error>;

    /// Load every stored driver, ordered by id.
    ///
    /// # Errors
    /// Returns the backend error when the store cannot be read.
    fn load_all_drivers(&self) -> Result<Vec<Driver>, Self::Error>;

    /// Insert the vehicle or update the record sharing its registration.
    ///
    /// # Errors
    /// Returns the backend error when the write fails.
    fn save_vehicle(&self, vehicle: &Vehicle) -> Result<(), Self::Error>;

    /// Load every stored vehicle.
    ///
    /// # Errors
    /// Returns the backend error when the store cannot be read.
    fn load_all_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error>;
}

impl<G> PersistenceGateway for &G
where
    G: PersistenceGateway + ?Sized,
{
    type Error = G::Error;

    fn driver_exists(&self, id: DriverId) -> Result<bool, Self::Error> {
        (**self).driver_exists(id)
    }

    fn save_driver(&self, driver: &Driver) -> Result<(), Self::Error> {
        (**self).save_driver(driver)
    }

    fn load_all_drivers(&self) -> Result<Vec<Driver>, Self::Error> {
        (**self).load_all_drivers()
    }

    fn save_vehicle(&self, vehicle: &Vehicle) -> Result<(), Self::Error> {
        (**self).save_vehicle(vehicle)
    }

    fn load_all_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error> {
        (**self).load_all_vehicles()
    }
}
