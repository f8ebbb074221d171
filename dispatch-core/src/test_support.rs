//! In-memory `PersistenceGateway` implementations used by unit and
//! behaviour tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::{Driver, DriverId, PersistenceGateway, Vehicle};

/// In-memory gateway that upserts into ordered maps.
///
/// The gateway never fails and is intended for tests and examples.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    drivers: RefCell<BTreeMap<DriverId, Driver>>,
    vehicles: RefCell<BTreeMap<String, Vehicle>>,
}

impl MemoryGateway {
    /// Create a gateway pre-populated with drivers.
    pub fn with_drivers<I>(drivers: I) -> Self
    where
        I: IntoIterator<Item = Driver>,
    {
        let stored = drivers.into_iter().map(|driver| (driver.id, driver)).collect();
        Self {
            drivers: RefCell::new(stored),
            vehicles: RefCell::default(),
        }
    }

    /// Report whether a driver with `id` is stored.
    #[must_use]
    pub fn contains(&self, id: DriverId) -> bool {
        self.drivers.borrow().contains_key(&id)
    }

    /// Return a copy of the stored driver with `id`.
    #[must_use]
    pub fn driver(&self, id: DriverId) -> Option<Driver> {
        self.drivers.borrow().get(&id).cloned()
    }

    /// Number of stored drivers.
    #[must_use]
    pub fn driver_count(&self) -> usize {
        self.drivers.borrow().len()
    }
}

impl PersistenceGateway for MemoryGateway {
    type Error = Infallible;

    fn driver_exists(&self, id: DriverId) -> Result<bool, Self::Error> {
        Ok(self.contains(id))
    }

    fn save_driver(&self, driver: &Driver) -> Result<(), Self::Error> {
        self.drivers.borrow_mut().insert(driver.id, driver.clone());
        Ok(())
    }

    fn load_all_drivers(&self) -> Result<Vec<Driver>, Self::Error> {
        Ok(self.drivers.borrow().values().cloned().collect())
    }

    fn save_vehicle(&self, vehicle: &Vehicle) -> Result<(), Self::Error> {
        self.vehicles
            .borrow_mut()
            .insert(vehicle.reg_number.clone(), vehicle.clone());
        Ok(())
    }

    fn load_all_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error> {
        Ok(self.vehicles.borrow().values().cloned().collect())
    }
}

/// Error returned by every [`FailingGateway`] call.
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("persistence gateway is unavailable")]
pub struct GatewayUnavailable;

/// Gateway whose every call fails, for exercising persistence fallbacks.
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingGateway;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
impl PersistenceGateway for FailingGateway {
    type Error = GatewayUnavailable;

    fn driver_exists(&self, _id: DriverId) -> Result<bool, Self::Error> {
        Err(GatewayUnavailable)
    }

    fn save_driver(&self, _driver: &Driver) -> Result<(), Self::Error> {
        Err(GatewayUnavailable)
    }

    fn load_all_drivers(&self) -> Result<Vec<Driver>, Self::Error> {
        Err(GatewayUnavailable)
    }

    fn save_vehicle(&self, _vehicle: &Vehicle) -> Result<(), Self::Error> {
        Err(GatewayUnavailable)
    }

    fn load_all_vehicles(&self) -> Result<Vec<Vehicle>, Self::Error> {
        Err(GatewayUnavailable)
    }
}
