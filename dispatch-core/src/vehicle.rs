//! Fleet vehicles.
//!
//! The registry never reads vehicles; they share the persistence gateway
//! with drivers so callers can store and reload the fleet.

use crate::DriverId;

/// A vehicle in the fleet, keyed by registration number.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// Registration plate; primary key in persistence.
    pub reg_number: String,
    /// Display name.
    pub name: String,
    /// Vehicle category, e.g. `"Truck"` or `"Van"`.
    pub kind: String,
    /// Fuel consumption in litres per 100 km.
    pub fuel_usage: f64,
    /// Odometer reading in kilometres.
    pub mileage: u32,
    /// Driver currently attached to the vehicle, if any.
    pub driver_id: Option<DriverId>,
    /// Free-form maintenance log.
    pub maintenance_history: String,
    /// Date of the most recent service as recorded by the operator.
    pub last_service_date: String,
}
