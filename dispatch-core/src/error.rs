//! Errors raised by registry operations.
//!
//! Every variant is recoverable: callers may retry, pick another driver or
//! ignore the failure. Persistence problems never surface here; they are
//! reported through [`Persistence::Failed`](crate::Persistence::Failed).

use thiserror::Error;

use crate::DriverId;

/// Errors returned by [`DispatchRegistry`](crate::DispatchRegistry) and
/// [`SharedRegistry`](crate::SharedRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The availability pool already holds its maximum number of drivers.
    #[error("availability pool is full ({capacity} drivers)")]
    CapacityExceeded {
        /// Configured pool bound.
        capacity: usize,
    },
    /// The operation referenced a driver id that was never registered.
    #[error("driver {id} is not registered")]
    UnknownDriver {
        /// Requested driver id.
        id: DriverId,
    },
    /// A different driver is already registered under this id.
    #[error("driver id {id} is already registered")]
    DuplicateId {
        /// Conflicting driver id.
        id: DriverId,
    },
    /// Another thread panicked while holding the registry lock.
    #[error("registry lock was poisoned by a panicking thread")]
    Poisoned,
}
