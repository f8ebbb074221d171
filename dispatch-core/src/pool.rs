//! Experience-ordered pool of drivers awaiting assignment.
//!
//! The pool keeps drivers sorted by `experience_years`, highest first.
//! Drivers with equal experience stay in insertion order, so the most
//! recently added one sorts last among its peers. Assignment takes from
//! the tail.

use std::num::NonZeroUsize;

use crate::{Driver, RegistryError};

/// Capacity bound used when no configuration is supplied.
pub const DEFAULT_POOL_CAPACITY: usize = 100;

/// Upper bound on the number of drivers held by an [`AvailabilityPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PoolCapacity {
    /// Reject insertions once the pool holds this many drivers.
    Bounded(NonZeroUsize),
    /// Grow without limit.
    Unbounded,
}

impl PoolCapacity {
    /// Return the bound, or `None` when unbounded.
    #[must_use]
    pub const fn limit(self) -> Option<usize> {
        match self {
            Self::Bounded(limit) => Some(limit.get()),
            Self::Unbounded => None,
        }
    }
}

impl Default for PoolCapacity {
    fn default() -> Self {
        NonZeroUsize::new(DEFAULT_POOL_CAPACITY).map_or(Self::Unbounded, Self::Bounded)
    }
}

/// Drivers eligible for assignment, sorted by experience descending.
///
/// # Examples
/// ```
/// use dispatch_core::{AvailabilityPool, Driver};
///
/// # fn main() -> Result<(), dispatch_core::RegistryError> {
/// let mut pool = AvailabilityPool::default();
/// pool.insert(Driver::new(1, "Ama", 5, 1.0))?;
/// pool.insert(Driver::new(2, "Kojo", 8, 3.0))?;
/// pool.insert(Driver::new(3, "Efua", 5, 0.5))?;
///
/// let order: Vec<u32> = pool.iter().map(|d| d.id).collect();
/// assert_eq!(order, vec![2, 1, 3]);
/// assert_eq!(pool.pop_tail().map(|d| d.id), Some(3));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct AvailabilityPool {
    drivers: Vec<Driver>,
    capacity: PoolCapacity,
}

impl AvailabilityPool {
    /// Create an empty pool with the given capacity policy.
    #[must_use]
    pub const fn with_capacity(capacity: PoolCapacity) -> Self {
        Self {
            drivers: Vec::new(),
            capacity,
        }
    }

    /// Insert a driver at its sorted position.
    ///
    /// The driver lands after every entry with equal or greater experience,
    /// matching a tail-shifting insertion sort that stops at the first
    /// entry whose experience is not strictly lower.
    ///
    /// # Errors
    /// Returns [`RegistryError::CapacityExceeded`] when the pool is full.
    pub fn insert(&mut self, driver: Driver) -> Result<(), RegistryError> {
        if let Some(capacity) = self.capacity.limit()
            && self.drivers.len() >= capacity
        {
            return Err(RegistryError::CapacityExceeded { capacity });
        }
        let position = self
            .drivers
            .partition_point(|existing| existing.experience_years >= driver.experience_years);
        self.drivers.insert(position, driver);
        Ok(())
    }

    /// Remove and return the lowest-priority driver.
    pub fn pop_tail(&mut self) -> Option<Driver> {
        self.drivers.pop()
    }

    /// Copy the pool contents in sorted order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Driver> {
        self.drivers.clone()
    }

    /// Iterate over pooled drivers in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Driver> + '_ {
        self.drivers.iter()
    }

    /// Number of pooled drivers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Report whether the pool is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// The configured capacity policy.
    #[must_use]
    pub const fn capacity(&self) -> PoolCapacity {
        self.capacity
    }

    /// Report whether another insertion would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.capacity
            .limit()
            .is_some_and(|capacity| self.drivers.len() >= capacity)
    }
}
