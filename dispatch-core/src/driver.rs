//! Delivery drivers known to the dispatch registry.

use std::fmt;

use crate::text::{OneDecimal, eq_ignore_case};

/// Identifier assigned to a driver by the caller or by the registry.
pub type DriverId = u32;

/// A delivery driver that can be dispatched onto routes.
///
/// The record is immutable once registered. Route history lives in the
/// registry, not on the driver, and pool membership rather than
/// [`Driver::available`] decides whether a driver can be assigned.
///
/// # Examples
/// ```
/// use dispatch_core::Driver;
///
/// let driver = Driver::new(1, "Ama Mensah", 5, 2.5);
/// assert!(driver.available);
/// assert_eq!(
///     driver.to_string(),
///     "1: Ama Mensah (5 yrs exp) | 2.5 km away | Available"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Driver {
    /// Unique identifier within the registry.
    pub id: DriverId,
    /// Display name, unique across the registry ignoring case.
    pub name: String,
    /// Years of driving experience. Orders the availability pool.
    pub experience_years: u32,
    /// Distance to the pickup point in kilometres.
    pub distance_from_pickup: f64,
    /// Informational availability flag mirrored into persistence.
    pub available: bool,
}

impl Driver {
    /// Construct an available driver.
    pub fn new(
        id: DriverId,
        name: impl Into<String>,
        experience_years: u32,
        distance_from_pickup: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            experience_years,
            distance_from_pickup,
            available: true,
        }
    }

    /// Report whether `name` collides with this driver's name.
    ///
    /// The comparison folds case character by character, so `"kofi"`
    /// matches `"Kofi"`.
    #[must_use]
    pub fn name_matches(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name)
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.available {
            "Available"
        } else {
            "Assigned"
        };
        write!(
            f,
            "{}: {} ({} yrs exp) | {} km away | {status}",
            self.id,
            self.name,
            self.experience_years,
            OneDecimal(self.distance_from_pickup)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Kofi", true)]
    #[case("KOFI", true)]
    #[case("kofi", true)]
    #[case("Kofi ", false)]
    #[case("Kwame", false)]
    #[case("kofİ", false)]
    fn name_matches_ignores_case(#[case] candidate: &str, #[case] expected: bool) {
        let driver = Driver::new(1, "Kofi", 3, 1.0);
        assert_eq!(driver.name_matches(candidate), expected);
    }

    #[rstest]
    fn display_reports_assigned_drivers() {
        let mut driver = Driver::new(7, "Esi", 12, 0.04);
        driver.available = false;
        assert_eq!(
            driver.to_string(),
            "7: Esi (12 yrs exp) | 0.0 km away | Assigned"
        );
    }

    #[rstest]
    #[case(0.25, "0.3")]
    #[case(1.05, "1.1")]
    #[case(2.5, "2.5")]
    fn display_rounds_distance_half_up(#[case] distance: f64, #[case] expected: &str) {
        let driver = Driver::new(1, "Ama", 5, distance);
        assert_eq!(
            driver.to_string(),
            format!("1: Ama (5 yrs exp) | {expected} km away | Available")
        );
    }

    #[rstest]
    fn name_matches_folds_final_sigma() {
        let driver = Driver::new(2, "ΟΔΟΣ", 1, 0.0);
        assert!(driver.name_matches("οδοσ"));
    }
}
