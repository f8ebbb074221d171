//! Routes recorded against drivers.
//!
//! A route is a plain status label plus an estimated duration. Routes are
//! appended to a driver's history and never edited afterwards.

use crate::text::eq_ignore_case;

/// Status label that marks a route as finished.
pub const COMPLETED_STATUS: &str = "Completed";

/// A route dispatched to a driver.
///
/// # Examples
/// ```
/// use dispatch_core::Route;
///
/// let route = Route::new("completed", 30);
/// assert!(route.is_completed());
/// assert_eq!(route.estimated_time, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Free-form status label such as `"Pending"` or `"Completed"`.
    pub status: String,
    /// Estimated duration in minutes.
    pub estimated_time: u32,
}

impl Route {
    /// Construct a route with the given status and estimated minutes.
    pub fn new(status: impl Into<String>, estimated_time: u32) -> Self {
        Self {
            status: status.into(),
            estimated_time,
        }
    }

    /// Construct a route already marked as completed.
    ///
    /// # Examples
    /// ```
    /// use dispatch_core::Route;
    ///
    /// assert!(Route::completed(45).is_completed());
    /// ```
    pub fn completed(estimated_time: u32) -> Self {
        Self::new(COMPLETED_STATUS, estimated_time)
    }

    /// Report whether the status equals `"Completed"` ignoring case.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        eq_ignore_case(&self.status, COMPLETED_STATUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Completed", true)]
    #[case("COMPLETED", true)]
    #[case("completed", true)]
    #[case("Complete", false)]
    #[case("Pending", false)]
    #[case("", false)]
    #[case("CompletedX", false)]
    fn completion_ignores_case(#[case] status: &str, #[case] expected: bool) {
        assert_eq!(Route::new(status, 10).is_completed(), expected);
    }
}
