//! Per-driver performance summaries derived from route history.

use std::fmt;

use crate::text::OneDecimal;
use crate::{DriverId, Route};

/// Aggregates over a driver's recorded routes.
///
/// # Examples
/// ```
/// use dispatch_core::{PerformanceSummary, Route};
///
/// let routes = [Route::completed(30), Route::new("Pending", 20)];
/// let summary = PerformanceSummary::from_routes(1, &routes).expect("routes recorded");
/// assert_eq!(summary.total, 2);
/// assert_eq!(summary.completed, 1);
/// assert_eq!(summary.total_time, 50);
/// assert!((summary.completion_rate - 50.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerformanceSummary {
    /// Driver the summary describes.
    pub driver_id: DriverId,
    /// Number of recorded routes.
    pub total: usize,
    /// Routes whose status is `"Completed"`, ignoring case.
    pub completed: usize,
    /// `100 * completed / total`.
    pub completion_rate: f64,
    /// Sum of estimated minutes across all routes.
    pub total_time: u64,
}

impl PerformanceSummary {
    /// Summarise `routes`, or return `None` when there are none.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "completion rate is a percentage of recorded routes"
    )]
    #[expect(
        clippy::cast_precision_loss,
        reason = "route counts stay far below 2^52"
    )]
    pub fn from_routes(driver_id: DriverId, routes: &[Route]) -> Option<Self> {
        if routes.is_empty() {
            return None;
        }
        let total = routes.len();
        let completed = routes.iter().filter(|route| route.is_completed()).count();
        let total_time = routes
            .iter()
            .map(|route| u64::from(route.estimated_time))
            .sum();
        let completion_rate = 100.0 * completed as f64 / total as f64;
        Some(Self {
            driver_id,
            total,
            completed,
            completion_rate,
            total_time,
        })
    }
}

/// Outcome of [`DispatchRegistry::summarize`](crate::DispatchRegistry::summarize).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Performance {
    /// The driver is unknown or has no recorded routes.
    NoRoutes,
    /// Aggregates over at least one recorded route.
    Summary(PerformanceSummary),
}

impl Performance {
    /// Return the summary when routes were recorded.
    #[must_use]
    pub const fn summary(&self) -> Option<&PerformanceSummary> {
        match self {
            Self::NoRoutes => None,
            Self::Summary(summary) => Some(summary),
        }
    }
}

impl From<Option<PerformanceSummary>> for Performance {
    fn from(summary: Option<PerformanceSummary>) -> Self {
        summary.map_or(Self::NoRoutes, Self::Summary)
    }
}

impl fmt::Display for Performance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRoutes => f.write_str("No routes assigned to this driver."),
            Self::Summary(summary) => write!(
                f,
                "Driver ID {} - Total Routes: {} | Completed: {} | Completion Rate: {}% | Total Time: {} mins",
                summary.driver_id,
                summary.total,
                summary.completed,
                OneDecimal(summary.completion_rate),
                summary.total_time
            ),
        }
    }
}
