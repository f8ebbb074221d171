//! Registry configuration.

use crate::PoolCapacity;

/// Tunables applied when constructing a registry.
///
/// Missing fields in serialised configuration fall back to
/// [`RegistryConfig::default`].
///
/// # Examples
/// ```
/// use dispatch_core::{PoolCapacity, RegistryConfig};
///
/// let config = RegistryConfig::default();
/// assert_eq!(config.pool_capacity.limit(), Some(100));
/// assert_eq!(RegistryConfig::unbounded().pool_capacity, PoolCapacity::Unbounded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RegistryConfig {
    /// Bound on the availability pool.
    pub pool_capacity: PoolCapacity,
}

impl RegistryConfig {
    /// Configuration without a pool bound.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            pool_capacity: PoolCapacity::Unbounded,
        }
    }

    /// Parse configuration from a JSON document.
    ///
    /// # Examples
    /// ```
    /// use dispatch_core::RegistryConfig;
    ///
    /// let config = RegistryConfig::from_json_str(r#"{ "pool_capacity": { "bounded": 12 } }"#)
    ///     .expect("valid configuration");
    /// assert_eq!(config.pool_capacity.limit(), Some(12));
    ///
    /// let defaults = RegistryConfig::from_json_str("{}").expect("empty object");
    /// assert_eq!(defaults, RegistryConfig::default());
    /// ```
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when the document is not valid JSON
    /// or contains unknown fields.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })
    }
}

/// Errors raised while loading [`RegistryConfig`].
#[cfg(feature = "serde")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration document could not be decoded.
    #[error("failed to parse registry configuration")]
    Parse {
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#"{ "pool_capacity": "unbounded" }"#, None)]
    #[case(r#"{ "pool_capacity": { "bounded": 3 } }"#, Some(3))]
    #[case("{}", Some(100))]
    fn parses_pool_capacity(#[case] json: &str, #[case] expected: Option<usize>) {
        let config = RegistryConfig::from_json_str(json).expect("valid configuration");
        assert_eq!(config.pool_capacity.limit(), expected);
    }

    #[rstest]
    #[case(r#"{ "pool_capacity": { "bounded": 0 } }"#)]
    #[case(r#"{ "pool_size": 10 }"#)]
    #[case("not json")]
    fn rejects_invalid_documents(#[case] json: &str) {
        let error = RegistryConfig::from_json_str(json).expect_err("invalid configuration");
        assert!(matches!(error, ConfigError::Parse { .. }));
    }
}
