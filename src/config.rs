//! Configuration Module
//!
//! Sizing parameters a host application passes when building an LRU cache.

use serde::Deserialize;

/// LRU cache configuration.
///
/// Deserializable so a host can embed it in its own config file; missing
/// fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of entries the LRU cache can hold
    pub max_entries: usize,
}

impl Config {
    /// Creates a config with the given entry limit.
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self { max_entries }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { max_entries: 1000 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
    }

    #[test]
    fn test_config_with_max_entries() {
        assert_eq!(Config::with_max_entries(3).max_entries, 3);
    }
}
