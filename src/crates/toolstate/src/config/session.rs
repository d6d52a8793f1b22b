//! Session limits and logging switches

use super::builder::ConfigBuilder;
use super::env::{build_env_key, get_env_bool, get_env_parse, get_env_parse_or};
use crate::{Result, StateError};
use serde::{Deserialize, Serialize};

/// Default number of posts returned by `get_feed`
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// Configuration for a single session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Reject writes whose content exceeds this many bytes
    pub max_file_bytes: Option<usize>,

    /// Reject `add_item` once the inventory holds this many items
    pub max_inventory_items: Option<usize>,

    /// Maximum number of posts returned by `get_feed`
    pub feed_limit: usize,

    /// Include redacted content previews in trace logs
    pub log_previews: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: None,
            max_inventory_items: None,
            feed_limit: DEFAULT_FEED_LIMIT,
            log_previews: false,
        }
    }
}

impl SessionConfig {
    /// Prefix for environment variables read by `from_env`
    pub const ENV_PREFIX: &'static str = "TOOLSTATE_";

    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-file size limit
    pub fn with_max_file_bytes(mut self, limit: usize) -> Self {
        self.max_file_bytes = Some(limit);
        self
    }

    /// Set the inventory capacity
    pub fn with_max_inventory_items(mut self, limit: usize) -> Self {
        self.max_inventory_items = Some(limit);
        self
    }

    /// Set the feed limit
    pub fn with_feed_limit(mut self, limit: usize) -> Self {
        self.feed_limit = limit;
        self
    }

    /// Enable or disable content previews in trace logs
    pub fn with_log_previews(mut self, enabled: bool) -> Self {
        self.log_previews = enabled;
        self
    }
}

/// Partial session settings, as written in a replay script
///
/// Only fields that are present replace the base configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOverrides {
    /// Replaces `max_file_bytes`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_file_bytes: Option<usize>,
    /// Replaces `max_inventory_items`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_inventory_items: Option<usize>,
    /// Replaces `feed_limit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_limit: Option<usize>,
    /// Replaces `log_previews`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_previews: Option<bool>,
}

impl SessionConfig {
    /// Replace the fields set in `overrides`, keeping the rest
    pub fn apply(&mut self, overrides: &SessionOverrides) -> &mut Self {
        if let Some(limit) = overrides.max_file_bytes {
            self.max_file_bytes = Some(limit);
        }
        if let Some(limit) = overrides.max_inventory_items {
            self.max_inventory_items = Some(limit);
        }
        if let Some(limit) = overrides.feed_limit {
            self.feed_limit = limit;
        }
        if let Some(enabled) = overrides.log_previews {
            self.log_previews = enabled;
        }
        self
    }
}

impl ConfigBuilder for SessionConfig {
    fn validate(&self) -> Result<()> {
        if self.max_file_bytes == Some(0) {
            return Err(StateError::Config(
                "max_file_bytes must be non-zero when set".into(),
            ));
        }
        if self.max_inventory_items == Some(0) {
            return Err(StateError::Config(
                "max_inventory_items must be non-zero when set".into(),
            ));
        }
        if self.feed_limit == 0 {
            return Err(StateError::Config("feed_limit must be non-zero".into()));
        }
        Ok(())
    }

    fn from_env(prefix: &str) -> Result<Self> {
        Ok(Self {
            max_file_bytes: get_env_parse(&build_env_key(prefix, "max_file_bytes"))?,
            max_inventory_items: get_env_parse(&build_env_key(prefix, "max_inventory_items"))?,
            feed_limit: get_env_parse_or(&build_env_key(prefix, "feed_limit"), DEFAULT_FEED_LIMIT)?,
            log_previews: get_env_bool(&build_env_key(prefix, "log_previews"))?.unwrap_or(false),
        })
    }

    fn merge(&mut self, other: Self) -> &mut Self {
        if other.max_file_bytes.is_some() {
            self.max_file_bytes = other.max_file_bytes;
        }
        if other.max_inventory_items.is_some() {
            self.max_inventory_items = other.max_inventory_items;
        }
        self.feed_limit = other.feed_limit;
        self.log_previews = other.log_previews;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults_are_unlimited() {
        let config = SessionConfig::default();
        assert!(config.max_file_bytes.is_none());
        assert!(config.max_inventory_items.is_none());
        assert_eq!(config.feed_limit, DEFAULT_FEED_LIMIT);
        assert!(!config.log_previews);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        assert!(SessionConfig::new().with_max_file_bytes(0).validate().is_err());
        assert!(SessionConfig::new()
            .with_max_inventory_items(0)
            .validate()
            .is_err());
        assert!(SessionConfig::new().with_feed_limit(0).validate().is_err());
    }

    #[test]
    fn test_from_env() {
        let prefix = "TOOLSTATE_CFG_TEST_";
        env::set_var("TOOLSTATE_CFG_TEST_MAX_FILE_BYTES", "1024");
        env::set_var("TOOLSTATE_CFG_TEST_FEED_LIMIT", "5");
        env::set_var("TOOLSTATE_CFG_TEST_LOG_PREVIEWS", "yes");

        let config = SessionConfig::from_env_with_defaults(prefix).unwrap();
        assert_eq!(config.max_file_bytes, Some(1024));
        assert_eq!(config.max_inventory_items, None);
        assert_eq!(config.feed_limit, 5);
        assert!(config.log_previews);

        env::remove_var("TOOLSTATE_CFG_TEST_MAX_FILE_BYTES");
        env::remove_var("TOOLSTATE_CFG_TEST_FEED_LIMIT");
        env::remove_var("TOOLSTATE_CFG_TEST_LOG_PREVIEWS");
    }

    #[test]
    fn test_from_env_rejects_invalid_limit() {
        env::set_var("TOOLSTATE_CFG_BAD_FEED_LIMIT", "0");
        let result = SessionConfig::from_env_with_defaults("TOOLSTATE_CFG_BAD_");
        assert!(matches!(result, Err(StateError::Config(_))));
        env::remove_var("TOOLSTATE_CFG_BAD_FEED_LIMIT");
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let config: SessionConfig = serde_yaml::from_str("max_inventory_items: 3\n").unwrap();
        assert_eq!(config.max_inventory_items, Some(3));
        assert_eq!(config.feed_limit, DEFAULT_FEED_LIMIT);
    }

    #[test]
    fn test_apply_keeps_unset_fields() {
        let mut config = SessionConfig::new()
            .with_feed_limit(5)
            .with_log_previews(true);
        let overrides: SessionOverrides =
            serde_yaml::from_str("max_inventory_items: 3\n").unwrap();
        config.apply(&overrides);

        assert_eq!(config.max_inventory_items, Some(3));
        assert_eq!(config.feed_limit, 5);
        assert!(config.log_previews);
        assert_eq!(config.max_file_bytes, None);
    }

    #[test]
    fn test_apply_replaces_set_fields() {
        let mut config = SessionConfig::new().with_max_file_bytes(10);
        config.apply(&SessionOverrides {
            max_file_bytes: Some(64),
            feed_limit: Some(2),
            log_previews: Some(true),
            ..SessionOverrides::default()
        });
        assert_eq!(config.max_file_bytes, Some(64));
        assert_eq!(config.feed_limit, 2);
        assert!(config.log_previews);
    }
}
