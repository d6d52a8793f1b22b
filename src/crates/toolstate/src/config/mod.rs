//! Session configuration
//!
//! Limits for a session are optional and off by default, so an unconfigured
//! session never rejects a write or an inventory item.
//!
//! # Example
//!
//! ```rust,ignore
//! use toolstate::config::{ConfigBuilder, SessionConfig};
//!
//! // Reads TOOLSTATE_MAX_FILE_BYTES, TOOLSTATE_MAX_INVENTORY_ITEMS,
//! // TOOLSTATE_FEED_LIMIT and TOOLSTATE_LOG_PREVIEWS
//! let config = SessionConfig::from_env_with_defaults(SessionConfig::ENV_PREFIX)?;
//! ```

mod builder;
mod env;
mod session;

pub use builder::ConfigBuilder;
pub use env::{build_env_key, get_env, get_env_bool, get_env_parse, get_env_parse_or};
pub use session::{SessionConfig, SessionOverrides};
