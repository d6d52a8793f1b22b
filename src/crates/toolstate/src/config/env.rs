//! Environment variable loading utilities

use crate::{Result, StateError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// * `Ok(Some(value))` if the variable exists
/// * `Ok(None)` if it doesn't
/// * `Err` if it exists but is not valid UTF-8
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(StateError::Config(format!(
            "Environment variable {} contains invalid UTF-8",
            key
        ))),
    }
}

/// Load and parse an environment variable
///
/// ```rust,ignore
/// let limit: Option<usize> = get_env_parse("TOOLSTATE_FEED_LIMIT")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.trim().parse::<T>().map_err(|e| {
                StateError::Config(format!(
                    "Failed to parse environment variable {}: {}",
                    key, e
                ))
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Load and parse an environment variable, falling back to `default` when unset
pub fn get_env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse(key)?.unwrap_or(default))
}

/// Load a boolean environment variable
///
/// Accepts "true", "1", "yes", "on" and "false", "0", "no", "off"
/// (case-insensitive).
pub fn get_env_bool(key: &str) -> Result<Option<bool>> {
    match get_env(key)? {
        Some(val) => {
            let result = match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(StateError::Config(format!(
                        "Invalid boolean value for {}: {}",
                        key, val
                    )))
                }
            };
            Ok(Some(result))
        }
        None => Ok(None),
    }
}

/// Build a prefixed environment variable name
///
/// `build_env_key("TOOLSTATE_", "feed_limit")` returns `"TOOLSTATE_FEED_LIMIT"`.
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        assert!(get_env("TOOLSTATE_TEST_MISSING_VAR_12345").unwrap().is_none());
    }

    #[test]
    fn test_get_env_parse() {
        env::set_var("TOOLSTATE_TEST_NUMBER", " 42 ");
        let result: Option<usize> = get_env_parse("TOOLSTATE_TEST_NUMBER").unwrap();
        assert_eq!(result, Some(42));
        env::remove_var("TOOLSTATE_TEST_NUMBER");
    }

    #[test]
    fn test_get_env_parse_invalid() {
        env::set_var("TOOLSTATE_TEST_INVALID_NUMBER", "lots");
        let result: Result<Option<usize>> = get_env_parse("TOOLSTATE_TEST_INVALID_NUMBER");
        assert!(matches!(result, Err(StateError::Config(_))));
        env::remove_var("TOOLSTATE_TEST_INVALID_NUMBER");
    }

    #[test]
    fn test_get_env_parse_or() {
        let result: usize = get_env_parse_or("TOOLSTATE_TEST_MISSING_VAR_12345", 20).unwrap();
        assert_eq!(result, 20);
    }

    #[test]
    fn test_get_env_bool() {
        for (value, expected) in [("TRUE", true), ("on", true), ("0", false), ("No", false)] {
            env::set_var("TOOLSTATE_TEST_BOOL", value);
            let result = get_env_bool("TOOLSTATE_TEST_BOOL").unwrap();
            assert_eq!(result, Some(expected), "Failed for value: {}", value);
        }
        env::remove_var("TOOLSTATE_TEST_BOOL");
    }

    #[test]
    fn test_get_env_bool_invalid() {
        env::set_var("TOOLSTATE_TEST_BOOL_INVALID", "maybe");
        assert!(get_env_bool("TOOLSTATE_TEST_BOOL_INVALID").is_err());
        env::remove_var("TOOLSTATE_TEST_BOOL_INVALID");
    }

    #[test]
    fn test_build_env_key() {
        assert_eq!(build_env_key("TOOLSTATE_", "feed_limit"), "TOOLSTATE_FEED_LIMIT");
        assert_eq!(build_env_key("", "log_previews"), "LOG_PREVIEWS");
    }
}
