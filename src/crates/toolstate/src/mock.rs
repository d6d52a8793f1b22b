//! Mock response generators
//!
//! A generated mock tool produces a schema-compliant canned payload from its
//! tool name alone. The adapter only needs that pure function, so it is
//! modelled as a trait implemented by closures and by a table of canned
//! payloads.

use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Pure generator of canned responses
pub trait MockResponder {
    /// Canned payload for `tool_name`
    fn respond(&self, tool_name: &str) -> Map<String, Value>;
}

impl<F> MockResponder for F
where
    F: Fn(&str) -> Map<String, Value>,
{
    fn respond(&self, tool_name: &str) -> Map<String, Value> {
        self(tool_name)
    }
}

/// Table of canned payloads keyed by tool name
///
/// ```rust
/// use toolstate::{CannedResponses, MockResponder};
///
/// let canned = CannedResponses::from_json_str(
///     r#"{"responses": {"read_file": {"content": "canned"}}}"#,
/// ).unwrap();
/// assert_eq!(canned.respond("read_file")["content"], "canned");
/// assert!(canned.respond("unknown").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CannedResponses {
    /// Payload per tool name
    pub responses: HashMap<String, Map<String, Value>>,

    /// Payload for tools missing from `responses`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Map<String, Value>>,
}

impl CannedResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the payload for `tool_name`
    pub fn with_response(mut self, tool_name: impl Into<String>, payload: Map<String, Value>) -> Self {
        self.responses.insert(tool_name.into(), payload);
        self
    }

    /// Payload used for unregistered tools
    pub fn with_fallback(mut self, payload: Map<String, Value>) -> Self {
        self.fallback = Some(payload);
        self
    }

    /// Parse a table from JSON
    pub fn from_json_str(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Parse a table from YAML
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(input)
            .map_err(|e| crate::StateError::Validation(format!("Invalid YAML: {}", e)))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl MockResponder for CannedResponses {
    fn respond(&self, tool_name: &str) -> Map<String, Value> {
        self.responses
            .get(tool_name)
            .or(self.fallback.as_ref())
            .cloned()
            .unwrap_or_default()
    }
}
