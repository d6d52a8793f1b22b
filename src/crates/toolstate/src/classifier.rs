//! Heuristic command classifier
//!
//! Infers which session side effects a mock tool call implies, from nothing
//! more than the tool name and its loosely-typed arguments. Matching is plain
//! substring search and is deliberately naive: any tool whose name contains
//! `search` reads a file when given a `path`, file-related or not. Existing
//! mock call sites rely on these exact trigger words and field fallbacks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Command substrings that imply a file write
pub const WRITE_TRIGGERS: &[&str] = &["write", "create", "save", "update"];

/// Command substrings that imply a file read
pub const READ_TRIGGERS: &[&str] = &["read", "view", "cat", "search", "list"];

/// Tool name substring that implies an inventory read
pub const INVENTORY_READ_TRIGGER: &str = "inventory";

/// Tool name substrings that imply adding an inventory item
pub const INVENTORY_ADD_TRIGGERS: &[&str] = &["add", "buy"];

/// Tool name substrings that imply publishing a post
pub const POST_TRIGGERS: &[&str] = &["post", "send"];

/// Tool name substrings that imply reading the feed
pub const FEED_TRIGGERS: &[&str] = &["get", "feed", "timeline"];

/// A side effect inferred for a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Store the call's content at its path
    Write,
    /// Inject stored content for the call's path
    Read,
    /// Inject the inventory
    InventoryRead,
    /// Append the call's item to the inventory
    InventoryAdd,
    /// Publish the call's content to the feed
    Post,
    /// Inject the feed
    FeedRead,
}

/// Effects fired by one call, in a stable order
pub type EffectSet = BTreeSet<Effect>;

/// Pipeline category a mock tool belongs to
///
/// Selects which heuristic rule group applies to the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// File and inventory rules together
    #[default]
    Any,
    /// File rules only
    #[serde(rename = "filesystem", alias = "file_system")]
    FileSystem,
    /// Post and feed rules only
    Social,
    /// Inventory rules only
    Gaming,
}

impl Domain {
    /// Map a pipeline category label to its domain
    ///
    /// Returns `None` for categories that get no stateful wrapper.
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            "File Management" | "Operating System" | "Development Tools" => {
                Some(Self::FileSystem)
            }
            "Social Media" | "Communication Tools" => Some(Self::Social),
            "Gaming" => Some(Self::Gaming),
            _ => None,
        }
    }

    fn file_rules(self) -> bool {
        matches!(self, Self::Any | Self::FileSystem)
    }

    fn inventory_rules(self) -> bool {
        matches!(self, Self::Any | Self::Gaming)
    }

    fn social_rules(self) -> bool {
        self == Self::Social
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Any => "any",
            Self::FileSystem => "filesystem",
            Self::Social => "social",
            Self::Gaming => "gaming",
        };
        f.write_str(name)
    }
}

impl FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "filesystem" | "fs" | "file" => Ok(Self::FileSystem),
            "social" => Ok(Self::Social),
            "gaming" | "game" => Ok(Self::Gaming),
            _ => Self::from_category(s).ok_or_else(|| format!("Unknown domain: {}", s)),
        }
    }
}

/// Arguments of one mock tool call
///
/// Only the fields the classifier looks at are kept. Text fields hold
/// strings; anything else passed under those names is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolCallContext {
    /// Name of the mocked tool
    pub tool_name: String,
    /// Operation requested of the tool; the tool name stands in when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Target file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Content to write or post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Write payload used when `content` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_text: Option<String>,
    /// Write or post payload used after `content`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Post payload used when `content` and `text` are absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Item to add to the inventory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Value>,
}

impl ToolCallContext {
    /// Create a context with no arguments
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            ..Self::default()
        }
    }

    /// Build a context from a loose argument map
    pub fn from_kwargs(tool_name: impl Into<String>, kwargs: &Map<String, Value>) -> Self {
        let string_arg = |key: &str| kwargs.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            tool_name: tool_name.into(),
            command: string_arg("command"),
            path: string_arg("path"),
            content: string_arg("content"),
            file_text: string_arg("file_text"),
            text: string_arg("text"),
            message: string_arg("message"),
            item: kwargs.get("item").cloned(),
        }
    }

    /// Set the requested operation
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Set the target path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the `content` argument
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the `file_text` argument
    pub fn with_file_text(mut self, file_text: impl Into<String>) -> Self {
        self.file_text = Some(file_text.into());
        self
    }

    /// Set the `text` argument
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the `message` argument
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the inventory item
    pub fn with_item(mut self, item: Value) -> Self {
        self.item = Some(item);
        self
    }

    /// `command` if non-empty, otherwise the tool name
    pub fn effective_command(&self) -> &str {
        non_empty(&self.command).unwrap_or(&self.tool_name)
    }

    /// Non-empty target path
    pub fn target_path(&self) -> Option<&str> {
        non_empty(&self.path)
    }

    /// First non-empty of `content`, `file_text`, `text`
    pub fn write_payload(&self) -> Option<&str> {
        non_empty(&self.content)
            .or_else(|| non_empty(&self.file_text))
            .or_else(|| non_empty(&self.text))
    }

    /// First non-empty of `content`, `text`, `message`
    pub fn post_payload(&self) -> Option<&str> {
        non_empty(&self.content)
            .or_else(|| non_empty(&self.text))
            .or_else(|| non_empty(&self.message))
    }

    /// Item to add, if truthy
    pub fn inventory_item(&self) -> Option<&Value> {
        self.item.as_ref().filter(|item| is_truthy(item))
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Truthiness of a loose argument value
///
/// Null, false, zero and empty strings or collections are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Classify a call with the file and inventory rules
pub fn classify(ctx: &ToolCallContext) -> EffectSet {
    classify_in(Domain::Any, ctx)
}

/// Classify a call with the rule group of `domain`
///
/// Every rule in the group is checked independently, so one call may fire
/// several effects.
pub fn classify_in(domain: Domain, ctx: &ToolCallContext) -> EffectSet {
    let mut effects = EffectSet::new();
    let command = ctx.effective_command();
    let tool_name = ctx.tool_name.as_str();

    if domain.file_rules() {
        if contains_any(command, WRITE_TRIGGERS)
            && ctx.target_path().is_some()
            && ctx.write_payload().is_some()
        {
            effects.insert(Effect::Write);
        }
        if contains_any(command, READ_TRIGGERS) && ctx.target_path().is_some() {
            effects.insert(Effect::Read);
        }
    }

    if domain.inventory_rules() {
        if tool_name.contains(INVENTORY_READ_TRIGGER) {
            effects.insert(Effect::InventoryRead);
        }
        if contains_any(tool_name, INVENTORY_ADD_TRIGGERS) && ctx.inventory_item().is_some() {
            effects.insert(Effect::InventoryAdd);
        }
    }

    if domain.social_rules() {
        if contains_any(tool_name, POST_TRIGGERS) && ctx.post_payload().is_some() {
            effects.insert(Effect::Post);
        }
        if contains_any(tool_name, FEED_TRIGGERS) {
            effects.insert(Effect::FeedRead);
        }
    }

    effects
}
