//! Stateful layer for generated mock tools
//!
//! Generated mock tools fabricate schema-shaped responses and are normally
//! stateless. This crate lets a subset of them behave statefully for one
//! simulated multi-turn conversation.
//!
//! # Modules
//!
//! - `store` - In-memory path to text map with line-addressable edits
//! - `session` - Session lifecycle wrapping the file store, inventory and feed
//! - `classifier` - Pure heuristic inferring read/write/inventory intent
//! - `adapter` - Applies classified side effects around a mock response
//! - `editor` - Line-oriented text editor tool backed by the session
//! - `mock` - Canned response generators consumed by the adapter
//! - `config` - Session limits loaded from environment variables
//! - `error` - Error types and chain formatting
//! - `logging` - Redaction and preview helpers for trace output
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use toolstate::{SharedSession, ToolAdapter, ToolCallContext};
//!
//! let session = SharedSession::new();
//! let adapter = ToolAdapter::new(session.clone());
//! let canned = |_: &str| {
//!     let mut map = serde_json::Map::new();
//!     map.insert("content".into(), json!("canned"));
//!     map
//! };
//!
//! let write = ToolCallContext::new("text_editor")
//!     .with_command("create")
//!     .with_path("/tmp/demo.txt")
//!     .with_file_text("Hello from the Stateful World!");
//! adapter.invoke(&canned, &write);
//!
//! let read = ToolCallContext::new("text_editor")
//!     .with_command("view")
//!     .with_path("/tmp/demo.txt");
//! let result = adapter.invoke(&canned, &read);
//! assert_eq!(result["content"], json!("Hello from the Stateful World!"));
//! ```

pub mod adapter;
pub mod classifier;
pub mod config;
pub mod editor;
pub mod error;
pub mod logging;
pub mod mock;
pub mod session;
pub mod store;

pub use adapter::{HeuristicOutcome, ToolAdapter};
pub use classifier::{classify, classify_in, Domain, Effect, EffectSet, ToolCallContext};
pub use config::{ConfigBuilder, SessionConfig, SessionOverrides};
pub use editor::{text_editor, EditorCommand, EditorRequest, EditorResponse};
pub use error::{format_error_chain, Result, StateError};
pub use mock::{CannedResponses, MockResponder};
pub use session::{SessionPhase, SessionState, SharedSession};
pub use store::VirtualFileStore;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
