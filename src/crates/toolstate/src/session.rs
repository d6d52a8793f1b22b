//! Session state
//!
//! One simulated conversation owns one `SessionState`: a virtual file store,
//! an ordered inventory and a social feed. Nothing outlives the process.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --init_session--> Active --read/write/insert--> Active
//!                                    \--reset--> Active (empty)
//! ```
//!
//! Operations on an uninitialized session behave as on an empty one; the
//! first mutation activates it.

use crate::config::SessionConfig;
use crate::logging::{format_bytes, preview};
use crate::store::{split_lines, splice_line, VirtualFileStore};
use crate::{Result, StateError};
use parking_lot::{Mutex, MutexGuard};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};

/// Lifecycle phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Created but never initialized
    Uninitialized,
    /// Initialized (possibly reset since)
    Active,
}

/// State backing one simulated conversation
#[derive(Debug, Clone)]
pub struct SessionState {
    config: SessionConfig,
    phase: SessionPhase,
    generation: u64,
    files: VirtualFileStore,
    inventory: Vec<Value>,
    feed: Vec<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl SessionState {
    /// Create an uninitialized session with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an uninitialized session with the given configuration
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            phase: SessionPhase::Uninitialized,
            generation: 0,
            files: VirtualFileStore::new(),
            inventory: Vec::new(),
            feed: Vec::new(),
        }
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Number of times the session has been (re)initialized
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// (Re)create an empty file store, inventory and feed
    pub fn init_session(&mut self) {
        self.files.clear();
        self.inventory.clear();
        self.feed.clear();
        self.phase = SessionPhase::Active;
        self.generation += 1;
        debug!(generation = self.generation, "Session initialized");
    }

    /// Clear all session state
    pub fn reset(&mut self) {
        self.init_session();
    }

    fn activate(&mut self) {
        if self.phase == SessionPhase::Uninitialized {
            self.phase = SessionPhase::Active;
            self.generation = 1;
        }
    }

    /// Content stored at `path`, or `None` if never written or cleared
    pub fn read_file(&self, path: &str) -> Option<String> {
        let content = self.files.read(path).map(str::to_string);
        trace!(path, found = content.is_some(), "read_file");
        content
    }

    /// Store `content` at `path`, replacing any previous content
    ///
    /// Only fails when `max_file_bytes` is configured and exceeded.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<()> {
        if let Some(limit) = self.config.max_file_bytes {
            if content.len() > limit {
                return Err(StateError::FileTooLarge {
                    path: path.to_string(),
                    size: content.len(),
                    limit,
                });
            }
        }

        self.activate();
        self.files.write(path, content);
        debug!(path, size = %format_bytes(content.len()), "write_file");
        if self.config.log_previews {
            trace!(path, preview = %preview(content), "write_file content");
        }
        Ok(())
    }

    /// Insert `new_line` as line `index` (0-based) of the file at `path`
    ///
    /// The result is written back through `write_file`, so size limits apply.
    pub fn insert_line(&mut self, path: &str, index: usize, new_line: &str) -> Result<()> {
        let current = self
            .files
            .read(path)
            .ok_or_else(|| StateError::NotFound(path.to_string()))?;

        let spliced =
            splice_line(current, index, new_line).ok_or_else(|| StateError::LineOutOfRange {
                path: path.to_string(),
                line: index,
                line_count: split_lines(current).len(),
            })?;

        self.write_file(path, &spliced)
    }

    /// Remove the file at `path`; returns whether it existed
    pub fn delete_file(&mut self, path: &str) -> bool {
        let existed = self.files.remove(path).is_some();
        debug!(path, existed, "delete_file");
        existed
    }

    /// All stored paths in lexical order
    pub fn list_files(&self) -> Vec<String> {
        self.files.paths()
    }

    /// Number of stored files
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Snapshot of the inventory in insertion order
    pub fn get_inventory(&self) -> Vec<Value> {
        self.inventory.clone()
    }

    /// Append `item` to the inventory
    ///
    /// Only fails when `max_inventory_items` is configured and reached.
    pub fn add_item(&mut self, item: Value) -> Result<()> {
        if let Some(limit) = self.config.max_inventory_items {
            if self.inventory.len() >= limit {
                return Err(StateError::InventoryFull { limit });
            }
        }

        self.activate();
        debug!(item = %item, "add_item");
        self.inventory.push(item);
        Ok(())
    }

    /// Publish a post to the session feed
    pub fn post_content(&mut self, text: &str) {
        self.activate();
        self.feed.push(text.to_string());
        debug!(posts = self.feed.len(), "post_content");
    }

    /// Most recent posts first, at most `feed_limit` of them
    pub fn get_feed(&self) -> Vec<String> {
        self.feed
            .iter()
            .rev()
            .take(self.config.feed_limit)
            .cloned()
            .collect()
    }
}

/// A session shared between several mock tools
///
/// Cloning is cheap and every clone refers to the same state.
#[derive(Debug, Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionState>>,
}

impl Default for SharedSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedSession {
    /// Create a shared, initialized session with the default configuration
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a shared, initialized session with the given configuration
    pub fn with_config(config: SessionConfig) -> Self {
        let mut state = SessionState::with_config(config);
        state.init_session();
        Self::from_state(state)
    }

    /// Share an existing session
    pub fn from_state(state: SessionState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Lock the session for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock()
    }

    /// See [`SessionState::init_session`]
    pub fn init_session(&self) {
        self.lock().init_session();
    }

    /// See [`SessionState::reset`]
    pub fn reset(&self) {
        self.lock().reset();
    }

    /// See [`SessionState::read_file`]
    pub fn read_file(&self, path: &str) -> Option<String> {
        self.lock().read_file(path)
    }

    /// See [`SessionState::write_file`]
    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        self.lock().write_file(path, content)
    }

    /// See [`SessionState::get_inventory`]
    pub fn get_inventory(&self) -> Vec<Value> {
        self.lock().get_inventory()
    }

    /// See [`SessionState::add_item`]
    pub fn add_item(&self, item: Value) -> Result<()> {
        self.lock().add_item(item)
    }
}
