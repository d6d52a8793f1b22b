//! Virtual file store
//!
//! A flat path to text map standing in for a filesystem. Paths are opaque
//! keys: there are no directories, and `/tmp/a` and `tmp/a` are different
//! files.

use std::collections::HashMap;

/// Line separator used when splitting and rejoining file content
pub const LINE_SEPARATOR: &str = "\n";

/// In-memory path to text mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VirtualFileStore {
    files: HashMap<String, String>,
}

impl VirtualFileStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Content stored at `path`, if any
    pub fn read(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Store `content` at `path`, replacing any previous content
    ///
    /// Returns the previous content.
    pub fn write(&mut self, path: impl Into<String>, content: impl Into<String>) -> Option<String> {
        self.files.insert(path.into(), content.into())
    }

    /// Remove `path`, returning its content
    pub fn remove(&mut self, path: &str) -> Option<String> {
        self.files.remove(path)
    }

    /// Whether `path` has been written
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// All stored paths in lexical order
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.files.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Number of stored files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store holds no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Drop every file
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Number of lines in the file at `path`
    pub fn line_count(&self, path: &str) -> Option<usize> {
        self.read(path).map(|content| split_lines(content).len())
    }

    /// Insert `new_line` at `index` in the file at `path`
    ///
    /// Returns the new line count, or `None` when the file is absent or
    /// `index` is past the end.
    pub fn insert_line(&mut self, path: &str, index: usize, new_line: &str) -> Option<usize> {
        let spliced = splice_line(self.read(path)?, index, new_line)?;
        let count = split_lines(&spliced).len();
        self.files.insert(path.to_string(), spliced);
        Some(count)
    }
}

/// Split content into its lines
///
/// Every separator starts a new line, so a trailing separator yields a
/// trailing empty line and empty content is a single empty line.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split(LINE_SEPARATOR).collect()
}

/// Insert `new_line` as line `index` of `content`
///
/// `index` may equal the current line count, which appends. Returns `None`
/// when `index` is larger than that.
pub fn splice_line(content: &str, index: usize, new_line: &str) -> Option<String> {
    let mut lines = split_lines(content);
    if index > lines.len() {
        return None;
    }
    lines.insert(index, new_line);
    Some(lines.join(LINE_SEPARATOR))
}
