//! Line-oriented text editor tool
//!
//! A single multi-command tool over the session's file store. It never
//! fails the caller: missing files and malformed requests come back as
//! `{success: false, error}`.
//!
//! ```rust
//! use toolstate::{text_editor, EditorRequest, SessionState};
//!
//! let mut session = SessionState::new();
//! text_editor(&mut session, &EditorRequest::create("/tmp/hello.txt", "Hello World"));
//!
//! let response = text_editor(&mut session, &EditorRequest::view("/tmp/hello.txt"));
//! assert!(response.success);
//! assert_eq!(response.content.as_deref(), Some("Hello World"));
//! ```

use crate::session::SessionState;
use crate::StateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Commands understood by the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorCommand {
    Create,
    View,
    Insert,
}

impl fmt::Display for EditorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::View => "view",
            Self::Insert => "insert",
        })
    }
}

impl FromStr for EditorCommand {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "view" => Ok(Self::View),
            "insert" => Ok(Self::Insert),
            other => Err(StateError::Validation(format!("Unknown command: {}", other))),
        }
    }
}

/// One editor invocation
///
/// `command` stays a plain string so unknown commands can be reported
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorRequest {
    pub command: String,
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_str: Option<String>,
}

impl EditorRequest {
    /// `create` request
    pub fn create(path: impl Into<String>, file_text: impl Into<String>) -> Self {
        Self {
            command: EditorCommand::Create.to_string(),
            path: Some(path.into()),
            file_text: Some(file_text.into()),
            ..Self::default()
        }
    }

    /// `view` request
    pub fn view(path: impl Into<String>) -> Self {
        Self {
            command: EditorCommand::View.to_string(),
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// `insert` request
    pub fn insert(path: impl Into<String>, insert_line: usize, new_str: impl Into<String>) -> Self {
        Self {
            command: EditorCommand::Insert.to_string(),
            path: Some(path.into()),
            insert_line: Some(insert_line),
            new_str: Some(new_str.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Result of an editor invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EditorResponse {
    fn ok() -> Self {
        Self {
            success: true,
            content: None,
            error: None,
        }
    }

    fn with_content(content: String) -> Self {
        Self {
            content: Some(content),
            ..Self::ok()
        }
    }

    fn failure(error: impl fmt::Display) -> Self {
        Self {
            success: false,
            content: None,
            error: Some(error.to_string()),
        }
    }
}

/// Run one editor command against `session`
pub fn text_editor(session: &mut SessionState, request: &EditorRequest) -> EditorResponse {
    match run(session, request) {
        Ok(response) => response,
        Err(err) => {
            debug!(
                command = %request.command,
                code = err.error_code(),
                "Editor request failed: {}",
                err
            );
            EditorResponse::failure(err)
        }
    }
}

fn required<'a, T: ?Sized>(value: Option<&'a T>, name: &str) -> Result<&'a T, StateError> {
    value.ok_or_else(|| StateError::Validation(format!("Missing required parameter: {}", name)))
}

fn run(session: &mut SessionState, request: &EditorRequest) -> Result<EditorResponse, StateError> {
    let command: EditorCommand = request.command.parse()?;
    let path = required(request.path.as_deref().filter(|p| !p.is_empty()), "path")?;

    if let Some(description) = &request.description {
        debug!(%command, path, description = %description, "text_editor");
    }

    match command {
        EditorCommand::Create => {
            let file_text = required(request.file_text.as_deref(), "file_text")?;
            session.write_file(path, file_text)?;
            Ok(EditorResponse::ok())
        }
        EditorCommand::View => session
            .read_file(path)
            .map(EditorResponse::with_content)
            .ok_or_else(|| StateError::NotFound(path.to_string())),
        EditorCommand::Insert => {
            let line = required(request.insert_line.as_ref(), "insert_line")?;
            let new_str = required(request.new_str.as_deref(), "new_str")?;
            session.insert_line(path, *line, new_str)?;
            Ok(EditorResponse::ok())
        }
    }
}
