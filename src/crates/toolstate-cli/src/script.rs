//! Conversation scripts
//!
//! A script is an ordered list of steps replayed against one session:
//! mock tool calls routed through the adapter, direct editor commands and
//! session resets.
//!
//! ```yaml
//! domain: filesystem
//! steps:
//!   - op: call
//!     tool: text_editor
//!     args: {command: create, path: /tmp/demo.txt, file_text: "hello"}
//!   - op: editor
//!     command: view
//!     path: /tmp/demo.txt
//!   - op: reset
//! ```

use anyhow::{bail, Context, Result};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;
use toolstate::{
    text_editor, CannedResponses, ConfigBuilder, Domain, EditorRequest, SessionConfig,
    SessionOverrides, SharedSession, ToolAdapter,
};
use tracing::info;

/// One step of a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Mock tool call routed through the adapter
    Call {
        tool: String,
        #[serde(default)]
        args: Map<String, Value>,
    },
    /// Direct text editor command
    Editor(EditorRequest),
    /// Clear all session state
    Reset,
    /// Dump stored paths and inventory
    Snapshot,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Self::Call { .. } => "call",
            Self::Editor(_) => "editor",
            Self::Reset => "reset",
            Self::Snapshot => "snapshot",
        }
    }
}

/// A scripted conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Rule group for mock calls; `any` when absent
    pub domain: Option<Domain>,
    /// Session limits layered over the environment
    pub config: Option<SessionOverrides>,
    pub steps: Vec<Step>,
}

/// Output of one replayed step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutput {
    pub step: usize,
    pub op: &'static str,
    pub result: Value,
}

/// Parse JSON or YAML chosen by file extension
///
/// Unknown extensions are tried as JSON, then YAML.
pub fn parse_document<T: DeserializeOwned>(input: &str, path: &Path) -> Result<T> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(input).context("Invalid JSON document"),
        Some("yaml") | Some("yml") => serde_yaml::from_str(input).context("Invalid YAML document"),
        _ => serde_json::from_str(input)
            .or_else(|_| serde_yaml::from_str(input))
            .context("Document is neither valid JSON nor YAML"),
    }
}

/// Load a document from disk
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let input = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_document(&input, path).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Replays steps against one shared session
pub struct Replayer {
    session: SharedSession,
    adapter: ToolAdapter,
    responder: CannedResponses,
}

impl Replayer {
    /// Build a replayer for `script`
    ///
    /// Fields the script sets replace those of `base`, then the result is
    /// validated.
    pub fn new(script: &Script, base: SessionConfig, responder: CannedResponses) -> Result<Self> {
        let mut config = base;
        if let Some(overrides) = &script.config {
            config.apply(overrides);
        }
        config.validate()?;

        let session = SharedSession::with_config(config);
        let adapter = ToolAdapter::for_domain(session.clone(), script.domain.unwrap_or_default());
        Ok(Self {
            session,
            adapter,
            responder,
        })
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Run one step
    pub fn run_step(&self, step: &Step) -> Result<Value> {
        let result = match step {
            Step::Call { tool, args } => {
                if tool.is_empty() {
                    bail!("Call step is missing a tool name");
                }
                Value::Object(self.adapter.invoke_kwargs(&self.responder, tool, args))
            }
            Step::Editor(request) => {
                let response = text_editor(&mut self.session.lock(), request);
                serde_json::to_value(response)?
            }
            Step::Reset => {
                self.session.reset();
                json!({"success": true})
            }
            Step::Snapshot => {
                let session = self.session.lock();
                json!({
                    "generation": session.generation(),
                    "files": session.list_files(),
                    "inventory": session.get_inventory(),
                })
            }
        };
        Ok(result)
    }

    /// Run every step in order
    pub fn replay(&self, script: &Script) -> Result<Vec<StepOutput>> {
        info!(steps = script.steps.len(), domain = %self.adapter.domain(), "Replaying script");
        script
            .steps
            .iter()
            .enumerate()
            .map(|(index, step)| {
                let result = self
                    .run_step(step)
                    .with_context(|| format!("Step {} ({}) failed", index + 1, step.name()))?;
                Ok(StepOutput {
                    step: index + 1,
                    op: step.name(),
                    result,
                })
            })
            .collect()
    }
}

/// Built-in stateful-world conversation
pub fn demo_script() -> Script {
    let call = |tool: &str, args: Value| Step::Call {
        tool: tool.to_string(),
        args: args.as_object().cloned().unwrap_or_default(),
    };

    Script {
        domain: None,
        config: None,
        steps: vec![
            Step::Editor(EditorRequest::create("/tmp/hello.txt", "Hello World")),
            Step::Editor(EditorRequest::view("/tmp/hello.txt")),
            Step::Editor(EditorRequest::create("/tmp/code.py", "def main():\n    pass")),
            Step::Editor(EditorRequest::insert("/tmp/code.py", 1, "    print('hi')")),
            Step::Editor(EditorRequest::view("/tmp/code.py")),
            call(
                "text_editor",
                json!({
                    "command": "create",
                    "path": "/tmp/demo.txt",
                    "file_text": "Hello from the Stateful World!"
                }),
            ),
            call("text_editor", json!({"command": "view", "path": "/tmp/demo.txt"})),
            call("game-buy_item", json!({"item": "sword"})),
            call("game-get_inventory", json!({})),
            Step::Snapshot,
            Step::Reset,
            Step::Editor(EditorRequest::view("/tmp/hello.txt")),
        ],
    }
}

/// Canned payloads used by the demo
pub fn demo_responses() -> CannedResponses {
    let as_map = |value: Value| value.as_object().cloned().unwrap_or_default();
    CannedResponses::new()
        .with_response(
            "text_editor",
            as_map(json!({"success": true, "content": "Lorem ipsum canned text"})),
        )
        .with_response(
            "game-get_inventory",
            as_map(json!({"content": "Inventory: empty", "gold": 120})),
        )
        .with_fallback(as_map(json!({"status": "success"})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const YAML_SCRIPT: &str = r#"
domain: gaming
config:
  max_inventory_items: 1
steps:
  - op: call
    tool: buy_item
    args: {item: sword}
  - op: call
    tool: buy_item
    args: {item: shield}
  - op: call
    tool: get_inventory
  - op: reset
"#;

    #[test]
    fn test_parse_yaml_script() {
        let script: Script = parse_document(YAML_SCRIPT, Path::new("s.yaml")).unwrap();
        assert_eq!(script.domain, Some(Domain::Gaming));
        assert_eq!(script.config.as_ref().and_then(|c| c.max_inventory_items), Some(1));
        assert_eq!(script.steps.len(), 4);
        assert_eq!(script.steps[3], Step::Reset);
    }

    #[test]
    fn test_parse_json_editor_step() {
        let script: Script = parse_document(
            r#"{"steps": [{"op": "editor", "command": "view", "path": "/a"}]}"#,
            Path::new("s.json"),
        )
        .unwrap();
        assert_eq!(script.steps, vec![Step::Editor(EditorRequest::view("/a"))]);
    }

    #[test]
    fn test_parse_unknown_extension_falls_back_to_yaml() {
        let script: Script = parse_document("steps:\n  - op: snapshot\n", Path::new("s.txt")).unwrap();
        assert_eq!(script.steps, vec![Step::Snapshot]);
    }

    #[test]
    fn test_parse_rejects_unknown_op() {
        let result: Result<Script> =
            parse_document(r#"{"steps": [{"op": "explode"}]}"#, Path::new("s.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_replay_respects_script_limits() {
        let script: Script = parse_document(YAML_SCRIPT, Path::new("s.yaml")).unwrap();
        let replayer = Replayer::new(&script, SessionConfig::default(), CannedResponses::new()).unwrap();
        let outputs = replayer.replay(&script).unwrap();

        assert_eq!(outputs.len(), 4);
        assert_eq!(outputs[2].result["inventory"], json!(["sword"]));
        assert_eq!(outputs[3].op, "reset");
        assert!(replayer.session().get_inventory().is_empty());
    }

    #[test]
    fn test_replay_rejects_invalid_config() {
        let script = Script {
            config: Some(SessionOverrides {
                feed_limit: Some(0),
                ..SessionOverrides::default()
            }),
            ..Script::default()
        };
        assert!(Replayer::new(&script, SessionConfig::default(), CannedResponses::new()).is_err());
    }

    #[test]
    fn test_script_config_keeps_environment_settings() {
        let script: Script = parse_document(
            "config:\n  max_inventory_items: 3\nsteps: []\n",
            Path::new("s.yaml"),
        )
        .unwrap();
        let base = SessionConfig::new()
            .with_feed_limit(5)
            .with_log_previews(true);
        let replayer = Replayer::new(&script, base, CannedResponses::new()).unwrap();

        let session = replayer.session().lock();
        let config = session.config();
        assert_eq!(config.max_inventory_items, Some(3));
        assert_eq!(config.feed_limit, 5);
        assert!(config.log_previews);
    }

    #[test]
    fn test_call_without_tool_fails_step() {
        let script = Script {
            steps: vec![Step::Call {
                tool: String::new(),
                args: Map::new(),
            }],
            ..Script::default()
        };
        let replayer = Replayer::new(&script, SessionConfig::default(), CannedResponses::new()).unwrap();
        let err = replayer.replay(&script).unwrap_err();
        assert!(err.to_string().contains("Step 1 (call) failed"));
    }

    #[test]
    fn test_demo_script() {
        let script = demo_script();
        let replayer = Replayer::new(&script, SessionConfig::default(), demo_responses()).unwrap();
        let outputs = replayer.replay(&script).unwrap();

        assert_eq!(outputs[1].result, json!({"success": true, "content": "Hello World"}));
        assert_eq!(
            outputs[4].result["content"],
            json!("def main():\n    print('hi')\n    pass")
        );
        assert_eq!(
            outputs[6].result["content"],
            json!("Hello from the Stateful World!")
        );
        assert_eq!(outputs[8].result["inventory"], json!(["sword"]));
        assert_eq!(
            outputs[9].result["files"],
            json!(["/tmp/code.py", "/tmp/demo.txt", "/tmp/hello.txt"])
        );
        assert_eq!(outputs[11].result["success"], json!(false));
    }

    #[test]
    fn test_load_document_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(YAML_SCRIPT.as_bytes()).unwrap();

        let script: Script = load_document(file.path()).unwrap();
        assert_eq!(script.steps.len(), 4);

        let missing: Result<Script> = load_document(Path::new("/definitely/not/here.yaml"));
        assert!(missing.is_err());
    }
}
