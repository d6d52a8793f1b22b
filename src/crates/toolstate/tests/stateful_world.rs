//! Mock tools made stateful through the adapter

use serde_json::{json, Map, Value};
use toolstate::{
    text_editor, CannedResponses, Domain, EditorRequest, MockResponder, SharedSession,
    ToolAdapter, ToolCallContext,
};

fn canned_tools() -> CannedResponses {
    let as_map = |value: Value| value.as_object().cloned().unwrap_or_default();
    CannedResponses::new()
        .with_response(
            "text_editor",
            as_map(json!({"success": true, "content": "Lorem ipsum canned text"})),
        )
        .with_response(
            "game-get_inventory",
            as_map(json!({"content": "Inventory: 3 items", "gold": 120})),
        )
        .with_fallback(as_map(json!({"status": "success"})))
}

#[test]
fn test_write_injection_then_read_injection() {
    let session = SharedSession::new();
    let adapter = ToolAdapter::new(session.clone());
    let tools = canned_tools();

    let kwargs = json!({
        "command": "create",
        "path": "/tmp/demo.txt",
        "file_text": "Hello from the Stateful World!"
    });
    adapter.invoke_kwargs(&tools, "text_editor", kwargs.as_object().unwrap());
    assert_eq!(
        session.read_file("/tmp/demo.txt").as_deref(),
        Some("Hello from the Stateful World!")
    );

    let kwargs = json!({"command": "view", "path": "/tmp/demo.txt"});
    let result = adapter.invoke_kwargs(&tools, "text_editor", kwargs.as_object().unwrap());
    assert_eq!(result["content"], json!("Hello from the Stateful World!"));
    assert_ne!(
        tools.respond("text_editor")["content"],
        result["content"],
        "canned content should have been replaced"
    );
}

#[test]
fn test_editor_writes_are_visible_to_mock_reads() {
    let session = SharedSession::new();
    text_editor(
        &mut session.lock(),
        &EditorRequest::create("/etc/motd", "welcome"),
    );

    let adapter = ToolAdapter::for_domain(session, Domain::FileSystem);
    let result = adapter.invoke(
        &canned_tools(),
        &ToolCallContext::new("fs-cat_file").with_path("/etc/motd"),
    );
    assert_eq!(result["content"], json!("welcome"));
    assert_eq!(result["status"], json!("success"));
}

#[test]
fn test_inventory_accumulates_across_calls() {
    let session = SharedSession::new();
    let adapter = ToolAdapter::for_domain(session.clone(), Domain::Gaming);
    let tools = canned_tools();

    for item in ["sword", "shield"] {
        let kwargs = json!({"item": item});
        adapter.invoke_kwargs(&tools, "game-buy_item", kwargs.as_object().unwrap());
    }

    let result = adapter.invoke(&tools, &ToolCallContext::new("game-get_inventory"));
    assert_eq!(result["inventory"], json!(["sword", "shield"]));
    assert_eq!(result["content"], json!(r#"["sword","shield"]"#));
    assert_eq!(result["gold"], json!(120));
}

#[test]
fn test_reset_between_conversations() {
    let session = SharedSession::new();
    let adapter = ToolAdapter::new(session.clone());
    let tools = canned_tools();

    adapter.invoke(
        &tools,
        &ToolCallContext::new("save_note")
            .with_path("/notes.txt")
            .with_content("remember the milk"),
    );
    session.reset();

    let result = adapter.invoke(
        &tools,
        &ToolCallContext::new("read_note").with_path("/notes.txt"),
    );
    assert_eq!(result, tools.respond("read_note"));
}

#[test]
fn test_adapter_never_fails_on_odd_arguments() {
    let adapter = ToolAdapter::new(SharedSession::new());
    let tools = canned_tools();

    let mut kwargs = Map::new();
    kwargs.insert("command".into(), json!(5));
    kwargs.insert("path".into(), json!({"nested": true}));
    kwargs.insert("content".into(), Value::Null);

    let result = adapter.invoke_kwargs(&tools, "write_anything", &kwargs);
    assert_eq!(result, tools.respond("write_anything"));
}
