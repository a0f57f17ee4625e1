//! Documents loaded from JSON, emitted through every built-in backend.

use trellis_backends::{RustEmitter, TclTkEmitter, register_builtin};
use trellis_core::{BuildError, EmitError, SourceEvent, SourceNode};
use trellis_emit::{EmitOptions, EmitterRegistry, emit};
use trellis_ir::{BridgeDocument, build};

fn registry() -> EmitterRegistry {
    let mut registry = EmitterRegistry::new();
    register_builtin(&mut registry).unwrap();
    registry
}

fn document_json() -> serde_json::Value {
    let root = SourceNode::new("Column").with_child(
        SourceNode::new("Button")
            .with_property("text", "OK")
            .with_event(
                SourceEvent::new("click")
                    .with_implementation("tcl", "puts ok")
                    .with_implementation("limbo", "sys->print(\"ok\\n\");")
                    .with_implementation("rust", "println!(\"ok\");"),
            ),
    );
    serde_json::to_value(build(&root, false).unwrap()).unwrap()
}

fn load(value: &serde_json::Value) -> Result<BridgeDocument, BuildError> {
    BridgeDocument::from_json(&value.to_string())
}

#[test]
fn test_loaded_document_emits_with_every_backend() {
    let registry = registry();
    let document = load(&document_json()).unwrap();
    let ids: Vec<String> = registry.backends().map(str::to_string).collect();
    assert_eq!(ids.len(), 3);

    for id in ids {
        let mut ctx = registry.create_context(&id, EmitOptions::default()).unwrap();
        let output = emit(&mut ctx, &document).unwrap();
        assert!(output.contains("handler_0"), "{id}: {output}");
    }
}

#[test]
fn test_id_with_space_is_rejected_before_emission() {
    let mut value = document_json();
    value["widgets"][1]["id"] = "ok button".into();
    value["widgets"][0]["children"][0] = "ok button".into();
    value["handlers"][0]["widget"] = "ok button".into();

    let err = load(&value).unwrap_err();
    assert!(matches!(err, BuildError::InvalidId { ref id, .. } if id == "ok button"));
}

#[test]
fn test_keyword_handler_id_is_a_rust_backend_error() {
    let mut value = document_json();
    value["handlers"][0]["id"] = "fn".into();
    value["widgets"][1]["handlers"][0] = "fn".into();
    let document = load(&value).unwrap();
    let registry = registry();

    let mut tcl = registry
        .create_context(TclTkEmitter::ID, EmitOptions::default())
        .unwrap();
    assert!(emit(&mut tcl, &document).unwrap().contains("proc fn {}"));

    let mut rust = registry
        .create_context(RustEmitter::ID, EmitOptions::default())
        .unwrap();
    let err = emit(&mut rust, &document).unwrap_err();
    assert!(matches!(
        err,
        EmitError::Backend { ref backend, ref source }
            if backend == "rust" && source.message().contains("`fn`")
    ));
}
