//! Tests for the Rust backend.

use trellis_backends::{RustEmitter, register_builtin};
use trellis_core::{EmitError, SourceEvent, SourceNode};
use trellis_emit::{EmitOptions, EmitterContext, EmitterRegistry, emit};
use trellis_ir::{BridgeDocument, HandlerId, WidgetId, build};

fn context() -> EmitterContext {
    let mut registry = EmitterRegistry::new();
    register_builtin(&mut registry).unwrap();
    registry
        .create_context(RustEmitter::ID, EmitOptions::default())
        .unwrap()
}

fn document(handler_code: &str) -> BridgeDocument {
    let root = SourceNode::new("Row")
        .with_property("gap", 4)
        .with_child(
            SourceNode::new("Button")
                .with_property("text", "Go")
                .with_property("width", 120)
                .with_event(SourceEvent::new("click").with_implementation("rust", handler_code)),
        )
        .with_child(
            SourceNode::new("Text")
                .with_property("color", "red")
                .with_property("font", "bold 14px Sans"),
        );
    build(&root, false).unwrap()
}

#[test]
fn test_document_is_valid_rust() {
    let mut ctx = context();
    let source = emit(&mut ctx, &document("println!(\"go\");")).unwrap();

    assert!(source.starts_with("// Generated by trellis "));
    syn::parse_file(&source).unwrap();
    assert!(source.contains("pub const WINDOW: Window = Window {"));
    assert!(source.contains("pub fn handler_0() {"));
    assert!(source.contains("pub const WIDGET_0: Widget = Widget {"));
    assert!(source.contains("pub const WIDGET_2: Widget = Widget {"));
    assert!(source.contains("pub static WIDGETS: &[Widget]"));
    assert!(source.contains("handler_0 as fn()"));
}

#[test]
fn test_single_property() {
    let mut ctx = context();
    let document = document("go();");

    let text = ctx
        .emit_property(&document, &WidgetId::new("widget-1"), "text")
        .unwrap();
    assert_eq!(text, "pub const WIDGET_1_TEXT: Value = Value::Text(\"Go\");\n");

    let width = ctx
        .emit_property(&document, &WidgetId::new("widget-1"), "width")
        .unwrap();
    assert_eq!(width, "pub const WIDGET_1_WIDTH: Value = Value::Px(120.0);\n");

    let color = ctx
        .emit_property(&document, &WidgetId::new("widget-2"), "foreground")
        .unwrap();
    assert_eq!(
        color,
        "pub const WIDGET_2_FOREGROUND: Value = Value::Color(\"#ff0000\");\n"
    );
}

#[test]
fn test_layout_item() {
    let mut ctx = context();
    let layout = ctx
        .emit_layout(&document("go();"), &WidgetId::new("widget-1"))
        .unwrap();
    assert!(layout.starts_with("pub const WIDGET_1_LAYOUT: Layout = Layout::Flow {"));
    assert!(layout.contains("direction: Direction::Row"));
    assert!(layout.contains("gap: (4.0, 0.0)"));
}

#[test]
fn test_invalid_handler_code_fails() {
    let mut ctx = context();
    let document = document("let = ;");

    let err = emit(&mut ctx, &document).unwrap_err();
    assert!(matches!(err, EmitError::Backend { ref backend, .. } if backend == "rust"));
    assert!(err.to_string().contains("handler `handler-0` has invalid Rust code"));

    let err = ctx
        .emit_handler(&document, &HandlerId::new("handler-0"))
        .unwrap_err();
    assert!(matches!(err, EmitError::Backend { .. }));
}
