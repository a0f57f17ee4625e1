//! Tests for the source IR model and its JSON loader.

use trellis_core::{BuildError, NodePath, SourceDocument, SourceNode, SourceValue};

#[test]
fn test_parse_minimal_document() {
    let json = r#"{"format": "kir", "root": {"type": "Column"}}"#;
    let doc = SourceDocument::from_json(json).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.node_type, "Column");
    assert!(root.children.is_empty());
    assert_eq!(doc.window.title, "Trellis App");
    assert_eq!(doc.window.width, 800);
    assert_eq!(doc.window.height, 600);
    assert!(doc.window.resizable);
    assert!(doc.window.background.is_none());
}

#[test]
fn test_properties_are_flattened() {
    let json = r##"{
        "root": {
            "type": "Button",
            "text": "OK",
            "width": 120,
            "enabled": true,
            "font": {"family": "Sans", "size": 14},
            "events": [{"event": "click", "handler": "onOk", "implementations": {"tcl": "puts ok"}}]
        }
    }"##;
    let doc = SourceDocument::from_json(json).unwrap();
    let root = doc.root().unwrap();

    assert_eq!(root.property("text"), Some(&SourceValue::String("OK".into())));
    assert_eq!(root.property("width"), Some(&SourceValue::Number(120.0)));
    assert_eq!(root.property("enabled"), Some(&SourceValue::Bool(true)));
    assert_eq!(
        root.property("font").and_then(|f| f.get("family")),
        Some(&SourceValue::String("Sans".into()))
    );
    assert!(!root.properties.contains_key("events"));
    assert!(!root.properties.contains_key("type"));

    assert_eq!(root.events.len(), 1);
    assert_eq!(root.events[0].event, "click");
    assert_eq!(root.events[0].handler.as_deref(), Some("onOk"));
    assert_eq!(root.events[0].implementations["tcl"], "puts ok");
}

#[test]
fn test_root_aliases() {
    for key in ["root", "app", "component"] {
        let json = format!(r#"{{"{key}": {{"type": "Row"}}}}"#);
        let doc = SourceDocument::from_json(&json).unwrap();
        assert_eq!(doc.root().unwrap().node_type, "Row");
    }
}

#[test]
fn test_missing_root() {
    let doc = SourceDocument::from_json(r#"{"format": "kir"}"#).unwrap();
    assert_eq!(doc.root().unwrap_err(), BuildError::MissingRoot);
}

#[test]
fn test_wrong_format_rejected() {
    let err = SourceDocument::from_json(r#"{"format": "tkir", "root": {"type": "Row"}}"#)
        .unwrap_err();
    assert!(matches!(err, BuildError::InvalidSource { .. }));
}

#[test]
fn test_malformed_json_rejected() {
    let err = SourceDocument::from_json("{ not json").unwrap_err();
    assert!(matches!(err, BuildError::InvalidSource { .. }));
}

#[test]
fn test_null_property_is_absent() {
    let doc = SourceDocument::from_json(r#"{"root": {"type": "Row", "gap": null}}"#).unwrap();
    let root = doc.root().unwrap();
    assert!(root.property("gap").is_none());
    assert!(!root.has_any(&["gap"]));
}

#[test]
fn test_builder_helpers() {
    let node = SourceNode::new("Row")
        .with_property("gap", 8)
        .with_child(SourceNode::new("Button").with_property("text", "Go"));
    assert_eq!(node.first_property(&["spacing", "gap"]), Some(&SourceValue::Number(8.0)));
    assert_eq!(node.children[0].node_type, "Button");
}

#[test]
fn test_node_path_display() {
    let path = NodePath::root("Column").child("Row", 0).child("Button", 2);
    assert_eq!(path.depth(), 3);
    insta::assert_snapshot!(path.to_string(), @"Column/Row[0]/Button[2]");
}
