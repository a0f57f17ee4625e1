//! Tests for the Tcl/Tk backend.

use trellis_backends::{TclTkEmitter, register_builtin};
use trellis_core::{SourceDocument, SourceEvent, SourceNode, WindowSpec};
use trellis_emit::{EmitOptions, EmitterRegistry, emit};
use trellis_ir::{BridgeDocument, Builder, WidgetId, build};

fn registry() -> EmitterRegistry {
    let mut registry = EmitterRegistry::new();
    register_builtin(&mut registry).unwrap();
    registry
}

fn script(document: &BridgeDocument) -> String {
    let mut ctx = registry()
        .create_context(TclTkEmitter::ID, EmitOptions::default().with_comments(false))
        .unwrap();
    let script = emit(&mut ctx, document).unwrap();
    ctx.release();
    script
}

fn demo() -> BridgeDocument {
    let root = SourceNode::new("Column")
        .with_property("gap", 8)
        .with_child(
            SourceNode::new("Button").with_property("text", "Go").with_event(
                SourceEvent::new("click")
                    .named("onGo")
                    .with_implementation("tcl", "puts go"),
            ),
        )
        .with_child(SourceNode::new("Text").with_property("text", "Hello"));
    let source = SourceDocument::new(root).with_window(WindowSpec {
        title: "Demo".to_string(),
        width: 320,
        height: 200,
        resizable: false,
        background: Some("#eeeeee".to_string()),
    });
    Builder::new().build(&source).unwrap()
}

#[test]
fn test_whole_script() {
    insta::assert_snapshot!(script(&demo()).trim_end(), @r"
    package require Tk
    wm title . {Demo}
    wm geometry . 320x200
    wm resizable . 0 0
    . configure -background #eeeeee

    proc handler_0 {} {
        puts go
    }

    frame .widget_0
    .widget_0 configure -background #eeeeee
    pack .widget_0 -fill both -expand 1
    button .widget_0.widget_1
    .widget_0.widget_1 configure -background #eeeeee
    .widget_0.widget_1 configure -text {Go}
    .widget_0.widget_1 configure -command handler_0
    pack .widget_0.widget_1 -side top -anchor w
    label .widget_0.widget_2
    .widget_0.widget_2 configure -background #eeeeee
    .widget_0.widget_2 configure -text {Hello}
    pack .widget_0.widget_2 -side top -anchor w -pady {8 0}

    tkwait window .
    ");
}

#[test]
fn test_comments_name_generator_and_window() {
    let mut ctx = registry()
        .create_context("tcltk", EmitOptions::default())
        .unwrap();
    let script = emit(&mut ctx, &demo()).unwrap();
    assert!(script.starts_with("# Generated by trellis "));
    assert!(script.contains("# Window: Demo (320x200)"));
    assert!(script.contains("# onGo: click on widget-1"));
    assert!(script.contains("# widget-1 (Button)"));
}

#[test]
fn test_handlers_without_tcl_code_are_skipped() {
    let root = SourceNode::new("Row").with_child(
        SourceNode::new("Button")
            .with_event(SourceEvent::new("click").with_implementation("rust", "run();"))
            .with_event(SourceEvent::new("hover").with_implementation("tcl", "bell")),
    );
    let script = script(&build(&root, false).unwrap());

    assert!(!script.contains("handler_0"));
    assert!(script.contains("proc handler_1 {} {"));
    assert!(script.contains("bind .widget_0.widget_1 <Enter> handler_1"));
    assert!(!script.contains("-command"));
}

#[test]
fn test_grid_and_place_layouts() {
    let root = SourceNode::new("Container")
        .with_child(
            SourceNode::new("Button")
                .with_property("row", 1)
                .with_property("column", 2)
                .with_property("colSpan", 3),
        )
        .with_child(
            SourceNode::new("Image")
                .with_property("x", 10)
                .with_property("y", 20)
                .with_property("width", "50%"),
        );
    let script = script(&build(&root, false).unwrap());

    assert!(script.contains("grid .widget_0.widget_1 -row 1 -column 2 -columnspan 3"));
    assert!(script.contains("place .widget_0.widget_2 -x 10 -y 20 -relwidth 0.5"));
}

#[test]
fn test_menus() {
    let root = SourceNode::new("MenuBar").with_child(
        SourceNode::new("Menu").with_property("text", "File").with_child(
            SourceNode::new("MenuItem")
                .with_property("text", "Quit")
                .with_event(SourceEvent::new("click").with_implementation("tcl", "exit")),
        ),
    );
    let script = script(&build(&root, false).unwrap());

    assert!(script.contains("menu .widget_0 -tearoff 0\n. configure -menu .widget_0\n"));
    assert!(script.contains(".widget_0 add cascade -label {File} -menu .widget_0.widget_1"));
    assert!(script.contains(".widget_0.widget_1 add command -label {Quit} -command handler_0"));
    assert!(!script.contains("pack ."));
}

#[test]
fn test_single_widget_through_context() {
    let document = demo();
    let mut ctx = registry()
        .create_context("tcltk", EmitOptions::default().with_comments(false))
        .unwrap();

    let widget = ctx
        .emit_widget(&document, &WidgetId::new("widget-2"))
        .unwrap();
    insta::assert_snapshot!(widget.trim_end(), @r"
    label .widget_0.widget_2
    .widget_0.widget_2 configure -background #eeeeee
    .widget_0.widget_2 configure -text {Hello}
    ");

    let property = ctx
        .emit_property(&document, &WidgetId::new("widget-1"), "text")
        .unwrap();
    assert_eq!(property, ".widget_0.widget_1 configure -text {Go}\n");
}
