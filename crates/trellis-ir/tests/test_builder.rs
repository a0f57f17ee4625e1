use trellis_core::{BuildError, SourceDocument, SourceEvent, SourceNode, WindowSpec};
use trellis_ir::{
    Alignment, Builder, FlowDirection, Gap, GridOptions, LayoutDescriptor, LayoutModel,
    WidgetId, WidgetKind, build,
};

fn window_with_background(background: &str) -> WindowSpec {
    WindowSpec {
        background: Some(background.to_string()),
        ..WindowSpec::default()
    }
}

fn background_of(document: &trellis_ir::BridgeDocument, index: usize) -> String {
    document.widgets()[index]
        .background()
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[test]
fn test_three_level_background_inheritance() {
    let root = SourceNode::new("Container").with_child(
        SourceNode::new("Row")
            .with_property("background", "#ff0000")
            .with_child(SourceNode::new("Button").with_property("text", "OK")),
    );

    let document = Builder::new()
        .build_root(&root, &window_with_background("#101010"))
        .unwrap();

    assert_eq!(background_of(&document, 0), "#101010");
    assert_eq!(background_of(&document, 1), "#ff0000");
    assert_eq!(background_of(&document, 2), "#ff0000");
}

#[test]
fn test_background_inherits_transitively() {
    let root = SourceNode::new("Column").with_child(
        SourceNode::new("Container")
            .with_property("background", "navy")
            .with_child(
                SourceNode::new("Container")
                    .with_child(SourceNode::new("Container").with_child(SourceNode::new("Text"))),
            ),
    );
    let document = Builder::new()
        .build_root(&root, &window_with_background("white"))
        .unwrap();

    assert_eq!(background_of(&document, 0), "#ffffff");
    for index in 1..=4 {
        assert_eq!(background_of(&document, index), "#000080", "widget {index}");
    }
}

#[test]
fn test_no_window_background_leaves_unset() {
    let root = SourceNode::new("Column").with_child(SourceNode::new("Text"));
    let document = build(&root, false).unwrap();
    assert!(document.widgets().iter().all(|w| w.background().is_none()));
}

#[test]
fn test_transparent_background_inherits() {
    let root = SourceNode::new("Column")
        .with_property("background", "#123456")
        .with_child(SourceNode::new("Container").with_property("background", "transparent"));
    let document = build(&root, false).unwrap();
    assert_eq!(background_of(&document, 1), "#123456");
}

#[test]
fn test_grid_position_beats_coordinates() {
    let root = SourceNode::new("Grid").with_child(
        SourceNode::new("Button")
            .with_property("row", 2)
            .with_property("column", 1)
            .with_property("x", 10)
            .with_property("y", 20),
    );
    let document = build(&root, false).unwrap();
    assert_eq!(
        document.widgets()[1].layout.descriptor,
        LayoutDescriptor::Grid(GridOptions {
            row: 2,
            column: 1,
            row_span: 1,
            col_span: 1
        })
    );
}

#[test]
fn test_mixed_siblings_resolve_independently() {
    let root = SourceNode::new("Row")
        .with_property("gap", 4)
        .with_child(SourceNode::new("Text"))
        .with_child(SourceNode::new("Text").with_property("row", 0))
        .with_child(SourceNode::new("Text").with_property("x", 1));
    let document = build(&root, false).unwrap();
    let models: Vec<_> = document.widgets()[1..]
        .iter()
        .map(|w| w.layout.descriptor.model())
        .collect();
    assert_eq!(
        models,
        [LayoutModel::Flow, LayoutModel::Grid, LayoutModel::Absolute]
    );
    let flow = document.widgets()[1].layout.descriptor;
    let flow = flow.as_flow().unwrap();
    assert_eq!(flow.direction, FlowDirection::Row);
    assert_eq!(flow.gap, Gap::new(4.0, 0.0));
}

#[test]
fn test_every_widget_gets_a_layout() {
    let root = SourceNode::new("Container")
        .with_child(SourceNode::new("Container").with_child(SourceNode::new("Image")));
    let document = build(&root, false).unwrap();
    for widget in document.widgets() {
        assert_eq!(widget.layout.descriptor, LayoutDescriptor::default());
    }
}

#[test]
fn test_flow_alignment_from_parent() {
    let root = SourceNode::new("Column")
        .with_property("mainAxisAlignment", "spaceEvenly")
        .with_property("crossAxisAlignment", "stretch")
        .with_child(SourceNode::new("Button"));
    let document = build(&root, false).unwrap();
    let flow = *document.widgets()[1].layout.descriptor.as_flow().unwrap();
    assert_eq!(flow.main_align, Alignment::SpaceEvenly);
    assert_eq!(flow.cross_align, Alignment::Stretch);
}

#[test]
fn test_ids_in_preorder_and_parent_links() {
    let root = SourceNode::new("Column")
        .with_child(SourceNode::new("Row").with_child(SourceNode::new("Button")))
        .with_child(SourceNode::new("Text"));
    let document = build(&root, false).unwrap();

    let ids: Vec<_> = document.widgets().iter().map(|w| w.id.as_str()).collect();
    assert_eq!(ids, ["widget-0", "widget-1", "widget-2", "widget-3"]);

    let root_id = WidgetId::from_index(0);
    assert_eq!(document.widgets()[0].parent(), None);
    assert_eq!(
        document.widgets()[0].children,
        [WidgetId::from_index(1), WidgetId::from_index(3)]
    );
    assert_eq!(document.widgets()[3].parent(), Some(&root_id));
    assert_eq!(
        document.parent_of(&WidgetId::from_index(2)).unwrap().kind,
        WidgetKind::Frame
    );
}

#[test]
fn test_unknown_type_names_path() {
    let root = SourceNode::new("Column").with_child(
        SourceNode::new("Row")
            .with_child(SourceNode::new("Text"))
            .with_child(SourceNode::new("Hologram")),
    );
    let err = build(&root, false).unwrap_err();
    match &err {
        BuildError::UnknownWidgetType { type_name, path } => {
            assert_eq!(type_name, "Hologram");
            assert_eq!(path.to_string(), "Column/Row[0]/Hologram[1]");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        err.to_string(),
        "unknown widget type `Hologram` at Column/Row[0]/Hologram[1]"
    );
}

#[test]
fn test_missing_root() {
    let source = SourceDocument {
        root: None,
        ..SourceDocument::new(SourceNode::new("Column"))
    };
    assert_eq!(Builder::new().build(&source), Err(BuildError::MissingRoot));
}

#[test]
fn test_duplicate_handlers_share_one_entry() {
    let click = SourceEvent::new("click").with_implementation("tcl", "puts clicked");
    let root = SourceNode::new("Column")
        .with_child(SourceNode::new("Button").with_event(click.clone()))
        .with_child(SourceNode::new("Button").with_event(click));
    let document = build(&root, false).unwrap();

    assert_eq!(document.handlers().len(), 1);
    let handler = &document.handlers()[0];
    assert_eq!(handler.widget, WidgetId::from_index(1));
    assert_eq!(document.widgets()[1].handlers, [handler.id.clone()]);
    assert_eq!(document.widgets()[2].handlers, [handler.id.clone()]);
}

#[test]
fn test_handler_without_backend_implementation_is_kept() {
    let root = SourceNode::new("Button").with_event(
        SourceEvent::new("click")
            .named("onClick")
            .with_implementation("limbo", "sys->print(\"x\\n\");"),
    );
    let document = build(&root, false).unwrap();
    let handler = &document.handlers()[0];
    assert_eq!(handler.implementation("tcl"), None);
    assert!(handler.implementation("limbo").is_some());
    assert_eq!(handler.name.as_deref(), Some("onClick"));
}

#[test]
fn test_build_is_deterministic() {
    let text = r##"{
        "format": "kir",
        "window": {"title": "Demo", "background": "#101010"},
        "root": {
            "type": "Column",
            "gap": 6,
            "children": [
                {"type": "Text", "text": "Name", "color": "#ABC"},
                {"type": "Input", "width": "50%"},
                {"type": "Row", "children": [
                    {"type": "Button", "text": "Save",
                     "events": [{"event": "click", "implementations": {"tcl": "save"}}]},
                    {"type": "Button", "text": "Again",
                     "events": [{"event": "click", "implementations": {"tcl": "save"}}]}
                ]}
            ]
        }
    }"##;

    let render = || {
        let source = SourceDocument::from_json(text).unwrap();
        Builder::new().build(&source).unwrap().to_json().unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_source_name_lands_in_metadata() {
    let source = SourceDocument::new(SourceNode::new("Text"));
    let document = Builder::new()
        .source_name("ui/app.kir.json")
        .build(&source)
        .unwrap();
    assert_eq!(document.metadata.source.as_deref(), Some("ui/app.kir.json"));
    assert!(document.metadata.generator.starts_with("trellis "));
}
