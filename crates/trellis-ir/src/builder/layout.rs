//! Layout resolution.
//!
//! A widget's layout model is picked by the first matching rule:
//! grid position, absolute coordinates, flow under a directional parent,
//! and finally a default flow. The result never depends on anything but the
//! node and the context derived from its parent.

use super::normalize::{pixels, size};
use crate::{
    AbsoluteOptions, Alignment, Dimension, FlowDirection, FlowOptions, Gap, GridOptions,
    LayoutDescriptor,
};
use tracing::trace;
use trellis_core::{SourceNode, SourceValue};

const ROW_KEYS: &[&str] = &["row"];
const COLUMN_KEYS: &[&str] = &["column"];
const ROW_SPAN_KEYS: &[&str] = &["rowSpan", "rowspan"];
const COL_SPAN_KEYS: &[&str] = &["colSpan", "columnSpan", "columnspan", "colspan"];
const X_KEYS: &[&str] = &["x", "left"];
const Y_KEYS: &[&str] = &["y", "top"];

const DIRECTION_KEYS: &[&str] = &["direction", "flexDirection"];
const MAIN_ALIGN_KEYS: &[&str] = &["mainAxisAlignment", "justifyContent", "justify", "mainAlign"];
const CROSS_ALIGN_KEYS: &[&str] = &["crossAxisAlignment", "alignItems", "align", "crossAlign"];
const GAP_KEYS: &[&str] = &["gap", "spacing"];

/// Layout intent a container imposes on its children.
///
/// Derived once per parent and shared by all of its children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParentLayout {
    /// `None` for containers with no flow intent.
    pub direction: Option<FlowDirection>,
    pub main_align: Alignment,
    pub cross_align: Alignment,
    pub gap: Gap,
}

impl Default for ParentLayout {
    fn default() -> Self {
        Self {
            direction: None,
            main_align: Alignment::Start,
            cross_align: Alignment::Start,
            gap: Gap::default(),
        }
    }
}

impl ParentLayout {
    /// Reads a container's direction, alignment and gap.
    #[must_use]
    pub fn from_node(node: &SourceNode, verbose: bool) -> Self {
        let centered = node.node_type.eq_ignore_ascii_case("center");
        let direction = if node.node_type.eq_ignore_ascii_case("row") {
            Some(FlowDirection::Row)
        } else if node.node_type.eq_ignore_ascii_case("column") || centered {
            Some(FlowDirection::Column)
        } else {
            node.first_property(DIRECTION_KEYS)
                .and_then(SourceValue::as_str)
                .and_then(FlowDirection::parse)
        };

        let default_align = if centered {
            Alignment::Center
        } else {
            Alignment::Start
        };

        let mut main_align = alignment(node, MAIN_ALIGN_KEYS, default_align, verbose);
        if main_align == Alignment::Stretch {
            ambiguity!(
                verbose,
                node = %node.node_type,
                "stretch is not a main-axis alignment, using start"
            );
            main_align = Alignment::Start;
        }
        let cross_align = alignment(node, CROSS_ALIGN_KEYS, default_align, verbose);

        let gap = match node.first_property(GAP_KEYS) {
            Some(raw) => split_gap(raw, direction).unwrap_or_else(|| {
                ambiguity!(verbose, node = %node.node_type, "unrecognized gap, using zero");
                Gap::default()
            }),
            None => Gap::default(),
        };

        Self {
            direction,
            main_align,
            cross_align,
            gap,
        }
    }

    #[must_use]
    pub fn is_directional(&self) -> bool {
        self.direction.is_some()
    }
}

fn alignment(node: &SourceNode, keys: &[&str], default: Alignment, verbose: bool) -> Alignment {
    let Some(raw) = node.first_property(keys) else {
        return default;
    };
    match raw.as_str().and_then(Alignment::parse) {
        Some(alignment) => alignment,
        None => {
            ambiguity!(
                verbose,
                node = %node.node_type,
                "unrecognized alignment {raw:?}, using start"
            );
            Alignment::Start
        }
    }
}

/// Splits a gap value into horizontal and vertical spacing.
///
/// A single number applies along the container's main axis.
fn split_gap(raw: &SourceValue, direction: Option<FlowDirection>) -> Option<Gap> {
    if let Some(map) = raw.as_map() {
        let horizontal = map.get("x").or_else(|| map.get("column")).and_then(pixels);
        let vertical = map.get("y").or_else(|| map.get("row")).and_then(pixels);
        if horizontal.is_none() && vertical.is_none() {
            return None;
        }
        return Some(Gap::new(
            horizontal.unwrap_or_default(),
            vertical.unwrap_or_default(),
        ));
    }

    let amount = pixels(raw)?;
    Some(match direction {
        Some(FlowDirection::Row) => Gap::new(amount, 0.0),
        Some(FlowDirection::Column) | None => Gap::new(0.0, amount),
    })
}

/// Resolves a node's layout against its parent's context.
///
/// Pure: the same node and context always yield the same descriptor.
#[must_use]
pub fn resolve(node: &SourceNode, parent: Option<&ParentLayout>) -> LayoutDescriptor {
    resolve_with(node, parent, false)
}

/// Like [`resolve`], reporting unusable grid indices and coordinates at
/// info level when `verbose` is set.
#[must_use]
pub fn resolve_with(
    node: &SourceNode,
    parent: Option<&ParentLayout>,
    verbose: bool,
) -> LayoutDescriptor {
    if node.has_any(ROW_KEYS) || node.has_any(COLUMN_KEYS) {
        return LayoutDescriptor::Grid(GridOptions {
            row: grid_field(node, ROW_KEYS, 0, verbose),
            column: grid_field(node, COLUMN_KEYS, 0, verbose),
            row_span: grid_field(node, ROW_SPAN_KEYS, 1, verbose).max(1),
            col_span: grid_field(node, COL_SPAN_KEYS, 1, verbose).max(1),
        });
    }

    if node.has_any(X_KEYS) || node.has_any(Y_KEYS) {
        let dimension = |name: &str| node.property(name).and_then(size).unwrap_or_else(Dimension::auto);
        return LayoutDescriptor::Absolute(AbsoluteOptions {
            x: coordinate(node, X_KEYS, verbose),
            y: coordinate(node, Y_KEYS, verbose),
            width: dimension("width"),
            height: dimension("height"),
        });
    }

    if let Some(context) = parent
        && let Some(direction) = context.direction
    {
        return LayoutDescriptor::Flow(FlowOptions {
            direction,
            main_align: context.main_align,
            cross_align: context.cross_align,
            gap: context.gap,
        });
    }

    trace!(node = %node.node_type, "no layout intent, using default flow");
    LayoutDescriptor::default()
}

fn grid_field(node: &SourceNode, keys: &[&str], default: u32, verbose: bool) -> u32 {
    let Some(raw) = node.first_property(keys) else {
        return default;
    };
    grid_index(raw).unwrap_or_else(|| {
        ambiguity!(
            verbose,
            node = %node.node_type,
            "invalid {} {raw:?}, using {default}",
            keys[0]
        );
        default
    })
}

fn grid_index(raw: &SourceValue) -> Option<u32> {
    match raw {
        SourceValue::Number(n) if n.is_finite() && *n >= 0.0 => Some(n.trunc() as u32),
        SourceValue::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Absolute coordinates must be pixel values.
fn coordinate(node: &SourceNode, keys: &[&str], verbose: bool) -> f64 {
    let Some(raw) = node.first_property(keys) else {
        return 0.0;
    };
    pixels(raw).unwrap_or_else(|| {
        ambiguity!(
            verbose,
            node = %node.node_type,
            "{} {raw:?} is not a pixel value, using 0",
            keys[0]
        );
        0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt as _};
    use tracing_subscriber::util::SubscriberInitExt as _;

    fn row_parent() -> ParentLayout {
        ParentLayout::from_node(
            &SourceNode::new("Row")
                .with_property("justifyContent", "space-between")
                .with_property("alignItems", "center")
                .with_property("gap", 8),
            false,
        )
    }

    #[test]
    fn test_grid_wins_over_absolute() {
        let node = SourceNode::new("Button")
            .with_property("row", 2)
            .with_property("column", 1)
            .with_property("x", 10)
            .with_property("y", 20);
        let layout = resolve(&node, Some(&row_parent()));
        assert_eq!(
            layout,
            LayoutDescriptor::Grid(GridOptions {
                row: 2,
                column: 1,
                row_span: 1,
                col_span: 1
            })
        );
    }

    #[test]
    fn test_grid_spans_clamped() {
        let node = SourceNode::new("Text")
            .with_property("column", 3)
            .with_property("rowSpan", 0)
            .with_property("colSpan", 2);
        let grid = *resolve(&node, None).as_grid().unwrap();
        assert_eq!(grid.row, 0);
        assert_eq!(grid.column, 3);
        assert_eq!(grid.row_span, 1);
        assert_eq!(grid.col_span, 2);
    }

    #[test]
    fn test_absolute_defaults_to_auto_size() {
        let node = SourceNode::new("Image")
            .with_property("x", 10)
            .with_property("width", "50%");
        let place = *resolve(&node, None).as_absolute().unwrap();
        assert_eq!(place.x, 10.0);
        assert_eq!(place.y, 0.0);
        assert_eq!(place.width, Dimension::percent(50.0));
        assert!(place.height.is_auto());
    }

    #[test]
    fn test_flow_under_row_parent() {
        let layout = resolve(&SourceNode::new("Button"), Some(&row_parent()));
        assert_eq!(
            layout,
            LayoutDescriptor::Flow(FlowOptions {
                direction: FlowDirection::Row,
                main_align: Alignment::SpaceBetween,
                cross_align: Alignment::Center,
                gap: Gap::new(8.0, 0.0),
            })
        );
    }

    #[test]
    fn test_default_flow_without_context() {
        let parent = ParentLayout::from_node(&SourceNode::new("Container"), false);
        assert!(!parent.is_directional());
        assert_eq!(
            resolve(&SourceNode::new("Text"), Some(&parent)),
            LayoutDescriptor::default()
        );
        assert_eq!(resolve(&SourceNode::new("Text"), None), LayoutDescriptor::default());
    }

    #[test]
    fn test_generic_container_direction_property() {
        let parent = ParentLayout::from_node(
            &SourceNode::new("Container").with_property("flexDirection", "row"),
            false,
        );
        assert_eq!(parent.direction, Some(FlowDirection::Row));
    }

    #[test]
    fn test_center_parent() {
        let parent = ParentLayout::from_node(&SourceNode::new("Center"), false);
        assert_eq!(parent.direction, Some(FlowDirection::Column));
        assert_eq!(parent.main_align, Alignment::Center);
        assert_eq!(parent.cross_align, Alignment::Center);
    }

    #[test]
    fn test_gap_map_and_column_number() {
        let mut gap = BTreeMap::new();
        gap.insert("x".to_string(), SourceValue::from(4));
        gap.insert("y".to_string(), SourceValue::from("6px"));
        let parent = ParentLayout::from_node(
            &SourceNode::new("Row").with_property("gap", SourceValue::Map(gap)),
            false,
        );
        assert_eq!(parent.gap, Gap::new(4.0, 6.0));

        let parent = ParentLayout::from_node(&SourceNode::new("Column").with_property("gap", 12), false);
        assert_eq!(parent.gap, Gap::new(0.0, 12.0));
    }

    #[test]
    fn test_unknown_alignment_falls_back_to_start() {
        let parent = ParentLayout::from_node(
            &SourceNode::new("Row").with_property("mainAxisAlignment", "sideways"),
            false,
        );
        assert_eq!(parent.main_align, Alignment::Start);
    }

    /// Collects the messages of events recorded while it is the default subscriber.
    #[derive(Clone, Default)]
    struct LogCapture {
        logs: Arc<Mutex<Vec<String>>>,
    }

    impl<S: tracing::Subscriber> Layer<S> for LogCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor(String::new());
            event.record(&mut visitor);
            self.logs.lock().unwrap().push(visitor.0);
        }
    }

    struct MessageVisitor(String);

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{value:?}");
            }
        }
    }

    fn resolve_logged(node: &SourceNode) -> (LayoutDescriptor, Vec<String>) {
        let capture = LogCapture::default();
        let logs = Arc::clone(&capture.logs);
        let layout = {
            let _guard = tracing_subscriber::registry().with(capture).set_default();
            resolve_with(node, None, true)
        };
        let logs = logs.lock().unwrap().clone();
        (layout, logs)
    }

    #[test]
    fn test_invalid_grid_indices_are_reported() {
        let node = SourceNode::new("Text")
            .with_property("row", -2)
            .with_property("column", "second")
            .with_property("colSpan", 3);
        let (layout, logs) = resolve_logged(&node);

        let grid = *layout.as_grid().unwrap();
        assert_eq!((grid.row, grid.column, grid.col_span), (0, 0, 3));
        assert_eq!(logs.len(), 2, "{logs:?}");
        assert!(logs[0].starts_with("invalid row"), "{logs:?}");
        assert!(logs[1].starts_with("invalid column"), "{logs:?}");
    }

    #[test]
    fn test_non_pixel_coordinates_are_reported() {
        let node = SourceNode::new("Image")
            .with_property("x", "10%")
            .with_property("y", 4);
        let (layout, logs) = resolve_logged(&node);

        let place = *layout.as_absolute().unwrap();
        assert_eq!((place.x, place.y), (0.0, 4.0));
        assert_eq!(logs.len(), 1, "{logs:?}");
        assert!(logs[0].contains("is not a pixel value"), "{logs:?}");
    }

    #[test]
    fn test_valid_layout_logs_nothing_verbose() {
        let node = SourceNode::new("Text")
            .with_property("row", "1")
            .with_property("column", 2.7);
        let (layout, logs) = resolve_logged(&node);
        assert_eq!(layout.as_grid().unwrap().column, 2);
        assert!(logs.is_empty(), "{logs:?}");
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let node = SourceNode::new("Button").with_property("left", 3);
        let parent = row_parent();
        assert_eq!(resolve(&node, Some(&parent)), resolve(&node, Some(&parent)));
    }
}
