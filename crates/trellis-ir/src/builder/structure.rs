//! Depth-first lowering of the source tree.

use super::handlers::PendingHandler;
use super::layout::{ParentLayout, resolve_with};
use super::normalize::normalize_properties;
use super::pass::BuildDraft;
use crate::{BridgeDocument, BridgeWidget, Color, ResolvedLayout, WidgetId, WidgetKind, Window};
use trellis_core::{BuildError, NodePath, SourceNode, WindowSpec};

struct Lowering {
    document: BridgeDocument,
    pending: Vec<PendingHandler>,
    verbose: bool,
}

/// Lowers `root` into a draft with every widget, property and layout
/// resolved. Handlers are only collected; no table exists yet.
pub(crate) fn lower(
    root: &SourceNode,
    window: &WindowSpec,
    verbose: bool,
) -> Result<BuildDraft, BuildError> {
    let mut lowering = Lowering {
        document: BridgeDocument::new(lower_window(window, verbose)),
        pending: Vec::new(),
        verbose,
    };
    lowering.lower_node(root, &NodePath::root(&root.node_type), None)?;

    Ok(BuildDraft {
        document: lowering.document,
        pending: lowering.pending,
    })
}

fn lower_window(spec: &WindowSpec, verbose: bool) -> Window {
    let background = spec.background.as_deref().and_then(|text| {
        let color = Color::parse(text);
        if color.is_none() {
            ambiguity!(verbose, background = text, "unrecognized window background ignored");
        }
        color.filter(|color| !color.is_transparent())
    });

    Window {
        title: spec.title.clone(),
        width: spec.width,
        height: spec.height,
        resizable: spec.resizable,
        background,
    }
}

impl Lowering {
    fn lower_node(
        &mut self,
        node: &SourceNode,
        path: &NodePath,
        parent: Option<(&WidgetId, &ParentLayout)>,
    ) -> Result<WidgetId, BuildError> {
        let kind = WidgetKind::from_source_type(&node.node_type).ok_or_else(|| {
            BuildError::UnknownWidgetType {
                type_name: node.node_type.clone(),
                path: path.clone(),
            }
        })?;

        let id = WidgetId::from_index(self.document.widgets().len());
        let descriptor = resolve_with(node, parent.map(|(_, context)| context), self.verbose);
        let layout = ResolvedLayout::new(parent.map(|(parent_id, _)| parent_id.clone()), descriptor);

        self.pending.extend(
            node.events
                .iter()
                .map(|event| PendingHandler::new(id.clone(), event.clone())),
        );

        let index = self.document.push_widget(BridgeWidget {
            id: id.clone(),
            kind,
            source_type: node.node_type.clone(),
            properties: normalize_properties(node, self.verbose),
            layout,
            children: Vec::new(),
            handlers: Vec::new(),
        });

        if node.children.is_empty() {
            return Ok(id);
        }
        if !kind.is_container() {
            ambiguity!(self.verbose, %path, "children on a non-container widget");
        }

        let context = ParentLayout::from_node(node, self.verbose);
        let mut children = Vec::with_capacity(node.children.len());
        for (i, child) in node.children.iter().enumerate() {
            let child_path = path.child(&child.node_type, i);
            children.push(self.lower_node(child, &child_path, Some((&id, &context)))?);
        }

        if let Some(widget) = self.document.widget_at_mut(index) {
            widget.children = children;
        }
        Ok(id)
    }
}
