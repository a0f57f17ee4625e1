//! The bridge document: window metadata, widget tree and handler table.

use crate::{Color, HandlerId, PropertyValue, ResolvedLayout, WidgetId, WidgetKind};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use trellis_core::{BuildError, BuildPass};

/// Format tag written into every bridge document.
pub const BRIDGE_FORMAT: &str = "bridge";

/// Version of the bridge document layout.
pub const BRIDGE_VERSION: &str = "1.0";

/// Name of the canonical background property.
pub const BACKGROUND: &str = "background";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
}

impl Default for Window {
    fn default() -> Self {
        Self {
            title: "Trellis App".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            background: None,
        }
    }
}

/// Provenance of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub generator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            generator: concat!("trellis ", env!("CARGO_PKG_VERSION")).to_string(),
            source: None,
        }
    }
}

/// One node of the bridge tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeWidget {
    pub id: WidgetId,
    pub kind: WidgetKind,
    /// Source type the widget was lowered from, kept for diagnostics.
    pub source_type: String,
    pub properties: BTreeMap<String, PropertyValue>,
    pub layout: ResolvedLayout,
    #[serde(default)]
    pub children: Vec<WidgetId>,
    #[serde(default)]
    pub handlers: Vec<HandlerId>,
}

impl BridgeWidget {
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    #[must_use]
    pub fn parent(&self) -> Option<&WidgetId> {
        self.layout.parent.as_ref()
    }

    #[must_use]
    pub fn background(&self) -> Option<&PropertyValue> {
        self.properties.get(BACKGROUND)
    }

    /// The `text` property, if it is a string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.property("text").and_then(PropertyValue::as_str)
    }
}

/// An entry of the deduplicated handler table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handler {
    pub id: HandlerId,
    pub event: String,
    /// First widget the handler was found on.
    pub widget: WidgetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub implementations: BTreeMap<String, String>,
}

impl Handler {
    /// Source text for a target language. `None` means the backend skips it.
    #[must_use]
    pub fn implementation(&self, language: &str) -> Option<&str> {
        self.implementations.get(language).map(String::as_str)
    }
}

/// Root of the bridge IR.
///
/// Widgets are stored in depth-first pre-order, so the root is always the
/// first entry and every parent precedes its children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeDocument {
    pub format: String,
    pub version: String,
    #[serde(default)]
    pub metadata: Metadata,
    pub window: Window,
    widgets: Vec<BridgeWidget>,
    #[serde(default)]
    handlers: Vec<Handler>,
    #[serde(skip)]
    widget_index: HashMap<WidgetId, usize>,
}

impl PartialEq for BridgeDocument {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format
            && self.version == other.version
            && self.metadata == other.metadata
            && self.window == other.window
            && self.widgets == other.widgets
            && self.handlers == other.handlers
    }
}

impl BridgeDocument {
    /// Creates an empty document.
    #[must_use]
    pub fn new(window: Window) -> Self {
        Self {
            format: BRIDGE_FORMAT.to_string(),
            version: BRIDGE_VERSION.to_string(),
            metadata: Metadata::default(),
            window,
            widgets: Vec::new(),
            handlers: Vec::new(),
            widget_index: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub(crate) fn push_widget(&mut self, widget: BridgeWidget) -> usize {
        let index = self.widgets.len();
        self.widget_index.insert(widget.id.clone(), index);
        self.widgets.push(widget);
        index
    }

    pub(crate) fn widget_at_mut(&mut self, index: usize) -> Option<&mut BridgeWidget> {
        self.widgets.get_mut(index)
    }

    pub(crate) fn widget_mut(&mut self, id: &WidgetId) -> Option<&mut BridgeWidget> {
        let index = *self.widget_index.get(id)?;
        self.widgets.get_mut(index)
    }

    pub(crate) fn set_handlers(&mut self, handlers: Vec<Handler>) {
        self.handlers = handlers;
    }

    pub(crate) fn index_of(&self, id: &WidgetId) -> Option<usize> {
        self.widget_index.get(id).copied()
    }

    /// All widgets in pre-order.
    #[must_use]
    pub fn widgets(&self) -> &[BridgeWidget] {
        &self.widgets
    }

    /// The handler table in first-occurrence order.
    #[must_use]
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    #[must_use]
    pub fn root(&self) -> Option<&BridgeWidget> {
        self.widgets.first()
    }

    #[must_use]
    pub fn widget(&self, id: &WidgetId) -> Option<&BridgeWidget> {
        self.index_of(id).and_then(|index| self.widgets.get(index))
    }

    #[must_use]
    pub fn handler(&self, id: &HandlerId) -> Option<&Handler> {
        self.handlers.iter().find(|handler| &handler.id == id)
    }

    /// Children of a widget, in order. Unknown ids yield nothing.
    pub fn children_of<'a>(&'a self, id: &WidgetId) -> impl Iterator<Item = &'a BridgeWidget> + 'a {
        self.widget(id)
            .into_iter()
            .flat_map(|widget| widget.children.iter())
            .filter_map(|child| self.widget(child))
    }

    #[must_use]
    pub fn parent_of(&self, id: &WidgetId) -> Option<&BridgeWidget> {
        self.widget(id)
            .and_then(BridgeWidget::parent)
            .and_then(|parent| self.widget(parent))
    }

    /// Handlers referenced by a widget, in reference order.
    pub fn handlers_of<'a>(&'a self, widget: &'a BridgeWidget) -> impl Iterator<Item = &'a Handler> + 'a {
        widget.handlers.iter().filter_map(|id| self.handler(id))
    }

    /// Checks the tree invariant: ids are well formed and unique, every
    /// referenced child and handler exists, each non-root widget has exactly
    /// one parent that lists it as a child, the root has no parent, and every
    /// widget is reachable from the root without cycles.
    ///
    /// # Errors
    /// Returns the first violation found, tagged with [`BuildPass::Validation`].
    pub fn validate(&self) -> Result<(), BuildError> {
        self.validate_in(BuildPass::Validation)
    }

    pub(crate) fn validate_in(&self, pass: BuildPass) -> Result<(), BuildError> {
        let root = self.root().ok_or(BuildError::MissingRoot)?;

        let mut ids = HashSet::with_capacity(self.widgets.len());
        for widget in &self.widgets {
            if !widget.id.is_valid() {
                return Err(BuildError::InvalidId {
                    pass,
                    id: widget.id.to_string(),
                });
            }
            if !ids.insert(&widget.id) {
                return Err(BuildError::DuplicateWidgetId {
                    pass,
                    widget: widget.id.to_string(),
                });
            }
        }

        let mut handler_ids: HashSet<&HandlerId> = HashSet::with_capacity(self.handlers.len());
        for handler in &self.handlers {
            if !handler.id.is_valid() {
                return Err(BuildError::InvalidId {
                    pass,
                    id: handler.id.to_string(),
                });
            }
            if !handler_ids.insert(&handler.id) {
                return Err(BuildError::DuplicateHandlerId {
                    pass,
                    handler: handler.id.to_string(),
                });
            }
        }

        let mut claimed: HashMap<&WidgetId, &WidgetId> = HashMap::new();

        for widget in &self.widgets {
            for child in &widget.children {
                let Some(child_widget) = self.widget(child) else {
                    return Err(BuildError::DanglingChild {
                        pass,
                        widget: widget.id.to_string(),
                        child: child.to_string(),
                    });
                };
                if child == &root.id {
                    return Err(BuildError::Cycle {
                        pass,
                        widget: child.to_string(),
                    });
                }
                let already_claimed = claimed.insert(child, &widget.id).is_some();
                if already_claimed || child_widget.parent() != Some(&widget.id) {
                    return Err(BuildError::MultipleParents {
                        pass,
                        widget: widget.id.to_string(),
                        child: child.to_string(),
                    });
                }
            }
            for handler in &widget.handlers {
                if !handler_ids.contains(handler) {
                    return Err(BuildError::DanglingHandler {
                        pass,
                        widget: widget.id.to_string(),
                        handler: handler.to_string(),
                    });
                }
            }
        }

        // A parent link must be backed by the parent's child list.
        for widget in &self.widgets {
            if let Some(parent) = widget.parent()
                && !claimed.contains_key(&widget.id)
            {
                return Err(BuildError::ParentMismatch {
                    pass,
                    widget: widget.id.to_string(),
                    parent: parent.to_string(),
                });
            }
        }

        for handler in &self.handlers {
            if self.widget(&handler.widget).is_none() {
                return Err(BuildError::DanglingHandler {
                    pass,
                    widget: handler.widget.to_string(),
                    handler: handler.id.to_string(),
                });
            }
        }

        let mut visited: HashSet<&WidgetId> = HashSet::with_capacity(self.widgets.len());
        let mut stack = vec![&root.id];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                return Err(BuildError::Cycle {
                    pass,
                    widget: id.to_string(),
                });
            }
            if let Some(widget) = self.widget(id) {
                stack.extend(widget.children.iter().rev());
            }
        }

        if let Some(orphan) = self.widgets.iter().find(|w| !visited.contains(&w.id)) {
            return Err(BuildError::Unreachable {
                pass,
                widget: orphan.id.to_string(),
            });
        }

        Ok(())
    }

    /// Serializes the document as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Loads a document from JSON and checks the tree invariant.
    ///
    /// # Errors
    /// Returns [`BuildError::InvalidSource`] for malformed JSON or a wrong
    /// format tag, or the first structural violation found.
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        let mut document: Self =
            serde_json::from_str(text).map_err(|e| BuildError::InvalidSource {
                message: e.to_string(),
            })?;

        if document.format != BRIDGE_FORMAT {
            return Err(BuildError::InvalidSource {
                message: format!(
                    "expected format `{BRIDGE_FORMAT}`, found `{}`",
                    document.format
                ),
            });
        }

        document.widget_index = document
            .widgets
            .iter()
            .enumerate()
            .map(|(index, widget)| (widget.id.clone(), index))
            .collect();
        document.validate()?;
        Ok(document)
    }
}
