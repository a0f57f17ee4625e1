//! Source IR: the untyped component tree handed over by the parser.
//!
//! Nodes carry a type tag, a property map and optional inline event handlers.
//! The structure is read-only to the compiler; the builder only reads it.

use crate::BuildError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Format tag expected in source documents.
pub const SOURCE_FORMAT: &str = "kir";

/// A property value as written in the source IR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<SourceValue>),
    Map(BTreeMap<String, SourceValue>),
}

impl SourceValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&BTreeMap<String, SourceValue>> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a key when this value is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SourceValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for SourceValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for SourceValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<bool> for SourceValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for SourceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for SourceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// An inline event handler definition attached to a source node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceEvent {
    /// Event kind, e.g. `click` or `change`.
    pub event: String,
    /// Handler name given in the source, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    /// Target language name to source text.
    #[serde(default)]
    pub implementations: BTreeMap<String, String>,
}

impl SourceEvent {
    #[must_use]
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            handler: None,
            implementations: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn named(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    #[must_use]
    pub fn with_implementation(
        mut self,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        self.implementations.insert(language.into(), code.into());
        self
    }
}

/// A node of the source tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceNode {
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SourceNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<SourceEvent>,
    #[serde(flatten)]
    pub properties: BTreeMap<String, SourceValue>,
}

impl SourceNode {
    #[must_use]
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            children: Vec::new(),
            events: Vec::new(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<SourceValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: SourceNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_event(mut self, event: SourceEvent) -> Self {
        self.events.push(event);
        self
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SourceValue> {
        self.properties.get(name).filter(|value| !value.is_null())
    }

    /// Returns the first present property among `names`.
    #[must_use]
    pub fn first_property(&self, names: &[&str]) -> Option<&SourceValue> {
        names.iter().find_map(|name| self.property(name))
    }

    #[must_use]
    pub fn has_any(&self, names: &[&str]) -> bool {
        self.first_property(names).is_some()
    }
}

/// Window metadata block of a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSpec {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Default for WindowSpec {
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

/// A complete source document as produced by the parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub window: WindowSpec,
    #[serde(default, alias = "app", alias = "component")]
    pub root: Option<SourceNode>,
}

impl SourceDocument {
    /// Creates a document around a root node with default window settings.
    #[must_use]
    pub fn new(root: SourceNode) -> Self {
        Self {
            format: Some(SOURCE_FORMAT.to_string()),
            version: Some("1.0".to_string()),
            window: WindowSpec::default(),
            root: Some(root),
        }
    }

    #[must_use]
    pub fn with_window(mut self, window: WindowSpec) -> Self {
        self.window = window;
        self
    }

    /// Parses a source document from JSON text.
    ///
    /// # Errors
    /// Returns [`BuildError::InvalidSource`] if the text is not valid JSON or
    /// carries a format tag other than `kir`.
    pub fn from_json(text: &str) -> Result<Self, BuildError> {
        let document: Self =
            serde_json::from_str(text).map_err(|e| BuildError::InvalidSource {
                message: e.to_string(),
            })?;

        if let Some(format) = &document.format
            && format != SOURCE_FORMAT
        {
            return Err(BuildError::InvalidSource {
                message: format!("expected format `{SOURCE_FORMAT}`, found `{format}`"),
            });
        }

        Ok(document)
    }

    /// Returns the root node.
    ///
    /// # Errors
    /// Returns [`BuildError::MissingRoot`] if the document has none.
    pub fn root(&self) -> Result<&SourceNode, BuildError> {
        self.root.as_ref().ok_or(BuildError::MissingRoot)
    }
}
