//! Canonical widget kinds and the static source-type mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-agnostic category a source node type maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Frame,
    Button,
    Label,
    Entry,
    Textarea,
    Checkbox,
    Radio,
    Select,
    List,
    Image,
    Progress,
    Slider,
    Menubar,
    Menu,
    Menuitem,
    Canvas,
    Panedwindow,
    Tabs,
    Tree,
}

/// Source type names and the kind each one lowers to.
const KIND_TABLE: &[(&str, WidgetKind)] = &[
    ("Container", WidgetKind::Frame),
    ("Column", WidgetKind::Frame),
    ("Row", WidgetKind::Frame),
    ("Scroll", WidgetKind::Frame),
    ("Center", WidgetKind::Frame),
    ("Grid", WidgetKind::Frame),
    ("Button", WidgetKind::Button),
    ("Text", WidgetKind::Label),
    ("Label", WidgetKind::Label),
    ("Input", WidgetKind::Entry),
    ("TextArea", WidgetKind::Textarea),
    ("Checkbox", WidgetKind::Checkbox),
    ("Radio", WidgetKind::Radio),
    ("Select", WidgetKind::Select),
    ("Dropdown", WidgetKind::Select),
    ("List", WidgetKind::List),
    ("Image", WidgetKind::Image),
    ("Progress", WidgetKind::Progress),
    ("Slider", WidgetKind::Slider),
    ("MenuBar", WidgetKind::Menubar),
    ("Menu", WidgetKind::Menu),
    ("MenuItem", WidgetKind::Menuitem),
    ("Canvas", WidgetKind::Canvas),
    ("PanedWindow", WidgetKind::Panedwindow),
    ("Notebook", WidgetKind::Tabs),
    ("Tabs", WidgetKind::Tabs),
    ("Tree", WidgetKind::Tree),
];

impl WidgetKind {
    /// Resolves a source type name. Matching ignores ASCII case, so `container`
    /// and `Container` are the same type.
    #[must_use]
    pub fn from_source_type(node_type: &str) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(node_type))
            .map(|(_, kind)| *kind)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Button => "button",
            Self::Label => "label",
            Self::Entry => "entry",
            Self::Textarea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::List => "list",
            Self::Image => "image",
            Self::Progress => "progress",
            Self::Slider => "slider",
            Self::Menubar => "menubar",
            Self::Menu => "menu",
            Self::Menuitem => "menuitem",
            Self::Canvas => "canvas",
            Self::Panedwindow => "panedwindow",
            Self::Tabs => "tabs",
            Self::Tree => "tree",
        }
    }

    /// Kinds that hold other widgets.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Frame | Self::Panedwindow | Self::Tabs | Self::Menubar | Self::Menu
        )
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
