//! Trellis bridge IR.
//!
//! The bridge IR is the toolkit-neutral tree every backend consumes. It is
//! produced from the parser's source IR by the [`Builder`], which resolves
//! everything backends would otherwise each have to work out on their own:
//!
//! - **Widget kinds**: source type names mapped to a fixed set of kinds
//! - **Properties**: sizes, colors, fonts and borders in canonical form
//! - **Layout**: one flow, grid or absolute descriptor per widget
//! - **Backgrounds**: inherited down the tree from the window
//! - **Handlers**: a deduplicated table referenced by id
//!
//! # Example
//!
//! ```rust
//! use trellis_core::SourceNode;
//! use trellis_ir::build;
//!
//! let root = SourceNode::new("Column")
//!     .with_property("background", "#101010")
//!     .with_child(SourceNode::new("Button").with_property("text", "Go"));
//!
//! let document = build(&root, false).unwrap();
//! let button = &document.widgets()[1];
//! assert_eq!(button.background().unwrap().to_string(), "#101010");
//! ```

mod builder;
mod display;
mod document;
mod ids;
mod kind;
mod layout;
mod value;

pub use builder::background::propagate;
pub use builder::handlers::{ExtractedHandlers, PendingHandler, extract};
pub use builder::layout::{ParentLayout, resolve, resolve_with};
pub use builder::normalize::{POSITIONAL_PROPERTIES, PropertyKind, canonical_name, normalize};
pub use builder::{Builder, build};
pub use document::{
    BACKGROUND, BRIDGE_FORMAT, BRIDGE_VERSION, BridgeDocument, BridgeWidget, Handler, Metadata,
    Window,
};
pub use ids::{HandlerId, WidgetId, is_valid_id};
pub use kind::WidgetKind;
pub use layout::{
    AbsoluteOptions, Alignment, FlowDirection, FlowOptions, Gap, GridOptions, LayoutDescriptor,
    LayoutModel, ResolvedLayout,
};
pub use value::{BorderDescriptor, Color, Dimension, FontDescriptor, PropertyValue, Unit};
