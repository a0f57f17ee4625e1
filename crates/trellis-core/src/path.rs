//! Node path tracking for error reporting.
//!
//! The source IR carries no byte offsets, so failures are localized by the
//! chain of node types and child indices leading from the root to the node.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step in a [`NodePath`]: the node's source type and its index among its
/// siblings (`None` for the root).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    pub node_type: String,
    pub index: Option<usize>,
}

impl PathSegment {
    #[must_use]
    pub fn root(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            index: None,
        }
    }

    #[must_use]
    pub fn child(node_type: impl Into<String>, index: usize) -> Self {
        Self {
            node_type: node_type.into(),
            index: Some(index),
        }
    }
}

/// Path from the source root to a node, e.g. `Column/Row[0]/Button[2]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath {
    segments: Vec<PathSegment>,
}

impl NodePath {
    /// Creates a path that points at the root node.
    #[must_use]
    pub fn root(node_type: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::root(node_type)],
        }
    }

    /// Returns a new path extended by one child step.
    #[must_use]
    pub fn child(&self, node_type: impl Into<String>, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::child(node_type, index));
        Self { segments }
    }

    /// Number of steps from the root (the root itself has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            match segment.index {
                Some(index) => write!(f, "{}[{index}]", segment.node_type)?,
                None => write!(f, "{}", segment.node_type)?,
            }
        }
        Ok(())
    }
}
