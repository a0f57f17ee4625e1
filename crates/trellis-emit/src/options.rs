//! Formatting options for one emission.

use serde::{Deserialize, Serialize};

/// Options shared by every backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Write explanatory comments into the output.
    pub include_comments: bool,
    /// One level of indentation.
    pub indent: String,
    /// Level the output starts at.
    pub indent_level: usize,
    pub verbose: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            include_comments: true,
            indent: "    ".to_string(),
            indent_level: 0,
            verbose: false,
        }
    }
}

impl EmitOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_comments(mut self, include_comments: bool) -> Self {
        self.include_comments = include_comments;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[must_use]
    pub fn with_indent_level(mut self, level: usize) -> Self {
        self.indent_level = level;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
