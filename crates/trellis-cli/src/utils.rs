//! Utility functions and constants shared across the CLI.

use colored::Colorize;
use std::path::Path;

/// Source document written by `trellis init`.
pub const SAMPLE_SOURCE: &str = r##"{
  "format": "kir",
  "version": "1.0",
  "window": { "title": "Hello, Trellis!", "width": 400, "height": 300 },
  "root": {
    "type": "Column",
    "gap": 8,
    "alignItems": "center",
    "children": [
      { "type": "Text", "text": "Hello, Trellis!" },
      {
        "type": "Button",
        "text": "Quit",
        "events": [
          {
            "event": "click",
            "handler": "quit",
            "implementations": { "tcl": "exit", "rust": "std::process::exit(0);" }
          }
        ]
      }
    ]
  }
}
"##;

/// Prints a status message with colored output.
pub fn print_status(status: &str, message: &str) {
    println!("{} {message}", format!("{status:>12}").green().bold());
}

/// Prints a status message naming a file.
pub fn print_file_status(status: &str, path: &Path) {
    print_status(status, &path.display().to_string());
}
