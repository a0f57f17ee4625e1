//! Text rendering of bridge documents for inspection.

use std::fmt;

use crate::{BridgeDocument, BridgeWidget};

impl fmt::Display for BridgeDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.format, self.version)?;
        write!(
            f,
            "window {:?} {}x{}",
            self.window.title, self.window.width, self.window.height
        )?;
        if self.window.resizable {
            write!(f, " resizable")?;
        }
        if let Some(background) = &self.window.background {
            write!(f, " background={background}")?;
        }
        writeln!(f)?;

        if let Some(root) = self.root() {
            write_widget(f, self, root, 0)?;
        }

        if !self.handlers().is_empty() {
            writeln!(f, "handlers")?;
            for handler in self.handlers() {
                write!(f, "  {} {} on {}", handler.id, handler.event, handler.widget)?;
                if let Some(name) = &handler.name {
                    write!(f, " {name}")?;
                }
                let languages: Vec<&str> =
                    handler.implementations.keys().map(String::as_str).collect();
                writeln!(f, " [{}]", languages.join(", "))?;
            }
        }
        Ok(())
    }
}

fn write_widget(
    f: &mut fmt::Formatter<'_>,
    document: &BridgeDocument,
    widget: &BridgeWidget,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    writeln!(
        f,
        "{indent}{} {} ({}) {}",
        widget.id, widget.kind, widget.source_type, widget.layout.descriptor
    )?;
    for (name, value) in &widget.properties {
        writeln!(f, "{indent}  {name}: {value}")?;
    }
    for handler in document.handlers_of(widget) {
        writeln!(f, "{indent}  on {} -> {}", handler.event, handler.id)?;
    }
    for child in document.children_of(&widget.id) {
        write_widget(f, document, child, depth + 1)?;
    }
    Ok(())
}
