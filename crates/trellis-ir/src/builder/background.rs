//! Background inheritance.

use crate::{BACKGROUND, BridgeDocument, PropertyValue, WidgetId};
use std::collections::HashSet;

/// Fills unset backgrounds from the nearest ancestor, root-down.
///
/// The root falls back to the window background. Explicit backgrounds are
/// never overwritten. Every widget is visited at most once.
pub fn propagate(document: &mut BridgeDocument) {
    let Some(root) = document.root() else {
        return;
    };

    let window_background = document.window.background.clone().map(PropertyValue::Color);
    let mut stack: Vec<(WidgetId, Option<PropertyValue>)> =
        vec![(root.id.clone(), window_background)];
    let mut visited = HashSet::new();

    while let Some((id, inherited)) = stack.pop() {
        if !visited.insert(id.clone()) {
            continue;
        }
        let Some(widget) = document.widget_mut(&id) else {
            continue;
        };

        let resolved = match widget.background() {
            Some(explicit) => Some(explicit.clone()),
            None => {
                if let Some(value) = &inherited {
                    widget.properties.insert(BACKGROUND.to_string(), value.clone());
                }
                inherited
            }
        };

        for child in widget.children.iter().rev() {
            stack.push((child.clone(), resolved.clone()));
        }
    }
}
