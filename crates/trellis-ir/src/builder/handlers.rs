//! Handler extraction and deduplication.

use crate::{Handler, HandlerId, WidgetId};
use std::collections::{BTreeMap, HashMap};
use trellis_core::SourceEvent;

/// An inline event definition collected during lowering, not yet in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHandler {
    pub widget: WidgetId,
    pub event: SourceEvent,
}

impl PendingHandler {
    #[must_use]
    pub fn new(widget: WidgetId, event: SourceEvent) -> Self {
        Self { widget, event }
    }
}

/// Result of [`extract`]: the handler table and each widget's references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedHandlers {
    /// Table entries in first-occurrence order.
    pub table: Vec<Handler>,
    /// Handler references per widget, in source order.
    pub references: BTreeMap<WidgetId, Vec<HandlerId>>,
}

#[derive(Hash, PartialEq, Eq)]
struct DedupKey<'a> {
    event: &'a str,
    implementations: &'a BTreeMap<String, String>,
    /// Only set when there is no implementation text to compare.
    name: Option<&'a str>,
}

impl<'a> DedupKey<'a> {
    fn of(event: &'a SourceEvent) -> Self {
        Self {
            event: &event.event,
            implementations: &event.implementations,
            name: if event.implementations.is_empty() {
                event.handler.as_deref()
            } else {
                None
            },
        }
    }
}

/// Deduplicates pending handlers into a table.
///
/// Two definitions with the same event kind and the same implementation map
/// share one entry, owned by the widget it was first seen on. A widget never
/// references the same entry twice.
#[must_use]
pub fn extract(pending: &[PendingHandler]) -> ExtractedHandlers {
    let mut extracted = ExtractedHandlers::default();
    let mut seen: HashMap<DedupKey<'_>, HandlerId> = HashMap::new();

    for item in pending {
        let key = DedupKey::of(&item.event);
        let id = match seen.get(&key) {
            Some(id) => id.clone(),
            None => {
                let id = HandlerId::from_index(extracted.table.len());
                extracted.table.push(Handler {
                    id: id.clone(),
                    event: item.event.event.clone(),
                    widget: item.widget.clone(),
                    name: item.event.handler.clone(),
                    implementations: item.event.implementations.clone(),
                });
                seen.insert(key, id.clone());
                id
            }
        };

        let references = extracted.references.entry(item.widget.clone()).or_default();
        if !references.contains(&id) {
            references.push(id);
        }
    }

    extracted
}
