//! Property normalization.
//!
//! Turns raw source values into [`PropertyValue`]s. Nothing here fails: a
//! shape the normalizer does not recognize is forwarded as a scalar.

use crate::{BorderDescriptor, Color, Dimension, FontDescriptor, PropertyValue};
use std::collections::BTreeMap;
use trellis_core::{SourceNode, SourceValue};

/// How a property's raw value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Size,
    Color,
    Font,
    Border,
    /// Forwarded without interpretation.
    Other,
}

const SIZE_PROPERTIES: &[&str] = &[
    "width",
    "height",
    "minWidth",
    "minHeight",
    "maxWidth",
    "maxHeight",
    "fontSize",
    "borderRadius",
    "borderWidth",
    "padding",
    "margin",
    "gap",
];

const COLOR_PROPERTIES: &[&str] = &[
    "background",
    "backgroundColor",
    "bg",
    "foreground",
    "color",
    "textColor",
    "borderColor",
];

/// Keys consumed by the layout resolver and kept out of the property map.
pub const POSITIONAL_PROPERTIES: &[&str] = &[
    "row",
    "column",
    "rowSpan",
    "rowspan",
    "colSpan",
    "colspan",
    "columnSpan",
    "columnspan",
    "x",
    "y",
    "left",
    "top",
];

const BORDER_STYLES: &[&str] = &[
    "solid", "dashed", "dotted", "double", "groove", "ridge", "inset", "outset", "none", "hidden",
];

impl PropertyKind {
    /// Classifies a property by its source name.
    #[must_use]
    pub fn of(name: &str) -> Self {
        if SIZE_PROPERTIES.contains(&name) {
            Self::Size
        } else if COLOR_PROPERTIES.contains(&name) {
            Self::Color
        } else if name == "font" {
            Self::Font
        } else if name == "border" {
            Self::Border
        } else {
            Self::Other
        }
    }
}

/// Maps property aliases to the name used in the bridge document.
#[must_use]
pub fn canonical_name(name: &str) -> &str {
    match name {
        "backgroundColor" | "bg" => "background",
        "color" | "textColor" => "foreground",
        other => other,
    }
}

/// Normalizes one raw value as the given kind of property.
#[must_use]
pub fn normalize(raw: &SourceValue, kind: PropertyKind) -> PropertyValue {
    let normalized = match kind {
        PropertyKind::Size => size(raw).map(PropertyValue::Dimension),
        PropertyKind::Color => raw.as_str().and_then(Color::parse).map(PropertyValue::Color),
        PropertyKind::Font => font(raw).map(PropertyValue::Font),
        PropertyKind::Border => border(raw).map(PropertyValue::Border),
        PropertyKind::Other => None,
    };
    normalized.unwrap_or_else(|| PropertyValue::Scalar(raw.clone()))
}

/// Interprets a raw value as a dimension. Bare numbers are pixels.
#[must_use]
pub fn size(raw: &SourceValue) -> Option<Dimension> {
    match raw {
        SourceValue::Number(n) if n.is_finite() => Some(Dimension::px(*n)),
        SourceValue::String(text) => Dimension::parse(text),
        _ => None,
    }
}

/// Interprets a raw value as a pixel count.
pub(crate) fn pixels(raw: &SourceValue) -> Option<f64> {
    size(raw).and_then(|dimension| dimension.as_px())
}

fn font(raw: &SourceValue) -> Option<FontDescriptor> {
    match raw {
        SourceValue::String(family) => Some(FontDescriptor {
            family: Some(family.clone()),
            ..FontDescriptor::default()
        }),
        SourceValue::Map(fields) => {
            let mut font = FontDescriptor::default();
            if let Some(family) = fields
                .get("family")
                .or_else(|| fields.get("fontFamily"))
                .and_then(SourceValue::as_str)
            {
                font.family = Some(family.to_string());
            }
            if let Some(size) = fields.get("size").and_then(pixels) {
                font.size = size;
            }
            match fields.get("weight") {
                Some(SourceValue::String(weight)) => font.weight = weight.clone(),
                Some(SourceValue::Number(weight)) => font.weight = weight.to_string(),
                Some(SourceValue::Bool(true)) => font.weight = "bold".to_string(),
                _ => {}
            }
            Some(font)
        }
        _ => None,
    }
}

fn border(raw: &SourceValue) -> Option<BorderDescriptor> {
    match raw {
        SourceValue::Number(width) if width.is_finite() => Some(BorderDescriptor {
            width: *width,
            ..BorderDescriptor::default()
        }),
        SourceValue::String(text) => {
            let mut border = BorderDescriptor::default();
            for token in text.split_whitespace() {
                if let Some(width) = Dimension::parse(token).and_then(|d| d.as_px()) {
                    border.width = width;
                } else if let Ok(width) = token.parse::<f64>() {
                    border.width = width;
                } else if BORDER_STYLES.contains(&token) {
                    border.style = token.to_string();
                } else {
                    border.color = Some(Color::parse(token)?);
                }
            }
            Some(border)
        }
        SourceValue::Map(fields) => {
            let mut border = BorderDescriptor::default();
            if let Some(width) = fields.get("width").and_then(pixels) {
                border.width = width;
            }
            if let Some(style) = fields.get("style").and_then(SourceValue::as_str) {
                border.style = style.to_string();
            }
            border.color = fields
                .get("color")
                .and_then(SourceValue::as_str)
                .and_then(Color::parse);
            Some(border)
        }
        _ => None,
    }
}

/// Builds a widget's normalized property map.
///
/// Positional keys are skipped. When a property is given under both its
/// canonical name and an alias, the canonical spelling wins. A background
/// that normalizes to a fully transparent color is dropped so that the widget
/// inherits its parent's background instead.
pub(crate) fn normalize_properties(
    node: &SourceNode,
    verbose: bool,
) -> BTreeMap<String, PropertyValue> {
    let mut properties = BTreeMap::new();

    let (canonical, aliased): (Vec<_>, Vec<_>) = node
        .properties
        .iter()
        .filter(|(name, value)| !value.is_null() && !POSITIONAL_PROPERTIES.contains(&name.as_str()))
        .partition(|(name, _)| canonical_name(name) == name.as_str());

    for (name, raw) in canonical.into_iter().chain(aliased) {
        let target = canonical_name(name);
        if properties.contains_key(target) {
            ambiguity!(
                verbose,
                node = %node.node_type,
                property = %name,
                "alias shadowed by `{target}`"
            );
            continue;
        }

        let kind = PropertyKind::of(name);
        let value = normalize(raw, kind);
        if kind != PropertyKind::Other && value.is_scalar() {
            ambiguity!(
                verbose,
                node = %node.node_type,
                property = %name,
                "unrecognized {kind:?} value, forwarding unchanged"
            );
        }

        if target == crate::BACKGROUND && value.as_color().is_some_and(Color::is_transparent) {
            ambiguity!(
                verbose,
                node = %node.node_type,
                "transparent background treated as unset"
            );
            continue;
        }

        properties.insert(target.to_string(), value);
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Unit;

    #[test]
    fn test_size_number_is_pixels() {
        let value = normalize(&SourceValue::from(120), PropertyKind::Size);
        assert_eq!(value, PropertyValue::Dimension(Dimension::px(120.0)));
    }

    #[test]
    fn test_size_suffixes() {
        assert_eq!(
            normalize(&"50%".into(), PropertyKind::Size),
            PropertyValue::Dimension(Dimension::percent(50.0))
        );
        assert_eq!(
            normalize(&"2em".into(), PropertyKind::Size),
            PropertyValue::Dimension(Dimension {
                magnitude: 2.0,
                unit: Unit::Em
            })
        );
        assert_eq!(
            normalize(&"auto".into(), PropertyKind::Size),
            PropertyValue::Dimension(Dimension::auto())
        );
    }

    #[test]
    fn test_unrecognized_size_passes_through() {
        let raw = SourceValue::from("fill-parent");
        assert_eq!(
            normalize(&raw, PropertyKind::Size),
            PropertyValue::Scalar(raw.clone())
        );
    }

    #[test]
    fn test_color_round_trip() {
        for text in ["red", "#F00", "#ff0000"] {
            let value = normalize(&text.into(), PropertyKind::Color);
            assert_eq!(value.as_color().unwrap().as_str(), "#ff0000");
        }
    }

    #[test]
    fn test_font_from_string_and_map() {
        let value = normalize(&"Helvetica".into(), PropertyKind::Font);
        let font = value.as_font().unwrap();
        assert_eq!(font.family.as_deref(), Some("Helvetica"));
        assert_eq!(font.size, 12.0);
        assert_eq!(font.weight, "normal");

        let mut fields = BTreeMap::new();
        fields.insert("size".to_string(), SourceValue::from(16));
        fields.insert("weight".to_string(), SourceValue::from(700));
        let value = normalize(&SourceValue::Map(fields), PropertyKind::Font);
        let font = value.as_font().unwrap();
        assert_eq!(font.family, None);
        assert_eq!(font.size, 16.0);
        assert_eq!(font.weight, "700");
    }

    #[test]
    fn test_border_shorthand() {
        let value = normalize(&"2px dashed #ABC".into(), PropertyKind::Border);
        let border = value.as_border().unwrap();
        assert_eq!(border.width, 2.0);
        assert_eq!(border.style, "dashed");
        assert_eq!(border.color.as_ref().unwrap().as_str(), "#aabbcc");

        let value = normalize(&"blue".into(), PropertyKind::Border);
        let border = value.as_border().unwrap();
        assert_eq!(border.width, 1.0);
        assert_eq!(border.style, "solid");
        assert_eq!(border.color.as_ref().unwrap().as_str(), "#0000ff");
    }

    #[test]
    fn test_border_garbage_passes_through() {
        let raw = SourceValue::from("thick wobbly");
        assert!(normalize(&raw, PropertyKind::Border).is_scalar());
    }

    #[test]
    fn test_aliases_and_positional_keys() {
        let node = SourceNode::new("Button")
            .with_property("bg", "white")
            .with_property("textColor", "#000")
            .with_property("row", 1)
            .with_property("x", 5)
            .with_property("text", "Go");

        let properties = normalize_properties(&node, false);
        assert_eq!(
            properties.keys().map(String::as_str).collect::<Vec<_>>(),
            ["background", "foreground", "text"]
        );
        assert_eq!(properties["background"].as_color().unwrap().as_str(), "#ffffff");
        assert_eq!(properties["foreground"].as_color().unwrap().as_str(), "#000000");
    }

    #[test]
    fn test_canonical_spelling_wins_over_alias() {
        let node = SourceNode::new("Text")
            .with_property("color", "red")
            .with_property("foreground", "blue");
        let properties = normalize_properties(&node, false);
        assert_eq!(properties["foreground"].as_color().unwrap().as_str(), "#0000ff");
    }

    #[test]
    fn test_transparent_background_is_unset() {
        let node = SourceNode::new("Container").with_property("background", "transparent");
        assert!(normalize_properties(&node, false).is_empty());
    }
}
