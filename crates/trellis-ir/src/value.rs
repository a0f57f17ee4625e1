//! Normalized property values.
//!
//! Every value in a bridge widget's property map is one of the variants of
//! [`PropertyValue`]. Sizes and colors arrive here already canonical, so
//! backends only format them and never parse them again.

use serde::{Deserialize, Serialize};
use std::fmt;
use trellis_core::SourceValue;

/// Unit of a [`Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Px,
    Percent,
    Em,
    Rem,
    Auto,
}

impl Unit {
    /// Suffix used when the dimension is written back as text.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Em => "em",
            Self::Rem => "rem",
            Self::Auto => "",
        }
    }
}

/// A size with an explicit unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub magnitude: f64,
    pub unit: Unit,
}

impl Dimension {
    #[must_use]
    pub const fn px(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Px,
        }
    }

    #[must_use]
    pub const fn percent(magnitude: f64) -> Self {
        Self {
            magnitude,
            unit: Unit::Percent,
        }
    }

    #[must_use]
    pub const fn auto() -> Self {
        Self {
            magnitude: 0.0,
            unit: Unit::Auto,
        }
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.unit == Unit::Auto
    }

    /// Returns the magnitude if this is a pixel dimension.
    #[must_use]
    pub fn as_px(&self) -> Option<f64> {
        (self.unit == Unit::Px).then_some(self.magnitude)
    }

    /// Parses `auto`, `<n>%`, `<n>px`, `<n>em` and `<n>rem`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("auto") {
            return Some(Self::auto());
        }

        let (number, unit) = if let Some(number) = text.strip_suffix('%') {
            (number, Unit::Percent)
        } else if let Some(number) = text.strip_suffix("px") {
            (number, Unit::Px)
        } else if let Some(number) = text.strip_suffix("rem") {
            (number, Unit::Rem)
        } else if let Some(number) = text.strip_suffix("em") {
            (number, Unit::Em)
        } else {
            return None;
        };

        let magnitude: f64 = number.trim().parse().ok()?;
        magnitude.is_finite().then_some(Self { magnitude, unit })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_auto() {
            return f.write_str("auto");
        }
        write!(f, "{}{}", self.magnitude, self.unit.suffix())
    }
}

/// CSS basic colors plus the extra names the source language accepts.
const NAMED_COLORS: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("silver", "#c0c0c0"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("white", "#ffffff"),
    ("maroon", "#800000"),
    ("red", "#ff0000"),
    ("purple", "#800080"),
    ("fuchsia", "#ff00ff"),
    ("magenta", "#ff00ff"),
    ("green", "#008000"),
    ("lime", "#00ff00"),
    ("olive", "#808000"),
    ("yellow", "#ffff00"),
    ("navy", "#000080"),
    ("blue", "#0000ff"),
    ("teal", "#008080"),
    ("aqua", "#00ffff"),
    ("cyan", "#00ffff"),
    ("orange", "#ffa500"),
    ("pink", "#ffc0cb"),
    ("brown", "#a52a2a"),
    ("transparent", "#00000000"),
];

/// A color as a lower-case `#rrggbb` or `#rrggbbaa` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Parses a color name or hex literal into canonical form.
    ///
    /// Three and four digit shorthand is expanded by doubling each digit.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().to_ascii_lowercase();

        if let Some((_, hex)) = NAMED_COLORS.iter().find(|(name, _)| *name == text) {
            return Some(Self((*hex).to_string()));
        }

        let digits = text.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match digits.len() {
            3 | 4 => {
                let mut expanded = String::with_capacity(1 + digits.len() * 2);
                expanded.push('#');
                for c in digits.chars() {
                    expanded.push(c);
                    expanded.push(c);
                }
                Some(Self(expanded))
            }
            6 | 8 => Some(Self(text)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `#rrggbb` part, dropping any alpha channel.
    #[must_use]
    pub fn rgb(&self) -> &str {
        self.0.get(..7).unwrap_or(&self.0)
    }

    /// Alpha channel, if the color carries one.
    #[must_use]
    pub fn alpha(&self) -> Option<u8> {
        let hex = self.0.get(7..9)?;
        u8::from_str_radix(hex, 16).ok()
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.alpha() == Some(0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    pub size: f64,
    pub weight: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: None,
            size: 12.0,
            weight: "normal".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorderDescriptor {
    pub width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub style: String,
}

impl Default for BorderDescriptor {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: None,
            style: "solid".to_string(),
        }
    }
}

/// A normalized property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum PropertyValue {
    Dimension(Dimension),
    Font(FontDescriptor),
    Border(BorderDescriptor),
    Color(Color),
    /// Forwarded unchanged for the backend to interpret.
    Scalar(SourceValue),
}

impl PropertyValue {
    #[must_use]
    pub fn as_dimension(&self) -> Option<&Dimension> {
        match self {
            Self::Dimension(dimension) => Some(dimension),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_color(&self) -> Option<&Color> {
        match self {
            Self::Color(color) => Some(color),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_font(&self) -> Option<&FontDescriptor> {
        match self {
            Self::Font(font) => Some(font),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_border(&self) -> Option<&BorderDescriptor> {
        match self {
            Self::Border(border) => Some(border),
            _ => None,
        }
    }

    /// The text of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => value.as_str(),
            _ => None,
        }
    }

    /// A numeric scalar, or the magnitude of a pixel dimension.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(value) => value.as_f64(),
            Self::Dimension(dimension) => dimension.as_px(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(value) => value.as_bool(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }
}

impl From<Color> for PropertyValue {
    fn from(color: Color) -> Self {
        Self::Color(color)
    }
}

impl From<Dimension> for PropertyValue {
    fn from(dimension: Dimension) -> Self {
        Self::Dimension(dimension)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dimension(dimension) => write!(f, "{dimension}"),
            Self::Color(color) => write!(f, "{color}"),
            Self::Font(font) => {
                if let Some(family) = &font.family {
                    write!(f, "{family} ")?;
                }
                write!(f, "{} {}", font.size, font.weight)
            }
            Self::Border(border) => {
                write!(f, "{}px {}", border.width, border.style)?;
                if let Some(color) = &border.color {
                    write!(f, " {color}")?;
                }
                Ok(())
            }
            Self::Scalar(value) => match value {
                SourceValue::Null => f.write_str("null"),
                SourceValue::Bool(b) => write!(f, "{b}"),
                SourceValue::Number(n) => write!(f, "{n}"),
                SourceValue::String(s) => write!(f, "{s:?}"),
                SourceValue::Array(_) | SourceValue::Map(_) => {
                    let json = serde_json::to_string(value).map_err(|_| fmt::Error)?;
                    f.write_str(&json)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_spellings_converge() {
        for text in ["red", "#F00", "#ff0000", "RED", " #FF0000 "] {
            assert_eq!(Color::parse(text).unwrap().as_str(), "#ff0000", "{text}");
        }
    }

    #[test]
    fn test_color_alpha_shorthand() {
        let color = Color::parse("#f008").unwrap();
        assert_eq!(color.as_str(), "#ff000088");
        assert_eq!(color.rgb(), "#ff0000");
        assert_eq!(color.alpha(), Some(0x88));
    }

    #[test]
    fn test_transparent() {
        let color = Color::parse("transparent").unwrap();
        assert!(color.is_transparent());
        assert!(!Color::parse("#000000").unwrap().is_transparent());
    }

    #[test]
    fn test_invalid_colors() {
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::parse("#12345"), None);
        assert_eq!(Color::parse("#gggggg"), None);
        assert_eq!(Color::parse("chartreuse-ish"), None);
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!(Dimension::parse("50%"), Some(Dimension::percent(50.0)));
        assert_eq!(Dimension::parse("12px"), Some(Dimension::px(12.0)));
        assert_eq!(
            Dimension::parse("1.5rem"),
            Some(Dimension {
                magnitude: 1.5,
                unit: Unit::Rem
            })
        );
        assert_eq!(
            Dimension::parse("2em"),
            Some(Dimension {
                magnitude: 2.0,
                unit: Unit::Em
            })
        );
        assert_eq!(Dimension::parse("auto"), Some(Dimension::auto()));
        assert_eq!(Dimension::parse("wide"), None);
        assert_eq!(Dimension::parse("12"), None);
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::px(120.0).to_string(), "120px");
        assert_eq!(Dimension::percent(33.5).to_string(), "33.5%");
        assert_eq!(Dimension::auto().to_string(), "auto");
    }

    #[test]
    fn test_property_value_json_shape() {
        let value = PropertyValue::Dimension(Dimension::px(10.0));
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"kind": "dimension", "value": {"magnitude": 10.0, "unit": "px"}})
        );
        let back: PropertyValue = serde_json::from_value(json).unwrap();
        assert_eq!(back, value);
    }
}
