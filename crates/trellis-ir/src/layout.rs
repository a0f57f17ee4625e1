//! Resolved layout descriptors.
//!
//! Each widget carries exactly one [`LayoutDescriptor`], chosen once by the
//! layout resolver. The serialized form is `{type, parent, options}`.

use crate::{Dimension, WidgetId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Main axis of a flow container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowDirection {
    Row,
    Column,
}

impl FlowDirection {
    /// Parses `row`, `column` and their `-reverse` / short spellings.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "row" | "row-reverse" | "horizontal" | "h" => Some(Self::Row),
            "column" | "column-reverse" | "col" | "vertical" | "v" => Some(Self::Column),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }
}

/// Placement of children along an axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
    /// Only meaningful on the cross axis.
    Stretch,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Alignment {
    /// Parses kebab, camel and `flex-` prefixed spellings.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let lowered = text.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let key = lowered.strip_prefix("flex").unwrap_or(&lowered);
        match key {
            "start" | "left" | "top" => Some(Self::Start),
            "center" | "middle" => Some(Self::Center),
            "end" | "right" | "bottom" => Some(Self::End),
            "stretch" | "fill" => Some(Self::Stretch),
            "spacebetween" => Some(Self::SpaceBetween),
            "spacearound" => Some(Self::SpaceAround),
            "spaceevenly" => Some(Self::SpaceEvenly),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
            Self::Stretch => "stretch",
            Self::SpaceBetween => "space-between",
            Self::SpaceAround => "space-around",
            Self::SpaceEvenly => "space-evenly",
        }
    }

    #[must_use]
    pub const fn is_distributed(self) -> bool {
        matches!(
            self,
            Self::SpaceBetween | Self::SpaceAround | Self::SpaceEvenly
        )
    }
}

/// Spacing between flow siblings, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Gap {
    #[must_use]
    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.horizontal == 0.0 && self.vertical == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowOptions {
    pub direction: FlowDirection,
    pub main_align: Alignment,
    pub cross_align: Alignment,
    pub gap: Gap,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self {
            direction: FlowDirection::Column,
            main_align: Alignment::Start,
            cross_align: Alignment::Start,
            gap: Gap::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub row: u32,
    pub column: u32,
    pub row_span: u32,
    pub col_span: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteOptions {
    pub x: f64,
    pub y: f64,
    pub width: Dimension,
    pub height: Dimension,
}

/// Layout model of one widget with its model-specific options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutDescriptor {
    Flow(FlowOptions),
    Grid(GridOptions),
    Absolute(AbsoluteOptions),
}

impl LayoutDescriptor {
    #[must_use]
    pub const fn model(&self) -> LayoutModel {
        match self {
            Self::Flow(_) => LayoutModel::Flow,
            Self::Grid(_) => LayoutModel::Grid,
            Self::Absolute(_) => LayoutModel::Absolute,
        }
    }

    #[must_use]
    pub fn as_flow(&self) -> Option<&FlowOptions> {
        match self {
            Self::Flow(options) => Some(options),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_grid(&self) -> Option<&GridOptions> {
        match self {
            Self::Grid(options) => Some(options),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_absolute(&self) -> Option<&AbsoluteOptions> {
        match self {
            Self::Absolute(options) => Some(options),
            _ => None,
        }
    }
}

impl Default for LayoutDescriptor {
    fn default() -> Self {
        Self::Flow(FlowOptions::default())
    }
}

impl fmt::Display for LayoutDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flow(flow) => {
                write!(
                    f,
                    "flow {} main={} cross={}",
                    flow.direction.as_str(),
                    flow.main_align.as_str(),
                    flow.cross_align.as_str()
                )?;
                if !flow.gap.is_zero() {
                    write!(f, " gap={}x{}", flow.gap.horizontal, flow.gap.vertical)?;
                }
                Ok(())
            }
            Self::Grid(grid) => write!(
                f,
                "grid row={} column={} span={}x{}",
                grid.row, grid.column, grid.row_span, grid.col_span
            ),
            Self::Absolute(place) => write!(
                f,
                "absolute x={} y={} width={} height={}",
                place.x, place.y, place.width, place.height
            ),
        }
    }
}

/// Tag of a [`LayoutDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutModel {
    Flow,
    Grid,
    Absolute,
}

/// A widget's layout plus the back-reference to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "LayoutRepr", try_from = "LayoutRepr")]
pub struct ResolvedLayout {
    pub parent: Option<WidgetId>,
    pub descriptor: LayoutDescriptor,
}

impl ResolvedLayout {
    #[must_use]
    pub fn new(parent: Option<WidgetId>, descriptor: LayoutDescriptor) -> Self {
        Self { parent, descriptor }
    }
}

#[derive(Serialize, Deserialize)]
struct LayoutRepr {
    #[serde(rename = "type")]
    model: LayoutModel,
    parent: Option<WidgetId>,
    options: serde_json::Value,
}

impl From<ResolvedLayout> for LayoutRepr {
    fn from(layout: ResolvedLayout) -> Self {
        let options = match &layout.descriptor {
            LayoutDescriptor::Flow(options) => serde_json::to_value(options),
            LayoutDescriptor::Grid(options) => serde_json::to_value(options),
            LayoutDescriptor::Absolute(options) => serde_json::to_value(options),
        };
        Self {
            model: layout.descriptor.model(),
            parent: layout.parent,
            // Option structs hold only plain numbers and enums.
            options: options.unwrap_or(serde_json::Value::Null),
        }
    }
}

impl TryFrom<LayoutRepr> for ResolvedLayout {
    type Error = serde_json::Error;

    fn try_from(repr: LayoutRepr) -> Result<Self, Self::Error> {
        let descriptor = match repr.model {
            LayoutModel::Flow => LayoutDescriptor::Flow(serde_json::from_value(repr.options)?),
            LayoutModel::Grid => LayoutDescriptor::Grid(serde_json::from_value(repr.options)?),
            LayoutModel::Absolute => {
                LayoutDescriptor::Absolute(serde_json::from_value(repr.options)?)
            }
        };
        Ok(Self {
            parent: repr.parent,
            descriptor,
        })
    }
}
