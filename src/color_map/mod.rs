/*!
Color encodings for table columns

A [`ColorMap`] is a plain value describing how one column's values turn into
colors. Exactly one of four kinds comes out of every decision:

- [`DiscreteColorMap`] - ascending bins over a numeric range
- [`ContinuousColorMap`] - a gradient over a numeric range
- [`EnumColorMap`] - one color per category
- [`ConstantColorMap`] - a single color for everything

The decision itself lives in [`resolve_color_map`]; the types here only map
values to colors.
*/

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::column::Column;
use crate::palette::Gradient;

pub mod resolve;

pub use resolve::{resolve_color_map, ResolvedColorMap};

// =============================================================================
// ColorMap
// =============================================================================

/// Maps a column's values to colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ColorMap {
    Discrete(DiscreteColorMap),
    Continuous(ContinuousColorMap),
    Enum(EnumColorMap),
    Constant(ConstantColorMap),
}

impl ColorMap {
    /// The color for one row of `column`. Numeric kinds go through the
    /// parsed number; the enum kind matches the raw value.
    pub fn color_for_row(&self, column: Option<&Column>, row: usize) -> Color {
        match self {
            ColorMap::Discrete(map) => {
                map.map_value_to_color(column.and_then(|c| c.number_at(row)))
            }
            ColorMap::Continuous(map) => {
                map.map_value_to_color(column.and_then(|c| c.number_at(row)))
            }
            ColorMap::Enum(map) => match column.and_then(|c| c.value_at(row)) {
                Some(value) if !value.is_empty() => map.map_value_to_color(value),
                _ => map.null_color,
            },
            ColorMap::Constant(map) => {
                let has_value = column
                    .and_then(|c| c.value_at(row))
                    .is_some_and(|value| !value.is_empty());
                map.map_value_to_color(has_value)
            }
        }
    }
}

// =============================================================================
// Discrete
// =============================================================================

/// One bin of a discrete color map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorBin {
    /// Upper bound of this bin (inclusive).
    pub maximum: f64,
    pub color: Color,
    /// Whether the range minimum belongs to this bin rather than the one
    /// below it.
    pub include_minimum: bool,
}

/// Ascending bins over a numeric range. Values above the last bound fall
/// into the last bin; values below the first bound fall into the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscreteColorMap {
    pub bins: Vec<ColorBin>,
    pub null_color: Color,
}

impl DiscreteColorMap {
    pub fn map_value_to_color(&self, value: Option<f64>) -> Color {
        let Some(value) = value else {
            return self.null_color;
        };
        if self.bins.is_empty() {
            return self.null_color;
        }
        let mut at = 0;
        while at < self.bins.len() - 1 && value > self.bins[at].maximum {
            at += 1;
        }
        self.bins[at].color
    }
}

// =============================================================================
// Continuous
// =============================================================================

/// A gradient over a numeric range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuousColorMap {
    pub scale: Gradient,
    pub minimum: f64,
    pub maximum: f64,
    /// Centers the scale on zero instead of the range midpoint, so the
    /// palette's neutral middle lands on zero.
    pub is_diverging: bool,
    pub null_color: Color,
    /// Color for values outside `[minimum, maximum]`. When unset,
    /// out-of-range values clamp onto the ends of the scale.
    pub outlier_color: Option<Color>,
}

impl ContinuousColorMap {
    pub fn map_value_to_color(&self, value: Option<f64>) -> Color {
        let Some(value) = value else {
            return self.null_color;
        };
        if let Some(outlier_color) = self.outlier_color {
            if value < self.minimum || value > self.maximum {
                return outlier_color;
            }
        }
        self.scale.sample(self.normalize(value))
    }

    fn normalize(&self, value: f64) -> f64 {
        if self.is_diverging {
            let bound = self.minimum.abs().max(self.maximum.abs());
            if bound == 0.0 {
                return 0.5;
            }
            (value + bound) / (2.0 * bound)
        } else if self.maximum == self.minimum {
            0.5
        } else {
            (value - self.minimum) / (self.maximum - self.minimum)
        }
    }
}

// =============================================================================
// Enum
// =============================================================================

/// One category of an enum color map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumColorEntry {
    pub value: String,
    pub color: Color,
}

/// One color per category; unmatched values take the null color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumColorMap {
    pub entries: Vec<EnumColorEntry>,
    pub null_color: Color,
}

impl EnumColorMap {
    pub fn map_value_to_color(&self, value: &str) -> Color {
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| entry.color)
            .unwrap_or(self.null_color)
    }
}

// =============================================================================
// Constant
// =============================================================================

/// A single color for every value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantColorMap {
    pub color: Color,
    /// Label shown for the single legend entry.
    pub title: Option<String>,
    /// Set for region columns, so rows matching no region read as missing
    /// instead of silently taking the constant color.
    pub null_color: Option<Color>,
}

impl ConstantColorMap {
    pub fn map_value_to_color(&self, has_value: bool) -> Color {
        match self.null_color {
            Some(null_color) if !has_value => null_color,
            _ => self.color,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
