/*!
Point symbol and point size styling

Point markers travel through the generic [`StyleMap`](super::StyleMap)
machinery; point size has its own dedicated map because it scales
continuously with the value instead of switching between discrete styles.
*/

use serde::{Deserialize, Serialize};

use crate::column::{Column, ColumnType};
use crate::style::PointSizeOptions;

use super::SymbolStyle;

// =============================================================================
// PointSymbol
// =============================================================================

/// Appearance of one point feature. Color and size are separate channels
/// with their own maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointSymbol {
    /// Marker identifier, e.g. `"circle"`, `"cross"`, or an image URL.
    pub marker: Option<String>,

    /// Clockwise rotation in degrees.
    pub rotation: Option<f64>,

    pub height: Option<f64>,

    pub width: Option<f64>,
}

impl SymbolStyle for PointSymbol {
    fn merged_over(&self, base: &PointSymbol) -> PointSymbol {
        PointSymbol {
            marker: self.marker.clone().or_else(|| base.marker.clone()),
            rotation: self.rotation.or(base.rotation),
            height: self.height.or(base.height),
            width: self.width.or(base.width),
        }
    }
}

// =============================================================================
// PointSizeMap
// =============================================================================

/// Maps a column's values to point sizes in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PointSizeMap {
    Scaled(ScaledPointSize),
    Constant(ConstantPointSize),
}

impl PointSizeMap {
    pub fn size_for_value(&self, value: Option<f64>) -> f64 {
        match self {
            PointSizeMap::Scaled(map) => map.size_for_value(value),
            PointSizeMap::Constant(map) => map.size,
        }
    }

    pub fn size_for_row(&self, column: Option<&Column>, row: usize) -> f64 {
        self.size_for_value(column.and_then(|c| c.number_at(row)))
    }
}

/// Sizes grow linearly with the value across the column's range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledPointSize {
    pub minimum: f64,
    pub maximum: f64,
    pub null_size: f64,
    pub size_factor: f64,
    pub size_offset: f64,
}

impl ScaledPointSize {
    pub fn size_for_value(&self, value: Option<f64>) -> f64 {
        match value {
            Some(value) if value.is_finite() => {
                let normalized = (value - self.minimum) / (self.maximum - self.minimum);
                normalized * self.size_factor + self.size_offset
            }
            _ => self.null_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantPointSize {
    pub size: f64,
}

/// Scaled sizing applies only to scalar columns with a non-degenerate
/// numeric range; anything else renders at the base size.
pub fn resolve_point_size_map(
    column: Option<&Column>,
    options: &PointSizeOptions,
) -> PointSizeMap {
    if let Some(column) = column {
        if column.column_type() == ColumnType::Scalar {
            let numbers = column.numbers();
            if let (Some(minimum), Some(maximum)) = (numbers.minimum, numbers.maximum) {
                if minimum < maximum {
                    return PointSizeMap::Scaled(ScaledPointSize {
                        minimum,
                        maximum,
                        null_size: options.null_size,
                        size_factor: options.size_factor,
                        size_offset: options.size_offset,
                    });
                }
            }
        }
    }
    PointSizeMap::Constant(ConstantPointSize {
        size: options.size_offset,
    })
}

// =============================================================================
// Tests
// =============================================================================
