/*!
Declarative style configuration

The options structs mirror the host application's catalog configuration:
everything is optional, absent fields fall back to documented defaults, and
nothing here is validated eagerly. Configuration problems surface as
[`StyleWarning`]s on the resolved encoding instead of failing the decision.
*/

use serde::{Deserialize, Serialize};

// =============================================================================
// Map type
// =============================================================================

/// Forces how a column's values are mapped onto a visual channel. When
/// unset, the encoding is inferred from the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Constant,
    Enum,
    Bin,
    Continuous,
}

// =============================================================================
// Color channel configuration
// =============================================================================

/// One category-to-color assignment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumColor {
    pub value: Option<String>,
    /// A CSS color string.
    pub color: Option<String>,
}

/// Color channel configuration for one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColorStyleOptions {
    /// Forces the encoding; inferred from the column when unset.
    pub map_type: Option<MapType>,

    /// Lower bound of the value range, overriding the column minimum.
    pub minimum_value: Option<f64>,

    /// Upper bound of the value range, overriding the column maximum.
    pub maximum_value: Option<f64>,

    /// Upper bound of each bin, ascending. Computed from the value range
    /// when unset.
    pub bin_maximums: Option<Vec<f64>>,

    /// CSS colors for the bins, in bin order. Palette colors fill any
    /// remainder.
    pub bin_colors: Option<Vec<String>>,

    /// Explicit category colors. When present, these replace the palette
    /// assignment entirely.
    pub enum_colors: Option<Vec<EnumColor>>,

    /// Named palette to draw colors from, e.g. `"Viridis"` or `"Set2"`. The
    /// default depends on the column type.
    pub color_palette: Option<String>,

    /// CSS color for rows without a usable value. Transparent when unset.
    pub null_color: Option<String>,

    /// Legend label for the no-value entry.
    pub null_label: Option<String>,

    /// CSS color for values outside the effective range.
    pub outlier_color: Option<String>,

    /// Legend label for the outlier entry.
    pub outlier_label: Option<String>,

    /// CSS color applied to every matched region.
    pub region_color: String,

    /// Bin count for computed bins. Setting this (to anything other than
    /// zero) selects a binned encoding for scalar columns.
    pub number_of_bins: Option<u32>,

    /// Sample count for continuous legends.
    pub legend_ticks: u32,

    /// printf-style number format for legend labels, e.g. `"%.2f"`.
    pub format: Option<String>,

    /// Group z-score above which a row group's values are excluded from the
    /// value range. Unset disables outlier filtering.
    pub z_score_filter: Option<f64>,

    /// Minimum fraction of the unfiltered range a filtered bound must move
    /// before it takes effect.
    pub range_filter: f64,
}

impl Default for ColorStyleOptions {
    fn default() -> ColorStyleOptions {
        ColorStyleOptions {
            map_type: None,
            minimum_value: None,
            maximum_value: None,
            bin_maximums: None,
            bin_colors: None,
            enum_colors: None,
            color_palette: None,
            null_color: None,
            null_label: None,
            outlier_color: None,
            outlier_label: None,
            region_color: "#02528d".to_string(),
            number_of_bins: None,
            legend_ticks: 7,
            format: None,
            z_score_filter: None,
            range_filter: 0.3,
        }
    }
}

// =============================================================================
// Symbol channel configuration
// =============================================================================

/// Style-map configuration, generic over the symbol payload (point marker,
/// outline, and so on).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleMapOptions<T> {
    /// Forces the encoding; inferred from the configured entries when unset.
    #[serde(default)]
    pub map_type: Option<MapType>,

    /// Style for rows without a usable value. Also the base every matched
    /// style is merged over, so bin and enum styles only need to name the
    /// fields they change.
    #[serde(default)]
    pub null_style: Option<T>,

    #[serde(default)]
    pub enum_styles: Vec<EnumStyle<T>>,

    #[serde(default)]
    pub bin_styles: Vec<BinStyle<T>>,
}

/// A symbol style applied to one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumStyle<T> {
    /// The category this style applies to.
    #[serde(default)]
    pub value: Option<String>,

    #[serde(flatten)]
    pub style: T,
}

/// A symbol style applied up to a bin boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinStyle<T> {
    /// Upper bound of this bin (inclusive).
    #[serde(default)]
    pub max_value: Option<f64>,

    #[serde(flatten)]
    pub style: T,
}

/// Point size configuration for scalar columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointSizeOptions {
    /// Multiplier applied to the normalized value.
    pub size_factor: f64,

    /// Base size added to every scaled value; also the constant size when
    /// scaling is impossible.
    pub size_offset: f64,

    /// Size for rows without a usable value.
    pub null_size: f64,
}

impl Default for PointSizeOptions {
    fn default() -> PointSizeOptions {
        PointSizeOptions {
            size_factor: 14.0,
            size_offset: 10.0,
            null_size: 9.0,
        }
    }
}

// =============================================================================
// Warnings
// =============================================================================

/// A recoverable configuration problem noted while resolving an encoding.
///
/// Warnings never stop a decision; the resolver falls back to a documented
/// default and records what it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleWarning {
    pub message: String,
}

impl StyleWarning {
    pub fn new(message: impl Into<String>) -> StyleWarning {
        StyleWarning {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StyleWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

// =============================================================================
// Tests
// =============================================================================
