/*!
Legend synthesis

Every encoding decision turns into an ordered list of [`LegendItem`]s for
the UI to render: one item per bin or category, a synthetic "no value"
entry when rows lack a value, and an "outlier" entry when an outlier color
is in effect. Numeric labels go through
[`NumberFormat`](crate::format::NumberFormat), so a style's label format
applies uniformly.

Binned and continuous legends list the highest values first, matching how
a vertical legend reads against a map. Category legends keep their
frequency order.

Per-channel legends (color, point, outline) describing the same encoding
merge item-by-item with [`merge_legends`], so one swatch can carry a fill
color and an outline at once.
*/

pub mod color;
pub mod merge;
pub mod style;

pub use color::color_map_legend;
pub use merge::merge_legends;
pub use style::{style_map_legend, SwatchStyle};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::column::Column;

/// Label for the synthetic no-value entry when none is configured.
pub(crate) const DEFAULT_NULL_LABEL: &str = "(No value)";

/// Label for the synthetic outlier entry when none is configured.
pub(crate) const DEFAULT_OUTLIER_LABEL: &str = "Outlier values";

// =============================================================================
// Legend
// =============================================================================

/// Which shape of encoding a legend describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendKind {
    Bin,
    Continuous,
    Enum,
    Constant,
}

/// One legend row: a swatch plus its label.
///
/// Synthesis seeds every item from a caller-supplied template, so fields
/// the encoding does not touch (say, a fixed marker for every row) survive
/// into the output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegendItem {
    pub title: Option<String>,

    /// All labels when several categories share one swatch.
    pub multiple_titles: Option<Vec<String>>,

    pub color: Option<Color>,

    pub outline_color: Option<Color>,

    pub outline_width: Option<f64>,

    /// Marker identifier for point swatches.
    pub marker: Option<String>,

    /// Marker rotation in degrees.
    pub rotation: Option<f64>,

    /// Renders a gap above this item, separating synthetic entries from
    /// the value entries.
    pub add_spacing_above: bool,

    /// Marks the synthetic outlier entry.
    pub outlier_marker: bool,
}

/// An ordered list of legend items for one visual channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend heading, normally the column title. Constant encodings have
    /// no heading.
    pub title: Option<String>,

    pub kind: LegendKind,

    /// Name of the column the encoding keys off, when there is one.
    pub column: Option<String>,

    pub items: Vec<LegendItem>,
}

/// Whether any row of a numeric column failed to parse, which is what
/// earns a legend its no-value entry.
pub(crate) fn has_missing_numbers(column: Option<&Column>) -> bool {
    match column {
        Some(column) => column.numbers().valid_count < column.len(),
        None => false,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_item_serde_defaults() {
        let item: LegendItem = serde_json::from_str("{}").unwrap();
        assert_eq!(item, LegendItem::default());
        assert!(!item.add_spacing_above);
    }

    #[test]
    fn test_legend_item_serde_camel_case() {
        let item: LegendItem = serde_json::from_str(
            r#"{ "title": "High", "addSpacingAbove": true, "outlineWidth": 2.0 }"#,
        )
        .unwrap();
        assert_eq!(item.title.as_deref(), Some("High"));
        assert!(item.add_spacing_above);
        assert_eq!(item.outline_width, Some(2.0));
    }

    #[test]
    fn test_legend_kind_serde() {
        assert_eq!(
            serde_json::to_string(&LegendKind::Continuous).unwrap(),
            "\"continuous\""
        );
    }
}
