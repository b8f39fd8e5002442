/*!
Legends for color encodings
*/

use crate::color::Color;
use crate::color_map::{
    ColorMap, ConstantColorMap, ContinuousColorMap, DiscreteColorMap, EnumColorMap,
    ResolvedColorMap,
};
use crate::column::Column;
use crate::format::{label_format, NumberFormat};
use crate::style::ColorStyleOptions;

use super::{
    has_missing_numbers, Legend, LegendItem, LegendKind, DEFAULT_NULL_LABEL, DEFAULT_OUTLIER_LABEL,
};

// =============================================================================
// Synthesis
// =============================================================================

/// Synthesizes the legend for a resolved color encoding.
///
/// Every item starts as a copy of `overrides`, so channel-wide swatch
/// properties (a fixed marker, an outline) pass through untouched. Numeric
/// labels use the style's configured format, else fraction digits chosen
/// from the effective range.
pub fn color_map_legend(
    resolved: &ResolvedColorMap,
    column: Option<&Column>,
    options: &ColorStyleOptions,
    overrides: &LegendItem,
) -> Legend {
    let format = label_format(
        options.format.as_deref(),
        resolved.minimum,
        resolved.maximum,
    );

    let (kind, items) = match &resolved.color_map {
        ColorMap::Discrete(map) => (
            LegendKind::Bin,
            discrete_items(map, column, options, &format, overrides),
        ),
        ColorMap::Continuous(map) => (
            LegendKind::Continuous,
            continuous_items(map, column, options, &format, overrides),
        ),
        ColorMap::Enum(map) => (
            LegendKind::Enum,
            enum_items(map, column, options, overrides),
        ),
        ColorMap::Constant(map) => (LegendKind::Constant, constant_items(map, overrides)),
    };

    Legend {
        title: match &resolved.color_map {
            ColorMap::Constant(_) => None,
            _ => column.map(|c| c.title().to_string()),
        },
        kind,
        column: column.map(|c| c.name().to_string()),
        items,
    }
}

/// One item per bin, labelled `"{lower} to {upper}"`. The first bin's
/// lower bound is the column's actual minimum. Highest bin first.
fn discrete_items(
    map: &DiscreteColorMap,
    column: Option<&Column>,
    options: &ColorStyleOptions,
    format: &NumberFormat,
    overrides: &LegendItem,
) -> Vec<LegendItem> {
    let mut lower = column.and_then(|c| c.numbers().minimum).unwrap_or(0.0);
    let mut items: Vec<LegendItem> = map
        .bins
        .iter()
        .map(|bin| {
            let mut item = overrides.clone();
            item.title = Some(format!(
                "{} to {}",
                format.format(lower),
                format.format(bin.maximum)
            ));
            item.color = Some(bin.color);
            lower = bin.maximum;
            item
        })
        .collect();
    items.reverse();

    if has_missing_numbers(column) {
        items.push(null_item(map.null_color, options, overrides));
    }
    items
}

/// Evenly spaced samples across the range, highest first. The top sample
/// is the exact configured maximum, never a recomputed one.
fn continuous_items(
    map: &ContinuousColorMap,
    column: Option<&Column>,
    options: &ColorStyleOptions,
    format: &NumberFormat,
    overrides: &LegendItem,
) -> Vec<LegendItem> {
    // Two ticks minimum: the spacing divides by (ticks - 1).
    let ticks = options.legend_ticks.max(2);
    let mut items: Vec<LegendItem> = (0..ticks)
        .map(|i| {
            let value = if i + 1 == ticks {
                map.maximum
            } else {
                map.minimum + (map.maximum - map.minimum) * (i as f64 / (ticks - 1) as f64)
            };
            let mut item = overrides.clone();
            item.title = Some(format.format(value));
            item.color = Some(map.map_value_to_color(Some(value)));
            item
        })
        .collect();
    items.reverse();

    if has_missing_numbers(column) {
        items.push(null_item(map.null_color, options, overrides));
    }
    if let Some(outlier_color) = map.outlier_color {
        items.push(outlier_item(outlier_color, options, overrides));
    }
    items
}

/// One item per distinct color; categories sharing a color collapse into a
/// single item carrying all their labels.
fn enum_items(
    map: &EnumColorMap,
    column: Option<&Column>,
    options: &ColorStyleOptions,
    overrides: &LegendItem,
) -> Vec<LegendItem> {
    let mut grouped: Vec<(Color, Vec<&str>)> = Vec::new();
    for entry in &map.entries {
        match grouped.iter_mut().find(|(color, _)| *color == entry.color) {
            Some((_, values)) => values.push(&entry.value),
            None => grouped.push((entry.color, vec![&entry.value])),
        }
    }

    let mut items: Vec<LegendItem> = grouped
        .into_iter()
        .map(|(color, values)| {
            let mut item = overrides.clone();
            item.title = Some(values[0].to_string());
            if values.len() > 1 {
                item.multiple_titles = Some(values.iter().map(|v| v.to_string()).collect());
            }
            item.color = Some(color);
            item
        })
        .collect();

    if let Some(column) = column {
        let uniques = column.unique_values();
        // Nulls exist, or categories outnumber the entries that got a
        // color.
        if uniques.null_count > 0 || uniques.values.len() > map.entries.len() {
            items.push(null_item(map.null_color, options, overrides));
        }
    }
    items
}

fn constant_items(map: &ConstantColorMap, overrides: &LegendItem) -> Vec<LegendItem> {
    let mut item = overrides.clone();
    item.title = map.title.clone();
    item.color = Some(map.color);
    vec![item]
}

// =============================================================================
// Synthetic entries
// =============================================================================

fn null_item(color: Color, options: &ColorStyleOptions, overrides: &LegendItem) -> LegendItem {
    let mut item = overrides.clone();
    item.title = Some(
        options
            .null_label
            .clone()
            .unwrap_or_else(|| DEFAULT_NULL_LABEL.to_string()),
    );
    item.color = Some(color);
    item.add_spacing_above = true;
    item
}

fn outlier_item(color: Color, options: &ColorStyleOptions, overrides: &LegendItem) -> LegendItem {
    let mut item = overrides.clone();
    item.title = Some(
        options
            .outlier_label
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTLIER_LABEL.to_string()),
    );
    item.color = Some(color);
    item.add_spacing_above = true;
    item.outlier_marker = true;
    item
}

// =============================================================================
// Tests
// =============================================================================
