/*!
Legends for symbol style encodings

Point and outline channels reuse the layout of the color legends: binned
maps list value ranges highest first, category maps list one item per
entry, and a "no value" entry shows the null style. Instead of a fill
color, each item carries the swatch fields its payload knows how to set.
*/

use crate::column::Column;
use crate::format::label_format;
use crate::style_map::{
    BinStyleMap, ConstantStyleMap, EnumStyleMap, OutlineSymbol, PointSymbol, StyleMap,
};

use super::{has_missing_numbers, Legend, LegendItem, LegendKind, DEFAULT_NULL_LABEL};

// =============================================================================
// SwatchStyle
// =============================================================================

/// A style payload that can draw itself onto a legend item's swatch.
///
/// Only set fields are written, so an empty payload yields a label-only
/// item and overrides from other channels survive.
pub trait SwatchStyle {
    fn apply_to_swatch(&self, item: &mut LegendItem);
}

impl SwatchStyle for PointSymbol {
    fn apply_to_swatch(&self, item: &mut LegendItem) {
        if let Some(marker) = &self.marker {
            item.marker = Some(marker.clone());
        }
        if let Some(rotation) = self.rotation {
            item.rotation = Some(rotation);
        }
    }
}

impl SwatchStyle for OutlineSymbol {
    fn apply_to_swatch(&self, item: &mut LegendItem) {
        if let Some(color) = self.color {
            item.outline_color = Some(color);
        }
        if let Some(width) = self.width {
            item.outline_width = Some(width);
        }
    }
}

// =============================================================================
// Synthesis
// =============================================================================

/// Synthesizes the legend for a symbol style encoding.
///
/// `format` is an optional printf-style spec for bin labels; without one,
/// fraction digits come from the column's value range, matching the color
/// legend so that merged channels label their bins identically.
pub fn style_map_legend<T: SwatchStyle>(
    map: &StyleMap<T>,
    column: Option<&Column>,
    format: Option<&str>,
    overrides: &LegendItem,
) -> Legend {
    let (kind, items) = match map {
        StyleMap::Bin(map) => (LegendKind::Bin, bin_items(map, column, format, overrides)),
        StyleMap::Enum(map) => (LegendKind::Enum, enum_items(map, column, overrides)),
        StyleMap::Constant(map) => (LegendKind::Constant, constant_items(map, overrides)),
    };

    Legend {
        title: match map {
            StyleMap::Constant(_) => None,
            _ => column.map(|c| c.title().to_string()),
        },
        kind,
        column: column.map(|c| c.name().to_string()),
        items,
    }
}

/// One item per bin, labelled `"{lower} to {upper}"` like a discrete color
/// legend, highest bin first.
fn bin_items<T: SwatchStyle>(
    map: &BinStyleMap<T>,
    column: Option<&Column>,
    format: Option<&str>,
    overrides: &LegendItem,
) -> Vec<LegendItem> {
    let minimum = column.and_then(|c| c.numbers().minimum);
    let maximum = column.and_then(|c| c.numbers().maximum);
    let format = label_format(format, minimum, maximum);

    let mut lower = minimum.unwrap_or(0.0);
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
            bin.style.apply_to_swatch(&mut item);
            lower = bin.maximum;
            item
        })
        .collect();
    items.reverse();

    if has_missing_numbers(column) {
        items.push(null_item(&map.null_style, overrides));
    }
    items
}

/// One item per configured entry, in entry order; the null style covers
/// both missing values and categories without an entry.
fn enum_items<T: SwatchStyle>(
    map: &EnumStyleMap<T>,
    column: Option<&Column>,
    overrides: &LegendItem,
) -> Vec<LegendItem> {
    let mut items: Vec<LegendItem> = map
        .entries
        .iter()
        .map(|entry| {
            let mut item = overrides.clone();
            item.title = Some(entry.value.clone());
            entry.style.apply_to_swatch(&mut item);
            item
        })
        .collect();

    if let Some(column) = column {
        let uniques = column.unique_values();
        if uniques.null_count > 0 || uniques.values.len() > map.entries.len() {
            items.push(null_item(&map.null_style, overrides));
        }
    }
    items
}

fn constant_items<T: SwatchStyle>(
    map: &ConstantStyleMap<T>,
    overrides: &LegendItem,
) -> Vec<LegendItem> {
    let mut item = overrides.clone();
    map.style.apply_to_swatch(&mut item);
    vec![item]
}

fn null_item<T: SwatchStyle>(null_style: &T, overrides: &LegendItem) -> LegendItem {
    let mut item = overrides.clone();
    item.title = Some(DEFAULT_NULL_LABEL.to_string());
    null_style.apply_to_swatch(&mut item);
    item.add_spacing_above = true;
    item
}

// =============================================================================
// Tests
// =============================================================================
