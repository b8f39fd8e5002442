/*!
The color encoding decision

[`resolve_color_map`] turns a column plus configuration into exactly one
[`ColorMap`]. The rules are evaluated top to bottom and the first match
wins:

1. scalar column, map type `bin` or unset, bin boundaries exist: discrete
2. scalar column, map type `continuous` or unset, minimum < maximum:
   continuous
3. scalar column with a single distinct value: enum with one entry
4. enum or region column, map type `enum` or unset, at least one resolvable
   category: enum
5. everything else: constant

Configuration problems (an unknown palette, an unparseable color) never
change which rule fires; they fall back to documented defaults and are
recorded as warnings on the result.
*/

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::column::{Column, ColumnType};
use crate::outlier::{z_score_filter, RowGroup, ValueRange};
use crate::palette::{self, Gradient, Palette, PaletteKind};
use crate::style::{ColorStyleOptions, MapType, StyleWarning};
use crate::Result;

use super::{
    ColorBin, ColorMap, ConstantColorMap, ContinuousColorMap, DiscreteColorMap, EnumColorEntry,
    EnumColorMap,
};

/// Bin count when a binned encoding is selected without an explicit count.
const DEFAULT_NUMBER_OF_BINS: u32 = 7;

/// Last resort when every constant color candidate fails to parse.
const DEFAULT_CONSTANT_COLOR: Color = Color::rgb(255, 255, 0);

// =============================================================================
// ResolvedColorMap
// =============================================================================

/// Outcome of a color encoding decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedColorMap {
    pub color_map: ColorMap,

    /// Effective lower bound of the numeric range: explicit configuration,
    /// else the filtered bound, else the column minimum.
    pub minimum: Option<f64>,

    /// Effective upper bound, resolved the same way.
    pub maximum: Option<f64>,

    /// Color marking values outside the effective range, when values exist
    /// out there.
    pub outlier_color: Option<Color>,

    /// Range produced by the z-score filter, when it ran and tightened
    /// something.
    pub filtered_range: Option<ValueRange>,

    pub warnings: Vec<StyleWarning>,
}

// =============================================================================
// Decision
// =============================================================================

/// Decides the color encoding for one style.
///
/// `title` names the style (not the column) and seeds deterministic colors
/// for untitled constant encodings. `row_groups` feeds the z-score filter;
/// pass an empty slice when rows carry no grouping.
pub fn resolve_color_map(
    title: Option<&str>,
    column: Option<&Column>,
    options: &ColorStyleOptions,
    row_groups: &[RowGroup],
) -> Result<ResolvedColorMap> {
    let title = title.filter(|t| !t.is_empty());
    let mut warnings = Vec::new();

    let null_color = match &options.null_color {
        Some(css) => color_or_transparent(css, &mut warnings),
        None => Color::TRANSPARENT,
    };

    // Effective numeric range: explicit configuration wins, then the
    // z-score filtered range, then the column's actual extrema.
    let filtered_range = match (column, options.z_score_filter) {
        (Some(column), Some(threshold))
            if column.column_type() == ColumnType::Scalar
                && options.minimum_value.is_none()
                && options.maximum_value.is_none() =>
        {
            z_score_filter(column, row_groups, threshold, options.range_filter)?
        }
        _ => None,
    };
    let actual_minimum = column.and_then(|c| c.numbers().minimum);
    let actual_maximum = column.and_then(|c| c.numbers().maximum);
    let minimum = options
        .minimum_value
        .or(filtered_range.map(|range| range.minimum))
        .or(actual_minimum);
    let maximum = options
        .maximum_value
        .or(filtered_range.map(|range| range.maximum))
        .or(actual_maximum);

    let palette = effective_palette(column, options, minimum, maximum, &mut warnings);

    // An outlier color is in effect only when actual values fall outside
    // the effective range. Without a configured color, one is generated
    // only for filter-produced ranges; explicit narrow ranges just clamp.
    let has_outliers = match (actual_minimum, actual_maximum, minimum, maximum) {
        (Some(actual_minimum), Some(actual_maximum), Some(minimum), Some(maximum)) => {
            actual_minimum < minimum || actual_maximum > maximum
        }
        _ => false,
    };
    let outlier_color = if !has_outliers {
        None
    } else {
        match &options.outlier_color {
            Some(css) => Some(color_or_transparent(css, &mut warnings)),
            None => filtered_range
                .is_some()
                .then(|| Color::from_string_id(&format!("{}-outlier", title.unwrap_or("")))),
        }
    };

    let color_map = decide(
        title,
        column,
        options,
        palette,
        null_color,
        outlier_color,
        minimum,
        maximum,
        &mut warnings,
    );

    Ok(ResolvedColorMap {
        color_map,
        minimum,
        maximum,
        outlier_color,
        filtered_range,
        warnings,
    })
}

#[allow(clippy::too_many_arguments)]
fn decide(
    title: Option<&str>,
    column: Option<&Column>,
    options: &ColorStyleOptions,
    palette: &'static Palette,
    null_color: Color,
    outlier_color: Option<Color>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    warnings: &mut Vec<StyleWarning>,
) -> ColorMap {
    let column_type = column.map(|c| c.column_type());
    let is_scalar = column_type == Some(ColumnType::Scalar);

    // Rule 1: binned scalar.
    if is_scalar && matches!(options.map_type, None | Some(MapType::Bin)) {
        if let Some(column) = column {
            let maximums = bin_maximums(column, options, minimum, maximum);
            if !maximums.is_empty() {
                let colors = bin_colors(maximums.len(), options, palette, warnings);
                let bins = maximums
                    .into_iter()
                    .zip(colors)
                    .map(|(maximum, color)| ColorBin {
                        maximum,
                        color,
                        include_minimum: false,
                    })
                    .collect();
                return ColorMap::Discrete(DiscreteColorMap { bins, null_color });
            }
        }
    }

    // Rule 2: continuous scalar.
    if is_scalar && matches!(options.map_type, None | Some(MapType::Continuous)) {
        if let (Some(minimum), Some(maximum)) = (minimum, maximum) {
            if minimum < maximum {
                let is_diverging =
                    minimum < 0.0 && maximum > 0.0 && palette.kind == PaletteKind::Diverging;
                return ColorMap::Continuous(ContinuousColorMap {
                    scale: Gradient::from_palette(palette),
                    minimum,
                    maximum,
                    is_diverging,
                    null_color,
                    outlier_color,
                });
            }
        }
    }

    // Rule 3: a scalar with one distinct value cannot spread over a range,
    // so it gets a single enum entry colored from the top of the scale.
    if is_scalar {
        if let Some(column) = column {
            let uniques = &column.unique_values().values;
            if uniques.len() == 1 {
                let entries = vec![EnumColorEntry {
                    value: uniques[0].clone(),
                    color: Gradient::from_palette(palette).sample(1.0),
                }];
                return ColorMap::Enum(EnumColorMap {
                    entries,
                    null_color,
                });
            }
        }
    }

    // Rule 4: categorical column.
    if matches!(column_type, Some(ColumnType::Enum | ColumnType::Region))
        && matches!(options.map_type, None | Some(MapType::Enum))
    {
        if let Some(column) = column {
            let entries = enum_entries(column, options, palette, warnings);
            if !entries.is_empty() {
                return ColorMap::Enum(EnumColorMap {
                    entries,
                    null_color,
                });
            }
        }
    }

    // Rule 5: constant.
    ColorMap::Constant(constant_color_map(
        title,
        column_type,
        options,
        null_color,
        warnings,
    ))
}

// =============================================================================
// Bins
// =============================================================================

/// Ascending bin bounds. Explicit bounds are used as configured, with one
/// extra bin appended when the column's actual maximum exceeds the last
/// bound. Otherwise the effective range is divided evenly, when a bin
/// count is in play at all.
fn bin_maximums(
    column: &Column,
    options: &ColorStyleOptions,
    minimum: Option<f64>,
    maximum: Option<f64>,
) -> Vec<f64> {
    if let Some(configured) = &options.bin_maximums {
        let mut maximums = configured.clone();
        if let Some(actual_maximum) = column.numbers().maximum {
            if maximums.last().map_or(true, |last| actual_maximum > *last) {
                maximums.push(actual_maximum);
            }
        }
        return maximums;
    }

    let bin_count = match (options.map_type, options.number_of_bins) {
        (_, Some(0)) => return Vec::new(),
        (Some(MapType::Bin), count) => count.unwrap_or(DEFAULT_NUMBER_OF_BINS),
        (_, Some(count)) => count,
        _ => return Vec::new(),
    };

    let (Some(minimum), Some(maximum)) = (minimum, maximum) else {
        return Vec::new();
    };

    // No point in more bins than distinct values.
    let count = (bin_count as usize).min(column.unique_values().values.len());
    if count == 0 {
        return Vec::new();
    }

    let mut maximums = Vec::with_capacity(count);
    let step = (maximum - minimum) / count as f64;
    let mut next = minimum;
    for _ in 1..count {
        next += step;
        maximums.push(next);
    }
    maximums.push(maximum);
    maximums
}

/// One color per bin: configured colors first, palette colors for the
/// remainder, indexed by bin position.
fn bin_colors(
    count: usize,
    options: &ColorStyleOptions,
    palette: &Palette,
    warnings: &mut Vec<StyleWarning>,
) -> Vec<Color> {
    let palette_colors = palette::bin_palette_colors(palette, count);
    let configured = options.bin_colors.as_deref().unwrap_or(&[]);
    (0..count)
        .map(|at| match configured.get(at) {
            Some(css) => color_or_transparent(css, warnings),
            None => palette_colors[at],
        })
        .collect()
}

// =============================================================================
// Enum entries
// =============================================================================

/// Category entries: configured assignments when present (incomplete ones
/// skipped), else one entry per distinct value until the palette runs out.
/// Region columns paint every entry with the region color.
fn enum_entries(
    column: &Column,
    options: &ColorStyleOptions,
    palette: &Palette,
    warnings: &mut Vec<StyleWarning>,
) -> Vec<EnumColorEntry> {
    let region_color = (column.column_type() == ColumnType::Region)
        .then(|| color_or_transparent(&options.region_color, warnings));

    if let Some(configured) = &options.enum_colors {
        if !configured.is_empty() {
            return configured
                .iter()
                .filter_map(|entry| {
                    let value = entry.value.clone()?;
                    let css = entry.color.as_ref()?;
                    let color = match region_color {
                        Some(region_color) => region_color,
                        None => color_or_transparent(css, warnings),
                    };
                    Some(EnumColorEntry { value, color })
                })
                .collect();
        }
    }

    let uniques = &column.unique_values().values;
    let colors = match region_color {
        Some(region_color) => vec![region_color; uniques.len()],
        None => palette::categorical_colors(palette, uniques.len()),
    };
    uniques
        .iter()
        .zip(colors)
        .map(|(value, color)| EnumColorEntry {
            value: value.clone(),
            color,
        })
        .collect()
}

// =============================================================================
// Constant fallback
// =============================================================================

/// The constant color, tried in order: region color for region columns,
/// the configured null color, the first configured bin color, a color
/// seeded from the style title.
fn constant_color_map(
    title: Option<&str>,
    column_type: Option<ColumnType>,
    options: &ColorStyleOptions,
    null_color: Color,
    warnings: &mut Vec<StyleWarning>,
) -> ConstantColorMap {
    let is_region = column_type == Some(ColumnType::Region);

    let mut color = None;
    if is_region {
        color = try_color(&options.region_color, warnings);
    }
    if color.is_none() {
        if let Some(css) = &options.null_color {
            color = try_color(css, warnings);
        }
    }
    if color.is_none() {
        if let Some(css) = options.bin_colors.as_ref().and_then(|colors| colors.first()) {
            color = try_color(css, warnings);
        }
    }
    if color.is_none() {
        color = title.map(Color::from_string_id);
    }

    ConstantColorMap {
        color: color.unwrap_or(DEFAULT_CONSTANT_COLOR),
        title: title.map(|t| t.to_string()),
        // Unmatched regions read as missing; everything else takes the
        // constant color outright.
        null_color: is_region.then_some(null_color),
    }
}

// =============================================================================
// Palette selection
// =============================================================================

/// The palette to draw from: the configured name when it resolves, else a
/// default chosen from the column type and value range.
fn effective_palette(
    column: Option<&Column>,
    options: &ColorStyleOptions,
    minimum: Option<f64>,
    maximum: Option<f64>,
    warnings: &mut Vec<StyleWarning>,
) -> &'static Palette {
    let fallback = default_palette(column, minimum, maximum);
    match &options.color_palette {
        Some(name) => match palette::find_palette(name) {
            Some(palette) => palette,
            None => {
                warnings.push(StyleWarning::new(format!(
                    "unknown color palette '{}', using '{}'",
                    name, fallback.name
                )));
                fallback
            }
        },
        None => fallback,
    }
}

fn default_palette(
    column: Option<&Column>,
    minimum: Option<f64>,
    maximum: Option<f64>,
) -> &'static Palette {
    match column.map(|c| c.column_type()) {
        Some(ColumnType::Enum | ColumnType::Region | ColumnType::Text) => &palette::HIGH_CONTRAST,
        _ => match (minimum, maximum) {
            // A range straddling zero reads best on a diverging palette.
            (Some(minimum), Some(maximum)) if minimum < 0.0 && maximum > 0.0 => &palette::PUOR,
            _ => &palette::VIRIDIS,
        },
    }
}

// =============================================================================
// Color parsing
// =============================================================================

fn try_color(css: &str, warnings: &mut Vec<StyleWarning>) -> Option<Color> {
    let color = Color::from_css(css);
    if color.is_none() {
        warnings.push(StyleWarning::new(format!("unrecognized color '{}'", css)));
    }
    color
}

fn color_or_transparent(css: &str, warnings: &mut Vec<StyleWarning>) -> Color {
    try_color(css, warnings).unwrap_or(Color::TRANSPARENT)
}

// =============================================================================
// Tests
// =============================================================================
