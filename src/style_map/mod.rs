/*!
Generic symbol style maps

A [`StyleMap`] assigns a symbol style payload (a point marker, an outline
stroke) to each row the same way a [`ColorMap`](crate::color_map::ColorMap)
assigns colors: binned by value, matched by category, or constant. Symbol
styles have no continuous interpolation, so the decision has one branch
fewer than the color decision.

Payloads implement [`SymbolStyle`] so a configured entry can leave fields
unset and inherit them from the null style.

# Example

```
use tablestyle::{resolve_style_map, PointSymbol, StyleMap};
use tablestyle::{Column, ColumnOptions, NoRegions};

let column = Column::new(
    "kind",
    vec!["hospital".into(), "school".into()],
    &ColumnOptions::default(),
    &NoRegions,
);
let options = serde_json::from_str(
    r#"{
        "nullStyle": { "marker": "circle" },
        "enumStyles": [{ "value": "hospital", "marker": "cross" }]
    }"#,
)
.unwrap();

let map: StyleMap<PointSymbol> = resolve_style_map(Some(&column), &options);
let style = map.style_for_row(Some(&column), 0);
assert_eq!(style.marker.as_deref(), Some("cross"));
```
*/

pub mod outline;
pub mod point;

pub use outline::OutlineSymbol;
pub use point::{resolve_point_size_map, PointSizeMap, PointSymbol};

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::style::{MapType, StyleMapOptions};

// =============================================================================
// SymbolStyle
// =============================================================================

/// A style payload whose unset fields can inherit from a base style.
pub trait SymbolStyle: Clone {
    /// This style layered over `base`: fields set here win, unset fields
    /// take the base value.
    fn merged_over(&self, base: &Self) -> Self;
}

// =============================================================================
// StyleMap
// =============================================================================

/// Maps a column's values to symbol styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StyleMap<T> {
    Bin(BinStyleMap<T>),
    Enum(EnumStyleMap<T>),
    Constant(ConstantStyleMap<T>),
}

impl<T> StyleMap<T> {
    /// The style for one row: bins look up the row's number, categories its
    /// raw value.
    pub fn style_for_row(&self, column: Option<&Column>, row: usize) -> &T {
        match self {
            StyleMap::Bin(map) => map.style_for_value(column.and_then(|c| c.number_at(row))),
            StyleMap::Enum(map) => {
                let value = column
                    .and_then(|c| c.value_at(row))
                    .filter(|value| !value.is_empty());
                map.style_for_value(value)
            }
            StyleMap::Constant(map) => &map.style,
        }
    }
}

/// One bin: values at or below `maximum` take `style`, unless an earlier
/// bin claimed them first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleBin<T> {
    pub maximum: f64,
    pub style: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinStyleMap<T> {
    /// Bins in configured order, scanned first to last.
    pub bins: Vec<StyleBin<T>>,
    pub null_style: T,
}

impl<T> BinStyleMap<T> {
    /// The first bin whose bound covers the value; values above every bound
    /// fall in the last bin.
    pub fn style_for_value(&self, value: Option<f64>) -> &T {
        let Some(value) = value else {
            return &self.null_style;
        };
        self.bins
            .iter()
            .find(|bin| value <= bin.maximum)
            .or(self.bins.last())
            .map(|bin| &bin.style)
            .unwrap_or(&self.null_style)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleEntry<T> {
    pub value: String,
    pub style: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumStyleMap<T> {
    pub entries: Vec<StyleEntry<T>>,
    pub null_style: T,
}

impl<T> EnumStyleMap<T> {
    pub fn style_for_value(&self, value: Option<&str>) -> &T {
        let Some(value) = value else {
            return &self.null_style;
        };
        self.entries
            .iter()
            .find(|entry| entry.value == value)
            .map(|entry| &entry.style)
            .unwrap_or(&self.null_style)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstantStyleMap<T> {
    pub style: T,
}

// =============================================================================
// Decision
// =============================================================================

/// Decides the style encoding for one symbol channel. Evaluated top to
/// bottom, first match wins:
///
/// 1. map type `bin` or unset, a column, and at least one configured bin
///    with a bound: binned
/// 2. map type `enum` or unset, a column, and at least one configured
///    entry with a value: category match
/// 3. otherwise: the null style everywhere
///
/// Matched styles are merged over the null style up front, so mapping a
/// value never has to consult two layers.
pub fn resolve_style_map<T>(column: Option<&Column>, options: &StyleMapOptions<T>) -> StyleMap<T>
where
    T: SymbolStyle + Default,
{
    let null_style = options.null_style.clone().unwrap_or_default();

    if matches!(options.map_type, None | Some(MapType::Bin)) && column.is_some() {
        let bins: Vec<StyleBin<T>> = options
            .bin_styles
            .iter()
            .filter_map(|bin| {
                let maximum = bin.max_value?;
                Some(StyleBin {
                    maximum,
                    style: bin.style.merged_over(&null_style),
                })
            })
            .collect();
        if !bins.is_empty() {
            return StyleMap::Bin(BinStyleMap { bins, null_style });
        }
    }

    if matches!(options.map_type, None | Some(MapType::Enum)) && column.is_some() {
        let entries: Vec<StyleEntry<T>> = options
            .enum_styles
            .iter()
            .filter_map(|entry| {
                let value = entry.value.clone().filter(|value| !value.is_empty())?;
                Some(StyleEntry {
                    value,
                    style: entry.style.merged_over(&null_style),
                })
            })
            .collect();
        if !entries.is_empty() {
            return StyleMap::Enum(EnumStyleMap {
                entries,
                null_style,
            });
        }
    }

    StyleMap::Constant(ConstantStyleMap { style: null_style })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnOptions;
    use crate::region::NoRegions;
    use crate::style::{BinStyle, EnumStyle};

    fn column(values: &[&str]) -> Column {
        Column::new(
            "test",
            values.iter().map(|v| v.to_string()).collect(),
            &ColumnOptions::default(),
            &NoRegions,
        )
    }

    fn marker(name: &str) -> PointSymbol {
        PointSymbol {
            marker: Some(name.to_string()),
            ..PointSymbol::default()
        }
    }

    #[test]
    fn test_bin_styles_win_over_enum_styles() {
        let column = column(&["1", "2", "3"]);
        let options = StyleMapOptions {
            bin_styles: vec![BinStyle {
                max_value: Some(2.0),
                style: marker("square"),
            }],
            enum_styles: vec![EnumStyle {
                value: Some("1".to_string()),
                style: marker("cross"),
            }],
            ..StyleMapOptions::default()
        };
        let map = resolve_style_map(Some(&column), &options);
        assert!(matches!(map, StyleMap::Bin(_)));
    }

    #[test]
    fn test_bins_without_bounds_are_skipped() {
        let column = column(&["1", "2"]);
        let options = StyleMapOptions {
            bin_styles: vec![BinStyle {
                max_value: None,
                style: marker("square"),
            }],
            ..StyleMapOptions::default()
        };
        let map = resolve_style_map(Some(&column), &options);
        assert!(matches!(map, StyleMap::Constant(_)));
    }

    #[test]
    fn test_entry_fields_merge_over_null_style() {
        let column = column(&["a", "b"]);
        let options = StyleMapOptions {
            null_style: Some(PointSymbol {
                marker: Some("circle".to_string()),
                rotation: Some(0.0),
                ..PointSymbol::default()
            }),
            enum_styles: vec![EnumStyle {
                value: Some("a".to_string()),
                style: PointSymbol {
                    rotation: Some(45.0),
                    ..PointSymbol::default()
                },
            }],
            ..StyleMapOptions::default()
        };
        let map = resolve_style_map(Some(&column), &options);
        let style = map.style_for_row(Some(&column), 0);
        // The entry sets rotation and inherits the marker.
        assert_eq!(style.marker.as_deref(), Some("circle"));
        assert_eq!(style.rotation, Some(45.0));
    }

    #[test]
    fn test_bin_scan_order_and_clamping() {
        let map = BinStyleMap {
            bins: vec![
                StyleBin {
                    maximum: 10.0,
                    style: marker("small"),
                },
                StyleBin {
                    maximum: 20.0,
                    style: marker("large"),
                },
            ],
            null_style: marker("none"),
        };
        assert_eq!(
            map.style_for_value(Some(10.0)).marker.as_deref(),
            Some("small")
        );
        assert_eq!(
            map.style_for_value(Some(15.0)).marker.as_deref(),
            Some("large")
        );
        // Above every bound falls in the last bin.
        assert_eq!(
            map.style_for_value(Some(99.0)).marker.as_deref(),
            Some("large")
        );
        assert_eq!(map.style_for_value(None).marker.as_deref(), Some("none"));
    }

    #[test]
    fn test_enum_match_and_fallback() {
        let map = EnumStyleMap {
            entries: vec![StyleEntry {
                value: "hospital".to_string(),
                style: marker("cross"),
            }],
            null_style: marker("circle"),
        };
        assert_eq!(
            map.style_for_value(Some("hospital")).marker.as_deref(),
            Some("cross")
        );
        assert_eq!(
            map.style_for_value(Some("school")).marker.as_deref(),
            Some("circle")
        );
        assert_eq!(map.style_for_value(None).marker.as_deref(), Some("circle"));
    }

    #[test]
    fn test_map_type_enum_skips_bins() {
        let column = column(&["1", "2"]);
        let options = StyleMapOptions {
            map_type: Some(MapType::Enum),
            bin_styles: vec![BinStyle {
                max_value: Some(2.0),
                style: marker("square"),
            }],
            ..StyleMapOptions::default()
        };
        let map = resolve_style_map(Some(&column), &options);
        assert!(matches!(map, StyleMap::Constant(_)));
    }

    #[test]
    fn test_no_column_is_constant() {
        let options: StyleMapOptions<PointSymbol> = StyleMapOptions {
            null_style: Some(marker("circle")),
            bin_styles: vec![BinStyle {
                max_value: Some(2.0),
                style: marker("square"),
            }],
            ..StyleMapOptions::default()
        };
        let map = resolve_style_map(None, &options);
        let StyleMap::Constant(map) = map else {
            panic!("expected a constant map");
        };
        assert_eq!(map.style.marker.as_deref(), Some("circle"));
    }

    #[test]
    fn test_empty_raw_value_maps_to_null_style() {
        let column = column(&["a", ""]);
        let options = StyleMapOptions {
            null_style: Some(marker("circle")),
            enum_styles: vec![EnumStyle {
                value: Some("a".to_string()),
                style: marker("cross"),
            }],
            ..StyleMapOptions::default()
        };
        let map = resolve_style_map(Some(&column), &options);
        assert_eq!(
            map.style_for_row(Some(&column), 1).marker.as_deref(),
            Some("circle")
        );
    }

    #[test]
    fn test_style_map_serde_kind_tag() {
        let map: StyleMap<PointSymbol> = StyleMap::Constant(ConstantStyleMap {
            style: marker("circle"),
        });
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["kind"], "constant");
        assert_eq!(json["style"]["marker"], "circle");

        let back: StyleMap<PointSymbol> = serde_json::from_value(json).unwrap();
        assert_eq!(back, map);
    }
}
