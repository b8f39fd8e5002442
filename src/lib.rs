/*!
# tablestyle - Table Styling and Legend Synthesis

A styling engine for tabular geospatial data: it infers what kind of data a
column holds, decides how the values should be encoded visually (discrete
bins, a continuous gradient, per-category colors, or a single constant), and
synthesizes the matching legend.

## Example

```rust
use tablestyle::{
    color_map_legend, resolve_color_map, ColorMap, ColorStyleOptions, Column, ColumnOptions,
    LegendItem, NoRegions,
};

// Build a column from raw string values.
let column = Column::new(
    "income",
    vec!["35,000".into(), "42,500".into(), "18,000".into(), "".into()],
    &ColumnOptions::default(),
    &NoRegions,
);

// Decide a color encoding: two bins over the value range.
let options = ColorStyleOptions {
    number_of_bins: Some(2),
    ..ColorStyleOptions::default()
};
let resolved = resolve_color_map(Some("Households"), Some(&column), &options, &[]).unwrap();
assert!(matches!(resolved.color_map, ColorMap::Discrete(_)));

// Synthesize the matching legend: two bins plus a "(No value)" entry.
let legend = color_map_legend(&resolved, Some(&column), &options, &LegendItem::default());
assert_eq!(legend.items.len(), 3);
```

## Architecture

Data flows one direction, and every step is a pure function of its inputs:

- **raw values** → [`column`] derives numeric, categorical, and region
  statistics, and infers the column type
- **column + configuration** → [`color_map`] and [`style_map`] decide an
  encoding and produce a plain value object
- **encoding** → [`legend`] synthesizes ordered legend items, and merges
  per-channel legends when their encodings are compatible

Recoverable configuration problems (an unknown palette name, an unparseable
color) never fail a decision: the resolver falls back to a documented default
and records a [`StyleWarning`](style::StyleWarning) on the result. Only
structural mistakes, such as a row index pointing past the end of a column,
surface as [`TableStyleError`].

## Core Components

- [`column`] - Column model: parsing, statistics, and type inference
- [`color_map`] - Color encoding decision and the four color map kinds
- [`style_map`] - Generic symbol-style encodings and point sizing
- [`outlier`] - Row grouping and the z-score range filter
- [`legend`] - Legend synthesis and merging
- [`palette`] - Named color palettes and gradient sampling
*/

pub mod color;
pub mod color_map;
pub mod column;
pub mod format;
pub mod legend;
pub mod outlier;
pub mod palette;
pub mod region;
pub mod style;
pub mod style_map;

// Re-export key types for convenience
pub use color::Color;
pub use color_map::{resolve_color_map, ColorMap, ResolvedColorMap};
pub use column::{Column, ColumnOptions, ColumnType};
pub use format::NumberFormat;
pub use legend::{
    color_map_legend, merge_legends, style_map_legend, Legend, LegendItem, LegendKind,
};
pub use outlier::{row_groups, z_score_filter, RowGroup, ValueRange};
pub use region::{NoRegions, RegionResolver, RegionType};
pub use style::{ColorStyleOptions, MapType, StyleWarning};
pub use style_map::{
    resolve_point_size_map, resolve_style_map, OutlineSymbol, PointSizeMap, PointSymbol, StyleMap,
};

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum TableStyleError {
    #[error("Column error: {0}")]
    ColumnError(String),

    #[error("Row group error: {0}")]
    RowGroupError(String),
}

pub type Result<T> = std::result::Result<T, TableStyleError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
