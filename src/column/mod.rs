/*!
Column model

A [`Column`] owns one column of raw string values and every statistic the
styling decisions need: a numeric view with its extrema, a frequency table of
distinct values, an optional region view, and the inferred [`ColumnType`].
All of it is computed once, up front, so the decision code never re-parses.

# Example

```rust
use tablestyle::column::{Column, ColumnOptions, ColumnType};
use tablestyle::region::NoRegions;

let column = Column::new(
    "population",
    vec!["1,200".into(), "560".into(), "".into()],
    &ColumnOptions::default(),
    &NoRegions,
);
assert_eq!(column.column_type(), ColumnType::Scalar);
assert_eq!(column.numbers().maximum, Some(1200.0));
```

# Type inference

When no explicit type is configured, the type is resolved in order:

1. a region classification matching the column name
2. a name hint such as `lat` or `year`
3. value statistics: mostly-numeric columns are scalar, columns with few
   distinct values are enums, everything else is text
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::region::{RegionResolver, RegionType};

pub mod types;

pub use types::ColumnType;

// =============================================================================
// Configuration
// =============================================================================

/// Per-column configuration. Every field is optional; an empty value is the
/// common case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnOptions {
    /// Human readable title; the column name is used when unset.
    pub title: Option<String>,

    /// Explicit column type, overriding all inference.
    #[serde(rename = "type")]
    pub column_type: Option<ColumnType>,

    /// Raw values to read as zero instead of parsing, e.g. `"-"` or `"NA"`.
    pub replace_with_zero_values: Vec<String>,

    /// Raw values to read as missing regardless of content.
    pub replace_with_null_values: Vec<String>,
}

// =============================================================================
// Derived views
// =============================================================================

/// Numeric view of a column's raw values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    /// One entry per row; `None` for rows without a usable number.
    pub values: Vec<Option<f64>>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    /// Rows holding a usable number, including replaced zeros.
    pub valid_count: usize,
    /// Rows whose parse failed, empty cells included. Rows replaced with
    /// null count as neither valid nor failed.
    pub failed_count: usize,
}

/// Frequency table of a column's distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueValues {
    /// Distinct values, most frequent first; ties keep first-appearance
    /// order.
    pub values: Vec<String>,
    /// Occurrence count for each entry of `values`.
    pub counts: Vec<usize>,
    /// Rows whose value is empty or configured as null.
    pub null_count: usize,
}

/// Region view of a column: the resolved region id per row.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub region_type: RegionType,
    /// One entry per row; `None` when the value matched no region.
    pub ids: Vec<Option<String>>,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Row numbers holding each matched region id.
    pub rows_by_id: HashMap<String, Vec<usize>>,
}

// =============================================================================
// Column
// =============================================================================

/// One table column: raw values plus everything derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    title: String,
    column_type: ColumnType,
    values: Vec<String>,
    numbers: NumericSummary,
    uniques: UniqueValues,
    regions: Option<RegionSummary>,
}

impl Column {
    /// Builds a column from raw values, trimming each one first.
    pub fn new(
        name: impl Into<String>,
        raw_values: Vec<String>,
        options: &ColumnOptions,
        resolver: &dyn RegionResolver,
    ) -> Column {
        let name = name.into();
        let values: Vec<String> = raw_values
            .into_iter()
            .map(|value| value.trim().to_string())
            .collect();

        let numbers = parse_numbers(&values, options);
        let uniques = count_uniques(&values, options);
        // The region view is kept even under an explicit type override, so
        // region statistics stay available to the caller.
        let regions = resolve_regions(&name, &values, resolver);
        let column_type = infer_type(
            &name,
            regions.is_some(),
            &numbers,
            &uniques,
            values.len(),
            options.column_type,
        );

        Column {
            title: options.title.clone().unwrap_or_else(|| name.clone()),
            name,
            column_type,
            values,
            numbers,
            uniques,
            regions,
        }
    }

    /// Builds a column from a column-major slice whose first entry is the
    /// header. A missing or empty header becomes `Column{index}`.
    pub fn from_raw(
        raw: &[String],
        index: usize,
        options: &ColumnOptions,
        resolver: &dyn RegionResolver,
    ) -> Column {
        let (header, values) = match raw.split_first() {
            Some((header, values)) => (header.trim(), values),
            None => ("", raw),
        };
        let name = if header.is_empty() {
            format!("Column{index}")
        } else {
            header.to_string()
        };
        Column::new(name, values.to_vec(), options, resolver)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Trimmed raw values, one per row.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn numbers(&self) -> &NumericSummary {
        &self.numbers
    }

    pub fn unique_values(&self) -> &UniqueValues {
        &self.uniques
    }

    pub fn regions(&self) -> Option<&RegionSummary> {
        self.regions.as_ref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The parsed number at `row`, if the row holds one.
    pub fn number_at(&self, row: usize) -> Option<f64> {
        self.numbers.values.get(row).copied().flatten()
    }

    /// The trimmed raw value at `row`.
    pub fn value_at(&self, row: usize) -> Option<&str> {
        self.values.get(row).map(|value| value.as_str())
    }
}

// =============================================================================
// Parsing and inference
// =============================================================================

/// Parses one raw value as a number. Thousands separators are stripped
/// before parsing, so `"35,000"` reads as 35000. Non-finite results are
/// rejected.
fn parse_number(value: &str) -> Option<f64> {
    if value.is_empty() {
        return None;
    }
    let parsed = if value.contains(',') {
        value.replace(',', "").parse::<f64>()
    } else {
        value.parse::<f64>()
    };
    parsed.ok().filter(|number| number.is_finite())
}

fn parse_numbers(values: &[String], options: &ColumnOptions) -> NumericSummary {
    let mut parsed_values = Vec::with_capacity(values.len());
    let mut minimum = f64::MAX;
    let mut maximum = f64::MIN;
    let mut valid_count = 0;
    let mut failed_count = 0;

    for value in values {
        let parsed = if options.replace_with_zero_values.iter().any(|v| v == value) {
            Some(0.0)
        } else if options.replace_with_null_values.iter().any(|v| v == value) {
            None
        } else {
            let parsed = parse_number(value);
            if parsed.is_none() {
                failed_count += 1;
            }
            parsed
        };

        if let Some(number) = parsed {
            valid_count += 1;
            minimum = minimum.min(number);
            maximum = maximum.max(number);
        }
        parsed_values.push(parsed);
    }

    NumericSummary {
        values: parsed_values,
        minimum: (valid_count > 0).then_some(minimum),
        maximum: (valid_count > 0).then_some(maximum),
        valid_count,
        failed_count,
    }
}

fn count_uniques(values: &[String], options: &ColumnOptions) -> UniqueValues {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();
    let mut null_count = 0;

    for value in values {
        if value.is_empty() || options.replace_with_null_values.iter().any(|v| v == value) {
            null_count += 1;
            continue;
        }
        match index.get(value.as_str()) {
            Some(&at) => entries[at].1 += 1,
            None => {
                index.insert(value.clone(), entries.len());
                entries.push((value.clone(), 1));
            }
        }
    }

    // Sort is stable, so equal counts keep first-appearance order.
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    let (values, counts): (Vec<String>, Vec<usize>) = entries.into_iter().unzip();

    UniqueValues {
        values,
        counts,
        null_count,
    }
}

fn resolve_regions(
    name: &str,
    values: &[String],
    resolver: &dyn RegionResolver,
) -> Option<RegionSummary> {
    let region_type = resolver.resolve_region_type(name)?;

    let mut ids = Vec::with_capacity(values.len());
    let mut valid_count = 0;
    let mut rows_by_id: HashMap<String, Vec<usize>> = HashMap::new();

    for (row, value) in values.iter().enumerate() {
        let id = resolver.match_region_id(&region_type, value);
        if let Some(id) = &id {
            valid_count += 1;
            rows_by_id.entry(id.clone()).or_default().push(row);
        }
        ids.push(id);
    }

    Some(RegionSummary {
        region_type,
        invalid_count: values.len() - valid_count,
        valid_count,
        ids,
        rows_by_id,
    })
}

fn infer_type(
    name: &str,
    has_regions: bool,
    numbers: &NumericSummary,
    uniques: &UniqueValues,
    row_count: usize,
    explicit: Option<ColumnType>,
) -> ColumnType {
    if let Some(explicit) = explicit {
        return explicit;
    }
    if has_regions {
        return ColumnType::Region;
    }
    if let Some(hinted) = ColumnType::from_name_hint(name) {
        return hinted;
    }

    // Scalar when parse failures stay within 10% of successful parses.
    if numbers.failed_count as f64 <= (numbers.valid_count as f64 * 0.1).ceil() {
        return ColumnType::Scalar;
    }

    // A small set of repeated values reads as categories.
    let unique_count = uniques.values.len();
    if unique_count <= 7 || (unique_count as f64) < row_count as f64 / 10.0 {
        ColumnType::Enum
    } else {
        ColumnType::Text
    }
}

// =============================================================================
// Tests
// =============================================================================
