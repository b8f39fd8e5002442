/*!
Row grouping and the z-score range filter

Tables often repeat one real-world feature across many rows, keyed by id
columns. A single feature with extreme values can stretch a color scale
until everything else is indistinguishable. The filter works on row groups
rather than raw rows so that a feature is kept or excluded as a whole:

1. group rows by their joined id-column values
2. compute each group's mean and the z-score of that mean against all
   group means
3. keep only groups within the threshold, and take the value range of what
   remains

A filtered bound that barely moves is snapped back to the actual bound,
controlled by `range_filter`. When neither bound ends up moving, the filter
reports nothing happened.
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::{Result, TableStyleError};

// =============================================================================
// Row groups
// =============================================================================

/// Rows belonging to one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowGroup {
    /// Joined id-column values, e.g. `"buoy-14"`.
    pub id: String,
    /// Row numbers, in table order.
    pub rows: Vec<usize>,
}

/// Groups row numbers by the joined values of the id columns, in
/// first-appearance order. With no id columns, every row lands in one
/// group.
pub fn row_groups(id_columns: &[&Column], row_count: usize) -> Result<Vec<RowGroup>> {
    for column in id_columns {
        if column.len() != row_count {
            return Err(TableStyleError::ColumnError(format!(
                "id column '{}' has {} rows, expected {}",
                column.name(),
                column.len(),
                row_count
            )));
        }
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<RowGroup> = Vec::new();

    for row in 0..row_count {
        let id = id_columns
            .iter()
            .map(|column| column.values()[row].as_str())
            .collect::<Vec<_>>()
            .join("-");
        match index.get(&id) {
            Some(&at) => groups[at].rows.push(row),
            None => {
                index.insert(id.clone(), groups.len());
                groups.push(RowGroup {
                    id,
                    rows: vec![row],
                });
            }
        }
    }

    Ok(groups)
}

// =============================================================================
// Z-score filter
// =============================================================================

/// A closed numeric range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub minimum: f64,
    pub maximum: f64,
}

/// Computes a tightened value range for `column` by excluding row groups
/// whose mean lies more than `z_threshold` standard deviations from the
/// mean of all group means.
///
/// Returns `None` when the filter changes nothing: no groups hold values,
/// every group is within the threshold, or both bounds snap back under
/// `range_filter`. A group row pointing past the end of the column is a
/// structural error.
pub fn z_score_filter(
    column: &Column,
    groups: &[RowGroup],
    z_threshold: f64,
    range_filter: f64,
) -> Result<Option<ValueRange>> {
    let numbers = column.numbers();
    let (Some(actual_minimum), Some(actual_maximum)) = (numbers.minimum, numbers.maximum) else {
        return Ok(None);
    };

    let mut group_values: Vec<Vec<f64>> = Vec::with_capacity(groups.len());
    for group in groups {
        let mut values = Vec::with_capacity(group.rows.len());
        for &row in &group.rows {
            let Some(parsed) = numbers.values.get(row) else {
                return Err(TableStyleError::RowGroupError(format!(
                    "group '{}' references row {}, but column '{}' has {} rows",
                    group.id,
                    row,
                    column.name(),
                    column.len()
                )));
            };
            if let Some(value) = parsed {
                values.push(*value);
            }
        }
        group_values.push(values);
    }

    let means: Vec<f64> = group_values
        .iter()
        .filter(|values| !values.is_empty())
        .map(|values| mean(values))
        .collect();
    if means.is_empty() {
        return Ok(None);
    }
    let grand_mean = mean(&means);
    let deviation = standard_deviation(&means, grand_mean);

    let mut minimum = f64::INFINITY;
    let mut maximum = f64::NEG_INFINITY;
    for values in &group_values {
        if values.is_empty() {
            continue;
        }
        let score = if deviation == 0.0 {
            0.0
        } else {
            ((mean(values) - grand_mean) / deviation).abs()
        };
        if score <= z_threshold {
            for &value in values {
                minimum = minimum.min(value);
                maximum = maximum.max(value);
            }
        }
    }
    if !minimum.is_finite() || !maximum.is_finite() {
        return Ok(None);
    }

    // A bound that moves less than range_filter of the full range snaps
    // back to the actual bound.
    let range = actual_maximum - actual_minimum;
    if minimum - actual_minimum < range_filter * range {
        minimum = actual_minimum;
    }
    if actual_maximum - maximum < range_filter * range {
        maximum = actual_maximum;
    }

    if minimum == actual_minimum && maximum == actual_maximum {
        return Ok(None);
    }
    Ok(Some(ValueRange { minimum, maximum }))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn standard_deviation(values: &[f64], mean: f64) -> f64 {
    let sum_of_squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    (sum_of_squares / values.len() as f64).sqrt()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ColumnOptions;
    use crate::region::NoRegions;
    use proptest::prelude::*;

    fn numeric_column(values: &[&str]) -> Column {
        Column::new(
            "value",
            values.iter().map(|v| v.to_string()).collect(),
            &ColumnOptions::default(),
            &NoRegions,
        )
    }

    fn one_group_per_row(count: usize) -> Vec<RowGroup> {
        (0..count)
            .map(|row| RowGroup {
                id: row.to_string(),
                rows: vec![row],
            })
            .collect()
    }

    #[test]
    fn test_row_groups_joins_ids() {
        let site = numeric_column(&["a", "a", "b"]);
        let year = numeric_column(&["1", "2", "1"]);
        let groups = row_groups(&[&site, &year], 3).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].id, "a-1");
        assert_eq!(groups[1].id, "a-2");
        assert_eq!(groups[2].id, "b-1");
    }

    #[test]
    fn test_row_groups_first_appearance_order() {
        let site = numeric_column(&["b", "a", "b", "a"]);
        let groups = row_groups(&[&site], 4).unwrap();
        assert_eq!(groups[0].id, "b");
        assert_eq!(groups[0].rows, vec![0, 2]);
        assert_eq!(groups[1].id, "a");
        assert_eq!(groups[1].rows, vec![1, 3]);
    }

    #[test]
    fn test_row_groups_without_id_columns() {
        let groups = row_groups(&[], 3).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].id, "");
        assert_eq!(groups[0].rows, vec![0, 1, 2]);
    }

    #[test]
    fn test_row_groups_length_mismatch() {
        let site = numeric_column(&["a", "b"]);
        let result = row_groups(&[&site], 3);
        assert!(matches!(result, Err(TableStyleError::ColumnError(_))));
    }

    #[test]
    fn test_filter_excludes_extreme_group() {
        // Group means 40, 50, 60 and 0; only the zero group scores above 1.
        let column = numeric_column(&["40", "50", "60", "0"]);
        let groups = one_group_per_row(4);
        let range = z_score_filter(&column, &groups, 1.0, 0.3).unwrap();
        assert_eq!(
            range,
            Some(ValueRange {
                minimum: 40.0,
                maximum: 60.0
            })
        );
    }

    #[test]
    fn test_filter_snaps_small_moves_back() {
        // Same data, but the wider range_filter makes the filtered minimum
        // (a move of 40 out of a range of 60) snap back, and with both
        // bounds unchanged the filter reports nothing.
        let column = numeric_column(&["40", "50", "60", "0"]);
        let groups = one_group_per_row(4);
        let range = z_score_filter(&column, &groups, 1.0, 0.8).unwrap();
        assert_eq!(range, None);
    }

    #[test]
    fn test_filter_keeps_groups_as_wholes() {
        // The extreme group contributes every one of its values, including
        // ones inside the final range, and they all disappear together.
        let column = numeric_column(&["10", "12", "14", "13", "55", "11"]);
        let groups = vec![
            RowGroup {
                id: "a".into(),
                rows: vec![0, 1],
            },
            RowGroup {
                id: "b".into(),
                rows: vec![2, 3],
            },
            RowGroup {
                id: "c".into(),
                rows: vec![4, 5],
            },
        ];
        // Means: 11, 13.5, 33. Grand mean 19.17, deviation 9.8; only "c"
        // scores above 1.
        let range = z_score_filter(&column, &groups, 1.0, 0.2).unwrap();
        assert_eq!(
            range,
            Some(ValueRange {
                minimum: 10.0,
                maximum: 14.0
            })
        );
    }

    #[test]
    fn test_filter_zero_deviation_admits_all() {
        let column = numeric_column(&["5", "5", "5"]);
        let groups = one_group_per_row(3);
        assert_eq!(z_score_filter(&column, &groups, 0.1, 0.3).unwrap(), None);
    }

    #[test]
    fn test_filter_without_numbers() {
        let column = numeric_column(&["abc", "def"]);
        let groups = one_group_per_row(2);
        assert_eq!(z_score_filter(&column, &groups, 1.0, 0.3).unwrap(), None);
    }

    #[test]
    fn test_filter_without_groups() {
        let column = numeric_column(&["1", "2"]);
        assert_eq!(z_score_filter(&column, &[], 1.0, 0.3).unwrap(), None);
    }

    #[test]
    fn test_filter_out_of_bounds_row() {
        let column = numeric_column(&["1", "2"]);
        let groups = vec![RowGroup {
            id: "bad".into(),
            rows: vec![5],
        }];
        let result = z_score_filter(&column, &groups, 1.0, 0.3);
        assert!(matches!(result, Err(TableStyleError::RowGroupError(_))));
    }

    proptest! {
        #[test]
        fn test_huge_threshold_never_filters(
            values in prop::collection::vec(-1000.0f64..1000.0, 1..40)
        ) {
            let formatted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            let refs: Vec<&str> = formatted.iter().map(|v| v.as_str()).collect();
            let column = numeric_column(&refs);
            let groups = one_group_per_row(values.len());
            prop_assert_eq!(z_score_filter(&column, &groups, 1e9, 0.3).unwrap(), None);
        }

        #[test]
        fn test_filtered_range_stays_within_actual(
            values in prop::collection::vec(-1000.0f64..1000.0, 1..40),
            threshold in 0.1f64..3.0,
        ) {
            let formatted: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            let refs: Vec<&str> = formatted.iter().map(|v| v.as_str()).collect();
            let column = numeric_column(&refs);
            let groups = one_group_per_row(values.len());
            if let Some(range) = z_score_filter(&column, &groups, threshold, 0.3).unwrap() {
                let numbers = column.numbers();
                prop_assert!(range.minimum <= range.maximum);
                prop_assert!(range.minimum >= numbers.minimum.unwrap());
                prop_assert!(range.maximum <= numbers.maximum.unwrap());
            }
        }
    }
}
