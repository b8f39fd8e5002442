/*!
Merging per-channel legends

A style that binds its color, point, and outline channels to the same
column produces one legend per channel, all describing the same rows.
[`merge_legends`] folds them into a single legend whose items carry every
channel's swatch fields, so the UI renders one combined entry per bin or
category instead of three side-by-side lists.
*/

use super::{Legend, LegendItem, LegendKind};

/// Merges per-channel legends describing the same encoding into one.
///
/// Legends merge only when every non-constant legend has the same kind
/// (all bin or all enum) and names the same column; continuous legends
/// never merge. Returns `None` when the inputs are not mergeable (or
/// empty), in which case the caller shows them separately.
///
/// Items are matched by title. A later legend's set fields overwrite the
/// matched item's, but an unset field never clears one: a color item's
/// fill and an outline item's stroke end up side by side on the same
/// swatch. Untitled items never match and are appended in order. New
/// items are seeded from `overrides`, like the synthesizers do.
pub fn merge_legends(legends: &[Legend], overrides: &LegendItem) -> Option<Legend> {
    if legends.is_empty() || !mergeable(legends) {
        return None;
    }

    let mut items: Vec<LegendItem> = Vec::new();
    for legend in legends {
        for item in &legend.items {
            let matched = item.title.as_deref().and_then(|title| {
                items
                    .iter()
                    .position(|existing| existing.title.as_deref() == Some(title))
            });
            match matched {
                Some(index) => merge_item(&mut items[index], item),
                None => {
                    let mut merged = overrides.clone();
                    merge_item(&mut merged, item);
                    items.push(merged);
                }
            }
        }
    }

    Some(Legend {
        title: legends.iter().find_map(|legend| legend.title.clone()),
        kind: legends
            .iter()
            .map(|legend| legend.kind)
            .find(|kind| *kind != LegendKind::Constant)
            .unwrap_or(LegendKind::Constant),
        column: legends.iter().find_map(|legend| legend.column.clone()),
        items,
    })
}

/// Constant legends are always compatible; the rest must agree on a
/// bin or enum kind and on the column, though legends without a column
/// ride along with one that has it.
fn mergeable(legends: &[Legend]) -> bool {
    let mut kind: Option<LegendKind> = None;
    let mut column: Option<&str> = None;
    for legend in legends {
        if legend.kind == LegendKind::Constant {
            continue;
        }
        if !matches!(legend.kind, LegendKind::Bin | LegendKind::Enum) {
            return false;
        }
        if *kind.get_or_insert(legend.kind) != legend.kind {
            return false;
        }
        if let Some(name) = legend.column.as_deref() {
            if *column.get_or_insert(name) != name {
                return false;
            }
        }
    }
    true
}

fn merge_item(into: &mut LegendItem, from: &LegendItem) {
    if let Some(title) = &from.title {
        into.title = Some(title.clone());
    }
    if let Some(titles) = &from.multiple_titles {
        into.multiple_titles = Some(titles.clone());
    }
    if let Some(color) = from.color {
        into.color = Some(color);
    }
    if let Some(color) = from.outline_color {
        into.outline_color = Some(color);
    }
    if let Some(width) = from.outline_width {
        into.outline_width = Some(width);
    }
    if let Some(marker) = &from.marker {
        into.marker = Some(marker.clone());
    }
    if let Some(rotation) = from.rotation {
        into.rotation = Some(rotation);
    }
    into.add_spacing_above |= from.add_spacing_above;
    into.outlier_marker |= from.outlier_marker;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn legend(kind: LegendKind, column: Option<&str>, items: Vec<LegendItem>) -> Legend {
        Legend {
            title: column.map(str::to_string),
            kind,
            column: column.map(str::to_string),
            items,
        }
    }

    fn color_item(title: &str, color: Color) -> LegendItem {
        LegendItem {
            title: Some(title.to_string()),
            color: Some(color),
            ..LegendItem::default()
        }
    }

    fn outline_item(title: &str, color: Color, width: f64) -> LegendItem {
        LegendItem {
            title: Some(title.to_string()),
            outline_color: Some(color),
            outline_width: Some(width),
            ..LegendItem::default()
        }
    }

    #[test]
    fn test_merges_color_and_outline_bins_into_one_legend() {
        let fill = legend(
            LegendKind::Bin,
            Some("income"),
            vec![
                color_item("50,000 to 100,000", Color::rgb(8, 48, 107)),
                color_item("0 to 50,000", Color::rgb(198, 219, 239)),
            ],
        );
        let outline = legend(
            LegendKind::Bin,
            Some("income"),
            vec![
                outline_item("50,000 to 100,000", Color::rgb(0, 0, 0), 2.0),
                outline_item("0 to 50,000", Color::rgb(0, 0, 0), 1.0),
            ],
        );

        let merged = merge_legends(&[fill, outline], &LegendItem::default()).unwrap();

        assert_eq!(merged.kind, LegendKind::Bin);
        assert_eq!(merged.title.as_deref(), Some("income"));
        assert_eq!(merged.column.as_deref(), Some("income"));
        // One combined legend, each item carrying fill and stroke.
        assert_eq!(merged.items.len(), 2);
        assert_eq!(merged.items[0].title.as_deref(), Some("50,000 to 100,000"));
        assert_eq!(merged.items[0].color, Some(Color::rgb(8, 48, 107)));
        assert_eq!(merged.items[0].outline_color, Some(Color::rgb(0, 0, 0)));
        assert_eq!(merged.items[0].outline_width, Some(2.0));
        assert_eq!(merged.items[1].outline_width, Some(1.0));
    }

    #[test]
    fn test_merging_a_legend_with_itself_changes_nothing() {
        let legend = legend(
            LegendKind::Bin,
            Some("depth"),
            vec![
                color_item("5 to 10", Color::rgb(255, 0, 0)),
                color_item("0 to 5", Color::rgb(0, 0, 255)),
            ],
        );

        let merged =
            merge_legends(&[legend.clone(), legend.clone()], &LegendItem::default()).unwrap();

        assert_eq!(merged.items.len(), legend.items.len());
        for (merged, original) in merged.items.iter().zip(&legend.items) {
            assert_eq!(merged.title, original.title);
            assert_eq!(merged.color, original.color);
        }
    }

    #[test]
    fn test_set_fields_overwrite_and_unset_fields_preserve() {
        let first = legend(
            LegendKind::Enum,
            Some("kind"),
            vec![color_item("hospital", Color::rgb(255, 0, 0))],
        );
        let second = legend(
            LegendKind::Enum,
            Some("kind"),
            vec![
                // Same title: new color wins, marker fills a gap.
                LegendItem {
                    title: Some("hospital".to_string()),
                    color: Some(Color::rgb(0, 255, 0)),
                    marker: Some("cross".to_string()),
                    ..LegendItem::default()
                },
            ],
        );

        let merged = merge_legends(&[first, second], &LegendItem::default()).unwrap();

        assert_eq!(merged.items.len(), 1);
        assert_eq!(merged.items[0].color, Some(Color::rgb(0, 255, 0)));
        assert_eq!(merged.items[0].marker.as_deref(), Some("cross"));
    }

    #[test]
    fn test_mixed_kinds_do_not_merge() {
        let bin = legend(LegendKind::Bin, Some("depth"), vec![]);
        let categories = legend(LegendKind::Enum, Some("depth"), vec![]);
        assert_eq!(merge_legends(&[bin, categories], &LegendItem::default()), None);
    }

    #[test]
    fn test_different_columns_do_not_merge() {
        let depth = legend(LegendKind::Bin, Some("depth"), vec![]);
        let speed = legend(LegendKind::Bin, Some("speed"), vec![]);
        assert_eq!(merge_legends(&[depth, speed], &LegendItem::default()), None);
    }

    #[test]
    fn test_continuous_legends_do_not_merge() {
        let continuous = legend(LegendKind::Continuous, Some("depth"), vec![]);
        let bin = legend(LegendKind::Bin, Some("depth"), vec![]);
        assert_eq!(
            merge_legends(&[continuous, bin], &LegendItem::default()),
            None
        );
    }

    #[test]
    fn test_empty_input_does_not_merge() {
        assert_eq!(merge_legends(&[], &LegendItem::default()), None);
    }

    #[test]
    fn test_columnless_legend_rides_along() {
        let named = legend(
            LegendKind::Bin,
            Some("depth"),
            vec![color_item("0 to 5", Color::rgb(255, 0, 0))],
        );
        let unnamed = legend(
            LegendKind::Bin,
            None,
            vec![outline_item("0 to 5", Color::rgb(0, 0, 0), 1.0)],
        );

        let merged = merge_legends(&[named, unnamed], &LegendItem::default()).unwrap();

        assert_eq!(merged.column.as_deref(), Some("depth"));
        assert_eq!(merged.items.len(), 1);
        assert_eq!(merged.items[0].outline_width, Some(1.0));
    }

    #[test]
    fn test_constant_legend_appends_untitled_item() {
        let bin = legend(
            LegendKind::Bin,
            Some("depth"),
            vec![color_item("0 to 5", Color::rgb(255, 0, 0))],
        );
        let constant = legend(
            LegendKind::Constant,
            None,
            vec![LegendItem {
                marker: Some("star".to_string()),
                ..LegendItem::default()
            }],
        );

        let merged = merge_legends(&[bin, constant], &LegendItem::default()).unwrap();

        assert_eq!(merged.kind, LegendKind::Bin);
        assert_eq!(merged.items.len(), 2);
        assert_eq!(merged.items[1].title, None);
        assert_eq!(merged.items[1].marker.as_deref(), Some("star"));
    }

    #[test]
    fn test_all_constant_legends_merge_as_constant() {
        let first = legend(
            LegendKind::Constant,
            None,
            vec![LegendItem {
                color: Some(Color::rgb(255, 0, 0)),
                ..LegendItem::default()
            }],
        );
        let merged = merge_legends(&[first], &LegendItem::default()).unwrap();
        assert_eq!(merged.kind, LegendKind::Constant);
        assert_eq!(merged.items.len(), 1);
    }

    #[test]
    fn test_overrides_seed_new_items() {
        let bin = legend(
            LegendKind::Bin,
            Some("depth"),
            vec![color_item("0 to 5", Color::rgb(255, 0, 0))],
        );
        let overrides = LegendItem {
            marker: Some("circle".to_string()),
            ..LegendItem::default()
        };

        let merged = merge_legends(&[bin], &overrides).unwrap();

        assert_eq!(merged.items[0].marker.as_deref(), Some("circle"));
        assert_eq!(merged.items[0].color, Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn test_spacing_and_outlier_flags_survive() {
        let with_flags = legend(
            LegendKind::Bin,
            Some("depth"),
            vec![LegendItem {
                title: Some("Outlier values".to_string()),
                add_spacing_above: true,
                outlier_marker: true,
                ..LegendItem::default()
            }],
        );
        let without_flags = legend(
            LegendKind::Bin,
            Some("depth"),
            vec![LegendItem {
                title: Some("Outlier values".to_string()),
                outline_width: Some(1.0),
                ..LegendItem::default()
            }],
        );

        let merged = merge_legends(&[with_flags, without_flags], &LegendItem::default()).unwrap();

        assert_eq!(merged.items.len(), 1);
        assert!(merged.items[0].add_spacing_above);
        assert!(merged.items[0].outlier_marker);
        assert_eq!(merged.items[0].outline_width, Some(1.0));
    }
}
