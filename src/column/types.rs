//! Column type classification

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// The nature of the data a column holds, which drives how it can be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Numeric values that vary continuously.
    Scalar,
    /// A small set of repeated values treated as categories.
    Enum,
    /// Identifiers of an external region classification.
    Region,
    /// Free-form text.
    Text,
    /// A longitude coordinate in degrees.
    Longitude,
    /// A latitude coordinate in degrees.
    Latitude,
    /// A vertical offset in meters.
    Height,
    /// A date or time, in any format the host application understands.
    Time,
    /// A street address to be geocoded by the host application.
    Address,
    /// Excluded from styling decisions.
    Hidden,
}

impl ColumnType {
    /// The type hinted by the column name alone, if any.
    pub fn from_name_hint(name: &str) -> Option<ColumnType> {
        name_hints()
            .iter()
            .find(|(hint, _)| hint.is_match(name))
            .map(|(_, column_type)| *column_type)
    }
}

fn name_hints() -> &'static [(Regex, ColumnType)] {
    static HINTS: OnceLock<Vec<(Regex, ColumnType)>> = OnceLock::new();
    HINTS.get_or_init(|| {
        [
            (r"^(lon|long|longitude|lng)$", ColumnType::Longitude),
            (r"^(lat|latitude)$", ColumnType::Latitude),
            (r"^(address|addr)$", ColumnType::Address),
            (
                r"^(.*[_ ])?(depth|height|elevation|altitude)$",
                ColumnType::Height,
            ),
            // Deliberately loose: matches "Start date (AEST)" as well as
            // "date", but not "updated".
            (r"^(.*[_ ])?(time|date)", ColumnType::Time),
            // "year" alone, so "Final year" and "0-4 years" stay untouched.
            (r"^(year)$", ColumnType::Time),
        ]
        .into_iter()
        .map(|(pattern, column_type)| {
            let hint =
                Regex::new(&format!("(?i){pattern}")).expect("column name hint must compile");
            (hint, column_type)
        })
        .collect()
    })
}
