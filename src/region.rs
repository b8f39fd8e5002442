/*!
Region resolution seam

Some table columns hold region identifiers (postcodes, statistical areas,
administrative boundaries) rather than plain values. Recognizing them
requires an external gazetteer, which this library deliberately does not
ship: callers supply a [`RegionResolver`] and the column model records the
outcome per row.
*/

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// RegionResolver
// =============================================================================

/// Identifier of an external region classification, e.g. a postcode or
/// local-government-area boundary set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionType(String);

impl RegionType {
    pub fn new(id: impl Into<String>) -> RegionType {
        RegionType(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Resolves column names and raw cell values against a region gazetteer.
pub trait RegionResolver {
    /// The region classification matching this column name or one of its
    /// aliases, if any.
    fn resolve_region_type(&self, column_name: &str) -> Option<RegionType>;

    /// The canonical region id for a raw cell value, if it names a region of
    /// the given classification.
    fn match_region_id(&self, region_type: &RegionType, raw_value: &str) -> Option<String>;
}

/// A resolver with no region knowledge; every column is region-free.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRegions;

impl RegionResolver for NoRegions {
    fn resolve_region_type(&self, _column_name: &str) -> Option<RegionType> {
        None
    }

    fn match_region_id(&self, _region_type: &RegionType, _raw_value: &str) -> Option<String> {
        None
    }
}

/// A resolver backed by a fixed mapping from column names to region types.
///
/// Matches any non-empty value by lowercasing it, mirroring classifications
/// whose ids are case-insensitive codes.
#[derive(Debug, Clone, Default)]
pub struct StaticRegionResolver {
    columns: HashMap<String, RegionType>,
}

impl StaticRegionResolver {
    pub fn new() -> StaticRegionResolver {
        StaticRegionResolver::default()
    }

    /// Registers a column name (case-insensitive) as holding ids of the
    /// given region type.
    pub fn with_column(
        mut self,
        column_name: impl AsRef<str>,
        region_type: impl Into<String>,
    ) -> StaticRegionResolver {
        self.columns.insert(
            column_name.as_ref().to_lowercase(),
            RegionType::new(region_type),
        );
        self
    }
}

impl RegionResolver for StaticRegionResolver {
    fn resolve_region_type(&self, column_name: &str) -> Option<RegionType> {
        self.columns.get(&column_name.to_lowercase()).cloned()
    }

    fn match_region_id(&self, _region_type: &RegionType, raw_value: &str) -> Option<String> {
        if raw_value.is_empty() {
            return None;
        }
        Some(raw_value.to_lowercase())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_regions_resolves_nothing() {
        assert_eq!(NoRegions.resolve_region_type("postcode"), None);
    }

    #[test]
    fn test_static_resolver_matches_column_name() {
        let resolver = StaticRegionResolver::new().with_column("Postcode", "POA");
        assert_eq!(
            resolver.resolve_region_type("postcode"),
            Some(RegionType::new("POA"))
        );
        assert_eq!(resolver.resolve_region_type("income"), None);
    }

    #[test]
    fn test_static_resolver_matches_values() {
        let resolver = StaticRegionResolver::new().with_column("state", "STE");
        let region_type = resolver.resolve_region_type("state").unwrap();
        assert_eq!(
            resolver.match_region_id(&region_type, "NSW"),
            Some("nsw".to_string())
        );
        assert_eq!(resolver.match_region_id(&region_type, ""), None);
    }
}
