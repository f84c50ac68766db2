use std::collections::HashMap;

/// Query adjustments for a venue category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideRule {
    /// Extra Overpass filter appended to every clause, e.g. `["place"]`
    pub extra_filter: Option<String>,
    /// Search radius in meters replacing the configured default
    pub radius_meters: Option<f64>,
}

impl OverrideRule {
    pub fn new(extra_filter: Option<&str>, radius_meters: Option<f64>) -> Self {
        Self {
            extra_filter: extra_filter.map(str::to_string),
            radius_meters,
        }
    }

    /// Radius to query with, falling back to `default_radius`
    #[inline]
    pub fn radius_or(&self, default_radius: f64) -> f64 {
        self.radius_meters.unwrap_or(default_radius)
    }
}

/// Built-in rules keyed by Foursquare category id
const BUILTIN_RULES: &[(&str, Option<&str>, Option<f64>)] = &[
    // Airport
    ("4bf58dd8d48988d1ed931735", Some(r#"["aeroway"="aerodrome"]"#), Some(3000.0)),
    // Neighborhood
    ("4f2a25ac4b909258e854f55f", Some(r#"["place"]"#), Some(1000.0)),
    // City
    ("50aa9e094b90af0d42d5de0d", Some(r#"["place"]"#), Some(5000.0)),
    // Park
    ("4bf58dd8d48988d163941735", Some(r#"["leisure"]"#), Some(1000.0)),
    // College & University
    ("4d4b7105d754a06372d81259", None, Some(1500.0)),
];

/// Static dispatch table from category id to [`OverrideRule`]
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    rules: HashMap<String, OverrideRule>,
}

impl OverrideTable {
    /// An empty table; every lookup yields the default rule
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table shipped with the service
    pub fn builtin() -> Self {
        BUILTIN_RULES
            .iter()
            .fold(Self::empty(), |table, (id, filter, radius)| {
                table.with_rule(id, OverrideRule::new(*filter, *radius))
            })
    }

    pub fn with_rule(mut self, category_id: &str, rule: OverrideRule) -> Self {
        self.rules.insert(category_id.to_string(), rule);
        self
    }

    /// Look up the rule for a primary category id; unknown or absent ids get the default rule
    pub fn resolve(&self, category_id: Option<&str>) -> OverrideRule {
        category_id
            .and_then(|id| self.rules.get(id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
