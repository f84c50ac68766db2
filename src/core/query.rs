use crate::models::FeatureKind;
use thiserror::Error;

/// Errors raised while building a spatial query
#[derive(Debug, Error, PartialEq)]
pub enum QueryBuildError {
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("timeout must be at least one second")]
    InvalidTimeout,

    #[error("no name tags to probe")]
    NoTags,
}

/// Parameters of a proximity query around a check-in
#[derive(Debug, Clone)]
pub struct SpatialQuery<'a> {
    pub lat: f64,
    pub lng: f64,
    pub radius_meters: f64,
    pub tags: &'a [String],
    pub extra_filter: Option<&'a str>,
    pub timeout_secs: u32,
}

/// Round a coordinate to 6 decimal places.
///
/// Rounds the exact decimal value of `value`, half to even, so the result
/// matches queries issued before. Render it with `{:?}` to keep `10.0` and
/// `-0.0` intact.
pub fn round_coordinate(value: f64) -> f64 {
    format!("{:.6}", value).parse().unwrap_or(value)
}

impl SpatialQuery<'_> {
    /// Render the Overpass QL query.
    ///
    /// One `around` clause per (tag, kind) pair, tags in the given order and
    /// kinds ordered node, way, relation, all unioned into one result set.
    pub fn build(&self) -> Result<String, QueryBuildError> {
        if !(self.radius_meters.is_finite() && self.radius_meters > 0.0) {
            return Err(QueryBuildError::InvalidRadius(self.radius_meters));
        }
        if self.timeout_secs == 0 {
            return Err(QueryBuildError::InvalidTimeout);
        }
        if self.tags.is_empty() {
            return Err(QueryBuildError::NoTags);
        }

        let lat = round_coordinate(self.lat);
        let lng = round_coordinate(self.lng);
        let extra = self.extra_filter.unwrap_or("");

        let clauses: String = self
            .tags
            .iter()
            .flat_map(|tag| {
                FeatureKind::ALL.into_iter().map(move |kind| {
                    // `{:?}` keeps the trailing `.0` on whole numbers
                    format!(
                        "{}[\"{}\"]{}(around:{:?},{:?},{:?});",
                        kind, tag, extra, self.radius_meters, lat, lng
                    )
                })
            })
            .collect();

        Ok(format!(
            "[out:json][timeout:{}];({});out body;",
            self.timeout_secs, clauses
        ))
    }
}
