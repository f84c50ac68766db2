use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use validator::Validate;

/// Suffix Foursquare appends to the names of private venue categories
pub const PRIVATE_CATEGORY_MARKER: &str = "(private)";

/// A Foursquare check-in as delivered by the push webhook
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Checkin {
    pub id: String,
    #[serde(rename = "createdAt", default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[validate(nested)]
    pub venue: Venue,
}

/// Venue the user checked in at
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Venue {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(nested)]
    pub location: Location,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Venue {
    /// True when any category is marked private; such check-ins are never processed
    pub fn is_private(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c.name.ends_with(PRIVATE_CATEGORY_MARKER))
    }

    /// The first category flagged as primary, if any
    pub fn primary_category(&self) -> Option<&Category> {
        self.categories.iter().find(|c| c.primary)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct Location {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub primary: bool,
}

/// The Foursquare user who made the check-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub contact: Contact,
}

impl User {
    /// Contact email, ignoring blank values
    pub fn email(&self) -> Option<&str> {
        self.contact
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub email: Option<String>,
}

/// OSM element kind: a point (node), a way, or an area/relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Node,
    Way,
    Relation,
}

impl FeatureKind {
    /// All kinds, in the order queries enumerate them
    pub const ALL: [FeatureKind; 3] = [FeatureKind::Node, FeatureKind::Way, FeatureKind::Relation];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Node => "node",
            FeatureKind::Way => "way",
            FeatureKind::Relation => "relation",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A map feature returned by the spatial query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFeature {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub id: i64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl CandidateFeature {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }
}

impl fmt::Display for CandidateFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Candidate paired with the name it was compared on and its similarity score.
///
/// `name` and `score` are both `None` when the feature carries none of the
/// probed name tags.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: CandidateFeature,
    pub name: Option<String>,
    pub score: Option<u8>,
}

/// A candidate retained by the classifier
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub candidate: CandidateFeature,
    pub score: u8,
}

/// Attribute a user can collect while visiting a matched venue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichmentAttribute {
    HouseNumber,
    Street,
    Phone,
}

impl EnrichmentAttribute {
    /// Prompt order is fixed
    pub const ALL: [EnrichmentAttribute; 3] = [
        EnrichmentAttribute::HouseNumber,
        EnrichmentAttribute::Street,
        EnrichmentAttribute::Phone,
    ];

    /// OSM tag holding this attribute
    pub fn tag(&self) -> &'static str {
        match self {
            EnrichmentAttribute::HouseNumber => "addr:housenumber",
            EnrichmentAttribute::Street => "addr:street",
            EnrichmentAttribute::Phone => "phone",
        }
    }
}

/// A question for the user about one enrichment attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePrompt {
    pub attribute: EnrichmentAttribute,
    /// Value already present on the matched feature
    pub current: Option<String>,
}

impl fmt::Display for AttributePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.attribute, &self.current) {
            (EnrichmentAttribute::HouseNumber, None) => f.write_str("What is the housenumber?"),
            (EnrichmentAttribute::HouseNumber, Some(v)) => {
                write!(f, "Is the housenumber still '{}'?", v)
            }
            (EnrichmentAttribute::Street, None) => f.write_str("What is the street name?"),
            (EnrichmentAttribute::Street, Some(v)) => write!(f, "Is the venue still on '{}'?", v),
            (EnrichmentAttribute::Phone, None) => f.write_str("What is the phone number?"),
            (EnrichmentAttribute::Phone, Some(v)) => {
                write!(f, "Is the phone number still '{}'?", v)
            }
        }
    }
}

/// Classification of a check-in against the map
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NotFound,
    ProbableMatch {
        candidate: CandidateFeature,
        score: u8,
    },
    ConfirmedMatch {
        candidate: CandidateFeature,
        score: u8,
        prompts: Vec<AttributePrompt>,
    },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::NotFound => "not_found",
            Outcome::ProbableMatch { .. } => "probable_match",
            Outcome::ConfirmedMatch { .. } => "confirmed_match",
        }
    }
}

/// Ranked matches together with the resulting outcome
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub matches: Vec<Match>,
    pub outcome: Outcome,
}

/// Score thresholds used by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Scores at or below this are discarded
    pub match_score: u8,
    /// Best scores above this confirm the match
    pub confirm_score: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            match_score: 60,
            confirm_score: 80,
        }
    }
}

/// Rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}
