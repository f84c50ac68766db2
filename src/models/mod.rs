// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributePrompt, CandidateFeature, Category, Checkin, Contact, Decision, EnrichmentAttribute,
    FeatureKind, Location, Match, Notification, Outcome, ScoredCandidate, Thresholds, User, Venue,
};
pub use requests::CheckinPush;
pub use responses::{ErrorResponse, HealthResponse};
