use crate::core::{
    classifier::{classify, ClassifyError},
    notification::{compose, resolve_recipient, MessageContext, RecipientPolicy},
    observer::{CheckObserver, SkipReason, TracingObserver},
    overrides::OverrideTable,
    query::{QueryBuildError, SpatialQuery},
    scoring::{default_name_tags, score_candidates},
};
use crate::models::{Checkin, Outcome, Thresholds, User};
use crate::services::{MailError, Mailer, QueryError, SpatialQueryClient};
use std::sync::Arc;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Failures that end a check-in's pipeline with an error
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Invalid checkin: {0}")]
    InvalidCheckin(#[from] ValidationErrors),

    #[error("Could not build query: {0}")]
    QueryBuild(#[from] QueryBuildError),

    #[error("Spatial query failed: {0}")]
    Query(#[from] QueryError),

    #[error("Classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("Sending notification failed: {0}")]
    Mail(#[from] MailError),
}

/// What the pipeline did with one check-in
#[derive(Debug, Clone, PartialEq)]
pub enum CheckReport {
    Skipped(SkipReason),
    Classified { outcome: Outcome, notified: bool },
}

/// Tunables of the pipeline
#[derive(Debug, Clone)]
pub struct CheckerSettings {
    pub radius_meters: f64,
    pub timeout_secs: u32,
    pub name_tags: Vec<String>,
    pub thresholds: Thresholds,
    pub recipients: RecipientPolicy,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            radius_meters: 500.0,
            timeout_secs: 15,
            name_tags: default_name_tags(),
            thresholds: Thresholds::default(),
            recipients: RecipientPolicy {
                operator_email: String::new(),
                test_user_id: "1".to_string(),
            },
        }
    }
}

/// Checks one check-in at a time against the map.
///
/// # Pipeline Stages
/// 1. Validation and privacy check
/// 2. Recipient resolution
/// 3. Category override lookup and query construction
/// 4. Spatial query
/// 5. Scoring and classification
/// 6. Notification
///
/// A `Checker` holds no mutable state and can be shared across tasks.
#[derive(Clone)]
pub struct Checker {
    query_client: Arc<dyn SpatialQueryClient>,
    mailer: Arc<dyn Mailer>,
    observer: Arc<dyn CheckObserver>,
    overrides: OverrideTable,
    settings: CheckerSettings,
}

impl Checker {
    pub fn new(
        query_client: Arc<dyn SpatialQueryClient>,
        mailer: Arc<dyn Mailer>,
        settings: CheckerSettings,
    ) -> Self {
        Self {
            query_client,
            mailer,
            observer: Arc::new(TracingObserver),
            overrides: OverrideTable::builtin(),
            settings,
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn CheckObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_overrides(mut self, overrides: OverrideTable) -> Self {
        self.overrides = overrides;
        self
    }

    /// Build the spatial query for a check-in's venue
    pub fn build_query(&self, checkin: &Checkin) -> Result<String, QueryBuildError> {
        let venue = &checkin.venue;
        let rule = self
            .overrides
            .resolve(venue.primary_category().map(|c| c.id.as_str()));

        SpatialQuery {
            lat: venue.location.lat,
            lng: venue.location.lng,
            radius_meters: rule.radius_or(self.settings.radius_meters),
            tags: &self.settings.name_tags,
            extra_filter: rule.extra_filter.as_deref(),
            timeout_secs: self.settings.timeout_secs,
        }
        .build()
    }

    /// Run the full pipeline for one check-in
    pub async fn process(&self, checkin: &Checkin, user: &User) -> Result<CheckReport, CheckError> {
        checkin.validate()?;
        let checkin_id = checkin.id.as_str();

        if checkin.venue.is_private() {
            return Ok(self.skip(checkin_id, SkipReason::PrivateVenue));
        }

        let Some(recipient) = resolve_recipient(user, &self.settings.recipients) else {
            return Ok(self.skip(checkin_id, SkipReason::MissingContact));
        };

        let query = self.build_query(checkin)?;
        self.observer.query_built(checkin_id, &query);

        let candidates = match self.query_client.query(&query).await {
            Ok(candidates) => candidates,
            Err(e) if e.is_timeout() => return Ok(self.skip(checkin_id, SkipReason::QueryTimeout)),
            Err(e) => return Err(e.into()),
        };
        self.observer.candidates_fetched(checkin_id, candidates.len());

        let venue_name = checkin.venue.name.as_str();
        let scored = score_candidates(venue_name, candidates, &self.settings.name_tags);
        for unscored in scored.iter().filter(|s| s.score.is_none()) {
            self.observer.unscorable(checkin_id, &unscored.candidate);
        }

        let decision = classify(venue_name, scored, &self.settings.thresholds)?;
        self.observer.classified(checkin_id, &decision);

        let context = MessageContext::new(checkin, user);
        let notified = match compose(&decision.outcome, &context) {
            Some(notification) => {
                self.mailer.send(&recipient, &notification).await?;
                self.observer.notified(checkin_id, &recipient, &notification.subject);
                true
            }
            None => false,
        };

        Ok(CheckReport::Classified {
            outcome: decision.outcome,
            notified,
        })
    }

    fn skip(&self, checkin_id: &str, reason: SkipReason) -> CheckReport {
        self.observer.skipped(checkin_id, reason);
        CheckReport::Skipped(reason)
    }
}
