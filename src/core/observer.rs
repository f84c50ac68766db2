use crate::models::{CandidateFeature, Decision, Outcome};
use std::fmt;

/// Why a check-in was dropped without a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    PrivateVenue,
    MissingContact,
    QueryTimeout,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::PrivateVenue => "private venue",
            SkipReason::MissingContact => "no contact email",
            SkipReason::QueryTimeout => "spatial query timed out",
        })
    }
}

/// Receives the events of one pipeline run.
///
/// The checker never logs directly; everything goes through this trait so
/// tests can record what happened.
pub trait CheckObserver: Send + Sync {
    fn skipped(&self, checkin_id: &str, reason: SkipReason);
    fn query_built(&self, checkin_id: &str, query: &str);
    fn candidates_fetched(&self, checkin_id: &str, count: usize);
    fn unscorable(&self, checkin_id: &str, candidate: &CandidateFeature);
    fn classified(&self, checkin_id: &str, decision: &Decision);
    fn notified(&self, checkin_id: &str, recipient: &str, subject: &str);
}

/// Observer emitting `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CheckObserver for TracingObserver {
    fn skipped(&self, checkin_id: &str, reason: SkipReason) {
        match reason {
            SkipReason::MissingContact => {
                tracing::warn!(checkin_id, "Skipping checkin: {}", reason)
            }
            _ => tracing::info!(checkin_id, "Skipping checkin: {}", reason),
        }
    }

    fn query_built(&self, checkin_id: &str, query: &str) {
        tracing::info!(checkin_id, "Querying Overpass with: {}", query);
    }

    fn candidates_fetched(&self, checkin_id: &str, count: usize) {
        tracing::info!(checkin_id, "Found {} things on Overpass", count);
    }

    fn unscorable(&self, checkin_id: &str, candidate: &CandidateFeature) {
        tracing::warn!(checkin_id, "OSM object {} matched but no name tags matched", candidate);
    }

    fn classified(&self, checkin_id: &str, decision: &Decision) {
        if !decision.matches.is_empty() {
            let summary = decision
                .matches
                .iter()
                .map(|m| format!("{} ({})", m.candidate, m.score))
                .collect::<Vec<_>>()
                .join(", ");
            tracing::info!(checkin_id, "Matches: {}", summary);
        }

        match &decision.outcome {
            Outcome::NotFound => tracing::info!(checkin_id, "No matches"),
            Outcome::ProbableMatch { candidate, score } => {
                tracing::info!(checkin_id, "Probable match {} ({}), not notifying", candidate, score)
            }
            Outcome::ConfirmedMatch { candidate, score, .. } => {
                tracing::info!(checkin_id, "A really great match found: {} ({})", candidate, score)
            }
        }
    }

    fn notified(&self, checkin_id: &str, recipient: &str, subject: &str) {
        tracing::info!(checkin_id, "Sent email '{}' to {}", subject, recipient);
    }
}
