use crate::core::similarity::similarity;
use crate::models::{CandidateFeature, ScoredCandidate};
use std::collections::BTreeMap;

/// Tags probed for a feature's name, most authoritative first
pub const DEFAULT_NAME_TAGS: [&str; 6] = [
    "name",
    "alt_name",
    "loc_name",
    "official_name",
    "short_name",
    "ref",
];

pub fn default_name_tags() -> Vec<String> {
    DEFAULT_NAME_TAGS.iter().map(|t| t.to_string()).collect()
}

/// Return the value of the first tag in `priority` that is present and not blank.
///
/// Only one name is ever compared: a feature tagged with both `name` and
/// `ref` is judged on `name` alone.
pub fn select_name<'a>(tags: &'a BTreeMap<String, String>, priority: &[String]) -> Option<&'a str> {
    priority
        .iter()
        .filter_map(|key| tags.get(key))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Score one candidate against the venue name
pub fn score_candidate(venue_name: &str, candidate: CandidateFeature, priority: &[String]) -> ScoredCandidate {
    let name = select_name(&candidate.tags, priority).map(str::to_string);
    let score = name.as_deref().map(|n| similarity(venue_name, n));

    ScoredCandidate {
        candidate,
        name,
        score,
    }
}

/// Score every candidate, preserving input order
pub fn score_candidates(
    venue_name: &str,
    candidates: Vec<CandidateFeature>,
    priority: &[String],
) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|candidate| score_candidate(venue_name, candidate, priority))
        .collect()
}
