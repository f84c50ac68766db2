use crate::core::scoring::score_candidates;
use crate::models::{
    AttributePrompt, CandidateFeature, Decision, EnrichmentAttribute, Match, Outcome,
    ScoredCandidate, Thresholds,
};
use thiserror::Error;

/// Precondition violations of the classifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("venue name is missing")]
    MissingVenueName,
}

/// Keep scored candidates above the match threshold, best first.
///
/// Unscored candidates are dropped. The sort is stable, so equal scores keep
/// their input order.
pub fn rank_matches(scored: Vec<ScoredCandidate>, thresholds: &Thresholds) -> Vec<Match> {
    let mut matches: Vec<Match> = scored
        .into_iter()
        .filter_map(|s| s.score.map(|score| Match { candidate: s.candidate, score }))
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.retain(|m| m.score > thresholds.match_score);

    matches
}

/// Prompts for the enrichment attributes, in fixed order
pub fn attribute_prompts(candidate: &CandidateFeature) -> Vec<AttributePrompt> {
    EnrichmentAttribute::ALL
        .iter()
        .map(|attribute| AttributePrompt {
            attribute: *attribute,
            current: candidate.tag(attribute.tag()).map(str::to_string),
        })
        .collect()
}

/// Classify scored candidates for a venue
///
/// # Errors
/// [`ClassifyError::MissingVenueName`] when `venue_name` is blank.
pub fn classify(
    venue_name: &str,
    scored: Vec<ScoredCandidate>,
    thresholds: &Thresholds,
) -> Result<Decision, ClassifyError> {
    if venue_name.trim().is_empty() {
        return Err(ClassifyError::MissingVenueName);
    }

    let matches = rank_matches(scored, thresholds);

    let outcome = match matches.first() {
        None => Outcome::NotFound,
        Some(best) if best.score > thresholds.confirm_score => Outcome::ConfirmedMatch {
            candidate: best.candidate.clone(),
            score: best.score,
            prompts: attribute_prompts(&best.candidate),
        },
        Some(best) => Outcome::ProbableMatch {
            candidate: best.candidate.clone(),
            score: best.score,
        },
    };

    Ok(Decision { matches, outcome })
}

/// Score and rank raw candidates against a venue name
pub fn filter_matches(
    venue_name: &str,
    candidates: Vec<CandidateFeature>,
    priority: &[String],
    thresholds: &Thresholds,
) -> Vec<Match> {
    rank_matches(score_candidates(venue_name, candidates, priority), thresholds)
}
