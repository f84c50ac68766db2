// Unit tests for Checkin Checker

use checkin_checker::core::{
    classifier::{classify, filter_matches},
    scoring::{default_name_tags, score_candidates},
    similarity::similarity,
};
use checkin_checker::models::{CandidateFeature, FeatureKind, Match, Outcome, Thresholds};

fn named(id: i64, name: &str) -> CandidateFeature {
    CandidateFeature {
        kind: FeatureKind::Node,
        id,
        tags: [("name".to_string(), name.to_string())].into_iter().collect(),
    }
}

fn matches_for(venue_name: &str, candidates: Vec<CandidateFeature>) -> Vec<Match> {
    filter_matches(venue_name, candidates, &default_name_tags(), &Thresholds::default())
}

#[test]
fn test_match_filter_visulite() {
    let matches = matches_for(
        "Visulite Cinema - Downtown Staunton",
        vec![named(0, "Taste of India"), named(0, "Staunton"), named(1, "Visulite Cinema")],
    );

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate.id, 1);
}

#[test]
fn test_match_filter_airport() {
    let matches = matches_for(
        "Ronald Reagan Washington National Airport (DCA)",
        vec![
            named(0, "Dunkin' Donuts"),
            named(1, "Ronald Reagan Washington National Airport"),
            named(0, "Police"),
            named(0, "Faber News"),
        ],
    );

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate.id, 1);
}

#[test]
fn test_match_filter_apartment() {
    let matches = matches_for(
        "The Mason Williams",
        vec![
            named(0, "Berean Baptist Church"),
            named(0, "Church of Christ of Albina"),
            named(0, "Community Church of God"),
            named(1, "The Mason Williams"),
        ],
    );

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].candidate.id, 1);
}

#[test]
fn test_match_filter_neighborhood() {
    let matches = matches_for(
        "Tanjong Pagar",
        vec![
            named(0, "Tanjong Pagar Plaza"),
            named(0, "Tanjong Pagar Food Centre"),
            named(0, "Tanjong Pagar Plaza"),
            named(1, "Tanjong Pagar"),
        ],
    );

    assert_eq!(matches.len(), 4);
    assert_eq!(matches[0].candidate.id, 1);
    assert_eq!(matches[0].score, 100);
}

#[test]
fn test_match_filter_restaurant_no_match() {
    let matches = matches_for(
        "Has Döner Kebab",
        vec![
            named(0, "IJssalon"),
            named(0, "Pathé Schouwburgplein"),
            named(0, "Plaza"),
            named(0, "Indonesia Satebar"),
        ],
    );

    assert!(matches.is_empty());
}

#[test]
fn test_match_filter_waffle_shop() {
    let matches = matches_for(
        "Lincoln's Waffle Shop",
        vec![named(0, "Tariff Commission Building"), named(0, "Foo Bar")],
    );

    assert!(matches.is_empty());
}

#[test]
fn test_match_filter_front_street() {
    let matches = matches_for("Front Street", vec![named(0, "Brown Street"), named(0, "Front Avenue")]);

    assert!(matches.is_empty());
}

#[test]
fn test_matches_above_threshold_and_sorted() {
    let matches = matches_for(
        "Tanjong Pagar",
        vec![
            named(1, "Tanjong Pagar Food Centre"),
            named(2, "Tanjong Pagar Plaza"),
            named(3, "Orchard Road"),
            named(4, "Tanjong Pagar"),
        ],
    );

    assert!(matches.iter().all(|m| m.score > 60));
    for pair in matches.windows(2) {
        assert!(pair[0].score >= pair[1].score, "matches not sorted by score");
    }
    let ids: Vec<i64> = matches.iter().map(|m| m.candidate.id).collect();
    assert_eq!(ids, vec![4, 2, 1]);
}

#[test]
fn test_unicode_names_compare() {
    assert_eq!(similarity("Café Müller", "CAFÉ MÜLLER"), 100);
    assert_eq!(similarity("東京タワー", "東京タワー"), 100);
    assert_eq!(similarity("Has Döner Kebab", "Has Doner Kebab"), 93);
}

#[test]
fn test_nameless_candidates_are_not_found() {
    let candidates = vec![
        CandidateFeature {
            kind: FeatureKind::Way,
            id: 1,
            tags: [("building".to_string(), "yes".to_string())].into_iter().collect(),
        },
        CandidateFeature {
            kind: FeatureKind::Relation,
            id: 2,
            tags: Default::default(),
        },
    ];
    let scored = score_candidates("Visulite Cinema", candidates, &default_name_tags());
    let decision = classify("Visulite Cinema", scored, &Thresholds::default()).unwrap();

    assert_eq!(decision.outcome, Outcome::NotFound);
}

#[test]
fn test_confirmed_match_reflects_existing_tags() {
    let airport = CandidateFeature {
        kind: FeatureKind::Relation,
        id: 99,
        tags: [
            ("name", "Ronald Reagan Washington National Airport"),
            ("addr:housenumber", "2401"),
            ("addr:street", "Smith Boulevard"),
            ("phone", "+1 703 417 8000"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    };
    let scored = score_candidates(
        "Ronald Reagan Washington National Airport (DCA)",
        vec![named(1, "Police"), airport],
        &default_name_tags(),
    );
    let decision = classify("Ronald Reagan Washington National Airport (DCA)", scored, &Thresholds::default()).unwrap();

    match decision.outcome {
        Outcome::ConfirmedMatch { candidate, score, prompts } => {
            assert_eq!(candidate.id, 99);
            assert_eq!(score, 91);
            let text: Vec<String> = prompts.iter().map(|p| p.to_string()).collect();
            assert_eq!(
                text,
                vec![
                    "Is the housenumber still '2401'?",
                    "Is the venue still on 'Smith Boulevard'?",
                    "Is the phone number still '+1 703 417 8000'?",
                ]
            );
        }
        other => panic!("expected a confirmed match, got {:?}", other),
    }
}

#[test]
fn test_classifier_is_idempotent() {
    let candidates = vec![
        named(1, "Tanjong Pagar Plaza"),
        named(2, "Tanjong Pagar Plaza"),
        named(3, "Tanjong Pagar"),
    ];
    let run = || {
        let scored = score_candidates("Tanjong Pagar", candidates.clone(), &default_name_tags());
        classify("Tanjong Pagar", scored, &Thresholds::default()).unwrap()
    };

    assert_eq!(run(), run());
}
