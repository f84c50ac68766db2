//! Fuzzy name similarity.
//!
//! Names are compared as bags of words: case, punctuation and word order are
//! ignored, extra words on either side lower the score proportionally, and
//! misspelled words still earn partial credit.
//!
//! The proportional penalty also hits short names inside long ones:
//! "Starbucks" against "Starbucks Coffee Company" scores 50, below the match
//! threshold. Scoring only the shorter side would instead rate a lone
//! "Staunton" a perfect match for "Visulite Cinema - Downtown Staunton".

/// Minimum per-word similarity for two different words to be paired
const WORD_PAIR_THRESHOLD: f64 = 0.8;

/// Split a name into lowercase word tokens.
///
/// Apostrophes are dropped so `Lincoln's` becomes `lincolns`; any other
/// character that is not alphanumeric separates words.
pub fn tokenize(name: &str) -> Vec<String> {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Similarity of two names as an integer in `[0, 100]`; 100 means the same words.
pub fn similarity(a: &str, b: &str) -> u8 {
    let left = tokenize(a);
    let right = tokenize(b);
    let total = left.len() + right.len();
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let credit = pair_tokens(&left, &right);
    let score = (200.0 * credit / total as f64).round();

    score.clamp(0.0, 100.0) as u8
}

/// Pair tokens one-to-one and return the summed pair similarity.
///
/// Identical tokens are paired first; remaining tokens on the left are then
/// paired with the most similar unused token on the right, ties going to the
/// earlier token.
fn pair_tokens(left: &[String], right: &[String]) -> f64 {
    let mut left_used = vec![false; left.len()];
    let mut right_used = vec![false; right.len()];
    let mut credit = 0.0;

    for (i, token) in left.iter().enumerate() {
        if let Some(j) = (0..right.len()).find(|&j| !right_used[j] && right[j] == *token) {
            left_used[i] = true;
            right_used[j] = true;
            credit += 1.0;
        }
    }

    for (i, token) in left.iter().enumerate() {
        if left_used[i] {
            continue;
        }

        let mut best: Option<(usize, f64)> = None;
        for (j, other) in right.iter().enumerate() {
            if right_used[j] {
                continue;
            }
            let sim = strsim::normalized_levenshtein(token, other);
            if sim >= WORD_PAIR_THRESHOLD && best.map_or(true, |(_, b)| sim > b) {
                best = Some((j, sim));
            }
        }

        if let Some((j, sim)) = best {
            right_used[j] = true;
            credit += sim;
        }
    }

    credit
}
