//! "Did you mean" suggestions for failed attribute lookups

use rustc_hash::FxHashSet;

/// Pick the candidate that most resembles `query`, if any resembles it enough
pub fn closest_match<'a>(query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let query_chars: FxHashSet<char> = query.chars().collect();
    // At least half of the distinct characters must be shared
    let threshold = query_chars.len();

    candidates
        .into_iter()
        .map(|candidate| (similarity_score(query, &query_chars, candidate), candidate))
        .filter(|(score, _)| *score >= threshold && *score > 0)
        .max_by_key(|(score, _)| *score)
        .map(|(_, candidate)| candidate.to_string())
}

fn similarity_score(query: &str, query_chars: &FxHashSet<char>, candidate: &str) -> usize {
    let query_lower = query.to_lowercase();
    let candidate_lower = candidate.to_lowercase();
    let mut score = 0;

    if candidate_lower.starts_with(&query_lower) {
        score += 100;
    } else if candidate_lower.contains(&query_lower) {
        score += 50;
    } else if query_lower.contains(&candidate_lower) {
        score += 30;
    }

    let candidate_chars: FxHashSet<char> = candidate.chars().collect();
    score += query_chars.intersection(&candidate_chars).count() * 2;

    let len_diff = query.len().abs_diff(candidate.len());
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}
