//! Edit-distance auto-correction.

use crate::config::CorrectionConfig;
use crate::dictionary::Dictionary;

/// Levenshtein distance: unit-cost insert/delete/substitute over chars,
/// computed with the full (m+1)×(n+1) table. No transposition.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }
    dp[a.len()][b.len()]
}

/// Closest dictionary word to `typo`, or `None` when the typo is too short,
/// nothing qualifies, or the best distance is 0 (already a dictionary word).
///
/// A candidate qualifies when its distance is within `max_distance` and its
/// length differs by at most `max_length_delta` chars. Ties break
/// deterministically: smaller distance, then shorter word, then
/// lexicographically smaller lowercase form.
pub fn best_match(dict: &Dictionary, typo: &str, config: &CorrectionConfig) -> Option<String> {
    let target = typo.trim().to_lowercase();
    if target.chars().count() < config.min_typo_len {
        return None;
    }

    let target_len = target.chars().count();
    let mut best: Option<(usize, usize, &str, &str)> = None;

    for (lower, word) in dict.iter() {
        let candidate_len = lower.chars().count();
        if candidate_len.abs_diff(target_len) > config.max_length_delta {
            continue;
        }
        let distance = levenshtein(&target, lower);
        if distance > config.max_distance {
            continue;
        }
        let key = (distance, candidate_len, lower);
        let better = match best {
            None => true,
            Some((d, l, k, _)) => key < (d, l, k),
        };
        if better {
            best = Some((distance, candidate_len, lower, word));
        }
    }

    match best {
        Some((0, ..)) => None,
        Some((.., word)) => Some(word.to_string()),
        None => None,
    }
}
