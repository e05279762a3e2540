//! Spell-suggestion for unrecognized keywords and clause names (C3).
//!
//! Grounded on Python's `difflib.get_close_matches`: a contiguous
//! matching-subsequence ratio (`SequenceMatcher.ratio`) against a fixed
//! candidate vocabulary, with a 0.6 cutoff and ties broken by shortest
//! candidate, then lexicographically.

use crate::sql::keyword::{ALL_KEYWORDS, Keyword};

/// The minimum ratio for a candidate to be considered a match, mirroring
/// `difflib.get_close_matches`'s default `cutoff=0.6`.
const CUTOFF: f64 = 0.6;

/// Suggest the closest keyword to `word` (case-insensitive), or `None` if
/// nothing clears the cutoff.
pub fn suggest_keyword(word: &str) -> Option<Keyword> {
    best_match(word, ALL_KEYWORDS.iter().map(|k| (k.as_str().to_string(), *k)))
}

/// Suggest the closest candidate string from an arbitrary vocabulary (e.g.
/// known aliases, column names reported by an outer scope) — used for
/// alias/column-name typo suggestions rather than keyword typos.
pub fn suggest_word<'a>(
    word: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    best_match(
        word,
        candidates.into_iter().map(|c| (c.to_string(), c.to_string())),
    )
}

/// Pick the best-scoring `(display_text, value)` pair against `word`, using
/// `display_text` both for scoring and for the shortest/lexicographic
/// tie-break.
fn best_match<T>(word: &str, candidates: impl Iterator<Item = (String, T)>) -> Option<T> {
    let needle = word.to_ascii_lowercase();
    let mut best: Option<(f64, usize, String, T)> = None;

    for (candidate_text, value) in candidates {
        let ratio = similarity_ratio(&needle, &candidate_text.to_ascii_lowercase());
        if ratio < CUTOFF {
            continue;
        }
        let len = candidate_text.len();
        let replace = match &best {
            None => true,
            Some((best_ratio, best_len, best_text, _)) => {
                ratio > *best_ratio
                    || (ratio == *best_ratio && len < *best_len)
                    || (ratio == *best_ratio && len == *best_len && candidate_text < *best_text)
            }
        };
        if replace {
            best = Some((ratio, len, candidate_text, value));
        }
    }

    best.map(|(_, _, _, v)| v)
}

/// `SequenceMatcher.ratio()`: `2 * M / T` where `M` is the total length of
/// matching (not necessarily contiguous) blocks found greedily by repeatedly
/// picking the longest common contiguous substring, and `T` is the combined
/// length of both strings.
fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let matches = matching_blocks_length(&a, &b);
    (2.0 * matches as f64) / (a.len() + b.len()) as f64
}

/// Greedily find the longest common contiguous substring, recurse on the
/// left and right remainders, and sum the matched lengths. This is the same
/// divide-and-conquer `get_matching_blocks` approach `difflib` uses.
fn matching_blocks_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (mut best_len, mut best_a, mut best_b) = (0usize, 0usize, 0usize);
    // dp[j] = length of the common substring ending at a[i-1], b[j-1]
    let mut dp = vec![0usize; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        let mut prev_row = vec![0usize; b.len() + 1];
        std::mem::swap(&mut dp, &mut prev_row);
        for (j, &cb) in b.iter().enumerate() {
            if ca == cb {
                dp[j + 1] = prev_row[j] + 1;
                if dp[j + 1] > best_len {
                    best_len = dp[j + 1];
                    best_a = i + 1 - best_len;
                    best_b = j + 1 - best_len;
                }
            } else {
                dp[j + 1] = 0;
            }
        }
    }

    if best_len == 0 {
        return 0;
    }

    let left = matching_blocks_length(&a[..best_a], &b[..best_b]);
    let right = matching_blocks_length(&a[best_a + best_len..], &b[best_b + best_len..]);
    left + best_len + right
}
