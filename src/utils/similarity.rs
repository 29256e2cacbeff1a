//! String Similarity Scoring
//!
//! Weighted fuzzy ratio (0-100) tolerant of typos, word reordering and case.
//!
//! Building blocks:
//! - `ratio`: character-level sequence ratio, 2·M / T
//! - `partial_ratio`: best-aligned window of the longer string
//! - `token_sort_ratio` / `token_set_ratio`: order-insensitive word comparisons
//! - `weighted_ratio`: picks the best of the above with length-dependent scaling
//!
//! Matched characters come from the `similar` crate's character diff.

use similar::{DiffOp, TextDiff};
use std::collections::BTreeSet;

/// Lengths differing by less than this factor are compared whole
const PARTIAL_LENGTH_RATIO: f64 = 1.5;

/// Lengths differing by more than this factor get a heavier partial penalty
const LONG_LENGTH_RATIO: f64 = 8.0;

const UNBASE_SCALE: f64 = 0.95;
const PARTIAL_SCALE: f64 = 0.90;
const LONG_PARTIAL_SCALE: f64 = 0.60;

/// Normalize a string for comparison
///
/// Drops non-ASCII characters, turns every other non-alphanumeric character
/// into a space, lowercases and trims.
pub fn full_process(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(char::is_ascii)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    cleaned.trim().to_string()
}

/// Characters covered by the equal blocks of the character diff
fn matched_chars(a: &str, b: &str) -> usize {
    TextDiff::from_chars(a, b)
        .ops()
        .iter()
        .map(|op| match *op {
            DiffOp::Equal { len, .. } => len,
            _ => 0,
        })
        .sum()
}

/// Raw sequence ratio 2·M / T in [0, 1]
///
/// Computed in f64: the diff's own `ratio()` is f32, which can round a
/// score to the wrong side of .5.
fn sequence_ratio(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    2.0 * matched_chars(a, b) as f64 / total as f64
}

/// Halves round to even, so 66.5 scores 66
#[inline]
fn round_score(x: f64) -> u8 {
    x.round_ties_even().clamp(0.0, 100.0) as u8
}

#[inline]
fn to_percent(r: f64) -> u8 {
    round_score(100.0 * r)
}

/// Sequence ratio as an integer percentage (0 if either side is empty)
pub fn ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    to_percent(sequence_ratio(a, b))
}

/// Best ratio between the shorter string and any equal-length window of the longer one
///
/// Windows are anchored on the matching blocks of the character diff.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.chars().count() <= b.chars().count() {
        (a, b)
    } else {
        (b, a)
    };
    let long_chars: Vec<char> = longer.chars().collect();
    let short_len = shorter.chars().count();

    let diff = TextDiff::from_chars(shorter, longer);
    let mut anchors: Vec<(usize, usize)> = diff
        .ops()
        .iter()
        .filter_map(|op| match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                ..
            } => Some((old_index, new_index)),
            _ => None,
        })
        .collect();
    // Trailing sentinel block aligns the window with the end of the longer string
    anchors.push((short_len, long_chars.len()));

    let mut best = 0.0_f64;
    for (short_start, long_start) in anchors {
        let start = long_start.saturating_sub(short_start);
        let end = (start + short_len).min(long_chars.len());
        let window: String = long_chars[start..end].iter().collect();

        let r = sequence_ratio(shorter, &window);
        if r > 0.995 {
            return 100;
        }
        best = best.max(r);
    }

    to_percent(best)
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, partial: bool) -> u8 {
    let sa = sorted_tokens(a);
    let sb = sorted_tokens(b);
    if partial {
        partial_ratio(&sa, &sb)
    } else {
        ratio(&sa, &sb)
    }
}

fn token_set(a: &str, b: &str, partial: bool) -> u8 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    let join = |set: Vec<&str>| set.join(" ");
    let intersection = join(tokens_a.intersection(&tokens_b).copied().collect());
    let only_a = join(tokens_a.difference(&tokens_b).copied().collect());
    let only_b = join(tokens_b.difference(&tokens_a).copied().collect());

    let combined_a = format!("{} {}", intersection, only_a).trim().to_string();
    let combined_b = format!("{} {}", intersection, only_b).trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    score(&intersection, &combined_a)
        .max(score(&intersection, &combined_b))
        .max(score(&combined_a, &combined_b))
}

/// Ratio of whitespace-token-sorted strings
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    token_sort(a, b, false)
}

/// Ratio built from the shared token set plus each side's leftovers
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(a, b, false)
}

pub fn partial_token_sort_ratio(a: &str, b: &str) -> u8 {
    token_sort(a, b, true)
}

pub fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    token_set(a, b, true)
}

/// Weighted ratio over raw inputs (normalizes both sides first)
pub fn weighted_ratio(a: &str, b: &str) -> u8 {
    weighted_ratio_processed(&full_process(a), &full_process(b))
}

/// Weighted ratio over strings already passed through `full_process`
///
/// Algorithm:
/// 1. Base score = plain ratio
/// 2. Similar lengths (< 1.5×): also try token sort/set, scaled by 0.95
/// 3. Dissimilar lengths: try partial, partial token sort/set, scaled by 0.9
///    (0.6 beyond 8×), token variants additionally by 0.95
/// 4. Round the best of these
pub fn weighted_ratio_processed(a: &str, b: &str) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let base = ratio(a, b) as f64;

    let len_a = a.chars().count() as f64;
    let len_b = b.chars().count() as f64;
    let len_ratio = len_a.max(len_b) / len_a.min(len_b);

    if len_ratio < PARTIAL_LENGTH_RATIO {
        let tsor = token_sort_ratio(a, b) as f64 * UNBASE_SCALE;
        let tser = token_set_ratio(a, b) as f64 * UNBASE_SCALE;
        return round_score(base.max(tsor).max(tser));
    }

    let partial_scale = if len_ratio > LONG_LENGTH_RATIO {
        LONG_PARTIAL_SCALE
    } else {
        PARTIAL_SCALE
    };

    let partial = partial_ratio(a, b) as f64 * partial_scale;
    let ptsor = partial_token_sort_ratio(a, b) as f64 * UNBASE_SCALE * partial_scale;
    let ptser = partial_token_set_ratio(a, b) as f64 * UNBASE_SCALE * partial_scale;

    round_score(base.max(partial).max(ptsor).max(ptser))
}
