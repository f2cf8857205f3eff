//! Levenshtein edit distance over Unicode scalar values.
//!
//! Used to measure how far a document's matched terms are from the terms the
//! user actually typed, which feeds the fuzzy proximity ranking signal.

use std::cmp::min;

/// Minimum number of single-character insertions, deletions or
/// substitutions turning `s1` into `s2`.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr_row = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[s2_chars.len()]
}

/// Like [`levenshtein_distance`], but gives up once the distance is known to
/// exceed `threshold`.
pub fn levenshtein_distance_threshold(s1: &str, s2: &str, threshold: usize) -> Option<usize> {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    if s1_chars.len().abs_diff(s2_chars.len()) > threshold {
        return None;
    }

    let mut prev_row: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr_row = vec![0; s2_chars.len() + 1];

    for (i, c1) in s1_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, c2) in s2_chars.iter().enumerate() {
            let cost = usize::from(c1 != c2);
            curr_row[j + 1] = min(
                min(prev_row[j + 1] + 1, curr_row[j] + 1),
                prev_row[j] + cost,
            );
            min_in_row = min(min_in_row, curr_row[j + 1]);
        }

        if min_in_row > threshold {
            return None;
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[s2_chars.len()];
    (distance <= threshold).then_some(distance)
}

/// Smallest distance between any candidate and any target, or `None` when
/// either side is empty.
pub fn min_distance<'a, C, T>(candidates: C, targets: T) -> Option<usize>
where
    C: IntoIterator<Item = &'a str>,
    T: IntoIterator<Item = &'a str> + Clone,
{
    let mut best: Option<usize> = None;
    for candidate in candidates {
        for target in targets.clone() {
            let bound = best.unwrap_or(usize::MAX);
            if bound == 0 {
                return Some(0);
            }
            let distance = match best {
                Some(b) => levenshtein_distance_threshold(candidate, target, b),
                None => Some(levenshtein_distance(candidate, target)),
            };
            if let Some(d) = distance {
                best = Some(best.map_or(d, |b| b.min(d)));
            }
        }
    }
    best
}
