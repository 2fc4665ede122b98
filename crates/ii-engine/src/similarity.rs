//! String similarity for suggestion ranking.

/// Score given when an example phrase appears verbatim inside the input.
pub const SUBSTRING_SCORE: f64 = 0.9;

/// Similarity of `input` to an example phrase (0.0–1.0), case-insensitive.
///
/// An example contained in the input scores [`SUBSTRING_SCORE`]; anything
/// else scores the normalized edit-distance ratio.
pub fn fuzzy_match(input: &str, example: &str) -> f64 {
    let input = input.to_lowercase();
    let example = example.to_lowercase();

    if input.contains(&example) {
        return SUBSTRING_SCORE;
    }
    ratio(&input, &example)
}

/// Normalized indel similarity, rounded to two decimals.
///
/// `2 * LCS / (len(a) + len(b))`, which equals `1 - d / (len(a) + len(b))`
/// for the insert/delete edit distance `d`. Exact halves round to even
/// (12.5% scores 0.12). Empty input on either side scores 0.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let lcs = longest_common_subsequence(&a, &b);
    let raw = (2 * lcs) as f64 / (a.len() + b.len()) as f64;
    (raw * 100.0).round_ties_even() / 100.0
}

/// Length of the longest common subsequence, two-row DP.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0; b.len() + 1];
    let mut curr = vec![0; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
