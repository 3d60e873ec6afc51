//! Normalized edit-distance similarity
//!
//! Scores two strings on a 0-100 scale from their insertion/deletion
//! distance: `100 * (1 - indel / (len_a + len_b))`, rounded half to even.
//! The metric is symmetric and gives 100 only for identical strings. Lengths
//! are counted in `char`s so accented input is not over-weighted.

/// Similarity between `a` and `b` in `0..=100`.
///
/// Two empty strings are identical (100); an empty string against a
/// non-empty one scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // indel = total - 2 * lcs, so the ratio reduces to 2 * lcs / total
    let lcs = lcs_len(&a, &b);
    let score = (200 * lcs) as f64 / total as f64;
    score.round_ties_even() as u8
}

/// Length of the longest common subsequence, O(n*m) time and O(m) space.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
