//! Diversity and overlap measures over team skill sets.

use std::collections::HashSet;

/// Shannon entropy in bits over a frequency distribution. Zero for an
/// empty distribution or a single skill, higher with more skills spread
/// more evenly.
pub fn shannon_entropy(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

/// Mean intersection size over all C(n,2) distinct pairs of skill sets.
/// Quadratic in team size; callers enforce the configured size guard.
pub fn average_pairwise_overlap(sets: &[HashSet<String>]) -> f64 {
    let n = sets.len();
    if n < 2 {
        return 0.0;
    }
    let mut shared = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            shared += sets[i].intersection(&sets[j]).count();
        }
    }
    let pairs = n * (n - 1) / 2;
    shared as f64 / pairs as f64
}
