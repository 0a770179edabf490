//! Frequency outlier detection.
//!
//! Terms are kept when their count lies strictly above the upper Tukey fence
//! `Q3 + 1.5 * IQR` of the per-term frequency distribution. Quartiles use
//! linear interpolation between closest ranks.
//!
//! Small vocabularies make the fence degenerate: with a single distinct term
//! `Q1 == Q3`, the fence equals that term's count, and nothing is kept.

use std::collections::BTreeSet;

use rustc_hash::FxHashMap;

/// Multiplier applied to the interquartile range.
pub const FENCE_FACTOR: f64 = 1.5;

/// Summary of a frequency distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fence {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub upper: f64,
}

impl Fence {
    /// Computes quartiles and the upper fence of `values`.
    ///
    /// Returns `None` for an empty distribution.
    pub fn from_values(values: &[usize]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().map(|&v| v as f64).collect();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 25.0)?;
        let q3 = percentile(&sorted, 75.0)?;
        let iqr = q3 - q1;

        Some(Self { q1, q3, iqr, upper: q3 + FENCE_FACTOR * iqr })
    }
}

/// Linear-interpolation percentile of an ascending slice.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = p / 100.0 * last as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;

    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Count of each distinct lemma.
pub fn frequencies<S: AsRef<str>>(lemmas: &[S]) -> FxHashMap<&str, usize> {
    let mut counts = FxHashMap::default();
    for lemma in lemmas {
        *counts.entry(lemma.as_ref()).or_insert(0) += 1;
    }
    counts
}

/// Lemmas whose frequency is strictly greater than the upper fence.
///
/// # Example
///
/// ```rust
/// use lemmata_core::detect_outliers;
///
/// let mut lemmas = vec!["a", "b", "c"];
/// lemmas.extend(std::iter::repeat("d").take(10));
/// let outliers = detect_outliers(&lemmas);
/// assert_eq!(outliers.into_iter().collect::<Vec<_>>(), ["d"]);
/// ```
pub fn detect_outliers<S: AsRef<str>>(lemmas: &[S]) -> BTreeSet<String> {
    let counts = frequencies(lemmas);
    let values: Vec<usize> = counts.values().copied().collect();

    let Some(fence) = Fence::from_values(&values) else {
        return BTreeSet::new();
    };

    tracing::debug!(
        distinct = counts.len(),
        q1 = fence.q1,
        q3 = fence.q3,
        upper = fence.upper,
        "computed outlier fence"
    );

    counts
        .into_iter()
        .filter(|&(_, count)| count as f64 > fence.upper)
        .map(|(lemma, _)| lemma.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(word: &str, n: usize) -> Vec<String> {
        std::iter::repeat_n(word.to_string(), n).collect()
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [1.0, 1.0, 1.0, 10.0];
        assert_eq!(percentile(&values, 25.0), Some(1.0));
        assert_eq!(percentile(&values, 75.0), Some(3.25));
        assert_eq!(percentile(&values, 50.0), Some(1.0));
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn test_fence() {
        let fence = Fence::from_values(&[1, 1, 1, 10]).unwrap();
        assert_eq!(fence.q1, 1.0);
        assert_eq!(fence.q3, 3.25);
        assert_eq!(fence.iqr, 2.25);
        assert_eq!(fence.upper, 6.625);
    }

    #[test]
    fn test_single_heavy_term_is_outlier() {
        let mut lemmas = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        lemmas.extend(repeat("d", 10));

        let outliers = detect_outliers(&lemmas);
        assert_eq!(outliers, BTreeSet::from(["d".to_string()]));
    }

    #[test]
    fn test_single_distinct_term_is_empty() {
        assert!(detect_outliers(&repeat("kernel", 7)).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_outliers::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_uniform_frequencies_is_empty() {
        assert!(detect_outliers(&["a", "b", "c", "d"]).is_empty());
    }

    #[test]
    fn test_order_independent() {
        let mut forward = vec!["a", "b", "c"];
        forward.extend(std::iter::repeat_n("d", 10));
        let mut backward = forward.clone();
        backward.reverse();

        assert_eq!(detect_outliers(&forward), detect_outliers(&backward));
    }

    #[test]
    fn test_frequencies() {
        let counts = frequencies(&["a", "b", "a"]);
        assert_eq!(counts.get("a"), Some(&2));
        assert_eq!(counts.get("b"), Some(&1));
    }
}
