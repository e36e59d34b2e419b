//! Jenks natural breaks.
use crate::classify::BreakStrategy;

/// Jenks natural breaks: class boundaries minimizing within-class variance.
///
/// Dynamic programme over the sorted sample (Fisher/Jenks). Every returned threshold is a
/// sample value; the first is the sample minimum and the last the sample maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct JenksBreaks;

impl BreakStrategy for JenksBreaks {
    fn breaks(&self, sorted: &[f64], class_count: usize) -> Vec<f64> {
        let n = sorted.len();
        let k = class_count;
        if n == 0 || k == 0 {
            return Vec::new();
        }

        let lower = lower_class_limits(sorted, k);

        let mut out = vec![0.0; k + 1];
        out[k] = sorted[n - 1];
        let mut row = n;
        for j in (1..=k).rev() {
            // Row 0 is never written; clamp so degenerate samples stay in bounds.
            let limit = lower[row][j].max(1);
            out[j - 1] = sorted[limit - 1];
            row = limit - 1;
        }
        out[0] = sorted[0];
        out
    }
}

/// `lower[l][j]`: 1-based index of the first value in the last class when the first `l`
/// values are split into `j` classes.
fn lower_class_limits(sorted: &[f64], k: usize) -> Vec<Vec<usize>> {
    let n = sorted.len();
    let mut lower = vec![vec![0usize; k + 1]; n + 1];
    let mut variance_combinations = vec![vec![0.0f64; k + 1]; n + 1];

    for j in 1..=k {
        lower[1][j] = 1;
        for row in variance_combinations.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_squares = 0.0;
        let mut w = 0.0;
        let mut variance = 0.0;

        for m in 1..=l {
            let lower_limit = l - m + 1;
            let val = sorted[lower_limit - 1];

            w += 1.0;
            sum += val;
            sum_squares += val * val;
            variance = sum_squares - (sum * sum) / w;

            let prev = lower_limit - 1;
            if prev != 0 {
                for j in 2..=k {
                    let candidate = variance + variance_combinations[prev][j - 1];
                    if variance_combinations[l][j] >= candidate {
                        lower[l][j] = lower_limit;
                        variance_combinations[l][j] = candidate;
                    }
                }
            }
        }

        lower[l][1] = 1;
        variance_combinations[l][1] = variance;
    }

    lower
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::compute_breaks;

    #[test]
    fn separates_obvious_clusters() {
        let values = [1.0, 2.0, 3.0, 50.0, 51.0, 52.0, 100.0, 101.0, 102.0];
        let breaks = compute_breaks(&values, 3).unwrap();
        // Thresholds are the lower bound of each class, then the maximum.
        assert_eq!(breaks.as_slice(), &[1.0, 50.0, 100.0, 102.0]);
    }

    #[test]
    fn one_value_per_class_when_counts_match() {
        let sorted = [1.0, 2.0, 3.0];
        let out = JenksBreaks.breaks(&sorted, 3);
        assert_eq!(out, vec![1.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn constant_sample_stays_in_bounds() {
        let sorted = [4.0; 5];
        let out = JenksBreaks.breaks(&sorted, 5);
        assert_eq!(out, vec![4.0; 6]);
    }

    #[test]
    fn single_class_spans_min_to_max() {
        let sorted = [2.0, 8.0, 9.0];
        assert_eq!(JenksBreaks.breaks(&sorted, 1), vec![2.0, 9.0]);
    }

    #[test]
    fn output_is_non_decreasing() {
        let values: Vec<f64> = (0..60).map(|i| ((i * 37) % 101) as f64 * 1.5).collect();
        let breaks = compute_breaks(&values, 8).unwrap();
        assert_eq!(breaks.class_count(), 8);
        assert!(breaks.as_slice().windows(2).all(|w| w[0] <= w[1]));
    }
}
