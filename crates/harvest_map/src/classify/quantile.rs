//! Quantile (equal-count) breaks.
use crate::classify::BreakStrategy;

/// Places roughly the same number of sample values in every class.
///
/// Thresholds use the nearest-rank sample value, so they always come from the sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuantileBreaks;

impl BreakStrategy for QuantileBreaks {
    fn breaks(&self, sorted: &[f64], class_count: usize) -> Vec<f64> {
        if sorted.is_empty() || class_count == 0 {
            return Vec::new();
        }
        let last = sorted.len() - 1;
        (0..=class_count)
            .map(|i| {
                let rank = (i * last) as f64 / class_count as f64;
                sorted[(rank.round() as usize).min(last)]
            })
            .collect()
    }
}
