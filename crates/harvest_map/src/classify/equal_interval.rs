//! Equal-interval breaks.
use crate::classify::BreakStrategy;

/// Splits `[min, max]` into classes of identical width.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualIntervalBreaks;

impl BreakStrategy for EqualIntervalBreaks {
    fn breaks(&self, sorted: &[f64], class_count: usize) -> Vec<f64> {
        let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
            return Vec::new();
        };
        if class_count == 0 {
            return Vec::new();
        }

        let step = (max - min) / class_count as f64;
        let mut out: Vec<f64> = (0..class_count).map(|i| min + step * i as f64).collect();
        // Pin the top edge so rounding never leaves the maximum unclassified.
        out.push(max);
        out
    }
}
