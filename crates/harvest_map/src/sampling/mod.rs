//! Dot placement strategies for dot-density layers.
//!
//! A [`DotSampling`] strategy places up to `count` points inside a region geometry.
//! [`RejectionSampling`] draws from the bounding box and drops a dot after a fixed
//! number of misses; [`TriangulatedSampling`] draws from an area-weighted triangulation
//! and only fails on degenerate polygons.
use geo::{Geometry, Point};
use rand::Rng;

pub mod rejection;
pub mod triangulated;

pub use rejection::{RejectionSampling, DEFAULT_MAX_TRIES_PER_DOT};
pub use triangulated::TriangulatedSampling;

/// Trait for dot placement inside a geometry.
///
/// Implementations never return more than `count` points and every point lies inside
/// (or on the boundary of) `geometry`.
pub trait DotSampling: Send + Sync {
    fn sample(
        &self,
        geometry: &Geometry<f64>,
        count: usize,
        rng: &mut dyn Rng,
    ) -> Vec<Point<f64>>;
}

/// Bounding-box rejection sampling with a per-dot retry budget.
pub fn sample_dots(
    geometry: &Geometry<f64>,
    count: usize,
    max_tries_per_dot: usize,
    rng: &mut dyn Rng,
) -> Vec<Point<f64>> {
    RejectionSampling::new(max_tries_per_dot).sample(geometry, count, rng)
}

/// Number of dots drawn for a feature in class `class_index`.
#[inline]
pub fn dot_count_for_class(class_index: usize) -> usize {
    class_index + 1
}

/// Generate a random float in the range [0, 1).
#[inline]
pub fn rand01(rng: &mut dyn Rng) -> f64 {
    // 53 high bits fill the mantissa exactly.
    (rng.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// Derive a per-feature seed so each feature's dots are reproducible on their own.
pub fn seed_for_feature(base_seed: u64, feature_index: usize) -> u64 {
    let mixed = base_seed ^ (feature_index as u64).wrapping_mul(0x9E3779B97F4A7C15);
    mix_u64(mixed)
}

#[inline]
fn mix_u64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^ (x >> 31)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::convert::Infallible;

    use rand::TryRng;

    /// Returns the same word forever.
    pub struct FixedRng {
        pub value: u64,
    }

    impl TryRng for FixedRng {
        type Error = Infallible;

        fn try_next_u32(&mut self) -> Result<u32, Infallible> {
            Ok(self.value as u32)
        }

        fn try_next_u64(&mut self) -> Result<u64, Infallible> {
            Ok(self.value)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Infallible> {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 8];
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FixedRng;
    use super::*;

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_stays_below_one() {
        let mut rng = FixedRng { value: u64::MAX };
        let result = rand01(&mut rng);
        assert!(result < 1.0);
        assert!(result > 0.999_999);
    }

    #[test]
    fn rand01_midpoint() {
        let mut rng = FixedRng {
            value: u64::MAX / 2,
        };
        assert!((rand01(&mut rng) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn feature_seeds_differ_and_repeat() {
        assert_eq!(seed_for_feature(7, 3), seed_for_feature(7, 3));
        assert_ne!(seed_for_feature(7, 3), seed_for_feature(7, 4));
        assert_ne!(seed_for_feature(7, 3), seed_for_feature(8, 3));
    }

    #[test]
    fn dot_count_grows_with_class() {
        assert_eq!(dot_count_for_class(0), 1);
        assert_eq!(dot_count_for_class(9), 10);
    }
}
