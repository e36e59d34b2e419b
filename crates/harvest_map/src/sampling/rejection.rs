//! Bounding-box rejection sampling.
use geo::{BoundingRect, Geometry, Intersects, Point};
use rand::Rng;

use crate::sampling::{rand01, DotSampling};

pub const DEFAULT_MAX_TRIES_PER_DOT: usize = 10;

/// Draws uniformly inside the geometry's bounding box until a draw lands inside the
/// geometry, giving up on a dot after `max_tries_per_dot` misses.
///
/// Thin or concave regions are undersampled relative to their bounding box. Geometries
/// whose bounding box has zero area (points, axis-aligned lines) get no dots.
#[derive(Debug, Clone)]
pub struct RejectionSampling {
    pub max_tries_per_dot: usize,
}

impl RejectionSampling {
    pub fn new(max_tries_per_dot: usize) -> Self {
        Self { max_tries_per_dot }
    }
}

impl Default for RejectionSampling {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TRIES_PER_DOT)
    }
}

impl DotSampling for RejectionSampling {
    fn sample(
        &self,
        geometry: &Geometry<f64>,
        count: usize,
        rng: &mut dyn Rng,
    ) -> Vec<Point<f64>> {
        if count == 0 || self.max_tries_per_dot == 0 {
            return Vec::new();
        }
        let Some(rect) = geometry.bounding_rect() else {
            return Vec::new();
        };
        let (w, h) = (rect.width(), rect.height());
        if !(w > 0.0 && h > 0.0) {
            return Vec::new();
        }
        let min = rect.min();

        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            for _ in 0..self.max_tries_per_dot {
                let p = Point::new(min.x + rand01(rng) * w, min.y + rand01(rng) * h);
                if geometry.intersects(&p) {
                    out.push(p);
                    break;
                }
            }
        }
        out
    }
}
