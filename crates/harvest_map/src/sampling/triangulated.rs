//! Area-weighted sampling over an earcut triangulation.
use geo::{Area, Geometry, Point, Polygon, Triangle, TriangulateEarcut};
use rand::Rng;

use crate::sampling::{rand01, DotSampling};

/// Triangulates the polygonal parts of a geometry and draws each dot from a triangle
/// picked in proportion to its area, so every draw lands inside the region.
///
/// Non-polygonal geometries and polygons with zero area get no dots.
#[derive(Debug, Clone, Default)]
pub struct TriangulatedSampling;

impl TriangulatedSampling {
    pub fn new() -> Self {
        Self
    }
}

impl DotSampling for TriangulatedSampling {
    fn sample(
        &self,
        geometry: &Geometry<f64>,
        count: usize,
        rng: &mut dyn Rng,
    ) -> Vec<Point<f64>> {
        if count == 0 {
            return Vec::new();
        }

        let mut polygons = Vec::new();
        collect_polygons(geometry, &mut polygons);
        let triangles: Vec<Triangle<f64>> = polygons
            .iter()
            .flat_map(|p| p.earcut_triangles())
            .filter(|t| t.unsigned_area() > 0.0)
            .collect();

        let mut cumulative = Vec::with_capacity(triangles.len());
        let mut total = 0.0;
        for t in &triangles {
            total += t.unsigned_area();
            cumulative.push(total);
        }
        if !(total > 0.0) {
            return Vec::new();
        }

        (0..count)
            .map(|_| {
                let roll = rand01(rng) * total;
                let idx = cumulative
                    .partition_point(|&c| c <= roll)
                    .min(triangles.len() - 1);
                point_in_triangle(&triangles[idx], rng)
            })
            .collect()
    }
}

fn collect_polygons(geometry: &Geometry<f64>, out: &mut Vec<Polygon<f64>>) {
    match geometry {
        Geometry::Polygon(p) => out.push(p.clone()),
        Geometry::MultiPolygon(mp) => out.extend(mp.0.iter().cloned()),
        Geometry::Rect(r) => out.push(r.to_polygon()),
        Geometry::Triangle(t) => out.push(t.to_polygon()),
        Geometry::GeometryCollection(gc) => {
            for g in gc {
                collect_polygons(g, out);
            }
        }
        _ => {}
    }
}

fn point_in_triangle(t: &Triangle<f64>, rng: &mut dyn Rng) -> Point<f64> {
    let mut u = rand01(rng);
    let mut v = rand01(rng);
    // Fold the far half of the parallelogram back into the triangle.
    if u + v > 1.0 {
        u = 1.0 - u;
        v = 1.0 - v;
    }
    let (a, b, c) = (t.0, t.1, t.2);
    Point::from(a + (b - a) * u + (c - a) * v)
}
