use geo::{polygon, Geometry};
use harvest_map::feature::{Feature, FeatureCollection, Metric};
use harvest_map::sampling::rand01;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded generator when `seed` is given, otherwise one seeded from OS entropy.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    seed.map_or_else(rand::make_rng, StdRng::seed_from_u64)
}

/// Cell shape by position: squares, an L, a thin diagonal sliver and a triangle.
fn cell(col: usize, row: usize, size: f64) -> Geometry<f64> {
    let (x, y) = (col as f64 * size, row as f64 * size);
    let s = size * 0.9;
    match (col + row * 7) % 4 {
        1 => polygon![
            (x: x, y: y),
            (x: x + s, y: y),
            (x: x + s, y: y + s * 0.35),
            (x: x + s * 0.35, y: y + s * 0.35),
            (x: x + s * 0.35, y: y + s),
            (x: x, y: y + s)
        ]
        .into(),
        2 => polygon![
            (x: x, y: y),
            (x: x + s, y: y + s * 0.9),
            (x: x + s, y: y + s),
            (x: x + s * 0.9, y: y + s)
        ]
        .into(),
        3 => polygon![(x: x, y: y), (x: x + s, y: y), (x: x + s * 0.5, y: y + s)].into(),
        _ => polygon![
            (x: x, y: y),
            (x: x + s, y: y),
            (x: x + s, y: y + s),
            (x: x, y: y + s)
        ]
        .into(),
    }
}

/// A `cols` x `rows` grid of named regions with skewed area, production and yield
/// figures for each year. Production grows a little from one year to the next; about
/// one region in twenty has no data for a given year.
pub fn synthetic_regions(cols: usize, rows: usize, years: &[i32], seed: u64) -> FeatureCollection {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut features = Vec::with_capacity(cols * rows);
    for row in 0..rows {
        for col in 0..cols {
            let mut feature =
                Feature::new(cell(col, row, 10.0)).with_name(format!("Region {row}-{col}"));
            let base_area = (rand01(&mut rng) * 11.0).exp() * 10.0;
            let base_yield = 800.0 + rand01(&mut rng) * 6_000.0;
            for (i, &year) in years.iter().enumerate() {
                if rand01(&mut rng) < 0.05 {
                    continue;
                }
                let growth = 1.0 + 0.04 * i as f64 + (rand01(&mut rng) - 0.5) * 0.1;
                let area = (base_area * growth).round();
                let yld = (base_yield * growth).round();
                feature = feature
                    .with_attribute(Metric::Area.field(year), area)
                    .with_attribute(Metric::Production.field(year), (area * yld / 1_000.0).round())
                    .with_attribute(Metric::Yield.field(year), yld);
            }
            features.push(feature);
        }
    }
    FeatureCollection::new(features)
}
