#![forbid(unsafe_code)]

mod rendering;
mod synthetic;

pub use rendering::{init_tracing, legend_page, render_panels_to_png, PngConfig};
pub use synthetic::{rng_from_seed, synthetic_regions};
