use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use geo::Point;
use harvest_map::prelude::*;
use harvest_map_examples::{
    init_tracing, legend_page, render_panels_to_png, rng_from_seed, PngConfig,
};
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Yield,
    DotDensity,
    Bivariate,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Yield => RenderMode::Yield,
            Mode::DotDensity => RenderMode::DotDensity,
            Mode::Bivariate => RenderMode::Bivariate,
        }
    }
}

/// Render two years of a GeoJSON crop dataset side by side.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// GeoJSON FeatureCollection with `Area_<year>`, `Prod_<year>`, `Yield_<year>` properties.
    data: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Mode::Yield)]
    mode: Mode,

    /// Left panel year (default: first year in the data).
    #[arg(long)]
    year_a: Option<i32>,

    /// Right panel year (default: last year in the data).
    #[arg(long)]
    year_b: Option<i32>,

    /// Leave area out of the bivariate fill.
    #[arg(long)]
    hide_area: bool,

    /// Leave production out of the bivariate fill.
    #[arg(long)]
    hide_production: bool,

    /// Seed for dot placement; unseeded runs differ every time.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON render config; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "dual-compare.png")]
    out: PathBuf,

    /// Also write both legends to this HTML file.
    #[arg(long)]
    legend: Option<PathBuf>,

    /// Print the tooltip of the feature under this world position.
    #[arg(long, value_name = "X,Y", value_delimiter = ',')]
    probe: Option<Vec<f64>>,

    /// Panel size in pixels.
    #[arg(long, default_value_t = 640)]
    size: u32,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            RenderConfig::from_json_reader(BufReader::new(file))
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;

    let mut view = DualMapView::load(&args.data, config)?;
    let years = view.years();
    let (Some(&first), Some(&last)) = (years.first(), years.last()) else {
        bail!("no Area_/Prod_/Yield_ attributes in {}", args.data.display());
    };
    info!("Years in dataset: {years:?}.");

    let mut state = ViewState::new(
        args.mode.into(),
        args.year_a.unwrap_or(first),
        args.year_b.unwrap_or(last),
    );
    state.show_area = !args.hide_area;
    state.show_production = !args.hide_production;

    let mut rng = rng_from_seed(args.seed);
    view.update(&state, &mut rng);

    render_panels_to_png(
        &view.features,
        &[view.panel(Panel::A), view.panel(Panel::B)],
        &PngConfig::new((args.size, args.size)),
        &args.out,
    )?;

    if let Some(path) = &args.legend {
        let fragments: Vec<(String, String)> = [(Panel::A, state.year_a), (Panel::B, state.year_b)]
            .into_iter()
            .filter_map(|(panel, year)| {
                view.panel(panel)
                    .map(|g| (format!("Map {} ({year})", panel.id()), g.legend.to_html()))
            })
            .collect();
        fs::write(path, legend_page("Legend", &fragments))
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Wrote legend to {}.", path.display());
    }

    if let Some(xy) = &args.probe {
        let &[x, y] = xy.as_slice() else {
            bail!("--probe expects X,Y");
        };
        let point = Point::new(x, y);
        for panel in [Panel::A, Panel::B] {
            match view.hover(panel, point) {
                Some((_, tooltip)) => {
                    println!("Map {} ({}):", panel.id(), tooltip.year);
                    println!("  {}", tooltip.name.as_deref().unwrap_or("?"));
                    for (label, value) in tooltip.rows() {
                        println!("  {label}: {value}");
                    }
                }
                None => println!("Map {}: no feature at {point:?}", panel.id()),
            }
        }
    }

    Ok(())
}
