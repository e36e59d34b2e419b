use std::fs;

use harvest_map::prelude::*;
use harvest_map_examples::{init_tracing, legend_page, render_panels_to_png, synthetic_regions, PngConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let features = synthetic_regions(6, 6, &[2018, 2022], 11);
    let config = RenderConfig::default();
    let mut rng = StdRng::seed_from_u64(5);

    let toggles = [
        ("Area + Production", Toggles::new(true, true)),
        ("Area only", Toggles::new(true, false)),
        ("Production only", Toggles::new(false, true)),
        ("Neither", Toggles::new(false, false)),
    ];

    let mut groups = Vec::new();
    let mut fragments = Vec::new();
    for (label, t) in toggles {
        let request = PanelRequest::new(label, RenderMode::Bivariate, 2022).with_toggles(t);
        if let Some(group) = render_panel(&features, &request, &config, &mut rng)? {
            fragments.push((label.to_string(), group.legend.to_html()));
            groups.push(group);
        }
    }

    let panels: Vec<Option<&LayerGroup>> = groups.iter().map(Some).collect();
    render_panels_to_png(
        &features,
        &panels,
        &PngConfig::new((360, 360)).with_gap(8),
        "bivariate-legend.png",
    )?;

    let out = "bivariate-legend.html";
    fs::write(out, legend_page("Bivariate Matrix", &fragments))?;
    println!("Wrote {out}");

    Ok(())
}
