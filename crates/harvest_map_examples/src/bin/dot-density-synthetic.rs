use harvest_map::prelude::*;
use harvest_map_examples::{init_tracing, render_panels_to_png, synthetic_regions, PngConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Squares, L-shapes, slivers and triangles: the slivers fill little of their
    // bounding box, which is where rejection sampling drops dots.
    let features = synthetic_regions(8, 6, &[2020], 7);
    let request = PanelRequest::new("dots", RenderMode::DotDensity, 2020);

    let mut groups = Vec::new();
    for sampler in [SamplerKind::Rejection, SamplerKind::Triangulated] {
        let config = RenderConfig::default().with_sampler(sampler).with_seed(2025);
        let mut sink = VecSink::new();
        let mut rng = StdRng::seed_from_u64(2025);
        let Some(group) = render_panel_with_events(&features, &request, &config, &mut rng, &mut sink)?
        else {
            anyhow::bail!("dot-density panel was skipped");
        };

        let (requested, placed) = sink
            .as_slice()
            .iter()
            .fold((0, 0), |(r, p), event| match event {
                RenderEvent::DotsSampled {
                    requested, placed, ..
                } => (r + requested, p + placed),
                _ => (r, p),
            });
        println!("{sampler:?}: placed {placed} of {requested} dots");
        groups.push(group);
    }

    let out = "dot-density-synthetic.png";
    render_panels_to_png(
        &features,
        &[Some(&groups[0]), Some(&groups[1])],
        &PngConfig::new((720, 540)),
        out,
    )?;

    Ok(())
}
