//! Panel rendering: classify one year of data and produce styled regions, dots and a legend.
//!
//! All three modes share one pipeline. Each mode names the fields it classifies, the
//! class count and ramp per field, and how the resulting classes become styles.
use std::fmt;
use std::str::FromStr;

use geo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::classify::{compute_breaks, Breakpoints, ClassIndex};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::feature::{FeatureCollection, Metric};
use crate::legend::{self, Legend};
use crate::sampling::{dot_count_for_class, seed_for_feature, DotSampling};
use crate::style::{CircleStyle, Style};

pub mod config;
pub mod events;

pub use config::{
    BivariateConfig, ChoroplethConfig, DotDensityConfig, RenderConfig, SamplerKind,
    UnclassifiedPolicy,
};
pub use events::{EventSink, FnSink, MultiSink, RenderEvent, RenderEventKind, VecSink};

/// Which thematic map a panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Single-variable choropleth of yield.
    #[default]
    Yield,
    /// Production choropleth with area dots on top.
    DotDensity,
    /// Area and production classes blended into one fill.
    Bivariate,
}

impl RenderMode {
    pub const ALL: [RenderMode; 3] = [
        RenderMode::Yield,
        RenderMode::DotDensity,
        RenderMode::Bivariate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RenderMode::Yield => "yield",
            RenderMode::DotDensity => "dotdensity",
            RenderMode::Bivariate => "bivariate",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "yield" | "single" => Ok(RenderMode::Yield),
            "dotdensity" | "dot-density" | "dot_density" => Ok(RenderMode::DotDensity),
            "bivariate" => Ok(RenderMode::Bivariate),
            other => Err(Error::InvalidConfig(format!("unknown render mode '{other}'"))),
        }
    }
}

/// The show-area / show-production switches of bivariate mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    pub show_area: bool,
    pub show_production: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            show_area: true,
            show_production: true,
        }
    }
}

impl Toggles {
    pub const fn new(show_area: bool, show_production: bool) -> Self {
        Self {
            show_area,
            show_production,
        }
    }

    /// Blend when both are on, pass one through when only it is on, `None` when neither is.
    pub fn fill(self, area: Rgb, production: Rgb) -> Option<Rgb> {
        match (self.show_area, self.show_production) {
            (true, true) => Some(area.blend(production)),
            (true, false) => Some(area),
            (false, true) => Some(production),
            (false, false) => None,
        }
    }
}

/// One panel to render.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRequest {
    /// Label used in logs and events, e.g. `"A"`.
    pub id: String,
    pub mode: RenderMode,
    pub year: i32,
    pub toggles: Toggles,
}

impl PanelRequest {
    pub fn new(id: impl Into<String>, mode: RenderMode, year: i32) -> Self {
        Self {
            id: id.into(),
            mode,
            year,
            toggles: Toggles::default(),
        }
    }

    pub fn with_toggles(mut self, toggles: Toggles) -> Self {
        self.toggles = toggles;
        self
    }
}

/// A feature of the collection with the style it is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct StyledFeature {
    /// Index into the rendered [`FeatureCollection`].
    pub feature_index: usize,
    /// Class per classified field, in the order of [`LayerGroup::breaks`].
    pub classes: Vec<ClassIndex>,
    pub style: Style,
}

/// A dot-density marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub position: Point<f64>,
    /// Class of the parent feature's dot field.
    pub class: usize,
    pub feature_index: usize,
    pub style: Style,
}

/// Everything drawn for one panel: regions first, dots on top.
#[derive(Debug, Clone)]
pub struct LayerGroup {
    pub panel: String,
    pub mode: RenderMode,
    pub year: i32,
    pub regions: Vec<StyledFeature>,
    pub dots: Vec<Dot>,
    /// Breakpoints per classified field.
    pub breaks: Vec<(String, Breakpoints)>,
    pub legend: Legend,
}

impl LayerGroup {
    /// Breakpoints computed for `field`, if it was classified.
    pub fn breaks_for(&self, field: &str) -> Option<&Breakpoints> {
        self.breaks
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, b)| b)
    }
}

/// Renders one panel.
///
/// Returns `Ok(None)` when the collection is empty or a classified field has no numeric
/// values for the requested year. Returns an error only for an invalid `config`.
pub fn render_panel<R: Rng>(
    features: &FeatureCollection,
    request: &PanelRequest,
    config: &RenderConfig,
    rng: &mut R,
) -> Result<Option<LayerGroup>> {
    render_panel_internal(features, request, config, rng, &mut ())
}

/// Like [`render_panel`], reporting progress to `sink`.
pub fn render_panel_with_events<R: Rng>(
    features: &FeatureCollection,
    request: &PanelRequest,
    config: &RenderConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Option<LayerGroup>> {
    render_panel_internal(features, request, config, rng, sink)
}

/// Fields classified per mode, each with its class count.
fn classified_fields(mode: RenderMode, year: i32, config: &RenderConfig) -> Vec<(String, usize)> {
    match mode {
        RenderMode::Yield => vec![(Metric::Yield.field(year), config.choropleth.class_count)],
        RenderMode::DotDensity => vec![
            (
                Metric::Production.field(year),
                config.dot_density.background_class_count,
            ),
            (
                Metric::Area.field(year),
                config.dot_density.dot_class_count,
            ),
        ],
        RenderMode::Bivariate => vec![
            (Metric::Area.field(year), config.bivariate.class_count),
            (Metric::Production.field(year), config.bivariate.class_count),
        ],
    }
}

fn render_panel_internal<R: Rng>(
    features: &FeatureCollection,
    request: &PanelRequest,
    config: &RenderConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Option<LayerGroup>> {
    config.validate()?;
    let panel = request.id.as_str();

    if sink.wants(RenderEventKind::PanelStarted) {
        sink.send(RenderEvent::PanelStarted {
            panel: panel.to_owned(),
            mode: request.mode,
            year: request.year,
        });
    }

    if features.is_empty() {
        warn!("No features loaded for year {}.", request.year);
        return Ok(skip(panel, "no features loaded", sink));
    }

    let mut breaks = Vec::new();
    for (field, class_count) in classified_fields(request.mode, request.year, config) {
        let values = match features.require_values(&field) {
            Ok(values) => values,
            Err(e @ Error::EmptySample { .. }) => {
                warn!("Panel {panel}: {e}; skipping {} layer.", request.mode);
                if sink.wants(RenderEventKind::Warning) {
                    sink.send(RenderEvent::Warning {
                        context: format!("panel:{panel} field:{field}"),
                        message: e.to_string(),
                    });
                }
                return Ok(skip(panel, &e.to_string(), sink));
            }
            Err(e) => return Err(e),
        };
        let b = compute_breaks(&values, class_count)?;
        debug!("Panel {panel}: breaks for '{field}': {:?}.", b.as_slice());
        if sink.wants(RenderEventKind::BreaksComputed) {
            sink.send(RenderEvent::BreaksComputed {
                panel: panel.to_owned(),
                field: field.clone(),
                breaks: b.clone(),
            });
        }
        breaks.push((field, b));
    }

    let mut group = LayerGroup {
        panel: panel.to_owned(),
        mode: request.mode,
        year: request.year,
        regions: Vec::with_capacity(features.len()),
        dots: Vec::new(),
        breaks,
        legend: Legend::default(),
    };

    match request.mode {
        RenderMode::Yield => style_yield(features, config, &mut group),
        RenderMode::DotDensity => style_dot_density(features, config, rng, sink, &mut group),
        RenderMode::Bivariate => style_bivariate(features, request.toggles, config, &mut group),
    }

    info!(
        "Panel {panel} ({}, {}) rendered: {} regions, {} dots.",
        request.mode,
        request.year,
        group.regions.len(),
        group.dots.len()
    );
    if sink.wants(RenderEventKind::PanelFinished) {
        sink.send(RenderEvent::PanelFinished {
            panel: panel.to_owned(),
            regions: group.regions.len(),
            dots: group.dots.len(),
        });
    }
    Ok(Some(group))
}

fn skip(panel: &str, reason: &str, sink: &mut dyn EventSink) -> Option<LayerGroup> {
    if sink.wants(RenderEventKind::PanelSkipped) {
        sink.send(RenderEvent::PanelSkipped {
            panel: panel.to_owned(),
            reason: reason.to_owned(),
        });
    }
    None
}

/// Class of `value` under `policy`; `None` means the feature gets the neutral style.
fn resolve(class: ClassIndex, policy: UnclassifiedPolicy) -> Option<usize> {
    match (class, policy) {
        (ClassIndex::Class(i), _) => Some(i),
        (ClassIndex::Unclassified, UnclassifiedPolicy::LowestClass) => Some(0),
        (ClassIndex::Unclassified, UnclassifiedPolicy::Neutral) => None,
    }
}

fn style_yield(features: &FeatureCollection, config: &RenderConfig, group: &mut LayerGroup) {
    let cfg = &config.choropleth;
    let (field, breaks) = &group.breaks[0];

    for (index, feature) in features.iter().enumerate() {
        let class = breaks.class_of(feature.get(field));
        let fill = resolve(class, config.unclassified)
            .map_or(config.bivariate.neutral, |i| cfg.ramp.color(i));
        group.regions.push(StyledFeature {
            feature_index: index,
            classes: vec![class],
            style: Style::polygon(fill, cfg.stroke),
        });
    }

    group.legend = Legend::new(vec![legend::color_scale(
        "Yield (kg/ha)",
        breaks,
        &cfg.ramp,
    )]);
}

fn style_dot_density<R: Rng>(
    features: &FeatureCollection,
    config: &RenderConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
    group: &mut LayerGroup,
) {
    let cfg = &config.dot_density;
    let sampler: Box<dyn DotSampling> = cfg.sampler.build(cfg.max_tries_per_dot);
    let (prod_field, prod_breaks) = &group.breaks[0];
    let (area_field, area_breaks) = &group.breaks[1];

    let mut regions = Vec::with_capacity(features.len());
    let mut dots = Vec::new();
    for (index, feature) in features.iter().enumerate() {
        let prod_class = prod_breaks.class_of(feature.get(prod_field));
        let area_class = area_breaks.class_of(feature.get(area_field));

        let fill = resolve(prod_class, config.unclassified)
            .map_or(config.bivariate.neutral, |i| cfg.background_ramp.color(i));
        regions.push(StyledFeature {
            feature_index: index,
            classes: vec![prod_class, area_class],
            style: Style::polygon(fill, cfg.background_stroke),
        });

        let Some(class) = resolve(area_class, config.unclassified) else {
            continue;
        };
        let requested = dot_count_for_class(class);
        let points = match config.seed {
            Some(seed) => {
                let mut feature_rng = StdRng::seed_from_u64(seed_for_feature(seed, index));
                sampler.sample(&feature.geometry, requested, &mut feature_rng)
            }
            None => sampler.sample(&feature.geometry, requested, rng),
        };
        if points.len() < requested {
            debug!(
                "Panel {}: feature {index} placed {} of {requested} dots.",
                group.panel,
                points.len()
            );
        }
        if sink.wants(RenderEventKind::DotsSampled) {
            sink.send(RenderEvent::DotsSampled {
                panel: group.panel.clone(),
                feature_index: index,
                requested,
                placed: points.len(),
            });
        }

        let style = Style::circle(CircleStyle {
            radius: cfg.dot_radius(class),
            fill: cfg.dot_fill,
            stroke: Some(cfg.dot_stroke),
        });
        dots.extend(points.into_iter().map(|position| Dot {
            position,
            class,
            feature_index: index,
            style,
        }));
    }

    group.legend = Legend::new(vec![
        legend::color_scale(
            "Production (Background Color)",
            prod_breaks,
            &cfg.background_ramp,
        ),
        legend::dot_scale("Area Harvested (Dot Size)", area_breaks, cfg),
    ]);
    group.regions = regions;
    group.dots = dots;
}

fn style_bivariate(
    features: &FeatureCollection,
    toggles: Toggles,
    config: &RenderConfig,
    group: &mut LayerGroup,
) {
    let cfg = &config.bivariate;
    let (area_field, area_breaks) = &group.breaks[0];
    let (prod_field, prod_breaks) = &group.breaks[1];

    for (index, feature) in features.iter().enumerate() {
        let area_class = area_breaks.class_of(feature.get(area_field));
        let prod_class = prod_breaks.class_of(feature.get(prod_field));
        let fill = bivariate_fill(area_class, prod_class, toggles, config);
        group.regions.push(StyledFeature {
            feature_index: index,
            classes: vec![area_class, prod_class],
            style: Style::polygon(fill, cfg.stroke),
        });
    }

    group.legend = Legend::new(vec![legend::bivariate_matrix(
        area_breaks,
        prod_breaks,
        toggles,
        cfg,
    )]);
}

/// Fill for a bivariate region.
///
/// Under [`UnclassifiedPolicy::Neutral`] a miss on any shown variable yields the neutral
/// fill.
pub fn bivariate_fill(
    area: ClassIndex,
    production: ClassIndex,
    toggles: Toggles,
    config: &RenderConfig,
) -> Rgb {
    let cfg = &config.bivariate;
    let area = resolve(area, config.unclassified);
    let production = resolve(production, config.unclassified);
    let missing = (toggles.show_area && area.is_none())
        || (toggles.show_production && production.is_none());
    if missing {
        return cfg.neutral;
    }
    toggles
        .fill(
            cfg.area_ramp.color(area.unwrap_or(0)),
            cfg.production_ramp.color(production.unwrap_or(0)),
        )
        .unwrap_or(cfg.neutral)
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Geometry, Intersects};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::color::ramps;
    use crate::feature::Feature;

    fn square(x0: f64, size: f64) -> Geometry<f64> {
        polygon![
            (x: x0, y: 0.0),
            (x: x0 + size, y: 0.0),
            (x: x0 + size, y: size),
            (x: x0, y: size)
        ]
        .into()
    }

    fn sample_collection() -> FeatureCollection {
        let rows = [
            ("Alpha", 100.0, 1_000.0, 1.2),
            ("Beta", 2_000.0, 50_000.0, 2.5),
            ("Gamma", 30_000.0, 900_000.0, 3.1),
            ("Delta", 45_000.0, 2_500_000.0, 4.8),
            ("Epsilon", 60_000.0, 3_000_000.0, 5.0),
            ("Zeta", 75_000.0, 4_200_000.0, 6.6),
        ];
        FeatureCollection::new(
            rows.iter()
                .enumerate()
                .map(|(i, (name, area, prod, yld))| {
                    Feature::new(square(i as f64 * 20.0, 10.0))
                        .with_name(*name)
                        .with_attribute("Area_2020", *area)
                        .with_attribute("Prod_2020", *prod)
                        .with_attribute("Yield_2020", *yld)
                })
                .collect(),
        )
    }

    #[test]
    fn parses_mode_names() {
        assert_eq!("yield".parse::<RenderMode>().unwrap(), RenderMode::Yield);
        assert_eq!(
            "dot-density".parse::<RenderMode>().unwrap(),
            RenderMode::DotDensity
        );
        assert_eq!(
            "DotDensity".parse::<RenderMode>().unwrap(),
            RenderMode::DotDensity
        );
        assert!("heatmap".parse::<RenderMode>().is_err());
        for mode in RenderMode::ALL {
            assert_eq!(mode.to_string().parse::<RenderMode>().unwrap(), mode);
        }
    }

    #[test]
    fn toggles_pick_blend_single_or_none() {
        let a = Rgb::new(0, 0, 0);
        let p = Rgb::new(255, 255, 255);
        assert_eq!(Toggles::new(true, true).fill(a, p), Some(a.blend(p)));
        assert_eq!(Toggles::new(true, false).fill(a, p), Some(a));
        assert_eq!(Toggles::new(false, true).fill(a, p), Some(p));
        assert_eq!(Toggles::new(false, false).fill(a, p), None);
    }

    #[test]
    fn single_feature_dot_density() {
        let features = FeatureCollection::new(vec![Feature::new(square(0.0, 10.0))
            .with_attribute("Area_2020", 500.0)
            .with_attribute("Prod_2020", 1000.0)]);
        let request = PanelRequest::new("A", RenderMode::DotDensity, 2020);
        let mut rng = StdRng::seed_from_u64(42);

        let group = render_panel(&features, &request, &RenderConfig::default(), &mut rng)
            .unwrap()
            .expect("panel should render");

        let prod = group.breaks_for("Prod_2020").unwrap();
        assert_eq!(prod.as_slice(), &[1000.0, 1000.0]);
        assert_eq!(group.regions.len(), 1);
        assert_eq!(group.regions[0].classes[0], ClassIndex::Class(0));
        assert_eq!(
            group.regions[0].style.fill,
            Some(ramps::PRODUCTION_BLUES[0])
        );

        assert_eq!(group.dots.len(), 1);
        let dot = &group.dots[0];
        assert_eq!(dot.class, 0);
        assert!(features.features[0].geometry.intersects(&dot.position));
        assert_eq!(dot.style.circle.map(|c| c.radius), Some(2.0));
    }

    #[test]
    fn dot_counts_follow_area_class() {
        let features = sample_collection();
        let request = PanelRequest::new("A", RenderMode::DotDensity, 2020);
        let config = RenderConfig::default().with_seed(7);
        let mut rng = StdRng::seed_from_u64(0);
        let group = render_panel(&features, &request, &config, &mut rng)
            .unwrap()
            .unwrap();

        let area = group.breaks_for("Area_2020").unwrap();
        // Six values into ten classes: every value gets its own class.
        assert_eq!(area.class_count(), 6);
        for (index, feature) in features.iter().enumerate() {
            let class = area.class_of(feature.get("Area_2020")).or_lowest();
            let placed: Vec<&Dot> = group
                .dots
                .iter()
                .filter(|d| d.feature_index == index)
                .collect();
            assert!(placed.len() <= class + 1);
            assert!(placed.iter().all(|d| d.class == class));
            assert!(placed
                .iter()
                .all(|d| feature.geometry.intersects(&d.position)));
        }
    }

    #[test]
    fn seeded_dots_are_reproducible() {
        let features = sample_collection();
        let request = PanelRequest::new("A", RenderMode::DotDensity, 2020);
        let config = RenderConfig::default().with_seed(99);

        let a = render_panel(&features, &request, &config, &mut StdRng::seed_from_u64(1))
            .unwrap()
            .unwrap();
        let b = render_panel(&features, &request, &config, &mut StdRng::seed_from_u64(2))
            .unwrap()
            .unwrap();
        assert_eq!(a.dots, b.dots);
    }

    #[test]
    fn yield_mode_uses_greens_and_legend_title() {
        let features = sample_collection();
        let request = PanelRequest::new("B", RenderMode::Yield, 2020);
        let mut rng = StdRng::seed_from_u64(3);
        let group = render_panel(&features, &request, &RenderConfig::default(), &mut rng)
            .unwrap()
            .unwrap();

        assert!(group.dots.is_empty());
        assert_eq!(group.regions.len(), 6);
        let fills: Vec<Rgb> = group.regions.iter().filter_map(|r| r.style.fill).collect();
        assert_eq!(fills.first(), Some(&ramps::YIELD_GREENS[0]));
        assert!(fills.iter().all(|f| ramps::YIELD_GREENS.contains(f)));
        assert!(group
            .legend
            .to_html()
            .starts_with(r#"<div class="legend-title">Yield (kg/ha)</div>"#));
    }

    #[test]
    fn bivariate_blends_when_both_toggles_are_on() {
        let features = sample_collection();
        let mut rng = StdRng::seed_from_u64(3);
        let config = RenderConfig::default();

        let request = PanelRequest::new("A", RenderMode::Bivariate, 2020);
        let group = render_panel(&features, &request, &config, &mut rng)
            .unwrap()
            .unwrap();
        let lowest = &group.regions[0];
        assert_eq!(lowest.classes, vec![ClassIndex::Class(0); 2]);
        assert_eq!(
            lowest.style.fill,
            Some(ramps::BIVARIATE_AREA[0].blend(ramps::BIVARIATE_PRODUCTION[0]))
        );
        assert!(group.legend.uses_toggles());

        let request = request.with_toggles(Toggles::new(false, false));
        let group = render_panel(&features, &request, &config, &mut rng)
            .unwrap()
            .unwrap();
        assert!(group
            .regions
            .iter()
            .all(|r| r.style.fill == Some(config.bivariate.neutral)));
    }

    #[test]
    fn missing_field_skips_panel() {
        let features = sample_collection();
        let request = PanelRequest::new("A", RenderMode::Yield, 1999);
        let mut sink = VecSink::new();
        let mut rng = StdRng::seed_from_u64(3);
        let out = render_panel_with_events(
            &features,
            &request,
            &RenderConfig::default(),
            &mut rng,
            &mut sink,
        )
        .unwrap();
        assert!(out.is_none());
        assert_eq!(sink.count(RenderEventKind::PanelSkipped), 1);
        assert_eq!(sink.count(RenderEventKind::Warning), 1);
        assert_eq!(sink.count(RenderEventKind::PanelFinished), 0);
    }

    #[test]
    fn empty_collection_skips_panel() {
        let request = PanelRequest::new("A", RenderMode::Bivariate, 2020);
        let mut rng = StdRng::seed_from_u64(3);
        let out = render_panel(
            &FeatureCollection::default(),
            &request,
            &RenderConfig::default(),
            &mut rng,
        )
        .unwrap();
        assert!(out.is_none());
    }

    #[test]
    fn invalid_config_is_an_error() {
        let request = PanelRequest::new("A", RenderMode::Yield, 2020);
        let config = RenderConfig::default().with_max_tries_per_dot(0);
        let mut rng = StdRng::seed_from_u64(3);
        let out = render_panel(&sample_collection(), &request, &config, &mut rng);
        assert!(matches!(out, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn unclassified_policy_controls_missing_values() {
        let mut features = sample_collection();
        features
            .features
            .push(Feature::new(square(200.0, 10.0)).with_name("NoData"));
        let request = PanelRequest::new("A", RenderMode::DotDensity, 2020);
        let mut rng = StdRng::seed_from_u64(5);

        let lowest = render_panel(&features, &request, &RenderConfig::default(), &mut rng)
            .unwrap()
            .unwrap();
        let last = lowest.regions.last().unwrap();
        assert_eq!(last.classes, vec![ClassIndex::Unclassified; 2]);
        assert_eq!(last.style.fill, Some(ramps::PRODUCTION_BLUES[0]));
        assert!(lowest.dots.iter().any(|d| d.feature_index == 6));

        let config = RenderConfig::default().with_unclassified(UnclassifiedPolicy::Neutral);
        let neutral = render_panel(&features, &request, &config, &mut rng)
            .unwrap()
            .unwrap();
        let last = neutral.regions.last().unwrap();
        assert_eq!(last.style.fill, Some(config.bivariate.neutral));
        assert!(!neutral.dots.iter().any(|d| d.feature_index == 6));
    }

    #[test]
    fn events_trace_a_full_render() {
        let features = sample_collection();
        let request = PanelRequest::new("A", RenderMode::DotDensity, 2020);
        let mut sink = VecSink::new();
        let mut rng = StdRng::seed_from_u64(11);
        render_panel_with_events(
            &features,
            &request,
            &RenderConfig::default(),
            &mut rng,
            &mut sink,
        )
        .unwrap();
        assert_eq!(sink.count(RenderEventKind::PanelStarted), 1);
        assert_eq!(sink.count(RenderEventKind::BreaksComputed), 2);
        assert_eq!(sink.count(RenderEventKind::DotsSampled), 6);
        assert_eq!(sink.count(RenderEventKind::PanelFinished), 1);
    }
}
