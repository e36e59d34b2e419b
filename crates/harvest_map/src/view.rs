//! Side-by-side comparison of two years.
//!
//! [`DualMapView`] owns the loaded features and the current layer of each panel. Every
//! [`DualMapView::update`] clears both panels and renders them again from scratch as two
//! independent calls; one panel failing does not affect the other.
use std::path::Path;

use rand::Rng;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::feature::{Feature, FeatureCollection};
use crate::render::{
    render_panel_with_events, EventSink, LayerGroup, PanelRequest, RenderConfig, RenderEvent,
    RenderEventKind, RenderMode, Toggles,
};
use crate::tooltip::Tooltip;

/// The user-facing controls read on every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: RenderMode,
    pub year_a: i32,
    pub year_b: i32,
    pub show_area: bool,
    pub show_production: bool,
}

impl ViewState {
    pub fn new(mode: RenderMode, year_a: i32, year_b: i32) -> Self {
        Self {
            mode,
            year_a,
            year_b,
            show_area: true,
            show_production: true,
        }
    }

    pub fn toggles(&self) -> Toggles {
        Toggles::new(self.show_area, self.show_production)
    }
}

/// Which side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    A,
    B,
}

impl Panel {
    pub fn id(self) -> &'static str {
        match self {
            Panel::A => "A",
            Panel::B => "B",
        }
    }
}

/// Two map panels over one shared feature collection.
#[derive(Debug, Clone)]
pub struct DualMapView {
    pub features: FeatureCollection,
    pub config: RenderConfig,
    panel_a: Option<LayerGroup>,
    panel_b: Option<LayerGroup>,
    state: Option<ViewState>,
}

impl DualMapView {
    pub fn new(features: FeatureCollection, config: RenderConfig) -> Self {
        Self {
            features,
            config,
            panel_a: None,
            panel_b: None,
            state: None,
        }
    }

    /// Load the feature collection once; on failure the error is logged and returned.
    pub fn load(path: impl AsRef<Path>, config: RenderConfig) -> Result<Self> {
        let path = path.as_ref();
        match FeatureCollection::from_path(path) {
            Ok(features) => Ok(Self::new(features, config)),
            Err(e) => {
                error!("Error loading GeoJSON from '{}': {}.", path.display(), e);
                Err(e)
            }
        }
    }

    pub fn panel(&self, panel: Panel) -> Option<&LayerGroup> {
        match panel {
            Panel::A => self.panel_a.as_ref(),
            Panel::B => self.panel_b.as_ref(),
        }
    }

    /// The state of the last update, if any.
    pub fn state(&self) -> Option<&ViewState> {
        self.state.as_ref()
    }

    /// Years available for the year selectors.
    pub fn years(&self) -> Vec<i32> {
        self.features.years()
    }

    pub fn clear(&mut self) {
        self.panel_a = None;
        self.panel_b = None;
    }

    /// Re-render both panels for `state`.
    pub fn update<R: Rng>(&mut self, state: &ViewState, rng: &mut R) {
        self.update_with_events(state, rng, &mut ());
    }

    pub fn update_with_events<R: Rng>(
        &mut self,
        state: &ViewState,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) {
        self.clear();
        self.state = Some(*state);
        self.panel_a = self.render_one(Panel::A, state.year_a, state, rng, sink);
        self.panel_b = self.render_one(Panel::B, state.year_b, state, rng, sink);
    }

    fn render_one<R: Rng>(
        &self,
        panel: Panel,
        year: i32,
        state: &ViewState,
        rng: &mut R,
        sink: &mut dyn EventSink,
    ) -> Option<LayerGroup> {
        let request =
            PanelRequest::new(panel.id(), state.mode, year).with_toggles(state.toggles());
        match render_panel_with_events(&self.features, &request, &self.config, rng, sink) {
            Ok(Some(group)) => {
                info!("Map {} ({year}) loaded.", panel.id());
                Some(group)
            }
            Ok(None) => {
                warn!("Map {} ({year}) failed to load.", panel.id());
                None
            }
            Err(e) => {
                warn!("Map {} ({year}) failed to load: {e}.", panel.id());
                if sink.wants(RenderEventKind::Warning) {
                    sink.send(RenderEvent::Warning {
                        context: format!("panel:{}", panel.id()),
                        message: e.to_string(),
                    });
                }
                None
            }
        }
    }

    /// Topmost feature under `point` with its tooltip for the panel's year.
    pub fn hover(&self, panel: Panel, point: geo::Point<f64>) -> Option<(&Feature, Tooltip)> {
        let state = self.state.as_ref()?;
        let year = match panel {
            Panel::A => state.year_a,
            Panel::B => state.year_b,
        };
        let feature = self.features.feature_at(point)?;
        Some((feature, Tooltip::for_feature(feature, year)))
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Point};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::render::VecSink;

    fn collection() -> FeatureCollection {
        let cells = [(0.0, 10.0, 100.0, 2.0), (10.0, 20.0, 400.0, 4.0), (20.0, 40.0, 900.0, 6.0)];
        FeatureCollection::new(
            cells
                .iter()
                .enumerate()
                .map(|(i, (x, area, prod, yld))| {
                    Feature::new(polygon![
                        (x: *x, y: 0.0),
                        (x: *x + 10.0, y: 0.0),
                        (x: *x + 10.0, y: 10.0),
                        (x: *x, y: 10.0)
                    ])
                    .with_name(format!("Region {i}"))
                    .with_attribute("Area_2019", *area)
                    .with_attribute("Prod_2019", *prod)
                    .with_attribute("Yield_2019", *yld)
                })
                .collect(),
        )
    }

    #[test]
    fn renders_both_panels() {
        let mut view = DualMapView::new(collection(), RenderConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        view.update(&ViewState::new(RenderMode::Yield, 2019, 2019), &mut rng);
        assert!(view.panel(Panel::A).is_some());
        assert!(view.panel(Panel::B).is_some());
        assert_eq!(view.years(), vec![2019]);
    }

    #[test]
    fn panels_fail_independently() {
        let mut view = DualMapView::new(collection(), RenderConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let mut sink = VecSink::new();
        view.update_with_events(
            &ViewState::new(RenderMode::DotDensity, 2019, 2021),
            &mut rng,
            &mut sink,
        );
        assert_eq!(view.panel(Panel::A).map(|g| g.year), Some(2019));
        assert!(view.panel(Panel::B).is_none());
        assert_eq!(sink.count(RenderEventKind::PanelFinished), 1);
        assert_eq!(sink.count(RenderEventKind::PanelSkipped), 1);
    }

    #[test]
    fn update_clears_previous_layers() {
        let mut view = DualMapView::new(collection(), RenderConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        view.update(&ViewState::new(RenderMode::Bivariate, 2019, 2019), &mut rng);
        assert!(view.panel(Panel::B).is_some());
        view.update(&ViewState::new(RenderMode::Bivariate, 2019, 1990), &mut rng);
        assert!(view.panel(Panel::B).is_none());
        assert_eq!(view.state().map(|s| s.year_b), Some(1990));
    }

    #[test]
    fn invalid_config_leaves_panels_empty() {
        let config = RenderConfig::default().with_max_tries_per_dot(0);
        let mut view = DualMapView::new(collection(), config);
        let mut rng = StdRng::seed_from_u64(1);
        let mut sink = VecSink::new();
        view.update_with_events(
            &ViewState::new(RenderMode::Yield, 2019, 2019),
            &mut rng,
            &mut sink,
        );
        assert!(view.panel(Panel::A).is_none());
        assert!(view.panel(Panel::B).is_none());
        assert_eq!(sink.count(RenderEventKind::Warning), 2);
    }

    #[test]
    fn hover_reports_panel_year() {
        let mut view = DualMapView::new(collection(), RenderConfig::default());
        assert!(view.hover(Panel::A, Point::new(5.0, 5.0)).is_none());

        let mut rng = StdRng::seed_from_u64(1);
        view.update(&ViewState::new(RenderMode::Yield, 2019, 2020), &mut rng);
        let (feature, tip) = view.hover(Panel::A, Point::new(15.0, 5.0)).unwrap();
        assert_eq!(feature.name.as_deref(), Some("Region 1"));
        assert_eq!(tip.area, Some(20.0));
        let (_, tip) = view.hover(Panel::B, Point::new(15.0, 5.0)).unwrap();
        assert_eq!(tip.area, None);
        assert!(view.hover(Panel::A, Point::new(500.0, 5.0)).is_none());
    }

    #[test]
    fn load_reports_missing_file() {
        let out = DualMapView::load("/nonexistent/harvest.geojson", RenderConfig::default());
        assert!(matches!(out, Err(crate::error::Error::Io(_))));
    }
}
