#![forbid(unsafe_code)]
//! harvest_map: classification, styling and dot-density sampling for side-by-side
//! agricultural thematic maps.
//!
//! Modules:
//! - classify: Jenks (and alternative) breakpoints and inclusive class lookup
//! - sampling: dot placement inside region geometries (rejection, triangulated)
//! - color, format, style: hex colors and ramps, label formatting, declarative styles
//! - render: yield / dot-density / bivariate panels, config, events
//! - legend, tooltip: legend model and tooltip content with HTML output
//! - view: two-year comparison over one loaded feature collection
//!
//! For examples, see the `harvest_map_examples` crate.
pub mod classify;
pub mod color;
pub mod error;
pub mod feature;
pub mod format;
pub mod legend;
pub mod render;
pub mod sampling;
pub mod style;
pub mod tooltip;
pub mod view;

/// Convenient re-exports for common types. Import with `use harvest_map::prelude::*;`.
pub mod prelude {
    pub use crate::classify::{
        classify, compute_breaks, compute_breaks_with, BreakStrategy, Breakpoints, ClassIndex,
        EqualIntervalBreaks, JenksBreaks, QuantileBreaks,
    };
    pub use crate::color::{blend, ramps, Ramp, Rgb};
    pub use crate::error::{Error, Result};
    pub use crate::feature::{Feature, FeatureCollection, Metric};
    pub use crate::format::{abbreviate, range_label};
    pub use crate::legend::{Legend, LegendSection, MatrixCell};
    pub use crate::render::{
        bivariate_fill, render_panel, render_panel_with_events, BivariateConfig,
        ChoroplethConfig, Dot, DotDensityConfig, EventSink, FnSink, LayerGroup, MultiSink,
        PanelRequest, RenderConfig, RenderEvent, RenderEventKind, RenderMode, SamplerKind,
        StyledFeature, Toggles, UnclassifiedPolicy, VecSink,
    };
    pub use crate::sampling::{
        dot_count_for_class, sample_dots, seed_for_feature, DotSampling, RejectionSampling,
        TriangulatedSampling, DEFAULT_MAX_TRIES_PER_DOT,
    };
    pub use crate::style::{CircleStyle, Stroke, Style};
    pub use crate::tooltip::Tooltip;
    pub use crate::view::{DualMapView, Panel, ViewState};
}
