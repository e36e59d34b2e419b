//! Render configuration: class counts, ramps, strokes and dot styling per mode.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ramps, Ramp, Rgb, LEGEND_GRAY, NEUTRAL_GRAY};
use crate::error::{Error, Result};
use crate::sampling::{
    DotSampling, RejectionSampling, TriangulatedSampling, DEFAULT_MAX_TRIES_PER_DOT,
};
use crate::style::Stroke;

/// How a feature whose value misses every class is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnclassifiedPolicy {
    /// Treat it as the lowest class.
    #[default]
    LowestClass,
    /// Use the neutral fill and draw no dots.
    Neutral,
}

/// Dot placement strategy for dot-density layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SamplerKind {
    /// Bounding-box rejection with a per-dot retry budget.
    #[default]
    Rejection,
    /// Area-weighted triangle sampling.
    Triangulated,
}

impl SamplerKind {
    pub fn build(self, max_tries_per_dot: usize) -> Box<dyn DotSampling> {
        match self {
            SamplerKind::Rejection => Box::new(RejectionSampling::new(max_tries_per_dot)),
            SamplerKind::Triangulated => Box::new(TriangulatedSampling::new()),
        }
    }
}

/// Single-variable choropleth settings.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChoroplethConfig {
    pub class_count: usize,
    pub ramp: Ramp,
    pub stroke: Stroke,
}

impl Default for ChoroplethConfig {
    fn default() -> Self {
        Self {
            class_count: 6,
            ramp: Ramp::from_slice(&ramps::YIELD_GREENS),
            stroke: Stroke::new(Rgb::new(0x55, 0x55, 0x55), 0.5),
        }
    }
}

/// Dot-density settings: production background plus area dots.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DotDensityConfig {
    pub background_class_count: usize,
    pub dot_class_count: usize,
    pub background_ramp: Ramp,
    pub background_stroke: Stroke,
    pub dot_fill: Rgb,
    pub dot_stroke: Stroke,
    /// Radius of a class-0 dot.
    pub dot_base_radius: f64,
    /// Radius added per class.
    pub dot_radius_step: f64,
    pub max_tries_per_dot: usize,
    pub sampler: SamplerKind,
}

impl DotDensityConfig {
    /// Marker radius for dots of class `class_index`.
    pub fn dot_radius(&self, class_index: usize) -> f64 {
        self.dot_base_radius + class_index as f64 * self.dot_radius_step
    }
}

impl Default for DotDensityConfig {
    fn default() -> Self {
        Self {
            background_class_count: 10,
            dot_class_count: 10,
            background_ramp: Ramp::from_slice(&ramps::PRODUCTION_BLUES),
            background_stroke: Stroke::new(Rgb::new(0x55, 0x55, 0x55), 0.5),
            dot_fill: Rgb::new(0x65, 0x43, 0x21),
            dot_stroke: Stroke::new(Rgb::new(0x22, 0x22, 0x22), 0.3),
            dot_base_radius: 2.0,
            dot_radius_step: 0.6,
            max_tries_per_dot: DEFAULT_MAX_TRIES_PER_DOT,
            sampler: SamplerKind::Rejection,
        }
    }
}

/// Bivariate settings: area and production classes blended into one fill.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BivariateConfig {
    pub class_count: usize,
    pub area_ramp: Ramp,
    pub production_ramp: Ramp,
    pub stroke: Stroke,
    /// Fill when neither variable is shown.
    pub neutral: Rgb,
    /// Legend cell fill when neither variable is shown.
    pub legend_neutral: Rgb,
}

impl Default for BivariateConfig {
    fn default() -> Self {
        Self {
            class_count: 5,
            area_ramp: Ramp::from_slice(&ramps::BIVARIATE_AREA),
            production_ramp: Ramp::from_slice(&ramps::BIVARIATE_PRODUCTION),
            stroke: Stroke::new(Rgb::new(0x44, 0x44, 0x44), 0.5),
            neutral: NEUTRAL_GRAY,
            legend_neutral: LEGEND_GRAY,
        }
    }
}

/// Configuration for rendering a panel.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderConfig {
    pub choropleth: ChoroplethConfig,
    pub dot_density: DotDensityConfig,
    pub bivariate: BivariateConfig,
    pub unclassified: UnclassifiedPolicy,
    /// Base seed for per-feature dot placement; `None` draws from the caller's RNG.
    pub seed: Option<u64>,
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_choropleth(mut self, choropleth: ChoroplethConfig) -> Self {
        self.choropleth = choropleth;
        self
    }

    pub fn with_dot_density(mut self, dot_density: DotDensityConfig) -> Self {
        self.dot_density = dot_density;
        self
    }

    pub fn with_bivariate(mut self, bivariate: BivariateConfig) -> Self {
        self.bivariate = bivariate;
        self
    }

    pub fn with_unclassified(mut self, policy: UnclassifiedPolicy) -> Self {
        self.unclassified = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the per-dot retry budget for dot-density sampling.
    pub fn with_max_tries_per_dot(mut self, tries: usize) -> Self {
        self.dot_density.max_tries_per_dot = tries;
        self
    }

    pub fn with_sampler(mut self, sampler: SamplerKind) -> Self {
        self.dot_density.sampler = sampler;
        self
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        check_classes("choropleth", self.choropleth.class_count, &self.choropleth.ramp)?;
        check_classes(
            "dot_density.background",
            self.dot_density.background_class_count,
            &self.dot_density.background_ramp,
        )?;
        if self.dot_density.dot_class_count < 2 {
            return Err(Error::InvalidConfig(
                "dot_density.dot_class_count must be >= 2".into(),
            ));
        }
        if self.dot_density.max_tries_per_dot == 0 {
            return Err(Error::InvalidConfig(
                "dot_density.max_tries_per_dot must be > 0".into(),
            ));
        }
        if !(self.dot_density.dot_base_radius > 0.0) || self.dot_density.dot_radius_step < 0.0 {
            return Err(Error::InvalidConfig(
                "dot radii must be positive and non-decreasing".into(),
            ));
        }
        check_classes(
            "bivariate.area",
            self.bivariate.class_count,
            &self.bivariate.area_ramp,
        )?;
        check_classes(
            "bivariate.production",
            self.bivariate.class_count,
            &self.bivariate.production_ramp,
        )?;
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl RenderConfig {
    /// Parse a JSON config; absent keys keep their defaults.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

fn check_classes(name: &str, class_count: usize, ramp: &Ramp) -> Result<()> {
    if class_count < 2 {
        return Err(Error::InvalidConfig(format!(
            "{name} class_count must be >= 2"
        )));
    }
    if ramp.len() < class_count {
        return Err(Error::InvalidConfig(format!(
            "{name} ramp has {} colors for {class_count} classes",
            ramp.len()
        )));
    }
    Ok(())
}
