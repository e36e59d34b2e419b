//! Feature model and GeoJSON loading.
//!
//! A [`Feature`] is a geometry plus numeric per-year attributes named
//! `<prefix>_<year>` (see [`Metric`]). Non-numeric and non-finite property values are
//! treated as missing, the same as an absent property.
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use geo::{BoundingRect, Geometry, Intersects, Point, Rect};
use geojson::GeoJson;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Property keys tried, in order, for a feature's display name.
pub const NAME_PROPERTIES: [&str; 2] = ["Country", "ADMIN"];

/// The per-year statistics carried by each feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    /// Area harvested.
    Area,
    /// Production quantity.
    Production,
    /// Yield per unit area.
    Yield,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Area, Metric::Production, Metric::Yield];

    /// Attribute-name prefix, e.g. `Prod` for `Prod_2020`.
    pub fn prefix(self) -> &'static str {
        match self {
            Metric::Area => "Area",
            Metric::Production => "Prod",
            Metric::Yield => "Yield",
        }
    }

    /// Attribute name holding this metric for `year`.
    pub fn field(self, year: i32) -> String {
        format!("{}_{year}", self.prefix())
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.prefix() == prefix)
    }
}

/// A region geometry with its numeric attributes.
#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    pub name: Option<String>,
    attributes: BTreeMap<String, f64>,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: geometry.into(),
            name: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a numeric attribute; non-finite values are ignored.
    pub fn with_attribute(mut self, field: impl Into<String>, value: f64) -> Self {
        if value.is_finite() {
            self.attributes.insert(field.into(), value);
        }
        self
    }

    /// Numeric value of `field`, `None` when missing.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.attributes.get(field).copied()
    }

    pub fn metric(&self, metric: Metric, year: i32) -> Option<f64> {
        self.get(&metric.field(year))
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, f64)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn from_geojson_feature(feature: geojson::Feature) -> Result<Option<Self>> {
        let Some(geometry) = feature.geometry else {
            return Ok(None);
        };
        let geometry: Geometry<f64> = geometry.value.try_into()?;
        let mut out = Feature::new(geometry);

        if let Some(props) = feature.properties {
            out.name = NAME_PROPERTIES
                .iter()
                .find_map(|key| {
                    props
                        .get(*key)
                        .and_then(|v| v.as_str())
                        .filter(|s| !s.is_empty())
                })
                .map(str::to_owned);
            for (key, value) in props {
                match value.as_f64() {
                    Some(v) if v.is_finite() => {
                        out.attributes.insert(key, v);
                    }
                    _ => {}
                }
            }
        }
        Ok(Some(out))
    }
}

/// The loaded feature set shared by both map panels.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn from_geojson_str(text: &str) -> Result<Self> {
        let geojson: GeoJson = text.parse()?;
        Self::from_geojson(geojson)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_geojson(GeoJson::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let collection = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} features from '{}'.",
            collection.len(),
            path.display()
        );
        Ok(collection)
    }

    /// Convert a parsed document; accepts a `FeatureCollection` or a single `Feature`.
    pub fn from_geojson(geojson: GeoJson) -> Result<Self> {
        let raw = match geojson {
            GeoJson::FeatureCollection(fc) => fc.features,
            GeoJson::Feature(f) => vec![f],
            GeoJson::Geometry(_) => {
                return Err(Error::Other(
                    "expected a Feature or FeatureCollection, found a bare Geometry".into(),
                ))
            }
        };

        let total = raw.len();
        let mut features = Vec::with_capacity(total);
        for f in raw {
            if let Some(feature) = Feature::from_geojson_feature(f)? {
                features.push(feature);
            }
        }
        if features.len() < total {
            warn!(
                "Skipped {} of {} features without geometry.",
                total - features.len(),
                total
            );
        }
        debug!("Converted {} features.", features.len());
        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// All numeric values of `field`, in feature order, skipping missing ones.
    pub fn values(&self, field: &str) -> Vec<f64> {
        self.features.iter().filter_map(|f| f.get(field)).collect()
    }

    /// Like [`FeatureCollection::values`], failing with [`Error::EmptySample`] when no
    /// feature has a numeric value for `field`.
    pub fn require_values(&self, field: &str) -> Result<Vec<f64>> {
        let values = self.values(field);
        if values.is_empty() {
            return Err(Error::EmptySample {
                field: field.to_owned(),
            });
        }
        Ok(values)
    }

    /// Years that appear in any `Area_`/`Prod_`/`Yield_` attribute, ascending.
    pub fn years(&self) -> Vec<i32> {
        let mut years = BTreeSet::new();
        for feature in &self.features {
            for key in feature.attributes.keys() {
                let Some((prefix, year)) = key.split_once('_') else {
                    continue;
                };
                if Metric::from_prefix(prefix).is_none() {
                    continue;
                }
                if let Ok(year) = year.parse::<i32>() {
                    years.insert(year);
                }
            }
        }
        years.into_iter().collect()
    }

    /// Topmost (last drawn) feature whose geometry touches `point`.
    pub fn feature_at(&self, point: Point<f64>) -> Option<&Feature> {
        self.features
            .iter()
            .rev()
            .find(|f| f.geometry.intersects(&point))
    }

    /// Bounding rectangle of every geometry, `None` when nothing has an extent.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    (a.min().x.min(b.min().x), a.min().y.min(b.min().y)),
                    (a.max().x.max(b.max().x), a.max().y.max(b.max().y)),
                )
            })
    }
}

impl<'a> IntoIterator for &'a FeatureCollection {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
