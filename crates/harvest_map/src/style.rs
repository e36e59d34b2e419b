//! Declarative styles handed to the renderer.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// Outline color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Stroke {
    pub color: Rgb,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgb, width: f64) -> Self {
        Self { color, width }
    }
}

/// A filled, optionally outlined circle drawn at a point.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CircleStyle {
    pub radius: f64,
    pub fill: Rgb,
    pub stroke: Option<Stroke>,
}

/// Style for one rendered feature or dot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Style {
    pub fill: Option<Rgb>,
    pub stroke: Option<Stroke>,
    pub circle: Option<CircleStyle>,
}

impl Style {
    /// Area fill with an outline.
    pub fn polygon(fill: Rgb, stroke: Stroke) -> Self {
        Self {
            fill: Some(fill),
            stroke: Some(stroke),
            circle: None,
        }
    }

    /// Point marker.
    pub fn circle(circle: CircleStyle) -> Self {
        Self {
            fill: None,
            stroke: None,
            circle: Some(circle),
        }
    }
}
