//! Break computation and class lookup for numeric attribute samples.
//!
//! A [`BreakStrategy`] turns a sorted sample into `N + 1` ordered thresholds
//! ([`Breakpoints`]); [`classify`] and [`Breakpoints::class_of`] map a value onto one of
//! the `N` inclusive ranges. Adjacent ranges share their boundary value, and a value
//! that sits exactly on an internal threshold belongs to the lower class.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod equal_interval;
pub mod jenks;
pub mod quantile;

pub use equal_interval::EqualIntervalBreaks;
pub use jenks::JenksBreaks;
pub use quantile::QuantileBreaks;

/// Trait for break computation.
///
/// `sorted` is non-empty, ascending and finite; `class_count` is in `1..=sorted.len()`.
/// Implementations return `class_count + 1` non-decreasing values.
pub trait BreakStrategy: Send + Sync {
    fn breaks(&self, sorted: &[f64], class_count: usize) -> Vec<f64>;
}

/// Outcome of looking a value up in a set of breakpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassIndex {
    /// The value falls into the class with this index.
    Class(usize),
    /// The value is missing, NaN, outside every range, or the breakpoints are too short.
    Unclassified,
}

impl ClassIndex {
    pub fn index(self) -> Option<usize> {
        match self {
            ClassIndex::Class(i) => Some(i),
            ClassIndex::Unclassified => None,
        }
    }

    pub fn is_classified(self) -> bool {
        matches!(self, ClassIndex::Class(_))
    }

    /// Collapse [`ClassIndex::Unclassified`] onto the lowest class.
    #[inline]
    pub fn or_lowest(self) -> usize {
        self.index().unwrap_or(0)
    }
}

/// Ordered class thresholds: `N + 1` values delimiting `N` inclusive classes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>"))]
pub struct Breakpoints(Vec<f64>);

impl Breakpoints {
    /// Validate and wrap a threshold list.
    ///
    /// Requires at least two finite, non-decreasing values.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(Error::InvalidBreaks(format!(
                "need at least 2 thresholds, got {}",
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(Error::InvalidBreaks(format!("non-finite threshold {bad}")));
        }
        if let Some(w) = values.windows(2).find(|w| w[0] > w[1]) {
            return Err(Error::InvalidBreaks(format!(
                "thresholds must be non-decreasing ({} > {})",
                w[0], w[1]
            )));
        }
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Number of classes (`thresholds - 1`).
    pub fn class_count(&self) -> usize {
        self.0.len() - 1
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Inclusive `(low, high)` bounds per class, lowest class first.
    pub fn ranges(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }

    /// Class lookup with an explicit [`ClassIndex::Unclassified`] outcome.
    pub fn class_of(&self, value: Option<f64>) -> ClassIndex {
        lookup(value, &self.0)
    }
}

impl TryFrom<Vec<f64>> for Breakpoints {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Breakpoints::new(values)
    }
}

impl AsRef<[f64]> for Breakpoints {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

/// Class index of `value` in `breaks`, with every miss reported as class 0.
///
/// Returns 0 for a missing or NaN value, for fewer than two thresholds, and for values
/// outside all ranges. Use [`Breakpoints::class_of`] to tell misses apart.
pub fn classify(value: Option<f64>, breaks: &[f64]) -> usize {
    lookup(value, breaks).or_lowest()
}

fn lookup(value: Option<f64>, breaks: &[f64]) -> ClassIndex {
    if breaks.len() < 2 {
        return ClassIndex::Unclassified;
    }
    let Some(v) = value.filter(|v| !v.is_nan()) else {
        return ClassIndex::Unclassified;
    };
    // First match wins, so shared boundaries resolve to the lower class.
    breaks
        .windows(2)
        .position(|w| w[0] <= v && v <= w[1])
        .map_or(ClassIndex::Unclassified, ClassIndex::Class)
}

/// Jenks natural breaks over `values`.
pub fn compute_breaks(values: &[f64], class_count: usize) -> Result<Breakpoints> {
    compute_breaks_with(&JenksBreaks, values, class_count)
}

/// Breaks over `values` using `strategy`.
///
/// Non-finite values are ignored. When fewer values than `class_count` remain, the
/// class count shrinks to the number of values, so a single value yields `[v, v]`.
pub fn compute_breaks_with(
    strategy: &dyn BreakStrategy,
    values: &[f64],
    class_count: usize,
) -> Result<Breakpoints> {
    if class_count < 2 {
        return Err(Error::InvalidConfig(format!(
            "class_count must be >= 2, got {class_count}"
        )));
    }

    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Err(Error::InvalidBreaks(
            "cannot compute breaks over an empty sample".into(),
        ));
    }
    sorted.sort_by(f64::total_cmp);

    let classes = class_count.min(sorted.len());
    Breakpoints::new(strategy.breaks(&sorted, classes))
}
