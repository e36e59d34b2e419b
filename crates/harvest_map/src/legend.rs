//! Legend model shared by every render mode, plus its HTML rendering.
//!
//! Each mode contributes one or more [`LegendSection`]s built from the same breakpoints
//! and ramps that styled the map, so legend and map can never disagree.
use std::fmt::Write as _;

use crate::classify::Breakpoints;
use crate::color::{Ramp, Rgb};
use crate::format::{escape_html, px, range_label};
use crate::render::config::{BivariateConfig, DotDensityConfig};
use crate::render::Toggles;

/// One legend block.
#[derive(Debug, Clone, PartialEq)]
pub enum LegendSection {
    /// Color swatches, lowest class first.
    ColorScale {
        title: String,
        rows: Vec<(Rgb, String)>,
    },
    /// Dot diameters in pixels, smallest first.
    DotScale {
        title: String,
        rows: Vec<(f64, String)>,
    },
    /// Bivariate grid; the first row holds the highest area class.
    ///
    /// Always at least `class_count` square. Classes that a short sample could not
    /// fill keep their ramp color and carry no label.
    BivariateMatrix {
        title: String,
        cells: Vec<Vec<MatrixCell>>,
    },
}

/// A bivariate legend cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixCell {
    pub color: Rgb,
    /// Range labels shown in the cell, area first.
    pub lines: Vec<String>,
}

/// Legend for one panel.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Legend {
    pub sections: Vec<LegendSection>,
}

impl Legend {
    pub fn new(sections: Vec<LegendSection>) -> Self {
        Self { sections }
    }

    /// Whether the area/production toggles apply to this legend.
    pub fn uses_toggles(&self) -> bool {
        self.sections
            .iter()
            .any(|s| matches!(s, LegendSection::BivariateMatrix { .. }))
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            section.write_html(&mut out);
        }
        out
    }
}

impl LegendSection {
    fn write_html(&self, out: &mut String) {
        match self {
            LegendSection::ColorScale { title, rows } => {
                write_title(out, title);
                out.push_str(r#"<div class="color-legend">"#);
                for (color, label) in rows {
                    let _ = write!(
                        out,
                        r#"<div class="swatch-row"><span class="swatch" style="background:{color}"></span>{}</div>"#,
                        escape_html(label)
                    );
                }
                out.push_str("</div>");
            }
            LegendSection::DotScale { title, rows } => {
                write_title(out, title);
                out.push_str(r#"<div class="dot-legend">"#);
                for (diameter, label) in rows {
                    let d = px(*diameter);
                    let _ = write!(
                        out,
                        r#"<div class="dot-swatch"><span class="dot-circle" style="width:{d}px;height:{d}px;"></span>{}</div>"#,
                        escape_html(label)
                    );
                }
                out.push_str("</div>");
            }
            LegendSection::BivariateMatrix { title, cells } => {
                write_title(out, title);
                out.push_str("<table>");
                for row in cells {
                    out.push_str("<tr>");
                    for cell in row {
                        let text: Vec<String> = cell.lines.iter().map(|l| escape_html(l)).collect();
                        let _ = write!(
                            out,
                            r#"<td style="background-color:{}">{}</td>"#,
                            cell.color,
                            text.join("<br>")
                        );
                    }
                    out.push_str("</tr>");
                }
                out.push_str("</table>");
            }
        }
    }
}

fn write_title(out: &mut String, title: &str) {
    let _ = write!(
        out,
        r#"<div class="legend-title">{}</div>"#,
        escape_html(title)
    );
}

/// Swatch per class of `breaks`, colored from `ramp`.
pub fn color_scale(title: impl Into<String>, breaks: &Breakpoints, ramp: &Ramp) -> LegendSection {
    LegendSection::ColorScale {
        title: title.into(),
        rows: breaks
            .ranges()
            .enumerate()
            .map(|(i, (lo, hi))| (ramp.color(i), range_label(lo, hi)))
            .collect(),
    }
}

/// Dot swatch per class of `breaks`, sized like the map's dots.
pub fn dot_scale(
    title: impl Into<String>,
    breaks: &Breakpoints,
    config: &DotDensityConfig,
) -> LegendSection {
    LegendSection::DotScale {
        title: title.into(),
        rows: breaks
            .ranges()
            .enumerate()
            .map(|(i, (lo, hi))| (config.dot_radius(i) * 2.0, range_label(lo, hi)))
            .collect(),
    }
}

/// Area × production grid, highest area class in the first row.
pub fn bivariate_matrix(
    area: &Breakpoints,
    production: &Breakpoints,
    toggles: Toggles,
    config: &BivariateConfig,
) -> LegendSection {
    let area_labels: Vec<String> = area.ranges().map(|(lo, hi)| range_label(lo, hi)).collect();
    let prod_labels: Vec<String> = production
        .ranges()
        .map(|(lo, hi)| range_label(lo, hi))
        .collect();

    let rows = area_labels.len().max(config.class_count);
    let cols = prod_labels.len().max(config.class_count);

    let cells = (0..rows)
        .rev()
        .map(|r| {
            (0..cols)
                .map(|c| {
                    let color = toggles
                        .fill(config.area_ramp.color(r), config.production_ramp.color(c))
                        .unwrap_or(config.legend_neutral);
                    let mut lines = Vec::new();
                    if let (true, Some(label)) = (toggles.show_area, area_labels.get(r)) {
                        lines.push(label.clone());
                    }
                    if let (true, Some(label)) = (toggles.show_production, prod_labels.get(c)) {
                        lines.push(label.clone());
                    }
                    MatrixCell { color, lines }
                })
                .collect()
        })
        .collect();

    LegendSection::BivariateMatrix {
        title: "Bivariate Matrix".into(),
        cells,
    }
}
