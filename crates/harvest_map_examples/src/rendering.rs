use std::path::Path;

use anyhow::{bail, Context};
use geo::{BoundingRect, Geometry, Intersects, Point, Rect};
use glam::DVec2;
use harvest_map::color::Rgb;
use harvest_map::feature::FeatureCollection;
use harvest_map::render::LayerGroup;
use harvest_map::style::CircleStyle;
use image::RgbImage;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Output settings for [`render_panels_to_png`].
#[derive(Debug, Clone)]
pub struct PngConfig {
    /// Size of one panel in pixels.
    pub panel_size: (u32, u32),
    pub background: [u8; 3],
    /// Horizontal gap between panels in pixels.
    pub gap: u32,
    /// Margin around the data extent, as a fraction of the panel size.
    pub padding: f64,
}

impl PngConfig {
    pub fn new(panel_size: (u32, u32)) -> Self {
        Self {
            panel_size,
            background: [245, 245, 245],
            gap: 16,
            padding: 0.04,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }
}

/// World-to-pixel mapping that fits a rectangle into a panel, y axis pointing up.
#[derive(Debug, Clone, Copy)]
struct Projection {
    world_min: DVec2,
    scale: f64,
    offset: DVec2,
    height: f64,
}

impl Projection {
    fn fit(bounds: Rect<f64>, size: (u32, u32), padding: f64) -> Self {
        let size_px = DVec2::new(size.0 as f64, size.1 as f64);
        let inner = size_px * (1.0 - 2.0 * padding);
        let extent = DVec2::new(bounds.width(), bounds.height()).max(DVec2::splat(1e-9));
        let scale = (inner / extent).min_element();
        let offset = (size_px - extent * scale) * 0.5;
        Self {
            world_min: DVec2::new(bounds.min().x, bounds.min().y),
            scale,
            offset,
            height: size_px.y,
        }
    }

    fn to_pixel(&self, world: DVec2) -> DVec2 {
        let p = (world - self.world_min) * self.scale + self.offset;
        DVec2::new(p.x, self.height - p.y)
    }

    fn to_world(&self, pixel: DVec2) -> DVec2 {
        let p = DVec2::new(pixel.x, self.height - pixel.y);
        (p - self.offset) / self.scale + self.world_min
    }
}

/// Panel-local raster target at a horizontal offset inside the shared image.
struct PanelCanvas<'a> {
    image: &'a mut RgbImage,
    x0: u32,
    size: (u32, u32),
    projection: Projection,
}

impl PanelCanvas<'_> {
    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if x < 0 || y < 0 || x >= self.size.0 as i64 || y >= self.size.1 as i64 {
            return;
        }
        self.image.put_pixel(
            self.x0 + x as u32,
            y as u32,
            image::Rgb([color.r, color.g, color.b]),
        );
    }

    fn contains(&self, geometry: &Geometry<f64>, x: i64, y: i64) -> bool {
        let w = self
            .projection
            .to_world(DVec2::new(x as f64 + 0.5, y as f64 + 0.5));
        geometry.intersects(&Point::new(w.x, w.y))
    }

    /// Scanline fill over the geometry's pixel bounding box, outlining edge pixels.
    fn fill_region(&mut self, geometry: &Geometry<f64>, fill: Option<Rgb>, stroke: Option<Rgb>) {
        let Some(rect) = geometry.bounding_rect() else {
            return;
        };
        let a = self
            .projection
            .to_pixel(DVec2::new(rect.min().x, rect.min().y));
        let b = self
            .projection
            .to_pixel(DVec2::new(rect.max().x, rect.max().y));
        let (x_min, x_max) = (a.x.min(b.x).floor() as i64, a.x.max(b.x).ceil() as i64);
        let (y_min, y_max) = (a.y.min(b.y).floor() as i64, a.y.max(b.y).ceil() as i64);

        for y in y_min..=y_max {
            for x in x_min..=x_max {
                if !self.contains(geometry, x, y) {
                    continue;
                }
                let edge = stroke.is_some()
                    && [(1, 0), (-1, 0), (0, 1), (0, -1)]
                        .iter()
                        .any(|(dx, dy)| !self.contains(geometry, x + dx, y + dy));
                match (edge, stroke, fill) {
                    (true, Some(s), _) => self.put(x, y, s),
                    (_, _, Some(f)) => self.put(x, y, f),
                    _ => {}
                }
            }
        }
    }

    fn draw_circle(&mut self, center: DVec2, circle: &CircleStyle) {
        let c = self.projection.to_pixel(center);
        let r = circle.radius.max(0.5);
        let outline = circle.stroke.map(|s| (s.color, s.width.max(0.5)));
        let reach = (r + 1.0).ceil() as i64;
        let (cx, cy) = (c.x.round() as i64, c.y.round() as i64);
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let d = DVec2::new(dx as f64, dy as f64).length();
                if d > r {
                    continue;
                }
                let color = match outline {
                    Some((color, width)) if d > r - width => color,
                    _ => circle.fill,
                };
                self.put(cx + dx, cy + dy, color);
            }
        }
    }
}

/// Rasterizes panels side by side into one PNG.
///
/// Every panel shares the extent of `features`; a `None` panel is left blank.
pub fn render_panels_to_png(
    features: &FeatureCollection,
    panels: &[Option<&LayerGroup>],
    config: &PngConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    if panels.is_empty() {
        bail!("no panels to render");
    }
    let Some(bounds) = features.bounds() else {
        bail!("feature collection has no extent");
    };

    let (pw, ph) = config.panel_size;
    let n = panels.len() as u32;
    let width = pw * n + config.gap * (n - 1);
    let mut image = RgbImage::from_pixel(width, ph, image::Rgb(config.background));
    let projection = Projection::fit(bounds, config.panel_size, config.padding);

    for (i, panel) in panels.iter().enumerate() {
        let Some(group) = panel else {
            continue;
        };
        let mut canvas = PanelCanvas {
            image: &mut image,
            x0: i as u32 * (pw + config.gap),
            size: config.panel_size,
            projection,
        };
        for region in &group.regions {
            let feature = &features.features[region.feature_index];
            canvas.fill_region(
                &feature.geometry,
                region.style.fill,
                region.style.stroke.filter(|s| s.width > 0.0).map(|s| s.color),
            );
        }
        for dot in &group.dots {
            if let Some(circle) = &dot.style.circle {
                canvas.draw_circle(DVec2::new(dot.position.x(), dot.position.y()), circle);
            }
        }
    }

    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("Wrote {} ({}x{}).", path.display(), width, ph);
    Ok(())
}

/// Wraps legend fragments into a standalone HTML page.
pub fn legend_page(title: &str, fragments: &[(String, String)]) -> String {
    let mut body = String::new();
    for (heading, html) in fragments {
        body.push_str(&format!(
            "<section><h2>{}</h2>{html}</section>\n",
            harvest_map::format::escape_html(heading)
        ));
    }
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title><style>{LEGEND_CSS}</style></head>\n<body>\n{body}</body></html>\n",
        harvest_map::format::escape_html(title)
    )
}

const LEGEND_CSS: &str = "body{font:13px sans-serif}\
.legend-title{font-weight:bold;margin:6px 0}\
.swatch-row,.dot-swatch{display:flex;align-items:center;gap:6px;margin:2px 0}\
.swatch{display:inline-block;width:18px;height:12px;border:1px solid #999}\
.dot-circle{display:inline-block;border-radius:50%;background:#654321;border:1px solid #222}\
td{width:64px;height:40px;font-size:10px;text-align:center}";
