//! Hover tooltip content for a feature.
use crate::feature::{Feature, Metric};
use crate::format::escape_html;

/// Shown for a missing value.
pub const MISSING: &str = "–";

/// Name plus the three per-year statistics of one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub name: Option<String>,
    pub year: i32,
    pub area: Option<f64>,
    pub production: Option<f64>,
    pub yield_: Option<f64>,
}

impl Tooltip {
    pub fn for_feature(feature: &Feature, year: i32) -> Self {
        Self {
            name: feature.name.clone(),
            year,
            area: feature.metric(Metric::Area, year),
            production: feature.metric(Metric::Production, year),
            yield_: feature.metric(Metric::Yield, year),
        }
    }

    /// `(label, value)` rows, with [`MISSING`] standing in for absent values.
    pub fn rows(&self) -> [(&'static str, String); 3] {
        [
            ("Area", display(self.area)),
            ("Prod", display(self.production)),
            ("Yield", display(self.yield_)),
        ]
    }

    pub fn to_html(&self) -> String {
        let name = self.name.as_deref().map(escape_html).unwrap_or_default();
        let rows: Vec<String> = self
            .rows()
            .iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect();
        format!("<strong>{name}</strong><br/>{}", rows.join("<br/>"))
    }
}

fn display(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_owned(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    #[test]
    fn shows_values_for_year() {
        let feature = Feature::new(Point::new(0.0, 0.0))
            .with_name("Kenya")
            .with_attribute("Area_2020", 1200.0)
            .with_attribute("Prod_2020", 0.0)
            .with_attribute("Yield_2019", 3.5);
        let tip = Tooltip::for_feature(&feature, 2020);
        assert_eq!(
            tip.to_html(),
            "<strong>Kenya</strong><br/>Area: 1200<br/>Prod: 0<br/>Yield: –"
        );
    }

    #[test]
    fn escapes_name_and_handles_missing_name() {
        let feature = Feature::new(Point::new(0.0, 0.0)).with_name("A&B");
        assert!(Tooltip::for_feature(&feature, 2020)
            .to_html()
            .starts_with("<strong>A&amp;B</strong>"));

        let unnamed = Feature::new(Point::new(0.0, 0.0));
        let tip = Tooltip::for_feature(&unnamed, 2020);
        assert_eq!(tip.rows()[0], ("Area", MISSING.to_owned()));
        assert!(tip.to_html().starts_with("<strong></strong>"));
    }
}
