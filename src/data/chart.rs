use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

pub const SITE_SUCCESS_TITLE: &str = "Success Rate for Different Sites";
pub const SELECTED_SITE_TITLE: &str = "Success Ratio for Selected Site";
pub const PAYLOAD_OUTCOME_TITLE: &str = "Success by Payload Mass (kg)";

pub const PERCENT_SUCCESS: &str = "Percent Success";
pub const PERCENT_FAILED: &str = "Percent Failed";

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// Pie-style chart: each slice is drawn as `value / total` of the circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl ProportionChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }

    /// Fraction of the circle taken by each slice (all zero if the total is zero).
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        if total <= 0.0 {
            return vec![0.0; self.slices.len()];
        }
        self.slices.iter().map(|s| s.value / total).collect()
    }
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome_class: u8,
    pub booster_category: String,
    pub site: String,
}

/// Outcome vs payload mass, one point per launch, coloured by booster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

impl ScatterChart {
    /// Points grouped by booster category as `[x, y]` pairs, for one plot series each.
    pub fn series(&self) -> BTreeMap<&str, Vec<[f64; 2]>> {
        let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
        for p in &self.points {
            series
                .entry(p.booster_category.as_str())
                .or_default()
                .push([p.payload_mass_kg, f64::from(p.outcome_class)]);
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    /// The selection matched no launches, so no proportion can be formed.
    #[error("no launch records for {site}")]
    NoData { site: String },
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Value of the slice with the given label.
    pub(crate) fn value_of(chart: &ProportionChart, label: &str) -> Option<f64> {
        chart.slices.iter().find(|s| s.label == label).map(|s| s.value)
    }

    fn chart(values: &[(&str, f64)]) -> ProportionChart {
        ProportionChart {
            title: "t".into(),
            slices: values
                .iter()
                .map(|(l, v)| Slice { label: l.to_string(), value: *v })
                .collect(),
        }
    }

    #[test]
    fn shares_are_normalised_by_total() {
        let c = chart(&[("A", 0.5), ("B", 1.0), ("C", 0.5)]);
        assert_eq!(c.total(), 2.0);
        assert_eq!(c.shares(), vec![0.25, 0.5, 0.25]);
        assert_eq!(value_of(&c, "B"), Some(1.0));
        assert_eq!(value_of(&c, "D"), None);
    }

    #[test]
    fn zero_total_gives_zero_shares() {
        let c = chart(&[("A", 0.0), ("B", 0.0)]);
        assert_eq!(c.shares(), vec![0.0, 0.0]);
    }

    #[test]
    fn series_groups_points_by_booster() {
        let point = |x: f64, y: u8, b: &str| ScatterPoint {
            payload_mass_kg: x,
            outcome_class: y,
            booster_category: b.into(),
            site: "A".into(),
        };
        let scatter = ScatterChart {
            title: PAYLOAD_OUTCOME_TITLE.into(),
            points: vec![point(500.0, 1, "FT"), point(600.0, 0, "B4"), point(700.0, 0, "FT")],
        };

        let series = scatter.series();
        assert_eq!(series.keys().copied().collect::<Vec<_>>(), vec!["B4", "FT"]);
        assert_eq!(series["FT"], vec![[500.0, 1.0], [700.0, 0.0]]);
        assert_eq!(series["B4"], vec![[600.0, 0.0]]);
    }

    #[test]
    fn no_data_error_names_the_site() {
        let err = ChartError::NoData { site: "VAFB SLC-4E".into() };
        assert_eq!(err.to_string(), "no launch records for VAFB SLC-4E");
    }
}
