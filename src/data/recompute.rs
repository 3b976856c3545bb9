use std::collections::BTreeMap;

use super::chart::{
    ChartError, ProportionChart, ScatterChart, ScatterPoint, Slice, PAYLOAD_OUTCOME_TITLE,
    PERCENT_FAILED, PERCENT_SUCCESS, SELECTED_SITE_TITLE, SITE_SUCCESS_TITLE,
};
use super::filter::{filtered_indices, PayloadRange, SiteSelection};
use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Outcome tally
// ---------------------------------------------------------------------------

/// Success / total counts for a group of launches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeTally {
    pub successes: usize,
    pub total: usize,
}

impl OutcomeTally {
    fn add(&mut self, rec: &LaunchRecord) {
        self.total += 1;
        if rec.outcome.is_success() {
            self.successes += 1;
        }
    }

    pub fn failures(&self) -> usize {
        self.total - self.successes
    }

    /// Mean of the class column; `None` for an empty group.
    pub fn success_rate(&self) -> Option<f64> {
        (self.total > 0).then(|| self.successes as f64 / self.total as f64)
    }
}

/// Tally outcomes per site, keyed by site label in sorted order.
pub fn tally_by_site(dataset: &LaunchDataset) -> BTreeMap<&str, OutcomeTally> {
    let mut tallies: BTreeMap<&str, OutcomeTally> = BTreeMap::new();
    for rec in dataset.records() {
        tallies.entry(rec.site.as_str()).or_default().add(rec);
    }
    tallies
}

// ---------------------------------------------------------------------------
// Site-success chart (driven by the site dropdown)
// ---------------------------------------------------------------------------

/// Build the proportion chart for the current site selection.
///
/// * `All`: one slice per site, valued at that site's success rate.
/// * `Site(s)`: exactly two slices, "Percent Success" then "Percent Failed",
///   each taken from the count of its own outcome class divided by the
///   number of launches from `s`.
///
/// Returns [`ChartError::NoData`] when the selection matches no launches.
pub fn site_success_chart(
    dataset: &LaunchDataset,
    site: &SiteSelection,
) -> Result<ProportionChart, ChartError> {
    match site {
        SiteSelection::All => {
            let slices: Vec<Slice> = tally_by_site(dataset)
                .into_iter()
                .filter_map(|(label, tally)| {
                    tally.success_rate().map(|rate| Slice {
                        label: label.to_string(),
                        value: rate,
                    })
                })
                .collect();
            if slices.is_empty() {
                return Err(ChartError::NoData {
                    site: site.label().to_string(),
                });
            }
            Ok(ProportionChart {
                title: SITE_SUCCESS_TITLE.to_string(),
                slices,
            })
        }
        SiteSelection::Site(label) => {
            let mut tally = OutcomeTally::default();
            for rec in dataset.records().iter().filter(|r| site.matches(&r.site)) {
                tally.add(rec);
            }
            if tally.total == 0 {
                return Err(ChartError::NoData {
                    site: label.clone(),
                });
            }
            let total = tally.total as f64;
            Ok(ProportionChart {
                title: SELECTED_SITE_TITLE.to_string(),
                slices: vec![
                    Slice {
                        label: PERCENT_SUCCESS.to_string(),
                        value: tally.successes as f64 / total,
                    },
                    Slice {
                        label: PERCENT_FAILED.to_string(),
                        value: tally.failures() as f64 / total,
                    },
                ],
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Payload-outcome chart (driven by the dropdown and the range slider)
// ---------------------------------------------------------------------------

/// Build the scatter chart: one point per launch from `site` whose payload
/// lies in `range`. No aggregation; an empty selection gives an empty chart.
pub fn payload_outcome_chart(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> ScatterChart {
    let records = dataset.records();
    let points = filtered_indices(dataset, site, range)
        .into_iter()
        .map(|i| {
            let rec = &records[i];
            ScatterPoint {
                payload_mass_kg: rec.payload_mass_kg,
                outcome_class: rec.outcome.class(),
                booster_category: rec.booster_category.clone(),
                site: rec.site.clone(),
            }
        })
        .collect();

    ScatterChart {
        title: PAYLOAD_OUTCOME_TITLE.to_string(),
        points,
    }
}
