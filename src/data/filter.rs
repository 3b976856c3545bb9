use serde::{Deserialize, Serialize};

use super::model::LaunchDataset;

/// Dropdown value meaning "no site filter".
pub const ALL_SITES_VALUE: &str = "ALL";
/// Dropdown label shown for [`SiteSelection::All`].
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// Site selection (dropdown value)
// ---------------------------------------------------------------------------

/// Current value of the launch-site dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// The dropdown value (`"ALL"` or the exact site label).
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_VALUE,
            SiteSelection::Site(site) => site,
        }
    }

    /// Text shown in the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_LABEL,
            SiteSelection::Site(site) => site,
        }
    }

    /// Whether a record launched from `site` passes this selection.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(selected) => selected == site,
        }
    }
}

/// Sites whose label contains `query`, ignoring case; an empty query keeps all.
pub fn matching_sites<'a>(sites: &'a [String], query: &str) -> Vec<&'a String> {
    let query = query.trim().to_lowercase();
    sites
        .iter()
        .filter(|site| query.is_empty() || site.to_lowercase().contains(&query))
        .collect()
}

// ---------------------------------------------------------------------------
// Payload range (slider value)
// ---------------------------------------------------------------------------

/// Inclusive payload-mass interval in kg. A range with `low > high` is
/// empty rather than swapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }

    /// Clamp both ends into `bounds`, keeping `low <= high`.
    pub fn clamped_to(&self, bounds: &PayloadRange) -> Self {
        let low = self.low.clamp(bounds.low, bounds.high);
        let high = self.high.clamp(bounds.low, bounds.high);
        PayloadRange::new(low.min(high), high.max(low))
    }
}

/// Return indices of records launched from `site` with payload in `range`,
/// in dataset order.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg) && site.matches(&rec.site))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    #[test]
    fn dropdown_value_and_label() {
        assert_eq!(SiteSelection::All.value(), "ALL");
        assert_eq!(SiteSelection::Site("KSC LC-39A".into()).value(), "KSC LC-39A");
        assert_eq!(SiteSelection::All.label(), "All Sites");
        assert_eq!(SiteSelection::default(), SiteSelection::All);
    }

    #[test]
    fn site_match_is_exact() {
        let sel = SiteSelection::Site("CCAFS LC-40".into());
        assert!(sel.matches("CCAFS LC-40"));
        assert!(!sel.matches("CCAFS SLC-40"));
        assert!(!sel.matches("ccafs lc-40"));
        assert!(SiteSelection::All.matches("anything"));
    }

    #[test]
    fn site_search_is_case_insensitive_substring() {
        let sites: Vec<String> = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        assert_eq!(matching_sites(&sites, "").len(), 4);
        assert_eq!(matching_sites(&sites, "  slc "), vec!["CCAFS SLC-40", "VAFB SLC-4E"]);
        assert_eq!(matching_sites(&sites, "ksc"), vec!["KSC LC-39A"]);
        assert!(matching_sites(&sites, "Boca Chica").is_empty());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let range = PayloadRange::new(500.0, 600.0);
        assert!(range.contains(500.0));
        assert!(range.contains(600.0));
        assert!(!range.contains(499.9));
        assert!(!range.contains(600.1));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let range = PayloadRange::new(600.0, 500.0);
        assert!(!range.contains(550.0));
        assert!(!range.contains(500.0));
    }

    #[test]
    fn clamping_keeps_range_inside_bounds() {
        let bounds = PayloadRange::new(0.0, 10_000.0);
        let clamped = PayloadRange::new(-50.0, 12_000.0).clamped_to(&bounds);
        assert_eq!(clamped, bounds);

        let clamped = PayloadRange::new(8_000.0, 3_000.0).clamped_to(&bounds);
        assert_eq!(clamped, PayloadRange::new(3_000.0, 8_000.0));
    }

    #[test]
    fn filtered_indices_applies_both_predicates() {
        let ds = sample_dataset();
        let all = ds.payload_bounds();

        assert_eq!(filtered_indices(&ds, &SiteSelection::All, &all), vec![0, 1, 2]);
        assert_eq!(
            filtered_indices(&ds, &SiteSelection::Site("A".into()), &all),
            vec![0, 1]
        );
        assert_eq!(
            filtered_indices(&ds, &SiteSelection::All, &PayloadRange::new(0.0, 550.0)),
            vec![0, 2]
        );
        assert!(filtered_indices(&ds, &SiteSelection::Site("Z".into()), &all).is_empty());
    }
}
