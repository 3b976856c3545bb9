use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::color::ColorMap;
use crate::data::chart::{ChartError, ProportionChart, ScatterChart};
use crate::data::filter::{filtered_indices, PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;
use crate::data::recompute::{payload_outcome_chart, site_success_chart};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Control setters are the recompute triggers: the site dropdown drives both
/// charts, the payload range only the scatter chart.
pub struct AppState {
    /// Read-only launch table, shared with nothing that can mutate it.
    pub dataset: Arc<LaunchDataset>,

    /// File the dataset was loaded from.
    pub source: PathBuf,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Text typed into the dropdown's search field.
    pub site_query: String,

    /// Current slider value.
    pub payload_range: PayloadRange,

    /// Output of the site-success recompute.
    pub site_chart: Result<ProportionChart, ChartError>,

    /// Output of the payload-outcome recompute.
    pub scatter_chart: ScatterChart,

    /// Indices of records behind `scatter_chart` (for the records table).
    pub visible_indices: Vec<usize>,

    /// Colour per booster category.
    pub booster_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether the records table is shown.
    pub show_records: bool,
}

impl AppState {
    pub fn new(dataset: Arc<LaunchDataset>, source: PathBuf) -> Self {
        let site = SiteSelection::default();
        let payload_range = dataset.payload_bounds();
        let site_chart = site_success_chart(&dataset, &site);
        let scatter_chart = payload_outcome_chart(&dataset, &site, &payload_range);
        let visible_indices = filtered_indices(&dataset, &site, &payload_range);
        let booster_colors = ColorMap::new(dataset.booster_categories());

        Self {
            dataset,
            source,
            site,
            site_query: String::new(),
            payload_range,
            site_chart,
            scatter_chart,
            visible_indices,
            booster_colors,
            status_message: None,
            show_records: false,
        }
    }

    /// Swap in a newly loaded dataset and reset the controls to their defaults.
    pub fn set_dataset(&mut self, dataset: Arc<LaunchDataset>, source: PathBuf) {
        let show_records = self.show_records;
        *self = AppState::new(dataset, source);
        self.show_records = show_records;
    }

    /// Dropdown changed: both charts depend on the site.
    pub fn select_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        log::debug!("site selection → {}", site.value());
        self.site = site;
        self.recompute_site_chart();
        self.recompute_scatter();
    }

    /// Slider changed: only the scatter chart depends on the payload range.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        log::debug!("payload range → [{}, {}] kg", range.low, range.high);
        self.payload_range = range;
        self.recompute_scatter();
    }

    /// Restore the slider to the dataset's full payload range.
    pub fn reset_payload_range(&mut self) {
        self.set_payload_range(self.dataset.payload_bounds());
    }

    fn recompute_site_chart(&mut self) {
        self.site_chart = site_success_chart(&self.dataset, &self.site);
        if let Err(e) = &self.site_chart {
            log::warn!("site chart: {e}");
        }
    }

    fn recompute_scatter(&mut self) {
        self.scatter_chart = payload_outcome_chart(&self.dataset, &self.site, &self.payload_range);
        self.visible_indices = filtered_indices(&self.dataset, &self.site, &self.payload_range);
    }

    /// Snapshot of the controls and both chart specifications.
    pub fn chart_export(&self) -> ChartExport<'_> {
        ChartExport {
            source: self.source.display().to_string(),
            site: self.site.value(),
            payload_range: self.payload_range,
            site_chart: self.site_chart.as_ref().ok(),
            site_chart_error: self.site_chart.as_ref().err().map(|e| e.to_string()),
            scatter_chart: &self.scatter_chart,
        }
    }

    /// Write [`AppState::chart_export`] as pretty JSON.
    pub fn export_charts(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.chart_export())
            .context("writing chart export")?;
        writer.flush().context("flushing chart export")?;
        log::info!("Exported charts to {}", path.display());
        Ok(())
    }
}

/// JSON shape written by File → Export charts…
#[derive(Debug, Serialize)]
pub struct ChartExport<'a> {
    pub source: String,
    pub site: &'a str,
    pub payload_range: PayloadRange,
    pub site_chart: Option<&'a ProportionChart>,
    pub site_chart_error: Option<String>,
    pub scatter_chart: &'a ScatterChart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()), PathBuf::from("launches.csv"))
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let st = state();
        assert_eq!(st.site, SiteSelection::All);
        assert_eq!(st.payload_range, PayloadRange::new(500.0, 600.0));
        assert_eq!(st.site_chart.as_ref().unwrap().slices.len(), 2);
        assert_eq!(st.scatter_chart.points.len(), 3);
        assert_eq!(st.visible_indices, vec![0, 1, 2]);
    }

    #[test]
    fn site_change_recomputes_both_charts() {
        let mut st = state();
        st.select_site(SiteSelection::Site("A".into()));

        let pie = st.site_chart.as_ref().unwrap();
        assert_eq!(pie.title, "Success Ratio for Selected Site");
        assert_eq!(st.scatter_chart.points.len(), 2);
        assert_eq!(st.visible_indices, vec![0, 1]);
    }

    #[test]
    fn range_change_leaves_site_chart_alone() {
        let mut st = state();
        let before = st.site_chart.clone();
        st.set_payload_range(PayloadRange::new(0.0, 550.0));

        assert_eq!(st.site_chart, before);
        assert_eq!(st.scatter_chart.points.len(), 2);
        assert_eq!(st.visible_indices, vec![0, 2]);

        st.reset_payload_range();
        assert_eq!(st.scatter_chart.points.len(), 3);
    }

    #[test]
    fn unknown_site_gives_no_data_and_empty_scatter() {
        let mut st = state();
        st.select_site(SiteSelection::Site("Z".into()));
        assert!(matches!(st.site_chart, Err(ChartError::NoData { .. })));
        assert!(st.scatter_chart.is_empty());
    }

    #[test]
    fn export_writes_controls_and_charts() {
        let mut st = state();
        st.select_site(SiteSelection::Site("B".into()));
        let file = tempfile::NamedTempFile::new().unwrap();
        st.export_charts(file.path()).unwrap();

        let text = std::fs::read_to_string(file.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["site"], "B");
        assert_eq!(json["site_chart"]["slices"][0]["label"], "Percent Success");
        assert_eq!(json["site_chart"]["slices"][0]["value"], 1.0);
        assert!(json["site_chart_error"].is_null());
        assert_eq!(json["scatter_chart"]["points"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn replacing_dataset_resets_controls() {
        let mut st = state();
        st.show_records = true;
        st.site_query = "ksc".into();
        st.select_site(SiteSelection::Site("A".into()));
        st.set_dataset(Arc::new(sample_dataset()), PathBuf::from("other.csv"));

        assert_eq!(st.site, SiteSelection::All);
        assert!(st.site_query.is_empty());
        assert!(st.show_records);
        assert_eq!(st.source, PathBuf::from("other.csv"));
    }
}
