use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::{matching_sites, PayloadRange, SiteSelection, ALL_SITES_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – control widgets
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown, payload range, legend.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            site_dropdown(ui, state);
            ui.separator();

            payload_slider(ui, state);
            ui.separator();

            // ---- Booster legend ----
            ui.strong("Booster Version Category");
            for (label, color) in state.booster_colors.legend_entries() {
                ui.label(RichText::new(format!("● {label}")).color(color));
            }
        });
}

fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Launch Site");

    let mut selected = state.site.clone();
    let selected_text = selected.label().to_string();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(egui::TextEdit::singleline(&mut state.site_query).hint_text("Launch Site"));
            ui.selectable_value(&mut selected, SiteSelection::All, ALL_SITES_LABEL);
            for site in matching_sites(state.dataset.sites(), &state.site_query) {
                ui.selectable_value(&mut selected, SiteSelection::Site(site.clone()), site);
            }
        });

    state.select_site(selected);
}

/// Two-handle range as a pair of sliders; dragging one handle past the other
/// pushes it along so the range never inverts.
fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Payload range (kg)");

    let bounds = state.dataset.payload_bounds();
    let PayloadRange { mut low, mut high } = state.payload_range;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, bounds.low..=bounds.high).text("Min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, bounds.low..=bounds.high).text("Max"))
        .changed();

    if low_changed && low > high {
        high = low;
    } else if high_changed && high < low {
        low = high;
    }

    if ui.small_button("Reset range").clicked() {
        state.reset_payload_range();
    } else if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high).clamped_to(&bounds));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export charts…").clicked() {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} launches loaded, {} in view",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        ui.separator();

        if ui.selectable_label(state.show_records, "Records").clicked() {
            state.show_records = !state.show_records;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} across sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                state.set_dataset(Arc::new(dataset), path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart data")
        .add_filter("JSON", &["json"])
        .set_file_name("launch_charts.json")
        .save_file();

    if let Some(path) = file {
        match state.export_charts(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
