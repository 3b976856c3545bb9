use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let records = state.dataset.records();

    ui.strong(format!("Launch records ({})", state.visible_indices.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in ["Launch Site", "Payload Mass (kg)", "Booster Version Category", "Outcome"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = &records[state.visible_indices[row.index()]];
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    let color = state.booster_colors.color_for(&rec.booster_category);
                    ui.label(RichText::new(&rec.booster_category).color(color));
                });
                row.col(|ui| {
                    ui.label(rec.outcome.to_string());
                });
            });
        });
}
