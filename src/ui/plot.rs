use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, Points, Polygon, Text};

use crate::color::generate_palette;
use crate::data::chart::{ProportionChart, ScatterChart};
use crate::state::AppState;

/// Longest arc drawn as one polygon; keeps every piece convex.
const MAX_SECTOR_SWEEP: f64 = FRAC_PI_2;
const ARC_STEPS_PER_TURN: f64 = 128.0;

// ---------------------------------------------------------------------------
// Central panel: proportion chart above scatter chart
// ---------------------------------------------------------------------------

/// Render both charts, splitting the available height between them.
pub fn charts(ui: &mut Ui, state: &AppState) {
    let pie_height = (ui.available_height() * 0.45).max(160.0);

    match &state.site_chart {
        Ok(chart) => proportion_plot(ui, chart, pie_height),
        Err(e) => {
            ui.allocate_ui(egui::vec2(ui.available_width(), pie_height), |ui: &mut Ui| {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading(format!("No data: {e}"));
                });
            });
        }
    }

    ui.separator();
    scatter_plot(ui, &state.scatter_chart, state);
}

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

fn proportion_plot(ui: &mut Ui, chart: &ProportionChart, height: f32) {
    ui.strong(&chart.title);

    let shares = chart.shares();
    if shares.iter().all(|&s| s <= 0.0) {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.label("Every slice is zero: no successful launches in this selection.");
            });
        });
        return;
    }

    let colors = generate_palette(chart.slices.len());

    Plot::new("proportion_plot")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            // Clockwise from twelve o'clock.
            let mut start = FRAC_PI_2;
            for ((slice, &share), &color) in chart.slices.iter().zip(&shares).zip(&colors) {
                if share <= 0.0 {
                    continue;
                }
                let sweep = share * TAU;
                for piece in sector_pieces(start - sweep, sweep) {
                    plot_ui.polygon(
                        Polygon::new(piece)
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start - sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", share * 100.0)).color(Color32::BLACK),
                ));
                start -= sweep;
            }
        });
}

/// Split the sector `[from, from + sweep]` of the unit circle into convex
/// polygons, each starting and ending at the centre.
fn sector_pieces(from: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let n_pieces = (sweep / MAX_SECTOR_SWEEP - 1e-9).ceil().max(1.0) as usize;
    let piece_sweep = sweep / n_pieces as f64;
    let steps = ((piece_sweep / TAU) * ARC_STEPS_PER_TURN).ceil().max(2.0) as usize;

    (0..n_pieces)
        .map(|p| {
            let a0 = from + p as f64 * piece_sweep;
            let mut pts = Vec::with_capacity(steps + 2);
            pts.push([0.0, 0.0]);
            for i in 0..=steps {
                let a = a0 + piece_sweep * i as f64 / steps as f64;
                pts.push([a.cos(), a.sin()]);
            }
            pts
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_plot(ui: &mut Ui, chart: &ScatterChart, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(&chart.title);
        if chart.is_empty() {
            ui.weak("(no launches in this selection)");
        }
    });

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(state.dataset.min_payload())
        .include_x(state.dataset.max_payload())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (booster, points) in chart.series() {
                plot_ui.points(
                    Points::new(points)
                        .name(booster)
                        .color(state.booster_colors.color_for(booster))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}
