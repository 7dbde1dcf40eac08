use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::percentile;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Growth chart (central panel)
// ---------------------------------------------------------------------------

/// Render the percentile curves and measurement points for the active
/// standard/gender selection.
pub fn growth_chart(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a reference data folder to view curves  (File → Open…)");
        });
        return;
    };

    let Some(series) = dataset.series(state.standard, state.gender) else {
        return;
    };
    let scale = state.standard.scale();

    Plot::new("growth_chart")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Age (years)")
        .y_axis_label("Height (cm)")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // ---- Reference curves ----
            for ((&label, &value), curve) in scale
                .labels
                .iter()
                .zip(scale.values.iter())
                .zip(series.curves.iter())
            {
                let points: PlotPoints = series
                    .ages
                    .iter()
                    .zip(curve.iter())
                    .map(|(&months, &height)| [months / 12.0, height])
                    .collect();

                let line = Line::new(points)
                    .name(percentile::ordinal(value))
                    .color(state.curve_palette.color_for(label))
                    .width(state.curve_palette.width_for(label));

                plot_ui.line(line);
            }

            // ---- Saved points for this standard/gender ----
            for point in state.visible_saved_points() {
                let marker = Points::new(vec![[point.age_years, point.height]])
                    .name(format!("{} ({})", point.display_label(), point.percentile))
                    .color(Color32::WHITE)
                    .radius(4.0);
                plot_ui.points(marker);
            }

            // ---- Current (unsaved) point ----
            if let Some(point) = state.store.current_point() {
                if point.standard == state.standard && point.gender == state.gender {
                    let marker = Points::new(vec![[point.age_years, point.height]])
                        .name(format!("Current ({})", point.percentile))
                        .color(Color32::GOLD)
                        .radius(6.0);
                    plot_ui.points(marker);
                }
            }
        });
}
