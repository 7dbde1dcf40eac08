use eframe::egui::{self, Color32, RichText, ScrollArea, TextEdit, Ui};

use crate::data::model::{Gender, Standard};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – measurement form and saved points
// ---------------------------------------------------------------------------

/// Render the left panel: selection, input form, and the saved-point list.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Measurement");
    ui.separator();

    // ---- Standard / gender selectors ----
    egui::ComboBox::from_label("Standard")
        .selected_text(state.standard.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for standard in Standard::ALL {
                if ui
                    .selectable_label(state.standard == standard, standard.to_string())
                    .clicked()
                {
                    state.set_standard(standard);
                }
            }
        });

    egui::ComboBox::from_label("Gender")
        .selected_text(state.gender.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for gender in Gender::ALL {
                if ui
                    .selectable_label(state.gender == gender, gender.to_string())
                    .clicked()
                {
                    state.set_gender(gender);
                }
            }
        });

    ui.add_space(6.0);

    // ---- Input form ----
    egui::Grid::new("measurement_form")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            ui.label("Age (years)");
            ui.add(TextEdit::singleline(&mut state.age_input).desired_width(80.0));
            ui.end_row();

            ui.label("Height (cm)");
            ui.add(TextEdit::singleline(&mut state.height_input).desired_width(80.0));
            ui.end_row();

            ui.label("Label");
            ui.add(TextEdit::singleline(&mut state.label_input).desired_width(120.0));
            ui.end_row();
        });

    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Plot").clicked() {
            state.plot_clicked();
        }
        let can_save = state.store.current_point().is_some();
        if ui.add_enabled(can_save, egui::Button::new("Save")).clicked() {
            state.save_clicked();
        }
    });

    // ---- Current point readout ----
    if let Some(point) = state.store.current_point() {
        ui.add_space(4.0);
        ui.label(format!(
            "{:.1} y, {:.1} cm → {}",
            point.age_years, point.height, point.percentile
        ));
    }

    ui.add_space(8.0);
    ui.heading("Saved points");
    ui.separator();

    // ---- Saved point list ----
    let saved = state.store.saved_points().to_vec();
    if saved.is_empty() {
        ui.label("No saved points.");
        return;
    }

    let mut delete_id = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for point in &saved {
                ui.horizontal(|ui: &mut Ui| {
                    if ui.small_button("✖").clicked() {
                        delete_id = Some(point.id);
                    }
                    let summary = format!(
                        "{} – {:.1} y, {:.1} cm, {} ({})",
                        point.display_label(),
                        point.age_years,
                        point.height,
                        point.percentile,
                        point.date
                    );
                    ui.label(summary)
                        .on_hover_text(format!("{} / {}", point.standard, point.gender));
                });
            }

            ui.add_space(6.0);
            if ui.button("Clear all").clicked() {
                state.store.clear_all();
            }
        });

    if let Some(id) = delete_id {
        state.store.delete(id);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_data_dir_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        match &state.dataset {
            Some(_) => {
                ui.label(format!(
                    "{} · {} · {} saved points",
                    state.standard,
                    state.gender,
                    state.store.saved_points().len()
                ));
            }
            None => {
                ui.label("No reference data loaded");
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Data folder dialog
// ---------------------------------------------------------------------------

pub fn open_data_dir_dialog(state: &mut AppState) {
    let dir = rfd::FileDialog::new()
        .set_title("Open reference data folder")
        .pick_folder();

    if let Some(dir) = dir {
        match crate::data::loader::load_dir(&dir) {
            Ok(dataset) => {
                log::info!("loaded reference tables from {}", dir.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("failed to load reference data: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
