use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SproutApp {
    pub state: AppState,
}

impl SproutApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SproutApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: measurement form ----
        egui::SidePanel::left("measurement_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: growth chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::growth_chart(ui, &self.state);
        });
    }
}
