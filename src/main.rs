mod app;
mod color;
mod data;
mod state;
mod store;
mod ui;

use std::path::Path;

use app::SproutApp;
use eframe::egui;
use state::AppState;
use store::{JsonFileStore, PointStore};

/// Saved measurements live next to the executable's working directory.
const SAVED_POINTS_FILE: &str = "sprout-saved-points.json";

/// Reference tables are looked up here at startup; File → Open can point
/// the app at another folder later.
const DEFAULT_DATA_DIR: &str = "data";

fn main() -> eframe::Result {
    env_logger::init();

    let store = PointStore::new(Box::new(JsonFileStore::new(SAVED_POINTS_FILE)));
    let mut state = AppState::new(store);

    match data::loader::load_dir(Path::new(DEFAULT_DATA_DIR)) {
        Ok(dataset) => {
            log::info!("loaded reference tables from ./{DEFAULT_DATA_DIR}");
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::warn!("no reference data in ./{DEFAULT_DATA_DIR}: {e:#}");
            state.status_message =
                Some("No reference data found – File → Open data folder…".into());
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Sprout – Growth Chart",
        options,
        Box::new(|_cc| Ok(Box::new(SproutApp::new(state)))),
    )
}
