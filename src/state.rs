use crate::color::CurvePalette;
use crate::data::model::{Gender, MeasurementPoint, ReferenceDataset, Standard};
use crate::store::{PointStore, StoreError};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded reference tables (None until a data folder loads).
    pub dataset: Option<ReferenceDataset>,

    /// Active growth standard.
    pub standard: Standard,

    /// Active gender selection.
    pub gender: Gender,

    /// Colours for the active standard's percentile curves.
    pub curve_palette: CurvePalette,

    /// Current + saved measurement points.
    pub store: PointStore,

    /// Raw text of the measurement form.
    pub age_input: String,
    pub height_input: String,
    pub label_input: String,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: PointStore) -> Self {
        let standard = Standard::WhoCdc;
        Self {
            dataset: None,
            standard,
            gender: Gender::Boy,
            curve_palette: CurvePalette::new(standard.scale()),
            store,
            age_input: String::new(),
            height_input: String::new(),
            label_input: String::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset.
    pub fn set_dataset(&mut self, dataset: ReferenceDataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Switch standard and rebuild the curve palette.
    pub fn set_standard(&mut self, standard: Standard) {
        self.standard = standard;
        self.curve_palette = CurvePalette::new(standard.scale());
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.gender = gender;
    }

    /// Saved points shown on the chart: only those recorded against the
    /// active standard and gender.
    pub fn visible_saved_points(&self) -> Vec<&MeasurementPoint> {
        self.store
            .saved_points()
            .iter()
            .filter(|p| p.standard == self.standard && p.gender == self.gender)
            .collect()
    }

    /// Parse the form and plot a current point.
    pub fn plot_clicked(&mut self) {
        let age_years = match self.age_input.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.status_message = Some("Age must be a number of years".into());
                return;
            }
        };
        let height = match self.height_input.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.status_message = Some("Height must be a number of cm".into());
                return;
            }
        };
        let label = Some(self.label_input.clone());

        match self.store.plot(
            self.dataset.as_ref(),
            self.standard,
            self.gender,
            age_years,
            height,
            label,
        ) {
            Ok(point) => {
                self.status_message = None;
                log::info!(
                    "plotted {:.2} y / {:.1} cm → {}",
                    point.age_years,
                    point.height,
                    point.percentile
                );
            }
            Err(e) => self.report(e),
        }
    }

    /// Move the current point into the saved list.
    pub fn save_clicked(&mut self) {
        match self.store.save() {
            Ok(point) => {
                self.status_message = None;
                log::info!("saved point {} ({})", point.id, point.percentile);
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: StoreError) {
        self.status_message = Some(error.to_string());
    }
}
