use std::path::PathBuf;

use chrono::{Local, Utc};
use thiserror::Error;

use crate::data::model::{Gender, MeasurementPoint, ReferenceDataset, Standard};
use crate::data::percentile;

// ---------------------------------------------------------------------------
// Input bounds
// ---------------------------------------------------------------------------

pub const MIN_AGE_YEARS: f64 = 0.0;
pub const MAX_AGE_YEARS: f64 = 18.0;
pub const MIN_HEIGHT_CM: f64 = 30.0;
pub const MAX_HEIGHT_CM: f64 = 200.0;

// ---------------------------------------------------------------------------
// Errors reported by the store
// ---------------------------------------------------------------------------

/// Recoverable outcomes of store operations; the UI renders them as status
/// messages. Persistence failures never surface here, they are logged and
/// swallowed so a broken disk cannot block the in-memory session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no reference data loaded")]
    DatasetUnavailable,
    #[error("{0}")]
    Validation(String),
    #[error("nothing plotted yet")]
    NoCurrentPoint,
}

// ---------------------------------------------------------------------------
// Persistence backend
// ---------------------------------------------------------------------------

/// Where saved points live between sessions. Injected into [`PointStore`]
/// so tests can substitute an in-memory fake.
pub trait PointPersistence {
    /// Read the persisted list. Any failure (missing file, corrupt JSON)
    /// yields an empty list; persistence problems are never fatal.
    fn read_points(&self) -> Vec<MeasurementPoint>;

    /// Write the full list, replacing what was there. Failures are logged
    /// and swallowed.
    fn write_points(&self, points: &[MeasurementPoint]);
}

/// JSON-file backend: the saved points as a pretty-printed array.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }
}

impl PointPersistence for JsonFileStore {
    fn read_points(&self) -> Vec<MeasurementPoint> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("no saved points at {}: {e}", self.path.display());
                return Vec::new();
            }
        };
        match serde_json::from_str(&text) {
            Ok(points) => points,
            Err(e) => {
                log::warn!(
                    "ignoring unreadable saved points at {}: {e}",
                    self.path.display()
                );
                Vec::new()
            }
        }
    }

    fn write_points(&self, points: &[MeasurementPoint]) {
        let json = match serde_json::to_string_pretty(points) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("could not serialize saved points: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            log::warn!("could not write {}: {e}", self.path.display());
        }
    }
}

// ---------------------------------------------------------------------------
// PointStore – the current plot and the saved measurement list
// ---------------------------------------------------------------------------

/// Owns the transient "current" point and the durable saved list.
///
/// Lifecycle of a point: `plot` makes it current (replacing any previous
/// current point), `save` moves it into the saved list, `delete` /
/// `clear_all` remove it. Saved points never become current again.
pub struct PointStore {
    current: Option<MeasurementPoint>,
    saved: Vec<MeasurementPoint>,
    backend: Box<dyn PointPersistence>,
    last_id: i64,
}

impl PointStore {
    /// Construct the store, loading previously saved points from the backend.
    pub fn new(backend: Box<dyn PointPersistence>) -> Self {
        let saved = backend.read_points();
        let last_id = saved.iter().map(|p| p.id).max().unwrap_or(0);
        PointStore {
            current: None,
            saved,
            backend,
            last_id,
        }
    }

    /// Validate a measurement, rank it against the reference curves, and
    /// make it the current point. Returns a copy of the point.
    pub fn plot(
        &mut self,
        dataset: Option<&ReferenceDataset>,
        standard: Standard,
        gender: Gender,
        age_years: f64,
        height: f64,
        label: Option<String>,
    ) -> Result<MeasurementPoint, StoreError> {
        let dataset = dataset.ok_or(StoreError::DatasetUnavailable)?;

        if !age_years.is_finite() || !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&age_years) {
            return Err(StoreError::Validation(format!(
                "age must be between {MIN_AGE_YEARS} and {MAX_AGE_YEARS} years"
            )));
        }
        if !height.is_finite() || !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height) {
            return Err(StoreError::Validation(format!(
                "height must be between {MIN_HEIGHT_CM} and {MAX_HEIGHT_CM} cm"
            )));
        }

        let series = dataset
            .series(standard, gender)
            .ok_or(StoreError::DatasetUnavailable)?;
        let percentile = percentile::estimate(series, standard.scale(), age_years * 12.0, height);

        let point = MeasurementPoint {
            id: self.next_id(),
            label: label.filter(|l| !l.trim().is_empty()),
            standard,
            gender,
            age_years,
            height,
            percentile,
            date: Local::now().format("%Y-%m-%d").to_string(),
        };
        self.current = Some(point.clone());
        Ok(point)
    }

    /// Move the current point into the saved list and persist.
    pub fn save(&mut self) -> Result<MeasurementPoint, StoreError> {
        let point = self.current.take().ok_or(StoreError::NoCurrentPoint)?;
        self.saved.push(point.clone());
        self.backend.write_points(&self.saved);
        Ok(point)
    }

    /// Remove a saved point by id. Unknown ids are a no-op.
    pub fn delete(&mut self, id: i64) {
        let before = self.saved.len();
        self.saved.retain(|p| p.id != id);
        if self.saved.len() != before {
            self.backend.write_points(&self.saved);
        }
    }

    /// Drop the saved list and the current point, and persist the empty list.
    pub fn clear_all(&mut self) {
        self.current = None;
        self.saved.clear();
        self.backend.write_points(&self.saved);
    }

    pub fn current_point(&self) -> Option<&MeasurementPoint> {
        self.current.as_ref()
    }

    pub fn saved_points(&self) -> &[MeasurementPoint] {
        &self.saved
    }

    /// Timestamp-based id, bumped past the previous one when two points are
    /// created within the same millisecond.
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = if now > self.last_id {
            now
        } else {
            self.last_id + 1
        };
        self.last_id
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;

    use super::*;
    use crate::data::model::GrowthSeries;

    /// In-memory backend; the shared handle lets tests inspect what the
    /// store persisted.
    #[derive(Default, Clone)]
    struct MemoryBackend {
        points: Rc<RefCell<Vec<MeasurementPoint>>>,
    }

    impl PointPersistence for MemoryBackend {
        fn read_points(&self) -> Vec<MeasurementPoint> {
            self.points.borrow().clone()
        }

        fn write_points(&self, points: &[MeasurementPoint]) {
            *self.points.borrow_mut() = points.to_vec();
        }
    }

    fn dataset() -> ReferenceDataset {
        let mut tables = BTreeMap::new();
        for standard in Standard::ALL {
            for gender in Gender::ALL {
                let scale = standard.scale();
                let ages = vec![0.0, 216.0];
                let curves = (0..scale.len())
                    .map(|k| vec![40.0 + 5.0 * k as f64, 150.0 + 5.0 * k as f64])
                    .collect();
                tables.insert((standard, gender), GrowthSeries { ages, curves });
            }
        }
        ReferenceDataset::new(tables)
    }

    fn store() -> (PointStore, MemoryBackend) {
        let backend = MemoryBackend::default();
        (PointStore::new(Box::new(backend.clone())), backend)
    }

    #[test]
    fn plot_then_save_moves_the_point() {
        let ds = dataset();
        let (mut store, backend) = store();

        let plotted = store
            .plot(Some(&ds), Standard::WhoCdc, Gender::Boy, 2.0, 88.0, None)
            .unwrap();
        assert_eq!(store.current_point(), Some(&plotted));
        assert!(store.saved_points().is_empty());

        let saved = store.save().unwrap();
        assert_eq!(saved, plotted);
        assert!(store.current_point().is_none());
        assert_eq!(store.saved_points(), &[saved.clone()]);
        assert_eq!(backend.read_points(), vec![saved]);
    }

    #[test]
    fn replot_replaces_the_current_point() {
        let ds = dataset();
        let (mut store, _) = store();

        let first = store
            .plot(Some(&ds), Standard::WhoCdc, Gender::Boy, 2.0, 88.0, None)
            .unwrap();
        let second = store
            .plot(Some(&ds), Standard::WhoCdc, Gender::Girl, 3.0, 95.0, None)
            .unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.current_point(), Some(&second));
        assert!(store.saved_points().is_empty());
    }

    #[test]
    fn save_without_current_point_fails_without_mutation() {
        let (mut store, backend) = store();
        assert_eq!(store.save(), Err(StoreError::NoCurrentPoint));
        assert!(store.saved_points().is_empty());
        assert!(backend.read_points().is_empty());
    }

    #[test]
    fn plot_without_dataset_is_unavailable() {
        let (mut store, _) = store();
        let result = store.plot(None, Standard::WhoCdc, Gender::Boy, 2.0, 88.0, None);
        assert_eq!(result, Err(StoreError::DatasetUnavailable));
        assert!(store.current_point().is_none());
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        let ds = dataset();
        let (mut store, _) = store();

        for (age, height) in [
            (19.0, 100.0),
            (-0.5, 100.0),
            (f64::NAN, 100.0),
            (5.0, 29.9),
            (5.0, 200.1),
            (5.0, f64::INFINITY),
        ] {
            let result = store.plot(Some(&ds), Standard::WhoCdc, Gender::Boy, age, height, None);
            assert!(
                matches!(result, Err(StoreError::Validation(_))),
                "accepted age {age}, height {height}"
            );
            assert!(store.current_point().is_none());
        }

        // Inclusive bounds are all valid.
        for (age, height) in [(0.0, 30.0), (18.0, 200.0)] {
            store
                .plot(Some(&ds), Standard::WhoCdc, Gender::Boy, age, height, None)
                .unwrap();
        }
    }

    #[test]
    fn delete_removes_only_the_matching_id() {
        let ds = dataset();
        let (mut store, backend) = store();

        store
            .plot(Some(&ds), Standard::WhoCdc, Gender::Boy, 2.0, 88.0, None)
            .unwrap();
        let a = store.save().unwrap();
        store
            .plot(Some(&ds), Standard::WhoCdc, Gender::Boy, 4.0, 102.0, None)
            .unwrap();
        let b = store.save().unwrap();

        // Unknown id: no-op, nothing rewritten differently.
        store.delete(a.id + b.id);
        assert_eq!(store.saved_points().len(), 2);

        store.delete(a.id);
        assert_eq!(store.saved_points(), &[b.clone()]);
        assert_eq!(backend.read_points(), vec![b]);
    }

    #[test]
    fn clear_all_empties_everything() {
        let ds = dataset();
        let (mut store, backend) = store();

        store
            .plot(Some(&ds), Standard::Hk2020, Gender::Girl, 1.0, 75.0, None)
            .unwrap();
        store.save().unwrap();
        store
            .plot(Some(&ds), Standard::Hk2020, Gender::Girl, 2.0, 86.0, None)
            .unwrap();

        store.clear_all();
        assert!(store.current_point().is_none());
        assert!(store.saved_points().is_empty());
        assert!(backend.read_points().is_empty());
    }

    #[test]
    fn blank_labels_are_dropped() {
        let ds = dataset();
        let (mut store, _) = store();
        let point = store
            .plot(
                Some(&ds),
                Standard::WhoCdc,
                Gender::Boy,
                2.0,
                88.0,
                Some("   ".into()),
            )
            .unwrap();
        assert_eq!(point.label, None);
    }

    #[test]
    fn saved_points_survive_a_restart() {
        let ds = dataset();
        let backend = MemoryBackend::default();

        let mut store = PointStore::new(Box::new(backend.clone()));
        store
            .plot(Some(&ds), Standard::WhoCdc, Gender::Boy, 2.0, 88.0, Some("a".into()))
            .unwrap();
        let saved = store.save().unwrap();
        drop(store);

        let reopened = PointStore::new(Box::new(backend));
        assert_eq!(reopened.saved_points(), &[saved]);
        assert!(reopened.current_point().is_none());
    }

    #[test]
    fn json_file_backend_round_trips_and_recovers() {
        let ds = dataset();
        let path = std::env::temp_dir().join("sprout-store-test.json");
        let _ = std::fs::remove_file(&path);

        let mut store = PointStore::new(Box::new(JsonFileStore::new(&path)));
        store
            .plot(Some(&ds), Standard::Hk2020, Gender::Boy, 6.0, 115.0, None)
            .unwrap();
        let saved = store.save().unwrap();

        let reopened = PointStore::new(Box::new(JsonFileStore::new(&path)));
        assert_eq!(reopened.saved_points(), &[saved]);

        // Corrupt file: treated as empty, not an error.
        std::fs::write(&path, "{not json").unwrap();
        let recovered = PointStore::new(Box::new(JsonFileStore::new(&path)));
        assert!(recovered.saved_points().is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
