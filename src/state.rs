use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

use student_performance::data::export;
use student_performance::data::filter::{filtered_indices, init_filter_state, FilterState};
use student_performance::data::loader;
use student_performance::data::model::{CategoricalField, ScoreField, StudentDataset, StudentRecord};
use student_performance::{ArtifactPaths, Predictor, RawRecord};

// ---------------------------------------------------------------------------
// Prediction form
// ---------------------------------------------------------------------------

/// Values entered in the "Predict Total Score" form.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionForm {
    pub gender: String,
    pub race_ethnicity: String,
    pub test_preparation: String,
    pub math: u32,
    pub reading: u32,
    pub writing: u32,
    /// Last prediction, cleared whenever an input changes.
    pub result: Option<f64>,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            gender: String::new(),
            race_ethnicity: String::new(),
            test_preparation: String::new(),
            math: 50,
            reading: 50,
            writing: 50,
            result: None,
        }
    }
}

impl PredictionForm {
    /// Fresh form whose dropdowns start on each column's first value.
    pub fn for_dataset(dataset: &StudentDataset) -> Self {
        let first = |field| dataset.categories(field).into_iter().next().unwrap_or_default();
        Self {
            gender: first(CategoricalField::Gender),
            race_ethnicity: first(CategoricalField::RaceEthnicity),
            test_preparation: first(CategoricalField::TestPreparation),
            ..Default::default()
        }
    }

    pub fn category_mut(&mut self, field: CategoricalField) -> Option<&mut String> {
        match field {
            CategoricalField::Gender => Some(&mut self.gender),
            CategoricalField::RaceEthnicity => Some(&mut self.race_ethnicity),
            CategoricalField::TestPreparation => Some(&mut self.test_preparation),
            CategoricalField::ParentalEducation | CategoricalField::Lunch => None,
        }
    }

    pub fn score_mut(&mut self, field: ScoreField) -> &mut u32 {
        match field {
            ScoreField::Math => &mut self.math,
            ScoreField::Reading => &mut self.reading,
            ScoreField::Writing => &mut self.writing,
        }
    }

    /// The six form inputs as a raw record. Parental education and lunch are
    /// not asked for and therefore encode as all-zero indicators.
    pub fn to_raw_record(&self) -> RawRecord {
        RawRecord::new()
            .with_category(CategoricalField::Gender, self.gender.clone())
            .with_category(CategoricalField::RaceEthnicity, self.race_ethnicity.clone())
            .with_category(CategoricalField::TestPreparation, self.test_preparation.clone())
            .with_score(ScoreField::Math, f64::from(self.math.min(100)))
            .with_score(ScoreField::Reading, f64::from(self.reading.min(100)))
            .with_score(ScoreField::Writing, f64::from(self.writing.min(100)))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Where the dataset and artifacts were loaded from.
    pub paths: ArtifactPaths,

    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<StudentDataset>,

    /// Fitted model and its frozen columns (None if the artifacts are missing).
    pub predictor: Option<Predictor>,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of students passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Prediction form inputs and last result.
    pub form: PredictionForm,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the dataset and artifacts named by `paths`. Failures are logged and
    /// surfaced in `status_message`; whatever did load stays usable.
    pub fn load(paths: ArtifactPaths) -> Self {
        let mut state = AppState {
            paths,
            ..Default::default()
        };
        let dataset_path = state.paths.dataset.clone();
        state.open_dataset(&dataset_path);
        state.reload_artifacts();
        state
    }

    /// Ingest a newly loaded dataset, initialise filters and the form.
    pub fn set_dataset(&mut self, dataset: StudentDataset) {
        self.filters = init_filter_state(&dataset);
        self.visible_indices = (0..dataset.len()).collect();
        self.form = PredictionForm::for_dataset(&dataset);
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a dataset file, replacing the current one on success.
    pub fn open_dataset(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                log::info!("Loaded {} students from {}", dataset.len(), path.display());
                self.paths.dataset = path.to_path_buf();
                self.set_dataset(dataset);
            }
            Err(e) => self.report_error(anyhow::Error::new(e).context("loading dataset")),
        }
    }

    /// (Re)read the model and column artifacts.
    pub fn reload_artifacts(&mut self) {
        match Predictor::load(&self.paths.model, &self.paths.columns) {
            Ok(predictor) => {
                log::info!(
                    "Loaded model ({} trees, {} columns) from {}",
                    predictor.model().n_trees(),
                    predictor.columns().len(),
                    self.paths.model.display()
                );
                self.predictor = Some(predictor);
            }
            Err(e) => {
                self.predictor = None;
                self.report_error(anyhow::Error::new(e).context("loading model artifacts"));
            }
        }
    }

    pub fn report_error(&mut self, err: anyhow::Error) {
        log::error!("{err:#}");
        self.status_message = Some(format!("Error: {err:#}"));
    }

    /// Recompute `visible_indices` after filter change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.filters);
        }
    }

    /// Students passing the current filters, in file order.
    pub fn visible_records(&self) -> impl Iterator<Item = &StudentRecord> + '_ {
        let records = self.dataset.as_ref().map(|ds| ds.records.as_slice()).unwrap_or(&[]);
        self.visible_indices.iter().filter_map(move |&i| records.get(i))
    }

    /// Toggle a single value in a column's filter.
    pub fn toggle_filter_value(&mut self, field: CategoricalField, value: &str) {
        let selected = self.filters.entry(field).or_default();
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select all values in a column.
    pub fn select_all(&mut self, field: CategoricalField) {
        if let Some(all_vals) = self.dataset.as_ref().and_then(|ds| ds.unique_values.get(&field)) {
            self.filters.insert(field, all_vals.clone());
            self.refilter();
        }
    }

    /// Deselect all values in a column.
    pub fn select_none(&mut self, field: CategoricalField) {
        self.filters.insert(field, BTreeSet::new());
        self.refilter();
    }

    /// Run the form through the model and store the prediction.
    pub fn predict(&mut self) -> Result<f64> {
        let predictor = self.predictor.as_ref().context("no model loaded")?;
        let value = predictor
            .predict(&self.form.to_raw_record())
            .context("predicting total score")?;
        log::info!("Predicted total score {value:.2} for {:?}", self.form);
        self.form.result = Some(value);
        Ok(value)
    }

    /// Write the filtered students to `path`.
    pub fn export_filtered(&self, path: &Path) -> Result<usize> {
        export::export_file(path, self.visible_records())
            .with_context(|| format!("exporting to {}", path.display()))?;
        log::info!("Exported {} students to {}", self.visible_indices.len(), path.display());
        Ok(self.visible_indices.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use student_performance::{trainer, TrainerConfig};

    const SAMPLE: &str = "\
gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score
female,group B,bachelor's degree,standard,none,72,72,74
female,group C,some college,standard,completed,69,90,88
male,group A,associate's degree,free/reduced,none,47,57,44
male,group B,high school,standard,completed,76,78,75
female,group D,some college,free/reduced,none,40,43,39
";

    fn state() -> AppState {
        let dataset = loader::load_reader(SAMPLE.as_bytes()).unwrap();
        let mut state = AppState::default();
        state.set_dataset(dataset);
        state
    }

    #[test]
    fn toggling_filters_updates_visible_rows() {
        let mut state = state();
        assert_eq!(state.visible_indices.len(), 5);

        state.toggle_filter_value(CategoricalField::Gender, "male");
        assert_eq!(state.visible_indices, vec![0, 1, 4]);

        state.select_none(CategoricalField::TestPreparation);
        assert!(state.visible_indices.is_empty());

        state.select_all(CategoricalField::TestPreparation);
        state.toggle_filter_value(CategoricalField::Gender, "male");
        assert_eq!(state.visible_records().count(), 5);
    }

    #[test]
    fn form_defaults_to_first_categories() {
        let state = state();
        assert_eq!(state.form.gender, "female");
        assert_eq!(state.form.race_ethnicity, "group A");
        assert_eq!(state.form.test_preparation, "completed");
        assert_eq!((state.form.math, state.form.reading, state.form.writing), (50, 50, 50));
    }

    #[test]
    fn predict_without_model_is_an_error() {
        let mut state = state();
        assert!(state.predict().is_err());
        assert!(state.form.result.is_none());
    }

    #[test]
    fn predict_with_model_stores_result() {
        let mut state = state();
        let cfg = TrainerConfig {
            n_estimators: 10,
            ..Default::default()
        };
        let report = trainer::train(state.dataset.as_ref().unwrap(), &cfg).unwrap();
        state.predictor = Some(report.predictor);

        let value = state.predict().unwrap();
        assert_eq!(state.form.result, Some(value));
        assert!(value.is_finite());
    }

    #[test]
    fn export_writes_only_visible_rows() {
        let mut state = state();
        state.toggle_filter_value(CategoricalField::Gender, "female");

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        assert_eq!(state.export_filtered(&path).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().skip(1).all(|l| l.starts_with("male,")));
    }

    #[test]
    fn missing_files_leave_status_message() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::load(ArtifactPaths::in_dir(dir.path()));
        assert!(state.dataset.is_none());
        assert!(state.predictor.is_none());
        assert!(state.status_message.unwrap().starts_with("Error:"));
    }
}
