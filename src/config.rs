use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::{MaxFeatures, RandomForestRegressor};

pub const DATASET_FILE: &str = "StudentsPerformance.csv";
pub const MODEL_FILE: &str = "student_performance_model.json";
pub const COLUMNS_FILE: &str = "model_columns.json";

// ---------------------------------------------------------------------------
// File locations
// ---------------------------------------------------------------------------

/// Where the dataset and the two artifacts live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub dataset: PathBuf,
    pub model: PathBuf,
    pub columns: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("."))
    }
}

impl ArtifactPaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            dataset: dir.join(DATASET_FILE),
            model: dir.join(MODEL_FILE),
            columns: dir.join(COLUMNS_FILE),
        }
    }

    /// Resolve from process arguments: an optional single directory argument
    /// (after the program name), otherwise the working directory.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        match args.into_iter().nth(1) {
            Some(dir) => Self::in_dir(Path::new(&dir)),
            None => Self::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Trainer hyperparameters
// ---------------------------------------------------------------------------

/// Forest hyperparameters used by the trainer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub n_estimators: usize,
    pub random_state: u64,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    pub bootstrap: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            random_state: 42,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::All,
            bootstrap: true,
        }
    }
}

impl TrainerConfig {
    /// An unfitted forest carrying these hyperparameters.
    pub fn build_model(&self) -> RandomForestRegressor {
        RandomForestRegressor::new(self.n_estimators)
            .with_random_state(self.random_state)
            .with_max_depth(self.max_depth)
            .with_min_samples_split(self.min_samples_split)
            .with_min_samples_leaf(self.min_samples_leaf)
            .with_max_features(self.max_features)
            .with_bootstrap(self.bootstrap)
    }
}
