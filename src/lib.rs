//! Student performance: a random-forest regressor over the students CSV and
//! the shared pieces used by the `train-model` and dashboard binaries.

pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod model;
pub mod trainer;

pub use config::{ArtifactPaths, TrainerConfig};
pub use error::{DataError, ModelError};
pub use features::{FeatureColumns, RawRecord};
pub use model::{Predictor, RandomForestRegressor};
