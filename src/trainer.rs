//! Training pipeline: dataset → encoded matrix → fitted forest.

use ndarray::Array1;

use crate::config::TrainerConfig;
use crate::data::model::StudentDataset;
use crate::error::{ModelError, Result};
use crate::features::FeatureColumns;
use crate::model::Predictor;

/// Result of a training run.
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub predictor: Predictor,
    /// R² on the training set itself (there is no held-out split).
    pub train_r2: f64,
}

impl TrainingReport {
    /// Feature names paired with importances, most important first.
    pub fn top_features(&self, n: usize) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .predictor
            .columns()
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.predictor.model().feature_importances().iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// The regression target of every row, in dataset order.
pub fn target(dataset: &StudentDataset) -> Array1<f64> {
    dataset
        .records
        .iter()
        .map(|rec| f64::from(rec.total_score()))
        .collect()
}

/// Freeze the column list and fit a forest on the full dataset.
pub fn train(dataset: &StudentDataset, config: &TrainerConfig) -> Result<TrainingReport> {
    if dataset.is_empty() {
        return Err(ModelError::EmptyDataset);
    }

    let columns = FeatureColumns::from_dataset(dataset);
    let x = columns.encode_dataset(dataset);
    let y = target(dataset);
    log::info!(
        "Training on {} rows x {} encoded columns",
        x.nrows(),
        columns.len()
    );

    let mut model = config.build_model();
    model.fit(&x, &y)?;
    let train_r2 = model.score(&x, &y)?;

    Ok(TrainingReport {
        predictor: Predictor::new(model, columns)?,
        train_r2,
    })
}
