//! On-disk artifacts shared by the trainer and the dashboard.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::forest::RandomForestRegressor;
use crate::error::{ModelError, Result};
use crate::features::{FeatureColumns, RawRecord};

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let io_err = |source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(io_err)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

pub fn save_model(path: &Path, model: &RandomForestRegressor) -> Result<()> {
    write_json(path, model)
}

pub fn load_model(path: &Path) -> Result<RandomForestRegressor> {
    read_json(path)
}

pub fn save_columns(path: &Path, columns: &FeatureColumns) -> Result<()> {
    write_json(path, columns)
}

pub fn load_columns(path: &Path) -> Result<FeatureColumns> {
    read_json(path)
}

// ---------------------------------------------------------------------------
// Predictor – fitted model paired with its frozen columns
// ---------------------------------------------------------------------------

/// A fitted model together with the column list it was trained on.
#[derive(Debug, Clone)]
pub struct Predictor {
    model: RandomForestRegressor,
    columns: FeatureColumns,
}

impl Predictor {
    /// Pair a model with its columns, rejecting a width mismatch.
    pub fn new(model: RandomForestRegressor, columns: FeatureColumns) -> Result<Self> {
        if model.n_features() != columns.len() {
            return Err(ModelError::ColumnMismatch {
                model: model.n_features(),
                columns: columns.len(),
            });
        }
        Ok(Self { model, columns })
    }

    /// Load both artifacts from disk.
    pub fn load(model_path: &Path, columns_path: &Path) -> Result<Self> {
        let model = load_model(model_path)?;
        let columns = load_columns(columns_path)?;
        Self::new(model, columns)
    }

    /// Write both artifacts to disk.
    pub fn save(&self, model_path: &Path, columns_path: &Path) -> Result<()> {
        save_columns(columns_path, &self.columns)?;
        save_model(model_path, &self.model)
    }

    /// Encode a raw record against the frozen columns and predict its total.
    pub fn predict(&self, record: &RawRecord) -> Result<f64> {
        let row = self.columns.encode(record);
        self.model.predict_one(&row)
    }

    pub fn model(&self) -> &RandomForestRegressor {
        &self.model
    }

    pub fn columns(&self) -> &FeatureColumns {
        &self.columns
    }
}
