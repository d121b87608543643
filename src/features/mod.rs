//! One-hot encoding and alignment against the frozen training columns.
//!
//! The trainer and the dashboard both expand records through
//! [`RawRecord::one_hot`], so a column name produced at training time is
//! reproduced byte-for-byte at prediction time.

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::data::model::{CategoricalField, ScoreField, StudentDataset, StudentRecord};

/// Name of the indicator column for `value` of `field`, e.g. `gender_female`.
pub fn indicator_name(field: CategoricalField, value: &str) -> String {
    format!("{}_{}", field.column_name(), value)
}

// ---------------------------------------------------------------------------
// RawRecord – user-supplied (possibly partial) field values
// ---------------------------------------------------------------------------

/// A raw input row before encoding. Fields not set contribute nothing to the
/// expansion and end up as zeros after alignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub categories: BTreeMap<CategoricalField, String>,
    pub scores: BTreeMap<ScoreField, f64>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, field: CategoricalField, value: impl Into<String>) -> Self {
        self.categories.insert(field, value.into());
        self
    }

    pub fn with_score(mut self, field: ScoreField, value: f64) -> Self {
        self.scores.insert(field, value);
        self
    }

    /// All training inputs of a dataset row.
    pub fn from_student(rec: &StudentRecord) -> Self {
        let categories = CategoricalField::ALL
            .iter()
            .map(|&f| (f, rec.category(f).to_string()))
            .collect();
        let scores = ScoreField::ALL
            .iter()
            .map(|&f| (f, f64::from(rec.score(f))))
            .collect();
        RawRecord { categories, scores }
    }

    /// Expand into named columns: scores keep their header name, each
    /// categorical value becomes a single `<field>_<value>` indicator set to 1.
    pub fn one_hot(&self) -> BTreeMap<String, f64> {
        let mut encoded: BTreeMap<String, f64> = self
            .scores
            .iter()
            .map(|(field, &v)| (field.column_name().to_string(), v))
            .collect();
        for (&field, value) in &self.categories {
            encoded.insert(indicator_name(field, value), 1.0);
        }
        encoded
    }
}

// ---------------------------------------------------------------------------
// FeatureColumns – the frozen, ordered column list
// ---------------------------------------------------------------------------

/// Ordered encoded-feature names fixed at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureColumns(Vec<String>);

impl FeatureColumns {
    pub fn new(names: Vec<String>) -> Self {
        FeatureColumns(names)
    }

    /// Derive the column list from a training dataset: the score columns,
    /// then one indicator per sorted category of each categorical field.
    pub fn from_dataset(dataset: &StudentDataset) -> Self {
        let mut names: Vec<String> = ScoreField::ALL
            .iter()
            .map(|f| f.column_name().to_string())
            .collect();
        for field in CategoricalField::ALL {
            if let Some(values) = dataset.unique_values.get(&field) {
                names.extend(values.iter().map(|v| indicator_name(field, v)));
            }
        }
        FeatureColumns(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-express an expanded record over exactly these columns. Missing
    /// columns become 0; columns unknown to the list are dropped.
    pub fn align(&self, encoded: &BTreeMap<String, f64>) -> Vec<f64> {
        self.0
            .iter()
            .map(|name| encoded.get(name).copied().unwrap_or(0.0))
            .collect()
    }

    /// One-hot expand and align a raw record.
    pub fn encode(&self, record: &RawRecord) -> Vec<f64> {
        self.align(&record.one_hot())
    }

    /// Encode every dataset row into an `(n_rows, n_columns)` matrix.
    pub fn encode_dataset(&self, dataset: &StudentDataset) -> Array2<f64> {
        let mut x = Array2::zeros((dataset.len(), self.len()));
        for (mut row, rec) in x.rows_mut().into_iter().zip(&dataset.records) {
            let encoded = self.encode(&RawRecord::from_student(rec));
            for (cell, v) in row.iter_mut().zip(encoded) {
                *cell = v;
            }
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::student;

    fn dataset() -> StudentDataset {
        StudentDataset::from_records(vec![
            student("female", "group B", "bachelor's degree", "standard", "none", [72, 72, 74]),
            student("male", "group A", "high school", "free/reduced", "completed", [47, 57, 44]),
            student("female", "group C", "high school", "standard", "completed", [69, 90, 88]),
        ])
    }

    #[test]
    fn columns_follow_training_layout() {
        let cols = FeatureColumns::from_dataset(&dataset());
        let expected = [
            "math score",
            "reading score",
            "writing score",
            "gender_female",
            "gender_male",
            "race/ethnicity_group A",
            "race/ethnicity_group B",
            "race/ethnicity_group C",
            "parental level of education_bachelor's degree",
            "parental level of education_high school",
            "lunch_free/reduced",
            "lunch_standard",
            "test preparation course_completed",
            "test preparation course_none",
        ];
        assert_eq!(cols.names(), expected);
    }

    #[test]
    fn form_record_aligns_to_frozen_order() {
        let cols = FeatureColumns::from_dataset(&dataset());
        let record = RawRecord::new()
            .with_category(CategoricalField::Gender, "female")
            .with_category(CategoricalField::RaceEthnicity, "group B")
            .with_category(CategoricalField::TestPreparation, "completed")
            .with_score(ScoreField::Math, 70.0)
            .with_score(ScoreField::Reading, 80.0)
            .with_score(ScoreField::Writing, 75.0);

        let v = cols.encode(&record);
        assert_eq!(v.len(), cols.len());
        assert_eq!(
            v,
            vec![70.0, 80.0, 75.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
    }

    #[test]
    fn unseen_category_maps_to_no_indicator() {
        let cols = FeatureColumns::from_dataset(&dataset());
        let record = RawRecord::new()
            .with_category(CategoricalField::RaceEthnicity, "group Z")
            .with_score(ScoreField::Math, 10.0);

        let v = cols.encode(&record);
        assert_eq!(v.len(), cols.len());
        let race_start = 5;
        assert!(v[race_start..race_start + 3].iter().all(|&x| x == 0.0));
        assert_eq!(v[0], 10.0);
    }

    #[test]
    fn dataset_matrix_matches_per_row_encoding() {
        let ds = dataset();
        let cols = FeatureColumns::from_dataset(&ds);
        let x = cols.encode_dataset(&ds);
        assert_eq!(x.dim(), (3, cols.len()));
        for (i, rec) in ds.records.iter().enumerate() {
            let row: Vec<f64> = x.row(i).to_vec();
            assert_eq!(row, cols.encode(&RawRecord::from_student(rec)));
            // Each categorical field contributes exactly one hot indicator.
            assert_eq!(row[3..].iter().sum::<f64>(), CategoricalField::ALL.len() as f64);
        }
    }

    #[test]
    fn columns_serialize_as_plain_list() {
        let cols = FeatureColumns::new(vec!["a".into(), "b".into()]);
        assert_eq!(serde_json::to_string(&cols).unwrap(), r#"["a","b"]"#);
    }
}
