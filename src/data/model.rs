use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Field identifiers – one per CSV column
// ---------------------------------------------------------------------------

/// A categorical column of the students dataset.
///
/// Declaration order is the order in which the fields are one-hot expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoricalField {
    Gender,
    RaceEthnicity,
    ParentalEducation,
    Lunch,
    TestPreparation,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Gender,
        CategoricalField::RaceEthnicity,
        CategoricalField::ParentalEducation,
        CategoricalField::Lunch,
        CategoricalField::TestPreparation,
    ];

    /// Fields exposed as sidebar filters and prediction-form dropdowns.
    pub const FILTERABLE: [CategoricalField; 3] = [
        CategoricalField::Gender,
        CategoricalField::RaceEthnicity,
        CategoricalField::TestPreparation,
    ];

    /// CSV header for this column.
    pub fn column_name(self) -> &'static str {
        match self {
            CategoricalField::Gender => "gender",
            CategoricalField::RaceEthnicity => "race/ethnicity",
            CategoricalField::ParentalEducation => "parental level of education",
            CategoricalField::Lunch => "lunch",
            CategoricalField::TestPreparation => "test preparation course",
        }
    }

    /// Human-readable label for widgets.
    pub fn label(self) -> &'static str {
        match self {
            CategoricalField::Gender => "Gender",
            CategoricalField::RaceEthnicity => "Race/Ethnicity",
            CategoricalField::ParentalEducation => "Parental Level of Education",
            CategoricalField::Lunch => "Lunch",
            CategoricalField::TestPreparation => "Test Preparation Course",
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One of the three integer score columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScoreField {
    Math,
    Reading,
    Writing,
}

impl ScoreField {
    pub const ALL: [ScoreField; 3] = [ScoreField::Math, ScoreField::Reading, ScoreField::Writing];

    pub fn column_name(self) -> &'static str {
        match self {
            ScoreField::Math => "math score",
            ScoreField::Reading => "reading score",
            ScoreField::Writing => "writing score",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreField::Math => "Math Score",
            ScoreField::Reading => "Reading Score",
            ScoreField::Writing => "Writing Score",
        }
    }
}

impl fmt::Display for ScoreField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Grade – ordinal bucket of the total score
// ---------------------------------------------------------------------------

/// Letter grade derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    C,
    B,
    A,
}

impl Grade {
    /// Ascending order, as plotted.
    pub const ALL: [Grade; 3] = [Grade::C, Grade::B, Grade::A];

    /// Bucket a total score: `[0, 180]` → C, `(180, 240]` → B, above → A.
    pub fn from_total(total: u32) -> Self {
        match total {
            0..=180 => Grade::C,
            181..=240 => Grade::B,
            _ => Grade::A,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::C => "C",
            Grade::B => "B",
            Grade::A => "A",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – one row of the CSV
// ---------------------------------------------------------------------------

/// A single student (one row of the source CSV).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub gender: String,
    #[serde(rename = "race/ethnicity")]
    pub race_ethnicity: String,
    #[serde(rename = "parental level of education")]
    pub parental_education: String,
    pub lunch: String,
    #[serde(rename = "test preparation course")]
    pub test_preparation: String,
    #[serde(rename = "math score")]
    pub math_score: u32,
    #[serde(rename = "reading score")]
    pub reading_score: u32,
    #[serde(rename = "writing score")]
    pub writing_score: u32,
}

impl StudentRecord {
    /// Value of a categorical column.
    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Gender => &self.gender,
            CategoricalField::RaceEthnicity => &self.race_ethnicity,
            CategoricalField::ParentalEducation => &self.parental_education,
            CategoricalField::Lunch => &self.lunch,
            CategoricalField::TestPreparation => &self.test_preparation,
        }
    }

    /// Value of a score column.
    pub fn score(&self, field: ScoreField) -> u32 {
        match field {
            ScoreField::Math => self.math_score,
            ScoreField::Reading => self.reading_score,
            ScoreField::Writing => self.writing_score,
        }
    }

    /// The regression target: sum of the three scores.
    ///
    /// Both the trainer and the dashboard go through this method so the target
    /// and the displayed grade can never drift apart.
    pub fn total_score(&self) -> u32 {
        self.math_score + self.reading_score + self.writing_score
    }

    pub fn grade(&self) -> Grade {
        Grade::from_total(self.total_score())
    }
}

// ---------------------------------------------------------------------------
// StudentDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
#[derive(Debug, Clone, Default)]
pub struct StudentDataset {
    /// All students (rows), in file order.
    pub records: Vec<StudentRecord>,
    /// For each categorical column the sorted set of unique values.
    pub unique_values: BTreeMap<CategoricalField, BTreeSet<String>>,
}

impl StudentDataset {
    /// Build category indices from the loaded records.
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        let mut unique_values: BTreeMap<CategoricalField, BTreeSet<String>> = BTreeMap::new();

        for rec in &records {
            for field in CategoricalField::ALL {
                unique_values
                    .entry(field)
                    .or_default()
                    .insert(rec.category(field).to_string());
            }
        }

        StudentDataset {
            records,
            unique_values,
        }
    }

    /// Sorted unique values of a column (empty for an empty dataset).
    pub fn categories(&self, field: CategoricalField) -> Vec<String> {
        self.unique_values
            .get(&field)
            .map(|vals| vals.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::StudentRecord;

    pub fn student(
        gender: &str,
        race: &str,
        parental: &str,
        lunch: &str,
        prep: &str,
        scores: [u32; 3],
    ) -> StudentRecord {
        StudentRecord {
            gender: gender.to_string(),
            race_ethnicity: race.to_string(),
            parental_education: parental.to_string(),
            lunch: lunch.to_string(),
            test_preparation: prep.to_string(),
            math_score: scores[0],
            reading_score: scores[1],
            writing_score: scores[2],
        }
    }
}
