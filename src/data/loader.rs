use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{CategoricalField, ScoreField, StudentDataset, StudentRecord};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the students CSV from disk.
///
/// Expected header (order does not matter, extra columns are ignored):
///
/// ```text
/// gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score
/// ```
pub fn load_file(path: &Path) -> Result<StudentDataset, DataError> {
    let file = File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    log::debug!("Parsed {} students from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Load the students CSV from any reader.
pub fn load_reader<R: Read>(reader: R) -> Result<StudentDataset, DataError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let required = CategoricalField::ALL
        .iter()
        .map(|f| f.column_name())
        .chain(ScoreField::ALL.iter().map(|f| f.column_name()));
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }

    let records = reader
        .deserialize::<StudentRecord>()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StudentDataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score
female,group B,bachelor's degree,standard,none,72,72,74
female,group C,some college,standard,completed,69,90,88
male,group A,associate's degree,free/reduced,none,47,57,44
";

    #[test]
    fn parses_rows_and_categories() {
        let ds = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.records[1].race_ethnicity, "group C");
        assert_eq!(ds.records[1].parental_education, "some college");
        assert_eq!(ds.records[2].total_score(), 148);
        assert_eq!(
            ds.categories(CategoricalField::TestPreparation),
            vec!["completed", "none"]
        );
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "gender,race/ethnicity,lunch\nfemale,group B,standard\n";
        match load_reader(csv.as_bytes()) {
            Err(DataError::MissingColumn(col)) => assert_eq!(col, "parental level of education"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_score_is_a_csv_error() {
        let csv = "\
gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score
female,group B,high school,standard,none,seventy,72,74
";
        assert!(matches!(load_reader(csv.as_bytes()), Err(DataError::Csv(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_file(Path::new("/nonexistent/students.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }
}
