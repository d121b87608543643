use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::model::{CategoricalField, ScoreField, StudentRecord};
use crate::error::DataError;

/// Default file name offered by the export dialog.
pub const DEFAULT_EXPORT_NAME: &str = "filtered_students.csv";

/// Write `records` as CSV with the raw columns plus `total score` and `grade`.
pub fn write_csv<'a, W, I>(writer: W, records: I) -> Result<(), DataError>
where
    W: Write,
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut out = csv::Writer::from_writer(writer);

    let header: Vec<&str> = CategoricalField::ALL
        .iter()
        .map(|f| f.column_name())
        .chain(ScoreField::ALL.iter().map(|f| f.column_name()))
        .chain(["total score", "grade"])
        .collect();
    out.write_record(&header)?;

    for rec in records {
        let mut row: Vec<String> = CategoricalField::ALL
            .iter()
            .map(|&f| rec.category(f).to_string())
            .collect();
        row.extend(ScoreField::ALL.iter().map(|&f| rec.score(f).to_string()));
        row.push(rec.total_score().to_string());
        row.push(rec.grade().to_string());
        out.write_record(&row)?;
    }

    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export `records` to a file on disk.
pub fn export_file<'a, I>(path: &Path, records: I) -> Result<(), DataError>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let file = File::create(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_csv(file, records)
}
