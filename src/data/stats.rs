use std::collections::BTreeMap;

use super::model::{CategoricalField, Grade, ScoreField, StudentRecord};

/// Number of students per grade; every grade is present, possibly with 0.
pub fn grade_counts<'a, I>(records: I) -> BTreeMap<Grade, usize>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut counts: BTreeMap<Grade, usize> = Grade::ALL.iter().map(|&g| (g, 0)).collect();
    for rec in records {
        *counts.entry(rec.grade()).or_insert(0) += 1;
    }
    counts
}

/// Mean total score per category of `field`, sorted by category.
/// Categories with no rows are omitted.
pub fn mean_total_by<'a, I>(records: I, field: CategoricalField) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let mut acc: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for rec in records {
        let entry = acc.entry(rec.category(field)).or_insert((0, 0));
        entry.0 += u64::from(rec.total_score());
        entry.1 += 1;
    }
    acc.into_iter()
        .map(|(cat, (sum, n))| (cat.to_string(), sum as f64 / n as f64))
        .collect()
}

/// Pearson correlation matrix of the three score columns, indexed in
/// [`ScoreField::ALL`] order.
///
/// A constant column has undefined correlation and yields `NaN` in its row and
/// column, except on the diagonal which is always 1.
pub fn score_correlation<'a, I>(records: I) -> [[f64; 3]; 3]
where
    I: IntoIterator<Item = &'a StudentRecord>,
{
    let columns: Vec<Vec<f64>> = {
        let mut cols = vec![Vec::new(), Vec::new(), Vec::new()];
        for rec in records {
            for (i, field) in ScoreField::ALL.iter().enumerate() {
                cols[i].push(f64::from(rec.score(*field)));
            }
        }
        cols
    };

    let mut out = [[f64::NAN; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = if i == j {
                1.0
            } else {
                pearson(&columns[i], &columns[j])
            };
        }
    }
    out
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len();
    if n < 2 || n != b.len() {
        return f64::NAN;
    }
    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        cov / denom
    }
}
