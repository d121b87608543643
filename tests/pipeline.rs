use std::io::Write;

use student_performance::data::loader;
use student_performance::data::model::{CategoricalField, Grade, ScoreField, StudentDataset};
use student_performance::{trainer, ArtifactPaths, Predictor, RawRecord, TrainerConfig};

const GENDERS: [&str; 2] = ["female", "male"];
const GROUPS: [&str; 5] = ["group A", "group B", "group C", "group D", "group E"];
const PARENTAL: [&str; 3] = ["high school", "some college", "master's degree"];
const LUNCH: [&str; 2] = ["free/reduced", "standard"];
const PREP: [&str; 2] = ["completed", "none"];

/// Deterministic synthetic CSV with the real header layout.
fn synthetic_csv(rows: usize) -> String {
    let mut out = String::from(
        "gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score\n",
    );
    for i in 0..rows {
        let math = (i * 37 + 11) % 101;
        let reading = (i * 53 + 29) % 101;
        let writing = (math + reading) / 2;
        out.push_str(&format!(
            "{},{},{},{},{},{math},{reading},{writing}\n",
            GENDERS[i % 2],
            GROUPS[i % 5],
            PARENTAL[i % 3],
            LUNCH[(i / 2) % 2],
            PREP[(i / 3) % 2],
        ));
    }
    out
}

fn dataset(rows: usize) -> StudentDataset {
    loader::load_reader(synthetic_csv(rows).as_bytes()).unwrap()
}

fn small_config() -> TrainerConfig {
    TrainerConfig {
        n_estimators: 15,
        ..Default::default()
    }
}

fn scenario() -> RawRecord {
    RawRecord::new()
        .with_category(CategoricalField::Gender, "female")
        .with_category(CategoricalField::RaceEthnicity, "group B")
        .with_category(CategoricalField::TestPreparation, "completed")
        .with_score(ScoreField::Math, 70.0)
        .with_score(ScoreField::Reading, 80.0)
        .with_score(ScoreField::Writing, 75.0)
}

#[test]
fn scenario_total_and_grade() {
    let csv = "\
gender,race/ethnicity,parental level of education,lunch,test preparation course,math score,reading score,writing score
female,group B,some college,standard,completed,70,80,75
";
    let ds = loader::load_reader(csv.as_bytes()).unwrap();
    let rec = &ds.records[0];
    assert_eq!(rec.total_score(), 225);
    assert_eq!(rec.grade(), Grade::B);
    assert_eq!(trainer::target(&ds)[0], 225.0);
}

#[test]
fn target_matches_displayed_total_for_every_row() {
    let ds = dataset(200);
    let y = trainer::target(&ds);
    for (i, rec) in ds.records.iter().enumerate() {
        let expected = rec.math_score + rec.reading_score + rec.writing_score;
        assert_eq!(rec.total_score(), expected);
        assert_eq!(y[i], f64::from(expected));
    }
}

#[test]
fn same_seed_reproduces_predictions() {
    let ds = dataset(120);
    let a = trainer::train(&ds, &small_config()).unwrap();
    let b = trainer::train(&ds, &small_config()).unwrap();

    assert_eq!(
        a.predictor.predict(&scenario()).unwrap(),
        b.predictor.predict(&scenario()).unwrap()
    );
    for rec in ds.records.iter().take(20) {
        let raw = RawRecord::from_student(rec);
        assert_eq!(
            a.predictor.predict(&raw).unwrap(),
            b.predictor.predict(&raw).unwrap()
        );
    }
}

#[test]
fn forest_learns_the_total() {
    let ds = dataset(300);
    let report = trainer::train(&ds, &small_config()).unwrap();
    assert!(report.train_r2 > 0.9, "R² too low: {}", report.train_r2);

    let predicted = report.predictor.predict(&scenario()).unwrap();
    assert!(
        (predicted - 225.0).abs() < 50.0,
        "prediction {predicted} far from 225"
    );
}

#[test]
fn artifacts_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());

    let mut file = std::fs::File::create(&paths.dataset).unwrap();
    file.write_all(synthetic_csv(80).as_bytes()).unwrap();
    drop(file);

    let ds = loader::load_file(&paths.dataset).unwrap();
    let report = trainer::train(&ds, &small_config()).unwrap();
    report.predictor.save(&paths.model, &paths.columns).unwrap();

    let loaded = Predictor::load(&paths.model, &paths.columns).unwrap();
    assert_eq!(loaded.columns(), report.predictor.columns());
    assert_eq!(loaded.model().n_trees(), 15);

    let before = report.predictor.predict(&scenario()).unwrap();
    let after = loaded.predict(&scenario()).unwrap();
    assert!((before - after).abs() < 1e-9, "{before} != {after}");
}

#[test]
fn aligned_vector_width_is_frozen() {
    let ds = dataset(50);
    let report = trainer::train(&ds, &small_config()).unwrap();
    let columns = report.predictor.columns();

    let partial = RawRecord::new().with_score(ScoreField::Math, 10.0);
    let unseen = scenario().with_category(CategoricalField::Lunch, "catered");

    assert_eq!(columns.encode(&scenario()).len(), columns.len());
    assert_eq!(columns.encode(&partial).len(), columns.len());
    assert_eq!(columns.encode(&unseen).len(), columns.len());
    assert!(!columns.names().iter().any(|n| n == "lunch_catered"));
    assert!(report.predictor.predict(&unseen).unwrap().is_finite());
}
