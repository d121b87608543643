use anyhow::{Context, Result};

use student_performance::data::loader;
use student_performance::{trainer, ArtifactPaths, TrainerConfig};

fn main() -> Result<()> {
    env_logger::init();

    let paths = ArtifactPaths::from_args(std::env::args());
    let config = TrainerConfig::default();

    let dataset = loader::load_file(&paths.dataset)
        .with_context(|| format!("loading dataset {}", paths.dataset.display()))?;
    log::info!("Loaded {} students from {}", dataset.len(), paths.dataset.display());

    let report = trainer::train(&dataset, &config).context("training model")?;
    log::info!("Training R² = {:.4}", report.train_r2);
    for (name, importance) in report.top_features(5) {
        log::info!("  {name:<45} {importance:.4}");
    }

    report
        .predictor
        .save(&paths.model, &paths.columns)
        .context("writing model artifacts")?;

    println!(
        "Model and columns saved to {} and {}",
        paths.model.display(),
        paths.columns.display()
    );
    Ok(())
}
