mod app;
mod color;
mod state;
mod ui;

use app::StudentDashboardApp;
use eframe::egui;
use state::AppState;
use student_performance::ArtifactPaths;

fn main() -> eframe::Result {
    env_logger::init();

    let paths = ArtifactPaths::from_args(std::env::args());
    log::info!("Dataset: {}, model: {}", paths.dataset.display(), paths.model.display());
    let state = AppState::load(paths);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Student Performance Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(StudentDashboardApp::new(state)))),
    )
}
