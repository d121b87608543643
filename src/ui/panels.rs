use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use student_performance::data::export::DEFAULT_EXPORT_NAME;
use student_performance::data::model::CategoricalField;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Students");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    // Clone what we need so we can mutate state inside the loop.
    let unique = dataset.unique_values.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in CategoricalField::FILTERABLE {
                let Some(all_values) = unique.get(&field) else {
                    continue;
                };

                let n_selected = state.filters.get(&field).map_or(0, |s| s.len());
                let n_total = all_values.len();
                let header_text = format!("{}  ({n_selected}/{n_total})", field.label());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.column_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(field);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(field);
                            }
                        });

                        for val in all_values {
                            let mut checked = state
                                .filters
                                .get(&field)
                                .is_some_and(|selected| selected.contains(val));
                            if ui.checkbox(&mut checked, val.as_str()).changed() {
                                state.toggle_filter_value(field, val);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open dataset…").clicked() {
                open_dataset_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload model").clicked() {
                state.status_message = None;
                state.reload_artifacts();
                ui.close_menu();
            }
            let can_export = !state.visible_indices.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export filtered CSV…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} students loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        match &state.predictor {
            Some(p) => ui.label(format!("Model: {} trees", p.model().n_trees())),
            None => ui.label(RichText::new("Model: not loaded").color(Color32::YELLOW)),
        };

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_dataset_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open students dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open_dataset(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download filtered data")
        .set_file_name(DEFAULT_EXPORT_NAME)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match state.export_filtered(&path) {
            Ok(_) => state.status_message = None,
            Err(e) => state.report_error(e),
        }
    }
}
