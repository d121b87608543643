use eframe::egui::{self, Color32, RichText, Ui};

use student_performance::data::model::{CategoricalField, ScoreField};

use crate::state::AppState;

/// The "Predict Total Score" form and its result line.
pub fn prediction_form(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Predict Total Score");

    let Some(dataset) = &state.dataset else {
        ui.label("Load a dataset to enable predictions.");
        return;
    };
    let options: Vec<(CategoricalField, Vec<String>)> = CategoricalField::FILTERABLE
        .iter()
        .map(|&f| (f, dataset.categories(f)))
        .collect();

    let before = state.form.clone();

    egui::Grid::new("prediction_form")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            for (field, values) in &options {
                ui.label(field.label());
                if let Some(current) = state.form.category_mut(*field) {
                    egui::ComboBox::from_id_salt(("form", field.column_name()))
                        .selected_text(current.as_str())
                        .show_ui(ui, |ui: &mut Ui| {
                            for v in values {
                                ui.selectable_value(current, v.clone(), v.as_str());
                            }
                        });
                }
                ui.end_row();
            }

            for field in ScoreField::ALL {
                ui.label(field.label());
                ui.add(egui::DragValue::new(state.form.score_mut(field)).range(0..=100));
                ui.end_row();
            }
        });

    if state.form != before {
        state.form.result = None;
    }

    let has_model = state.predictor.is_some();
    let clicked = ui
        .add_enabled(has_model, egui::Button::new("Predict"))
        .on_disabled_hover_text("No model loaded (run train-model first)")
        .clicked();
    if clicked {
        if let Err(e) = state.predict() {
            state.report_error(e);
        }
    }

    if let Some(total) = state.form.result {
        ui.label(
            RichText::new(format!("Predicted Total Score: {total:.2}"))
                .color(Color32::from_rgb(60, 180, 90))
                .strong(),
        );
    }
}
