use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use student_performance::data::model::{CategoricalField, ScoreField};

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Filtered students with their derived total and grade.
pub fn students_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let n_columns = CategoricalField::ALL.len() + ScoreField::ALL.len() + 2;

    ui.push_id("students_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .columns(Column::auto().at_least(60.0), n_columns)
            .min_scrolled_height(0.0)
            .max_scroll_height(280.0)
            .header(20.0, |mut header| {
                let names = CategoricalField::ALL
                    .iter()
                    .map(|f| f.column_name())
                    .chain(ScoreField::ALL.iter().map(|f| f.column_name()))
                    .chain(["total score", "grade"]);
                for name in names {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                    let rec = &dataset.records[state.visible_indices[row.index()]];
                    for field in CategoricalField::ALL {
                        row.col(|ui| {
                            ui.label(rec.category(field));
                        });
                    }
                    for field in ScoreField::ALL {
                        row.col(|ui| {
                            ui.label(rec.score(field).to_string());
                        });
                    }
                    row.col(|ui| {
                        ui.label(rec.total_score().to_string());
                    });
                    row.col(|ui| {
                        ui.label(rec.grade().as_str());
                    });
                });
            });
    });
}
