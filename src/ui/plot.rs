use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use student_performance::data::model::{CategoricalField, Grade, ScoreField};
use student_performance::data::stats;

use crate::color::{coolwarm, coolwarm_steps, generate_palette};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Chart panels (central panel, below the form)
// ---------------------------------------------------------------------------

/// Render all visualizations over the filtered students.
pub fn charts(ui: &mut Ui, state: &AppState) {
    ui.heading("Visualizations");

    if state.visible_indices.is_empty() {
        ui.label("No students match the current filters.");
        return;
    }

    grade_distribution(ui, state);
    ui.add_space(12.0);
    mean_total_chart(ui, state, CategoricalField::TestPreparation);
    ui.add_space(12.0);
    mean_total_chart(ui, state, CategoricalField::ParentalEducation);
    ui.add_space(12.0);
    correlation_heatmap(ui, state);
}

/// Bar chart with one labelled bar per category.
fn labelled_bars(ui: &mut Ui, id: &str, y_label: &str, entries: Vec<(String, f64, Color32)>) {
    let labels: Vec<String> = entries.iter().map(|(l, _, _)| l.clone()).collect();
    let bars: Vec<Bar> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (label, value, color))| {
            Bar::new(i as f64, value).name(label).fill(color).width(0.6)
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

fn grade_distribution(ui: &mut Ui, state: &AppState) {
    ui.strong("Grade Distribution");
    let counts = stats::grade_counts(state.visible_records());
    let colors = coolwarm_steps(Grade::ALL.len());
    let entries = Grade::ALL
        .iter()
        .zip(colors)
        .map(|(g, c)| (g.to_string(), counts.get(g).copied().unwrap_or(0) as f64, c))
        .collect();
    labelled_bars(ui, "grade_distribution", "count", entries);
}

fn mean_total_chart(ui: &mut Ui, state: &AppState, field: CategoricalField) {
    ui.strong(format!("Average Total Score by {}", field.label()));
    let means = stats::mean_total_by(state.visible_records(), field);
    let colors = generate_palette(means.len());
    let entries = means
        .into_iter()
        .zip(colors)
        .map(|((label, mean), c)| (label, mean, c))
        .collect();
    labelled_bars(ui, field.column_name(), "mean(total score)", entries);
}

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, state: &AppState) {
    ui.strong("Correlation Heatmap of Scores");
    let corr = stats::score_correlation(state.visible_records());

    let label_width = 110.0;
    let cell = 80.0;
    let n = ScoreField::ALL.len();
    let size = egui::vec2(label_width + cell * n as f32, cell * n as f32 + 24.0);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let text_color = ui.visuals().text_color();
    let font = FontId::proportional(12.0);

    for (i, row_field) in ScoreField::ALL.iter().enumerate() {
        let y = origin.y + cell * i as f32;
        painter.text(
            egui::pos2(origin.x + label_width - 6.0, y + cell / 2.0),
            Align2::RIGHT_CENTER,
            row_field.column_name(),
            font.clone(),
            text_color,
        );

        for (j, _) in ScoreField::ALL.iter().enumerate() {
            let value = corr[i][j];
            let min = egui::pos2(origin.x + label_width + cell * j as f32, y);
            let rect = Rect::from_min_size(min, egui::vec2(cell - 2.0, cell - 2.0));
            // Map [-1, 1] onto the colour scale.
            painter.rect_filled(rect, 2.0, coolwarm(((value + 1.0) / 2.0) as f32));
            let text = if value.is_nan() {
                "n/a".to_string()
            } else {
                format!("{value:.2}")
            };
            painter.text(rect.center(), Align2::CENTER_CENTER, text, font.clone(), Color32::BLACK);
        }
    }

    for (j, col_field) in ScoreField::ALL.iter().enumerate() {
        painter.text(
            egui::pos2(
                origin.x + label_width + cell * j as f32 + cell / 2.0,
                origin.y + cell * n as f32 + 10.0,
            ),
            Align2::CENTER_CENTER,
            col_field.column_name(),
            font.clone(),
            text_color,
        );
    }
}
