use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{form, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudentDashboardApp {
    pub state: AppState,
}

impl StudentDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for StudentDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table, form, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .id_salt("dashboard_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.heading("Student Performance Dashboard");
                    if self.state.dataset.is_none() {
                        ui.label("Open a dataset to begin  (File → Open dataset…)");
                        return;
                    }

                    table::students_table(ui, &self.state);
                    ui.separator();
                    form::prediction_form(ui, &mut self.state);
                    ui.separator();
                    plot::charts(ui, &self.state);
                    ui.separator();

                    if ui
                        .add_enabled(
                            !self.state.visible_indices.is_empty(),
                            egui::Button::new("Download Filtered Data as CSV"),
                        )
                        .clicked()
                    {
                        panels::export_dialog(&mut self.state);
                    }
                });
        });
    }
}
