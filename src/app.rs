use eframe::egui;

use crate::data::model::PatientDataset;
use crate::data::stats::Report;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WardLensApp {
    pub state: AppState,
}

impl WardLensApp {
    /// Start with the dataset the startup pipeline already cleaned.
    pub fn with_dataset(dataset: PatientDataset, report: Report) -> Self {
        let mut state = AppState::default();
        state.set_dataset(dataset, report);
        WardLensApp { state }
    }
}

impl eframe::App for WardLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: summary + chart selector ----
        egui::SidePanel::left("summary_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: active chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_panel(ui, &self.state);
        });
    }
}
