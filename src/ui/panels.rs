use std::path::Path;

use anyhow::Result;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::clean;
use crate::data::loader;
use crate::data::model::PatientDataset;
use crate::data::stats::Report;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – summary statistics and chart selector
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Summary");
    ui.separator();

    let Some(report) = &state.report else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("Records: {}", report.record_count));
            ui.label(format!("Average age: {:.2} years", report.mean_age));
            ui.label(format!("Max billing: ${:.2}", report.max_billing));
            ui.label(format!("Min billing: ${:.2}", report.min_billing));
            ui.separator();

            // ---- Chart selector ----
            ui.strong("Chart");
            for kind in ChartKind::ALL {
                ui.radio_value(&mut state.chart, kind, kind.label());
            }
            ui.separator();

            // ---- Per-provider means, descending, with colour swatches ----
            ui.strong("Mean billing by provider");
            for (provider, mean) in &report.billing_by_provider {
                let color = state.provider_colors.color_for(provider);
                ui.horizontal(|ui: &mut Ui| {
                    ui.label(RichText::new("■").color(color));
                    ui.label(format!("{provider}: ${mean:.2}"));
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
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} records after cleaning", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open admissions data")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        match load_and_clean(&path) {
            Ok((dataset, report)) => {
                log::info!(
                    "Loaded {} cleaned records with columns {:?}",
                    dataset.len(),
                    dataset.column_names
                );
                state.set_dataset(dataset, report);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

/// Run the whole pipeline (load → clean → derive → aggregate) on one file.
fn load_and_clean(path: &Path) -> Result<(PatientDataset, Report)> {
    let mut dataset = loader::load_file(path)?;
    clean::clean_dataset(&mut dataset)?;
    clean::derive_length_of_stay(&mut dataset)?;
    let report = Report::from_dataset(&dataset);
    Ok((dataset, report))
}
