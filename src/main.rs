mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, Result};
use app::WardLensApp;
use eframe::egui;

use data::clean;
use data::loader;
use data::stats::{self, Report};

/// The dataset lives next to the binary; regenerate it with
/// `cargo run --bin generate_sample`.
const DATASET_PATH: &str = "healthcare_dataset.csv";

fn main() -> Result<()> {
    env_logger::init();

    // ---- Load and inspect ----
    let mut dataset = loader::load_file(Path::new(DATASET_PATH))?;
    println!("--- Initial Data Inspection ---");
    print!("{}", stats::head(&dataset, 5));
    println!("\n--- Data Information ---");
    print!("{}", stats::schema_summary(&dataset));

    // ---- Clean and derive ----
    let summary = clean::clean_dataset(&mut dataset)?;
    log::debug!(
        "dropped {} rows on billing, {} on dates",
        summary.dropped_billing,
        summary.dropped_dates
    );
    clean::derive_length_of_stay(&mut dataset)?;

    // ---- Basic statistics ----
    let report = Report::from_dataset(&dataset);
    println!("\n--- Basic Statistics ---");
    println!("Average Age: {:.2} years", report.mean_age);
    println!("Maximum Billing Amount: ${:.2}", report.max_billing);
    println!("Minimum Billing Amount: ${:.2}", report.min_billing);

    // ---- Charts ----
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ward Lens – Admissions Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(WardLensApp::with_dataset(dataset, report)))),
    )
    .map_err(|e| anyhow!("running viewer: {e}"))
}
