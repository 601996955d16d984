use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ProviderColors;
use crate::data::stats::Report;
use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render the active chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to explore admissions  (File → Open…)");
            });
            return;
        }
    };

    match state.chart {
        ChartKind::AgeHistogram => age_histogram(ui, report),
        ChartKind::BillingByProvider => billing_by_provider(ui, report, &state.provider_colors),
        ChartKind::AdmissionsOverTime => admissions_over_time(ui, report),
    }
}

// ---------------------------------------------------------------------------
// 1. Histogram of patient ages
// ---------------------------------------------------------------------------

fn age_histogram(ui: &mut Ui, report: &Report) {
    let hist = &report.age_histogram;
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|&(center, count)| {
            Bar::new(center, count as f64)
                .width(hist.bin_width)
                .fill(Color32::LIGHT_BLUE)
        })
        .collect();

    Plot::new("age_histogram")
        .legend(Legend::default())
        .x_axis_label("Age")
        .y_axis_label("Frequency")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Distribution of Patient Ages"));
        });
}

// ---------------------------------------------------------------------------
// 2. Mean billing amount per insurance provider (descending)
// ---------------------------------------------------------------------------

fn billing_by_provider(ui: &mut Ui, report: &Report, colors: &ProviderColors) {
    let bars: Vec<Bar> = report
        .billing_by_provider
        .iter()
        .enumerate()
        .map(|(i, (provider, mean))| {
            Bar::new(i as f64, *mean)
                .width(0.6)
                .fill(colors.color_for(provider))
                .name(provider)
        })
        .collect();

    let labels: Vec<String> = report
        .billing_by_provider
        .iter()
        .map(|(provider, _)| provider.clone())
        .collect();

    Plot::new("billing_by_provider")
        .legend(Legend::default())
        .x_axis_label("Insurance Provider")
        .y_axis_label("Average Billing Amount ($)")
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars).name("Average Billing Amount by Insurance Provider"),
            );
        });
}

// ---------------------------------------------------------------------------
// 3. Admissions over time
// ---------------------------------------------------------------------------

fn admissions_over_time(ui: &mut Ui, report: &Report) {
    // Plot x is the chrono day number, formatted back into dates below.
    let points: Vec<[f64; 2]> = report
        .admissions_over_time
        .iter()
        .map(|(date, count)| [f64::from(date.num_days_from_ce()), *count as f64])
        .collect();

    Plot::new("admissions_over_time")
        .legend(Legend::default())
        .x_axis_label("Date")
        .y_axis_label("Number of Admissions")
        .x_axis_formatter(|mark, _range| {
            NaiveDate::from_num_days_from_ce_opt(mark.value.round() as i32)
                .map(|d| d.format("%d-%m-%Y").to_string())
                .unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            let line_points: PlotPoints = points.clone().into();
            plot_ui.line(
                Line::new(line_points)
                    .name("Number of Admissions Over Time")
                    .width(1.5),
            );
            plot_ui.points(Points::new(PlotPoints::from(points)).radius(2.5));
        });
}
