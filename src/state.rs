use crate::color::ProviderColors;
use crate::data::model::PatientDataset;
use crate::data::stats::Report;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which of the three exploratory charts fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    AgeHistogram,
    BillingByProvider,
    AdmissionsOverTime,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [
        ChartKind::AgeHistogram,
        ChartKind::BillingByProvider,
        ChartKind::AdmissionsOverTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::AgeHistogram => "Age distribution",
            ChartKind::BillingByProvider => "Billing by provider",
            ChartKind::AdmissionsOverTime => "Admissions over time",
        }
    }
}

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Cleaned dataset (None until a file loads successfully).
    pub dataset: Option<PatientDataset>,

    /// Aggregates over the cleaned dataset, rebuilt on every load.
    pub report: Option<Report>,

    /// Colour per insurance provider for the billing chart.
    pub provider_colors: ProviderColors,

    /// Chart currently shown in the central panel.
    pub chart: ChartKind,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl AppState {
    /// Ingest a cleaned dataset, rebuilding the report and colours.
    pub fn set_dataset(&mut self, dataset: PatientDataset, report: Report) {
        self.provider_colors = ProviderColors::new(
            report
                .billing_by_provider
                .iter()
                .map(|(provider, _)| provider.as_str()),
        );
        self.report = Some(report);
        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }
}
