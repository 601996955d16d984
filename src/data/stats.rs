use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;

use super::clean::{COL_ADMISSION, COL_AGE, COL_BILLING, COL_PROVIDER};
use super::model::{CellValue, PatientDataset};

/// Bin count for the age histogram.
const AGE_BINS: usize = 15;

// ---------------------------------------------------------------------------
// Console inspection output (head / schema summary)
// ---------------------------------------------------------------------------

/// First `n` rows rendered as an aligned text table.
pub fn head(dataset: &PatientDataset, n: usize) -> String {
    let rows: Vec<Vec<String>> = dataset
        .records
        .iter()
        .take(n)
        .map(|record| {
            dataset
                .column_names
                .iter()
                .map(|col| {
                    record
                        .get(col)
                        .map(CellValue::to_string)
                        .unwrap_or_else(|| "<null>".to_string())
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = dataset
        .column_names
        .iter()
        .enumerate()
        .map(|(i, col)| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(col.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for (col, &w) in dataset.column_names.iter().zip(&widths) {
        let _ = write!(out, "{col:>w$}  ");
    }
    out.push('\n');
    for row in &rows {
        for (cell, &w) in row.iter().zip(&widths) {
            let _ = write!(out, "{cell:>w$}  ");
        }
        out.push('\n');
    }
    out
}

/// Per-column non-null counts and inferred dtypes, `df.info()` style.
pub fn schema_summary(dataset: &PatientDataset) -> String {
    let mut out = format!(
        "{} records, {} columns\n",
        dataset.len(),
        dataset.column_names.len()
    );
    let name_width = dataset
        .column_names
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0);

    for col in &dataset.column_names {
        let non_null = dataset
            .records
            .iter()
            .filter(|r| !r.is_missing(col))
            .count();
        let dtype = column_dtype(dataset, col);
        let _ = writeln!(out, "{col:<name_width$}  {non_null:>8} non-null  {dtype}");
    }
    out
}

/// Dtype label shared by every non-null cell of a column, or "mixed".
fn column_dtype(dataset: &PatientDataset, column: &str) -> &'static str {
    let mut dtype: Option<&'static str> = None;
    for record in &dataset.records {
        match record.get(column) {
            None | Some(CellValue::Null) => continue,
            Some(cell) => match dtype {
                None => dtype = Some(cell.dtype()),
                Some(d) if d == cell.dtype() => {}
                Some(_) => return "mixed",
            },
        }
    }
    dtype.unwrap_or("null")
}

// ---------------------------------------------------------------------------
// Report – the aggregate views consumed by the console and the charts
// ---------------------------------------------------------------------------

/// Histogram of the `Age` column over [`AGE_BINS`] equal-width bins.
#[derive(Debug, Clone, Default)]
pub struct AgeHistogram {
    pub bin_width: f64,
    /// (bin center, count) per bin, in ascending age order.
    pub bins: Vec<(f64, usize)>,
}

/// Read-only aggregates over the cleaned table.  Computing this never
/// mutates the dataset; an empty table yields NaN means and empty groupings.
#[derive(Debug, Clone)]
pub struct Report {
    pub record_count: usize,
    pub mean_age: f64,
    pub max_billing: f64,
    pub min_billing: f64,
    /// (provider, mean billing), sorted descending by mean.
    pub billing_by_provider: Vec<(String, f64)>,
    /// (admission date, record count), ascending by date.
    pub admissions_over_time: Vec<(NaiveDate, usize)>,
    pub age_histogram: AgeHistogram,
}

impl Report {
    pub fn from_dataset(dataset: &PatientDataset) -> Self {
        let ages: Vec<f64> = numeric_column(dataset, COL_AGE);
        let billing: Vec<f64> = numeric_column(dataset, COL_BILLING);

        Report {
            record_count: dataset.len(),
            mean_age: mean(&ages),
            max_billing: billing.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_billing: billing.iter().copied().fold(f64::INFINITY, f64::min),
            billing_by_provider: billing_by_provider(dataset),
            admissions_over_time: admissions_over_time(dataset),
            age_histogram: age_histogram(&ages),
        }
    }
}

fn numeric_column(dataset: &PatientDataset, column: &str) -> Vec<f64> {
    dataset
        .records
        .iter()
        .filter_map(|r| r.get(column).and_then(CellValue::as_f64))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean billing per insurance provider, sorted descending by mean.
/// Ties keep their first-seen relative order (stable sort).
fn billing_by_provider(dataset: &PatientDataset) -> Vec<(String, f64)> {
    let mut groups: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in &dataset.records {
        let Some(amount) = record.get(COL_BILLING).and_then(CellValue::as_f64) else {
            continue;
        };
        let provider = record
            .get(COL_PROVIDER)
            .map(CellValue::to_string)
            .unwrap_or_else(|| "<null>".to_string());
        let entry = groups.entry(provider).or_insert((0.0, 0));
        entry.0 += amount;
        entry.1 += 1;
    }

    let mut means: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(provider, (sum, n))| (provider, sum / n as f64))
        .collect();
    means.sort_by(|a, b| b.1.total_cmp(&a.1));
    means
}

/// Admission counts per date; the BTreeMap keeps dates ascending.
fn admissions_over_time(dataset: &PatientDataset) -> Vec<(NaiveDate, usize)> {
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for record in &dataset.records {
        if let Some(date) = record.get(COL_ADMISSION).and_then(CellValue::as_date) {
            *counts.entry(date).or_default() += 1;
        }
    }
    counts.into_iter().collect()
}

fn age_histogram(ages: &[f64]) -> AgeHistogram {
    if ages.is_empty() {
        return AgeHistogram::default();
    }
    let min = ages.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    let bin_width = if range > 0.0 {
        range / AGE_BINS as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; AGE_BINS];
    for &age in ages {
        let idx = (((age - min) / bin_width) as usize).min(AGE_BINS - 1);
        counts[idx] += 1;
    }

    AgeHistogram {
        bin_width,
        bins: counts
            .into_iter()
            .enumerate()
            .map(|(i, n)| (min + (i as f64 + 0.5) * bin_width, n))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::COL_DISCHARGE;
    use crate::data::model::Record;

    fn date(d: u32, m: u32, y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cleaned_record(age: i64, billing: f64, provider: &str, admission: NaiveDate) -> Record {
        let mut r = Record::default();
        r.set(COL_AGE, CellValue::Integer(age));
        r.set(COL_BILLING, CellValue::Float(billing));
        r.set(COL_PROVIDER, CellValue::String(provider.to_string()));
        r.set(COL_ADMISSION, CellValue::Date(admission));
        r.set(COL_DISCHARGE, CellValue::Date(admission));
        r
    }

    fn cleaned_dataset(records: Vec<Record>) -> PatientDataset {
        let columns = vec![
            COL_AGE.to_string(),
            COL_BILLING.to_string(),
            COL_ADMISSION.to_string(),
            COL_DISCHARGE.to_string(),
            COL_PROVIDER.to_string(),
        ];
        PatientDataset::new(columns, records)
    }

    #[test]
    fn provider_means_sort_descending() {
        // A averages 500, B averages 1500: B must come first.
        let ds = cleaned_dataset(vec![
            cleaned_record(40, 400.0, "A", date(1, 1, 2020)),
            cleaned_record(41, 600.0, "A", date(2, 1, 2020)),
            cleaned_record(42, 1500.0, "B", date(3, 1, 2020)),
        ]);
        let report = Report::from_dataset(&ds);

        assert_eq!(
            report.billing_by_provider,
            vec![("B".to_string(), 1500.0), ("A".to_string(), 500.0)]
        );
    }

    #[test]
    fn admission_counts_ascend_by_date() {
        let ds = cleaned_dataset(vec![
            cleaned_record(40, 100.0, "A", date(9, 3, 2020)),
            cleaned_record(41, 100.0, "A", date(1, 1, 2020)),
            cleaned_record(42, 100.0, "A", date(9, 3, 2020)),
        ]);
        let report = Report::from_dataset(&ds);

        assert_eq!(
            report.admissions_over_time,
            vec![(date(1, 1, 2020), 1), (date(9, 3, 2020), 2)]
        );
    }

    #[test]
    fn statistics_cover_only_present_rows() {
        let ds = cleaned_dataset(vec![
            cleaned_record(30, 100.0, "A", date(1, 1, 2020)),
            cleaned_record(50, 900.0, "B", date(2, 1, 2020)),
        ]);
        let report = Report::from_dataset(&ds);

        assert_eq!(report.record_count, 2);
        assert_eq!(report.mean_age, 40.0);
        assert_eq!(report.max_billing, 900.0);
        assert_eq!(report.min_billing, 100.0);
    }

    #[test]
    fn empty_dataset_yields_nan_means() {
        let report = Report::from_dataset(&cleaned_dataset(Vec::new()));
        assert!(report.mean_age.is_nan());
        assert!(report.billing_by_provider.is_empty());
        assert!(report.admissions_over_time.is_empty());
        assert!(report.age_histogram.bins.is_empty());
    }

    #[test]
    fn age_histogram_spans_min_to_max() {
        let records = (0..30)
            .map(|i| cleaned_record(20 + i, 100.0, "A", date(1, 1, 2020)))
            .collect();
        let report = Report::from_dataset(&cleaned_dataset(records));
        let hist = &report.age_histogram;

        assert_eq!(hist.bins.len(), 15);
        assert_eq!(hist.bins.iter().map(|(_, n)| n).sum::<usize>(), 30);
        // 30 ages over 15 bins of width ~1.93 → every bin occupied.
        assert!(hist.bins.iter().all(|(_, n)| *n > 0));
    }

    #[test]
    fn schema_summary_reports_dtypes_and_non_null_counts() {
        let mut missing = cleaned_record(40, 100.0, "A", date(1, 1, 2020));
        missing.set(COL_BILLING, CellValue::Null);
        let ds = cleaned_dataset(vec![
            cleaned_record(30, 100.0, "A", date(1, 1, 2020)),
            missing,
        ]);

        let info = schema_summary(&ds);
        assert!(info.starts_with("2 records, 5 columns"));
        assert!(info.contains("Billing Amount"));
        // One of two billing cells is the missing sentinel.
        assert!(info.lines().any(|l| l.contains("Billing Amount") && l.contains("1 non-null")));
    }

    #[test]
    fn head_limits_rows_and_keeps_column_order() {
        let ds = cleaned_dataset(vec![
            cleaned_record(30, 100.0, "A", date(1, 1, 2020)),
            cleaned_record(31, 100.0, "A", date(1, 1, 2020)),
            cleaned_record(32, 100.0, "A", date(1, 1, 2020)),
        ]);
        let preview = head(&ds, 2);

        assert_eq!(preview.lines().count(), 3); // header + 2 rows
        let header = preview.lines().next().unwrap();
        assert!(header.trim_start().starts_with("Age"));
    }
}
