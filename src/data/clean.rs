use chrono::NaiveDate;
use thiserror::Error;

use super::model::{CellValue, PatientDataset};

// ---------------------------------------------------------------------------
// Column names and formats (fixed by the dataset, not configurable)
// ---------------------------------------------------------------------------

pub const COL_AGE: &str = "Age";
pub const COL_BILLING: &str = "Billing Amount";
pub const COL_ADMISSION: &str = "Date of Admission";
pub const COL_DISCHARGE: &str = "Discharge Date";
pub const COL_PROVIDER: &str = "Insurance Provider";
pub const COL_LENGTH_OF_STAY: &str = "Length of Stay";

/// Day-month-year, e.g. `01-02-2020` for 1 February 2020.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Structural failures of the cleaning pass.  Row-level parse failures are
/// not errors: they become `CellValue::Null` and the row is dropped.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("expected column '{0}' not found in dataset")]
    MissingColumn(String),
}

/// Per-step drop counts, reported by [`clean_dataset`] for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanSummary {
    /// Rows removed because `Billing Amount` did not parse as a number.
    pub dropped_billing: usize,
    /// Rows removed (from the already billing-filtered set) because either
    /// date did not parse under [`DATE_FORMAT`].
    pub dropped_dates: usize,
}

// ---------------------------------------------------------------------------
// Coercion: parse-or-mark-missing, then bulk filter
// ---------------------------------------------------------------------------

/// Coerce `column` to a numeric cell in every record.  Text cells are
/// parsed as `f64`; cells that are already numeric pass through; anything
/// unparseable is overwritten with the `Null` sentinel.
pub fn coerce_numeric(dataset: &mut PatientDataset, column: &str) -> Result<(), CleanError> {
    require_column(dataset, column)?;

    for record in &mut dataset.records {
        let coerced = match record.get(column) {
            Some(CellValue::Integer(i)) => CellValue::Integer(*i),
            Some(CellValue::Float(f)) => CellValue::Float(*f),
            Some(CellValue::String(s)) => match s.trim().parse::<f64>() {
                Ok(f) => CellValue::Float(f),
                Err(_) => CellValue::Null,
            },
            _ => CellValue::Null,
        };
        record.set(column, coerced);
    }
    Ok(())
}

/// Coerce `column` to a calendar date using the fixed `format` pattern.
/// Cells that fail to parse are overwritten with the `Null` sentinel.
pub fn coerce_date(
    dataset: &mut PatientDataset,
    column: &str,
    format: &str,
) -> Result<(), CleanError> {
    require_column(dataset, column)?;

    for record in &mut dataset.records {
        let coerced = match record.get(column) {
            Some(CellValue::Date(d)) => CellValue::Date(*d),
            Some(CellValue::String(s)) => match NaiveDate::parse_from_str(s.trim(), format) {
                Ok(d) => CellValue::Date(d),
                Err(_) => CellValue::Null,
            },
            _ => CellValue::Null,
        };
        record.set(column, coerced);
    }
    Ok(())
}

/// Remove every record missing a value in any of `columns`.
/// Returns the number of records dropped.
pub fn drop_missing(dataset: &mut PatientDataset, columns: &[&str]) -> usize {
    let before = dataset.len();
    dataset
        .records
        .retain(|record| columns.iter().all(|col| !record.is_missing(col)));
    before - dataset.len()
}

/// Run the full cleaning sequence in its fixed order: billing coercion and
/// removal first, then date coercion and removal over the surviving rows.
pub fn clean_dataset(dataset: &mut PatientDataset) -> Result<CleanSummary, CleanError> {
    coerce_numeric(dataset, COL_BILLING)?;
    let dropped_billing = drop_missing(dataset, &[COL_BILLING]);

    coerce_date(dataset, COL_ADMISSION, DATE_FORMAT)?;
    coerce_date(dataset, COL_DISCHARGE, DATE_FORMAT)?;
    let dropped_dates = drop_missing(dataset, &[COL_ADMISSION, COL_DISCHARGE]);

    log::info!(
        "cleaned dataset: {} rows kept, {dropped_billing} dropped on billing, {dropped_dates} on dates",
        dataset.len()
    );

    Ok(CleanSummary {
        dropped_billing,
        dropped_dates,
    })
}

// ---------------------------------------------------------------------------
// Feature derivation
// ---------------------------------------------------------------------------

/// Derive `Length of Stay` = discharge − admission in whole days for every
/// record carrying both dates.  The difference is signed: inconsistent
/// source dates yield negative stays, which are kept as-is.
pub fn derive_length_of_stay(dataset: &mut PatientDataset) -> Result<(), CleanError> {
    require_column(dataset, COL_ADMISSION)?;
    require_column(dataset, COL_DISCHARGE)?;

    for record in &mut dataset.records {
        let admission = record.get(COL_ADMISSION).and_then(CellValue::as_date);
        let discharge = record.get(COL_DISCHARGE).and_then(CellValue::as_date);

        let stay = match (admission, discharge) {
            (Some(a), Some(d)) => CellValue::Integer((d - a).num_days()),
            _ => CellValue::Null,
        };
        record.set(COL_LENGTH_OF_STAY, stay);
    }
    dataset.add_column(COL_LENGTH_OF_STAY);
    Ok(())
}

fn require_column(dataset: &PatientDataset, column: &str) -> Result<(), CleanError> {
    if dataset.has_column(column) {
        Ok(())
    } else {
        Err(CleanError::MissingColumn(column.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Record;

    fn dataset(rows: &[(&str, &str, &str, &str)]) -> PatientDataset {
        let columns = vec![
            COL_AGE.to_string(),
            COL_BILLING.to_string(),
            COL_ADMISSION.to_string(),
            COL_DISCHARGE.to_string(),
            COL_PROVIDER.to_string(),
        ];
        let records = rows
            .iter()
            .enumerate()
            .map(|(i, (billing, admission, discharge, provider))| {
                let mut r = Record::default();
                r.set(COL_AGE, CellValue::Integer(40 + i as i64));
                r.set(COL_BILLING, CellValue::String(billing.to_string()));
                r.set(COL_ADMISSION, CellValue::String(admission.to_string()));
                r.set(COL_DISCHARGE, CellValue::String(discharge.to_string()));
                r.set(COL_PROVIDER, CellValue::String(provider.to_string()));
                r
            })
            .collect();
        PatientDataset::new(columns, records)
    }

    #[test]
    fn row_survives_when_every_field_parses() {
        let mut ds = dataset(&[("1000.50", "01-02-2020", "05-02-2020", "Medicare")]);
        let summary = clean_dataset(&mut ds).unwrap();
        derive_length_of_stay(&mut ds).unwrap();

        assert_eq!(summary, CleanSummary::default());
        assert_eq!(ds.len(), 1);
        assert_eq!(
            ds.records[0].get(COL_BILLING),
            Some(&CellValue::Float(1000.50))
        );
        assert_eq!(
            ds.records[0].get(COL_LENGTH_OF_STAY),
            Some(&CellValue::Integer(4))
        );
    }

    #[test]
    fn unparseable_billing_drops_row() {
        let mut ds = dataset(&[
            ("N/A", "01-02-2020", "05-02-2020", "Aetna"),
            ("250.00", "01-02-2020", "05-02-2020", "Aetna"),
        ]);
        let summary = clean_dataset(&mut ds).unwrap();

        assert_eq!(summary.dropped_billing, 1);
        assert_eq!(ds.len(), 1);
        assert_eq!(
            ds.records[0].get(COL_BILLING),
            Some(&CellValue::Float(250.0))
        );
    }

    #[test]
    fn invalid_month_drops_row() {
        let mut ds = dataset(&[("100.0", "31-13-2020", "05-02-2020", "Cigna")]);
        let summary = clean_dataset(&mut ds).unwrap();

        assert_eq!(summary.dropped_dates, 1);
        assert!(ds.is_empty());
    }

    #[test]
    fn billing_filter_runs_before_date_filter() {
        // A row failing both coercions is charged to the billing step only:
        // the date pass never sees it.
        let mut ds = dataset(&[("garbage", "99-99-9999", "05-02-2020", "Cigna")]);
        let summary = clean_dataset(&mut ds).unwrap();

        assert_eq!(summary.dropped_billing, 1);
        assert_eq!(summary.dropped_dates, 0);
    }

    #[test]
    fn negative_stay_passes_through() {
        // Discharge before admission: inconsistent data, kept unchanged.
        let mut ds = dataset(&[("100.0", "05-02-2020", "01-02-2020", "Cigna")]);
        clean_dataset(&mut ds).unwrap();
        derive_length_of_stay(&mut ds).unwrap();

        assert_eq!(
            ds.records[0].get(COL_LENGTH_OF_STAY),
            Some(&CellValue::Integer(-4))
        );
    }

    #[test]
    fn zero_day_stay_passes_through() {
        let mut ds = dataset(&[("100.0", "01-02-2020", "01-02-2020", "Cigna")]);
        clean_dataset(&mut ds).unwrap();
        derive_length_of_stay(&mut ds).unwrap();

        assert_eq!(
            ds.records[0].get(COL_LENGTH_OF_STAY),
            Some(&CellValue::Integer(0))
        );
    }

    #[test]
    fn already_numeric_billing_is_kept() {
        let mut ds = dataset(&[("1.0", "01-02-2020", "02-02-2020", "Cigna")]);
        ds.records[0].set(COL_BILLING, CellValue::Integer(900));
        clean_dataset(&mut ds).unwrap();

        assert_eq!(
            ds.records[0].get(COL_BILLING),
            Some(&CellValue::Integer(900))
        );
    }

    #[test]
    fn missing_column_is_a_structural_error() {
        let mut ds = PatientDataset::new(vec![COL_AGE.to_string()], Vec::new());
        let err = clean_dataset(&mut ds).unwrap_err();
        assert!(matches!(err, CleanError::MissingColumn(c) if c == COL_BILLING));
    }
}
