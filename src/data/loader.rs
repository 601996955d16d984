use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::{CellValue, PatientDataset, Record};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a patient dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with column names, one record per row
/// * `.json` – `[{ "Age": 45, "Billing Amount": "1000.50", ... }, ...]`
///
/// Cell types are guessed naively (integer, float, bool, text).  Date
/// columns stay text here; parsing them is a cleaning step with a fixed
/// format, not a load-time guess.
pub fn load_file(path: &Path) -> Result<PatientDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<PatientDataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_csv(file)
}

/// Parse CSV from any reader (files in production, strings in tests).
pub fn read_csv<R: Read>(reader: R) -> Result<PatientDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut fields = BTreeMap::new();
        for (col_idx, value) in row.iter().enumerate() {
            let Some(col_name) = headers.get(col_idx) else {
                bail!("CSV row {row_no} has more fields than the header");
            };
            fields.insert(col_name.clone(), guess_cell_value(value));
        }
        records.push(Record { fields });
    }

    Ok(PatientDataset::new(headers, records))
}

/// Naive type inference for a raw CSV field.
fn guess_cell_value(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, one object per row):
///
/// ```json
/// [
///   {
///     "Age": 45,
///     "Billing Amount": "1000.50",
///     "Date of Admission": "01-02-2020",
///     "Discharge Date": "05-02-2020",
///     "Insurance Provider": "Medicare"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<PatientDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let mut column_names: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut fields = BTreeMap::new();
        for (key, val) in obj {
            if !column_names.iter().any(|c| c == key) {
                column_names.push(key.clone());
            }
            fields.insert(key.clone(), json_to_cell(val));
        }
        records.push(Record { fields });
    }

    Ok(PatientDataset::new(column_names, records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_cell_types() {
        assert_eq!(guess_cell_value("45"), CellValue::Integer(45));
        assert_eq!(guess_cell_value("1000.50"), CellValue::Float(1000.50));
        assert_eq!(guess_cell_value("true"), CellValue::Bool(true));
        assert_eq!(
            guess_cell_value("Medicare"),
            CellValue::String("Medicare".to_string())
        );
        assert_eq!(guess_cell_value(""), CellValue::Null);
    }

    #[test]
    fn dates_stay_text_at_load_time() {
        // "01-02-2020" is neither an integer nor a float, so inference
        // leaves it as text for the cleaning pass to coerce.
        assert_eq!(
            guess_cell_value("01-02-2020"),
            CellValue::String("01-02-2020".to_string())
        );
    }

    #[test]
    fn reads_csv_with_inferred_types() {
        let csv = "\
Age,Billing Amount,Date of Admission,Discharge Date,Insurance Provider
45,1000.50,01-02-2020,05-02-2020,Medicare
60,N/A,10-03-2020,12-03-2020,Aetna
";
        let ds = read_csv(csv.as_bytes()).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.column_names,
            vec![
                "Age",
                "Billing Amount",
                "Date of Admission",
                "Discharge Date",
                "Insurance Provider"
            ]
        );
        assert_eq!(ds.records[0].get("Age"), Some(&CellValue::Integer(45)));
        assert_eq!(
            ds.records[0].get("Billing Amount"),
            Some(&CellValue::Float(1000.50))
        );
        // Unparseable billing stays text until coercion marks it missing.
        assert_eq!(
            ds.records[1].get("Billing Amount"),
            Some(&CellValue::String("N/A".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("data.parquet")).unwrap_err();
        assert!(err.to_string().contains("Unsupported file extension"));
    }
}
