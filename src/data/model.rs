use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// CellValue – a single cell in the table
// ---------------------------------------------------------------------------

/// A dynamically-typed table cell mirroring common dataframe dtypes.
/// `Null` is the missing-value sentinel written by failed coercions;
/// cleaning drops records that carry it in a required column.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDate),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Date(d) => write!(f, "{}", d.format("%d-%m-%Y")),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for numeric aggregation.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// The parsed calendar date, if this cell holds one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Coarse dtype label for the schema summary.
    pub fn dtype(&self) -> &'static str {
        match self {
            CellValue::String(_) => "text",
            CellValue::Integer(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::Bool(_) => "bool",
            CellValue::Date(_) => "date",
            CellValue::Null => "null",
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the table
// ---------------------------------------------------------------------------

/// A single patient record (one row of the source table).
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// Dynamic columns: column_name → cell.
    pub fields: BTreeMap<String, CellValue>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.fields.insert(column.to_string(), value);
    }

    /// Whether the record is missing a value in `column` (absent or `Null`).
    pub fn is_missing(&self, column: &str) -> bool {
        self.fields.get(column).map_or(true, CellValue::is_null)
    }
}

// ---------------------------------------------------------------------------
// PatientDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table, mutated in place by the cleaning steps.
#[derive(Debug, Clone, Default)]
pub struct PatientDataset {
    /// All records (rows).
    pub records: Vec<Record>,
    /// Column names in source order (header order for CSV input).
    pub column_names: Vec<String>,
}

impl PatientDataset {
    pub fn new(column_names: Vec<String>, records: Vec<Record>) -> Self {
        PatientDataset {
            records,
            column_names,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_names.iter().any(|c| c == column)
    }

    /// Append a column name if it is not already part of the schema.
    pub fn add_column(&mut self, column: &str) {
        if !self.has_column(column) {
            self.column_names.push(column.to_string());
        }
    }
}
