/// Data layer: core types, loading, cleaning, and aggregation.
///
/// Pipeline:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → PatientDataset (cells typed naively)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  coerce billing + dates, drop unparseable rows,
///   └──────────┘  derive Length of Stay
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  head / schema summary / Report aggregates
///   └──────────┘
/// ```

pub mod clean;
pub mod loader;
pub mod model;
pub mod stats;
