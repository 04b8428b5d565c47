/// Data layer: loading, normalisation, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  "2k" → 2000.0, validate header → Dataset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  Selection → FilteredView → long-form records
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
