/// Data layer: core types, loading, classification, filtering, aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (cached in TableStore)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ classify  │  column dtype → categorical / numeric sets
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply "All"-or-value selection → derived Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ aggregate │  bar / line series, count / mean / max
///   └──────────┘
/// ```

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
