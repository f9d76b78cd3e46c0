/// Data layer: core types, loading, filtering and the shared store.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  install once, read-only &'static access
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload predicates, per-site aggregates
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod store;
