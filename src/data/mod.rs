/// Data layer: records, loading, filtering and chart recomputation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, sites, payload bounds (read-only)
///   └───────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ recompute  │  controls (site, payload range) → chart specs
///   └───────────┘
/// ```

pub mod chart;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod recompute;
