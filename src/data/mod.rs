/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ExhibitionDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ ExhibitionDataset │  Vec<Record>, sorted nationalities
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  four predicates → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  top artists, artist × year, countries, summary
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
