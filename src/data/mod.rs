/// Data layer: reference tables, percentile estimation, and core types.
///
/// Architecture:
/// ```text
///  who-cdc-growth-data.json   hk2020-growth-data.json
///              │                      │
///              └──────────┬───────────┘
///                         ▼
///                   ┌──────────┐
///                   │  loader   │  parse + validate → ReferenceDataset
///                   └──────────┘
///                         │
///                         ▼
///                 ┌────────────────┐
///                 │ ReferenceDataset│  GrowthSeries per standard × gender
///                 └────────────────┘
///                         │
///                         ▼
///                   ┌────────────┐
///                   │ percentile  │  (age, height) → "62.4th"
///                   └────────────┘
/// ```

pub mod loader;
pub mod model;
pub mod percentile;
