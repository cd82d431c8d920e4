/// Data layer: core types and table loading.
///
/// Architecture:
/// ```text
///  .csv / .json (x4)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → typed rows, exact column checks
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  four row vectors, year lookups
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
