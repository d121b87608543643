/// Data layer: core types, loading, filtering, aggregation and export.
///
/// Architecture:
/// ```text
///  StudentsPerformance.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → StudentDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ StudentDataset │  Vec<StudentRecord>, category index
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category predicates → filtered indices
///   └──────────┘
///        │
///        ├──► stats   grade counts, group means, score correlation
///        └──► export  filtered rows → CSV
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
