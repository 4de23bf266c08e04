/// Data layer: core types, parsing, and export.
///
/// Architecture:
/// ```text
///   ClCd*.dat (JavaFoil / Tecplot ZONE blocks)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → PolarDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ PolarDataset  │  Vec<ReynoldsBlock>, file order
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  optional CSV / JSON copy
///   └──────────┘
/// ```

pub mod error;
pub mod export;
pub mod label;
pub mod loader;
pub mod model;

pub use error::PolarError;
pub use loader::{load_file, parse_polars};
pub use model::{PolarDataset, ReynoldsBlock};
