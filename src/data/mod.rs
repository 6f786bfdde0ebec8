/// Data layer: core types, loading, filtering, and column metadata.
///
/// Architecture:
/// ```text
///      .csv bytes
///          │
///          ▼
///     ┌──────────┐
///     │  loader  │  parse + infer column types → Table
///     └──────────┘
///          │
///          ▼
///     ┌──────────┐
///     │  Table   │  typed columns, immutable
///     └──────────┘
///        │     │
///        ▼     ▼
///  ┌────────┐ ┌─────────┐
///  │ filter │ │ summary │  equality match → FilterResult / per-column counts
///  └────────┘ └─────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;

pub use error::{InvalidColumnError, ParseError, TableError};
pub use filter::{filter, FilterRequest, FilterResult};
pub use loader::{load, load_bytes, load_with, LoadOptions};
pub use model::{CellValue, Column, ColumnType, ColumnValues, Table};
pub use summary::{summarize, ColumnInfo, ColumnSummary};
