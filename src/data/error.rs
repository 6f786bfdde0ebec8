use thiserror::Error;

/// The input could not be turned into a [`Table`](super::model::Table).
///
/// Always fatal for the load attempt: no partial table is produced.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No columns to parse from file (input is empty)")]
    Empty,

    #[error("Line {line}: expected {expected} fields, saw {found}")]
    TooManyFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Shape(#[from] TableError),
}

/// A filter referenced a column the table does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Column '{column}' does not exist")]
pub struct InvalidColumnError {
    pub column: String,
}

/// Columns handed to [`Table::from_columns`](super::model::Table::from_columns)
/// do not form a rectangular table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("Column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate column name '{0}'")]
    DuplicateName(String),
}
