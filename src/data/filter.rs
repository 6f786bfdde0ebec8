use super::error::InvalidColumnError;
use super::model::{Column, Table};

// ---------------------------------------------------------------------------
// Filter request / result
// ---------------------------------------------------------------------------

/// "Keep the rows whose `column` reads exactly `value`."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub column: String,
    pub value: String,
}

impl FilterRequest {
    pub fn new(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Evaluate against `table`. The table is never modified.
    pub fn apply(&self, table: &Table) -> Result<FilterResult, InvalidColumnError> {
        let column = table.column(&self.column).ok_or_else(|| InvalidColumnError {
            column: self.column.clone(),
        })?;

        let rows = matching_rows(column, &self.value);
        log::info!(
            "Filter {}={:?}: {} of {} rows match",
            self.column,
            self.value,
            rows.len(),
            table.n_rows()
        );

        Ok(FilterResult {
            table: table.take(&rows),
            rows,
            request: self.clone(),
        })
    }
}

/// Rows selected by a [`FilterRequest`], with the source table's columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    request: FilterRequest,
    rows: Vec<usize>,
    table: Table,
}

impl FilterResult {
    pub fn request(&self) -> &FilterRequest {
        &self.request
    }

    /// Indices of the matching rows in the source table, ascending.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// The matching rows as a table of their own.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Whether any row matched. A `false` result still carries the column
    /// structure; falling back to the full table is up to the caller.
    pub fn matched(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Filter `table` down to the rows whose `column` coerces to `value`.
pub fn filter(
    table: &Table,
    column: &str,
    value: &str,
) -> Result<FilterResult, InvalidColumnError> {
    FilterRequest::new(column, value).apply(table)
}

/// Indices of the rows whose canonical string equals `value` byte-for-byte.
/// Missing cells never match.
pub fn matching_rows(column: &Column, value: &str) -> Vec<usize> {
    (0..column.len())
        .filter(|&row| column.coerce(row).is_some_and(|s| s == value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;
    use crate::data::model::ColumnValues;

    fn people() -> Table {
        load_bytes(b"name,age\nAlice,30\nBob,\nCarol,30").unwrap()
    }

    fn names(result: &FilterResult) -> Vec<String> {
        let name = result.table().column("name").unwrap();
        (0..name.len()).map(|r| name.get(r).to_string()).collect()
    }

    #[test]
    fn matches_integer_column_by_decimal_text() {
        let result = filter(&people(), "age", "30").unwrap();
        assert!(result.matched());
        assert_eq!(result.rows(), &[0, 2]);
        assert_eq!(names(&result), vec!["Alice", "Carol"]);
    }

    #[test]
    fn no_match_sets_flag_and_keeps_columns() {
        let table = people();
        let result = filter(&table, "age", "99").unwrap();
        assert!(!result.matched());
        assert!(result.is_empty());
        assert_eq!(result.table().n_rows(), 0);
        assert_eq!(result.table().column_names(), table.column_names());
    }

    #[test]
    fn unknown_column_is_an_error() {
        let err = filter(&people(), "missing_col", "x").unwrap_err();
        assert_eq!(
            err,
            InvalidColumnError {
                column: "missing_col".into()
            }
        );
    }

    #[test]
    fn empty_value_never_matches_missing_cells() {
        let table = people();
        for col in table.column_names() {
            let result = filter(&table, col, "").unwrap();
            assert!(!result.matched(), "column {col} matched the empty string");
        }
    }

    #[test]
    fn empty_value_matches_genuinely_empty_text() {
        let table = Table::from_columns(vec![Column::new(
            "t",
            ColumnValues::Text(vec![Some("".into()), None, Some("x".into()), Some("".into())]),
        )])
        .unwrap();
        let result = filter(&table, "t", "").unwrap();
        assert_eq!(result.rows(), &[0, 3]);
    }

    #[test]
    fn comparison_is_exact() {
        let table = load_bytes(b"city\nParis\nparis\n Paris\nParisian\n").unwrap();
        let result = filter(&table, "city", "Paris").unwrap();
        assert_eq!(result.rows(), &[0]);
    }

    #[test]
    fn floats_and_booleans_use_canonical_form() {
        let table = load_bytes(b"price,ok\n3,TRUE\n2.50,false\n3.0,True\n").unwrap();
        assert_eq!(filter(&table, "price", "3.0").unwrap().rows(), &[0, 2]);
        assert_eq!(filter(&table, "price", "3").unwrap().rows(), &[] as &[usize]);
        assert_eq!(filter(&table, "price", "2.5").unwrap().rows(), &[1]);
        assert_eq!(filter(&table, "ok", "true").unwrap().rows(), &[0, 2]);
        assert!(!filter(&table, "ok", "TRUE").unwrap().matched());
    }

    #[test]
    fn empty_table_filters_to_nothing() {
        let table = load_bytes(b"a,b\n").unwrap();
        let result = filter(&table, "a", "1").unwrap();
        assert!(!result.matched());
        assert_eq!(result.table().n_cols(), 2);
    }

    #[test]
    fn filtering_is_idempotent_and_leaves_source_alone() {
        let table = people();
        let before = table.clone();
        let first = filter(&table, "name", "Bob").unwrap();
        let second = filter(&table, "name", "Bob").unwrap();
        assert_eq!(first, second);
        assert_eq!(table, before);
        assert!(first.len() <= table.n_rows());
    }
}
