use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;

use super::error::TableError;

// ---------------------------------------------------------------------------
// ColumnType – the type inferred for a whole column at load time
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Float,
    Boolean,
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Integer => "integer",
            ColumnType::Float => "float",
            ColumnType::Boolean => "boolean",
            ColumnType::Text => "text",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// CellValue – a borrowed view of a single cell
// ---------------------------------------------------------------------------

/// One cell of a [`Column`], tagged with the column's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellValue<'a> {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Text(&'a str),
    Null,
}

impl<'a> CellValue<'a> {
    /// Canonical string form used for equality filtering.
    ///
    /// `None` for a missing value, so a null never compares equal to any
    /// user-supplied string (the empty string included).
    pub fn canonical(&self) -> Option<Cow<'a, str>> {
        match *self {
            CellValue::Integer(i) => Some(Cow::Owned(i.to_string())),
            CellValue::Float(v) => Some(Cow::Owned(format_float(v))),
            CellValue::Boolean(b) => Some(Cow::Borrowed(if b { "true" } else { "false" })),
            CellValue::Text(s) => Some(Cow::Borrowed(s)),
            CellValue::Null => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

impl fmt::Display for CellValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            Some(s) => f.write_str(&s),
            None => f.write_str("<null>"),
        }
    }
}

/// Render a float as the shortest decimal that round-trips, without
/// exponent notation. Integral finite values keep a trailing `.0`.
pub fn format_float(v: f64) -> String {
    let mut s = v.to_string();
    if v.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

// ---------------------------------------------------------------------------
// ColumnValues – typed storage for one column
// ---------------------------------------------------------------------------

/// Cell storage, one typed vector per column. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    Text(Vec<Option<String>>),
}

impl ColumnValues {
    pub fn dtype(&self) -> ColumnType {
        match self {
            ColumnValues::Integer(_) => ColumnType::Integer,
            ColumnValues::Float(_) => ColumnType::Float,
            ColumnValues::Boolean(_) => ColumnType::Boolean,
            ColumnValues::Text(_) => ColumnType::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Integer(v) => v.len(),
            ColumnValues::Float(v) => v.len(),
            ColumnValues::Boolean(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `row`; out-of-range rows read as [`CellValue::Null`].
    pub fn get(&self, row: usize) -> CellValue<'_> {
        let cell = match self {
            ColumnValues::Integer(v) => v.get(row).copied().flatten().map(CellValue::Integer),
            ColumnValues::Float(v) => v.get(row).copied().flatten().map(CellValue::Float),
            ColumnValues::Boolean(v) => v.get(row).copied().flatten().map(CellValue::Boolean),
            ColumnValues::Text(v) => v
                .get(row)
                .and_then(|s| s.as_deref())
                .map(CellValue::Text),
        };
        cell.unwrap_or(CellValue::Null)
    }

    /// New storage holding only `rows`, in the given order.
    fn take(&self, rows: &[usize]) -> ColumnValues {
        fn pick<T: Clone>(v: &[Option<T>], rows: &[usize]) -> Vec<Option<T>> {
            rows.iter()
                .map(|&r| v.get(r).cloned().flatten())
                .collect()
        }
        match self {
            ColumnValues::Integer(v) => ColumnValues::Integer(pick(v, rows)),
            ColumnValues::Float(v) => ColumnValues::Float(pick(v, rows)),
            ColumnValues::Boolean(v) => ColumnValues::Boolean(pick(v, rows)),
            ColumnValues::Text(v) => ColumnValues::Text(pick(v, rows)),
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: ColumnValues,
}

impl Column {
    pub fn new(name: impl Into<String>, values: ColumnValues) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dtype(&self) -> ColumnType {
        self.values.dtype()
    }

    pub fn values(&self) -> &ColumnValues {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> CellValue<'_> {
        self.values.get(row)
    }

    /// Canonical string of the cell at `row`, `None` when missing.
    pub fn coerce(&self, row: usize) -> Option<Cow<'_, str>> {
        self.get(row).canonical()
    }

    /// `(present, missing)` counts. Every cell lands in exactly one bucket.
    pub fn counts(&self) -> (usize, usize) {
        (0..self.len()).fold((0, 0), |(present, missing), row| {
            if self.get(row).is_null() {
                (present, missing + 1)
            } else {
                (present + 1, missing)
            }
        })
    }

    /// Number of distinct values; all missing cells count as one value.
    pub fn unique_count(&self) -> usize {
        let mut seen: HashSet<Option<Cow<'_, str>>> = HashSet::new();
        for row in 0..self.len() {
            seen.insert(self.coerce(row));
        }
        seen.len()
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded file
// ---------------------------------------------------------------------------

/// Immutable, rectangular set of uniquely named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Assemble a table, checking that names are unique and every column
    /// has the same length.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map(Column::len).unwrap_or(0);
        let mut names = HashSet::new();
        for col in &columns {
            if !names.insert(col.name()) {
                return Err(TableError::DuplicateName(col.name().to_string()));
            }
            if col.len() != n_rows {
                return Err(TableError::LengthMismatch {
                    column: col.name().to_string(),
                    expected: n_rows,
                    found: col.len(),
                });
            }
        }
        Ok(Table { columns, n_rows })
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = CellValue<'_>> + '_ {
        self.columns.iter().map(move |c| c.get(row))
    }

    /// Derived table with the same columns and only the given rows.
    pub fn take(&self, rows: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.values.take(rows)))
            .collect();
        Table {
            columns,
            n_rows: rows.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_columns(vec![
            Column::new(
                "id",
                ColumnValues::Integer(vec![Some(1), None, Some(3)]),
            ),
            Column::new(
                "label",
                ColumnValues::Text(vec![Some("a".into()), Some("b".into()), None]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn float_formatting_is_canonical() {
        assert_eq!(format_float(3.0), "3.0");
        assert_eq!(format_float(2.5), "2.5");
        assert_eq!(format_float(-0.0), "-0.0");
        assert_eq!(format_float(0.1), "0.1");
        assert_eq!(format_float(1e20), "100000000000000000000.0");
        assert_eq!(format_float(1e23), "100000000000000000000000.0");
        assert_eq!(format_float(1e-7), "0.0000001");
        assert_eq!(format_float(f64::NAN), "NaN");
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn null_has_no_canonical_form() {
        assert_eq!(CellValue::Null.canonical(), None);
        assert_eq!(CellValue::Text("").canonical().as_deref(), Some(""));
        assert_eq!(CellValue::Boolean(true).canonical().as_deref(), Some("true"));
        assert_eq!(CellValue::Null.to_string(), "<null>");
    }

    #[test]
    fn from_columns_rejects_ragged_columns() {
        let err = Table::from_columns(vec![
            Column::new("a", ColumnValues::Integer(vec![Some(1), Some(2)])),
            Column::new("b", ColumnValues::Integer(vec![Some(1)])),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TableError::LengthMismatch {
                column: "b".into(),
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_columns_rejects_duplicate_names() {
        let err = Table::from_columns(vec![
            Column::new("a", ColumnValues::Boolean(vec![])),
            Column::new("a", ColumnValues::Boolean(vec![])),
        ])
        .unwrap_err();
        assert_eq!(err, TableError::DuplicateName("a".into()));
    }

    #[test]
    fn counts_partition_every_cell() {
        let table = sample();
        for col in table.columns() {
            let (present, missing) = col.counts();
            assert_eq!(present + missing, table.n_rows());
        }
        assert_eq!(table.column("id").unwrap().counts(), (2, 1));
    }

    #[test]
    fn take_keeps_columns_and_selects_rows() {
        let table = sample();
        let sub = table.take(&[2, 0]);
        assert_eq!(sub.column_names(), table.column_names());
        assert_eq!(sub.n_rows(), 2);
        let first: Vec<String> = sub.row(0).map(|c| c.to_string()).collect();
        assert_eq!(first, vec!["3", "<null>"]);
        assert_eq!(table.n_rows(), 3);
    }

    #[test]
    fn unique_count_treats_nulls_as_one_value() {
        let col = Column::new(
            "x",
            ColumnValues::Text(vec![Some("a".into()), None, Some("a".into()), None]),
        );
        assert_eq!(col.unique_count(), 2);
    }
}
