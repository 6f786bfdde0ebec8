use std::collections::HashSet;
use std::io::Read;

use csv::StringRecord;

use super::error::ParseError;
use super::model::{Column, ColumnType, ColumnValues, Table};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Parser settings. The defaults read plain comma-separated text where only
/// empty cells count as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field separator byte.
    pub delimiter: u8,
    /// Extra cell contents treated as missing, in addition to the empty cell.
    pub na_values: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            na_values: Vec::new(),
        }
    }
}

impl LoadOptions {
    fn is_missing(&self, field: &str) -> bool {
        field.is_empty() || self.na_values.iter().any(|na| na == field)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse CSV bytes with default options.
pub fn load_bytes(bytes: &[u8]) -> Result<Table, ParseError> {
    load(bytes)
}

/// Parse CSV from any reader with default options.
pub fn load<R: Read>(reader: R) -> Result<Table, ParseError> {
    load_with(reader, &LoadOptions::default())
}

/// Parse delimited text into a [`Table`].
///
/// The first record is the header. Rows shorter than the header are padded
/// with missing values; longer rows are an error. Column types are inferred
/// once every row has been read.
pub fn load_with<R: Read>(reader: R, options: &LoadOptions) -> Result<Table, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(ParseError::Empty);
    }
    let names = normalize_headers(&headers);
    let width = names.len();

    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); width];
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        if record.len() > width {
            return Err(ParseError::TooManyFields {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: width,
                found: record.len(),
            });
        }
        for (col_idx, cells) in raw.iter_mut().enumerate() {
            let cell = record
                .get(col_idx)
                .filter(|field| !options.is_missing(field))
                .map(str::to_string);
            cells.push(cell);
        }
    }

    let columns: Vec<Column> = names
        .into_iter()
        .zip(raw)
        .map(|(name, cells)| build_column(name, cells))
        .collect();

    let n_rows = columns.first().map(Column::len).unwrap_or(0);
    log::debug!("Parsed {} rows x {} columns", n_rows, columns.len());

    Ok(Table::from_columns(columns)?)
}

// ---------------------------------------------------------------------------
// Header normalization
// ---------------------------------------------------------------------------

/// Blank headers become `Unnamed: <index>`; repeated names get the first
/// free `.N` suffix.
fn normalize_headers(headers: &StringRecord) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let base = if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            };
            let mut name = base.clone();
            let mut suffix = 1;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            name
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Type inference
// ---------------------------------------------------------------------------

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// A numeric literal: contains a digit and parses to a finite float. Keeps
/// words such as `nan` or `Infinity` out of float columns.
fn parse_number(s: &str) -> Option<f64> {
    if !s.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Optional sign followed by digits only.
fn is_whole_number(s: &str) -> bool {
    let digits = s.strip_prefix(|c| c == '+' || c == '-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Pick the narrowest type every present value fits. Columns with no
/// present values are text, and so are columns holding a whole number too
/// large for `i64`, which no numeric column could render digit-for-digit.
fn infer_type(cells: &[Option<String>]) -> ColumnType {
    let mut present = cells.iter().flatten().map(String::as_str).peekable();
    if present.peek().is_none() {
        return ColumnType::Text;
    }
    let present: Vec<&str> = present.collect();

    if present.iter().all(|s| s.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if present
        .iter()
        .any(|s| is_whole_number(s) && s.parse::<i64>().is_err())
    {
        ColumnType::Text
    } else if present.iter().all(|s| parse_number(s).is_some()) {
        ColumnType::Float
    } else if present.iter().all(|s| parse_bool(s).is_some()) {
        ColumnType::Boolean
    } else {
        ColumnType::Text
    }
}

fn build_column(name: String, cells: Vec<Option<String>>) -> Column {
    let dtype = infer_type(&cells);
    log::debug!("Column '{name}' inferred as {dtype}");

    let values = match dtype {
        ColumnType::Integer => ColumnValues::Integer(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(|s| s.parse().ok()))
                .collect(),
        ),
        ColumnType::Float => ColumnValues::Float(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(parse_number))
                .collect(),
        ),
        ColumnType::Boolean => ColumnValues::Boolean(
            cells
                .iter()
                .map(|c| c.as_deref().and_then(parse_bool))
                .collect(),
        ),
        ColumnType::Text => ColumnValues::Text(cells),
    };
    Column::new(name, values)
}
