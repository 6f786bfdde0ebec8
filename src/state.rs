use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::config::ViewerConfig;
use crate::data::filter::{FilterRequest, FilterResult};
use crate::data::loader::{LoadOptions, load_with};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Message shown above the data grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Warning(String),
    Error(String),
}

/// The file currently open in the session.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub name: String,
    pub table: Table,
}

/// Everything one viewer window knows, independent of rendering.
///
/// A table lives here from the moment a file is opened until it is closed
/// or replaced by the next file.
pub struct Session {
    file: Option<LoadedFile>,

    /// Column picked in the filter panel.
    pub selected_column: Option<String>,

    /// Text typed into the filter box.
    pub filter_input: String,

    /// Result of the last "Apply Filter", dropped when the inputs change.
    applied: Option<FilterResult>,

    pub status: Option<Status>,

    options: LoadOptions,
    max_file_bytes: u64,
}

impl Session {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            file: None,
            selected_column: None,
            filter_input: String::new(),
            applied: None,
            status: None,
            options: config.load_options(),
            max_file_bytes: config.max_file_bytes,
        }
    }

    pub fn file(&self) -> Option<&LoadedFile> {
        self.file.as_ref()
    }

    pub fn table(&self) -> Option<&Table> {
        self.file.as_ref().map(|f| &f.table)
    }

    pub fn applied_filter(&self) -> Option<&FilterResult> {
        self.applied.as_ref()
    }

    // -- lifecycle --

    /// Open a file from disk, replacing whatever was loaded before.
    pub fn open_path(&mut self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let loaded = self.read_path(path);
        self.finish_open(name, loaded);
    }

    /// Open in-memory file contents (e.g. a drag-and-drop without a path).
    pub fn open_bytes(&mut self, name: &str, bytes: &[u8]) {
        let loaded = self.read_bytes(bytes);
        self.finish_open(name.to_string(), loaded);
    }

    fn read_path(&self, path: &Path) -> Result<Table> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let size = file
            .metadata()
            .with_context(|| format!("reading metadata of {}", path.display()))?
            .len();
        self.check_size(size)?;
        let table = load_with(BufReader::new(file), &self.options)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(table)
    }

    fn read_bytes(&self, bytes: &[u8]) -> Result<Table> {
        self.check_size(bytes.len() as u64)?;
        Ok(load_with(bytes, &self.options)?)
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_file_bytes {
            bail!(
                "file is {size} bytes, larger than the {} byte limit",
                self.max_file_bytes
            );
        }
        Ok(())
    }

    fn finish_open(&mut self, name: String, loaded: Result<Table>) {
        // The previous table goes away whether or not the new one parses.
        self.close();
        match loaded {
            Ok(table) => {
                log::info!(
                    "Loaded '{name}': {} rows, columns {:?}",
                    table.n_rows(),
                    table.column_names()
                );
                self.set_file(name, table);
            }
            Err(e) => {
                log::error!("Failed to load '{name}': {e:#}");
                self.status = Some(Status::Error(format!(
                    "Error loading or processing the CSV file: {e:#}"
                )));
            }
        }
    }

    /// Install a parsed table as the current file.
    pub fn set_file(&mut self, name: String, table: Table) {
        self.selected_column = table.column_names().first().map(|s| s.to_string());
        self.filter_input.clear();
        self.applied = None;
        self.status = None;
        self.file = Some(LoadedFile { name, table });
    }

    /// Drop the current file and everything derived from it.
    pub fn close(&mut self) {
        self.file = None;
        self.selected_column = None;
        self.filter_input.clear();
        self.applied = None;
        self.status = None;
    }

    // -- filtering --

    pub fn select_column(&mut self, column: String) {
        if self.selected_column.as_deref() != Some(column.as_str()) {
            self.selected_column = Some(column);
            self.clear_filter();
        }
    }

    /// Forget the applied filter so the full table shows again.
    pub fn clear_filter(&mut self) {
        self.applied = None;
        if !matches!(self.status, Some(Status::Error(_))) {
            self.status = None;
        }
    }

    /// Run the filter for the current column and input.
    ///
    /// An empty input shows the full table. A request that matches nothing
    /// is kept (with a warning) so the caller can show the full table.
    pub fn apply_filter(&mut self) {
        let Some(file) = &self.file else {
            return;
        };
        let Some(column) = self.selected_column.clone() else {
            return;
        };
        if self.filter_input.is_empty() {
            self.applied = None;
            self.status = None;
            return;
        }

        let request = FilterRequest::new(column, self.filter_input.clone());
        match request.apply(&file.table) {
            Ok(result) => {
                self.status = Some(if result.matched() {
                    Status::Info(format!(
                        "Showing {} rows that match filter criteria",
                        result.len()
                    ))
                } else {
                    Status::Warning(format!(
                        "No matching rows found for '{}' in column '{}'",
                        request.value, request.column
                    ))
                });
                self.applied = Some(result);
            }
            Err(e) => {
                log::error!("Filter failed: {e}");
                self.applied = None;
                self.status = Some(Status::Error(e.to_string()));
            }
        }
    }

    /// Table to show in the data grid: the matching rows of a successful
    /// filter, otherwise the full table.
    pub fn visible_table(&self) -> Option<&Table> {
        match &self.applied {
            Some(result) if result.matched() => Some(result.table()),
            _ => self.table(),
        }
    }

    /// Distinct values in the selected column.
    pub fn selected_unique_count(&self) -> Option<usize> {
        let table = self.table()?;
        let column = table.column(self.selected_column.as_deref()?)?;
        Some(column.unique_count())
    }
}
