//! Load a CSV file into typed columns, summarize it, and filter its rows by
//! exact match on one column.

pub mod config;
pub mod data;
pub mod state;
