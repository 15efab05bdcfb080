//! Delimited filter coefficient tables.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::FilterError;

/// One named filter coefficient table.
///
/// A table is parsed from a delimited resource with a header row of column
/// names followed by numeric rows. Columns may be ragged: a short or empty
/// cell is skipped rather than zero-filled, so each column holds exactly
/// the values present in the file.
#[derive(Clone, Debug)]
pub struct FilterTable {
    name: String,
    columns: BTreeMap<String, Vec<f64>>,
}

impl FilterTable {
    /// Builds a table directly from named coefficient vectors.
    ///
    /// Intended for tests and for callers that obtain coefficients from
    /// somewhere other than a resource file.
    pub fn new(name: impl Into<String>, columns: BTreeMap<String, Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Parses a table from a delimited resource file.
    ///
    /// The first row is the header; every subsequent row contributes one
    /// value per non-empty cell to the corresponding column. The table name
    /// is taken from the file stem.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`FilterError::MissingResource`] | `path` does not exist |
    /// | [`FilterError::Io`] | the file cannot be read |
    /// | [`FilterError::Malformed`] | a cell is not a valid number |
    /// | [`FilterError::EmptyTable`] | no header row or no values at all |
    pub fn from_path(path: &Path) -> Result<Self, FilterError> {
        if !path.exists() {
            return Err(FilterError::MissingResource {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| FilterError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let reader = BufReader::new(file);
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line.map_err(|e| FilterError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?,
            None => {
                return Err(FilterError::EmptyTable {
                    path: path.to_path_buf(),
                });
            }
        };

        let titles: Vec<String> = header.split(',').map(|t| t.trim().to_string()).collect();
        let mut columns: BTreeMap<String, Vec<f64>> =
            titles.iter().map(|t| (t.clone(), Vec::new())).collect();

        for (offset, line) in lines.enumerate() {
            // Header is line 1, so data rows start at line 2.
            let line_no = offset + 2;
            let line = line.map_err(|e| FilterError::Io {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            if line.trim().is_empty() {
                continue;
            }

            for (title, cell) in titles.iter().zip(line.split(',')) {
                let cell = cell.trim();
                if cell.is_empty() {
                    continue;
                }
                let value: f64 = cell.parse().map_err(|_| FilterError::Malformed {
                    path: path.to_path_buf(),
                    line: line_no,
                    value: cell.to_string(),
                })?;
                if let Some(column) = columns.get_mut(title) {
                    column.push(value);
                }
            }
        }

        if columns.values().all(|c| c.is_empty()) {
            return Err(FilterError::EmptyTable {
                path: path.to_path_buf(),
            });
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self { name, columns })
    }

    /// Returns the table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the column with the given name, if present.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(|v| v.as_slice())
    }

    /// Returns the column with the given name, or [`FilterError::MissingColumn`].
    pub fn require(&self, name: &str) -> Result<&[f64], FilterError> {
        self.column(name).ok_or_else(|| FilterError::MissingColumn {
            table: self.name.clone(),
            column: name.to_string(),
        })
    }

    /// Returns the column names in sorted order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns the number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }
}
