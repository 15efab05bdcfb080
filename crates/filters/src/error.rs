//! Error types for the hypnos-filters crate.

use std::path::PathBuf;

/// Error type for all fallible operations in the hypnos-filters crate.
///
/// Every variant is a load-time failure: filter tables are read eagerly at
/// construction and never lazily, so a bad resource surfaces before any
/// signal is processed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FilterError {
    /// Returned when a filter resource file does not exist on disk.
    #[error("filter resource not found: {}", path.display())]
    MissingResource {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an I/O failure while reading a resource file.
    #[error("failed to read {}: {reason}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Returned when a cell cannot be parsed as a number.
    #[error("malformed value '{value}' at {}:{line}", path.display())]
    Malformed {
        /// Path being parsed.
        path: PathBuf,
        /// 1-based line number of the offending row.
        line: usize,
        /// The cell text that failed to parse.
        value: String,
    },

    /// Returned when a resource has no header or contains no values at all.
    #[error("filter table {} is empty", path.display())]
    EmptyTable {
        /// Path of the empty resource.
        path: PathBuf,
    },

    /// Returned when a required column is absent from a loaded table.
    #[error("column '{column}' not found in filter table '{table}'")]
    MissingColumn {
        /// Name of the table that was searched.
        table: String,
        /// Name of the missing column.
        column: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_missing_resource() {
        let err = FilterError::MissingResource {
            path: PathBuf::from("/tmp/near_sym_b.csv"),
        };
        assert_eq!(
            err.to_string(),
            "filter resource not found: /tmp/near_sym_b.csv"
        );
    }

    #[test]
    fn display_malformed() {
        let err = FilterError::Malformed {
            path: PathBuf::from("qshift_b.csv"),
            line: 3,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "malformed value 'abc' at qshift_b.csv:3");
    }

    #[test]
    fn display_missing_column() {
        let err = FilterError::MissingColumn {
            table: "near_sym_b".to_string(),
            column: "h1o".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'h1o' not found in filter table 'near_sym_b'"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<FilterError>();
    }
}
