//! Error types for hypnos-store.

use std::path::PathBuf;

/// Error type for all fallible operations in the hypnos-store crate.
///
/// Covers filesystem failures, format-specific errors from the NetCDF
/// library, structural problems in previously written files, and mode
/// violations (reading a write-mode repository and vice versa).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when a path that must be created fresh already exists.
    #[error("path already exists: {}", path.display())]
    PathExists {
        /// Path that was already present.
        path: PathBuf,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps a filesystem error with the path it occurred on.
    #[error("io error on {}: {reason}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Description of the underlying failure.
        reason: String,
    },

    /// Returned when a period's group is not present in the repository.
    #[error("period {index} not found in store")]
    MissingGroup {
        /// Requested period index.
        index: usize,
    },

    /// Returned when a required variable is missing from a period's group.
    #[error("variable '{name}' not found in period {index}")]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Period index that was inspected.
        index: usize,
    },

    /// Returned when a stored variable has an unexpected shape.
    #[error("variable '{name}' in period {index} has a bad shape: {reason}")]
    BadShape {
        /// Name of the offending variable.
        name: String,
        /// Period index that was inspected.
        index: usize,
        /// Description of the shape problem.
        reason: String,
    },

    /// Returned when an operation is attempted against the wrong mode.
    #[error("cannot {op} a {mode}-mode store")]
    WrongMode {
        /// Operation that was attempted.
        op: &'static str,
        /// Mode the store was opened in.
        mode: &'static str,
    },

    /// Returned when a backend persists only finished bases and cannot
    /// serve level arrays back.
    #[error("loading is not supported by the {backend} backend")]
    UnsupportedLoad {
        /// Name of the refusing backend.
        backend: &'static str,
    },
}

impl From<netcdf::Error> for StoreError {
    fn from(e: netcdf::Error) -> Self {
        StoreError::Netcdf {
            reason: e.to_string(),
        }
    }
}
