//! # hypnos-filters
//!
//! Immutable wavelet filter coefficient tables loaded from delimited
//! resources. A resource is a text file with a header row of column names
//! followed by numeric rows; short or empty cells are skipped, never
//! zero-filled, so columns may be ragged.
//!
//! The transform consumes exactly two named tables, loaded eagerly at
//! construction:
//!
//! | Table | Default resource | Role |
//! |-------|------------------|------|
//! | biorthogonal | `near_sym_b.csv` | level-1 analysis/synthesis filters |
//! | qshift | `qshift_b.csv` | level >= 2 quarter-shift filters |
//!
//! ## Quick Start
//!
//! ```ignore
//! use hypnos_filters::{DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT, FilterBank};
//!
//! let bank = FilterBank::load(dir, DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT)?;
//! let h0o = bank.biorthogonal().require("h0o")?;
//! ```

mod bank;
mod error;
mod table;

pub use bank::{DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT, FilterBank};
pub use error::FilterError;
pub use table::FilterTable;
