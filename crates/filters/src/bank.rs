//! The pair of filter tables required by the transform.

use std::path::Path;

use tracing::info;

use crate::error::FilterError;
use crate::table::FilterTable;

/// Default resource name for the biorthogonal (level-1) filter table.
pub const DEFAULT_BIORTHOGONAL: &str = "near_sym_b";

/// Default resource name for the quarter-shift (level >= 2) filter table.
pub const DEFAULT_QSHIFT: &str = "qshift_b";

/// The two immutable filter tables consumed by every transform call.
///
/// Both tables are loaded once at initialisation and shared read-only for
/// the lifetime of the process; a missing or malformed resource fails here,
/// never later.
#[derive(Clone, Debug)]
pub struct FilterBank {
    biorthogonal: FilterTable,
    qshift: FilterTable,
}

impl FilterBank {
    /// Loads both required tables from `<dir>/<name>.csv` resources.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError`] if either resource is missing or malformed.
    pub fn load(dir: &Path, biorthogonal: &str, qshift: &str) -> Result<Self, FilterError> {
        let biorthogonal = FilterTable::from_path(&dir.join(format!("{biorthogonal}.csv")))?;
        let qshift = FilterTable::from_path(&dir.join(format!("{qshift}.csv")))?;
        info!(
            biorthogonal = biorthogonal.name(),
            qshift = qshift.name(),
            "loaded filter tables"
        );
        Ok(Self {
            biorthogonal,
            qshift,
        })
    }

    /// Builds a bank from already-constructed tables.
    pub fn from_tables(biorthogonal: FilterTable, qshift: FilterTable) -> Self {
        Self {
            biorthogonal,
            qshift,
        }
    }

    /// Returns the biorthogonal table.
    pub fn biorthogonal(&self) -> &FilterTable {
        &self.biorthogonal
    }

    /// Returns the quarter-shift table.
    pub fn qshift(&self) -> &FilterTable {
        &self.qshift
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs::File;
    use std::io::Write;

    fn write_resource(dir: &Path, name: &str, contents: &str) {
        let mut f = File::create(dir.join(name)).expect("create resource");
        f.write_all(contents.as_bytes()).expect("write resource");
    }

    #[test]
    fn loads_both_tables() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_resource(dir.path(), "near_sym_b.csv", "h0o\n0.5\n-0.5\n");
        write_resource(dir.path(), "qshift_b.csv", "h0a\n0.25\n0.75\n");

        let bank = FilterBank::load(dir.path(), DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT).unwrap();
        assert_eq!(bank.biorthogonal().name(), "near_sym_b");
        assert_eq!(bank.qshift().name(), "qshift_b");
        assert_eq!(bank.qshift().column("h0a"), Some([0.25, 0.75].as_slice()));
    }

    #[test]
    fn missing_second_table_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write_resource(dir.path(), "near_sym_b.csv", "h0o\n0.5\n");

        let err = FilterBank::load(dir.path(), DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT).unwrap_err();
        assert!(matches!(err, FilterError::MissingResource { .. }));
    }

    #[test]
    fn from_tables_keeps_names() {
        let bio = FilterTable::new("bio", BTreeMap::from([("a".to_string(), vec![1.0])]));
        let q = FilterTable::new("q", BTreeMap::from([("b".to_string(), vec![2.0])]));
        let bank = FilterBank::from_tables(bio, q);
        assert_eq!(bank.biorthogonal().name(), "bio");
        assert_eq!(bank.qshift().name(), "q");
    }
}
