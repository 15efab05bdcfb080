//! Flat CSV export of finished bases, one file per period.

use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use hypnos_mask::{CoefficientBasis, CoefficientStore, LevelSet, MaskError};

use crate::error::StoreError;

/// A write-only export directory of per-period basis CSV files.
///
/// Period `i` lands in `<dir>/<i>wavelets.csv`, one basis row per line
/// with cells formatted as `re+imj`. Only the finished basis is written;
/// the raw level arrays are discarded, so this backend can never serve a
/// mask back — [`load`](CoefficientStore::load) always refuses.
#[derive(Debug)]
pub struct FlatDirStore {
    dir: PathBuf,
    periods: usize,
}

impl FlatDirStore {
    /// Creates a fresh export directory at `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PathExists`] if `dir` is already present,
    /// and [`StoreError::Io`] if it cannot be created.
    pub fn create(dir: &Path) -> Result<Self, StoreError> {
        if dir.exists() {
            return Err(StoreError::PathExists {
                path: dir.to_path_buf(),
            });
        }
        fs::create_dir_all(dir).map_err(|e| StoreError::Io {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        info!(dir = %dir.display(), "created flat export directory");
        Ok(Self {
            dir: dir.to_path_buf(),
            periods: 0,
        })
    }

    /// Returns the export directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes one period's basis to `<dir>/<index>wavelets.csv`.
    pub fn export(&mut self, index: usize, basis: &CoefficientBasis) -> Result<(), StoreError> {
        let path = self.dir.join(format!("{index}wavelets.csv"));
        let io_err = |e: std::io::Error| StoreError::Io {
            path: path.clone(),
            reason: e.to_string(),
        };

        let mut file = fs::File::create(&path).map_err(io_err)?;
        for r in 0..basis.rows() {
            let line = basis
                .row(r)
                .iter()
                .map(|z| format!("{}{:+}j", z.re, z.im))
                .collect::<Vec<_>>()
                .join(",");
            writeln!(file, "{line}").map_err(io_err)?;
        }

        self.periods = self.periods.max(index + 1);
        debug!(period = index, rows = basis.rows(), "exported basis");
        Ok(())
    }
}

impl CoefficientStore for FlatDirStore {
    fn store(
        &mut self,
        index: usize,
        _levels: &LevelSet,
        basis: &CoefficientBasis,
    ) -> Result<(), MaskError> {
        self.export(index, basis).map_err(crate::to_mask_error)
    }

    fn load(&self, _index: usize) -> Result<LevelSet, MaskError> {
        Err(crate::to_mask_error(StoreError::UnsupportedLoad {
            backend: "flat-csv",
        }))
    }

    fn num_periods(&self) -> usize {
        self.periods
    }
}
