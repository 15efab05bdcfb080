//! NetCDF-backed hierarchical coefficient repository.

use std::path::{Path, PathBuf};

use num_complex::Complex64;
use tracing::{debug, info};

use hypnos_mask::{CoefficientBasis, CoefficientStore, LevelSet, MaskError};

use crate::error::StoreError;

/// Shared dimension holding the real/imaginary component pair.
const COMPONENT_DIM: &str = "comp";

#[derive(Debug)]
enum Repo {
    Read(netcdf::File),
    Write(netcdf::FileMut),
}

/// A per-period coefficient repository in a single NetCDF file.
///
/// Each period lives in a group named by its index and holds one
/// `Yh_<j>` variable per high-pass level plus a `Yl` variable, every one
/// shaped `rows x 2` with real and imaginary components interleaved on
/// the trailing dimension. The repository is opened in exactly one mode:
/// [`create`](Self::create) for writing, [`open`](Self::open) for
/// reading.
#[derive(Debug)]
pub struct HierarchicalStore {
    repo: Repo,
    path: PathBuf,
    periods: usize,
}

impl HierarchicalStore {
    /// Creates a fresh write-mode repository at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::PathExists`] if `path` is already present,
    /// and [`StoreError::Netcdf`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            return Err(StoreError::PathExists {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::create(path)?;
        info!(path = %path.display(), "created coefficient repository");
        Ok(Self {
            repo: Repo::Write(file),
            path: path.to_path_buf(),
            periods: 0,
        })
    }

    /// Opens an existing repository at `path` in read mode.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FileNotFound`] if `path` does not exist on
    /// disk, and [`StoreError::Netcdf`] if it is not a readable NetCDF
    /// file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let file = netcdf::open(path)?;
        let periods = file.groups()?.count();
        info!(path = %path.display(), periods, "opened coefficient repository");
        Ok(Self {
            repo: Repo::Read(file),
            path: path.to_path_buf(),
            periods,
        })
    }

    /// Returns the repository path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of period groups.
    pub fn periods(&self) -> usize {
        self.periods
    }

    fn write(&mut self, index: usize, levels: &LevelSet) -> Result<(), StoreError> {
        let file = match &mut self.repo {
            Repo::Write(file) => file,
            Repo::Read(_) => {
                return Err(StoreError::WrongMode {
                    op: "store into",
                    mode: "read",
                });
            }
        };

        let mut group = file.add_group(&index.to_string())?;
        group.add_dimension(COMPONENT_DIM, 2)?;
        for (j, level) in levels.yh().iter().enumerate() {
            put_complex(&mut group, &format!("Yh_{j}"), &format!("yh{j}_rows"), level)?;
        }
        put_complex(&mut group, "Yl", "yl_rows", levels.low_pass())?;

        self.periods = self.periods.max(index + 1);
        debug!(period = index, levels = levels.n_levels(), "stored period");
        Ok(())
    }

    fn read(&self, index: usize) -> Result<LevelSet, StoreError> {
        let file = match &self.repo {
            Repo::Read(file) => file,
            Repo::Write(_) => {
                return Err(StoreError::WrongMode {
                    op: "load from",
                    mode: "write",
                });
            }
        };

        let group = file
            .group(&index.to_string())?
            .ok_or(StoreError::MissingGroup { index })?;

        let mut yh = Vec::new();
        while let Some(var) = group.variable(&format!("Yh_{}", yh.len())) {
            yh.push(get_complex(&var, index)?);
        }
        if yh.is_empty() {
            return Err(StoreError::MissingVariable {
                name: "Yh_0".to_string(),
                index,
            });
        }

        let yl_var = group
            .variable("Yl")
            .ok_or_else(|| StoreError::MissingVariable {
                name: "Yl".to_string(),
                index,
            })?;
        let yl = get_complex(&yl_var, index)?;

        Ok(LevelSet::new(yh, yl))
    }
}

/// Writes one complex array as a `rows x 2` f64 variable.
fn put_complex(
    group: &mut netcdf::GroupMut,
    name: &str,
    rows_dim: &str,
    values: &[Complex64],
) -> Result<(), StoreError> {
    group.add_dimension(rows_dim, values.len())?;
    let mut var = group.add_variable::<f64>(name, &[rows_dim, COMPONENT_DIM])?;

    let mut flat = Vec::with_capacity(values.len() * 2);
    for z in values {
        flat.push(z.re);
        flat.push(z.im);
    }
    var.put_values(&flat, ..)?;
    Ok(())
}

/// Reads one `rows x 2` f64 variable back into a complex array.
fn get_complex(var: &netcdf::Variable, index: usize) -> Result<Vec<Complex64>, StoreError> {
    let flat = var.get_values::<f64, _>(..)?;
    if flat.len() % 2 != 0 {
        return Err(StoreError::BadShape {
            name: var.name(),
            index,
            reason: format!("odd element count {}", flat.len()),
        });
    }
    Ok(flat
        .chunks_exact(2)
        .map(|pair| Complex64::new(pair[0], pair[1]))
        .collect())
}

impl CoefficientStore for HierarchicalStore {
    fn store(
        &mut self,
        index: usize,
        levels: &LevelSet,
        _basis: &CoefficientBasis,
    ) -> Result<(), MaskError> {
        self.write(index, levels).map_err(crate::to_mask_error)
    }

    fn load(&self, index: usize) -> Result<LevelSet, MaskError> {
        self.read(index).map_err(crate::to_mask_error)
    }

    fn num_periods(&self) -> usize {
        self.periods
    }
}
