//! The coefficient-store capability.

use crate::basis::CoefficientBasis;
use crate::error::MaskError;
use crate::levels::LevelSet;

/// Per-period persistence capability injected by the caller.
///
/// A store is opened once — in read mode or write mode, never both — and
/// held for the owning mask's lifetime. Backends decide which part of the
/// record they keep: a hierarchical backend persists the raw level arrays
/// (and can serve them back), a flat backend persists only the finished
/// basis (and refuses to load).
pub trait CoefficientStore {
    /// Persists one period's record.
    fn store(
        &mut self,
        index: usize,
        levels: &LevelSet,
        basis: &CoefficientBasis,
    ) -> Result<(), MaskError>;

    /// Retrieves one period's level arrays.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::UnsupportedLoad`] from backends that only
    /// persist finished bases.
    fn load(&self, index: usize) -> Result<LevelSet, MaskError>;

    /// Returns the number of periods the store holds.
    fn num_periods(&self) -> usize;
}
