//! Per-period transform output.

use num_complex::Complex64;

/// One period's transform output: ordered high-pass coefficient arrays
/// (level 0 finest, dyadically coarsening) plus one low-pass array.
///
/// Produced once per period by the transform capability and consumed
/// immediately by the basis builders; it is only retained when persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelSet {
    yh: Vec<Vec<Complex64>>,
    yl: Vec<Complex64>,
}

impl LevelSet {
    /// Assembles a level set from high-pass arrays and the low-pass array.
    pub fn new(yh: Vec<Vec<Complex64>>, yl: Vec<Complex64>) -> Self {
        Self { yh, yl }
    }

    /// Returns the number of high-pass levels.
    pub fn n_levels(&self) -> usize {
        self.yh.len()
    }

    /// Returns the high-pass coefficients at `level` (0 = finest).
    ///
    /// Returns `None` if the level is out of range.
    pub fn high_pass(&self, level: usize) -> Option<&[Complex64]> {
        self.yh.get(level).map(|v| v.as_slice())
    }

    /// Returns all high-pass levels, finest first.
    pub fn yh(&self) -> &[Vec<Complex64>] {
        &self.yh
    }

    /// Returns the low-pass coefficients.
    pub fn low_pass(&self) -> &[Complex64] {
        &self.yl
    }

    /// Decomposes the level set into its parts.
    pub fn into_parts(self) -> (Vec<Vec<Complex64>>, Vec<Complex64>) {
        (self.yh, self.yl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    fn accessors() {
        let levels = LevelSet::new(vec![vec![c(1.0), c(2.0)], vec![c(3.0)]], vec![c(4.0)]);
        assert_eq!(levels.n_levels(), 2);
        assert_eq!(levels.high_pass(0), Some([c(1.0), c(2.0)].as_slice()));
        assert_eq!(levels.high_pass(1), Some([c(3.0)].as_slice()));
        assert_eq!(levels.high_pass(2), None);
        assert_eq!(levels.low_pass(), &[c(4.0)]);
    }

    #[test]
    fn into_parts_round_trips() {
        let levels = LevelSet::new(vec![vec![c(1.0)]], vec![c(2.0)]);
        let (yh, yl) = levels.into_parts();
        assert_eq!(yh, vec![vec![c(1.0)]]);
        assert_eq!(yl, vec![c(2.0)]);
    }

    #[test]
    fn level_set_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<LevelSet>();
    }
}
