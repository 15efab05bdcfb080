//! Dense coefficient-basis construction from ragged level sets.
//!
//! Two encodings turn one period's per-level transform output into a
//! single dense matrix:
//!
//! - *padded*: every level is aligned to the finest level's timeline by
//!   piecewise-constant upsampling (nearest-neighbour replication); the
//!   low-pass array is excluded.
//! - *sampled*: levels (with the low-pass appended last) are decimated to
//!   the coarsest surviving level's timeline by power-of-two strides.

use num_complex::Complex64;

use crate::error::MaskError;
use crate::levels::LevelSet;

/// Dense complex coefficient matrix for one period, stored row-major.
///
/// Rows index time at the encoding's resolution; columns index frequency
/// bands, finest first.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientBasis {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl CoefficientBasis {
    fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Complex64::new(0.0, 0.0); rows * cols],
        }
    }

    /// Builds the padded (resolution-aligned) encoding.
    ///
    /// The output has `rows(Yh[0])` rows and one column per high-pass
    /// level; the low-pass array is not included. Column 0 is the finest
    /// level verbatim; every coarser level is replicated across
    /// `rows / rows(Yh[j])` consecutive rows.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`MaskError::EmptyLevels`] | the level set has no high-pass levels |
    /// | [`MaskError::UnevenLevel`] | a level's row count does not evenly divide the finest level's |
    pub fn padded(levels: &LevelSet) -> Result<Self, MaskError> {
        let finest = levels.high_pass(0).ok_or(MaskError::EmptyLevels)?;
        let rows = finest.len();
        let cols = levels.n_levels();
        let mut basis = Self::zeros(rows, cols);

        for (r, &value) in finest.iter().enumerate() {
            basis.set(r, 0, value);
        }

        for (j, level) in levels.yh().iter().enumerate().skip(1) {
            if level.is_empty() || rows % level.len() != 0 {
                return Err(MaskError::UnevenLevel {
                    level: j,
                    level_rows: level.len(),
                    finest_rows: rows,
                });
            }
            let interval = rows / level.len();
            for (k, &value) in level.iter().enumerate() {
                for r in k * interval..(k + 1) * interval {
                    basis.set(r, j, value);
                }
            }
        }

        Ok(basis)
    }

    /// Builds the sampled (stride-decimated) encoding.
    ///
    /// The low-pass array is appended after the high-pass levels, the
    /// sequence is truncated at the first level whose row count is not
    /// strictly greater than its index, and each surviving level `i` is
    /// decimated with stride `2^(k-i-1)` from offset 0 onto the coarsest
    /// surviving level's timeline.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`MaskError::EmptyBasis`] | no level survives the validity cutoff |
    /// | [`MaskError::LevelTooShort`] | a surviving level cannot fill its column |
    pub fn sampled(levels: &LevelSet) -> Result<Self, MaskError> {
        let mut sequence: Vec<&[Complex64]> =
            levels.yh().iter().map(|v| v.as_slice()).collect();
        sequence.push(levels.low_pass());

        // Validity cutoff: stop at the first level with too few rows.
        let mut k = 0;
        for (i, level) in sequence.iter().enumerate() {
            if level.len() > i {
                k = i + 1;
            } else {
                break;
            }
        }
        if k == 0 {
            return Err(MaskError::EmptyBasis);
        }

        let rows = sequence[k - 1].len();
        let mut basis = Self::zeros(rows, k);

        for (i, level) in sequence.iter().take(k).enumerate() {
            let stride = 1usize << (k - i - 1);
            let need = (rows - 1) * stride + 1;
            if level.len() < need {
                return Err(MaskError::LevelTooShort {
                    level: i,
                    need,
                    got: level.len(),
                });
            }
            for r in 0..rows {
                basis.set(r, i, level[r * stride]);
            }
        }

        Ok(basis)
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of range.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        assert!(row < self.rows && col < self.cols, "position out of range");
        self.data[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns row `r` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `r` is out of range.
    pub fn row(&self, r: usize) -> &[Complex64] {
        assert!(r < self.rows, "row out of range");
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// Returns column `c` as an owned vector.
    ///
    /// # Panics
    ///
    /// Panics if `c` is out of range.
    pub fn column(&self, c: usize) -> Vec<Complex64> {
        assert!(c < self.cols, "column out of range");
        (0..self.rows).map(|r| self.get(r, c)).collect()
    }

    /// Copies rows `[start, end)` into a new basis.
    pub(crate) fn slice_rows(&self, start: usize, end: usize) -> Self {
        Self {
            rows: end - start,
            cols: self.cols,
            data: self.data[start * self.cols..end * self.cols].to_vec(),
        }
    }

    /// Returns a basis whose entries are the complex magnitudes of this
    /// one's (imaginary parts zero).
    pub fn magnitude(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|z| Complex64::new(z.norm(), 0.0))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn padded_replicates_coarser_levels() {
        // Yh[0] = 4 rows, Yh[1] = 2 rows.
        let levels = LevelSet::new(
            vec![
                vec![c(1.0, 1.0), c(2.0, 1.0), c(3.0, 1.0), c(4.0, 1.0)],
                vec![c(5.0, 2.0), c(6.0, 2.0)],
            ],
            vec![c(9.0, 0.0)],
        );

        let basis = CoefficientBasis::padded(&levels).unwrap();
        assert_eq!(basis.rows(), 4);
        assert_eq!(basis.cols(), 2);

        // Column 0 is the finest level verbatim.
        assert_eq!(
            basis.column(0),
            vec![c(1.0, 1.0), c(2.0, 1.0), c(3.0, 1.0), c(4.0, 1.0)]
        );
        // Column 1: rows 0-1 replicate the first coefficient, rows 2-3 the second.
        assert_eq!(
            basis.column(1),
            vec![c(5.0, 2.0), c(5.0, 2.0), c(6.0, 2.0), c(6.0, 2.0)]
        );
    }

    #[test]
    fn padded_excludes_low_pass() {
        let levels = LevelSet::new(
            vec![vec![c(1.0, 0.0), c(2.0, 0.0)]],
            vec![c(7.0, 0.0), c(8.0, 0.0)],
        );
        let basis = CoefficientBasis::padded(&levels).unwrap();
        assert_eq!(basis.cols(), 1);
    }

    #[test]
    fn padded_column_zero_always_matches_finest() {
        let finest = vec![c(0.5, -0.5), c(1.5, 0.25), c(-2.0, 3.0), c(0.0, 0.0)];
        let levels = LevelSet::new(vec![finest.clone(), vec![c(9.0, 9.0)]], vec![]);
        let basis = CoefficientBasis::padded(&levels).unwrap();
        assert_eq!(basis.column(0), finest);
    }

    #[test]
    fn padded_uneven_interval_fails() {
        // 4 rows cannot be tiled by a 3-row level.
        let levels = LevelSet::new(
            vec![
                vec![c(1.0, 0.0); 4],
                vec![c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0)],
            ],
            vec![],
        );
        let err = CoefficientBasis::padded(&levels).unwrap_err();
        assert!(matches!(
            err,
            MaskError::UnevenLevel {
                level: 1,
                level_rows: 3,
                finest_rows: 4
            }
        ));
    }

    #[test]
    fn padded_empty_level_set_fails() {
        let levels = LevelSet::new(vec![], vec![c(1.0, 0.0)]);
        let err = CoefficientBasis::padded(&levels).unwrap_err();
        assert!(matches!(err, MaskError::EmptyLevels));
    }

    #[test]
    fn sampled_strides_align_to_coarsest() {
        // Row counts [8, 4, 2, 1]: all satisfy rows > index, so k = 4.
        let yh: Vec<Vec<Complex64>> = vec![
            (0..8).map(|i| c(i as f64, 0.0)).collect(),
            (0..4).map(|i| c(10.0 + i as f64, 0.0)).collect(),
            (0..2).map(|i| c(20.0 + i as f64, 0.0)).collect(),
        ];
        let yl = vec![c(30.0, 0.0)];
        let levels = LevelSet::new(yh, yl);

        let basis = CoefficientBasis::sampled(&levels).unwrap();
        assert_eq!(basis.rows(), 1);
        assert_eq!(basis.cols(), 4);
        // Column i samples level i at stride 2^(3-i), offset 0.
        assert_eq!(basis.get(0, 0), c(0.0, 0.0));
        assert_eq!(basis.get(0, 1), c(10.0, 0.0));
        assert_eq!(basis.get(0, 2), c(20.0, 0.0));
        assert_eq!(basis.get(0, 3), c(30.0, 0.0));
    }

    #[test]
    fn sampled_cutoff_stops_at_first_violation() {
        // Row counts [4, 2, 2, 1]: level 2 has 2 rows == its index, so k = 2.
        let levels = LevelSet::new(
            vec![
                (0..4).map(|i| c(i as f64, 0.0)).collect(),
                vec![c(10.0, 0.0), c(11.0, 0.0)],
                vec![c(20.0, 0.0), c(21.0, 0.0)],
            ],
            vec![c(30.0, 0.0)],
        );

        let basis = CoefficientBasis::sampled(&levels).unwrap();
        assert_eq!(basis.cols(), 2);
        assert_eq!(basis.rows(), 2);
        // Column 0 decimates the finest level with stride 2.
        assert_eq!(basis.column(0), vec![c(0.0, 0.0), c(2.0, 0.0)]);
        assert_eq!(basis.column(1), vec![c(10.0, 0.0), c(11.0, 0.0)]);
    }

    #[test]
    fn sampled_no_valid_levels_fails() {
        // The first level is empty, so the cutoff lands at k = 0.
        let levels = LevelSet::new(vec![vec![]], vec![]);
        let err = CoefficientBasis::sampled(&levels).unwrap_err();
        assert!(matches!(err, MaskError::EmptyBasis));
    }

    #[test]
    fn sampled_short_level_fails() {
        // Row counts [2, 3, 4]: all pass the cutoff (k = 3, rows = 4), but
        // level 0 cannot serve 4 samples at stride 4.
        let levels = LevelSet::new(
            vec![vec![c(1.0, 0.0), c(2.0, 0.0)], vec![c(3.0, 0.0); 3]],
            vec![c(4.0, 0.0); 4],
        );
        let err = CoefficientBasis::sampled(&levels).unwrap_err();
        assert!(matches!(err, MaskError::LevelTooShort { level: 0, .. }));
    }

    #[test]
    fn magnitude_zeroes_imaginary_parts() {
        let levels = LevelSet::new(vec![vec![c(3.0, 4.0), c(0.0, -2.0)]], vec![]);
        let basis = CoefficientBasis::padded(&levels).unwrap().magnitude();
        assert_eq!(basis.get(0, 0), c(5.0, 0.0));
        assert_eq!(basis.get(1, 0), c(2.0, 0.0));
    }

    #[test]
    fn slice_rows_copies_range() {
        let levels = LevelSet::new(
            vec![vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)]],
            vec![],
        );
        let basis = CoefficientBasis::padded(&levels).unwrap();
        let half = basis.slice_rows(2, 4);
        assert_eq!(half.rows(), 2);
        assert_eq!(half.get(0, 0), c(2.0, 0.0));
        assert_eq!(half.get(1, 0), c(3.0, 0.0));
    }
}
