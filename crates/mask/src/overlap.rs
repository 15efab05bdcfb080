//! Cross-period overlap blending as an explicit fold.

use num_complex::Complex64;

use crate::basis::CoefficientBasis;
use crate::error::MaskError;

/// Stateful left-fold that blends adjacent periods' basis halves.
///
/// Each round consumes one freshly built basis and yields one output
/// segment:
///
/// - round 0: the first `half_rows` rows of the new basis;
/// - interior rounds: `prev[half..] + new[..half] / 2` elementwise — the
///   blend is deliberately asymmetric, halving only the incoming term;
/// - final round: the entire new basis, unhalved (the last segment is
///   twice the length of interior segments).
///
/// Every non-final basis must have exactly `2 * half_rows` rows, so that
/// `prev[half..]` really is the previous basis's second half; any other
/// row count fails the round instead of blending misaligned rows.
///
/// When only one period exists its single round is the final round and
/// yields the whole basis. The previous basis is retained after every
/// round; [`reset`](Self::reset) restarts the fold when the underlying
/// signal is refreshed.
#[derive(Clone, Debug)]
pub struct OverlapReconciler {
    half_rows: usize,
    num_batches: usize,
    previous: Option<CoefficientBasis>,
    round: usize,
}

impl OverlapReconciler {
    /// Creates a reconciler for `num_batches` periods with the given
    /// half-segment length in basis rows.
    pub fn new(half_rows: usize, num_batches: usize) -> Self {
        Self {
            half_rows,
            num_batches,
            previous: None,
            round: 0,
        }
    }

    /// Returns the index of the next round to be consumed.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Restarts the fold from round 0 with no carried basis.
    pub fn reset(&mut self) {
        self.previous = None;
        self.round = 0;
    }

    /// Consumes one period's basis and yields the blended output segment.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::BasisShape`] when a non-final basis does not
    /// have exactly `2 * half_rows` rows or disagrees with the previous
    /// basis, and [`MaskError::MissingPrevious`] if the fold is stepped
    /// past its period count.
    pub fn push(&mut self, new_w: CoefficientBasis) -> Result<CoefficientBasis, MaskError> {
        let half = self.half_rows;
        let round = self.round;

        let output = if round + 1 >= self.num_batches {
            // Final round (or a single-period signal): the whole basis.
            new_w.clone()
        } else if round == 0 {
            if new_w.rows() != 2 * half {
                return Err(MaskError::BasisShape {
                    round,
                    details: format!("basis has {} rows, expected {}", new_w.rows(), 2 * half),
                });
            }
            new_w.slice_rows(0, half)
        } else {
            let prev = self
                .previous
                .as_ref()
                .ok_or(MaskError::MissingPrevious { round })?;
            if prev.rows() != 2 * half {
                return Err(MaskError::BasisShape {
                    round,
                    details: format!(
                        "previous basis has {} rows, expected {}",
                        prev.rows(),
                        2 * half
                    ),
                });
            }
            if new_w.rows() != 2 * half || new_w.cols() != prev.cols() {
                return Err(MaskError::BasisShape {
                    round,
                    details: format!(
                        "expected {} x {} basis, got {} x {}",
                        2 * half,
                        prev.cols(),
                        new_w.rows(),
                        new_w.cols()
                    ),
                });
            }

            // prev[half..] + new[..half] / 2: only the incoming term is
            // halved. The asymmetry is intentional and preserved verbatim.
            let mut blended = prev.slice_rows(half, 2 * half);
            for r in 0..half {
                for c in 0..blended.cols() {
                    let value = blended.get(r, c) + new_w.get(r, c) / Complex64::new(2.0, 0.0);
                    blended.set(r, c, value);
                }
            }
            blended
        };

        self.previous = Some(new_w);
        self.round += 1;
        Ok(output)
    }
}
