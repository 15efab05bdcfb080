//! Fixed-length period segmentation of a raw signal.

use tracing::debug;

use crate::error::MaskError;

/// Slices a signal into fixed-length, non-overlapping periods.
///
/// When overlap is enabled each period except the last is extended with
/// the immediately following period's samples, doubling its length and
/// giving the transform one extra window of right-context. There is no
/// wraparound; the final period is never extended.
///
/// Trailing samples that do not fill a full window are dropped at
/// construction without signalling an error.
#[derive(Clone, Debug)]
pub struct PeriodSegmenter {
    data: Vec<f64>,
    window: usize,
    overlap: bool,
    num_batches: usize,
}

impl PeriodSegmenter {
    /// Builds a segmenter over the given samples.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::SignalTooShort`] if the samples do not fill a
    /// single window.
    pub fn new(mut data: Vec<f64>, window: usize, overlap: bool) -> Result<Self, MaskError> {
        debug_assert!(window > 0, "window must be validated by the caller");
        let num_batches = data.len() / window;
        if num_batches == 0 {
            return Err(MaskError::SignalTooShort {
                len: data.len(),
                min: window,
            });
        }

        let dropped = data.len() - num_batches * window;
        if dropped > 0 {
            debug!(dropped, window, "discarding trailing partial period");
            data.truncate(num_batches * window);
        }

        Ok(Self {
            data,
            window,
            overlap,
            num_batches,
        })
    }

    /// Returns the number of full periods.
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Returns the window length in samples.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Returns the sample slice for period `i`.
    ///
    /// Consecutive periods are contiguous in the underlying buffer, so the
    /// overlap-extended slice is returned without copying.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::PeriodOutOfRange`] if `i >= num_batches`.
    pub fn segment(&self, i: usize) -> Result<&[f64], MaskError> {
        if i >= self.num_batches {
            return Err(MaskError::PeriodOutOfRange {
                index: i,
                num_batches: self.num_batches,
            });
        }

        let start = i * self.window;
        let end = if self.overlap && i + 1 < self.num_batches {
            start + 2 * self.window
        } else {
            start + self.window
        };
        Ok(&self.data[start..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| i as f64).collect()
    }

    #[test]
    fn base_slices_are_disjoint() {
        let seg = PeriodSegmenter::new(ramp(12), 4, false).unwrap();
        assert_eq!(seg.num_batches(), 3);
        assert_eq!(seg.segment(0).unwrap(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(seg.segment(1).unwrap(), &[4.0, 5.0, 6.0, 7.0]);
        assert_eq!(seg.segment(2).unwrap(), &[8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn overlap_extends_all_but_last() {
        let seg = PeriodSegmenter::new(ramp(20), 4, true).unwrap();
        assert_eq!(seg.num_batches(), 5);
        // Interior periods get the following window appended.
        assert_eq!(seg.segment(3).unwrap().len(), 8);
        assert_eq!(
            seg.segment(0).unwrap(),
            &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]
        );
        // The final period never receives extension.
        assert_eq!(seg.segment(4).unwrap().len(), 4);
        assert_eq!(seg.segment(4).unwrap(), &[16.0, 17.0, 18.0, 19.0]);
    }

    #[test]
    fn trailing_remainder_is_dropped() {
        let seg = PeriodSegmenter::new(ramp(11), 4, false).unwrap();
        assert_eq!(seg.num_batches(), 2);
        assert_eq!(seg.segment(1).unwrap(), &[4.0, 5.0, 6.0, 7.0]);
        let err = seg.segment(2).unwrap_err();
        assert!(matches!(
            err,
            MaskError::PeriodOutOfRange {
                index: 2,
                num_batches: 2
            }
        ));
    }

    #[test]
    fn too_short_for_one_window() {
        let err = PeriodSegmenter::new(ramp(3), 4, false).unwrap_err();
        assert!(matches!(err, MaskError::SignalTooShort { len: 3, min: 4 }));
    }

    #[test]
    fn out_of_range_index() {
        let seg = PeriodSegmenter::new(ramp(8), 4, true).unwrap();
        let err = seg.segment(5).unwrap_err();
        assert!(matches!(err, MaskError::PeriodOutOfRange { index: 5, .. }));
    }

    #[test]
    fn single_period_is_never_extended() {
        let seg = PeriodSegmenter::new(ramp(4), 4, true).unwrap();
        assert_eq!(seg.num_batches(), 1);
        assert_eq!(seg.segment(0).unwrap().len(), 4);
    }
}
