//! The wavelet-transform capability and a reference dyadic pyramid.
//!
//! The dual-tree complex wavelet numerics are out of scope: the core
//! consumes the transform through this trait's shape contract only, and
//! callers inject whichever implementation they have. [`DyadicPyramid`]
//! is a reference implementation of the contract (a real Haar-style
//! pyramid) used by the binary and by tests.

use num_complex::Complex64;

use hypnos_filters::FilterBank;

use crate::error::MaskError;
use crate::levels::LevelSet;
use crate::reflect::reflect;

/// Forward/inverse transform capability injected by the caller.
///
/// The shape contract: `forward` over `n` samples returns `n_levels`
/// high-pass arrays with strictly decreasing, dyadically related row
/// counts (level 0 finest) plus one low-pass array. `reconstruct` maps a
/// level set to a transformed level set consumed by basis construction in
/// partial-reconstruction mode.
pub trait WaveletTransform {
    /// Decomposes one period's samples into `n_levels` high-pass arrays
    /// and a low-pass array.
    fn forward(
        &self,
        samples: &[f64],
        n_levels: usize,
        bank: &FilterBank,
    ) -> Result<LevelSet, MaskError>;

    /// Applies partial inverse reconstruction to a level set.
    fn reconstruct(&self, levels: LevelSet, bank: &FilterBank) -> Result<LevelSet, MaskError>;
}

/// Reference transform: an orthonormal Haar-style pyramid.
///
/// Satisfies the dyadic shape contract exactly — `rows(Yh[j]) =
/// n_ext / 2^(j+1)` — with symmetric boundary extension via [`reflect`].
/// Only the real tree is computed; imaginary parts are zero. The filter
/// bank is accepted for interface parity but the fixed Haar taps do not
/// consult it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DyadicPyramid;

impl DyadicPyramid {
    /// Extends `samples` to `target` length by mirror reflection at both
    /// boundaries.
    fn extend(samples: &[f64], target: usize) -> Vec<f64> {
        let n = samples.len();
        let positions: Vec<f64> = (1..=target).map(|i| i as f64).collect();
        reflect(&positions, 0.5, n as f64 + 0.5)
            .iter()
            .map(|&idx| samples[idx.round() as usize])
            .collect()
    }
}

impl WaveletTransform for DyadicPyramid {
    fn forward(
        &self,
        samples: &[f64],
        n_levels: usize,
        _bank: &FilterBank,
    ) -> Result<LevelSet, MaskError> {
        if samples.len() < 2 {
            return Err(MaskError::SignalTooShort {
                len: samples.len(),
                min: 2,
            });
        }

        // Pad to a multiple of 2^n_levels so every halving stays exact.
        let block = 1usize << n_levels;
        let target = samples.len().next_multiple_of(block);
        let mut approx = Self::extend(samples, target);

        let mut yh = Vec::with_capacity(n_levels);
        for _ in 0..n_levels {
            let half = approx.len() / 2;
            let mut detail = Vec::with_capacity(half);
            let mut next = Vec::with_capacity(half);
            for k in 0..half {
                let a = approx[2 * k];
                let b = approx[2 * k + 1];
                detail.push(Complex64::new(
                    (a - b) * std::f64::consts::FRAC_1_SQRT_2,
                    0.0,
                ));
                next.push((a + b) * std::f64::consts::FRAC_1_SQRT_2);
            }
            yh.push(detail);
            approx = next;
        }

        let yl = approx
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        Ok(LevelSet::new(yh, yl))
    }

    fn reconstruct(&self, levels: LevelSet, _bank: &FilterBank) -> Result<LevelSet, MaskError> {
        let n_levels = levels.n_levels();
        let n = levels.low_pass().len() << n_levels;
        let (yh, yl) = levels.into_parts();

        // Each band is synthesised in isolation at full length, so every
        // reconstructed level shares the same timeline.
        let mut recon_yh = Vec::with_capacity(n_levels);
        for (j, level) in yh.iter().enumerate() {
            let step = 1usize << (j + 1);
            if level.len() * step != n {
                return Err(MaskError::UnevenLevel {
                    level: j,
                    level_rows: level.len(),
                    finest_rows: n,
                });
            }
            let scale = 1.0 / (step as f64).sqrt();
            let mut band = vec![Complex64::new(0.0, 0.0); n];
            for (k, &coeff) in level.iter().enumerate() {
                let base = k * step;
                for t in 0..step / 2 {
                    band[base + t] = coeff * scale;
                }
                for t in step / 2..step {
                    band[base + t] = -coeff * scale;
                }
            }
            recon_yh.push(band);
        }

        let step = 1usize << n_levels;
        let scale = 1.0 / (step as f64).sqrt();
        let mut smooth = vec![Complex64::new(0.0, 0.0); n];
        for (k, &coeff) in yl.iter().enumerate() {
            let base = k * step;
            for t in 0..step {
                smooth[base + t] = coeff * scale;
            }
        }

        Ok(LevelSet::new(recon_yh, smooth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use hypnos_filters::FilterTable;

    fn test_bank() -> FilterBank {
        let bio = FilterTable::new("bio", BTreeMap::from([("h0o".to_string(), vec![1.0])]));
        let q = FilterTable::new("q", BTreeMap::from([("h0a".to_string(), vec![1.0])]));
        FilterBank::from_tables(bio, q)
    }

    #[test]
    fn forward_shapes_are_dyadic() {
        let samples: Vec<f64> = (0..32).map(|i| i as f64).collect();
        let levels = DyadicPyramid.forward(&samples, 3, &test_bank()).unwrap();

        assert_eq!(levels.n_levels(), 3);
        assert_eq!(levels.high_pass(0).unwrap().len(), 16);
        assert_eq!(levels.high_pass(1).unwrap().len(), 8);
        assert_eq!(levels.high_pass(2).unwrap().len(), 4);
        assert_eq!(levels.low_pass().len(), 4);
    }

    #[test]
    fn forward_pads_to_dyadic_length() {
        // 10 samples with 3 levels pad to 16 via boundary reflection.
        let samples: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let levels = DyadicPyramid.forward(&samples, 3, &test_bank()).unwrap();
        assert_eq!(levels.high_pass(0).unwrap().len(), 8);
        assert_eq!(levels.low_pass().len(), 2);
    }

    #[test]
    fn forward_constant_signal_has_zero_details() {
        let samples = vec![3.0; 16];
        let levels = DyadicPyramid.forward(&samples, 2, &test_bank()).unwrap();
        for j in 0..2 {
            for &z in levels.high_pass(j).unwrap() {
                assert!(z.norm() < 1e-12);
            }
        }
        // Energy accumulates into the low-pass band: 3 * sqrt(4) per entry.
        for &z in levels.low_pass() {
            assert!((z.re - 6.0).abs() < 1e-12);
        }
    }

    #[test]
    fn forward_detects_a_step() {
        // A step edge shows up in the finest detail band at the boundary.
        let mut samples = vec![0.0; 8];
        samples[4..].fill_with(|| 8.0);
        let levels = DyadicPyramid.forward(&samples, 1, &test_bank()).unwrap();
        let finest = levels.high_pass(0).unwrap();
        // Detail pairs (0,1), (2,3), ... straddle no edge, so only the
        // constant halves give zero detail.
        assert!(finest.iter().all(|z| z.norm() < 1e-12));

        // Shift the edge onto an odd boundary and it becomes visible.
        let mut shifted = vec![0.0; 8];
        shifted[3..].fill_with(|| 8.0);
        let levels = DyadicPyramid.forward(&shifted, 1, &test_bank()).unwrap();
        let finest = levels.high_pass(0).unwrap();
        assert!(finest.iter().any(|z| z.norm() > 1.0));
    }

    #[test]
    fn forward_too_short_fails() {
        let err = DyadicPyramid.forward(&[1.0], 2, &test_bank()).unwrap_err();
        assert!(matches!(err, MaskError::SignalTooShort { .. }));
    }

    #[test]
    fn reconstruct_aligns_all_levels() {
        let samples: Vec<f64> = (0..16).map(|i| (i as f64 * 0.7).sin()).collect();
        let levels = DyadicPyramid.forward(&samples, 2, &test_bank()).unwrap();
        let recon = DyadicPyramid.reconstruct(levels, &test_bank()).unwrap();

        // Every reconstructed band shares the full 16-sample timeline.
        assert_eq!(recon.high_pass(0).unwrap().len(), 16);
        assert_eq!(recon.high_pass(1).unwrap().len(), 16);
        assert_eq!(recon.low_pass().len(), 16);
    }

    #[test]
    fn reconstruct_bands_sum_to_signal() {
        // The pyramid is orthonormal, so the isolated bands are additive.
        let samples: Vec<f64> = (0..16).map(|i| (i as f64 * 0.5).cos() * 2.0).collect();
        let levels = DyadicPyramid.forward(&samples, 2, &test_bank()).unwrap();
        let recon = DyadicPyramid.reconstruct(levels, &test_bank()).unwrap();

        for i in 0..16 {
            let sum: f64 = (0..recon.n_levels())
                .map(|j| recon.high_pass(j).unwrap()[i].re)
                .sum::<f64>()
                + recon.low_pass()[i].re;
            assert!(
                (sum - samples[i]).abs() < 1e-9,
                "band sum {sum} != sample {} at index {i}",
                samples[i]
            );
        }
    }

    #[test]
    fn reconstruct_rejects_inconsistent_shapes() {
        let levels = LevelSet::new(
            vec![vec![Complex64::new(1.0, 0.0); 3]],
            vec![Complex64::new(0.0, 0.0); 4],
        );
        let err = DyadicPyramid.reconstruct(levels, &test_bank()).unwrap_err();
        assert!(matches!(err, MaskError::UnevenLevel { level: 0, .. }));
    }
}
