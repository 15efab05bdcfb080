//! The mask orchestrator: segmentation, transform, basis construction,
//! blending, and persistence for one signal.

use tracing::{debug, info};

use hypnos_filters::FilterBank;

use crate::basis::CoefficientBasis;
use crate::error::MaskError;
use crate::overlap::OverlapReconciler;
use crate::segment::PeriodSegmenter;
use crate::signal::SignalSource;
use crate::store::CoefficientStore;
use crate::transform::WaveletTransform;

/// Which dense encoding the basis builder produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BasisEncoding {
    /// Resolution-aligned piecewise-constant upsampling.
    #[default]
    Padded,
    /// Stride-decimated subsampling onto the coarsest surviving level.
    Sampled,
}

/// Configuration for a wavelet mask.
///
/// # Example
///
/// ```ignore
/// use hypnos_mask::{BasisEncoding, MaskConfig};
///
/// let config = MaskConfig::new()
///     .with_period_seconds(300.0)
///     .with_overlap(true)
///     .with_encoding(BasisEncoding::Sampled);
/// ```
#[derive(Clone, Debug)]
pub struct MaskConfig {
    period_seconds: f64,
    max_freqs: usize,
    overlap: bool,
    partial_reconstruction: bool,
    magnitude: bool,
    encoding: BasisEncoding,
}

impl MaskConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `period_seconds = 3600`, `max_freqs = 7`, overlap off,
    /// partial reconstruction off, magnitude off, padded encoding.
    pub fn new() -> Self {
        Self {
            period_seconds: 3600.0,
            max_freqs: 7,
            overlap: false,
            partial_reconstruction: false,
            magnitude: false,
            encoding: BasisEncoding::Padded,
        }
    }

    /// Sets the period length in seconds.
    pub fn with_period_seconds(mut self, seconds: f64) -> Self {
        self.period_seconds = seconds;
        self
    }

    /// Sets the cap on the number of frequency bands.
    pub fn with_max_freqs(mut self, max_freqs: usize) -> Self {
        self.max_freqs = max_freqs;
        self
    }

    /// Enables or disables 50%-overlap blending across period boundaries.
    pub fn with_overlap(mut self, overlap: bool) -> Self {
        self.overlap = overlap;
        self
    }

    /// Enables or disables partial inverse reconstruction before basis
    /// construction.
    pub fn with_partial_reconstruction(mut self, pr: bool) -> Self {
        self.partial_reconstruction = pr;
        self
    }

    /// Enables or disables magnitude conversion of basis entries.
    pub fn with_magnitude(mut self, magnitude: bool) -> Self {
        self.magnitude = magnitude;
        self
    }

    /// Sets the basis encoding.
    pub fn with_encoding(mut self, encoding: BasisEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Returns the period length in seconds.
    pub fn period_seconds(&self) -> f64 {
        self.period_seconds
    }

    /// Returns the frequency-band cap.
    pub fn max_freqs(&self) -> usize {
        self.max_freqs
    }

    /// Returns whether overlap blending is enabled.
    pub fn overlap(&self) -> bool {
        self.overlap
    }

    /// Returns whether partial reconstruction is enabled.
    pub fn partial_reconstruction(&self) -> bool {
        self.partial_reconstruction
    }

    /// Returns whether magnitude conversion is enabled.
    pub fn magnitude(&self) -> bool {
        self.magnitude
    }

    /// Returns the basis encoding.
    pub fn encoding(&self) -> BasisEncoding {
        self.encoding
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Status snapshot of a mask.
#[derive(Clone, Debug)]
pub struct MaskStatus {
    /// Period length in seconds.
    pub period_seconds: f64,
    /// Sample rate in Hz.
    pub hertz: f64,
    /// Window length in samples.
    pub window: usize,
    /// Number of frequency bands.
    pub num_freqs: usize,
    /// Number of periods.
    pub num_batches: usize,
    /// Whether overlap blending is enabled.
    pub overlap: bool,
    /// Whether partial reconstruction is enabled.
    pub partial_reconstruction: bool,
    /// Whether magnitude conversion is enabled.
    pub magnitude: bool,
}

/// Derives the window length in samples, validating overlap parity.
fn derive_window(config: &MaskConfig, hertz: f64) -> Result<usize, MaskError> {
    if !hertz.is_finite() || hertz <= 0.0 {
        return Err(MaskError::InvalidHertz { hertz });
    }
    let window = (config.period_seconds() * hertz).round() as usize;
    if window == 0 {
        return Err(MaskError::InvalidWindow {
            period_seconds: config.period_seconds(),
            hertz,
        });
    }
    if config.overlap() && window % 2 != 0 {
        return Err(MaskError::OddOverlapWindow { window });
    }
    Ok(window)
}

/// Derives the number of frequency bands: `min(floor(log2(window)) - 1,
/// max_freqs)`, which must be at least 1.
fn derive_num_freqs(window: usize, max_freqs: usize) -> Result<usize, MaskError> {
    let num_freqs = ((window as f64).log2().floor() as usize)
        .saturating_sub(1)
        .min(max_freqs);
    if num_freqs == 0 {
        return Err(MaskError::WindowTooSmall { window, min: 4 });
    }
    Ok(num_freqs)
}

/// Shared per-period pipeline: partial reconstruction, basis
/// construction, magnitude conversion, and overlap reconciliation.
struct Pipeline<T: WaveletTransform> {
    transform: T,
    bank: FilterBank,
    config: MaskConfig,
    num_freqs: usize,
    reconciler: Option<OverlapReconciler>,
}

impl<T: WaveletTransform> Pipeline<T> {
    fn new(
        transform: T,
        bank: FilterBank,
        config: MaskConfig,
        window: usize,
        num_freqs: usize,
        num_batches: usize,
    ) -> Self {
        let reconciler = config
            .overlap()
            .then(|| OverlapReconciler::new(window / 2, num_batches));
        Self {
            transform,
            bank,
            config,
            num_freqs,
            reconciler,
        }
    }

    fn build_basis(
        &self,
        index: usize,
        levels: &crate::levels::LevelSet,
    ) -> Result<CoefficientBasis, MaskError> {
        let basis = match self.config.encoding() {
            BasisEncoding::Padded => CoefficientBasis::padded(levels),
            BasisEncoding::Sampled => CoefficientBasis::sampled(levels),
        }?;
        debug!(
            period = index,
            rows = basis.rows(),
            cols = basis.cols(),
            "built coefficient basis"
        );
        Ok(if self.config.magnitude() {
            basis.magnitude()
        } else {
            basis
        })
    }

    fn reconcile(&mut self, new_w: CoefficientBasis) -> Result<CoefficientBasis, MaskError> {
        match &mut self.reconciler {
            Some(reconciler) => reconciler.push(new_w),
            None => Ok(new_w),
        }
    }

    fn reset(&mut self, num_batches: usize, window: usize) {
        if self.reconciler.is_some() {
            self.reconciler = Some(OverlapReconciler::new(window / 2, num_batches));
        }
    }
}

/// A mask over a live signal source.
///
/// Drives the full per-period pipeline — segmentation, forward transform,
/// optional partial reconstruction, basis construction, optional
/// magnitude conversion, optional persistence, and optional overlap
/// blending — strictly one period at a time in index order. The first
/// failure at any period aborts the run.
pub struct WaveletMask<S: SignalSource, T: WaveletTransform> {
    source: S,
    pipeline: Pipeline<T>,
    store: Option<Box<dyn CoefficientStore>>,
    segmenter: PeriodSegmenter,
    window: usize,
    hertz: f64,
    served: usize,
}

impl<S: SignalSource, T: WaveletTransform> std::fmt::Debug for WaveletMask<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveletMask")
            .field("window", &self.window)
            .field("hertz", &self.hertz)
            .field("served", &self.served)
            .finish_non_exhaustive()
    }
}

impl<S: SignalSource, T: WaveletTransform> WaveletMask<S, T> {
    /// Builds a mask over a live source.
    ///
    /// The signal is fetched and segmented immediately; every
    /// configuration error (empty window, odd window with overlap, too
    /// few samples, too small a window) surfaces here, not during
    /// processing.
    pub fn new(
        mut source: S,
        transform: T,
        bank: FilterBank,
        store: Option<Box<dyn CoefficientStore>>,
        config: MaskConfig,
    ) -> Result<Self, MaskError> {
        let status = source.status();
        let window = derive_window(&config, status.hertz)?;
        let num_freqs = derive_num_freqs(window, config.max_freqs())?;

        let signal = source.get_data()?;
        let segmenter =
            PeriodSegmenter::new(signal.as_slice().to_vec(), window, config.overlap())?;
        let num_batches = segmenter.num_batches();
        info!(
            source = %status.name,
            window,
            num_freqs,
            num_batches,
            overlap = config.overlap(),
            "wavelet mask ready"
        );

        let pipeline = Pipeline::new(transform, bank, config, window, num_freqs, num_batches);
        Ok(Self {
            source,
            pipeline,
            store,
            segmenter,
            window,
            hertz: status.hertz,
            served: 0,
        })
    }

    /// Serves the next period's mask, or `None` when all periods have
    /// been consumed.
    pub fn next_mask(&mut self) -> Result<Option<CoefficientBasis>, MaskError> {
        if self.served >= self.segmenter.num_batches() {
            return Ok(None);
        }
        let index = self.served;
        let basis = self.one_period(index)?;
        let output = self.pipeline.reconcile(basis)?;
        self.served += 1;
        Ok(Some(output))
    }

    /// Runs the pipeline eagerly over every remaining period.
    pub fn masks(&mut self) -> Result<Vec<CoefficientBasis>, MaskError> {
        let remaining = self.segmenter.num_batches() - self.served;
        let mut out = Vec::with_capacity(remaining);
        while let Some(mask) = self.next_mask()? {
            out.push(mask);
        }
        Ok(out)
    }

    fn one_period(&mut self, index: usize) -> Result<CoefficientBasis, MaskError> {
        let samples = self.segmenter.segment(index)?;
        debug!(period = index, samples = samples.len(), "transforming period");

        let mut levels = self.pipeline.transform.forward(
            samples,
            self.pipeline.num_freqs - 1,
            &self.pipeline.bank,
        )?;
        if self.pipeline.config.partial_reconstruction() {
            levels = self
                .pipeline
                .transform
                .reconstruct(levels, &self.pipeline.bank)?;
        }

        let basis = self.pipeline.build_basis(index, &levels)?;
        if let Some(store) = &mut self.store {
            store.store(index, &levels, &basis)?;
        }
        Ok(basis)
    }

    /// Resets the source and restarts the pipeline from period 0.
    pub fn refresh(&mut self) -> Result<(), MaskError> {
        self.source.refresh();
        let signal = self.source.get_data()?;
        self.segmenter = PeriodSegmenter::new(
            signal.as_slice().to_vec(),
            self.window,
            self.pipeline.config.overlap(),
        )?;
        self.pipeline
            .reset(self.segmenter.num_batches(), self.window);
        self.served = 0;
        Ok(())
    }

    /// Returns the number of periods.
    pub fn num_batches(&self) -> usize {
        self.segmenter.num_batches()
    }

    /// Returns the number of frequency bands (basis columns).
    pub fn cols(&self) -> usize {
        self.pipeline.num_freqs
    }

    /// Returns the nominal mask row count: half the source's raw rows.
    pub fn rows(&self) -> usize {
        self.source.rows() / 2
    }

    /// Returns a status snapshot.
    pub fn status(&self) -> MaskStatus {
        MaskStatus {
            period_seconds: self.pipeline.config.period_seconds(),
            hertz: self.hertz,
            window: self.window,
            num_freqs: self.pipeline.num_freqs,
            num_batches: self.segmenter.num_batches(),
            overlap: self.pipeline.config.overlap(),
            partial_reconstruction: self.pipeline.config.partial_reconstruction(),
            magnitude: self.pipeline.config.magnitude(),
        }
    }
}

/// A mask replayed from a previously written coefficient store.
///
/// Level arrays come from the store instead of a live transform; the
/// rest of the pipeline (partial reconstruction, basis construction,
/// magnitude, overlap blending) is identical to the live path.
pub struct StoredMask<T: WaveletTransform> {
    store: Box<dyn CoefficientStore>,
    pipeline: Pipeline<T>,
    window: usize,
    hertz: f64,
    num_batches: usize,
    served: usize,
}

impl<T: WaveletTransform> std::fmt::Debug for StoredMask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredMask")
            .field("window", &self.window)
            .field("hertz", &self.hertz)
            .field("num_batches", &self.num_batches)
            .field("served", &self.served)
            .finish_non_exhaustive()
    }
}

impl<T: WaveletTransform> StoredMask<T> {
    /// Opens a mask over a read-mode store.
    ///
    /// The period count comes from the store; `hertz` must match the rate
    /// the store was written at so the window derivation agrees.
    pub fn new(
        store: Box<dyn CoefficientStore>,
        transform: T,
        bank: FilterBank,
        config: MaskConfig,
        hertz: f64,
    ) -> Result<Self, MaskError> {
        let window = derive_window(&config, hertz)?;
        let num_freqs = derive_num_freqs(window, config.max_freqs())?;
        let num_batches = store.num_periods();
        if num_batches == 0 {
            return Err(MaskError::EmptyStore);
        }
        info!(window, num_freqs, num_batches, "stored mask ready");

        let pipeline = Pipeline::new(transform, bank, config, window, num_freqs, num_batches);
        Ok(Self {
            store,
            pipeline,
            window,
            hertz,
            num_batches,
            served: 0,
        })
    }

    /// Serves the next period's mask, or `None` when all periods have
    /// been consumed.
    pub fn next_mask(&mut self) -> Result<Option<CoefficientBasis>, MaskError> {
        if self.served >= self.num_batches {
            return Ok(None);
        }
        let index = self.served;

        let mut levels = self.store.load(index)?;
        if self.pipeline.config.partial_reconstruction() {
            levels = self
                .pipeline
                .transform
                .reconstruct(levels, &self.pipeline.bank)?;
        }
        let basis = self.pipeline.build_basis(index, &levels)?;
        let output = self.pipeline.reconcile(basis)?;
        self.served += 1;
        Ok(Some(output))
    }

    /// Rebuilds every remaining period eagerly.
    pub fn masks(&mut self) -> Result<Vec<CoefficientBasis>, MaskError> {
        let mut out = Vec::with_capacity(self.num_batches - self.served);
        while let Some(mask) = self.next_mask()? {
            out.push(mask);
        }
        Ok(out)
    }

    /// Returns the number of periods.
    pub fn num_batches(&self) -> usize {
        self.num_batches
    }

    /// Returns the number of frequency bands (basis columns).
    pub fn cols(&self) -> usize {
        self.pipeline.num_freqs
    }

    /// Returns a status snapshot.
    pub fn status(&self) -> MaskStatus {
        MaskStatus {
            period_seconds: self.pipeline.config.period_seconds(),
            hertz: self.hertz,
            window: self.window,
            num_freqs: self.pipeline.num_freqs,
            num_batches: self.num_batches,
            overlap: self.pipeline.config.overlap(),
            partial_reconstruction: self.pipeline.config.partial_reconstruction(),
            magnitude: self.pipeline.config.magnitude(),
        }
    }
}
