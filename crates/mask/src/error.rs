//! Error types for the hypnos-mask crate.

/// Error type for all fallible operations in the hypnos-mask crate.
///
/// Covers signal validation, configuration problems caught at
/// construction, shape violations during basis construction, and failures
/// surfaced by injected transform or store capabilities. There is no local
/// recovery anywhere in the core: the first error aborts the run.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MaskError {
    /// Returned when the input signal is shorter than the minimum required length.
    #[error("signal too short: got {len} samples, need at least {min}")]
    SignalTooShort {
        /// Number of samples provided.
        len: usize,
        /// Minimum number of samples required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the sample rate is zero, negative, or non-finite.
    #[error("invalid sample rate: {hertz} Hz")]
    InvalidHertz {
        /// The offending sample rate.
        hertz: f64,
    },

    /// Returned when the period length rounds to zero samples.
    #[error("period of {period_seconds} s at {hertz} Hz yields an empty window")]
    InvalidWindow {
        /// Requested period length in seconds.
        period_seconds: f64,
        /// Sample rate in Hz.
        hertz: f64,
    },

    /// Returned when the window is too small to admit any decomposition level.
    #[error("window of {window} samples too small: need at least {min}")]
    WindowTooSmall {
        /// Derived window length in samples.
        window: usize,
        /// Minimum window length.
        min: usize,
    },

    /// Returned when overlap blending is requested with an odd window.
    #[error("overlap blending requires an even window, got {window}")]
    OddOverlapWindow {
        /// Derived window length in samples.
        window: usize,
    },

    /// Returned when a period index lies outside `[0, num_batches)`.
    #[error("period index {index} out of range: signal has {num_batches} periods")]
    PeriodOutOfRange {
        /// Requested period index.
        index: usize,
        /// Number of available periods.
        num_batches: usize,
    },

    /// Returned when the transform produced no high-pass levels.
    #[error("level set has no high-pass levels")]
    EmptyLevels,

    /// Returned when a level's row count does not evenly divide the finest level's.
    #[error(
        "level {level} has {level_rows} rows, which does not evenly divide \
         the finest level's {finest_rows}"
    )]
    UnevenLevel {
        /// Level index (0 = finest).
        level: usize,
        /// Row count of the offending level.
        level_rows: usize,
        /// Row count of the finest level.
        finest_rows: usize,
    },

    /// Returned when a level is too short for its decimation stride.
    #[error("level {level} has {got} rows, need {need} for its decimation stride")]
    LevelTooShort {
        /// Level index in the sampled sequence.
        level: usize,
        /// Rows required to fill the output column.
        need: usize,
        /// Rows actually present.
        got: usize,
    },

    /// Returned when no level survives the sampled-encoding validity cutoff.
    #[error("no valid levels for sampled encoding")]
    EmptyBasis,

    /// Returned when adjacent bases cannot be blended.
    #[error("basis shape mismatch at round {round}: {details}")]
    BasisShape {
        /// Reconciler round at which the mismatch was detected.
        round: usize,
        /// Expected vs actual shape description.
        details: String,
    },

    /// Returned when the overlap fold is stepped out of order.
    #[error("no previous basis available at round {round}")]
    MissingPrevious {
        /// Reconciler round at which the state was missing.
        round: usize,
    },

    /// Wraps a failure reported by an injected transform capability.
    #[error("transform failed: {reason}")]
    Transform {
        /// Description of the transform failure.
        reason: String,
    },

    /// Wraps a failure reported by an injected coefficient store.
    #[error("store failed: {reason}")]
    Store {
        /// Description of the store failure.
        reason: String,
    },

    /// Returned when loading is requested from a backend that cannot serve it.
    #[error("loading is not supported by the {backend} backend")]
    UnsupportedLoad {
        /// Name of the refusing backend.
        backend: String,
    },

    /// Returned when a stored mask is opened over a store with no periods.
    #[error("coefficient store contains no periods")]
    EmptyStore,
}
