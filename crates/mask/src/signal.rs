//! Validated signal wrapper and the signal-source capability.

use crate::error::MaskError;

/// A validated, evenly-sampled one-dimensional signal.
///
/// Wraps a `Vec<f64>` and guarantees:
/// - length >= 2
/// - all samples are finite (no NaN or infinity)
/// - a positive, finite sample rate in Hz
///
/// # Example
///
/// ```ignore
/// use hypnos_mask::Signal;
///
/// let signal = Signal::new(vec![1.0, 2.0, 3.0], 4.0)?;
/// assert_eq!(signal.len(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Signal {
    data: Vec<f64>,
    hertz: f64,
}

impl Signal {
    /// Creates a new `Signal` after validating samples and sample rate.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`MaskError::SignalTooShort`] | `data.len() < 2` |
    /// | [`MaskError::NonFiniteData`] | any sample is NaN or infinite |
    /// | [`MaskError::InvalidHertz`] | `hertz <= 0` or non-finite |
    pub fn new(data: Vec<f64>, hertz: f64) -> Result<Self, MaskError> {
        if data.len() < 2 {
            return Err(MaskError::SignalTooShort {
                len: data.len(),
                min: 2,
            });
        }
        if !data.iter().all(|v| v.is_finite()) {
            return Err(MaskError::NonFiniteData);
        }
        if !hertz.is_finite() || hertz <= 0.0 {
            return Err(MaskError::InvalidHertz { hertz });
        }
        Ok(Self { data, hertz })
    }

    /// Returns the samples as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the signal is empty.
    ///
    /// Note: a valid `Signal` is never empty (minimum length is 2).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the sample rate in Hz.
    pub fn hertz(&self) -> f64 {
        self.hertz
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.data
    }
}

/// Status snapshot reported by a signal source.
#[derive(Clone, Debug)]
pub struct SourceStatus {
    /// Sample rate of the served signal in Hz.
    pub hertz: f64,
    /// Human-readable source name, used in logs and store paths.
    pub name: String,
}

/// The data-source capability the core depends on.
///
/// The core calls exactly four operations; everything else about data
/// acquisition (file formats, device protocols, caching) belongs to the
/// implementor.
pub trait SignalSource {
    /// Serves the current signal.
    fn get_data(&mut self) -> Result<Signal, MaskError>;

    /// Returns the source status (sample rate and name).
    fn status(&self) -> SourceStatus;

    /// Resets the source so the next [`get_data`](Self::get_data) call
    /// serves the signal from the beginning.
    fn refresh(&mut self);

    /// Returns the number of raw samples the source holds.
    fn rows(&self) -> usize;
}

/// An in-memory signal source over an owned [`Signal`].
#[derive(Clone, Debug)]
pub struct SliceSource {
    signal: Signal,
    name: String,
}

impl SliceSource {
    /// Wraps a validated signal under the given source name.
    pub fn new(signal: Signal, name: impl Into<String>) -> Self {
        Self {
            signal,
            name: name.into(),
        }
    }
}

impl SignalSource for SliceSource {
    fn get_data(&mut self) -> Result<Signal, MaskError> {
        Ok(self.signal.clone())
    }

    fn status(&self) -> SourceStatus {
        SourceStatus {
            hertz: self.signal.hertz(),
            name: self.name.clone(),
        }
    }

    fn refresh(&mut self) {
        // The whole signal lives in memory; there is nothing to reload.
    }

    fn rows(&self) -> usize {
        self.signal.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid_signal() {
        let signal = Signal::new(vec![1.0, 2.0, 3.0], 4.0).unwrap();
        assert_eq!(signal.len(), 3);
        assert!(!signal.is_empty());
        assert_eq!(signal.as_slice(), &[1.0, 2.0, 3.0]);
        assert!((signal.hertz() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_too_short() {
        let err = Signal::new(vec![1.0], 1.0).unwrap_err();
        assert!(matches!(err, MaskError::SignalTooShort { len: 1, min: 2 }));
    }

    #[test]
    fn new_nan_rejected() {
        let err = Signal::new(vec![1.0, f64::NAN], 1.0).unwrap_err();
        assert!(matches!(err, MaskError::NonFiniteData));
    }

    #[test]
    fn new_infinity_rejected() {
        let err = Signal::new(vec![1.0, f64::INFINITY], 1.0).unwrap_err();
        assert!(matches!(err, MaskError::NonFiniteData));
    }

    #[test]
    fn new_zero_hertz_rejected() {
        let err = Signal::new(vec![1.0, 2.0], 0.0).unwrap_err();
        assert!(matches!(err, MaskError::InvalidHertz { .. }));
    }

    #[test]
    fn new_negative_hertz_rejected() {
        let err = Signal::new(vec![1.0, 2.0], -1.0).unwrap_err();
        assert!(matches!(err, MaskError::InvalidHertz { .. }));
    }

    #[test]
    fn slice_source_serves_signal() {
        let signal = Signal::new(vec![1.0, 2.0, 3.0, 4.0], 2.0).unwrap();
        let mut source = SliceSource::new(signal, "wrist");

        let status = source.status();
        assert!((status.hertz - 2.0).abs() < f64::EPSILON);
        assert_eq!(status.name, "wrist");
        assert_eq!(source.rows(), 4);

        let served = source.get_data().unwrap();
        assert_eq!(served.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        // Refresh is a no-op for the in-memory source.
        source.refresh();
        assert_eq!(source.get_data().unwrap().len(), 4);
    }

    #[test]
    fn signal_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<Signal>();
        assert_impl::<SliceSource>();
    }
}
