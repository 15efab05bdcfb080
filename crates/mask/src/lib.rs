//! # hypnos-mask
//!
//! Multiresolution wavelet-coefficient masks for evenly-sampled 1-D
//! sensor signals. A signal is segmented into fixed-length periods; each
//! period is decomposed by an injected wavelet transform and its ragged
//! per-level output is flattened into one dense complex matrix per
//! period, optionally blended across period boundaries.
//!
//! ## Pipeline
//!
//! ```mermaid
//! graph LR
//!     A["SignalSource"] -->|"segment"| B["PeriodSegmenter"]
//!     B -->|"forward"| C["WaveletTransform"]
//!     C -.->|"reconstruct (pr)"| C
//!     C -->|"padded / sampled"| D["CoefficientBasis"]
//!     D -.->|"store"| E["CoefficientStore"]
//!     D -->|"push"| F["OverlapReconciler"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hypnos_mask::{DyadicPyramid, MaskConfig, Signal, SliceSource, WaveletMask};
//!
//! let signal = Signal::new(samples, 4.0)?;
//! let source = SliceSource::new(signal, "wrist");
//! let config = MaskConfig::new().with_period_seconds(300.0).with_overlap(true);
//! let mut mask = WaveletMask::new(source, DyadicPyramid, bank, None, config)?;
//!
//! while let Some(basis) = mask.next_mask()? {
//!     println!("{} x {}", basis.rows(), basis.cols());
//! }
//! ```

mod basis;
mod error;
mod levels;
mod mask;
mod overlap;
mod reflect;
mod segment;
mod signal;
mod store;
mod transform;

pub use basis::CoefficientBasis;
pub use error::MaskError;
pub use levels::LevelSet;
pub use mask::{BasisEncoding, MaskConfig, MaskStatus, StoredMask, WaveletMask};
pub use overlap::OverlapReconciler;
pub use reflect::reflect;
pub use segment::PeriodSegmenter;
pub use signal::{Signal, SignalSource, SliceSource, SourceStatus};
pub use store::CoefficientStore;
pub use transform::{DyadicPyramid, WaveletTransform};
