//! # hypnos-store
//!
//! Persistence backends for per-period wavelet coefficients, implementing
//! the [`CoefficientStore`](hypnos_mask::CoefficientStore) capability:
//!
//! | Backend | Format | Keeps | Loads back |
//! |---------|--------|-------|------------|
//! | [`HierarchicalStore`] | single NetCDF file, one group per period | raw level arrays | yes |
//! | [`FlatDirStore`] | directory of `<i>wavelets.csv` files | finished bases only | no |

mod error;
mod flat;
mod hierarchical;

pub use error::StoreError;
pub use flat::FlatDirStore;
pub use hierarchical::HierarchicalStore;

use hypnos_mask::MaskError;

/// Maps backend errors onto the mask crate's store variants.
fn to_mask_error(e: StoreError) -> MaskError {
    match e {
        StoreError::UnsupportedLoad { backend } => MaskError::UnsupportedLoad {
            backend: backend.to_string(),
        },
        other => MaskError::Store {
            reason: other.to_string(),
        },
    }
}
