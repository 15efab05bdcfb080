//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use hypnos_mask::{BasisEncoding, MaskConfig};

use crate::config::MaskToml;

/// Parses a basis encoding name string into the corresponding enum variant.
pub fn parse_encoding(s: &str) -> Result<BasisEncoding> {
    match s.to_lowercase().as_str() {
        "padded" => Ok(BasisEncoding::Padded),
        "sampled" => Ok(BasisEncoding::Sampled),
        other => bail!("unknown basis encoding: {other:?}"),
    }
}

/// Builds a [`MaskConfig`] from the TOML mask configuration.
pub fn build_mask_config(mask: &MaskToml) -> Result<MaskConfig> {
    let encoding = parse_encoding(&mask.encoding)?;
    Ok(MaskConfig::new()
        .with_period_seconds(mask.period_seconds)
        .with_max_freqs(mask.max_freqs)
        .with_overlap(mask.overlap)
        .with_partial_reconstruction(mask.partial_reconstruction)
        .with_magnitude(mask.magnitude)
        .with_encoding(encoding))
}
