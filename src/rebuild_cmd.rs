use anyhow::{Context, Result};
use tracing::info;

use hypnos_filters::FilterBank;
use hypnos_mask::{DyadicPyramid, StoredMask};
use hypnos_store::{FlatDirStore, HierarchicalStore};

use crate::cli::RebuildArgs;
use crate::convert;
use crate::transform_cmd::load_config;

/// Rebuild masks from a previously written coefficient repository.
pub fn run(args: RebuildArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    let store = HierarchicalStore::open(&args.store)
        .with_context(|| format!("failed to open store {}", args.store.display()))?;
    let bank = FilterBank::load(
        &config.filters.dir,
        &config.filters.biorthogonal,
        &config.filters.qshift,
    )
    .with_context(|| format!("failed to load filters from {}", config.filters.dir.display()))?;
    let mask_cfg = convert::build_mask_config(&config.mask)?;

    let mut export = args
        .export
        .as_ref()
        .map(|dir| {
            FlatDirStore::create(dir)
                .with_context(|| format!("failed to create export directory {}", dir.display()))
        })
        .transpose()?;

    let mut mask = StoredMask::new(Box::new(store), DyadicPyramid, bank, mask_cfg, config.io.hertz)
        .context("failed to open stored mask")?;
    info!(num_batches = mask.num_batches(), "rebuilding");

    let mut served = 0usize;
    while let Some(basis) = mask.next_mask().context("mask rebuild failed")? {
        info!(
            period = served,
            rows = basis.rows(),
            cols = basis.cols(),
            "mask rebuilt"
        );
        if let Some(export) = &mut export {
            export.export(served, &basis)?;
        }
        served += 1;
    }
    info!(periods = served, "rebuild complete");
    Ok(())
}
