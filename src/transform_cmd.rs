use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use hypnos_filters::FilterBank;
use hypnos_mask::{CoefficientStore, DyadicPyramid, Signal, SliceSource, WaveletMask};
use hypnos_store::{FlatDirStore, HierarchicalStore};

use crate::cli::TransformArgs;
use crate::config::HypnosConfig;
use crate::convert;

/// Run the transform pipeline: signal file -> per-period masks.
pub fn run(args: TransformArgs) -> Result<()> {
    let config = load_config(&args.config)?;

    // Step 1: Resolve the input signal
    let input = args
        .input
        .or_else(|| config.io.input.clone())
        .ok_or_else(|| {
            anyhow::anyhow!("no input path: set [io].input in config or use --input")
        })?;
    info!(path = %input.display(), "reading signal");
    let samples = read_samples(&input)?;
    let signal = Signal::new(samples, config.io.hertz)
        .with_context(|| format!("invalid signal in {}", input.display()))?;
    let source = SliceSource::new(signal, &config.io.name);

    // Step 2: Load filter resources and build the pipeline config
    let bank = FilterBank::load(
        &config.filters.dir,
        &config.filters.biorthogonal,
        &config.filters.qshift,
    )
    .with_context(|| format!("failed to load filters from {}", config.filters.dir.display()))?;
    let mask_cfg = convert::build_mask_config(&config.mask)?;

    // Step 3: Open the requested persistence backend, if any
    let store: Option<Box<dyn CoefficientStore>> = match (&args.store, &args.export) {
        (Some(_), Some(_)) => {
            anyhow::bail!("choose one of --store or --export, not both")
        }
        (Some(path), None) => Some(Box::new(
            HierarchicalStore::create(path)
                .with_context(|| format!("failed to create store {}", path.display()))?,
        )),
        (None, Some(dir)) => Some(Box::new(FlatDirStore::create(dir).with_context(|| {
            format!("failed to create export directory {}", dir.display())
        })?)),
        (None, None) => None,
    };

    // Step 4: Drive the pipeline one period at a time
    let mut mask = WaveletMask::new(source, DyadicPyramid, bank, store, mask_cfg)
        .context("failed to build wavelet mask")?;
    let status = mask.status();
    info!(
        window = status.window,
        num_freqs = status.num_freqs,
        num_batches = status.num_batches,
        "transforming"
    );

    let mut served = 0usize;
    while let Some(basis) = mask.next_mask().context("mask construction failed")? {
        info!(
            period = served,
            rows = basis.rows(),
            cols = basis.cols(),
            "mask ready"
        );
        served += 1;
    }
    info!(periods = served, "transform complete");
    Ok(())
}

/// Loads and parses the TOML configuration file.
pub fn load_config(path: &Path) -> Result<HypnosConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

/// Reads a newline-delimited sample file, skipping blank lines.
fn read_samples(path: &Path) -> Result<Vec<f64>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read signal {}", path.display()))?;
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| {
            line.parse::<f64>()
                .with_context(|| format!("bad sample on line {}: {line:?}", i + 1))
        })
        .collect()
}
