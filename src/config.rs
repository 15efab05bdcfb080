use std::path::PathBuf;

use serde::Deserialize;

use hypnos_filters::{DEFAULT_BIORTHOGONAL, DEFAULT_QSHIFT};

/// Top-level Hypnos configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HypnosConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoToml,

    /// Mask pipeline settings.
    #[serde(default)]
    pub mask: MaskToml,

    /// Filter resource settings.
    #[serde(default)]
    pub filters: FiltersToml,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct IoToml {
    /// Newline-delimited sample file to transform.
    pub input: Option<PathBuf>,
    /// Sample rate of the input signal in Hz.
    #[serde(default = "default_hertz")]
    pub hertz: f64,
    /// Source name used in logs and store paths.
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_hertz() -> f64 {
    1.0
}
fn default_name() -> String {
    "signal".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaskToml {
    #[serde(default = "default_period_seconds")]
    pub period_seconds: f64,
    #[serde(default = "default_max_freqs")]
    pub max_freqs: usize,
    #[serde(default)]
    pub overlap: bool,
    #[serde(default)]
    pub partial_reconstruction: bool,
    #[serde(default)]
    pub magnitude: bool,
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

impl Default for MaskToml {
    fn default() -> Self {
        Self {
            period_seconds: default_period_seconds(),
            max_freqs: default_max_freqs(),
            overlap: false,
            partial_reconstruction: false,
            magnitude: false,
            encoding: default_encoding(),
        }
    }
}

fn default_period_seconds() -> f64 {
    3600.0
}
fn default_max_freqs() -> usize {
    7
}
fn default_encoding() -> String {
    "padded".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FiltersToml {
    /// Directory holding the filter CSV resources.
    #[serde(default = "default_filter_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_biorthogonal")]
    pub biorthogonal: String,
    #[serde(default = "default_qshift")]
    pub qshift: String,
}

impl Default for FiltersToml {
    fn default() -> Self {
        Self {
            dir: default_filter_dir(),
            biorthogonal: default_biorthogonal(),
            qshift: default_qshift(),
        }
    }
}

fn default_filter_dir() -> PathBuf {
    PathBuf::from("filters")
}
fn default_biorthogonal() -> String {
    DEFAULT_BIORTHOGONAL.to_string()
}
fn default_qshift() -> String {
    DEFAULT_QSHIFT.to_string()
}
