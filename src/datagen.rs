//! Demo data generation and seed-file loading.
//!
//! The core treats seed data as opaque: anything that yields a list of
//! [`Series`] can feed a session. This module provides the two sources the
//! demo uses, reproducible random data and JSON seed files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Rgb, Series};

/// Parameters for generated demo data.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoDataConfig {
    /// Number of series to generate.
    pub series: usize,
    /// Samples per series.
    pub points: usize,
    /// Lower sample bound, inclusive.
    pub low: i32,
    /// Upper sample bound, inclusive.
    pub high: i32,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for DemoDataConfig {
    fn default() -> Self {
        Self {
            series: 10,
            points: 10,
            low: -100,
            high: 100,
            seed: None,
        }
    }
}

/// Generate demo series: integer-valued samples drawn uniformly from
/// `[low, high]` (bounds sorted first), labels `#0..`, colors cycling
/// through the palette. A fixed seed reproduces the same dataset on every
/// platform.
pub fn generate(cfg: &DemoDataConfig) -> Vec<Series> {
    let mut rng = match cfg.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let (low, high) = (cfg.low.min(cfg.high), cfg.low.max(cfg.high));
    (0..cfg.series)
        .map(|i| {
            let samples = (0..cfg.points)
                .map(|_| f64::from(rng.gen_range(low..=high)))
                .collect();
            Series::new(format!("#{i}"), samples, Rgb::palette(i))
        })
        .collect()
}

/// One entry of a JSON seed file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SeedSeries {
    label: String,
    samples: Vec<f64>,
    #[serde(default)]
    color: Option<Rgb>,
    #[serde(default = "default_active")]
    active: bool,
}

fn default_active() -> bool {
    true
}

/// Load seed series from a JSON file holding an array of
/// `{ "label", "samples", "color"?, "active"? }` objects.
///
/// Missing colors are filled from the palette by position; missing active
/// flags default to true.
pub fn load_seed_file(path: impl AsRef<Path>) -> Result<Vec<Series>> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read seed file {path:?}"))?;
    let entries: Vec<SeedSeries> = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse seed file {path:?}"))?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let color = entry.color.unwrap_or_else(|| Rgb::palette(i));
            let mut series = Series::new(entry.label, entry.samples, color);
            series.active = entry.active;
            series
        })
        .collect())
}
