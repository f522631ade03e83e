use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Extra vertices requested from the synthesizer, pruning eats the surplus.
pub const VERTEX_ADJUSTMENT: f64 = 1.13;

/// Smallest total degree a vertex may draw.
pub const MIN_DEGREE: u32 = 1;

/// Proposal passes over the edge set per resolution.
pub const REWIRE_SWEEPS: usize = 1;

/// Command line surface of the generator.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "sbm_bench",
    about = "Generate directed benchmark graphs with a known community structure"
)]
pub struct GenArgs {
    /// Number of vertices in graph.
    #[arg(short = 'n', long = "numvertices", default_value_t = 200)]
    pub num_vertices: u32,

    /// Number of communities = n^m.
    #[arg(short = 'm', long = "communityexponent", default_value_t = 0.35)]
    pub community_exponent: f64,

    /// Max vertex degree = a * n.
    #[arg(short = 'a', long = "maxdegree", default_value_t = 0.05)]
    pub max_degree: f64,

    /// 5 = low, 2 (or 1.7) = high.
    #[arg(short = 'o', long = "overlap", default_value_t = 5.0)]
    pub overlap: f64,

    /// 1 = low, 5 = high.
    #[arg(short = 's', long = "blocksizevariation", default_value_t = 1.0)]
    pub block_size_variation: f64,

    /// The power law exponent of the degree distribution.
    #[arg(short = 'e', long = "powerlawexponent", default_value_t = -2.1)]
    pub power_law_exponent: f64,

    /// 1 - d fraction of edges will be removed.
    #[arg(short = 'd', long = "density", default_value_t = 1.0)]
    pub density: f64,

    /// The directory in which to store the graphs.
    #[arg(long, default_value = "./")]
    pub directory: String,

    /// If provided, save files on this remote host over ssh.
    #[arg(short = 'r', long)]
    pub remote: Option<String>,

    /// Seed for the random source. Omitted means entropy seeded.
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML file overriding the resolution sweep lists.
    #[arg(long)]
    pub sweep_config: Option<PathBuf>,
}

impl GenArgs {
    /// Check every knob against its admissible range before any work runs.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.num_vertices == 0 {
            bail!("numvertices must be positive");
        }
        for (name, value) in [
            ("communityexponent", self.community_exponent),
            ("powerlawexponent", self.power_law_exponent),
        ] {
            if !value.is_finite() {
                bail!("{name} must be finite, got {value}");
            }
        }
        for (name, value) in [
            ("maxdegree", self.max_degree),
            ("overlap", self.overlap),
            ("blocksizevariation", self.block_size_variation),
        ] {
            if !value.is_finite() || value <= 0.0 {
                bail!("{name} must be a finite positive number, got {value}");
            }
        }
        if !self.density.is_finite() || self.density <= 0.0 || self.density > 1.0 {
            bail!("density must lie in (0, 1], got {}", self.density);
        }
        Ok(())
    }
}

/// The resolution sweep. Every combination of the three lists is generated
/// against the current graph, one snapshot per combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub block_exponents: Vec<f64>,
    pub size_variations: Vec<f64>,
    pub overlaps: Vec<f64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            block_exponents: vec![0.25, 0.35, 0.45],
            size_variations: vec![1.0, 3.0, 5.0],
            overlaps: vec![1.0, 3.0, 5.0],
        }
    }
}

impl SweepConfig {
    /// Load a sweep description from a YAML file.
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<SweepConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading sweep config {}", path.display()))?;
        let sweep: SweepConfig = serde_yaml::from_str(&text)
            .with_context(|| format!("parsing sweep config {}", path.display()))?;
        if sweep.block_exponents.is_empty()
            || sweep.size_variations.is_empty()
            || sweep.overlaps.is_empty()
        {
            bail!("sweep config must keep all three lists non-empty");
        }
        Ok(sweep)
    }

    /// Number of snapshots one run of this sweep emits.
    pub fn combination_count(&self) -> usize {
        self.block_exponents.len() * self.size_variations.len() * self.overlaps.len()
    }
}
