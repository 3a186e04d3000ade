#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

// Re-export commonly used types outside of crate
pub use config::{ProjectionSettings, PsiVariant};
pub use domain::{PriceSeries, Triad};
pub use engine::{EnrichmentSource, JobRequest, JobResult, ProjectionEngine, ProjectionRequest};
pub use error::{ProjectionError, SpectralError};
pub use models::{EnrichmentHints, ProjectionLine, ProjectionResult, ValidationMetrics};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Prime-lattice price projection", long_about = None)]
pub struct Cli {
    /// Comma separated prices, oldest first
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "input")]
    pub prices: Option<Vec<f64>>,

    /// File of prices: one per line, comma/whitespace separated, or a JSON array
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    /// JSON settings file; flags below override it
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// JSON enrichment hints file
    #[arg(long)]
    pub hints: Option<PathBuf>,

    #[arg(long)]
    pub steps: Option<usize>,

    #[arg(long)]
    pub depth_prime: Option<u32>,

    #[arg(long)]
    pub base: Option<f64>,

    /// Number of triads / projection lines
    #[arg(long)]
    pub count: Option<usize>,

    /// Fixed omega in Hz instead of the adaptive estimate
    #[arg(long)]
    pub omega: Option<f64>,

    /// plimpton or normalized
    #[arg(long)]
    pub psi: Option<PsiVariant>,

    /// Also print the oscillation breakdown of the input
    #[arg(long, default_value_t = false)]
    pub oscillations: bool,

    /// Print the full result as JSON instead of tables
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Log at debug level for this crate
    #[arg(long, short, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Settings file (or defaults) with command-line overrides applied. Values clamp.
    pub fn settings(&self) -> anyhow::Result<ProjectionSettings> {
        let mut settings = match &self.config {
            Some(path) => ProjectionSettings::load(path)?,
            None => ProjectionSettings::default(),
        };
        if let Some(v) = self.steps {
            settings.steps = v.into();
        }
        if let Some(v) = self.depth_prime {
            settings.depth_prime = v.into();
        }
        if let Some(v) = self.base {
            settings.base = v.into();
        }
        if let Some(v) = self.count {
            settings.projection_count = v.into();
        }
        if let Some(v) = self.omega {
            settings.omega_override = Some(v.into());
        }
        if let Some(v) = self.psi {
            settings.psi_variant = v;
        }
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults_and_clamp() {
        let cli = Cli::parse_from([
            "prime-lattice",
            "--prices",
            "1,2,3",
            "--steps",
            "999",
            "--psi",
            "normalized",
            "--omega",
            "50",
        ]);
        assert_eq!(cli.prices, Some(vec![1.0, 2.0, 3.0]));
        let settings = cli.settings().unwrap();
        assert_eq!(settings.steps.value(), 200);
        assert_eq!(settings.psi_variant, PsiVariant::Normalized);
        assert_eq!(settings.omega_override.map(|o| o.value()), Some(200.0));
        assert_eq!(settings.depth_prime.value(), 31);
    }
}
