//! Projection run configuration

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::constants::{budget, defaults};
use crate::config::{DepthPrime, LatticeBase, OmegaHz, ProjectionCount, PsiVariant, Steps};

/// Guards against pathological parameter combinations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSettings {
    /// steps x lines. The triad list is cut to fit.
    pub max_total_steps: usize,
    /// Lines not yet started when this elapses are skipped.
    pub max_duration_ms: u64,
}

impl BudgetSettings {
    pub fn max_duration(&self) -> Duration {
        Duration::from_millis(self.max_duration_ms)
    }
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            max_total_steps: budget::MAX_TOTAL_STEPS,
            max_duration_ms: budget::MAX_DURATION.as_millis() as u64,
        }
    }
}

/// The Master Projection Configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionSettings {
    pub steps: Steps,
    pub depth_prime: DepthPrime,
    pub base: LatticeBase,
    pub projection_count: ProjectionCount,

    /// When set, skips adaptive estimation entirely.
    pub omega_override: Option<OmegaHz>,

    pub psi_variant: PsiVariant,

    /// How many trailing prices are scored against the projection head.
    pub validation_lookback: usize,

    pub budget: BudgetSettings,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            steps: defaults::STEPS,
            depth_prime: defaults::DEPTH_PRIME,
            base: defaults::BASE,
            projection_count: defaults::PROJECTION_COUNT,
            omega_override: None,
            psi_variant: PsiVariant::default(),
            validation_lookback: defaults::VALIDATION_LOOKBACK,
            budget: BudgetSettings::default(),
        }
    }
}

impl ProjectionSettings {
    /// Reads a JSON settings file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        let settings: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid settings JSON in {}", path.display()))?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_fills_defaults_and_clamps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "steps": 500, "depth_prime": 47, "psi_variant": "Normalized" }}"#).unwrap();

        let settings = ProjectionSettings::load(file.path()).unwrap();
        assert_eq!(settings.steps.value(), 200);
        assert_eq!(settings.depth_prime.value(), 47);
        assert_eq!(settings.psi_variant, PsiVariant::Normalized);
        assert_eq!(settings.base.value(), 3.0);
        assert_eq!(settings.budget.max_total_steps, budget::MAX_TOTAL_STEPS);
        assert!(settings.omega_override.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = ProjectionSettings::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings file"));
    }
}
