use serde::{Deserialize, Serialize};

use crate::config::{Confidence, PsiVariant};
use crate::domain::Triad;
use crate::models::FrequencySource;

/// One triad's candidate future path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionLine {
    pub triad: Triad,
    pub points: Vec<f64>,
    /// Range-ratio heuristic, not a statistical measure.
    pub confidence: Confidence,
    /// True when the lattice degenerated and the linear trend stood in.
    #[serde(default)]
    pub fallback: bool,
}

/// Accuracy of the projection head against the trailing history.
/// `None` fields mean the metric is undefined for the given data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mae: Option<f64>,
    pub rmse: Option<f64>,
    pub mape: Option<f64>,
    /// Percentage in [0, 100].
    pub directional_accuracy: Option<f64>,
    pub confidence: Confidence,
}

impl ValidationMetrics {
    /// Result for too little data. Neutral confidence, nothing measured.
    pub fn insufficient() -> Self {
        Self {
            mae: None,
            rmse: None,
            mape: None,
            directional_accuracy: None,
            confidence: Confidence::NEUTRAL,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        self.mae.is_none() && self.rmse.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionMetadata {
    pub steps: usize,
    pub depth_prime: u32,
    pub base: f64,
    pub omega_hz: f64,
    pub omega_source: FrequencySource,
    pub psi_variant: PsiVariant,
    /// Lines that made it into the ensemble.
    pub triad_count: usize,
    /// Lines requested after budget truncation.
    pub triads_attempted: usize,
    pub enriched: bool,
}

/// Terminal output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub points: Vec<f64>,
    pub projection_lines: Vec<ProjectionLine>,
    pub validation: ValidationMetrics,
    pub confidence: Confidence,
    pub metadata: ProjectionMetadata,
}
