use std::sync::Arc;

use rayon::prelude::*;

use crate::analysis::{
    EnsembleCombiner, FrequencyEstimator, LatticePath, LatticeProjector, OscillationDecomposer,
    ProjectionParameters, StatisticalValidator, TriadGenerator,
};
use crate::config::constants::MAX_OSCILLATION_COMPONENTS;
use crate::config::{
    BudgetSettings, Confidence, DF, DepthPrime, LatticeBase, OmegaHz, ProjectionCount,
    ProjectionSettings, PsiVariant, Steps,
};
use crate::domain::{PriceSeries, Triad};
use crate::error::ProjectionError;
use crate::models::{
    Decomposition, EnrichmentHints, FrequencyEstimate, FrequencySource, ProjectionLine,
    ProjectionMetadata, ProjectionResult,
};
use crate::utils::AppInstant;

use super::enrichment::{EnrichmentSource, NoEnrichment};

/// One engine call's parameters. Every numeric field is already clamped by its type.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionRequest {
    pub steps: Steps,
    pub depth_prime: DepthPrime,
    pub base: LatticeBase,
    pub projection_count: ProjectionCount,
    pub omega_override: Option<OmegaHz>,
    pub psi_variant: PsiVariant,
    pub validation_lookback: usize,
    pub budget: BudgetSettings,
    /// Takes priority over the engine's enrichment source.
    pub hints: Option<EnrichmentHints>,
}

impl ProjectionRequest {
    pub fn with_hints(mut self, hints: EnrichmentHints) -> Self {
        self.hints = Some(hints);
        self
    }
}

impl From<&ProjectionSettings> for ProjectionRequest {
    fn from(settings: &ProjectionSettings) -> Self {
        Self {
            steps: settings.steps,
            depth_prime: settings.depth_prime,
            base: settings.base,
            projection_count: settings.projection_count,
            omega_override: settings.omega_override,
            psi_variant: settings.psi_variant,
            validation_lookback: settings.validation_lookback,
            budget: settings.budget.clone(),
            hints: None,
        }
    }
}

impl Default for ProjectionRequest {
    fn default() -> Self {
        Self::from(&ProjectionSettings::default())
    }
}

/// Orchestrates omega estimation, triad generation, the lattice runs, ensemble and validation.
/// Holds no per-run state, so one engine can serve many threads.
#[derive(Clone)]
pub struct ProjectionEngine {
    estimator: FrequencyEstimator,
    enrichment: Arc<dyn EnrichmentSource>,
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectionEngine {
    pub fn new() -> Self {
        Self {
            estimator: FrequencyEstimator::default(),
            enrichment: Arc::new(NoEnrichment),
        }
    }

    pub fn with_enrichment(mut self, source: Arc<dyn EnrichmentSource>) -> Self {
        self.enrichment = source;
        self
    }

    /// Full pipeline. Only bad input or a run where no line survives is an error.
    pub fn project(
        &self,
        prices: &[f64],
        request: &ProjectionRequest,
    ) -> Result<ProjectionResult, ProjectionError> {
        let series = PriceSeries::new(prices.to_vec())?;
        let steps = request.steps;

        // 1. Omega
        let omega = match request.omega_override {
            Some(hz) => FrequencyEstimate::new(hz.value(), FrequencySource::Override),
            None => self.estimator.estimate_detailed(series.as_slice()),
        };

        // 2. Hints
        let hints = self.resolve_hints(&series, request);

        // 3. Triads, cut to the step budget
        let mut triads = TriadGenerator::generate(request.depth_prime, request.projection_count);
        let max_lines = (request.budget.max_total_steps / steps.value()).max(1);
        if triads.len() > max_lines {
            log::warn!(
                "Step budget {} allows {} of {} lines at {}",
                request.budget.max_total_steps,
                max_lines,
                triads.len(),
                steps
            );
            triads.truncate(max_lines);
        }
        let attempted = triads.len();

        // 4. Lattice lines
        let paths = crate::trace_time!("Lattice lines", 20_000, {
            self.run_lines(&series, request, omega.hz, &triads, hints.as_ref())
        });

        let lines: Vec<ProjectionLine> = triads
            .iter()
            .zip(paths)
            .filter_map(|(&triad, path)| {
                let path = path?;
                let usable = !path.points.is_empty() && path.points.iter().all(|v| v.is_finite());
                usable.then(|| ProjectionLine {
                    triad,
                    confidence: EnsembleCombiner::line_confidence(&path.points, series.as_slice()),
                    points: path.points,
                    fallback: path.fallback,
                })
            })
            .collect();

        if lines.is_empty() {
            log::error!("No usable projection line out of {}", attempted);
            return Err(ProjectionError::NoUsableProjection { attempted });
        }

        // 5. Ensemble and validation
        let points = EnsembleCombiner::combine(&lines, steps);
        let lookback = request.validation_lookback.min(steps.value());
        let validation = StatisticalValidator::validate(series.as_slice(), &points, lookback);

        let mean_line_confidence =
            lines.iter().map(|l| l.confidence.value()).sum::<f64>() / lines.len() as f64;
        let confidence =
            Confidence::new(0.5 * mean_line_confidence + 0.5 * validation.confidence.value());

        if DF.log_engine {
            log::info!(
                "Projected {} from {} prices: omega {:.3} ({}), {}/{} lines, confidence {:.3}",
                steps,
                series.len(),
                omega.hz,
                omega.source,
                lines.len(),
                attempted,
                confidence.value()
            );
        }

        let metadata = ProjectionMetadata {
            steps: steps.value(),
            depth_prime: request.depth_prime.value(),
            base: request.base.value(),
            omega_hz: omega.hz,
            omega_source: omega.source,
            psi_variant: request.psi_variant,
            triad_count: lines.len(),
            triads_attempted: attempted,
            enriched: hints.is_some(),
        };

        Ok(ProjectionResult {
            points,
            projection_lines: lines,
            validation,
            confidence,
            metadata,
        })
    }

    /// Oscillation breakdown of the raw series, for diagnostics.
    pub fn decompose(&self, prices: &[f64]) -> Result<Decomposition, ProjectionError> {
        let series = PriceSeries::new(prices.to_vec())?;
        let decomposer = OscillationDecomposer::new(self.estimator.sampling_rate);
        Ok(decomposer.decompose(series.as_slice(), MAX_OSCILLATION_COMPONENTS)?)
    }

    /// Runs every triad in parallel, order preserved. Lines not started before the
    /// deadline come back as `None`.
    fn run_lines(
        &self,
        series: &PriceSeries,
        request: &ProjectionRequest,
        omega_hz: f64,
        triads: &[Triad],
        hints: Option<&EnrichmentHints>,
    ) -> Vec<Option<LatticePath>> {
        let deadline = AppInstant::now() + request.budget.max_duration();

        let paths: Vec<Option<LatticePath>> = triads
            .par_iter()
            .map(|&triad| {
                if AppInstant::now() >= deadline {
                    return None;
                }
                let params = ProjectionParameters::new(
                    request.steps,
                    request.depth_prime,
                    request.base,
                    triad,
                    omega_hz,
                )
                .with_psi_variant(request.psi_variant);
                Some(LatticeProjector::project_path(series, &params, hints))
            })
            .collect();

        let skipped = paths.iter().filter(|p| p.is_none()).count();
        if skipped > 0 {
            log::warn!(
                "Time budget of {}ms hit: skipped {} of {} lines",
                request.budget.max_duration_ms,
                skipped,
                triads.len()
            );
        }
        paths
    }

    fn resolve_hints(&self, series: &PriceSeries, request: &ProjectionRequest) -> Option<EnrichmentHints> {
        let hints = match &request.hints {
            Some(h) => Some(h.clone()),
            None => match self.enrichment.hints(series) {
                Ok(h) => h,
                Err(e) => {
                    log::warn!("Enrichment unavailable, projecting without hints: {:#}", e);
                    None
                }
            },
        };
        hints.filter(|h| !h.is_empty())
    }
}
