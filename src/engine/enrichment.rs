use anyhow::Result;

use crate::domain::PriceSeries;
use crate::models::EnrichmentHints;

/// Capability injected into the engine to supply optional hints per run.
///
/// An `Err` or `Ok(None)` both mean "no hints"; the engine logs the former and carries on.
pub trait EnrichmentSource: Send + Sync {
    fn hints(&self, prices: &PriceSeries) -> Result<Option<EnrichmentHints>>;
}

/// Default source. Never enriches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl EnrichmentSource for NoEnrichment {
    fn hints(&self, _prices: &PriceSeries) -> Result<Option<EnrichmentHints>> {
        Ok(None)
    }
}

/// Hands out the same hints for every series.
#[derive(Debug, Clone, Default)]
pub struct FixedEnrichment(pub EnrichmentHints);

impl EnrichmentSource for FixedEnrichment {
    fn hints(&self, _prices: &PriceSeries) -> Result<Option<EnrichmentHints>> {
        Ok(Some(self.0.clone()))
    }
}
