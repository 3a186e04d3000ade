mod enrichment;
mod frequency;
mod oscillation;
mod projection;

pub use enrichment::EnrichmentHints;
pub use frequency::{FrequencyEstimate, FrequencySource};
pub use oscillation::{Decomposition, OscillationComponent};
pub use projection::{ProjectionLine, ProjectionMetadata, ProjectionResult, ValidationMetrics};
