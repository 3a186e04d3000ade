use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Which path produced omega.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FrequencySource {
    /// Too little data or no oscillation above the energy floor.
    #[strum(to_string = "Base")]
    Base,
    #[strum(to_string = "Spectral")]
    Spectral,
    /// Spectral path failed and the volatility heuristic stood in.
    #[strum(to_string = "Volatility")]
    Volatility,
    #[strum(to_string = "Override")]
    Override,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEstimate {
    pub hz: f64,
    pub source: FrequencySource,
}

impl FrequencyEstimate {
    pub(crate) fn new(hz: f64, source: FrequencySource) -> Self {
        Self { hz, source }
    }
}
