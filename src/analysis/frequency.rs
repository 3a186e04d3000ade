use itertools::Itertools;

use crate::analysis::oscillation::OscillationDecomposer;
use crate::config::constants::bounds::{OMEGA_MAX_HZ, OMEGA_MIN_HZ};
use crate::config::constants::{BASE_FREQUENCY_HZ, MAX_OSCILLATION_COMPONENTS, MIN_PRICES_FOR_SPECTRAL};
use crate::config::DF;
use crate::models::{FrequencyEstimate, FrequencySource};
use crate::utils::maths_utils::value_range;
use crate::utils::remap;

/// Derives the adaptive omega scalar from a price series.
#[derive(Debug, Clone, Copy)]
pub struct FrequencyEstimator {
    pub base_frequency: f64,
    pub sampling_rate: f64,
}

impl Default for FrequencyEstimator {
    fn default() -> Self {
        Self {
            base_frequency: BASE_FREQUENCY_HZ,
            sampling_rate: 1.0,
        }
    }
}

impl FrequencyEstimator {
    pub fn new(base_frequency: f64) -> Self {
        Self {
            base_frequency,
            ..Self::default()
        }
    }

    /// `base × (1 + dominant / 100)`, or `base` when the data is too short or flat.
    pub fn estimate(&self, prices: &[f64]) -> f64 {
        self.estimate_detailed(prices).hz
    }

    pub fn estimate_detailed(&self, prices: &[f64]) -> FrequencyEstimate {
        let base = self.base_frequency;
        if prices.len() < MIN_PRICES_FOR_SPECTRAL {
            return FrequencyEstimate::new(base, FrequencySource::Base);
        }

        let decomposer = OscillationDecomposer::new(self.sampling_rate);
        let estimate = match decomposer.decompose(prices, MAX_OSCILLATION_COMPONENTS) {
            Ok(decomposition) => match decomposition.dominant_frequency() {
                None => return FrequencyEstimate::new(base, FrequencySource::Base),
                Some(dominant) => {
                    let adjusted = base * (1.0 + dominant / 100.0);
                    if adjusted.is_finite() && adjusted > 0.0 {
                        FrequencyEstimate::new(adjusted, FrequencySource::Spectral)
                    } else {
                        log::warn!("Spectral omega degenerate ({}), using volatility fallback", adjusted);
                        self.volatility_fallback(prices)
                    }
                }
            },
            Err(e) => {
                log::warn!("Oscillation analysis failed ({}), using volatility fallback", e);
                self.volatility_fallback(prices)
            }
        };

        if DF.log_frequency {
            log::info!("omega {:.4} Hz from {}", estimate.hz, estimate.source);
        }
        estimate
    }

    /// Average absolute step change over the full range, mapped onto [200, 1000] Hz.
    /// A flat or unusable series yields the base frequency.
    pub fn volatility_fallback(&self, prices: &[f64]) -> FrequencyEstimate {
        let finite: Vec<f64> = prices.iter().copied().filter(|p| p.is_finite()).collect();
        if finite.len() < 2 {
            return FrequencyEstimate::new(self.base_frequency, FrequencySource::Base);
        }

        let mean_step = finite
            .iter()
            .tuple_windows()
            .map(|(a, b)| (b - a).abs())
            .sum::<f64>()
            / (finite.len() - 1) as f64;
        let ratio = mean_step / value_range(&finite);

        if !ratio.is_finite() {
            return FrequencyEstimate::new(self.base_frequency, FrequencySource::Base);
        }

        let hz = remap(ratio, 0.0, 1.0, OMEGA_MIN_HZ, OMEGA_MAX_HZ).clamp(OMEGA_MIN_HZ, OMEGA_MAX_HZ);
        FrequencyEstimate::new(hz, FrequencySource::Volatility)
    }
}
