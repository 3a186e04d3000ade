use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// One sinusoid pulled out of a signal by the decomposer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OscillationComponent {
    /// Cycles per sample, in [0, 0.5).
    pub frequency: f64,
    pub amplitude: f64,
    /// Radians.
    pub phase: f64,
    /// Samples per cycle, floor(fft_size / bin).
    pub period: usize,
    /// `amplitude * cos(2π·frequency·i + phase)` over the original signal length.
    pub reconstructed: Vec<f64>,
}

impl OscillationComponent {
    pub(crate) fn from_bin(
        bin: usize,
        fft_size: usize,
        amplitude: f64,
        phase: f64,
        len: usize,
    ) -> Self {
        let frequency = bin as f64 / fft_size as f64;
        let reconstructed = (0..len)
            .map(|i| amplitude * (TAU * frequency * i as f64 + phase).cos())
            .collect();
        Self {
            frequency,
            amplitude,
            phase,
            period: fft_size / bin,
            reconstructed,
        }
    }

    /// Frequency in units of the supplied sampling rate.
    #[inline]
    pub fn frequency_at(&self, sampling_rate: f64) -> f64 {
        self.frequency * sampling_rate
    }
}

/// Output of a greedy decomposition: components strongest first plus diagnostics.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Decomposition {
    pub components: Vec<OscillationComponent>,
    /// What is left of the signal after every component was subtracted.
    pub residual: Vec<f64>,
    pub residual_energy: f64,
    pub signal_energy: f64,
    pub fft_size: usize,
    /// Samples per unit time the decomposer was configured with.
    pub sampling_rate: f64,
}

impl Decomposition {
    pub fn dominant(&self) -> Option<&OscillationComponent> {
        self.components.first()
    }

    /// Strongest component's frequency scaled to the sampling rate.
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.dominant().map(|c| c.frequency_at(self.sampling_rate))
    }

    /// Sum of every component wave. Adding `residual` gives back the input.
    pub fn reconstruct(&self) -> Vec<f64> {
        let mut out = vec![0.0; self.residual.len()];
        for component in &self.components {
            for (acc, v) in out.iter_mut().zip(&component.reconstructed) {
                *acc += v;
            }
        }
        out
    }
}
