use crate::analysis::spectral::{padded_spectrum, power_spectrum};
use crate::config::DF;
use crate::config::constants::spectral::{ENERGY_FLOOR, NOTCH_HALF_WIDTH};
use crate::error::SpectralError;
use crate::models::{Decomposition, OscillationComponent};
use crate::utils::maths_utils::{argmax_from, energy};
use crate::utils::vec_utils::subtract_prefix;

/// Greedy matching pursuit over frequency bins.
///
/// The spectrum is computed once and frozen; each extraction notches out the
/// chosen bin (±2) rather than refitting the residual.
#[derive(Debug, Clone, Copy)]
pub struct OscillationDecomposer {
    pub sampling_rate: f64,
}

impl Default for OscillationDecomposer {
    fn default() -> Self {
        Self { sampling_rate: 1.0 }
    }
}

impl OscillationDecomposer {
    pub fn new(sampling_rate: f64) -> Self {
        Self { sampling_rate }
    }

    /// Extracts up to `max_components` sinusoids, greatest power first.
    /// The DC bin is never reported.
    pub fn decompose(
        &self,
        signal: &[f64],
        max_components: usize,
    ) -> Result<Decomposition, SpectralError> {
        let len = signal.len();
        let transformed = padded_spectrum(signal)?;
        let fft_size = transformed.len();
        let mut spectrum = power_spectrum(&transformed);

        let signal_energy = energy(signal);
        let mut residual = signal.to_vec();
        let mut components = Vec::with_capacity(max_components);

        for _ in 0..max_components {
            // 1. Strongest non-DC bin
            let Some(peak) = argmax_from(&spectrum, 1) else {
                break;
            };
            let peak_power = spectrum[peak];

            // 2. Energy floor. A silent bin can never be a component.
            if peak_power <= 0.0 || peak_power * peak_power < ENERGY_FLOOR * signal_energy {
                break;
            }

            // 3. Build and subtract
            let amplitude = 2.0 * transformed[peak].magnitude() / len as f64;
            let phase = transformed[peak].phase();
            let component = OscillationComponent::from_bin(peak, fft_size, amplitude, phase, len);
            subtract_prefix(&mut residual, &component.reconstructed);

            // 4. Notch
            let lo = peak.saturating_sub(NOTCH_HALF_WIDTH);
            let hi = (peak + NOTCH_HALF_WIDTH).min(spectrum.len() - 1);
            spectrum[lo..=hi].iter_mut().for_each(|p| *p = 0.0);

            if DF.log_spectral {
                log::debug!(
                    "oscillation bin {} of {}: f={:.4} amp={:.4} phase={:.3} period={}",
                    peak,
                    fft_size,
                    component.frequency,
                    component.amplitude,
                    component.phase,
                    component.period
                );
            }
            components.push(component);
        }

        let residual_energy = energy(&residual);

        Ok(Decomposition {
            components,
            residual,
            residual_energy,
            signal_energy,
            fft_size,
            sampling_rate: self.sampling_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn cosine(n: usize, freq: f64, amp: f64, phase: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amp * (TAU * freq * i as f64 + phase).cos())
            .collect()
    }

    #[test]
    fn recovers_on_bin_cosine() {
        let signal = cosine(64, 8.0 / 64.0, 5.0, 0.3);
        let d = OscillationDecomposer::default().decompose(&signal, 5).unwrap();

        assert_eq!(d.components.len(), 1);
        let c = &d.components[0];
        assert!((c.frequency - 0.125).abs() < 1e-12);
        assert!((c.amplitude - 5.0).abs() < 1e-9);
        assert!((c.phase - 0.3).abs() < 1e-9);
        assert_eq!(c.period, 8);
        assert_eq!(c.reconstructed.len(), 64);
        assert!(d.residual_energy < 1e-12 * d.signal_energy.max(1.0));
        assert_eq!(d.fft_size, 64);
    }

    #[test]
    fn off_bin_cosine_lands_on_nearest_bin() {
        // 0.1 * 64 = 6.4 cycles, between bins 6 and 7. The peak leaks into its
        // neighbours while each pick takes one bin's amplitude and notches only
        // ±2 bins, so unlike the on-bin case the residual stays well above zero.
        let signal = cosine(64, 0.1, 5.0, 0.3);
        let d = OscillationDecomposer::default().decompose(&signal, 5).unwrap();

        let dominant = d.dominant().unwrap();
        assert!((dominant.frequency - 0.1).abs() <= 1.0 / 64.0);
        assert!(dominant.amplitude > 3.0 && dominant.amplitude <= 5.5);
        assert!(d.residual_energy > 0.1 * d.signal_energy);
        assert!(d.residual_energy < 0.5 * d.signal_energy);
    }

    #[test]
    fn two_tones_come_out_strongest_first() {
        let a = cosine(128, 4.0 / 128.0, 2.0, 0.0);
        let b = cosine(128, 20.0 / 128.0, 6.0, 1.0);
        let signal: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x + y).collect();
        let d = OscillationDecomposer::default().decompose(&signal, 5).unwrap();

        assert_eq!(d.components.len(), 2);
        assert!((d.components[0].frequency - 20.0 / 128.0).abs() < 1e-12);
        assert!((d.components[1].frequency - 4.0 / 128.0).abs() < 1e-12);

        let rebuilt = d.reconstruct();
        for (r, s) in rebuilt.iter().zip(&signal) {
            assert!((r - s).abs() < 1e-9);
        }
    }

    #[test]
    fn dc_only_signal_has_no_components() {
        let d = OscillationDecomposer::default().decompose(&[7.0; 16], 5).unwrap();
        assert!(d.components.is_empty());
        assert!((d.residual_energy - d.signal_energy).abs() < 1e-9);
    }

    #[test]
    fn zero_signal_and_tiny_inputs() {
        let d = OscillationDecomposer::default().decompose(&[0.0; 8], 5).unwrap();
        assert!(d.components.is_empty());

        // n=1 and n=2 have no non-DC bins in the lower half.
        assert!(OscillationDecomposer::default().decompose(&[3.0], 5).unwrap().components.is_empty());
        assert!(OscillationDecomposer::default().decompose(&[3.0, 1.0], 5).unwrap().components.is_empty());
    }

    #[test]
    fn padding_is_not_subtracted() {
        let signal = cosine(12, 2.0 / 16.0, 3.0, 0.0);
        let d = OscillationDecomposer::default().decompose(&signal, 3).unwrap();
        assert_eq!(d.fft_size, 16);
        assert_eq!(d.residual.len(), 12);
        assert!(d.components.iter().all(|c| c.reconstructed.len() == 12));
    }

    #[test]
    fn sampling_rate_scales_dominant_frequency() {
        let signal = cosine(32, 4.0 / 32.0, 1.0, 0.0);
        let d = OscillationDecomposer::new(10.0).decompose(&signal, 1).unwrap();
        assert!((d.dominant_frequency().unwrap() - 1.25).abs() < 1e-12);
    }
}
