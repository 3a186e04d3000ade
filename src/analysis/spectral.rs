//! Recursive radix-2 Cooley–Tukey transform and its power spectrum.
//!
//! The transform allocates a fresh even/odd pair per recursion level, which is
//! fine for the tens-to-hundreds of samples a price series produces. Sizes are
//! capped at `MAX_FFT_SIZE` so malformed input cannot recurse without bound.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::config::constants::spectral::MAX_FFT_SIZE;
use crate::error::SpectralError;

/// Minimal complex number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    #[inline]
    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    /// `exp(i·theta)`
    #[inline]
    pub fn from_polar_unit(theta: f64) -> Self {
        Self::new(theta.cos(), theta.sin())
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Argument in radians, (-π, π].
    #[inline]
    pub fn phase(self) -> f64 {
        self.im.atan2(self.re)
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    pub fn scale(self, rhs: f64) -> Self {
        Self::new(self.re * rhs, self.im * rhs)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl std::ops::Add for Complex {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl std::ops::Sub for Complex {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl std::ops::Mul for Complex {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

fn check_size(len: usize, n: usize) -> Result<(), SpectralError> {
    if n > MAX_FFT_SIZE {
        return Err(SpectralError::TooLarge {
            size: n,
            max: MAX_FFT_SIZE,
        });
    }
    if n > 1 && !n.is_power_of_two() {
        return Err(SpectralError::NonPowerOfTwo(n));
    }
    if n > len {
        return Err(SpectralError::BufferTooShort { len, n });
    }
    Ok(())
}

/// Forward DFT of `samples[..n]` in place. `n` must be a power of two (or ≤ 1, a no-op).
pub fn transform(samples: &mut [Complex], n: usize) -> Result<(), SpectralError> {
    check_size(samples.len(), n)?;
    recurse(&mut samples[..n]);
    Ok(())
}

fn recurse(buf: &mut [Complex]) {
    let n = buf.len();
    if n <= 1 {
        return;
    }
    let half = n / 2;

    let mut even: Vec<Complex> = buf.iter().step_by(2).copied().collect();
    let mut odd: Vec<Complex> = buf.iter().skip(1).step_by(2).copied().collect();
    // Only reachable for odd n, which check_size already refuses.
    odd.resize(even.len(), Complex::ZERO);

    recurse(&mut even);
    recurse(&mut odd);

    for k in 0..half {
        let twiddle = Complex::from_polar_unit(-TAU * k as f64 / n as f64);
        let t = twiddle * odd[k];
        buf[k] = even[k] + t;
        buf[k + half] = even[k] - t;
    }
}

/// Inverse DFT in place: conjugate, forward transform, conjugate, scale by 1/n.
pub fn inverse_transform(samples: &mut [Complex], n: usize) -> Result<(), SpectralError> {
    check_size(samples.len(), n)?;
    if n == 0 {
        return Ok(());
    }
    for s in samples[..n].iter_mut() {
        *s = s.conj();
    }
    recurse(&mut samples[..n]);
    let scale = 1.0 / n as f64;
    for s in samples[..n].iter_mut() {
        *s = s.conj().scale(scale);
    }
    Ok(())
}

/// Magnitudes of the first n/2 bins. The mirrored upper half is discarded.
pub fn power_spectrum(transformed: &[Complex]) -> Vec<f64> {
    let half = transformed.len() / 2;
    transformed[..half].iter().map(|c| c.magnitude()).collect()
}

/// Copies a real signal into a zero-padded complex buffer of the next power of two
/// and transforms it.
pub fn padded_spectrum(signal: &[f64]) -> Result<Vec<Complex>, SpectralError> {
    if signal.is_empty() {
        return Err(SpectralError::Empty);
    }
    if signal.iter().any(|v| !v.is_finite()) {
        return Err(SpectralError::NonFinite);
    }
    let fft_size = signal.len().next_power_of_two();
    let mut buf: Vec<Complex> = signal.iter().map(|&v| Complex::real(v)).collect();
    buf.resize(fft_size, Complex::ZERO);
    transform(&mut buf, fft_size)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_dft(x: &[Complex]) -> Vec<Complex> {
        let n = x.len();
        (0..n)
            .map(|k| {
                x.iter().enumerate().fold(Complex::ZERO, |acc, (j, &v)| {
                    acc + v * Complex::from_polar_unit(-TAU * (k * j) as f64 / n as f64)
                })
            })
            .collect()
    }

    fn sample_signal(n: usize) -> Vec<Complex> {
        (0..n)
            .map(|i| Complex::new((i as f64 * 0.7).sin() * 3.0 + i as f64, (i as f64 * 0.3).cos()))
            .collect()
    }

    #[test]
    fn complex_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);
        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert!((Complex::new(3.0, 4.0).magnitude() - 5.0).abs() < 1e-12);
        assert!((Complex::new(0.0, 1.0).phase() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn matches_naive_dft() {
        let input = sample_signal(16);
        let expected = naive_dft(&input);
        let mut buf = input.clone();
        transform(&mut buf, 16).unwrap();
        for (a, b) in buf.iter().zip(&expected) {
            assert!((*a - *b).magnitude() < 1e-9, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn inverse_round_trips_every_power_of_two() {
        for exp in 0..=8 {
            let n = 1usize << exp;
            let original = sample_signal(n);
            let mut buf = original.clone();
            transform(&mut buf, n).unwrap();
            inverse_transform(&mut buf, n).unwrap();
            for (a, b) in buf.iter().zip(&original) {
                assert!((*a - *b).magnitude() < 1e-9, "n={} {:?} vs {:?}", n, a, b);
            }
        }
    }

    #[test]
    fn only_prefix_is_transformed() {
        let mut buf = vec![Complex::real(1.0); 6];
        transform(&mut buf, 4).unwrap();
        assert!((buf[0].re - 4.0).abs() < 1e-12);
        assert!(buf[1].magnitude() < 1e-12);
        assert_eq!(buf[4], Complex::real(1.0));
    }

    #[test]
    fn rejects_bad_sizes() {
        let mut buf = vec![Complex::ZERO; 8];
        assert_eq!(transform(&mut buf, 6), Err(SpectralError::NonPowerOfTwo(6)));
        assert_eq!(
            transform(&mut buf, 16),
            Err(SpectralError::BufferTooShort { len: 8, n: 16 })
        );
        let mut big = vec![Complex::ZERO; 0];
        assert!(matches!(
            transform(&mut big, MAX_FFT_SIZE * 2),
            Err(SpectralError::TooLarge { .. })
        ));
        assert_eq!(padded_spectrum(&[]), Err(SpectralError::Empty));
        assert_eq!(padded_spectrum(&[1.0, f64::INFINITY]), Err(SpectralError::NonFinite));
    }

    #[test]
    fn spectrum_is_half_length_and_peaks_on_bin() {
        let n = 32;
        let signal: Vec<f64> = (0..n).map(|i| (TAU * 4.0 * i as f64 / n as f64).cos()).collect();
        let buf = padded_spectrum(&signal).unwrap();
        let spectrum = power_spectrum(&buf);
        assert_eq!(spectrum.len(), 16);
        assert!((spectrum[4] - 16.0).abs() < 1e-9);
        assert!(spectrum[3] < 1e-9);
    }

    #[test]
    fn padding_rounds_up() {
        let buf = padded_spectrum(&[1.0; 5]).unwrap();
        assert_eq!(buf.len(), 8);
        assert!((buf[0].re - 5.0).abs() < 1e-12);
    }
}
