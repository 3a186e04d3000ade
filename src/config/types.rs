//! Clamped parameter newtypes (Immutable Blueprints)
//!
//! Out-of-range values are never rejected. Every constructor (and every
//! serde round-trip) clamps into the permitted interval.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::constants::bounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct Steps(usize);

impl Steps {
    pub const fn new(val: usize) -> Self {
        let v = if val < bounds::STEPS_MIN {
            bounds::STEPS_MIN
        } else if val > bounds::STEPS_MAX {
            bounds::STEPS_MAX
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for Steps {
    fn from(val: usize) -> Self {
        Self::new(val)
    }
}

impl From<Steps> for usize {
    fn from(steps: Steps) -> Self {
        steps.0
    }
}

impl std::fmt::Display for Steps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} steps", self.0)
    }
}

/// The prime that selects psi and anchors triad generation.
/// Clamped but not required to be prime; non-primes fall back to the default triads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct DepthPrime(u32);

impl DepthPrime {
    pub const fn new(val: u32) -> Self {
        let v = if val < bounds::DEPTH_PRIME_MIN {
            bounds::DEPTH_PRIME_MIN
        } else if val > bounds::DEPTH_PRIME_MAX {
            bounds::DEPTH_PRIME_MAX
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl From<u32> for DepthPrime {
    fn from(val: u32) -> Self {
        Self::new(val)
    }
}

impl From<DepthPrime> for u32 {
    fn from(p: DepthPrime) -> Self {
        p.0
    }
}

impl std::fmt::Display for DepthPrime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p={}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct LatticeBase(f64);

impl LatticeBase {
    pub const fn new(val: f64) -> Self {
        let v = if val.is_nan() || val < bounds::BASE_MIN {
            bounds::BASE_MIN
        } else if val > bounds::BASE_MAX {
            bounds::BASE_MAX
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for LatticeBase {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<LatticeBase> for f64 {
    fn from(b: LatticeBase) -> Self {
        b.0
    }
}

impl std::fmt::Display for LatticeBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "base {:.2}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "usize", into = "usize")]
pub struct ProjectionCount(usize);

impl ProjectionCount {
    pub const fn new(val: usize) -> Self {
        let v = if val < bounds::PROJECTION_COUNT_MIN {
            bounds::PROJECTION_COUNT_MIN
        } else if val > bounds::PROJECTION_COUNT_MAX {
            bounds::PROJECTION_COUNT_MAX
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> usize {
        self.0
    }
}

impl From<usize> for ProjectionCount {
    fn from(val: usize) -> Self {
        Self::new(val)
    }
}

impl From<ProjectionCount> for usize {
    fn from(c: ProjectionCount) -> Self {
        c.0
    }
}

/// Adaptive frequency driving the lattice phase terms.
/// Only explicit overrides are clamped to the [200, 1000] band. Estimates travel as plain `f64`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct OmegaHz(f64);

impl OmegaHz {
    pub const fn new(val: f64) -> Self {
        let v = if val.is_nan() || val < bounds::OMEGA_MIN_HZ {
            bounds::OMEGA_MIN_HZ
        } else if val > bounds::OMEGA_MAX_HZ {
            bounds::OMEGA_MAX_HZ
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for OmegaHz {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<OmegaHz> for f64 {
    fn from(w: OmegaHz) -> Self {
        w.0
    }
}

impl std::fmt::Display for OmegaHz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3} Hz", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    pub const NEUTRAL: Self = Self(0.5);

    // A confidence clamped between 0 and 1
    pub const fn new(val: f64) -> Self {
        let v = if val.is_nan() || val < 0.0 {
            0.0
        } else if val > 1.0 {
            1.0
        } else {
            val
        };
        Self(v)
    }

    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Confidence {
    fn from(val: f64) -> Self {
        Self::new(val)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.)
    }
}

/// Which psi formula the lattice uses.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, Display, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum PsiVariant {
    /// (p² − q²) / (p² + q²)
    #[default]
    #[strum(serialize = "plimpton")]
    Plimpton,
    /// sqrt((p² − q²) / p²)
    #[strum(serialize = "normalized")]
    Normalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_clamp_silently() {
        assert_eq!(Steps::new(0).value(), 1);
        assert_eq!(Steps::new(500).value(), 200);
        assert_eq!(DepthPrime::new(2).value(), 11);
        assert_eq!(DepthPrime::new(997).value(), 101);
        assert_eq!(LatticeBase::new(1.0).value(), 2.0);
        assert_eq!(LatticeBase::new(f64::NAN).value(), 2.0);
        assert_eq!(ProjectionCount::new(99).value(), 50);
        assert_eq!(OmegaHz::new(5000.0).value(), 1000.0);
        assert_eq!(Confidence::new(-0.2).value(), 0.0);
    }

    #[test]
    fn deserialization_clamps() {
        let steps: Steps = serde_json::from_str("9999").unwrap();
        assert_eq!(steps.value(), 200);
        let base: LatticeBase = serde_json::from_str("0.5").unwrap();
        assert_eq!(base.value(), 2.0);
        assert_eq!(serde_json::to_string(&DepthPrime::new(31)).unwrap(), "31");
    }

    #[test]
    fn psi_variant_parses() {
        use std::str::FromStr;
        use strum::IntoEnumIterator;
        assert_eq!(PsiVariant::from_str("Normalized").unwrap(), PsiVariant::Normalized);
        assert_eq!(PsiVariant::iter().count(), 2);
        assert_eq!(PsiVariant::Plimpton.to_string(), "plimpton");
        assert!(PsiVariant::from_str("cubic").is_err());
    }
}
