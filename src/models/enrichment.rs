use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::config::constants::SECTORS;
use crate::config::constants::enrichment::HINT_LIMIT;

/// Optional signals from auxiliary subsystems (tetration towers, platonic vertices).
///
/// Every hint is opaque. It is squashed through `tanh` and scaled so no single
/// hint moves its target by more than `HINT_LIMIT` (15%). Non-finite hints are ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentHints {
    /// Scales the initial lattice growth.
    pub tower_attractor: Option<f64>,
    /// Scales each step's theta.
    pub theta_bias: Option<f64>,
    /// Nudges sector angles by up to 15% of a sector width, cycling over the vector.
    pub vertex_geometry: Option<Vec<f64>>,
}

fn bounded(v: f64) -> Option<f64> {
    v.is_finite().then(|| HINT_LIMIT * v.tanh())
}

impl EnrichmentHints {
    pub fn is_empty(&self) -> bool {
        self.tower_attractor.is_none()
            && self.theta_bias.is_none()
            && self.vertex_geometry.as_ref().is_none_or(|v| v.is_empty())
    }

    pub fn growth_factor(&self) -> f64 {
        1.0 + self.tower_attractor.and_then(bounded).unwrap_or(0.0)
    }

    pub fn theta_factor(&self) -> f64 {
        1.0 + self.theta_bias.and_then(bounded).unwrap_or(0.0)
    }

    /// Additive angle offset in radians for sector `s`.
    pub fn sector_offset(&self, s: usize) -> f64 {
        match self.vertex_geometry.as_deref() {
            Some(v) if !v.is_empty() => {
                bounded(v[s % v.len()]).unwrap_or(0.0) * (TAU / SECTORS as f64)
            }
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hints_are_identity() {
        let h = EnrichmentHints::default();
        assert!(h.is_empty());
        assert_eq!(h.growth_factor(), 1.0);
        assert_eq!(h.theta_factor(), 1.0);
        assert_eq!(h.sector_offset(7), 0.0);
    }

    #[test]
    fn hints_stay_within_limit() {
        let h = EnrichmentHints {
            tower_attractor: Some(1e9),
            theta_bias: Some(-1e9),
            vertex_geometry: Some(vec![f64::NAN, 2.0]),
        };
        assert!(!h.is_empty());
        assert!((h.growth_factor() - 1.15).abs() < 1e-12);
        assert!((h.theta_factor() - 0.85).abs() < 1e-12);
        assert_eq!(h.sector_offset(0), 0.0);
        let width = TAU / 12.0;
        assert!(h.sector_offset(1) > 0.0 && h.sector_offset(1) <= HINT_LIMIT * width);
        assert_eq!(h.sector_offset(3), h.sector_offset(1));
    }
}
