//! Growth-lattice extrapolation.
//!
//! One run walks `steps` future points from the last historical price. Each step
//! advances a growth factor, sums a 12-sector trigonometric lattice and adds the
//! scaled sum to the running price, truncated to 4 decimals and floored at 0.01.

use std::f64::consts::{LN_2, PI, TAU};

use crate::config::constants::lattice::{
    GROWTH_NORM, PHI_D, PRICE_DECIMALS, PRICE_FLOOR, PRIME_STOP_FLOOR, PRIME_STOPS,
};
use crate::config::constants::{BASE_FREQUENCY_HZ, GOLDEN_RATIO, SECTORS};
use crate::config::{DF, DepthPrime, LatticeBase, PsiVariant, Steps};
use crate::domain::{LambdaSymbol, PriceSeries, Triad};
use crate::models::EnrichmentHints;
use crate::utils::maths_utils::truncate_decimals;

const SECTOR_WIDTH: f64 = TAU / SECTORS as f64;

/// Everything one lattice run needs besides the prices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParameters {
    pub steps: Steps,
    pub depth_prime: DepthPrime,
    pub base: LatticeBase,
    pub triad: Triad,
    pub omega_hz: f64,
    pub psi_variant: PsiVariant,
}

impl ProjectionParameters {
    pub fn new(steps: Steps, depth_prime: DepthPrime, base: LatticeBase, triad: Triad, omega_hz: f64) -> Self {
        Self {
            steps,
            depth_prime,
            base,
            triad,
            omega_hz,
            psi_variant: PsiVariant::default(),
        }
    }

    pub fn with_psi_variant(mut self, psi_variant: PsiVariant) -> Self {
        self.psi_variant = psi_variant;
        self
    }
}

/// A projected path and whether the linear fallback produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticePath {
    pub points: Vec<f64>,
    pub fallback: bool,
}

/// Largest prime stop strictly below `p`, else 2.
pub fn plimpton_partner(p: u32) -> u32 {
    PRIME_STOPS
        .iter()
        .rev()
        .find(|&&stop| stop < p)
        .copied()
        .unwrap_or(PRIME_STOP_FLOOR)
}

/// Ratio scaling the lattice sum.
pub fn psi(depth_prime: DepthPrime, variant: PsiVariant) -> f64 {
    let p = depth_prime.as_f64();
    let q = plimpton_partner(depth_prime.value()) as f64;
    let (p2, q2) = (p * p, q * q);
    match variant {
        PsiVariant::Plimpton => (p2 - q2) / (p2 + q2),
        PsiVariant::Normalized => ((p2 - q2) / p2).sqrt(),
    }
}

/// `p² − q²`, the constant theta term.
fn plimpton_gap(depth_prime: DepthPrime) -> f64 {
    let p = depth_prime.as_f64();
    let q = plimpton_partner(depth_prime.value()) as f64;
    p * p - q * q
}

pub struct LatticeProjector;

impl LatticeProjector {
    /// Projects `steps` positive prices. Never returns NaN; degenerate runs
    /// fall back to the last two prices' linear trend.
    pub fn project(prices: &PriceSeries, params: &ProjectionParameters, hints: Option<&EnrichmentHints>) -> Vec<f64> {
        Self::project_path(prices, params, hints).points
    }

    pub fn project_path(
        prices: &PriceSeries,
        params: &ProjectionParameters,
        hints: Option<&EnrichmentHints>,
    ) -> LatticePath {
        match Self::walk(prices.last(), params, hints) {
            Some(points) => LatticePath {
                points,
                fallback: false,
            },
            None => {
                log::warn!(
                    "Lattice degenerate for triad {} ({}, {}, omega {}); using linear trend",
                    params.triad,
                    params.depth_prime,
                    params.base,
                    params.omega_hz
                );
                LatticePath {
                    points: Self::linear_fallback(prices, params.steps),
                    fallback: true,
                }
            }
        }
    }

    /// `last + trend·(i+1)` with the same truncation and floor as the lattice.
    pub fn linear_fallback(prices: &PriceSeries, steps: Steps) -> Vec<f64> {
        let last = prices.last();
        let trend = prices.last_trend();
        (0..steps.value())
            .map(|i| truncate_decimals(last + trend * (i + 1) as f64, PRICE_DECIMALS).max(PRICE_FLOOR))
            .collect()
    }

    /// None as soon as any intermediate goes non-finite.
    fn walk(last_price: f64, params: &ProjectionParameters, hints: Option<&EnrichmentHints>) -> Option<Vec<f64>> {
        let steps = params.steps.value();
        let base = params.base.value();
        let depth = params.depth_prime;
        let omega = params.omega_hz;

        let tau = params.triad.tau(base);
        let psi = psi(depth, params.psi_variant);
        let gap = plimpton_gap(depth);
        let depth_scale = depth.as_f64().ln() / LN_2;
        let tri_scale = tau.max(1.0);
        let omega_phase = ((omega / BASE_FREQUENCY_HZ).ln() / LN_2) * PI / 2.0;
        let growth_per_step = 1.0 + tau / 1000.0;

        let growth_factor = hints.map_or(1.0, EnrichmentHints::growth_factor);
        let theta_factor = hints.map_or(1.0, EnrichmentHints::theta_factor);

        let mut growth =
            (1.0 + 0.01 * tau + 0.001 * (depth.value() % 7) as f64) * growth_factor;
        let mut current = last_price;
        let mut points = Vec::with_capacity(steps);

        if ![tau, psi, depth_scale, omega_phase, growth].iter().all(|v| v.is_finite()) {
            return None;
        }

        for i in 0..steps {
            // 1. Lambda
            let nu = LambdaSymbol::at_step(i).nu();

            // 2. Theta
            let k = (i / SECTORS) as f64;
            let i_local = (i % SECTORS) as f64;
            let theta = (k * PI * GOLDEN_RATIO
                + i_local * SECTOR_WIDTH
                + (nu as f64).ln() / 3f64.ln()
                + omega / BASE_FREQUENCY_HZ
                + gap)
                * theta_factor;

            // 3. Growth. Overflow is a degenerate run like any other.
            growth *= base.powf(theta / 100.0) * growth_per_step;
            if !growth.is_finite() {
                return None;
            }

            // 4. Lattice sum
            let lambda_nudge = (nu % 3) as f64 * PI / 360.0;
            let amplitude = psi * (1.0 + 0.5 * (growth / GROWTH_NORM).tanh());
            let lattice_sum: f64 = (0..SECTORS)
                .map(|s| {
                    let phi_term = (PHI_D[s] % 360) as f64 * PI / 180.0;
                    let offset = hints.map_or(0.0, |h| h.sector_offset(s));
                    let angle = i as f64 * SECTOR_WIDTH
                        + s as f64 * SECTOR_WIDTH
                        + phi_term
                        + lambda_nudge
                        + 0.5 * omega_phase
                        + offset;
                    let pol_quad = if (s / 3) % 2 == 0 { 1.0 } else { -1.0 };
                    let pol_mob = if (i + s) % 2 == 0 { 1.0 } else { -1.0 };
                    angle.cos() * pol_quad * pol_mob * amplitude
                })
                .sum();

            // 5. Price
            let delta = lattice_sum * depth_scale * 0.5 * tri_scale;
            let next = truncate_decimals(current + delta, PRICE_DECIMALS);
            if !next.is_finite() {
                return None;
            }
            current = next.max(PRICE_FLOOR);

            if DF.log_lattice {
                log::debug!(
                    "lattice {} step {}: theta={:.4} growth={:.4e} sum={:.6} price={:.4}",
                    params.triad,
                    i,
                    theta,
                    growth,
                    lattice_sum,
                    current
                );
            }
            points.push(current);
        }

        Some(points)
    }
}
