use std::time::Duration;

// Top Level Constants
pub const BASE_FREQUENCY_HZ: f64 = 432.0;
pub const SECTORS: usize = 12;
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Minimum number of prices before oscillation analysis is attempted.
pub const MIN_PRICES_FOR_SPECTRAL: usize = 4;
pub const MAX_OSCILLATION_COMPONENTS: usize = 5;

pub mod spectral {
    /// Largest buffer the recursive transform accepts.
    pub const MAX_FFT_SIZE: usize = 1 << 16;
    /// Stop extracting once peak power squared falls below this share of signal energy.
    pub const ENERGY_FLOOR: f64 = 0.01;
    /// Bins zeroed either side of an extracted peak.
    pub const NOTCH_HALF_WIDTH: usize = 2;
}

pub mod bounds {
    pub const STEPS_MIN: usize = 1;
    pub const STEPS_MAX: usize = 200;
    pub const DEPTH_PRIME_MIN: u32 = 11;
    pub const DEPTH_PRIME_MAX: u32 = 101;
    pub const BASE_MIN: f64 = 2.0;
    pub const BASE_MAX: f64 = 10.0;
    pub const PROJECTION_COUNT_MIN: usize = 1;
    pub const PROJECTION_COUNT_MAX: usize = 50;
    pub const OMEGA_MIN_HZ: f64 = 200.0;
    pub const OMEGA_MAX_HZ: f64 = 1000.0;
}

pub mod defaults {
    use crate::config::{DepthPrime, LatticeBase, ProjectionCount, Steps};

    pub const STEPS: Steps = Steps::new(20);
    pub const DEPTH_PRIME: DepthPrime = DepthPrime::new(31);
    pub const BASE: LatticeBase = LatticeBase::new(3.0);
    pub const PROJECTION_COUNT: ProjectionCount = ProjectionCount::new(12);
    pub const VALIDATION_LOOKBACK: usize = 10;
}

pub mod lattice {
    /// Decimal places kept when a projected price is truncated.
    pub const PRICE_DECIMALS: i32 = 4;
    pub const PRICE_FLOOR: f64 = 0.01;
    /// Growth enters the lattice amplitude as `tanh(growth / GROWTH_NORM)`.
    pub const GROWTH_NORM: f64 = 1e5;

    /// Sector phase offsets in degrees.
    pub const PHI_D: [u32; super::SECTORS] = [3, 7, 31, 12, 19, 5, 11, 13, 17, 23, 29, 31];

    /// Plimpton stops used to pick the `q` partner of a depth prime.
    pub const PRIME_STOPS: [u32; 10] = [11, 13, 17, 29, 31, 47, 59, 61, 97, 101];
    pub const PRIME_STOP_FLOOR: u32 = 2;
}

pub mod ensemble {
    pub const WEIGHT_MIN: f64 = 0.1;
    pub const WEIGHT_MAX: f64 = 1.0;
    pub const LINE_CONFIDENCE_MIN: f64 = 0.3;
    pub const LINE_CONFIDENCE_MAX: f64 = 0.95;
    pub const RANGE_PENALTY_CAP: f64 = 0.7;
    pub const NEUTRAL_CONFIDENCE: f64 = 0.5;
}

pub mod enrichment {
    /// Largest relative perturbation any single hint may apply.
    pub const HINT_LIMIT: f64 = 0.15;
}

pub mod budget {
    use super::Duration;

    /// 200 steps x 50 lines fits exactly.
    pub const MAX_TOTAL_STEPS: usize = 10_000;
    pub const MAX_DURATION: Duration = Duration::from_secs(5);
}

pub mod triads {
    pub const PRIME_TABLE_LEN: usize = 150;
    pub const PRIMES: [u32; PRIME_TABLE_LEN] = first_primes();

    /// Fallback set used when the depth prime is not in `PRIMES`.
    pub const DEFAULT_TRIADS: [[u32; 3]; 12] = [
        [2, 3, 5],
        [3, 5, 7],
        [5, 7, 11],
        [7, 11, 13],
        [11, 13, 17],
        [13, 17, 19],
        [17, 19, 23],
        [19, 23, 29],
        [23, 29, 31],
        [29, 31, 37],
        [31, 37, 41],
        [37, 41, 43],
    ];

    const fn first_primes() -> [u32; PRIME_TABLE_LEN] {
        let mut table = [0u32; PRIME_TABLE_LEN];
        let mut found = 0;
        let mut candidate = 2u32;
        while found < PRIME_TABLE_LEN {
            let mut is_prime = true;
            let mut d = 2u32;
            while d * d <= candidate {
                if candidate % d == 0 {
                    is_prime = false;
                    break;
                }
                d += 1;
            }
            if is_prime {
                table[found] = candidate;
                found += 1;
            }
            candidate += 1;
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::triads::{DEFAULT_TRIADS, PRIMES};

    #[test]
    fn prime_table_bounds() {
        assert_eq!(PRIMES[0], 2);
        assert_eq!(PRIMES[10], 31);
        assert_eq!(PRIMES[25], 101);
        assert_eq!(PRIMES[149], 863);
        assert!(PRIMES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn default_triads_ascend() {
        for t in DEFAULT_TRIADS {
            assert!(t[0] < t[1] && t[1] < t[2]);
        }
        assert!(DEFAULT_TRIADS.windows(2).all(|w| w[0][0] < w[1][0]));
    }
}
