use crate::config::constants::triads::{DEFAULT_TRIADS, PRIMES};
use crate::config::{DepthPrime, ProjectionCount};
use crate::domain::Triad;

pub struct TriadGenerator;

impl TriadGenerator {
    /// Windows of three consecutive primes centred on `depth_prime`'s table slot.
    ///
    /// Offsets run from `-count/2` to `+count/2`; window starts are clamped to the
    /// table so edge windows repeat (duplicates are kept). The candidate list is
    /// cut to `count`. A depth that is not in the prime table gets the fixed
    /// default set instead.
    pub fn generate(depth_prime: DepthPrime, count: ProjectionCount) -> Vec<Triad> {
        Self::generate_raw(depth_prime.value(), count.value())
    }

    pub(crate) fn generate_raw(depth_prime: u32, count: usize) -> Vec<Triad> {
        let Some(idx) = PRIMES.iter().position(|&p| p == depth_prime) else {
            return DEFAULT_TRIADS
                .iter()
                .take(count)
                .map(|&t| Triad::from(t))
                .collect();
        };

        let half = (count / 2) as isize;
        let max_start = (PRIMES.len() - 3) as isize;

        (-half..=half)
            .map(|offset| {
                let start = (idx as isize + offset).clamp(0, max_start) as usize;
                Triad::new(PRIMES[start], PRIMES[start + 1], PRIMES[start + 2])
            })
            .take(count)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_centres_on_depth_prime() {
        // 31 sits at table index 10.
        let triads = TriadGenerator::generate(DepthPrime::new(31), ProjectionCount::new(3));
        assert_eq!(
            triads,
            vec![Triad::new(29, 31, 37), Triad::new(31, 37, 41), Triad::new(37, 41, 43)]
        );
    }

    #[test]
    fn even_count_drops_last_offset() {
        let triads = TriadGenerator::generate(DepthPrime::new(31), ProjectionCount::new(4));
        assert_eq!(triads.len(), 4);
        assert_eq!(triads[0], Triad::new(23, 29, 31));
        assert_eq!(triads[3], Triad::new(37, 41, 43));
    }

    #[test]
    fn single_triad_starts_at_depth_prime() {
        let triads = TriadGenerator::generate(DepthPrime::new(47), ProjectionCount::new(1));
        assert_eq!(triads, vec![Triad::new(47, 53, 59)]);
    }

    #[test]
    fn low_edge_clamps_and_duplicates() {
        // 11 sits at table index 4; offsets down to -25 clamp at 0.
        let triads = TriadGenerator::generate(DepthPrime::new(11), ProjectionCount::new(50));
        assert_eq!(triads.len(), 50);
        assert_eq!(triads[0], Triad::new(2, 3, 5));
        assert_eq!(triads[1], Triad::new(2, 3, 5));
        let first_non_clamped = triads.iter().position(|t| *t != Triad::new(2, 3, 5)).unwrap();
        assert_eq!(triads[first_non_clamped], Triad::new(3, 5, 7));
    }

    #[test]
    fn high_edge_never_reads_past_table() {
        let triads = TriadGenerator::generate_raw(PRIMES[149], 11);
        assert_eq!(triads.len(), 11);
        let last = Triad::new(PRIMES[147], PRIMES[148], PRIMES[149]);
        assert!(triads[5..].iter().all(|t| *t == last));
    }

    #[test]
    fn non_prime_depth_uses_defaults() {
        let triads = TriadGenerator::generate(DepthPrime::new(12), ProjectionCount::new(5));
        assert_eq!(triads.len(), 5);
        assert_eq!(triads[0], Triad::new(2, 3, 5));
        assert_eq!(triads[4], Triad::new(11, 13, 17));

        let capped = TriadGenerator::generate(DepthPrime::new(100), ProjectionCount::new(40));
        assert_eq!(capped.len(), DEFAULT_TRIADS.len());
    }
}
