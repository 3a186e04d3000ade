use serde::{Deserialize, Serialize};

/// Ordered triple of (conventionally prime) integers seeding one projection line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct Triad(pub [u32; 3]);

impl Triad {
    pub const fn new(a: u32, b: u32, c: u32) -> Self {
        Self([a, b, c])
    }

    /// Product of the three members, widened so 3 x u32 cannot overflow.
    pub fn product(&self) -> u128 {
        self.0.iter().map(|&v| v as u128).product()
    }

    /// `log_base(product)`. The lattice calls this tau.
    pub fn tau(&self, base: f64) -> f64 {
        (self.product() as f64).ln() / base.ln()
    }
}

impl From<[u32; 3]> for Triad {
    fn from(values: [u32; 3]) -> Self {
        Self(values)
    }
}

impl std::fmt::Display for Triad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.0[0], self.0[1], self.0[2])
    }
}
