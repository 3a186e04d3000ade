use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Symbols of the repeating lambda cycle. Each maps to a "nu" integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum LambdaSymbol {
    #[strum(serialize = "dub")]
    Dub,
    #[strum(serialize = "kubt")]
    Kubt,
    #[strum(serialize = "k'anch")]
    Kanch,
}

/// Fallback nu for symbols outside the cycle.
pub const DEFAULT_NU: u32 = 3;

pub const LAMBDA_CYCLE: [LambdaSymbol; 6] = [
    LambdaSymbol::Dub,
    LambdaSymbol::Kubt,
    LambdaSymbol::Kanch,
    LambdaSymbol::Dub,
    LambdaSymbol::Kubt,
    LambdaSymbol::Kanch,
];

impl LambdaSymbol {
    pub const fn nu(self) -> u32 {
        match self {
            Self::Dub => 3,
            Self::Kubt => 5,
            Self::Kanch => 7,
        }
    }

    /// Symbol for lattice step `i`.
    #[inline]
    pub fn at_step(i: usize) -> Self {
        LAMBDA_CYCLE[i % LAMBDA_CYCLE.len()]
    }
}

/// Nu for a raw symbol string. Unrecognised symbols take `DEFAULT_NU`.
pub fn nu_for_symbol(symbol: &str) -> u32 {
    symbol
        .parse::<LambdaSymbol>()
        .map(LambdaSymbol::nu)
        .unwrap_or(DEFAULT_NU)
}
