// Domain types and value objects
mod lambda;
mod price_series;
mod triad;

// Re-export commonly used types to the world
pub use lambda::{DEFAULT_NU, LAMBDA_CYCLE, LambdaSymbol, nu_for_symbol};
pub use price_series::PriceSeries;
pub use triad::Triad;
