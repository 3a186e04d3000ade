//! Configuration module for the projection pipeline.

// Can all be private now because we have a public re-export.
mod debug;
mod projection;
mod types;

// Public
pub mod constants;

// Re-export commonly used items
pub use constants::BASE_FREQUENCY_HZ;
pub use debug::DF;
pub use projection::{BudgetSettings, ProjectionSettings};
pub use types::{Confidence, DepthPrime, LatticeBase, OmegaHz, ProjectionCount, PsiVariant, Steps};
