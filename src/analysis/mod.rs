// Projection algorithms: spectrum, oscillations, lattice, ensemble, scoring
pub mod ensemble;
pub mod frequency;
pub mod lattice;
pub mod oscillation;
pub mod spectral;
pub mod triads;
pub mod validation;

pub use ensemble::EnsembleCombiner;
pub use frequency::FrequencyEstimator;
pub use lattice::{LatticePath, LatticeProjector, ProjectionParameters};
pub use oscillation::OscillationDecomposer;
pub use spectral::Complex;
pub use triads::TriadGenerator;
pub use validation::StatisticalValidator;
