use thiserror::Error;

/// Failures of the spectral transform. Callers treat these as numeric degeneracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpectralError {
    #[error("transform buffer is empty")]
    Empty,
    #[error("transform length {0} is not a power of two")]
    NonPowerOfTwo(usize),
    #[error("transform length {size} exceeds the {max} sample limit")]
    TooLarge { size: usize, max: usize },
    #[error("buffer holds {len} samples but a {n}-point transform was requested")]
    BufferTooShort { len: usize, n: usize },
    #[error("signal contains non-finite samples")]
    NonFinite,
}

/// Errors surfaced to callers of the projection engine.
/// Out-of-range parameters never land here, they are clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("price series is empty")]
    EmptySeries,
    #[error("price at index {index} is not finite ({value})")]
    NonFinitePrice { index: usize, value: f64 },
    #[error("last price must be positive, got {0}")]
    NonPositiveLastPrice(f64),
    #[error("none of the {attempted} projection lines produced a usable path")]
    NoUsableProjection { attempted: usize },
    #[error(transparent)]
    Spectral(#[from] SpectralError),
}
