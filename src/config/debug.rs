//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Transform sizes and spectrum peaks.
    pub log_spectral: bool,

    /// Which path (spectral, volatility, base) produced omega.
    pub log_frequency: bool,

    /// Per-step lattice state. Very noisy at 200 steps.
    pub log_lattice: bool,

    pub log_ensemble: bool,
    pub log_validation: bool,

    /// Orchestrator summary lines (triads generated, lines kept, budget hits).
    pub log_engine: bool,

    pub log_worker: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_engine: true,

    log_spectral: false,
    log_frequency: false,
    log_lattice: false,
    log_ensemble: false,
    log_validation: false,
    log_worker: false,
    log_performance: false,
};
