mod core;
mod enrichment;
mod messages;
mod worker;

pub use self::core::{ProjectionEngine, ProjectionRequest};
pub use enrichment::{EnrichmentSource, FixedEnrichment, NoEnrichment};
pub use messages::{JobRequest, JobResult};
pub use worker::{process_request_sync, spawn_worker_thread};
