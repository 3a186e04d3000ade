use std::sync::Arc;

use crate::error::ProjectionError;
use crate::models::ProjectionResult;

use super::core::ProjectionRequest;

/// A request to project one price series
#[derive(Debug, Clone)]
pub struct JobRequest {
    /// Caller's label for the series (ticker, pair name, file name).
    pub symbol: String,
    pub prices: Arc<Vec<f64>>,
    pub request: ProjectionRequest,
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub struct JobResult {
    pub symbol: String,
    pub duration_ms: u128,
    pub result: Result<Arc<ProjectionResult>, ProjectionError>,
}
