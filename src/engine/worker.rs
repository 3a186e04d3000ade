use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use super::core::ProjectionEngine;
use super::messages::{JobRequest, JobResult};

use crate::config::DF;
use crate::utils::AppInstant;

/// Spawns a background thread that serves jobs until the request channel closes.
pub fn spawn_worker_thread(
    engine: ProjectionEngine,
    rx: Receiver<JobRequest>,
    tx: Sender<JobResult>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(req) = rx.recv() {
            if !process_request_sync(&engine, req, &tx) {
                break;
            }
        }
        if DF.log_worker {
            log::info!("Worker: channel closed, exiting");
        }
    })
}

/// Runs one job and sends the outcome. Returns false once nobody is listening.
pub fn process_request_sync(engine: &ProjectionEngine, req: JobRequest, tx: &Sender<JobResult>) -> bool {
    let label = format!("Total JOB [{} x {}]", req.symbol, req.request.steps);

    crate::trace_time!(&label, 50_000, {
        let start = AppInstant::now();
        let result = engine.project(&req.prices, &req.request).map(Arc::new);
        let duration_ms = start.elapsed().as_millis();

        if DF.log_worker {
            match &result {
                Ok(r) => log::info!(
                    "Worker: {} done in {}ms ({} lines)",
                    req.symbol,
                    duration_ms,
                    r.metadata.triad_count
                ),
                Err(e) => log::warn!("Worker: {} failed in {}ms: {}", req.symbol, duration_ms, e),
            }
        }

        tx.send(JobResult {
            symbol: req.symbol,
            duration_ms,
            result,
        })
        .is_ok()
    })
}
