use tracing::info;

use crate::http::RequestOutcome;
use crate::metrics::{EndpointStats, RunSummary};

/// Progress events emitted by the engine.
///
/// The engine only emits; rendering is entirely up to the subscriber. The
/// orchestrator and scheduler receive the observer explicitly, so there is
/// no ambient progress state.
pub trait RunObserver: Send + Sync {
    fn endpoint_started(&self, _name: &str, _index: usize, _total: usize) {}

    fn request_completed(&self, _name: &str, _outcome: &RequestOutcome) {}

    fn endpoint_completed(&self, _stats: &EndpointStats) {}

    fn run_completed(&self, _summary: &RunSummary) {}
}

/// Subscriber that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Subscriber that renders progress through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RunObserver for LogObserver {
    fn endpoint_started(&self, name: &str, index: usize, total: usize) {
        info!(
            "[{}/{}] Benchmarking endpoint '{}'...",
            index.saturating_add(1),
            total,
            name
        );
    }

    fn endpoint_completed(&self, stats: &EndpointStats) {
        info!(
            "Endpoint '{}' done: {} requests, {:.1}% success, avg {:.1} ms, {:.1} req/s.",
            stats.name,
            stats.total_requests,
            stats.success_rate * 100.0,
            stats.avg_latency_ms,
            stats.requests_per_second
        );
    }

    fn run_completed(&self, summary: &RunSummary) {
        info!(
            "Run finished: {} requests in {} ms ({:.1} req/s overall).",
            summary.total_requests, summary.total_duration_ms, summary.overall_requests_per_second
        );
    }
}
