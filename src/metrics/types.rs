use std::collections::BTreeMap;

use serde::Serialize;

/// Aggregated statistics for one endpoint run.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointStats {
    pub name: String,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    /// Always within `[0, 1]`.
    pub success_rate: f64,
    /// Number of outcomes with a positive latency; the latency stats below
    /// are computed over these only, so synthetic zero-latency failures do
    /// not skew them.
    pub latency_samples: u64,
    pub min_latency_ms: f64,
    pub avg_latency_ms: f64,
    pub max_latency_ms: f64,
    pub requests_per_second: f64,
    pub elapsed_ms: u64,
    pub request_bytes: u64,
    pub response_bytes: u64,
    pub avg_response_bytes: f64,
    /// Distinct error messages with occurrence counts.
    pub errors: BTreeMap<String, u64>,
}

/// Run-level totals folded over every endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: String,
    pub total_duration_ms: u64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub overall_requests_per_second: f64,
    /// Latency average weighted by each endpoint's sample count.
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub summary: RunSummary,
    pub endpoints: Vec<EndpointStats>,
}
