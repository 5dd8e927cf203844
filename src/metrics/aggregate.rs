use std::collections::BTreeMap;
use std::time::Duration;

use crate::http::RequestOutcome;

use super::{EndpointStats, RunSummary};

/// Folds the collected outcomes of one endpoint into its statistics.
#[must_use]
pub fn aggregate_endpoint(
    name: &str,
    outcomes: &[RequestOutcome],
    elapsed: Duration,
) -> EndpointStats {
    let total_requests = outcomes.len() as u64;
    let successful_requests = outcomes.iter().filter(|outcome| outcome.success).count() as u64;
    let failed_requests = total_requests.saturating_sub(successful_requests);

    let mut latency_samples: u64 = 0;
    let mut latency_sum_ms: f64 = 0.0;
    let mut min_latency_ms = f64::INFINITY;
    let mut max_latency_ms: f64 = 0.0;
    for outcome in outcomes {
        let latency_ms = duration_ms(outcome.latency);
        if latency_ms > 0.0 {
            latency_samples = latency_samples.saturating_add(1);
            latency_sum_ms += latency_ms;
            min_latency_ms = min_latency_ms.min(latency_ms);
            max_latency_ms = max_latency_ms.max(latency_ms);
        }
    }
    if latency_samples == 0 {
        min_latency_ms = 0.0;
    }
    let avg_latency_ms = if latency_samples == 0 {
        0.0
    } else {
        latency_sum_ms / latency_samples as f64
    };

    let request_bytes = outcomes
        .iter()
        .fold(0u64, |sum, outcome| sum.saturating_add(outcome.request_bytes));
    let response_bytes = outcomes
        .iter()
        .fold(0u64, |sum, outcome| sum.saturating_add(outcome.response_bytes));
    let avg_response_bytes = if total_requests == 0 {
        0.0
    } else {
        response_bytes as f64 / total_requests as f64
    };

    let mut errors: BTreeMap<String, u64> = BTreeMap::new();
    for outcome in outcomes {
        if let Some(message) = outcome.error.as_ref() {
            let count = errors.entry(message.clone()).or_insert(0);
            *count = count.saturating_add(1);
        }
    }

    let success_rate = if total_requests == 0 {
        0.0
    } else {
        successful_requests as f64 / total_requests as f64
    };

    EndpointStats {
        name: name.to_owned(),
        total_requests,
        successful_requests,
        failed_requests,
        success_rate,
        latency_samples,
        min_latency_ms,
        avg_latency_ms,
        max_latency_ms,
        requests_per_second: throughput(total_requests, elapsed),
        elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        request_bytes,
        response_bytes,
        avg_response_bytes,
        errors,
    }
}

/// Folds per-endpoint statistics into the run summary.
#[must_use]
pub fn summarize_run(
    endpoints: &[EndpointStats],
    total_elapsed: Duration,
    started_at: String,
) -> RunSummary {
    let total_requests = endpoints
        .iter()
        .fold(0u64, |sum, stats| sum.saturating_add(stats.total_requests));
    let successful_requests = endpoints.iter().fold(0u64, |sum, stats| {
        sum.saturating_add(stats.successful_requests)
    });
    let failed_requests = endpoints
        .iter()
        .fold(0u64, |sum, stats| sum.saturating_add(stats.failed_requests));

    let weighted_samples = endpoints
        .iter()
        .fold(0u64, |sum, stats| sum.saturating_add(stats.latency_samples));
    let avg_latency_ms = if weighted_samples == 0 {
        0.0
    } else {
        let weighted_sum: f64 = endpoints
            .iter()
            .map(|stats| stats.avg_latency_ms * stats.latency_samples as f64)
            .sum();
        weighted_sum / weighted_samples as f64
    };

    RunSummary {
        started_at,
        total_duration_ms: u64::try_from(total_elapsed.as_millis()).unwrap_or(u64::MAX),
        total_requests,
        successful_requests,
        failed_requests,
        overall_requests_per_second: throughput(total_requests, total_elapsed),
        avg_latency_ms,
    }
}

fn throughput(total_requests: u64, elapsed: Duration) -> f64 {
    if total_requests == 0 {
        return 0.0;
    }
    let seconds = elapsed.as_secs_f64();
    if seconds <= 0.0 {
        return 0.0;
    }
    total_requests as f64 / seconds
}

fn duration_ms(latency: Duration) -> f64 {
    latency.as_secs_f64() * 1000.0
}
