use std::time::Duration;

use crate::http::RequestOutcome;

use super::{aggregate_endpoint, summarize_run};

fn ok_outcome(latency_ms: u64, bytes: u64) -> RequestOutcome {
    RequestOutcome {
        success: true,
        status: Some(200),
        latency: Duration::from_millis(latency_ms),
        error: None,
        request_bytes: 0,
        response_bytes: bytes,
    }
}

fn failed_outcome(message: &str) -> RequestOutcome {
    RequestOutcome {
        success: false,
        status: None,
        latency: Duration::ZERO,
        error: Some(message.to_owned()),
        request_bytes: 0,
        response_bytes: 0,
    }
}

#[test]
fn aggregates_counts_and_latency() {
    let outcomes = vec![
        ok_outcome(10, 100),
        ok_outcome(30, 300),
        failed_outcome("connection reset"),
    ];
    let stats = aggregate_endpoint("users", &outcomes, Duration::from_millis(500));

    assert_eq!(stats.total_requests, 3);
    assert_eq!(stats.successful_requests, 2);
    assert_eq!(stats.failed_requests, 1);
    assert!(stats.success_rate >= 0.0 && stats.success_rate <= 1.0);
    assert!((stats.success_rate - 2.0 / 3.0).abs() < 1e-9);

    // Zero-latency synthetic failures never skew the latency stats.
    assert_eq!(stats.latency_samples, 2);
    assert!((stats.min_latency_ms - 10.0).abs() < 1e-6);
    assert!((stats.avg_latency_ms - 20.0).abs() < 1e-6);
    assert!((stats.max_latency_ms - 30.0).abs() < 1e-6);

    assert_eq!(stats.response_bytes, 400);
    assert_eq!(stats.errors.get("connection reset"), Some(&1));
    assert!(stats.requests_per_second > 0.0);
}

#[test]
fn aggregates_empty_outcomes() {
    let stats = aggregate_endpoint("idle", &[], Duration::from_millis(100));
    assert_eq!(stats.total_requests, 0);
    assert!((stats.success_rate - 0.0).abs() < f64::EPSILON);
    assert!((stats.requests_per_second - 0.0).abs() < f64::EPSILON);
    assert!((stats.min_latency_ms - 0.0).abs() < f64::EPSILON);
    assert!((stats.avg_latency_ms - 0.0).abs() < f64::EPSILON);
}

#[test]
fn duplicate_errors_are_counted_once() {
    let outcomes = vec![failed_outcome("timeout"), failed_outcome("timeout")];
    let stats = aggregate_endpoint("flaky", &outcomes, Duration::from_millis(100));
    assert_eq!(stats.errors.len(), 1);
    assert_eq!(stats.errors.get("timeout"), Some(&2));
}

#[test]
fn run_summary_sums_endpoints_and_weights_latency() {
    let first = aggregate_endpoint(
        "a",
        &[ok_outcome(10, 0), ok_outcome(10, 0), ok_outcome(10, 0)],
        Duration::from_millis(100),
    );
    let second = aggregate_endpoint("b", &[ok_outcome(40, 0)], Duration::from_millis(100));

    let summary = summarize_run(
        &[first, second],
        Duration::from_secs(2),
        "2026-01-01T00:00:00+00:00".to_owned(),
    );

    assert_eq!(summary.total_requests, 4);
    assert_eq!(summary.successful_requests, 4);
    assert_eq!(summary.failed_requests, 0);
    // Weighted by samples: (3 * 10 + 1 * 40) / 4.
    assert!((summary.avg_latency_ms - 17.5).abs() < 1e-6);
    assert!((summary.overall_requests_per_second - 2.0).abs() < 1e-6);
    assert_eq!(summary.total_duration_ms, 2000);
}

#[test]
fn run_summary_with_no_requests_has_zero_throughput() {
    let stats = aggregate_endpoint("idle", &[], Duration::from_millis(100));
    let summary = summarize_run(
        &[stats],
        Duration::from_secs(1),
        "2026-01-01T00:00:00+00:00".to_owned(),
    );
    assert_eq!(summary.total_requests, 0);
    assert!((summary.overall_requests_per_second - 0.0).abs() < f64::EPSILON);
    assert!((summary.avg_latency_ms - 0.0).abs() < f64::EPSILON);
}
