//! Plain-text run summary printed by the binary after a run. Pure
//! presentation over the report; the engine never calls into this.

use crate::metrics::RunReport;

pub(crate) fn summary_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push("Results:".to_owned());

    for stats in &report.endpoints {
        lines.push(format!("  endpoint: {}", stats.name));
        lines.push(format!(
            "    requests: {} total, {} ok, {} failed ({:.1}% success)",
            stats.total_requests,
            stats.successful_requests,
            stats.failed_requests,
            stats.success_rate * 100.0
        ));
        lines.push(format!(
            "    latency_ms: min {:.1} / avg {:.1} / max {:.1}",
            stats.min_latency_ms, stats.avg_latency_ms, stats.max_latency_ms
        ));
        lines.push(format!(
            "    throughput: {:.1} req/s over {} ms",
            stats.requests_per_second, stats.elapsed_ms
        ));
        if !stats.errors.is_empty() {
            lines.push(format!("    errors: {} distinct", stats.errors.len()));
            for (message, count) in &stats.errors {
                lines.push(format!("      {}x {}", count, message));
            }
        }
    }

    let summary = &report.summary;
    lines.push("Run:".to_owned());
    lines.push(format!("  started_at: {}", summary.started_at));
    lines.push(format!(
        "  requests: {} total, {} ok, {} failed",
        summary.total_requests, summary.successful_requests, summary.failed_requests
    ));
    lines.push(format!(
        "  duration_ms: {} ({:.1} req/s overall, avg latency {:.1} ms)",
        summary.total_duration_ms, summary.overall_requests_per_second, summary.avg_latency_ms
    ));

    lines
}

pub(crate) fn print_summary(report: &RunReport) {
    for line in summary_lines(report) {
        println!("{}", line);
    }
}
