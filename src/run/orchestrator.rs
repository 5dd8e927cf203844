//! Sequences the run: endpoints execute strictly one after another in
//! dependency order, so a dependent endpoint only starts once its
//! prerequisite has had the chance to populate the variable environment.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;
use tracing::debug;

use crate::config::BenchPlan;
use crate::error::AppResult;
use crate::http::build_client;
use crate::metrics::{RunReport, summarize_run};
use crate::vars::VarEnvironment;

use super::{RunObserver, resolve_order, run_endpoint};

/// Executes the whole plan and returns the aggregated report.
///
/// Individual request or extraction failures are captured as data in the
/// report; only internal faults (client construction) surface as errors.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built.
pub async fn run_plan(plan: &BenchPlan, observer: Arc<dyn RunObserver>) -> AppResult<RunReport> {
    let client = build_client(&plan.global)?;
    let env = Arc::new(VarEnvironment::new());
    let ordered = resolve_order(plan.endpoints.clone());

    let started_at = Utc::now().to_rfc3339();
    let run_start = Instant::now();
    let total = ordered.len();
    let mut endpoint_stats = Vec::with_capacity(total);

    for (index, endpoint) in ordered.into_iter().enumerate() {
        observer.endpoint_started(&endpoint.name, index, total);
        let policy = plan.global.effective_for(&endpoint);
        debug!(
            "Endpoint '{}': max_requests={}, duration={:?}, concurrent={}.",
            endpoint.name, policy.max_requests, policy.duration, policy.concurrent
        );

        let endpoint = Arc::new(endpoint);
        let stats = run_endpoint(&client, &endpoint, &policy, &env, &observer).await;
        observer.endpoint_completed(&stats);
        endpoint_stats.push(stats);
    }

    let summary = summarize_run(&endpoint_stats, run_start.elapsed(), started_at);
    observer.run_completed(&summary);

    Ok(RunReport {
        summary,
        endpoints: endpoint_stats,
    })
}
