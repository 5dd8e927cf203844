//! Per-endpoint concurrent request scheduler.
//!
//! Drives up to `concurrent` workers over one endpoint until the count or
//! duration stop condition is met. Stopping is cooperative: a worker that
//! already reserved a slot always finishes its request; only new starts are
//! prevented. Outcomes flow through a bounded channel to a single collector,
//! so no appends are lost and backpressure is the concurrency limit itself.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::Client;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep, sleep_until};
use tracing::debug;

use crate::config::{EndpointPolicy, EndpointSpec};
use crate::http::{RequestOutcome, execute_request};
use crate::metrics::{EndpointStats, aggregate_endpoint};
use crate::vars::{VarEnvironment, apply_extraction_rules};

use super::RunObserver;

/// Upper bound on requests in duration mode, guarding against clock
/// anomalies and misconfiguration.
pub const DURATION_SAFETY_CAP: u64 = 10_000;

/// Reserves request slots so the total never exceeds the budget, even with
/// concurrent workers racing to start.
struct RequestBudget {
    limit: u64,
    counter: AtomicU64,
}

impl RequestBudget {
    fn new(limit: u64) -> Self {
        RequestBudget {
            limit,
            counter: AtomicU64::new(0),
        }
    }

    fn try_reserve(&self) -> bool {
        loop {
            let current = self.counter.load(Ordering::Relaxed);
            if current >= self.limit {
                return false;
            }
            let Some(next) = current.checked_add(1) else {
                return false;
            };
            if self
                .counter
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                return true;
            }
        }
    }
}

/// Enforces the minimum spacing between request starts globally across all
/// workers of an endpoint.
struct StartPacer {
    delay: Duration,
    next_start: Mutex<Instant>,
}

impl StartPacer {
    fn new(delay: Duration) -> Self {
        StartPacer {
            delay,
            next_start: Mutex::new(Instant::now()),
        }
    }

    async fn wait_turn(&self) {
        let wake = {
            let Ok(mut next_start) = self.next_start.lock() else {
                return;
            };
            let slot = (*next_start).max(Instant::now());
            *next_start = slot.checked_add(self.delay).unwrap_or(slot);
            slot
        };
        sleep_until(wake).await;
    }
}

struct SchedulerShared {
    endpoint: Arc<EndpointSpec>,
    policy: EndpointPolicy,
    budget: RequestBudget,
    deadline: Option<Instant>,
    pacer: Option<StartPacer>,
    /// Check-and-set guard for first-success extraction, so concurrent
    /// workers cannot race to overwrite bindings.
    extracted: AtomicBool,
}

impl SchedulerShared {
    fn may_start(&self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return false;
            }
        }
        self.budget.try_reserve()
    }
}

/// Runs one endpoint under its effective policy and aggregates the outcomes.
pub async fn run_endpoint(
    client: &Client,
    endpoint: &Arc<EndpointSpec>,
    policy: &EndpointPolicy,
    env: &Arc<VarEnvironment>,
    observer: &Arc<dyn RunObserver>,
) -> EndpointStats {
    let started = Instant::now();
    let concurrent = policy.concurrent.max(1);

    // Duration mode wins over count mode; the budget then only acts as the
    // safety cap.
    let budget_limit = if policy.duration.is_some() {
        DURATION_SAFETY_CAP
    } else {
        policy.max_requests
    };

    let shared = Arc::new(SchedulerShared {
        endpoint: Arc::clone(endpoint),
        policy: policy.clone(),
        budget: RequestBudget::new(budget_limit),
        deadline: policy
            .duration
            .and_then(|duration| started.checked_add(duration)),
        pacer: (policy.request_delay > Duration::ZERO)
            .then(|| StartPacer::new(policy.request_delay)),
        extracted: AtomicBool::new(false),
    });

    let (outcome_tx, mut outcome_rx) = mpsc::channel::<RequestOutcome>(concurrent);

    let mut workers = Vec::with_capacity(concurrent);
    for _ in 0..concurrent {
        let shared = Arc::clone(&shared);
        let client = client.clone();
        let env = Arc::clone(env);
        let outcome_tx = outcome_tx.clone();
        workers.push(tokio::spawn(async move {
            worker_loop(&client, &shared, &env, &outcome_tx).await;
        }));
    }
    drop(outcome_tx);

    let mut outcomes = Vec::new();
    while let Some(outcome) = outcome_rx.recv().await {
        observer.request_completed(&endpoint.name, &outcome);
        outcomes.push(outcome);
    }

    for worker in workers {
        drop(worker.await);
    }

    aggregate_endpoint(&endpoint.name, &outcomes, started.elapsed())
}

async fn worker_loop(
    client: &Client,
    shared: &SchedulerShared,
    env: &VarEnvironment,
    outcome_tx: &mpsc::Sender<RequestOutcome>,
) {
    let wants_extraction = !shared.endpoint.variables.is_empty();

    while shared.may_start() {
        if let Some(pacer) = shared.pacer.as_ref() {
            pacer.wait_turn().await;
        }

        let capture = wants_extraction && !shared.extracted.load(Ordering::Acquire);
        let (outcome, snapshot) =
            execute_request(client, &shared.endpoint, &shared.policy, env, capture).await;

        if outcome.success {
            if let Some(snapshot) = snapshot {
                let first = shared
                    .extracted
                    .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                    .is_ok();
                if first {
                    let bound = apply_extraction_rules(
                        &shared.endpoint.name,
                        &shared.endpoint.variables,
                        env,
                        &snapshot.headers,
                        &snapshot.body,
                    );
                    debug!(
                        "Endpoint '{}': {} of {} variables bound.",
                        shared.endpoint.name,
                        bound,
                        shared.endpoint.variables.len()
                    );
                }
            }
        }

        if outcome_tx.send(outcome).await.is_err() {
            break;
        }

        if shared.policy.throttle > Duration::ZERO {
            sleep(shared.policy.throttle).await;
        }
    }
}
