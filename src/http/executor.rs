//! One HTTP exchange, reduced to a timed outcome.
//!
//! Templates are rendered against the variable environment immediately
//! before dispatch, and no fault escapes: transport errors, timeouts, and
//! body-read failures all come back as a [`RequestOutcome`].

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tokio::time::Instant;
use tracing::debug;

use crate::config::{EndpointPolicy, EndpointSpec, GlobalPolicy};
use crate::error::{AppError, AppResult, HttpError};
use crate::vars::{VarEnvironment, render_json, render_template};

#[derive(Debug, Clone)]
pub struct RequestOutcome {
    pub success: bool,
    pub status: Option<u16>,
    pub latency: Duration,
    pub error: Option<String>,
    pub request_bytes: u64,
    pub response_bytes: u64,
}

/// Headers and body of a response, captured only while an endpoint still has
/// pending variable extractions.
#[derive(Debug)]
pub struct ResponseSnapshot {
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Builds the shared client for one run.
///
/// # Errors
///
/// Returns an error when the underlying TLS/connector setup fails.
pub fn build_client(policy: &GlobalPolicy) -> AppResult<Client> {
    Client::builder()
        .timeout(policy.timeout)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Executes one request for an endpoint and reduces it to an outcome.
///
/// When `capture_response` is set, the response headers and body are
/// returned alongside the outcome for extraction; otherwise the body is
/// still drained (to count bytes) but not retained.
pub async fn execute_request(
    client: &Client,
    endpoint: &EndpointSpec,
    policy: &EndpointPolicy,
    env: &VarEnvironment,
    capture_response: bool,
) -> (RequestOutcome, Option<ResponseSnapshot>) {
    let vars = env.rendered_snapshot();
    let url = render_template(&endpoint.url, &vars);

    let mut builder = client
        .request(endpoint.method.as_reqwest(), &url)
        .timeout(policy.timeout);

    let mut has_content_type = false;
    for (name, value) in &endpoint.headers {
        if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
            has_content_type = true;
        }
        builder = builder.header(name.as_str(), render_template(value, &vars));
    }

    let mut request_bytes: u64 = 0;
    if let Some(body) = endpoint.body.as_ref() {
        let rendered = render_json(body, &vars);
        let payload = match serde_json::to_vec(&rendered) {
            Ok(payload) => payload,
            Err(err) => {
                // Should not happen for a Value, but a fault here must still
                // reduce to an outcome.
                return (
                    failure_outcome(Duration::ZERO, None, format!("body serialization: {}", err)),
                    None,
                );
            }
        };
        request_bytes = payload.len() as u64;
        if !has_content_type {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        builder = builder.body(payload);
    }

    let start = Instant::now();
    let response = match builder.send().await {
        Ok(response) => response,
        Err(err) => {
            let latency = start.elapsed();
            debug!("Request to '{}' failed: {}", url, err);
            let status = err.status().map(|status| status.as_u16());
            let mut outcome = failure_outcome(latency, status, err.to_string());
            outcome.request_bytes = request_bytes;
            return (outcome, None);
        }
    };

    let status = response.status().as_u16();
    let headers = capture_response.then(|| response.headers().clone());

    match response.bytes().await {
        Ok(body) => {
            let latency = start.elapsed();
            let outcome = RequestOutcome {
                success: policy.success_status.contains(status),
                status: Some(status),
                latency,
                error: None,
                request_bytes,
                response_bytes: body.len() as u64,
            };
            let snapshot = headers.map(|headers| ResponseSnapshot {
                headers,
                body: body.to_vec(),
            });
            (outcome, snapshot)
        }
        Err(err) => {
            let latency = start.elapsed();
            debug!("Failed to read response body from '{}': {}", url, err);
            let mut outcome =
                failure_outcome(latency, Some(status), format!("body read: {}", err));
            outcome.request_bytes = request_bytes;
            (outcome, None)
        }
    }
}

fn failure_outcome(latency: Duration, status: Option<u16>, error: String) -> RequestOutcome {
    RequestOutcome {
        success: false,
        status,
        latency,
        error: Some(error),
        request_bytes: 0,
        response_bytes: 0,
    }
}
