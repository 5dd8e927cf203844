//! Normalized benchmark plan.
//!
//! Raw config optionality and CLI overrides are resolved here, once, so the
//! engine only ever sees concrete values.

use std::collections::BTreeMap;
use std::time::Duration;

use super::types::{ConfigFile, EndpointSection, HttpMethod, RawVariableSource};

pub const DEFAULT_MAX_REQUESTS: u64 = 100;
pub const DEFAULT_CONCURRENT: usize = 10;
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_SUCCESS_STATUS_MIN: u16 = 200;
pub const DEFAULT_SUCCESS_STATUS_MAX: u16 = 400;

#[derive(Debug, Clone)]
pub struct BenchPlan {
    pub endpoints: Vec<EndpointSpec>,
    pub global: GlobalPolicy,
}

#[derive(Debug, Clone)]
pub struct GlobalPolicy {
    pub max_requests: u64,
    /// When set, stops the endpoint on elapsed time instead of request count.
    pub duration: Option<Duration>,
    pub throttle: Duration,
    pub concurrent: usize,
    pub timeout: Duration,
    pub request_delay: Duration,
    pub success_status: StatusRange,
}

/// Half-open status range `min..max` counted as success.
#[derive(Debug, Clone, Copy)]
pub struct StatusRange {
    pub min: u16,
    pub max: u16,
}

impl StatusRange {
    #[must_use]
    pub const fn contains(self, status: u16) -> bool {
        status >= self.min && status < self.max
    }
}

impl Default for StatusRange {
    fn default() -> Self {
        StatusRange {
            min: DEFAULT_SUCCESS_STATUS_MIN,
            max: DEFAULT_SUCCESS_STATUS_MAX,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndpointSpec {
    pub name: String,
    pub url: String,
    pub method: HttpMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
    pub max_requests: Option<u64>,
    pub throttle: Option<Duration>,
    pub request_delay: Option<Duration>,
    pub variables: Vec<VariableRule>,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct VariableRule {
    pub name: String,
    pub path: String,
    pub from: VariableSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableSource {
    ResponseBody,
    ResponseHeaders,
}

/// Effective policy for one endpoint run, with per-endpoint overrides folded
/// over the global policy.
#[derive(Debug, Clone)]
pub struct EndpointPolicy {
    pub max_requests: u64,
    pub duration: Option<Duration>,
    pub throttle: Duration,
    pub concurrent: usize,
    pub timeout: Duration,
    pub request_delay: Duration,
    pub success_status: StatusRange,
}

/// CLI-level overrides applied on top of the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOverrides {
    pub max_requests: Option<u64>,
    pub duration_ms: Option<u64>,
    pub concurrent: Option<usize>,
}

impl BenchPlan {
    /// Builds the normalized plan from a validated raw config.
    #[must_use]
    pub fn from_config(file: ConfigFile, overrides: PlanOverrides) -> Self {
        let global_section = file.global.unwrap_or_default();

        let max_requests = overrides
            .max_requests
            .or(global_section.max_requests)
            .unwrap_or(DEFAULT_MAX_REQUESTS);
        let duration_ms = overrides.duration_ms.or(global_section.duration);
        let duration = duration_ms.filter(|ms| *ms > 0).map(Duration::from_millis);
        let concurrent = overrides
            .concurrent
            .or(global_section.concurrent)
            .unwrap_or(DEFAULT_CONCURRENT)
            .max(1);

        let global = GlobalPolicy {
            max_requests,
            duration,
            throttle: Duration::from_millis(global_section.throttle.unwrap_or(0)),
            concurrent,
            timeout: Duration::from_millis(global_section.timeout.unwrap_or(DEFAULT_TIMEOUT_MS)),
            request_delay: Duration::from_millis(global_section.request_delay.unwrap_or(0)),
            success_status: StatusRange {
                min: global_section
                    .success_status_min
                    .unwrap_or(DEFAULT_SUCCESS_STATUS_MIN),
                max: global_section
                    .success_status_max
                    .unwrap_or(DEFAULT_SUCCESS_STATUS_MAX),
            },
        };

        let endpoints = file
            .endpoints
            .into_iter()
            .map(EndpointSpec::from_section)
            .collect();

        BenchPlan { endpoints, global }
    }
}

impl GlobalPolicy {
    /// Resolves the effective policy for one endpoint.
    #[must_use]
    pub fn effective_for(&self, endpoint: &EndpointSpec) -> EndpointPolicy {
        EndpointPolicy {
            max_requests: endpoint.max_requests.unwrap_or(self.max_requests),
            duration: self.duration,
            throttle: endpoint.throttle.unwrap_or(self.throttle),
            concurrent: self.concurrent,
            timeout: self.timeout,
            request_delay: endpoint.request_delay.unwrap_or(self.request_delay),
            success_status: self.success_status,
        }
    }
}

impl EndpointSpec {
    fn from_section(section: EndpointSection) -> Self {
        let variables = section
            .variables
            .into_iter()
            .map(|variable| VariableRule {
                name: variable.name,
                path: variable.path,
                from: match variable.from {
                    Some(RawVariableSource::Headers) => VariableSource::ResponseHeaders,
                    Some(RawVariableSource::Response) | None => VariableSource::ResponseBody,
                },
            })
            .collect();

        EndpointSpec {
            name: section.name,
            url: section.url,
            method: section.method.unwrap_or(HttpMethod::Get),
            headers: section.headers,
            body: section.body,
            max_requests: section.max_requests,
            throttle: section.throttle.map(Duration::from_millis),
            request_delay: section.request_delay.map(Duration::from_millis),
            variables,
            dependencies: section.dependencies,
        }
    }
}
