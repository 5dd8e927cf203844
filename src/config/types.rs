//! Raw configuration file model, exactly as deserialized from TOML or JSON.
//!
//! Everything optional here is resolved to a concrete value when the file is
//! normalized into a [`super::BenchPlan`]; the engine never reads these types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub global: Option<GlobalSection>,
    #[serde(default)]
    pub endpoints: Vec<EndpointSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GlobalSection {
    pub max_requests: Option<u64>,
    /// Wall-clock budget in milliseconds; takes precedence over
    /// `max_requests` when set and > 0.
    pub duration: Option<u64>,
    /// Delay in milliseconds slept after each request.
    pub throttle: Option<u64>,
    #[serde(alias = "concurrency")]
    pub concurrent: Option<usize>,
    /// Per-request timeout in milliseconds.
    pub timeout: Option<u64>,
    /// Minimum spacing in milliseconds between request starts.
    pub request_delay: Option<u64>,
    /// Lowest status code counted as a success (inclusive).
    pub success_status_min: Option<u16>,
    /// Lowest status code counted as a failure again (exclusive upper bound).
    pub success_status_max: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EndpointSection {
    pub name: String,
    pub url: String,
    pub method: Option<HttpMethod>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    pub body: Option<serde_json::Value>,
    pub max_requests: Option<u64>,
    pub throttle: Option<u64>,
    pub request_delay: Option<u64>,
    #[serde(default)]
    pub variables: Vec<VariableSection>,
    #[serde(default, alias = "depends_on")]
    pub dependencies: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VariableSection {
    pub name: String,
    pub path: String,
    pub from: Option<RawVariableSource>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RawVariableSource {
    Response,
    Headers,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub enum HttpMethod {
    #[serde(rename = "get", alias = "GET")]
    Get,
    #[serde(rename = "post", alias = "POST")]
    Post,
    #[serde(rename = "put", alias = "PUT")]
    Put,
    #[serde(rename = "delete", alias = "DELETE")]
    Delete,
    #[serde(rename = "patch", alias = "PATCH")]
    Patch,
}

impl HttpMethod {
    #[must_use]
    pub fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}
