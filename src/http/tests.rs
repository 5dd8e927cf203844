use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::config::{
    EndpointPolicy, EndpointSpec, GlobalPolicy, StatusRange, VariableRule, VariableSource,
};
use crate::test_support::{TestResponse, run_async_test, spawn_server};
use crate::vars::{VarEnvironment, VarValue};

use super::{build_client, execute_request};

fn test_policy() -> EndpointPolicy {
    EndpointPolicy {
        max_requests: 1,
        duration: None,
        throttle: Duration::ZERO,
        concurrent: 1,
        timeout: Duration::from_secs(5),
        request_delay: Duration::ZERO,
        success_status: StatusRange::default(),
    }
}

fn test_endpoint(url: String) -> EndpointSpec {
    EndpointSpec {
        name: "probe".to_owned(),
        url,
        method: crate::config::types::HttpMethod::Get,
        headers: BTreeMap::new(),
        body: None,
        max_requests: None,
        throttle: None,
        request_delay: None,
        variables: vec![],
        dependencies: vec![],
    }
}

fn test_client() -> Result<reqwest::Client, String> {
    let global = GlobalPolicy {
        max_requests: 1,
        duration: None,
        throttle: Duration::ZERO,
        concurrent: 1,
        timeout: Duration::from_secs(5),
        request_delay: Duration::ZERO,
        success_status: StatusRange::default(),
    };
    build_client(&global).map_err(|err| err.to_string())
}

#[test]
fn successful_request_is_classified_and_timed() -> Result<(), String> {
    run_async_test(async {
        let base = spawn_server(Arc::new(|_request| {
            TestResponse::json(200, r#"{"ok":true}"#)
        }))
        .await?;
        let client = test_client()?;
        let endpoint = test_endpoint(format!("{}/ping", base));
        let env = VarEnvironment::new();

        let (outcome, snapshot) =
            execute_request(&client, &endpoint, &test_policy(), &env, false).await;
        assert!(outcome.success);
        assert_eq!(outcome.status, Some(200));
        assert!(outcome.error.is_none());
        assert!(outcome.latency > Duration::ZERO);
        assert_eq!(outcome.response_bytes, r#"{"ok":true}"#.len() as u64);
        assert!(snapshot.is_none());
        Ok(())
    })
}

#[test]
fn server_error_is_failure_with_status() -> Result<(), String> {
    run_async_test(async {
        let base = spawn_server(Arc::new(|_request| TestResponse::json(500, "{}"))).await?;
        let client = test_client()?;
        let endpoint = test_endpoint(base);
        let env = VarEnvironment::new();

        let (outcome, _snapshot) =
            execute_request(&client, &endpoint, &test_policy(), &env, false).await;
        assert!(!outcome.success);
        assert_eq!(outcome.status, Some(500));
        Ok(())
    })
}

#[test]
fn transport_failure_reduces_to_outcome() -> Result<(), String> {
    run_async_test(async {
        let client = test_client()?;
        // Nothing listens here; connection is refused.
        let endpoint = test_endpoint("http://127.0.0.1:9/".to_owned());
        let env = VarEnvironment::new();

        let (outcome, snapshot) =
            execute_request(&client, &endpoint, &test_policy(), &env, false).await;
        assert!(!outcome.success);
        assert!(outcome.status.is_none());
        assert!(outcome.error.is_some());
        assert!(snapshot.is_none());
        Ok(())
    })
}

#[test]
fn templates_render_in_url_headers_and_body() -> Result<(), String> {
    run_async_test(async {
        let base = spawn_server(Arc::new(|request| {
            let authorized = request
                .headers
                .get("authorization")
                .is_some_and(|value| value == "Bearer tok-1");
            let body_ok = request.body.contains("\"user\":\"u-9\"");
            let path_ok = request.path == "/users/u-9";
            if authorized && body_ok && path_ok {
                TestResponse::json(200, "{}")
            } else {
                TestResponse::json(400, "{}")
            }
        }))
        .await?;
        let client = test_client()?;

        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_owned(), "Bearer {{token}}".to_owned());
        let mut endpoint = test_endpoint(format!("{}/users/{{{{userId}}}}", base));
        endpoint.method = crate::config::types::HttpMethod::Post;
        endpoint.headers = headers;
        endpoint.body = Some(json!({"user": "{{userId}}"}));

        let env = VarEnvironment::new();
        env.set("token", VarValue::Text("tok-1".to_owned()));
        env.set("userId", VarValue::Text("u-9".to_owned()));

        let (outcome, _snapshot) =
            execute_request(&client, &endpoint, &test_policy(), &env, false).await;
        assert!(outcome.success, "server rejected rendered request");
        assert!(outcome.request_bytes > 0);
        Ok(())
    })
}

#[test]
fn capture_returns_headers_and_body() -> Result<(), String> {
    run_async_test(async {
        let base = spawn_server(Arc::new(|_request| {
            let mut response = TestResponse::json(200, r#"{"id":"u-1"}"#);
            response
                .headers
                .push(("x-request-id".to_owned(), "req-7".to_owned()));
            response
        }))
        .await?;
        let client = test_client()?;
        let mut endpoint = test_endpoint(base);
        endpoint.variables = vec![VariableRule {
            name: "id".to_owned(),
            path: "id".to_owned(),
            from: VariableSource::ResponseBody,
        }];
        let env = VarEnvironment::new();

        let (outcome, snapshot) =
            execute_request(&client, &endpoint, &test_policy(), &env, true).await;
        assert!(outcome.success);
        let snapshot = snapshot.ok_or_else(|| "snapshot missing".to_owned())?;
        assert_eq!(snapshot.body, br#"{"id":"u-1"}"#);
        assert!(snapshot.headers.get("x-request-id").is_some());
        Ok(())
    })
}
