use std::path::Path;

use crate::error::{AppError, AppResult, ConfigError};

pub const EXAMPLE_CONFIG: &str = r#"# restbench example configuration.
#
# Endpoints run sequentially in dependency order; requests within one
# endpoint run concurrently. Values extracted from responses are available
# to later endpoints as {{name}} templates.

[global]
max_requests = 100
# duration = 10000        # ms; overrides max_requests when set
concurrent = 10
timeout = 30000           # ms per request
# throttle = 50           # ms sleep after each request
# request_delay = 10      # ms minimum spacing between request starts

[[endpoints]]
name = "login"
url = "http://localhost:8080/api/login"
method = "post"
body = { username = "demo", password = "demo" }

[[endpoints.variables]]
name = "token"
path = "auth.token"
from = "response"

[[endpoints]]
name = "profile"
url = "http://localhost:8080/api/profile"
method = "get"
dependencies = ["login"]

[endpoints.headers]
Authorization = "Bearer {{token}}"
"#;

/// Writes the example config, refusing to overwrite an existing file.
///
/// # Errors
///
/// Returns an error when the path already exists or the write fails.
pub fn write_example_config(path: &Path) -> AppResult<()> {
    if path.exists() {
        return Err(AppError::config(ConfigError::ExampleExists {
            path: path.to_path_buf(),
        }));
    }
    std::fs::write(path, EXAMPLE_CONFIG).map_err(|err| {
        AppError::config(ConfigError::WriteExample {
            path: path.to_path_buf(),
            source: err,
        })
    })
}
