mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod run;
mod sinks;
mod summary;
#[cfg(test)]
mod test_support;
mod vars;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
