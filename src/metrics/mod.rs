mod aggregate;
mod types;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_endpoint, summarize_run};
pub use types::{EndpointStats, RunReport, RunSummary};
