mod executor;

#[cfg(test)]
mod tests;

pub use executor::{RequestOutcome, ResponseSnapshot, build_client, execute_request};
