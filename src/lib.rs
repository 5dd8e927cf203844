//! Core library for the `restbench` CLI.
//!
//! This crate provides the internal building blocks used by the binary:
//! configuration parsing and validation, dependency resolution, the
//! variable environment with template substitution, the per-endpoint
//! request scheduler, result aggregation, and report sinks. The primary
//! user-facing interface is the `restbench` command-line application.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod run;
pub mod sinks;
#[cfg(test)]
mod test_support;
pub mod vars;
