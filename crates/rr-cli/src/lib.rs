//! Terminal host for Rider Rewards.
//!
//! Loads configuration, initializes tracing, wires the infrastructure
//! adapters into the use cases and runs the requested command.

pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod commands;
