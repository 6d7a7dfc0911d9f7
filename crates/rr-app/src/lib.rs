//! Rider Rewards application orchestration layer
//!
//! This crate contains the use cases that drive the core state machines and
//! perform their side effects through ports.

pub mod usecases;

pub use usecases::{ObjectiveTracker, RegistrationOrchestrator};
