//! Registration wizard use cases.

pub mod context;
pub mod orchestrator;

pub use context::RegistrationContext;
pub use orchestrator::RegistrationOrchestrator;
