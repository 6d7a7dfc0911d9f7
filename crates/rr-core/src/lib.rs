//! # rr-core
//!
//! Core domain models and business logic for Rider Rewards.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the registration wizard, the objective board and the ports
//! the outer layers implement.

pub mod config;
pub mod ids;
pub mod objective;
pub mod ports;
pub mod registration;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::{CampaignId, ObjectiveId};
pub use objective::{Objective, ObjectiveBoard, ObjectiveTimings};
pub use registration::{RegistrationState, RegistrationStateMachine, WizardStep};
