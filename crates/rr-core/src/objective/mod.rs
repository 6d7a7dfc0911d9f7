//! Objective domain module.
//!
//! Reward objectives, their ranked display subset and effect timings.

pub mod board;
pub mod model;
pub mod timing;

pub use board::ObjectiveBoard;
pub use model::{Objective, ObjectiveBoardView, ObjectiveCard, ProgressBand};
pub use timing::ObjectiveTimings;
