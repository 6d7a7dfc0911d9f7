//! Home-screen objective tracking.

pub mod timers;
pub mod tracker;

pub use timers::{CancelFlag, TimerScope};
pub use tracker::ObjectiveTracker;
