pub mod objectives;
pub mod registration;

pub use objectives::{CancelFlag, ObjectiveTracker, TimerScope};
pub use registration::{RegistrationContext, RegistrationOrchestrator};
