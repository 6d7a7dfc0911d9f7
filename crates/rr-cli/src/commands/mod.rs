pub mod objectives;
pub mod register;

pub use objectives::run_objectives;
pub use register::{run_register, RegisterOutcome};
