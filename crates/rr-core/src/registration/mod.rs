//! Registration domain module.
//!
//! Form record, field validators, verification-code entry and the wizard
//! state machine.

pub mod code;
pub mod error;
pub mod form;
pub mod state_machine;
pub mod validation;

pub use code::VerificationCode;
pub use error::{RegistrationError, ValidationError};
pub use form::{FormField, RegistrationForm};
pub use state_machine::{
    RegistrationAction, RegistrationEvent, RegistrationState, RegistrationStateMachine,
    RemoteRequest, WizardScreen, WizardStep,
};
