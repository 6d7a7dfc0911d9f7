use serde::{Deserialize, Serialize};

use super::form::FormField;
use super::state_machine::WizardStep;
use crate::ports::errors::RemoteError;

/// Local, field-level errors. Recoverable by re-entering the value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: FormField },
    #[error("{}", format_hint(*.field))]
    Format { field: FormField },
    #[error("the verification code must have 4 digits")]
    CodeFormat,
    #[error("invalid verification code")]
    Mismatch,
    #[error("you must agree to the terms of use")]
    TermsRequired,
    #[error("{field} must be filled in before submitting")]
    Incomplete { field: FormField },
}

fn format_hint(field: FormField) -> String {
    match field {
        FormField::Phone => "the phone number must have 11 digits".to_string(),
        FormField::Password => "the password needs at least 8 characters, 1 symbol, 1 digit, \
             1 uppercase and 1 lowercase letter"
            .to_string(),
        other => format!("invalid {other}"),
    }
}

/// Errors surfaced by the registration wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("a request is already in flight")]
    RequestInFlight,
    #[error("registration was already submitted")]
    AlreadySubmitted,
    #[error("that request is not available on the {step:?} page")]
    WrongStep { step: WizardStep },
}

impl RegistrationError {
    /// Whether the rider should see an alert for this error. Busy,
    /// already-submitted and wrong-page rejections stand in for a disabled
    /// button.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            RegistrationError::Validation(_) | RegistrationError::Remote(_)
        )
    }
}
