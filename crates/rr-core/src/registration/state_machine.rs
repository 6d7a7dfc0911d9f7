//! Registration wizard state machine.
//!
//! Defines a pure state transition function for the rider registration flow.
//! Remote calls are returned as [`RegistrationAction`]s; their outcomes come
//! back in as events.

use serde::{Deserialize, Serialize};

use super::code::{VerificationCode, CODE_LEN};
use super::error::{RegistrationError, ValidationError};
use super::form::{FormField, RegistrationForm};
use super::validation::{first_invalid_field, validate_field, validate_phone};
use crate::ports::errors::RemoteError;

/// Wizard page cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Phone entry.
    #[default]
    Phone,
    /// SMS code entry.
    Code,
    /// Full form.
    Form,
    /// Terms of use, reached from the form only.
    Terms,
}

impl WizardStep {
    /// 1-based page number.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Phone => 1,
            WizardStep::Code => 2,
            WizardStep::Form => 3,
            WizardStep::Terms => 4,
        }
    }

    /// One page back, floored at the phone page.
    pub fn previous(self) -> Self {
        match self {
            WizardStep::Phone | WizardStep::Code => WizardStep::Phone,
            WizardStep::Form => WizardStep::Code,
            WizardStep::Terms => WizardStep::Form,
        }
    }
}

/// Remote call the wizard is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteRequest {
    PhoneChallenge,
    CodeValidation,
    Registration,
}

/// Everything the wizard knows. Owned by a single orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationState {
    pub step: WizardStep,
    pub form: RegistrationForm,
    pub code: VerificationCode,
    /// Code issued by the phone challenge, cached in memory only.
    pub expected_code: Option<String>,
    pub agreed_to_terms: bool,
    pub in_flight: Option<RemoteRequest>,
    pub submitted: bool,
    /// Outcome of the last transition.
    pub error: Option<RegistrationError>,
}

impl RegistrationState {
    pub fn can_submit(&self) -> bool {
        self.agreed_to_terms && first_invalid_field(&self.form).is_none()
    }

    /// What the current page displays.
    pub fn screen(&self) -> WizardScreen {
        match self.step {
            WizardStep::Phone => WizardScreen::Phone {
                phone: self.form.phone.clone(),
            },
            WizardStep::Code => WizardScreen::Code {
                digits: *self.code.digits(),
                focus: self.code.focus(),
            },
            WizardStep::Form => WizardScreen::Form {
                form: self.form.clone(),
                agreed_to_terms: self.agreed_to_terms,
                can_submit: self.can_submit(),
            },
            WizardStep::Terms => WizardScreen::Terms,
        }
    }
}

/// Page projection handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WizardScreen {
    Phone {
        phone: String,
    },
    Code {
        digits: [Option<char>; CODE_LEN],
        focus: usize,
    },
    Form {
        form: RegistrationForm,
        agreed_to_terms: bool,
        can_submit: bool,
    },
    Terms,
}

/// Events that drive the registration flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationEvent {
    UpdateField { field: FormField, value: String },
    SetHasBag { has_bag: bool },
    /// Field lost focus.
    ValidateField { field: FormField },
    /// Stores `phone` and requests a challenge for it. The phone is only
    /// stored when the request is allowed to start.
    SubmitPhone { phone: String },
    ResendCode,
    /// Phone challenge answered (network).
    PhoneChallengeIssued { code: String },
    TypeCodeDigit { index: usize, text: String },
    EraseCodeDigit { index: usize },
    /// Replaces the whole code entry, one text per slot.
    EnterCode { digits: [String; CODE_LEN] },
    SubmitCode,
    /// Code validation answered (network).
    CodeAccepted,
    ViewTerms,
    AcceptTerms,
    SubmitRegistration,
    /// Registration answered (network).
    RegistrationAccepted,
    /// A remote call failed or was rejected (network).
    RemoteFailed {
        request: RemoteRequest,
        error: RemoteError,
    },
    Previous,
}

impl RegistrationEvent {
    /// Variant name, safe to log (field values may hold the password).
    pub fn name(&self) -> &'static str {
        match self {
            RegistrationEvent::UpdateField { .. } => "update_field",
            RegistrationEvent::SetHasBag { .. } => "set_has_bag",
            RegistrationEvent::ValidateField { .. } => "validate_field",
            RegistrationEvent::SubmitPhone { .. } => "submit_phone",
            RegistrationEvent::ResendCode => "resend_code",
            RegistrationEvent::PhoneChallengeIssued { .. } => "phone_challenge_issued",
            RegistrationEvent::TypeCodeDigit { .. } => "type_code_digit",
            RegistrationEvent::EraseCodeDigit { .. } => "erase_code_digit",
            RegistrationEvent::EnterCode { .. } => "enter_code",
            RegistrationEvent::SubmitCode => "submit_code",
            RegistrationEvent::CodeAccepted => "code_accepted",
            RegistrationEvent::ViewTerms => "view_terms",
            RegistrationEvent::AcceptTerms => "accept_terms",
            RegistrationEvent::SubmitRegistration => "submit_registration",
            RegistrationEvent::RegistrationAccepted => "registration_accepted",
            RegistrationEvent::RemoteFailed { .. } => "remote_failed",
            RegistrationEvent::Previous => "previous",
        }
    }

    fn starts_request(&self) -> bool {
        matches!(
            self,
            RegistrationEvent::SubmitPhone { .. }
                | RegistrationEvent::ResendCode
                | RegistrationEvent::SubmitCode
                | RegistrationEvent::SubmitRegistration
        )
    }
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationAction {
    RequestPhoneChallenge { phone: String },
    ValidateCode { phone: String, code: String },
    SubmitRegistration { form: RegistrationForm },
    NavigateToLogin,
}

impl RegistrationAction {
    pub fn name(&self) -> &'static str {
        match self {
            RegistrationAction::RequestPhoneChallenge { .. } => "request_phone_challenge",
            RegistrationAction::ValidateCode { .. } => "validate_code",
            RegistrationAction::SubmitRegistration { .. } => "submit_registration",
            RegistrationAction::NavigateToLogin => "navigate_to_login",
        }
    }
}

/// Pure registration state machine: no side effects.
pub struct RegistrationStateMachine;

impl RegistrationStateMachine {
    pub fn transition(
        mut state: RegistrationState,
        event: RegistrationEvent,
    ) -> (RegistrationState, Vec<RegistrationAction>) {
        state.error = None;

        if state.submitted {
            if event.starts_request() {
                state.error = Some(RegistrationError::AlreadySubmitted);
            }
            return (state, Vec::new());
        }
        if state.in_flight.is_some() && event.starts_request() {
            state.error = Some(RegistrationError::RequestInFlight);
            return (state, Vec::new());
        }

        match (state.step, event) {
            (_, RegistrationEvent::UpdateField { field, value }) => {
                state.form.set(field, value);
                (state, Vec::new())
            }
            (_, RegistrationEvent::SetHasBag { has_bag }) => {
                state.form.has_bag = has_bag;
                (state, Vec::new())
            }
            (_, RegistrationEvent::ValidateField { field }) => {
                if let Err(err) = validate_field(field, state.form.get(field)) {
                    if field.resets_on_invalid() {
                        state.form.clear(field);
                    }
                    state.error = Some(err.into());
                }
                (state, Vec::new())
            }
            (WizardStep::Phone, RegistrationEvent::SubmitPhone { phone }) => {
                state.form.set(FormField::Phone, phone);
                request_phone_challenge(state)
            }
            (WizardStep::Code, RegistrationEvent::ResendCode) => request_phone_challenge(state),
            (_, RegistrationEvent::PhoneChallengeIssued { code })
                if state.in_flight == Some(RemoteRequest::PhoneChallenge) =>
            {
                state.in_flight = None;
                state.expected_code = Some(code);
                state.code = VerificationCode::default();
                state.step = WizardStep::Code;
                (state, Vec::new())
            }
            (WizardStep::Code, RegistrationEvent::TypeCodeDigit { index, text }) => {
                state.code.type_text(index, &text);
                (state, Vec::new())
            }
            (WizardStep::Code, RegistrationEvent::EraseCodeDigit { index }) => {
                state.code.erase(index);
                (state, Vec::new())
            }
            (WizardStep::Code, RegistrationEvent::EnterCode { digits }) => {
                state.code = VerificationCode::from_entries(&digits);
                (state, Vec::new())
            }
            (WizardStep::Code, RegistrationEvent::SubmitCode) => {
                let expected = state.expected_code.clone().unwrap_or_default();
                let checked = state.code.check(&expected).and_then(|code| {
                    validate_phone(&state.form.phone).map(|phone| (phone, code))
                });
                match checked {
                    Ok((phone, code)) => {
                        state.in_flight = Some(RemoteRequest::CodeValidation);
                        (state, vec![RegistrationAction::ValidateCode { phone, code }])
                    }
                    Err(err) => {
                        state.error = Some(err.into());
                        (state, Vec::new())
                    }
                }
            }
            (_, RegistrationEvent::CodeAccepted)
                if state.in_flight == Some(RemoteRequest::CodeValidation) =>
            {
                state.in_flight = None;
                state.step = WizardStep::Form;
                (state, Vec::new())
            }
            (WizardStep::Form, RegistrationEvent::ViewTerms) => {
                state.step = WizardStep::Terms;
                (state, Vec::new())
            }
            (WizardStep::Form | WizardStep::Terms, RegistrationEvent::AcceptTerms) => {
                state.agreed_to_terms = true;
                state.step = WizardStep::Form;
                (state, Vec::new())
            }
            (_, RegistrationEvent::SubmitRegistration) if !state.agreed_to_terms => {
                state.error = Some(ValidationError::TermsRequired.into());
                (state, Vec::new())
            }
            (WizardStep::Form, RegistrationEvent::SubmitRegistration) => {
                if let Some(field) = first_invalid_field(&state.form) {
                    state.error = Some(ValidationError::Incomplete { field }.into());
                    return (state, Vec::new());
                }
                state.in_flight = Some(RemoteRequest::Registration);
                let form = state.form.clone();
                (state, vec![RegistrationAction::SubmitRegistration { form }])
            }
            (_, RegistrationEvent::RegistrationAccepted)
                if state.in_flight == Some(RemoteRequest::Registration) =>
            {
                state.in_flight = None;
                state.submitted = true;
                (state, vec![RegistrationAction::NavigateToLogin])
            }
            (_, RegistrationEvent::RemoteFailed { request, error })
                if state.in_flight == Some(request) =>
            {
                state.in_flight = None;
                state.error = Some(error.into());
                (state, Vec::new())
            }
            (_, RegistrationEvent::Previous) => {
                state.step = state.step.previous();
                (state, Vec::new())
            }
            (step, event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    step = ?step,
                    event = event.name(),
                    "registration event ignored"
                );
                if event.starts_request() {
                    state.error = Some(RegistrationError::WrongStep { step });
                }
                (state, Vec::new())
            }
        }
    }
}

fn request_phone_challenge(
    mut state: RegistrationState,
) -> (RegistrationState, Vec<RegistrationAction>) {
    match validate_phone(&state.form.phone) {
        Ok(phone) => {
            state.in_flight = Some(RemoteRequest::PhoneChallenge);
            (state, vec![RegistrationAction::RequestPhoneChallenge { phone }])
        }
        Err(err) => {
            state.error = Some(err.into());
            (state, Vec::new())
        }
    }
}
