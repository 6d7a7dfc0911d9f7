//! Registration orchestrator.
//!
//! This module coordinates the registration state machine and its side
//! effects: gateway calls, alerts and navigation.

use std::collections::VecDeque;
use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use rr_core::{
    ports::{RegistrationGatewayPort, Route, RouterPort, UiPort},
    registration::{
        FormField, RegistrationAction, RegistrationError, RegistrationEvent, RegistrationState,
        RemoteRequest, ValidationError, WizardScreen, WizardStep,
    },
};

use crate::usecases::registration::context::RegistrationContext;

/// Orchestrator that drives the registration wizard.
pub struct RegistrationOrchestrator {
    context: Arc<RegistrationContext>,

    gateway: Arc<dyn RegistrationGatewayPort>,
    router: Arc<dyn RouterPort>,
    ui: Arc<dyn UiPort>,
}

impl RegistrationOrchestrator {
    pub fn new(
        gateway: Arc<dyn RegistrationGatewayPort>,
        router: Arc<dyn RouterPort>,
        ui: Arc<dyn UiPort>,
    ) -> Self {
        Self {
            context: RegistrationContext::default().arc(),
            gateway,
            router,
            ui,
        }
    }

    pub async fn state(&self) -> RegistrationState {
        self.context.get_state().await
    }

    pub async fn step(&self) -> WizardStep {
        self.context.get_state().await.step
    }

    pub async fn screen(&self) -> WizardScreen {
        self.context.get_state().await.screen()
    }

    pub async fn can_submit(&self) -> bool {
        self.context.get_state().await.can_submit()
    }

    /// Stores the phone and asks the server for an SMS code. A rejected
    /// submission leaves the stored phone untouched.
    pub async fn submit_phone(&self, phone: &str) -> Result<RegistrationState, RegistrationError> {
        self.dispatch(RegistrationEvent::SubmitPhone {
            phone: phone.to_string(),
        })
        .await
    }

    pub async fn resend_code(&self) -> Result<RegistrationState, RegistrationError> {
        self.dispatch(RegistrationEvent::ResendCode).await
    }

    pub async fn type_code_digit(&self, index: usize, text: &str) -> WizardScreen {
        self.apply_silently(RegistrationEvent::TypeCodeDigit {
            index,
            text: text.to_string(),
        })
        .await
        .screen()
    }

    pub async fn erase_code_digit(&self, index: usize) -> WizardScreen {
        self.apply_silently(RegistrationEvent::EraseCodeDigit { index })
            .await
            .screen()
    }

    /// Replaces the code entry with `digits` and submits it.
    pub async fn submit_code(
        &self,
        digits: [&str; 4],
    ) -> Result<RegistrationState, RegistrationError> {
        self.apply_silently(RegistrationEvent::EnterCode {
            digits: digits.map(str::to_string),
        })
        .await;
        self.dispatch(RegistrationEvent::SubmitCode).await
    }

    pub async fn update_field(&self, field: FormField, value: &str) {
        self.apply_silently(RegistrationEvent::UpdateField {
            field,
            value: value.to_string(),
        })
        .await;
    }

    pub async fn set_has_bag(&self, has_bag: bool) {
        self.apply_silently(RegistrationEvent::SetHasBag { has_bag })
            .await;
    }

    /// Checks one field. Invalid values of most fields are cleared so the
    /// rider types them again.
    pub async fn validate_field(&self, field: FormField) -> Option<ValidationError> {
        match self
            .dispatch(RegistrationEvent::ValidateField { field })
            .await
        {
            Err(RegistrationError::Validation(err)) => Some(err),
            _ => None,
        }
    }

    pub async fn view_terms(&self) -> WizardStep {
        self.apply_silently(RegistrationEvent::ViewTerms).await.step
    }

    pub async fn accept_terms(&self) -> WizardStep {
        self.apply_silently(RegistrationEvent::AcceptTerms).await.step
    }

    pub async fn submit_registration(&self) -> Result<RegistrationState, RegistrationError> {
        self.dispatch(RegistrationEvent::SubmitRegistration).await
    }

    pub async fn previous_step(&self) -> WizardStep {
        self.apply_silently(RegistrationEvent::Previous).await.step
    }

    /// Applies an event that cannot fail and has no side effects.
    async fn apply_silently(&self, event: RegistrationEvent) -> RegistrationState {
        let (next, actions) = self.context.apply(event).await;
        debug_assert!(actions.is_empty());
        next
    }

    /// Runs an event and every follow-up event its actions produce.
    ///
    /// Returns the final state, or the last error the wizard reported. User
    /// facing errors are also raised through the UI port.
    pub async fn dispatch(
        &self,
        event: RegistrationEvent,
    ) -> Result<RegistrationState, RegistrationError> {
        let span = info_span!("usecase.registration.dispatch", event = event.name());
        async {
            let mut pending_events = VecDeque::from([event]);
            let mut last_error = None;
            let mut current = None;

            while let Some(event) = pending_events.pop_front() {
                let event_name = event.name();
                let (next, actions) = self.context.apply(event).await;
                info!(
                    event = event_name,
                    step = ?next.step,
                    in_flight = ?next.in_flight,
                    "registration state transition"
                );

                if let Some(err) = &next.error {
                    if err.is_user_facing() {
                        self.raise_alert(err).await;
                    } else {
                        debug!(error = %err, "registration event rejected");
                    }
                    last_error = Some(err.clone());
                }

                for action in actions {
                    if let Some(follow_up) = self.execute_action(action).await {
                        pending_events.push_back(follow_up);
                    }
                }
                current = Some(next);
            }

            match (last_error, current) {
                (Some(err), _) => Err(err),
                (None, Some(state)) => Ok(state),
                (None, None) => Ok(self.context.get_state().await),
            }
        }
        .instrument(span)
        .await
    }

    async fn execute_action(&self, action: RegistrationAction) -> Option<RegistrationEvent> {
        debug!(action = action.name(), "registration executing action");
        match action {
            RegistrationAction::RequestPhoneChallenge { phone } => {
                Some(match self.gateway.send_phone_challenge(&phone).await {
                    Ok(code) => RegistrationEvent::PhoneChallengeIssued { code },
                    Err(error) => {
                        warn!(error = %error, "phone challenge failed");
                        RegistrationEvent::RemoteFailed {
                            request: RemoteRequest::PhoneChallenge,
                            error,
                        }
                    }
                })
            }
            RegistrationAction::ValidateCode { phone, code } => {
                Some(match self.gateway.validate_code(&phone, &code).await {
                    Ok(()) => RegistrationEvent::CodeAccepted,
                    Err(error) => {
                        warn!(error = %error, "code validation failed");
                        RegistrationEvent::RemoteFailed {
                            request: RemoteRequest::CodeValidation,
                            error,
                        }
                    }
                })
            }
            RegistrationAction::SubmitRegistration { form } => {
                Some(match self.gateway.register(&form).await {
                    Ok(()) => {
                        info!("rider registered");
                        RegistrationEvent::RegistrationAccepted
                    }
                    Err(error) => {
                        warn!(error = %error, "registration failed");
                        RegistrationEvent::RemoteFailed {
                            request: RemoteRequest::Registration,
                            error,
                        }
                    }
                })
            }
            RegistrationAction::NavigateToLogin => {
                if let Err(err) = self.router.navigate(Route::Login).await {
                    warn!(error = %err, "navigation to login failed");
                }
                None
            }
        }
    }

    async fn raise_alert(&self, err: &RegistrationError) {
        if let Err(alert_err) = self.ui.alert(&err.to_string()).await {
            warn!(error = %alert_err, "failed to show registration alert");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use rr_core::ports::RemoteError;
    use rr_core::registration::RegistrationForm;

    struct OfflineGateway;

    #[async_trait]
    impl RegistrationGatewayPort for OfflineGateway {
        async fn send_phone_challenge(&self, _phone: &str) -> Result<String, RemoteError> {
            Err(RemoteError::Transport("offline".into()))
        }

        async fn validate_code(&self, _phone: &str, _code: &str) -> Result<(), RemoteError> {
            Err(RemoteError::Transport("offline".into()))
        }

        async fn register(&self, _form: &RegistrationForm) -> Result<(), RemoteError> {
            Err(RemoteError::Transport("offline".into()))
        }
    }

    struct NoopRouter;

    #[async_trait]
    impl RouterPort for NoopRouter {
        async fn navigate(&self, _route: Route) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct FailingUi;

    #[async_trait]
    impl UiPort for FailingUi {
        async fn alert(&self, _message: &str) -> anyhow::Result<()> {
            anyhow::bail!("no screen")
        }
    }

    #[tokio::test]
    async fn alert_failure_does_not_hide_the_wizard_error() {
        let orchestrator = RegistrationOrchestrator::new(
            Arc::new(OfflineGateway),
            Arc::new(NoopRouter),
            Arc::new(FailingUi),
        );

        let err = orchestrator
            .submit_phone("81998765432")
            .await
            .expect_err("offline gateway");

        assert!(matches!(
            err,
            RegistrationError::Remote(RemoteError::Transport(_))
        ));
        let state = orchestrator.state().await;
        assert_eq!(state.step, WizardStep::Phone);
        assert!(state.in_flight.is_none());
    }
}
