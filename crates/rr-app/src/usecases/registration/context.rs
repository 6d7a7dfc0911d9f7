use std::sync::Arc;

use tokio::sync::Mutex;
use rr_core::registration::{
    RegistrationAction, RegistrationEvent, RegistrationState, RegistrationStateMachine,
};

/// Shared registration context holding the wizard state.
///
/// The state lock is held only for the pure transition, never across a
/// remote call. While a request runs, the state carries `in_flight` and the
/// state machine rejects further submissions on its own.
#[derive(Clone)]
pub struct RegistrationContext {
    state: Arc<Mutex<RegistrationState>>,
}

impl RegistrationContext {
    pub fn new(initial_state: RegistrationState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub async fn get_state(&self) -> RegistrationState {
        self.state.lock().await.clone()
    }

    /// Runs one transition and stores the result.
    ///
    /// Returns the new state and the actions the caller must execute.
    pub async fn apply(
        &self,
        event: RegistrationEvent,
    ) -> (RegistrationState, Vec<RegistrationAction>) {
        let mut guard = self.state.lock().await;
        let current = std::mem::take(&mut *guard);
        let (next, actions) = RegistrationStateMachine::transition(current, event);
        *guard = next.clone();
        (next, actions)
    }
}

impl Default for RegistrationContext {
    fn default() -> Self {
        Self::new(RegistrationState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rr_core::registration::{FormField, WizardStep};

    #[tokio::test]
    async fn apply_stores_the_next_state() {
        let context = RegistrationContext::default();

        let (next, actions) = context
            .apply(RegistrationEvent::UpdateField {
                field: FormField::Phone,
                value: "81998765432".into(),
            })
            .await;

        assert!(actions.is_empty());
        assert_eq!(next.step, WizardStep::Phone);
        assert_eq!(context.get_state().await.form.phone, "81998765432");
    }
}
