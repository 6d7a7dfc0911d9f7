use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use rr_core::ports::{Route, RouterPort};

/// Navigation for the terminal host: there is no screen stack, so the
/// router only records where the core asked to go.
#[derive(Default)]
pub struct TerminalRouter {
    current: Mutex<Option<Route>>,
}

impl TerminalRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl RouterPort for TerminalRouter {
    async fn navigate(&self, route: Route) -> anyhow::Result<()> {
        match &route {
            Route::Login => info!("navigating to login"),
            Route::Campaign { campaign_id } => {
                info!(campaign_id = %campaign_id, "navigating to campaign")
            }
        }
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(route);
        Ok(())
    }
}
