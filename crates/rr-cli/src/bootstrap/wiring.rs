//! Dependency wiring.
//!
//! The only module that sees infrastructure adapters and use cases at the
//! same time. Everything is assembled from the [`AppConfig`] DTO; config
//! facts that cannot work are rejected here.

use std::sync::Arc;
use std::time::Duration;

use anyhow::ensure;
use tracing::debug;

use rr_app::{ObjectiveTracker, RegistrationOrchestrator};
use rr_core::config::AppConfig;
use rr_core::objective::ObjectiveTimings;
use rr_core::ports::{HttpClientPort, ObjectiveViewPort, RouterPort, UiPort};
use rr_infra::{HttpObjectiveFeed, HttpRegistrationGateway, ReqwestHttpClient};

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Presentation adapters supplied by the host.
#[derive(Clone)]
pub struct HostPorts {
    pub ui: Arc<dyn UiPort>,
    pub view: Arc<dyn ObjectiveViewPort>,
    pub router: Arc<dyn RouterPort>,
}

pub struct AppDeps {
    pub registration: RegistrationOrchestrator,
    pub objectives: ObjectiveTracker,
}

fn request_timeout(config: &AppConfig) -> Duration {
    match config.request_timeout_secs {
        0 => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        secs => Duration::from_secs(secs),
    }
}

pub fn build_http_client(config: &AppConfig) -> anyhow::Result<Arc<dyn HttpClientPort>> {
    Ok(Arc::new(ReqwestHttpClient::new(request_timeout(config))?))
}

/// Assembles the use cases over `http`.
pub fn wire_dependencies(
    config: &AppConfig,
    http: Arc<dyn HttpClientPort>,
    ports: HostPorts,
) -> anyhow::Result<AppDeps> {
    ensure!(
        !config.api_base_url.trim().is_empty(),
        "api.base_url is not configured"
    );

    let gateway = Arc::new(HttpRegistrationGateway::new(
        Arc::clone(&http),
        config.api_base_url.clone(),
    ));
    let feed = Arc::new(HttpObjectiveFeed::new(http, config.api_base_url.clone()));
    let timings = ObjectiveTimings::from_config(config);
    debug!(?timings, base_url = %config.api_base_url, "dependencies wired");

    Ok(AppDeps {
        registration: RegistrationOrchestrator::new(
            gateway,
            Arc::clone(&ports.router),
            ports.ui,
        ),
        objectives: ObjectiveTracker::new(feed, ports.view, ports.router, timings),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{TerminalRouter, TerminalUi};

    fn ports() -> HostPorts {
        let ui = Arc::new(TerminalUi::new(Box::new(std::io::sink())));
        HostPorts {
            ui: ui.clone(),
            view: ui,
            router: Arc::new(TerminalRouter::new()),
        }
    }

    #[test]
    fn zero_timeout_uses_default() {
        assert_eq!(
            request_timeout(&AppConfig::empty()),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let config = AppConfig::empty();
        let http = build_http_client(&config).unwrap();

        let err = wire_dependencies(&config, http, ports()).err().unwrap();

        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn timings_come_from_config() {
        let config = AppConfig {
            reveal_interval_ms: 250,
            max_visible: 5,
            ..AppConfig::with_system_defaults(std::env::temp_dir())
        };
        let http = build_http_client(&config).unwrap();

        let deps = wire_dependencies(&config, http, ports()).unwrap();

        assert_eq!(
            deps.objectives.timings().reveal_interval,
            Duration::from_millis(250)
        );
        assert_eq!(deps.objectives.timings().max_visible, 5);
    }
}
