use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tracing::{info, info_span, Instrument};

use super::config::{default_config_path, load_config_or_defaults};
use super::tracing::init_tracing_subscriber;
use super::wiring::{build_http_client, wire_dependencies, HostPorts};
use crate::adapters::{TerminalRouter, TerminalUi};
use crate::cli::{Cli, Commands};
use crate::commands::{run_objectives, run_register, RegisterOutcome};

/// Process entry point: parse flags, load config, init tracing, run.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config.clone() {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = load_config_or_defaults(&config_path)?;

    init_tracing_subscriber(&config.log_directory).context("Failed to initialize tracing")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_path.display(),
        "rider-rewards starting"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build the async runtime")?;

    runtime.block_on(async move {
        let ui = Arc::new(TerminalUi::stdout());
        let ports = HostPorts {
            ui: ui.clone(),
            view: ui,
            router: Arc::new(TerminalRouter::new()),
        };
        let http = build_http_client(&config)?;
        let deps = wire_dependencies(&config, http, ports)?;

        match cli.command {
            Commands::Register => {
                let mut input = BufReader::new(stdin()).lines();
                let mut out = std::io::stdout();
                let outcome = run_register(&deps.registration, &mut input, &mut out)
                    .instrument(info_span!("command.register"))
                    .await?;
                if outcome == RegisterOutcome::Abandoned {
                    println!();
                }
                Ok(())
            }
            Commands::Objectives { watch_secs } => {
                run_objectives(&deps.objectives, watch_secs.map(Duration::from_secs))
                    .instrument(info_span!("command.objectives"))
                    .await
            }
        }
    })
}
