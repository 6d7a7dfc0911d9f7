//! Home-screen objectives, drawn on the terminal.

use std::time::Duration;

use anyhow::Context;
use tracing::info;

use rr_app::ObjectiveTracker;
use rr_core::objective::{Objective, ObjectiveTimings};

/// Loads the board and keeps it open while its effects play.
///
/// Without `watch` the board stays up until the reveal ramp has shown every
/// card, or until the last completion effect has played if any objective is
/// complete. Ctrl-C closes it early. Pending effects are cancelled on the way
/// out.
pub async fn run_objectives(
    tracker: &ObjectiveTracker,
    watch: Option<Duration>,
) -> anyhow::Result<()> {
    tracker.mount();
    let loaded = tracker.load().await.context("failed to load objectives");
    if loaded.is_err() {
        tracker.teardown();
        return loaded;
    }

    let any_complete = tracker
        .objectives()
        .await
        .iter()
        .any(Objective::is_complete);
    let hold = watch.unwrap_or_else(|| default_hold(tracker.timings(), any_complete));
    info!(hold_ms = hold.as_millis() as u64, "objective board open");

    tokio::select! {
        _ = tokio::time::sleep(hold) => {}
        _ = tokio::signal::ctrl_c() => info!("objective board closed by user"),
    }

    tracker.teardown();
    Ok(())
}

fn default_hold(timings: &ObjectiveTimings, any_complete: bool) -> Duration {
    let steps = timings.max_visible.saturating_sub(1) as u32;
    let ramp = timings.reveal_interval * steps;
    if !any_complete {
        return ramp;
    }
    ramp.max(timings.completion_dwell)
        .max(timings.celebration_delay + timings.celebration_duration)
}
