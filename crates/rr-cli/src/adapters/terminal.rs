//! Terminal implementations of the presentation ports.

use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::warn;

use rr_core::objective::{ObjectiveBoardView, ObjectiveCard};
use rr_core::ports::{ObjectiveViewPort, UiPort};

const BAR_WIDTH: usize = 20;

/// Writes alerts and objective frames to a terminal stream.
pub struct TerminalUi {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalUi {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn write_block(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        out.write_all(text.as_bytes())?;
        out.flush()
    }
}

#[async_trait]
impl UiPort for TerminalUi {
    async fn alert(&self, message: &str) -> anyhow::Result<()> {
        self.write_block(&format!("! {message}\n"))?;
        Ok(())
    }
}

impl ObjectiveViewPort for TerminalUi {
    fn render(&self, view: &ObjectiveBoardView) {
        if let Err(err) = self.write_block(&render_board(view)) {
            warn!(error = %err, "failed to draw objective board");
        }
    }
}

/// One line per card: bar, percentage, band color and title.
pub fn render_card(card: &ObjectiveCard) -> String {
    let ratio = card.progress.clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}% {} {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        (ratio * 100.0).round() as u32,
        card.band.color_hex(),
        card.title
    )
}

pub fn render_board(view: &ObjectiveBoardView) -> String {
    let mut text = String::from("\n== Objectives ==\n");
    if view.cards.is_empty() {
        text.push_str("(no objectives)\n");
    }
    for card in &view.cards {
        text.push_str(&render_card(card));
        text.push('\n');
    }
    if view.celebrating {
        text.push_str("*** Objective complete! ***\n");
    }
    text
}
